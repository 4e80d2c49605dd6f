/*!
This crate implements a binary classification tree whose split decisions are made on a locally transformed view of the data. At every node, a fresh [`Transform`](../canopy_transform/trait.Transform.html) is fit to the records that reach the node, the best entropy split is searched for on the transformed values, and the untransformed records are then partitioned and passed on to the children. Each branch keeps the transform that was fit for it, so that new records can be routed the same way at prediction time.

```
use canopy_dataframe::*;
use canopy_transform::IdentityTransform;
use std::num::NonZeroUsize;

let features = DataFrame {
	columns: vec![Column::Number(NumberColumn {
		name: "x".to_owned(),
		data: vec![1.0, 2.0, 8.0, 9.0],
	})],
};
let labels = Column::Enum(EnumColumn {
	name: "label".to_owned(),
	options: vec!["a".to_owned(), "b".to_owned()],
	data: vec![
		NonZeroUsize::new(1),
		NonZeroUsize::new(1),
		NonZeroUsize::new(2),
		NonZeroUsize::new(2),
	],
});
let tree = canopy_tree::train(
	features.view(),
	labels.view(),
	&IdentityTransform,
	&canopy_tree::TrainOptions::default(),
)
.unwrap();
assert_eq!(tree.to_string(), "x < 5: 2 0\nx >= 5: 0 2");
```
*/

#![allow(clippy::tabs_in_doc_comments)]

mod describe;
mod error;
mod predict;
mod split;
mod train;
mod types;


pub use self::error::{CapabilityError, ConstructionError, PredictError, TrainError};
pub use self::split::{choose_best_split, find_best_split, SplitCandidate};
pub use self::train::{compute_leaf, train, Labels};
pub use self::types::{BranchNode, LeafNode, Node, Task, Tree};

/// These are the options passed to [`train`](fn.train.html).
#[derive(Debug, Clone)]
pub struct TrainOptions {
	/// A node with at most this many examples becomes a leaf without searching for a split.
	pub min_split_size: f64,
	/// The seed for the generator that seeds each node's transform, if the transform is randomizable.
	pub seed: u64,
}

impl Default for TrainOptions {
	fn default() -> Self {
		Self {
			min_split_size: 2.0,
			seed: 1,
		}
	}
}
