use crate::{
	error::{CapabilityError, ConstructionError, TrainError},
	split::{choose_best_split, compute_class_counts},
	types::{BranchNode, LeafNode, Node, Task, Tree},
	TrainOptions,
};
use canopy_dataframe::{ColumnView, DataFrameView, NumberColumnView};
use canopy_metrics::{Mean, StreamingMetric};
use canopy_transform::{FittedTransform, Transform};
use itertools::izip;
use ndarray::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use tracing::{debug, info, instrument};

/// The labels of the training examples, after examples with a missing label have been removed.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
	Classification {
		classes: Vec<usize>,
		n_classes: usize,
	},
	Regression {
		values: Vec<f64>,
	},
}

impl Labels {
	pub fn task(&self) -> Task {
		match self {
			Labels::Classification { n_classes, .. } => Task::Classification {
				n_classes: *n_classes,
			},
			Labels::Regression { .. } => Task::Regression,
		}
	}
}

/// During training, a node is unexpanded until it has been turned into a leaf or a branch.
#[derive(Debug)]
enum TrainNode<F> {
	Unexpanded { examples: Vec<usize> },
	Branch(BranchNode<F>),
	Leaf(LeafNode),
}

/// What an unexpanded node turns into.
enum Expansion<F> {
	Leaf(LeafNode),
	Branch {
		transform: F,
		feature_index: usize,
		split_value: f64,
		left_examples: Vec<usize>,
		right_examples: Vec<usize>,
	},
}

/**
Train a tree on `features`, which must contain only number columns without missing values, to predict `labels`, which must be an enum column. Examples whose label is missing are removed before training.

Nodes are expanded depth first, left before right. If `transform` is randomizable, each node that fits it draws its seed from a generator seeded with `options.seed`, so the same options always produce the same tree.
*/
#[instrument(skip(features, labels, transform))]
pub fn train<T>(
	features: DataFrameView,
	labels: ColumnView,
	transform: &T,
	options: &TrainOptions,
) -> Result<Tree<T::Fitted>, TrainError>
where
	T: Transform,
{
	let examples = prepare_examples(&features, &labels)?;
	let feature_names: Vec<String> = examples
		.columns
		.iter()
		.map(|column| column.name.to_owned())
		.collect();
	let mut features = Array2::zeros((examples.rows.len(), examples.columns.len()));
	for (mut feature_column, column) in izip!(features.gencolumns_mut(), examples.columns.iter()) {
		for (feature, row) in izip!(feature_column.iter_mut(), examples.rows.iter()) {
			*feature = column.data[*row];
		}
	}
	debug!(
		n_examples = features.nrows(),
		n_features = features.ncols(),
		"training tree"
	);
	let tree = train_tree(
		features.view(),
		feature_names,
		&examples.labels,
		transform,
		options,
	)?;
	info!(
		n_nodes = tree.n_nodes(),
		n_leaves = tree.n_leaves(),
		depth = tree.depth(),
		"trained tree"
	);
	Ok(tree)
}

struct Examples<'a> {
	columns: Vec<NumberColumnView<'a>>,
	labels: Labels,
	/// The rows of the input whose label is present.
	rows: Vec<usize>,
}

/// Check that the features and labels can be learned from, then drop the examples whose label is missing.
fn prepare_examples<'a>(
	features: &DataFrameView<'a>,
	labels: &ColumnView<'a>,
) -> Result<Examples<'a>, CapabilityError> {
	let label_column = match labels {
		ColumnView::Enum(column) => column.clone(),
		_ => {
			return Err(CapabilityError::UnsupportedLabelType {
				column_name: labels.name().to_owned(),
				column_type: labels.type_name().to_owned(),
			})
		}
	};
	let mut columns = Vec::with_capacity(features.ncols());
	for column in features.columns.iter() {
		let number_column = match column {
			ColumnView::Number(column) => column.clone(),
			_ => {
				return Err(CapabilityError::UnsupportedFeatureType {
					column_name: column.name().to_owned(),
					column_type: column.type_name().to_owned(),
				})
			}
		};
		if number_column.data.len() != label_column.data.len() {
			return Err(CapabilityError::LengthMismatch {
				column_name: number_column.name.to_owned(),
				expected: label_column.data.len(),
				actual: number_column.data.len(),
			});
		}
		if let Some(row) = number_column.data.iter().position(|value| value.is_nan()) {
			return Err(CapabilityError::MissingFeatureValue {
				column_name: number_column.name.to_owned(),
				row,
			});
		}
		columns.push(number_column);
	}
	let mut classes = Vec::with_capacity(label_column.data.len());
	let mut rows = Vec::with_capacity(label_column.data.len());
	for (row, class) in label_column.indexes().enumerate() {
		if let Some(class) = class {
			classes.push(class);
			rows.push(row);
		}
	}
	let n_dropped = label_column.data.len() - rows.len();
	if n_dropped > 0 {
		debug!(n_dropped, "dropped examples with a missing label");
	}
	Ok(Examples {
		columns,
		labels: Labels::Classification {
			classes,
			n_classes: label_column.options.len(),
		},
		rows,
	})
}

/// Build a tree from a dense matrix of features and the matching labels. Unexpanded nodes are held in the node arena and expanded from an explicit stack, so deep trees do not grow the call stack.
pub(crate) fn train_tree<T>(
	features: ArrayView2<f32>,
	feature_names: Vec<String>,
	labels: &Labels,
	transform: &T,
	options: &TrainOptions,
) -> Result<Tree<T::Fitted>, TrainError>
where
	T: Transform,
{
	let mut rng = Xoshiro256Plus::seed_from_u64(options.seed);
	let mut nodes: Vec<TrainNode<T::Fitted>> = vec![TrainNode::Unexpanded {
		examples: (0..features.nrows()).collect(),
	}];
	let mut stack = vec![0];
	while let Some(node_index) = stack.pop() {
		let examples = match &mut nodes[node_index] {
			TrainNode::Unexpanded { examples } => std::mem::take(examples),
			_ => continue,
		};
		let expansion = expand_node(
			features,
			&feature_names,
			labels,
			transform,
			options,
			&mut rng,
			&examples,
		)?;
		nodes[node_index] = match expansion {
			Expansion::Leaf(leaf) => TrainNode::Leaf(leaf),
			Expansion::Branch {
				transform,
				feature_index,
				split_value,
				left_examples,
				right_examples,
			} => {
				let left_child_index = nodes.len();
				let right_child_index = left_child_index + 1;
				nodes.push(TrainNode::Unexpanded {
					examples: left_examples,
				});
				nodes.push(TrainNode::Unexpanded {
					examples: right_examples,
				});
				// The left child is popped first.
				stack.push(right_child_index);
				stack.push(left_child_index);
				TrainNode::Branch(BranchNode {
					left_child_index,
					right_child_index,
					transform,
					feature_index,
					split_value,
				})
			}
		};
	}
	let nodes = nodes
		.into_iter()
		.map(|node| match node {
			TrainNode::Branch(branch) => Node::Branch(branch),
			TrainNode::Leaf(leaf) => Node::Leaf(leaf),
			TrainNode::Unexpanded { .. } => unreachable!("every node is expanded"),
		})
		.collect();
	Ok(Tree {
		task: labels.task(),
		feature_names,
		nodes,
	})
}

fn expand_node<T>(
	features: ArrayView2<f32>,
	feature_names: &[String],
	labels: &Labels,
	transform: &T,
	options: &TrainOptions,
	rng: &mut Xoshiro256Plus,
	examples: &[usize],
) -> Result<Expansion<T::Fitted>, TrainError>
where
	T: Transform,
{
	if examples.is_empty() || examples.len() as f64 <= options.min_split_size {
		return Ok(Expansion::Leaf(compute_leaf(labels, examples)?));
	}
	let seed = if transform.is_randomizable() {
		Some(rng.gen::<u64>())
	} else {
		None
	};
	let partition = features.select(Axis(0), examples);
	let fitted = transform.fit(partition.view(), feature_names, seed)?;
	let transformed = fitted.apply(partition.view());
	let (classes, n_classes) = match labels {
		Labels::Classification { classes, n_classes } => (
			examples.iter().map(|example| classes[*example]).collect::<Vec<_>>(),
			*n_classes,
		),
		// Entropy splits need classes.
		Labels::Regression { .. } => return Ok(Expansion::Leaf(compute_leaf(labels, examples)?)),
	};
	let (feature_index, candidate) = match choose_best_split(transformed.view(), &classes, n_classes)
	{
		Some(best) if best.1.gain > 0.0 => best,
		_ => {
			debug!(n_examples = examples.len(), "no split with positive gain");
			return Ok(Expansion::Leaf(compute_leaf(labels, examples)?));
		}
	};
	let mut left_examples = Vec::new();
	let mut right_examples = Vec::new();
	for (example, value) in izip!(examples.iter(), transformed.column(feature_index).iter()) {
		if f64::from(*value) < candidate.split_value {
			left_examples.push(*example);
		} else {
			right_examples.push(*example);
		}
	}
	// A non finite transformed value can put every example on one side. Each child must be strictly smaller than its parent for the build to end.
	if left_examples.is_empty() || right_examples.is_empty() {
		return Err(ConstructionError::EmptyPartition.into());
	}
	debug!(
		n_examples = examples.len(),
		feature_index,
		split_value = candidate.split_value,
		gain = candidate.gain,
		n_left = left_examples.len(),
		n_right = right_examples.len(),
		"split node"
	);
	Ok(Expansion::Branch {
		transform: fitted,
		feature_index,
		split_value: candidate.split_value,
		left_examples,
		right_examples,
	})
}

/**
Make the leaf for the examples at `examples`. For classification, the leaf value is the count of each class. For regression, it is the mean label.
*/
pub fn compute_leaf(labels: &Labels, examples: &[usize]) -> Result<LeafNode, ConstructionError> {
	if examples.is_empty() {
		return Err(ConstructionError::EmptyPartition);
	}
	let value = match labels {
		Labels::Classification { classes, n_classes } => {
			let classes: Vec<usize> = examples.iter().map(|example| classes[*example]).collect();
			compute_class_counts(&classes, *n_classes)
		}
		Labels::Regression { values } => {
			let mut mean = Mean::new();
			for example in examples.iter() {
				mean.update(values[*example]);
			}
			vec![mean.finalize().ok_or(ConstructionError::EmptyPartition)?]
		}
	};
	Ok(LeafNode { value })
}
