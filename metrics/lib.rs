/*!
This crate provides the statistics the tree learner and the transforms are built on. Each one implements either [`Metric`](trait.Metric.html), when it is computed from a complete input in one call, or [`StreamingMetric`](trait.StreamingMetric.html), when values arrive one at a time.

- [`Entropy`](struct.Entropy.html) of a class count vector, in bits.
- [`Mean`](struct.Mean.html) and [`MeanVariance`](struct.MeanVariance.html), computed incrementally.
- [`Accuracy`](struct.Accuracy.html) of predicted class indexes.
*/

#![allow(clippy::tabs_in_doc_comments)]

mod accuracy;
mod entropy;
mod mean;
mod mean_variance;

pub use self::accuracy::Accuracy;
pub use self::entropy::Entropy;
pub use self::mean::Mean;
pub use self::mean_variance::{m2_to_variance, merge_mean_m2, MeanVariance, MeanVarianceOutput};

/// A metric computed from its whole input at once. The lifetime lets `Input` borrow, as in `Entropy`, whose input is a slice of counts.
pub trait Metric<'a> {
	type Input;
	type Output;
	fn compute(input: Self::Input) -> Self::Output;
}

/**
A metric that is updated with one value at a time and read out with `finalize`. Two partial metrics over disjoint inputs can be combined with `merge`.

```
use canopy_metrics::{Mean, StreamingMetric};

let mut left = Mean::new();
left.update(1.0);
left.update(2.0);
let mut right = Mean::new();
right.update(6.0);
left.merge(right);
assert_eq!(left.finalize(), Some(3.0));
```
*/
pub trait StreamingMetric<'a> {
	type Input;
	type Output;
	fn update(&mut self, input: Self::Input);
	fn merge(&mut self, other: Self);
	fn finalize(self) -> Self::Output;
}
