use canopy_metrics::{Entropy, Metric};
use ndarray::prelude::*;

/// The best threshold found for a single feature and the information gain it achieves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitCandidate {
	pub split_value: f64,
	pub gain: f64,
}

/**
Choose the feature and threshold with the highest information gain. `features` holds one row per example and `classes` holds each example's class index. Ties are broken in favor of the lowest feature index. If the examples all have the same class, no search is run and every feature's gain is zero. Returns `None` if there are no features.
*/
pub fn choose_best_split(
	features: ArrayView2<f32>,
	classes: &[usize],
	n_classes: usize,
) -> Option<(usize, SplitCandidate)> {
	let class_counts = compute_class_counts(classes, n_classes);
	let entropy = Entropy::compute(&class_counts);
	let mut best: Option<(usize, SplitCandidate)> = None;
	for (feature_index, values) in features.gencolumns().into_iter().enumerate() {
		let candidate = if entropy <= 0.0 {
			SplitCandidate {
				split_value: 0.0,
				gain: 0.0,
			}
		} else {
			find_best_split(values, classes, &class_counts, entropy)
		};
		match best {
			Some((_, best_candidate)) if candidate.gain <= best_candidate.gain => {}
			_ => best = Some((feature_index, candidate)),
		}
	}
	best
}

/**
Find the threshold for one feature that maximizes the information gain.

The examples are sorted by value. Walking the sorted examples, the gain of the boundary before example `i` is `entropy - entropy(left) * (i + 1) / n - entropy(right) * (n - i - 1) / n`, where `left` and `right` are the class counts on either side of the boundary. A boundary between two equal values cannot be split on and has a gain of zero. The threshold is the `f64` midpoint of the values on either side of the first boundary attaining the maximum gain.
*/
pub fn find_best_split(
	values: ArrayView1<f32>,
	classes: &[usize],
	class_counts: &[f64],
	entropy: f64,
) -> SplitCandidate {
	let n = values.len();
	if n < 2 {
		return SplitCandidate {
			split_value: values.iter().next().cloned().map(f64::from).unwrap_or(0.0),
			gain: 0.0,
		};
	}
	let n_examples = n as f64;
	let mut order: Vec<usize> = (0..n).collect();
	order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));
	let mut left = vec![0.0; class_counts.len()];
	let mut right = class_counts.to_owned();
	let first = order[0];
	left[classes[first]] += 1.0;
	right[classes[first]] -= 1.0;
	let mut previous_value = values[first];
	let mut gains = vec![0.0; n - 1];
	for (i, example_index) in order.iter().enumerate().skip(1) {
		let value = values[*example_index];
		let class = classes[*example_index];
		if value != previous_value {
			previous_value = value;
			gains[i - 1] = entropy
				- Entropy::compute(&left) * (i + 1) as f64 / n_examples
				- Entropy::compute(&right) * (n - i - 1) as f64 / n_examples;
		}
		left[class] += 1.0;
		right[class] -= 1.0;
	}
	let mut split_index = 0;
	for (index, gain) in gains.iter().enumerate() {
		if *gain > gains[split_index] {
			split_index = index;
		}
	}
	// The midpoint is computed in f64, where it lies strictly between any two distinct finite f32 values.
	let split_value =
		(f64::from(values[order[split_index]]) + f64::from(values[order[split_index + 1]])) / 2.0;
	SplitCandidate {
		split_value,
		gain: gains[split_index],
	}
}

pub(crate) fn compute_class_counts(classes: &[usize], n_classes: usize) -> Vec<f64> {
	let mut counts = vec![0.0; n_classes];
	for class in classes.iter() {
		counts[*class] += 1.0;
	}
	counts
}
