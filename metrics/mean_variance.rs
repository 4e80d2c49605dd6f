//! https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Parallel_algorithm

use super::{Metric, StreamingMetric};
use num_traits::ToPrimitive;

/// The mean and population variance of a stream of values.
#[derive(Debug, Clone, Default)]
pub struct MeanVariance {
	n: u64,
	mean: f64,
	m2: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanVarianceOutput {
	pub mean: f32,
	pub variance: f32,
}

impl MeanVariance {
	pub fn new() -> Self {
		Self::default()
	}
}

impl StreamingMetric<'_> for MeanVariance {
	type Input = f32;
	type Output = Option<MeanVarianceOutput>;

	fn update(&mut self, value: f32) {
		let (mean, m2) = merge_mean_m2(self.n, self.mean, self.m2, 1, value as f64, 0.0);
		self.n += 1;
		self.mean = mean;
		self.m2 = m2;
	}

	fn merge(&mut self, other: Self) {
		if other.n == 0 {
			return;
		}
		if self.n == 0 {
			*self = other;
			return;
		}
		let (mean, m2) = merge_mean_m2(self.n, self.mean, self.m2, other.n, other.mean, other.m2);
		self.n += other.n;
		self.mean = mean;
		self.m2 = m2;
	}

	fn finalize(self) -> Option<MeanVarianceOutput> {
		if self.n == 0 {
			return None;
		}
		Some(MeanVarianceOutput {
			mean: self.mean as f32,
			variance: m2_to_variance(self.m2, self.n),
		})
	}
}

impl<'a> Metric<'a> for MeanVariance {
	type Input = &'a [f32];
	type Output = Option<MeanVarianceOutput>;

	fn compute(input: Self::Input) -> Self::Output {
		let mut mean_variance = MeanVariance::new();
		for value in input.iter() {
			mean_variance.update(*value);
		}
		mean_variance.finalize()
	}
}

/// combine two separate means and variances into a single mean and variance
/// useful in parallel algorithms
pub fn merge_mean_m2(
	n_a: u64,
	mean_a: f64,
	m2_a: f64,
	n_b: u64,
	mean_b: f64,
	m2_b: f64,
) -> (f64, f64) {
	let n_a = n_a.to_f64().unwrap_or(f64::INFINITY);
	let n_b = n_b.to_f64().unwrap_or(f64::INFINITY);
	(
		(((n_a * mean_a) + (n_b * mean_b)) / (n_a + n_b)),
		m2_a + m2_b + (mean_b - mean_a) * (mean_b - mean_a) * (n_a * n_b / (n_a + n_b)),
	)
}

pub fn m2_to_variance(m2: f64, n: u64) -> f32 {
	(m2 / n.to_f64().unwrap_or(f64::INFINITY)) as f32
}

#[test]
fn test_mean_variance() {
	let output = MeanVariance::compute(&[0.0, 5.2, 1.3, 10.0]).unwrap();
	approx::assert_abs_diff_eq!(output.mean, 4.125, epsilon = 1e-5);
	approx::assert_abs_diff_eq!(output.variance, 15.166875, epsilon = 1e-4);
	assert_eq!(MeanVariance::compute(&[]), None);
}

#[test]
fn test_mean_variance_merge() {
	let mut a = MeanVariance::new();
	a.update(0.0);
	a.update(5.2);
	let mut b = MeanVariance::new();
	b.update(1.3);
	b.update(10.0);
	a.merge(b);
	let merged = a.finalize().unwrap();
	let direct = MeanVariance::compute(&[0.0, 5.2, 1.3, 10.0]).unwrap();
	approx::assert_abs_diff_eq!(merged.mean, direct.mean, epsilon = 1e-6);
	approx::assert_abs_diff_eq!(merged.variance, direct.variance, epsilon = 1e-4);
}
