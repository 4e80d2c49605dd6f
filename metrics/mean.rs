use super::StreamingMetric;
use num_traits::ToPrimitive;

/// The arithmetic mean of a stream of values, computed incrementally.
#[derive(Debug, Clone, Default)]
pub struct Mean {
	n: u64,
	mean: f64,
}

impl Mean {
	pub fn new() -> Self {
		Self::default()
	}
}

impl StreamingMetric<'_> for Mean {
	type Input = f64;
	type Output = Option<f64>;

	fn update(&mut self, value: f64) {
		self.n += 1;
		self.mean += (value - self.mean) / self.n.to_f64().unwrap_or(f64::INFINITY);
	}

	fn merge(&mut self, other: Self) {
		let n = self.n + other.n;
		if n == 0 {
			return;
		}
		let n_a = self.n as f64;
		let n_b = other.n as f64;
		self.mean = (n_a * self.mean + n_b * other.mean) / (n_a + n_b);
		self.n = n;
	}

	fn finalize(self) -> Option<f64> {
		if self.n > 0 {
			Some(self.mean)
		} else {
			None
		}
	}
}

#[test]
fn test_mean() {
	let mut mean = Mean::new();
	for value in &[1.0, 2.0, 3.0, 6.0] {
		mean.update(*value);
	}
	approx::assert_abs_diff_eq!(mean.finalize().unwrap(), 3.0);
	assert_eq!(Mean::new().finalize(), None);
}

#[test]
fn test_mean_merge() {
	let mut a = Mean::new();
	a.update(1.0);
	a.update(2.0);
	let mut b = Mean::new();
	b.update(6.0);
	a.merge(b);
	approx::assert_abs_diff_eq!(a.finalize().unwrap(), 3.0);
	let mut empty = Mean::new();
	empty.merge(Mean::new());
	assert_eq!(empty.finalize(), None);
}
