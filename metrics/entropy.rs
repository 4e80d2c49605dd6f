use super::Metric;

/**
The entropy, in bits, of a vector of class counts. With `T` the sum of the counts, the entropy is `log2(T) - (1 / T) * sum(c * log2(c))`, where classes with a count of zero contribute nothing. The entropy of an empty vector of counts is zero.
*/
pub struct Entropy;

impl<'a> Metric<'a> for Entropy {
	type Input = &'a [f64];
	type Output = f64;

	fn compute(counts: Self::Input) -> Self::Output {
		let mut total = 0.0;
		let mut sum = 0.0;
		for count in counts.iter().cloned() {
			if count > 0.0 {
				sum += count * count.log2();
				total += count;
			}
		}
		if total == 0.0 {
			return 0.0;
		}
		total.log2() - sum / total
	}
}

#[test]
fn test_entropy() {
	approx::assert_abs_diff_eq!(Entropy::compute(&[2.0, 2.0]), 1.0);
	approx::assert_abs_diff_eq!(Entropy::compute(&[4.0, 0.0]), 0.0);
	approx::assert_abs_diff_eq!(Entropy::compute(&[]), 0.0);
	approx::assert_abs_diff_eq!(Entropy::compute(&[0.0, 0.0]), 0.0);
	approx::assert_abs_diff_eq!(Entropy::compute(&[1.0, 1.0, 1.0, 1.0]), 2.0);
	approx::assert_abs_diff_eq!(
		Entropy::compute(&[2.0, 1.0]),
		0.9182958340544896,
		epsilon = 1e-12
	);
}
