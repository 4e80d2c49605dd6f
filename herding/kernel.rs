use crate::error::KernelError;
use ndarray::prelude::*;

/**
A `Kernel` is built on a matrix of features, one row per record. The built [`KernelEvaluator`](trait.KernelEvaluator.html) evaluates the kernel function between any two of those rows. Dropping the evaluator releases everything that was computed when it was built.
*/
pub trait Kernel {
	type Evaluator: KernelEvaluator;
	fn build(&self, features: ArrayView2<f32>) -> Result<Self::Evaluator, KernelError>;
}

pub trait KernelEvaluator {
	/// The number of rows the kernel was built on.
	fn n_rows(&self) -> usize;
	/// Evaluate the kernel function between rows `i` and `j`.
	fn eval(&self, i: usize, j: usize) -> Result<f64, KernelError>;
}

/// The polynomial kernel `(x · y)^exponent`, or `(x · y + 1)^exponent` with lower order terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialKernel {
	pub exponent: f64,
	pub use_lower_order: bool,
}

impl Default for PolynomialKernel {
	fn default() -> Self {
		Self {
			exponent: 1.0,
			use_lower_order: false,
		}
	}
}

/// The radial basis function kernel `exp(-gamma * |x - y|^2)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RbfKernel {
	pub gamma: f64,
}

impl Default for RbfKernel {
	fn default() -> Self {
		Self { gamma: 0.01 }
	}
}

#[derive(Debug)]
pub struct PolynomialEvaluator {
	kernel: PolynomialKernel,
	features: Array2<f64>,
}

#[derive(Debug)]
pub struct RbfEvaluator {
	kernel: RbfKernel,
	features: Array2<f64>,
	squared_norms: Array1<f64>,
}

impl Kernel for PolynomialKernel {
	type Evaluator = PolynomialEvaluator;

	fn build(&self, features: ArrayView2<f32>) -> Result<PolynomialEvaluator, KernelError> {
		Ok(PolynomialEvaluator {
			kernel: *self,
			features: to_f64(features)?,
		})
	}
}

impl KernelEvaluator for PolynomialEvaluator {
	fn n_rows(&self) -> usize {
		self.features.nrows()
	}

	fn eval(&self, i: usize, j: usize) -> Result<f64, KernelError> {
		check_index(i, self.n_rows())?;
		check_index(j, self.n_rows())?;
		let mut value = self.features.row(i).dot(&self.features.row(j));
		if self.kernel.use_lower_order {
			value += 1.0;
		}
		if self.kernel.exponent != 1.0 {
			value = value.powf(self.kernel.exponent);
		}
		check_result(value, i, j)
	}
}

impl Kernel for RbfKernel {
	type Evaluator = RbfEvaluator;

	fn build(&self, features: ArrayView2<f32>) -> Result<RbfEvaluator, KernelError> {
		let features = to_f64(features)?;
		let squared_norms = features.genrows().into_iter().map(|row| row.dot(&row)).collect();
		Ok(RbfEvaluator {
			kernel: *self,
			features,
			squared_norms,
		})
	}
}

impl KernelEvaluator for RbfEvaluator {
	fn n_rows(&self) -> usize {
		self.features.nrows()
	}

	fn eval(&self, i: usize, j: usize) -> Result<f64, KernelError> {
		check_index(i, self.n_rows())?;
		check_index(j, self.n_rows())?;
		if i == j {
			return Ok(1.0);
		}
		let dot = self.features.row(i).dot(&self.features.row(j));
		let squared_distance = self.squared_norms[i] + self.squared_norms[j] - 2.0 * dot;
		let value = (-self.kernel.gamma * squared_distance).exp();
		check_result(value, i, j)
	}
}

/// Selects one of the provided kernels at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelOptions {
	Polynomial(PolynomialKernel),
	Rbf(RbfKernel),
}

impl Default for KernelOptions {
	fn default() -> Self {
		KernelOptions::Polynomial(PolynomialKernel::default())
	}
}

#[derive(Debug)]
pub enum KernelOptionsEvaluator {
	Polynomial(PolynomialEvaluator),
	Rbf(RbfEvaluator),
}

impl Kernel for KernelOptions {
	type Evaluator = KernelOptionsEvaluator;

	fn build(&self, features: ArrayView2<f32>) -> Result<KernelOptionsEvaluator, KernelError> {
		let evaluator = match self {
			KernelOptions::Polynomial(kernel) => {
				KernelOptionsEvaluator::Polynomial(kernel.build(features)?)
			}
			KernelOptions::Rbf(kernel) => KernelOptionsEvaluator::Rbf(kernel.build(features)?),
		};
		Ok(evaluator)
	}
}

impl KernelEvaluator for KernelOptionsEvaluator {
	fn n_rows(&self) -> usize {
		match self {
			KernelOptionsEvaluator::Polynomial(evaluator) => evaluator.n_rows(),
			KernelOptionsEvaluator::Rbf(evaluator) => evaluator.n_rows(),
		}
	}

	fn eval(&self, i: usize, j: usize) -> Result<f64, KernelError> {
		match self {
			KernelOptionsEvaluator::Polynomial(evaluator) => evaluator.eval(i, j),
			KernelOptionsEvaluator::Rbf(evaluator) => evaluator.eval(i, j),
		}
	}
}

fn to_f64(features: ArrayView2<f32>) -> Result<Array2<f64>, KernelError> {
	if let Some(((row, column), _)) = features
		.indexed_iter()
		.find(|(_, value)| !value.is_finite())
	{
		return Err(KernelError::NonFiniteValue { row, column });
	}
	Ok(features.mapv(|value| value as f64))
}

fn check_index(index: usize, n_rows: usize) -> Result<(), KernelError> {
	if index < n_rows {
		Ok(())
	} else {
		Err(KernelError::IndexOutOfBounds { index, n_rows })
	}
}

fn check_result(value: f64, i: usize, j: usize) -> Result<f64, KernelError> {
	if value.is_finite() {
		Ok(value)
	} else {
		Err(KernelError::NonFiniteResult { i, j })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_polynomial_kernel() {
		let features = arr2(&[[1.0, 2.0], [3.0, -1.0], [0.5, 0.5]]);
		let evaluator = PolynomialKernel::default().build(features.view()).unwrap();
		assert_eq!(evaluator.n_rows(), 3);
		approx::assert_abs_diff_eq!(evaluator.eval(0, 1).unwrap(), 1.0);
		approx::assert_abs_diff_eq!(evaluator.eval(0, 0).unwrap(), 5.0);
		let kernel = PolynomialKernel {
			exponent: 2.0,
			use_lower_order: true,
		};
		let evaluator = kernel.build(features.view()).unwrap();
		approx::assert_abs_diff_eq!(evaluator.eval(0, 1).unwrap(), 4.0);
		approx::assert_abs_diff_eq!(evaluator.eval(2, 2).unwrap(), 2.25);
		let kernel = PolynomialKernel {
			exponent: 0.5,
			use_lower_order: false,
		};
		let features = arr2(&[[1.0], [-1.0]]);
		let evaluator = kernel.build(features.view()).unwrap();
		assert_eq!(
			evaluator.eval(0, 1),
			Err(KernelError::NonFiniteResult { i: 0, j: 1 })
		);
	}

	#[test]
	fn test_rbf_kernel() {
		let features = arr2(&[[0.0, 0.0], [3.0, 4.0]]);
		let evaluator = RbfKernel::default().build(features.view()).unwrap();
		approx::assert_abs_diff_eq!(evaluator.eval(0, 0).unwrap(), 1.0);
		approx::assert_abs_diff_eq!(
			evaluator.eval(0, 1).unwrap(),
			(-0.25f64).exp(),
			epsilon = 1e-12
		);
		approx::assert_abs_diff_eq!(
			evaluator.eval(1, 0).unwrap(),
			evaluator.eval(0, 1).unwrap()
		);
	}

	#[test]
	fn test_kernel_errors() {
		let features = arr2(&[[1.0, std::f32::NAN]]);
		assert_eq!(
			KernelOptions::default().build(features.view()).unwrap_err(),
			KernelError::NonFiniteValue { row: 0, column: 1 }
		);
		let features = arr2(&[[1.0, 2.0]]);
		let evaluator = KernelOptions::Rbf(RbfKernel::default())
			.build(features.view())
			.unwrap();
		assert_eq!(
			evaluator.eval(0, 1),
			Err(KernelError::IndexOutOfBounds {
				index: 1,
				n_rows: 1
			})
		);
	}
}
