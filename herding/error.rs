use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum KernelError {
	#[error("non finite value at row {row}, column {column}")]
	NonFiniteValue { row: usize, column: usize },
	#[error("index {index} is out of bounds for a kernel built on {n_rows} rows")]
	IndexOutOfBounds { index: usize, n_rows: usize },
	/// The kernel function produced a non finite value, for example from a fractional exponent of a negative dot product.
	#[error("the kernel value for rows {i} and {j} is not finite")]
	NonFiniteResult { i: usize, j: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum HerdingError {
	#[error("the sample percent must be greater than 0 and at most 100, but it was {0}")]
	InvalidSamplePercent(f64),
	#[error("cannot subsample an empty dataset")]
	EmptyDataset,
	#[error("column {column_name} has type {column_type}, but only number and enum columns are supported")]
	UnsupportedColumnType {
		column_name: String,
		column_type: String,
	},
	#[error(transparent)]
	Kernel(#[from] KernelError),
}
