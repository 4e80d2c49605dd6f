use canopy_transform::TransformFitError;
use thiserror::Error;

/// The training data has a shape the tree cannot learn from. This is checked before any partitioning.
#[derive(Debug, Error, PartialEq)]
pub enum CapabilityError {
	#[error("feature column {column_name} has type {column_type}, but only number columns are supported")]
	UnsupportedFeatureType {
		column_name: String,
		column_type: String,
	},
	#[error("label column {column_name} has type {column_type}, but only enum columns are supported")]
	UnsupportedLabelType {
		column_name: String,
		column_type: String,
	},
	#[error("feature column {column_name} is missing a value at row {row}")]
	MissingFeatureValue { column_name: String, row: usize },
	#[error("column {column_name} has {actual} rows, but the labels have {expected}")]
	LengthMismatch {
		column_name: String,
		expected: usize,
		actual: usize,
	},
}

#[derive(Debug, Error, PartialEq)]
pub enum ConstructionError {
	/// A partition had no examples, either when making a leaf or because a split sent every example to one side.
	#[error("a partition has no examples")]
	EmptyPartition,
}

#[derive(Debug, Error, PartialEq)]
pub enum TrainError {
	#[error(transparent)]
	Capability(#[from] CapabilityError),
	#[error(transparent)]
	Construction(#[from] ConstructionError),
	#[error(transparent)]
	TransformFit(#[from] TransformFitError),
}

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
	#[error("expected {expected} features, but got {actual}")]
	FeatureCountMismatch { expected: usize, actual: usize },
	#[error("feature column {column_name} has type {column_type}, but only number columns are supported")]
	UnsupportedFeatureType {
		column_name: String,
		column_type: String,
	},
}
