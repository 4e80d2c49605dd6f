/*!
This crate defines the [`Transform`](trait.Transform.html) and [`FittedTransform`](trait.FittedTransform.html) traits. A transform is fit to a matrix of numeric features, producing a fitted transform that can then be applied to other matrices or to single rows. The tree learner fits a fresh transform at every node and uses the transformed values only to decide the split.

Three transforms are provided:

- [`IdentityTransform`](struct.IdentityTransform.html) passes features through untouched. This is the default.
- [`NormalizedTransform`](struct.NormalizedTransform.html) scales each feature to zero mean and unit variance.
- [`RandomProjectionTransform`](struct.RandomProjectionTransform.html) projects the features onto a sparse random basis. It is randomizable, so it must be fit with a seed.

[`TransformOptions`](enum.TransformOptions.html) selects one of them at runtime.
*/

#![allow(clippy::tabs_in_doc_comments)]

use ndarray::prelude::*;
use thiserror::Error;

mod identity;
mod normalized;
mod random_projection;

pub use self::identity::{IdentityModel, IdentityTransform};
pub use self::normalized::{NormalizedModel, NormalizedTransform};
pub use self::random_projection::{RandomProjectionModel, RandomProjectionTransform};

/// A transform that can be fit to a matrix of features, one row per record.
pub trait Transform {
	type Fitted: FittedTransform;

	/// Randomizable transforms receive a seed when they are fit.
	fn is_randomizable(&self) -> bool {
		false
	}

	fn fit(
		&self,
		features: ArrayView2<f32>,
		feature_names: &[String],
		seed: Option<u64>,
	) -> Result<Self::Fitted, TransformFitError>;
}

/// The result of fitting a [`Transform`](trait.Transform.html). `apply` and `apply_row` must produce identical values for the same row.
pub trait FittedTransform: std::fmt::Debug + Clone {
	/// The names of the output features.
	fn feature_names(&self) -> &[String];
	fn apply(&self, features: ArrayView2<f32>) -> Array2<f32>;
	fn apply_row(&self, row: ArrayView1<f32>) -> Array1<f32>;
}

#[derive(Debug, Error, PartialEq)]
pub enum TransformFitError {
	/// The features had no rows.
	#[error("cannot fit a transform to an empty matrix")]
	EmptyInput,
	/// A random projection was configured with zero components.
	#[error("the number of components must be greater than zero")]
	InvalidComponentCount,
	#[error("non finite value at row {row}, column {column}")]
	NonFiniteValue { row: usize, column: usize },
	/// A randomizable transform was fit without a seed.
	#[error("a randomizable transform requires a seed")]
	MissingSeed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformOptions {
	Identity(IdentityTransform),
	Normalized(NormalizedTransform),
	RandomProjection(RandomProjectionTransform),
}

impl Default for TransformOptions {
	fn default() -> Self {
		TransformOptions::Identity(IdentityTransform)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransformModel {
	Identity(IdentityModel),
	Normalized(NormalizedModel),
	RandomProjection(RandomProjectionModel),
}

impl Transform for TransformOptions {
	type Fitted = TransformModel;

	fn is_randomizable(&self) -> bool {
		match self {
			TransformOptions::Identity(transform) => transform.is_randomizable(),
			TransformOptions::Normalized(transform) => transform.is_randomizable(),
			TransformOptions::RandomProjection(transform) => transform.is_randomizable(),
		}
	}

	fn fit(
		&self,
		features: ArrayView2<f32>,
		feature_names: &[String],
		seed: Option<u64>,
	) -> Result<TransformModel, TransformFitError> {
		let model = match self {
			TransformOptions::Identity(transform) => {
				TransformModel::Identity(transform.fit(features, feature_names, seed)?)
			}
			TransformOptions::Normalized(transform) => {
				TransformModel::Normalized(transform.fit(features, feature_names, seed)?)
			}
			TransformOptions::RandomProjection(transform) => {
				TransformModel::RandomProjection(transform.fit(features, feature_names, seed)?)
			}
		};
		Ok(model)
	}
}

impl FittedTransform for TransformModel {
	fn feature_names(&self) -> &[String] {
		match self {
			TransformModel::Identity(model) => model.feature_names(),
			TransformModel::Normalized(model) => model.feature_names(),
			TransformModel::RandomProjection(model) => model.feature_names(),
		}
	}

	fn apply(&self, features: ArrayView2<f32>) -> Array2<f32> {
		match self {
			TransformModel::Identity(model) => model.apply(features),
			TransformModel::Normalized(model) => model.apply(features),
			TransformModel::RandomProjection(model) => model.apply(features),
		}
	}

	fn apply_row(&self, row: ArrayView1<f32>) -> Array1<f32> {
		match self {
			TransformModel::Identity(model) => model.apply_row(row),
			TransformModel::Normalized(model) => model.apply_row(row),
			TransformModel::RandomProjection(model) => model.apply_row(row),
		}
	}
}

/// Check that the features have at least one row and only finite values.
fn check_finite(features: ArrayView2<f32>) -> Result<(), TransformFitError> {
	if features.nrows() == 0 {
		return Err(TransformFitError::EmptyInput);
	}
	for ((row, column), value) in features.indexed_iter() {
		if !value.is_finite() {
			return Err(TransformFitError::NonFiniteValue { row, column });
		}
	}
	Ok(())
}
