use super::{FittedTransform, Transform, TransformFitError};
use ndarray::prelude::*;

/**
The `IdentityTransform` is the simplest possible transform, which passes the features through untouched.

# Example

| feature value | transformed value |
|---------------|-------------------|
| 0.2           | 0.2               |
| 3.0           | 3.0               |
| 2.1           | 2.1               |
*/
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityTransform;

#[derive(Debug, Clone, PartialEq)]
pub struct IdentityModel {
	pub feature_names: Vec<String>,
}

impl Transform for IdentityTransform {
	type Fitted = IdentityModel;

	fn fit(
		&self,
		_features: ArrayView2<f32>,
		feature_names: &[String],
		_seed: Option<u64>,
	) -> Result<IdentityModel, TransformFitError> {
		Ok(IdentityModel {
			feature_names: feature_names.to_owned(),
		})
	}
}

impl FittedTransform for IdentityModel {
	fn feature_names(&self) -> &[String] {
		&self.feature_names
	}

	fn apply(&self, features: ArrayView2<f32>) -> Array2<f32> {
		features.to_owned()
	}

	fn apply_row(&self, row: ArrayView1<f32>) -> Array1<f32> {
		row.to_owned()
	}
}

#[test]
fn test_identity() {
	let features = arr2(&[[0.2, 1.0], [3.0, -1.0], [2.1, 0.0]]);
	let names = vec!["x".to_owned(), "y".to_owned()];
	let model = IdentityTransform.fit(features.view(), &names, None).unwrap();
	assert_eq!(model.apply(features.view()), features);
	assert_eq!(model.apply_row(features.row(1)), arr1(&[3.0, -1.0]));
	assert_eq!(model.feature_names(), names.as_slice());
}
