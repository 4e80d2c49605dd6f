use super::{check_finite, FittedTransform, Transform, TransformFitError};
use canopy_metrics::{MeanVariance, Metric};
use itertools::izip;
use ndarray::prelude::*;

/**
A `NormalizedTransform` scales each feature to zero mean and unit variance. [Learn more](https://en.wikipedia.org/wiki/Feature_scaling#Standardization_(Z-score_Normalization).

# Example

For a feature with the values `[0.0, 5.2, 1.3, 10.0]`:

Mean: 4.125

Standard Deviation: 3.89447

`transformed_value = (value - mean) / std`

| feature value | transformed value                     |
|---------------|---------------------------------------|
| 0.0           | (0.0 - 4.125) / 3.89447  = -1.05919   |
| 5.2           | (5.2 - 4.125) / 3.89447  = 0.27603    |
| 1.3           | (1.3 - 4.125) / 3.89447  = -0.72539   |
| 10.0          | (10.0 - 4.125) / 3.89447 = 1.50855    |

A feature whose variance is zero transforms to `0.0` everywhere.
*/
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizedTransform;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedModel {
	pub feature_names: Vec<String>,
	pub means: Vec<f32>,
	pub variances: Vec<f32>,
}

impl Transform for NormalizedTransform {
	type Fitted = NormalizedModel;

	fn fit(
		&self,
		features: ArrayView2<f32>,
		feature_names: &[String],
		_seed: Option<u64>,
	) -> Result<NormalizedModel, TransformFitError> {
		check_finite(features)?;
		let mut means = Vec::with_capacity(features.ncols());
		let mut variances = Vec::with_capacity(features.ncols());
		for column in features.gencolumns() {
			let values = column.to_vec();
			let mean_variance =
				MeanVariance::compute(values.as_slice()).ok_or(TransformFitError::EmptyInput)?;
			means.push(mean_variance.mean);
			variances.push(mean_variance.variance);
		}
		Ok(NormalizedModel {
			feature_names: feature_names.to_owned(),
			means,
			variances,
		})
	}
}

impl NormalizedModel {
	fn normalize(&self, value: f32, mean: f32, variance: f32) -> f32 {
		if value.is_nan() || variance == 0.0 {
			0.0
		} else {
			(value - mean) / f32::sqrt(variance)
		}
	}
}

impl FittedTransform for NormalizedModel {
	fn feature_names(&self) -> &[String] {
		&self.feature_names
	}

	fn apply(&self, features: ArrayView2<f32>) -> Array2<f32> {
		let mut output = features.to_owned();
		for mut row in output.genrows_mut() {
			for (value, mean, variance) in izip!(row.iter_mut(), &self.means, &self.variances) {
				*value = self.normalize(*value, *mean, *variance);
			}
		}
		output
	}

	fn apply_row(&self, row: ArrayView1<f32>) -> Array1<f32> {
		izip!(row.iter(), &self.means, &self.variances)
			.map(|(value, mean, variance)| self.normalize(*value, *mean, *variance))
			.collect()
	}
}
