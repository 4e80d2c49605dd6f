use super::{check_finite, FittedTransform, Transform, TransformFitError};
use ndarray::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

/**
A `RandomProjectionTransform` projects the features onto `n_components` random directions. The projection matrix is drawn from the sparse distribution of Achlioptas, where each entry is `sqrt(3)` times `+1` with probability 1/6, `0` with probability 2/3, and `-1` with probability 1/6. The output features are named `K1` through `Kn`.

This transform is randomizable: fitting it with the same seed produces the same projection.
*/
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomProjectionTransform {
	pub n_components: usize,
}

impl Default for RandomProjectionTransform {
	fn default() -> Self {
		Self { n_components: 10 }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RandomProjectionModel {
	pub feature_names: Vec<String>,
	/// The projection matrix, with one row per input feature and one column per component.
	pub projection: Array2<f32>,
}

impl Transform for RandomProjectionTransform {
	type Fitted = RandomProjectionModel;

	fn is_randomizable(&self) -> bool {
		true
	}

	fn fit(
		&self,
		features: ArrayView2<f32>,
		_feature_names: &[String],
		seed: Option<u64>,
	) -> Result<RandomProjectionModel, TransformFitError> {
		let seed = seed.ok_or(TransformFitError::MissingSeed)?;
		if self.n_components == 0 {
			return Err(TransformFitError::InvalidComponentCount);
		}
		check_finite(features)?;
		let mut rng = Xoshiro256Plus::seed_from_u64(seed);
		let scale = f32::sqrt(3.0);
		let projection = Array2::from_shape_fn((features.ncols(), self.n_components), |_| {
			match rng.gen_range(0, 6) {
				0 => scale,
				1 => -scale,
				_ => 0.0,
			}
		});
		let feature_names = (1..=self.n_components)
			.map(|index| format!("K{}", index))
			.collect();
		Ok(RandomProjectionModel {
			feature_names,
			projection,
		})
	}
}

impl RandomProjectionModel {
	fn project(&self, row: ArrayView1<f32>, mut output: ArrayViewMut1<f32>) {
		for (component, value) in output.iter_mut().enumerate() {
			let mut sum = 0.0;
			for (feature, feature_value) in row.iter().enumerate() {
				sum += feature_value * self.projection[[feature, component]];
			}
			*value = sum;
		}
	}
}

impl FittedTransform for RandomProjectionModel {
	fn feature_names(&self) -> &[String] {
		&self.feature_names
	}

	fn apply(&self, features: ArrayView2<f32>) -> Array2<f32> {
		let mut output = Array2::zeros((features.nrows(), self.projection.ncols()));
		for (row, output_row) in features.genrows().into_iter().zip(output.genrows_mut()) {
			self.project(row, output_row);
		}
		output
	}

	fn apply_row(&self, row: ArrayView1<f32>) -> Array1<f32> {
		let mut output = Array1::zeros(self.projection.ncols());
		self.project(row, output.view_mut());
		output
	}
}
