use crate::{
	error::PredictError,
	types::{Node, Task, Tree},
};
use canopy_dataframe::{ColumnView, DataFrameView};
use canopy_transform::FittedTransform;
use itertools::izip;
use ndarray::prelude::*;

impl<F> Tree<F>
where
	F: FittedTransform,
{
	/**
	Make a prediction for a single example. Each branch transforms the example with its own transform before comparing it with the branch's split value. For classification, the returned class distribution sums to one. For regression, it holds the mean label of the leaf the example reaches.
	*/
	pub fn predict(&self, features: ArrayView1<f32>) -> Result<Array1<f64>, PredictError> {
		if features.len() != self.feature_names.len() {
			return Err(PredictError::FeatureCountMismatch {
				expected: self.feature_names.len(),
				actual: features.len(),
			});
		}
		Ok(self.predict_from(0, features))
	}

	/**
	Make predictions for every row of `features`, which must have one number column per training feature. The root's transform is applied once to the whole batch, and each row then continues down its subtree as in [`predict`](#method.predict).
	*/
	pub fn predict_batch(&self, features: DataFrameView) -> Result<Array2<f64>, PredictError> {
		let features = self.features_to_array(&features)?;
		let n_outputs = self.task.n_outputs();
		let mut predictions = Array2::zeros((features.nrows(), n_outputs));
		match &self.nodes[0] {
			Node::Leaf(_) => {
				for (row, mut prediction) in
					izip!(features.genrows(), predictions.genrows_mut())
				{
					prediction.assign(&self.predict_from(0, row));
				}
			}
			Node::Branch(branch) => {
				let transformed = branch.transform.apply(features.view());
				for (row, transformed_row, mut prediction) in izip!(
					features.genrows(),
					transformed.genrows(),
					predictions.genrows_mut()
				) {
					let value = f64::from(transformed_row[branch.feature_index]);
					let child_index = if value < branch.split_value {
						branch.left_child_index
					} else {
						branch.right_child_index
					};
					prediction.assign(&self.predict_from(child_index, row));
				}
			}
		}
		Ok(predictions)
	}

	/// Descend from the node at `node_index`, accumulate the leaf that is reached, and normalize the result for classification.
	fn predict_from(&self, mut node_index: usize, features: ArrayView1<f32>) -> Array1<f64> {
		let mut distribution = Array1::<f64>::zeros(self.task.n_outputs());
		// Traverse the tree until we get to a leaf.
		loop {
			match &self.nodes[node_index] {
				Node::Branch(branch) => {
					let transformed = branch.transform.apply_row(features);
					let value = f64::from(transformed[branch.feature_index]);
					node_index = if value < branch.split_value {
						branch.left_child_index
					} else {
						branch.right_child_index
					};
				}
				Node::Leaf(leaf) => {
					for (total, value) in izip!(distribution.iter_mut(), leaf.value.iter()) {
						*total += *value;
					}
					break;
				}
			}
		}
		if let Task::Classification { .. } = self.task {
			let sum = distribution.sum();
			if sum > 0.0 {
				distribution /= sum;
			}
		}
		distribution
	}

	fn features_to_array(&self, features: &DataFrameView) -> Result<Array2<f32>, PredictError> {
		if features.ncols() != self.feature_names.len() {
			return Err(PredictError::FeatureCountMismatch {
				expected: self.feature_names.len(),
				actual: features.ncols(),
			});
		}
		let mut array = Array2::zeros((features.nrows(), features.ncols()));
		for (mut array_column, column) in izip!(array.gencolumns_mut(), features.columns.iter()) {
			match column {
				ColumnView::Number(column) => {
					for (a, b) in izip!(array_column.iter_mut(), column.data.iter()) {
						*a = *b;
					}
				}
				_ => {
					return Err(PredictError::UnsupportedFeatureType {
						column_name: column.name().to_owned(),
						column_type: column.type_name().to_owned(),
					})
				}
			}
		}
		Ok(array)
	}
}
