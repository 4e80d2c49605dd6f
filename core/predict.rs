use crate::train::Model;
use anyhow::Result;
use canopy_dataframe::DataFrameView;
use ndarray::prelude::*;
use std::collections::BTreeMap;

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PredictOutput {
	/// The most probable class. Ties go to the class listed first.
	pub class_name: String,
	pub probability: f64,
	pub probabilities: BTreeMap<String, f64>,
}

/**
Predict the class of every row of `dataframe`. If the dataframe still contains the model's target column, it is ignored.
*/
pub fn predict(model: &Model, dataframe: DataFrameView) -> Result<Vec<PredictOutput>> {
	let features = match dataframe.split_off_column(&model.target_column_name) {
		Some((features, _)) => features,
		None => dataframe,
	};
	let distributions = model.tree.predict_batch(features)?;
	let outputs = distributions
		.genrows()
		.into_iter()
		.map(|distribution| predict_output(&model.classes, distribution))
		.collect();
	Ok(outputs)
}

fn predict_output(classes: &[String], distribution: ArrayView1<f64>) -> PredictOutput {
	let mut best: Option<(usize, f64)> = None;
	for (index, probability) in distribution.iter().enumerate() {
		match best {
			Some((_, best_probability)) if *probability <= best_probability => {}
			_ => best = Some((index, *probability)),
		}
	}
	let (best_index, probability) = best.unwrap_or((0, 0.0));
	let probabilities = classes
		.iter()
		.cloned()
		.zip(distribution.iter().cloned())
		.collect();
	PredictOutput {
		class_name: classes.get(best_index).cloned().unwrap_or_default(),
		probability,
		probabilities,
	}
}
