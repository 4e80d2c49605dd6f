use crate::config::Config;
use anyhow::{format_err, Result};
use canopy_dataframe::{ColumnView, DataFrame, DataFrameView, FromCsvOptions};
use canopy_transform::TransformModel;
use canopy_tree::Tree;
use std::path::Path;
use tracing::info;

/// A trained tree together with what is needed to turn its outputs back into class names.
#[derive(Debug, Clone)]
pub struct Model {
	pub target_column_name: String,
	/// The class names, in the order of the tree's output distribution.
	pub classes: Vec<String>,
	pub tree: Tree<TransformModel>,
}

/**
Train a model on the csv at `file_path` to predict the column named `target_column_name`. If `config_path` is given, the config file there selects the column types, the split transform and the tree options.
*/
pub fn train(
	file_path: &Path,
	target_column_name: &str,
	config_path: Option<&Path>,
) -> Result<Model> {
	let config = load_config(config_path)?;
	let dataframe = load_dataframe(file_path, &config)?;
	train_dataframe(&dataframe, target_column_name, &config)
}

/// Train a model on a dataframe that is already in memory.
pub fn train_dataframe(
	dataframe: &DataFrame,
	target_column_name: &str,
	config: &Config,
) -> Result<Model> {
	let dataframe = dataframe.view();
	let (features, labels) = split_target_column(&dataframe, target_column_name)?;
	let classes = labels
		.as_enum()
		.map(|labels| labels.options.to_vec())
		.unwrap_or_default();
	let tree = canopy_tree::train(
		features,
		labels,
		&config.transform_options(),
		&config.train_options(),
	)?;
	info!(
		target_column_name,
		n_classes = classes.len(),
		"trained model"
	);
	Ok(Model {
		target_column_name: target_column_name.to_owned(),
		classes,
		tree,
	})
}

pub(crate) fn load_config(config_path: Option<&Path>) -> Result<Config> {
	match config_path {
		Some(config_path) => Config::from_path(config_path),
		None => Ok(Config::default()),
	}
}

pub(crate) fn load_dataframe(file_path: &Path, config: &Config) -> Result<DataFrame> {
	let options = FromCsvOptions {
		column_types: config.column_types(),
		..Default::default()
	};
	DataFrame::from_path(file_path, options)
}

pub(crate) fn split_target_column<'a>(
	dataframe: &DataFrameView<'a>,
	target_column_name: &str,
) -> Result<(DataFrameView<'a>, ColumnView<'a>)> {
	dataframe
		.split_off_column(target_column_name)
		.ok_or_else(|| {
			format_err!(
				"did not find target column \"{}\" among column names \"{}\"",
				target_column_name,
				dataframe.column_names().join(", ")
			)
		})
}
