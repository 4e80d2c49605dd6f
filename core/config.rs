/*!
This module defines the `Config` struct, which is used to configure [`train`](../train/fn.train.html) and [`subsample`](../subsample/fn.subsample.html). Every field is optional.

```json
{
	"column_types": { "label": { "type": "enum", "options": ["a", "b"] } },
	"tree": { "min_split_size": 2.0, "split_transform": { "type": "identity" }, "seed": 1 },
	"herding": { "kernel_function": { "type": "polynomial", "exponent": 1.0 }, "sample_percent": 100.0, "seed": 1 }
}
```
*/

use anyhow::{Context, Result};
use canopy_herding::{KernelOptions, PolynomialKernel, RbfKernel};
use canopy_transform::{
	IdentityTransform, NormalizedTransform, RandomProjectionTransform, TransformOptions,
};
use canopy_tree::TrainOptions;
use std::{collections::BTreeMap, path::Path};

#[derive(Debug, Default, serde::Deserialize)]
pub struct Config {
	pub column_types: Option<BTreeMap<String, ColumnType>>,
	pub tree: Option<TreeConfig>,
	pub herding: Option<HerdingConfig>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
pub enum ColumnType {
	#[serde(rename = "unknown")]
	Unknown,
	#[serde(rename = "number")]
	Number,
	#[serde(rename = "enum")]
	Enum { options: Vec<String> },
	#[serde(rename = "text")]
	Text,
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct TreeConfig {
	pub min_split_size: Option<f64>,
	pub split_transform: Option<TransformConfig>,
	pub seed: Option<u64>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
pub enum TransformConfig {
	#[serde(rename = "identity")]
	Identity,
	#[serde(rename = "normalized")]
	Normalized,
	#[serde(rename = "random_projection")]
	RandomProjection { n_components: Option<usize> },
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct HerdingConfig {
	pub kernel_function: Option<KernelConfig>,
	pub sample_percent: Option<f64>,
	pub seed: Option<u64>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type")]
pub enum KernelConfig {
	#[serde(rename = "polynomial")]
	Polynomial {
		exponent: Option<f64>,
		use_lower_order: Option<bool>,
	},
	#[serde(rename = "rbf")]
	Rbf { gamma: Option<f64> },
}

const DEFAULT_SAMPLE_PERCENT: f64 = 100.0;
const DEFAULT_HERDING_SEED: u64 = 1;

impl Config {
	pub fn from_path(path: &Path) -> Result<Self> {
		let config = std::fs::read_to_string(path)
			.with_context(|| format!("failed to read config file {}", path.display()))?;
		let config = serde_json::from_str(&config)
			.with_context(|| format!("failed to parse config file {}", path.display()))?;
		Ok(config)
	}

	pub fn column_types(&self) -> Option<BTreeMap<String, canopy_dataframe::ColumnType>> {
		self.column_types.as_ref().map(|column_types| {
			column_types
				.iter()
				.map(|(column_name, column_type)| {
					let column_type = match column_type {
						ColumnType::Unknown => canopy_dataframe::ColumnType::Unknown,
						ColumnType::Number => canopy_dataframe::ColumnType::Number,
						ColumnType::Enum { options } => canopy_dataframe::ColumnType::Enum {
							options: options.clone(),
						},
						ColumnType::Text => canopy_dataframe::ColumnType::Text,
					};
					(column_name.clone(), column_type)
				})
				.collect()
		})
	}

	pub fn train_options(&self) -> TrainOptions {
		let defaults = TrainOptions::default();
		let tree = self.tree.as_ref();
		TrainOptions {
			min_split_size: tree
				.and_then(|tree| tree.min_split_size)
				.unwrap_or(defaults.min_split_size),
			seed: tree.and_then(|tree| tree.seed).unwrap_or(defaults.seed),
		}
	}

	pub fn transform_options(&self) -> TransformOptions {
		match self
			.tree
			.as_ref()
			.and_then(|tree| tree.split_transform.as_ref())
		{
			None | Some(TransformConfig::Identity) => TransformOptions::Identity(IdentityTransform),
			Some(TransformConfig::Normalized) => TransformOptions::Normalized(NormalizedTransform),
			Some(TransformConfig::RandomProjection { n_components }) => {
				let defaults = RandomProjectionTransform::default();
				TransformOptions::RandomProjection(RandomProjectionTransform {
					n_components: n_components.unwrap_or(defaults.n_components),
				})
			}
		}
	}

	pub fn kernel_options(&self) -> KernelOptions {
		match self
			.herding
			.as_ref()
			.and_then(|herding| herding.kernel_function.as_ref())
		{
			None => KernelOptions::default(),
			Some(KernelConfig::Polynomial {
				exponent,
				use_lower_order,
			}) => {
				let defaults = PolynomialKernel::default();
				KernelOptions::Polynomial(PolynomialKernel {
					exponent: exponent.unwrap_or(defaults.exponent),
					use_lower_order: use_lower_order.unwrap_or(defaults.use_lower_order),
				})
			}
			Some(KernelConfig::Rbf { gamma }) => KernelOptions::Rbf(RbfKernel {
				gamma: gamma.unwrap_or_else(|| RbfKernel::default().gamma),
			}),
		}
	}

	pub fn sample_percent(&self) -> f64 {
		self.herding
			.as_ref()
			.and_then(|herding| herding.sample_percent)
			.unwrap_or(DEFAULT_SAMPLE_PERCENT)
	}

	pub fn herding_seed(&self) -> u64 {
		self.herding
			.as_ref()
			.and_then(|herding| herding.seed)
			.unwrap_or(DEFAULT_HERDING_SEED)
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_defaults() {
		let config: Config = serde_json::from_str("{}").unwrap();
		let train_options = config.train_options();
		assert_eq!(train_options.min_split_size, 2.0);
		assert_eq!(train_options.seed, 1);
		assert_eq!(config.transform_options(), TransformOptions::default());
		assert_eq!(config.kernel_options(), KernelOptions::default());
		assert_eq!(config.sample_percent(), 100.0);
		assert_eq!(config.herding_seed(), 1);
		assert!(config.column_types().is_none());
	}

	#[test]
	fn test_parse() {
		let config: Config = serde_json::from_str(
			r#"{
				"column_types": { "label": { "type": "enum", "options": ["a", "b"] } },
				"tree": {
					"min_split_size": 4.5,
					"split_transform": { "type": "random_projection", "n_components": 3 },
					"seed": 9
				},
				"herding": {
					"kernel_function": { "type": "rbf" },
					"sample_percent": 25.0,
					"seed": 3
				}
			}"#,
		)
		.unwrap();
		let train_options = config.train_options();
		assert_eq!(train_options.min_split_size, 4.5);
		assert_eq!(train_options.seed, 9);
		assert_eq!(
			config.transform_options(),
			TransformOptions::RandomProjection(RandomProjectionTransform { n_components: 3 })
		);
		assert_eq!(
			config.kernel_options(),
			KernelOptions::Rbf(RbfKernel { gamma: 0.01 })
		);
		assert_eq!(config.sample_percent(), 25.0);
		assert_eq!(config.herding_seed(), 3);
		insta::assert_debug_snapshot!(config.column_types(), @r###"
 Some(
     {
         "label": Enum {
             options: [
                 "a",
                 "b",
             ],
         },
     },
 )
 "###);
	}

	#[test]
	fn test_polynomial_options() {
		let config: Config = serde_json::from_str(
			r#"{ "herding": { "kernel_function": { "type": "polynomial", "exponent": 2.0, "use_lower_order": true } } }"#,
		)
		.unwrap();
		assert_eq!(
			config.kernel_options(),
			KernelOptions::Polynomial(PolynomialKernel {
				exponent: 2.0,
				use_lower_order: true,
			})
		);
		assert!(serde_json::from_str::<Config>(r#"{ "tree": { "split_transform": { "type": "pca" } } }"#).is_err());
	}
}
