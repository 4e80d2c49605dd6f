use crate::{predict, subsample, train, train_dataframe, Config, Model};
use anyhow::Result;
use approx::assert_abs_diff_eq;
use canopy_dataframe::{DataFrame, DataFrameView, FromCsvOptions};
use canopy_metrics::{Accuracy, StreamingMetric};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CSV: &str = "x,label
1,yes
2,no
3,yes
4,yes
5,yes
6,yes
7,no
8,no
9,yes
";

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, contents).unwrap();
	path
}

fn load(path: &Path) -> DataFrame {
	DataFrame::from_path(path, FromCsvOptions::default()).unwrap()
}

/// Compute the accuracy of `model` on `dataframe`, which must contain the model's target column.
fn test_model(model: &Model, dataframe: DataFrameView) -> Result<Option<f64>> {
	let labels = dataframe
		.split_off_column(&model.target_column_name)
		.and_then(|(_, labels)| labels.as_enum())
		.ok_or_else(|| anyhow::format_err!("the target column must be an enum column"))?;
	let outputs = predict(model, dataframe.view())?;
	let mut accuracy = Accuracy::new();
	for (output, label) in outputs.iter().zip(labels.indexes()) {
		let label = match label {
			Some(label) => label,
			None => continue,
		};
		let prediction = model
			.classes
			.iter()
			.position(|class| *class == output.class_name)
			.ok_or_else(|| anyhow::format_err!("unknown class \"{}\"", output.class_name))?;
		accuracy.update((prediction, label));
	}
	Ok(accuracy.finalize())
}

#[test]
fn test_train_and_predict_csv() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let model = train(&data_path, "label", None).unwrap();
	assert_eq!(model.classes, vec!["no".to_owned(), "yes".to_owned()]);
	assert_eq!(model.tree.n_nodes(), 9);
	insta::assert_snapshot!(model.tree.to_string(), @r###"
 x < 6.5
 |   x < 1.5: 0 1
 |   x >= 1.5
 |   |   x < 2.5: 1 0
 |   |   x >= 2.5: 0 4
 x >= 6.5
 |   x < 8.5: 2 0
 |   x >= 8.5: 0 1
 "###);
	let dataframe = load(&data_path);
	assert_eq!(test_model(&model, dataframe.view()).unwrap(), Some(1.0));
	let outputs = predict(&model, dataframe.view()).unwrap();
	assert_eq!(outputs[1].class_name, "no");
	assert_abs_diff_eq!(outputs[1].probability, 1.0);
	assert_abs_diff_eq!(outputs[1].probabilities["yes"], 0.0);
}

#[test]
fn test_predict_without_target_column() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let model = train(&data_path, "label", None).unwrap();
	let features_path = write_file(dir.path(), "features.csv", "x\n2.2\n7.5\n100\n");
	let features = load(&features_path);
	let class_names: Vec<String> = predict(&model, features.view())
		.unwrap()
		.into_iter()
		.map(|output| output.class_name)
		.collect();
	assert_eq!(class_names, vec!["no", "no", "yes"]);
}

#[test]
fn test_train_with_config() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let config_path = write_file(
		dir.path(),
		"config.json",
		r#"{ "tree": { "min_split_size": 9.0, "split_transform": { "type": "normalized" } } }"#,
	);
	let model = train(&data_path, "label", Some(config_path.as_path())).unwrap();
	assert_eq!(model.tree.n_nodes(), 1);
	assert_eq!(model.tree.to_string(), ": 3 6");
	let outputs = predict(&model, load(&data_path).view()).unwrap();
	for output in outputs {
		assert_eq!(output.class_name, "yes");
		assert_abs_diff_eq!(output.probability, 6.0 / 9.0, epsilon = 1e-12);
	}
}

#[test]
fn test_config_column_types() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", "x,label\n1,0\n2,0\n8,1\n9,1\n");
	// The configured option order decides the order of the classes.
	let config_path = write_file(
		dir.path(),
		"config.json",
		r#"{ "column_types": { "x": { "type": "number" }, "label": { "type": "enum", "options": ["1", "0"] } } }"#,
	);
	let model = train(&data_path, "label", Some(config_path.as_path())).unwrap();
	assert_eq!(model.classes, vec!["1".to_owned(), "0".to_owned()]);
	assert_eq!(model.tree.to_string(), "x < 5: 0 2\nx >= 5: 2 0");
}

#[test]
fn test_errors() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let dataframe = load(&data_path);
	let error = train_dataframe(&dataframe, "missing", &Config::default()).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @r###"did not find target column "missing" among column names "x, label""###);
	let error = train(&data_path, "label", Some(dir.path().join("missing.json").as_path())).unwrap_err();
	assert!(error.to_string().starts_with("failed to read config file"));
	let config_path = write_file(dir.path(), "config.json", "{ \"tree\": 3 }");
	let error = train(&data_path, "label", Some(config_path.as_path())).unwrap_err();
	assert!(error.to_string().starts_with("failed to parse config file"));
	// A number target leaves an enum feature behind, and neither can be learned.
	let error = train_dataframe(&dataframe, "x", &Config::default()).unwrap_err();
	assert!(error.to_string().contains("columns are supported"));
}

#[test]
fn test_subsample() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let dataframe = load(&data_path);
	let config: Config = serde_json::from_str(
		r#"{ "herding": { "kernel_function": { "type": "rbf", "gamma": 1.0 }, "sample_percent": 30.0, "seed": 7 } }"#,
	)
	.unwrap();
	let first = subsample(&dataframe, Some("label"), &config).unwrap();
	assert_eq!(first.nrows(), 3);
	assert_eq!(first.view().column_names(), vec!["x", "label"]);
	let second = subsample(&dataframe, Some("label"), &config).unwrap();
	assert_eq!(first, second);
	// Every selected row is a row of the input.
	let xs = first.columns[0].as_number().unwrap().data.clone();
	for x in xs {
		assert!((1..=9).any(|value| value as f32 == x));
	}
}

#[test]
fn test_subsample_defaults_and_errors() {
	let dir = TempDir::new().unwrap();
	let data_path = write_file(dir.path(), "data.csv", CSV);
	let dataframe = load(&data_path);
	let all = subsample(&dataframe, Some("label"), &Config::default()).unwrap();
	assert_eq!(all.nrows(), 10);
	let error = subsample(&dataframe, Some("missing"), &Config::default()).unwrap_err();
	assert!(error.to_string().starts_with("did not find target column"));
	// Without a class column the label takes part in the kernel as an option index.
	let all = subsample(&dataframe, None, &Config::default()).unwrap();
	assert_eq!(all.nrows(), 10);
	let text_path = write_file(dir.path(), "text.csv", "x,name
1,a
2,b
");
	let text = DataFrame::from_path(
		&text_path,
		FromCsvOptions {
			column_types: Some(
				vec![("name".to_owned(), canopy_dataframe::ColumnType::Text)]
					.into_iter()
					.collect(),
			),
			..Default::default()
		},
	)
	.unwrap();
	let error = subsample(&text, None, &Config::default()).unwrap_err();
	insta::assert_snapshot!(error.to_string(), @"column name has type text, but only number and enum columns are supported");
	let config: Config =
		serde_json::from_str(r#"{ "herding": { "sample_percent": 0.0 } }"#).unwrap();
	assert!(subsample(&dataframe, Some("label"), &config).is_err());
}
