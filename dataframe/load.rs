use super::*;
use anyhow::{Context, Result};
use std::{
	collections::{BTreeMap, BTreeSet},
	io::{Read, Seek},
	path::Path,
};
use tracing::debug;

/// These are the options passed to [`DataFrame::from_csv`](struct.DataFrame.html#method.from_csv).
///
/// A column whose only values are `0` and `1` is inferred to be an enum column with the options `0` and `1`, because that is how binary class attributes are written. A tree cannot split on an enum feature, so to use such a column as a number feature, set its type to [`ColumnType::Number`] in `column_types`.
#[derive(Clone, Debug)]
pub struct FromCsvOptions<'a> {
	/// Columns named here get the given type. The types of all other columns are inferred.
	pub column_types: Option<BTreeMap<String, ColumnType>>,
	pub infer_options: InferOptions,
	/// Values that are treated as missing.
	pub invalid_values: &'a [&'a str],
}

impl<'a> Default for FromCsvOptions<'a> {
	fn default() -> Self {
		Self {
			column_types: None,
			infer_options: InferOptions::default(),
			invalid_values: DEFAULT_INVALID_VALUES,
		}
	}
}

/// Options for inferring column types. See [`FromCsvOptions`] for how `0`/`1` columns are treated.
#[derive(Clone, Debug)]
pub struct InferOptions {
	/// A column whose values are not all numbers is inferred to be an enum column if it has at most this many distinct values, and a text column otherwise.
	pub enum_max_unique_values: usize,
}

impl Default for InferOptions {
	fn default() -> Self {
		Self {
			enum_max_unique_values: 100,
		}
	}
}

pub const DEFAULT_INVALID_VALUES: &[&str] = &[
	"", "?", "null", "NULL", "n/a", "N/A", "nan", "NaN", "-nan", "-NaN",
];

impl DataFrame {
	pub fn from_path(path: &Path, options: FromCsvOptions) -> Result<Self> {
		let mut reader = csv::Reader::from_path(path)
			.with_context(|| format!("failed to open csv at {}", path.display()))?;
		Self::from_csv(&mut reader, options)
			.with_context(|| format!("failed to load csv at {}", path.display()))
	}

	/**
	Read a csv with a header row. If the type of any column has to be inferred, the reader is read once to infer the types and then rewound to read the values.
	*/
	pub fn from_csv<R>(reader: &mut csv::Reader<R>, options: FromCsvOptions) -> Result<Self>
	where
		R: Read + Seek,
	{
		let column_names: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();
		let column_types = column_types(reader, &column_names, &options)?;
		let mut dataframe = DataFrame::new(column_names, column_types);
		let mut record = csv::StringRecord::new();
		while reader.read_record(&mut record)? {
			for (column, value) in izip!(dataframe.columns.iter_mut(), record.iter()) {
				column.push(value, options.invalid_values);
			}
		}
		debug!(
			n_rows = dataframe.nrows(),
			n_columns = dataframe.ncols(),
			"loaded csv"
		);
		Ok(dataframe)
	}
}

impl Column {
	/// Parse `value` and append it. Values that cannot be parsed are stored as missing.
	fn push(&mut self, value: &str, invalid_values: &[&str]) {
		let is_invalid = invalid_values.contains(&value);
		match self {
			Column::Unknown(column) => column.len += 1,
			Column::Number(column) => {
				let value = if is_invalid { None } else { parse_number(value) };
				column.data.push(value.unwrap_or(std::f32::NAN));
			}
			Column::Enum(column) => {
				let index = column
					.options
					.iter()
					.position(|option| option == value)
					.and_then(|index| NonZeroUsize::new(index + 1));
				column.data.push(index);
			}
			Column::Text(column) => column.data.push(value.to_owned()),
		}
	}
}

fn parse_number(value: &str) -> Option<f32> {
	lexical::parse::<f32, _>(value)
		.ok()
		.filter(|value| value.is_finite())
}

/// Use the configured type of each column, inferring the rest from a first pass over the csv.
fn column_types<R>(
	reader: &mut csv::Reader<R>,
	column_names: &[String],
	options: &FromCsvOptions,
) -> Result<Vec<ColumnType>>
where
	R: Read + Seek,
{
	let configured: Vec<Option<ColumnType>> = column_names
		.iter()
		.map(|column_name| {
			options
				.column_types
				.as_ref()
				.and_then(|column_types| column_types.get(column_name))
				.cloned()
		})
		.collect();
	if configured.iter().all(Option::is_some) {
		return Ok(configured.into_iter().flatten().collect());
	}
	let mut inferrers: Vec<Option<ColumnTypeInferrer>> = configured
		.iter()
		.map(|column_type| match column_type {
			Some(_) => None,
			None => Some(ColumnTypeInferrer::new(&options.infer_options)),
		})
		.collect();
	let start = reader.position().clone();
	let mut record = csv::StringRecord::new();
	while reader.read_record(&mut record)? {
		for (inferrer, value) in izip!(inferrers.iter_mut(), record.iter()) {
			if let Some(inferrer) = inferrer {
				inferrer.update(value, options.invalid_values);
			}
		}
	}
	reader.seek(start)?;
	let column_types = izip!(configured, inferrers)
		.map(|(column_type, inferrer)| match (column_type, inferrer) {
			(Some(column_type), _) => column_type,
			(None, Some(inferrer)) => inferrer.finalize(),
			(None, None) => ColumnType::Unknown,
		})
		.collect();
	Ok(column_types)
}

/// Accumulates what is needed to decide the type of a column from its values.
struct ColumnTypeInferrer<'a> {
	options: &'a InferOptions,
	n_valid_values: usize,
	all_numbers: bool,
	/// This is `None` once there are more distinct values than an enum column may have.
	unique_values: Option<BTreeSet<String>>,
}

impl<'a> ColumnTypeInferrer<'a> {
	fn new(options: &'a InferOptions) -> Self {
		Self {
			options,
			n_valid_values: 0,
			all_numbers: true,
			unique_values: Some(BTreeSet::new()),
		}
	}

	fn update(&mut self, value: &str, invalid_values: &[&str]) {
		if invalid_values.contains(&value) {
			return;
		}
		self.n_valid_values += 1;
		if self.all_numbers && parse_number(value).is_none() {
			self.all_numbers = false;
		}
		if let Some(unique_values) = self.unique_values.as_mut() {
			if !unique_values.contains(value) {
				unique_values.insert(value.to_owned());
			}
			if unique_values.len() > self.options.enum_max_unique_values {
				self.unique_values = None;
			}
		}
	}

	fn finalize(self) -> ColumnType {
		if self.n_valid_values == 0 {
			return ColumnType::Unknown;
		}
		match (self.all_numbers, self.unique_values) {
			// Binary class attributes are written as 0 and 1.
			(true, Some(unique_values)) if is_binary(&unique_values) => ColumnType::Enum {
				options: unique_values.into_iter().collect(),
			},
			(true, _) => ColumnType::Number,
			(false, Some(unique_values)) => ColumnType::Enum {
				options: unique_values.into_iter().collect(),
			},
			(false, None) => ColumnType::Text,
		}
	}
}

fn is_binary(unique_values: &BTreeSet<String>) -> bool {
	unique_values.len() == 2 && unique_values.contains("0") && unique_values.contains("1")
}
