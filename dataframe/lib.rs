/*!
This crate holds the columnar batch that the tree learner and the herding selector consume. A [`DataFrame`](struct.DataFrame.html) owns one [`Column`](enum.Column.html) per attribute and a [`DataFrameView`](struct.DataFrameView.html) borrows them. Each row is a record, and the class attribute, when there is one, is an ordinary column that callers split off by name.
*/

#![allow(clippy::tabs_in_doc_comments)]

use itertools::izip;
use ndarray::prelude::*;
use std::num::NonZeroUsize;

mod load;

pub use self::load::{FromCsvOptions, InferOptions, DEFAULT_INVALID_VALUES};

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
	pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataFrameView<'a> {
	pub columns: Vec<ColumnView<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
	/// A column whose values were all missing, so only its length is known.
	Unknown(UnknownColumn),
	Number(NumberColumn),
	Enum(EnumColumn),
	Text(TextColumn),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumn {
	pub name: String,
	pub len: usize,
}

/// Missing values are stored as `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumn {
	pub name: String,
	pub data: Vec<f32>,
}

/// Each value is the 1-based index of an option, or `None` if the value is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumn {
	pub name: String,
	pub options: Vec<String>,
	pub data: Vec<Option<NonZeroUsize>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumn {
	pub name: String,
	pub data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnView<'a> {
	Unknown(UnknownColumnView<'a>),
	Number(NumberColumnView<'a>),
	Enum(EnumColumnView<'a>),
	Text(TextColumnView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnknownColumnView<'a> {
	pub name: &'a str,
	pub len: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberColumnView<'a> {
	pub name: &'a str,
	pub data: &'a [f32],
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumColumnView<'a> {
	pub name: &'a str,
	pub options: &'a [String],
	pub data: &'a [Option<NonZeroUsize>],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColumnView<'a> {
	pub name: &'a str,
	pub data: &'a [String],
}

/// The type of a column, used to create an empty column before its values are read.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
	Unknown,
	Number,
	Enum { options: Vec<String> },
	Text,
}

impl DataFrame {
	/// Create a dataframe with no rows.
	pub fn new(column_names: Vec<String>, column_types: Vec<ColumnType>) -> Self {
		let columns = izip!(column_names, column_types)
			.map(|(name, column_type)| Column::empty(name, column_type))
			.collect();
		Self { columns }
	}

	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(Column::len).unwrap_or(0)
	}

	pub fn view(&self) -> DataFrameView {
		DataFrameView {
			columns: self.columns.iter().map(Column::view).collect(),
		}
	}
}

impl Column {
	pub fn empty(name: String, column_type: ColumnType) -> Self {
		match column_type {
			ColumnType::Unknown => Column::Unknown(UnknownColumn { name, len: 0 }),
			ColumnType::Number => Column::Number(NumberColumn { name, data: vec![] }),
			ColumnType::Enum { options } => Column::Enum(EnumColumn {
				name,
				options,
				data: vec![],
			}),
			ColumnType::Text => Column::Text(TextColumn { name, data: vec![] }),
		}
	}

	pub fn len(&self) -> usize {
		self.view().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn name(&self) -> &str {
		match self {
			Column::Unknown(column) => &column.name,
			Column::Number(column) => &column.name,
			Column::Enum(column) => &column.name,
			Column::Text(column) => &column.name,
		}
	}

	pub fn as_number(&self) -> Option<&NumberColumn> {
		if let Column::Number(column) = self {
			Some(column)
		} else {
			None
		}
	}

	pub fn as_enum(&self) -> Option<&EnumColumn> {
		if let Column::Enum(column) = self {
			Some(column)
		} else {
			None
		}
	}

	pub fn view(&self) -> ColumnView {
		match self {
			Column::Unknown(column) => ColumnView::Unknown(UnknownColumnView {
				name: &column.name,
				len: column.len,
			}),
			Column::Number(column) => ColumnView::Number(NumberColumnView {
				name: &column.name,
				data: &column.data,
			}),
			Column::Enum(column) => ColumnView::Enum(EnumColumnView {
				name: &column.name,
				options: &column.options,
				data: &column.data,
			}),
			Column::Text(column) => ColumnView::Text(TextColumnView {
				name: &column.name,
				data: &column.data,
			}),
		}
	}
}

impl<'a> DataFrameView<'a> {
	pub fn ncols(&self) -> usize {
		self.columns.len()
	}

	pub fn nrows(&self) -> usize {
		self.columns.first().map(ColumnView::len).unwrap_or(0)
	}

	pub fn view(&self) -> Self {
		self.clone()
	}

	pub fn column_names(&self) -> Vec<String> {
		self.columns
			.iter()
			.map(|column| column.name().to_owned())
			.collect()
	}

	/// Split off the column named `column_name`, returning the remaining columns and the removed column.
	pub fn split_off_column(&self, column_name: &str) -> Option<(Self, ColumnView<'a>)> {
		let index = self
			.columns
			.iter()
			.position(|column| column.name() == column_name)?;
		let mut columns = self.columns.clone();
		let column = columns.remove(index);
		Some((Self { columns }, column))
	}

	/// Convert the number and enum columns to a dense row-major matrix. Enum values become their 0-based option index and missing values become `NaN`. Returns `None` if any column is neither a number nor an enum column.
	pub fn to_rows_f32(&self) -> Option<Array2<f32>> {
		let mut rows = Array::zeros((self.nrows(), self.ncols()));
		for (mut row_column, column) in izip!(rows.gencolumns_mut(), self.columns.iter()) {
			match column {
				ColumnView::Number(column) => {
					for (a, b) in izip!(row_column.iter_mut(), column.data) {
						*a = *b;
					}
				}
				ColumnView::Enum(column) => {
					for (a, b) in izip!(row_column.iter_mut(), column.indexes()) {
						*a = b.map(|b| b as f32).unwrap_or(std::f32::NAN);
					}
				}
				_ => return None,
			}
		}
		Some(rows)
	}

	/// Copy the rows at `indexes`, in order, into a new dataframe. An index may appear more than once.
	pub fn take_rows(&self, indexes: &[usize]) -> DataFrame {
		DataFrame {
			columns: self
				.columns
				.iter()
				.map(|column| column.take_rows(indexes))
				.collect(),
		}
	}

	pub fn to_dataframe(&self) -> DataFrame {
		DataFrame {
			columns: self.columns.iter().map(ColumnView::to_column).collect(),
		}
	}
}

impl<'a> ColumnView<'a> {
	pub fn len(&self) -> usize {
		match self {
			ColumnView::Unknown(column) => column.len,
			ColumnView::Number(column) => column.data.len(),
			ColumnView::Enum(column) => column.data.len(),
			ColumnView::Text(column) => column.data.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn name(&self) -> &'a str {
		match self {
			ColumnView::Unknown(column) => column.name,
			ColumnView::Number(column) => column.name,
			ColumnView::Enum(column) => column.name,
			ColumnView::Text(column) => column.name,
		}
	}

	/// The name of this column's type, for error messages.
	pub fn type_name(&self) -> &'static str {
		match self {
			ColumnView::Unknown(_) => "unknown",
			ColumnView::Number(_) => "number",
			ColumnView::Enum(_) => "enum",
			ColumnView::Text(_) => "text",
		}
	}

	pub fn as_number(&self) -> Option<NumberColumnView<'a>> {
		if let ColumnView::Number(column) = self {
			Some(column.clone())
		} else {
			None
		}
	}

	pub fn as_enum(&self) -> Option<EnumColumnView<'a>> {
		if let ColumnView::Enum(column) = self {
			Some(column.clone())
		} else {
			None
		}
	}

	pub fn take_rows(&self, indexes: &[usize]) -> Column {
		let name = self.name().to_owned();
		match self {
			ColumnView::Unknown(_) => Column::Unknown(UnknownColumn {
				name,
				len: indexes.len(),
			}),
			ColumnView::Number(column) => Column::Number(NumberColumn {
				name,
				data: take(column.data, indexes),
			}),
			ColumnView::Enum(column) => Column::Enum(EnumColumn {
				name,
				options: column.options.to_vec(),
				data: take(column.data, indexes),
			}),
			ColumnView::Text(column) => Column::Text(TextColumn {
				name,
				data: take(column.data, indexes),
			}),
		}
	}

	pub fn to_column(&self) -> Column {
		let name = self.name().to_owned();
		match self {
			ColumnView::Unknown(column) => Column::Unknown(UnknownColumn {
				name,
				len: column.len,
			}),
			ColumnView::Number(column) => Column::Number(NumberColumn {
				name,
				data: column.data.to_vec(),
			}),
			ColumnView::Enum(column) => Column::Enum(EnumColumn {
				name,
				options: column.options.to_vec(),
				data: column.data.to_vec(),
			}),
			ColumnView::Text(column) => Column::Text(TextColumn {
				name,
				data: column.data.to_vec(),
			}),
		}
	}
}

fn take<T: Clone>(data: &[T], indexes: &[usize]) -> Vec<T> {
	indexes.iter().map(|index| data[*index].clone()).collect()
}

impl<'a> EnumColumnView<'a> {
	/// The 0-based option index of each value, or `None` where the value is missing.
	pub fn indexes(&self) -> impl Iterator<Item = Option<usize>> + 'a {
		self.data.iter().map(|value| value.map(|value| value.get() - 1))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn dataframe() -> DataFrame {
		DataFrame {
			columns: vec![
				Column::Number(NumberColumn {
					name: "x".to_owned(),
					data: vec![1.0, 2.0, std::f32::NAN],
				}),
				Column::Enum(EnumColumn {
					name: "label".to_owned(),
					options: vec!["a".to_owned(), "b".to_owned()],
					data: vec![NonZeroUsize::new(2), None, NonZeroUsize::new(1)],
				}),
			],
		}
	}

	#[test]
	fn test_new() {
		let dataframe = DataFrame::new(
			vec!["x".to_owned(), "empty".to_owned()],
			vec![ColumnType::Number, ColumnType::Unknown],
		);
		assert_eq!(dataframe.ncols(), 2);
		assert_eq!(dataframe.nrows(), 0);
		assert_eq!(dataframe.view().columns[1].type_name(), "unknown");
	}

	#[test]
	fn test_take_rows() {
		let dataframe = dataframe();
		let taken = dataframe.view().take_rows(&[2, 0, 0]);
		assert_eq!(taken.nrows(), 3);
		let x = taken.columns[0].as_number().unwrap();
		assert!(x.data[0].is_nan());
		assert_eq!(&x.data[1..], &[1.0, 1.0]);
		let label = taken.columns[1].as_enum().unwrap();
		assert_eq!(
			label.data,
			vec![NonZeroUsize::new(1), NonZeroUsize::new(2), NonZeroUsize::new(2)]
		);
	}

	#[test]
	fn test_to_rows_f32() {
		let dataframe = dataframe();
		let rows = dataframe.view().to_rows_f32().unwrap();
		assert_eq!(rows.dim(), (3, 2));
		assert_eq!(rows[[0, 0]], 1.0);
		assert_eq!(rows[[0, 1]], 1.0);
		assert!(rows[[1, 1]].is_nan());
		assert_eq!(rows[[2, 1]], 0.0);
	}

	#[test]
	fn test_split_off_column() {
		let dataframe = dataframe();
		let view = dataframe.view();
		let (features, labels) = view.split_off_column("label").unwrap();
		assert_eq!(features.column_names(), vec!["x".to_owned()]);
		let indexes: Vec<Option<usize>> = labels.as_enum().unwrap().indexes().collect();
		assert_eq!(indexes, vec![Some(1), None, Some(0)]);
		assert!(view.split_off_column("missing").is_none());
	}
}
