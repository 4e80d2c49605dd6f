/*!
This crate implements kernel herding, a greedy procedure that selects an ordered subset of a dataset whose running kernel mean embedding approximates that of the whole dataset.

The first record is chosen at random. Each following round picks the record `i` maximizing `kxy[i] - sum[i] / (f + 1)`, where `kxy[i]` is the mean kernel value between record `i` and every record, `sum[i]` is the sum of the kernel values between record `i` and the records selected so far, and `f` is the round. The sums are updated with only the most recently selected record each round.

[`KernelHerding`](struct.KernelHerding.html) applies the selection to the first dataframe it processes and passes every later dataframe through unchanged.
*/

#![allow(clippy::tabs_in_doc_comments)]

use canopy_dataframe::{ColumnView, DataFrame, DataFrameView};
use ndarray::prelude::*;
use rand::Rng;
use tracing::{debug, instrument};

mod error;
mod kernel;

pub use self::error::{HerdingError, KernelError};
pub use self::kernel::{
	Kernel, KernelEvaluator, KernelOptions, KernelOptionsEvaluator, PolynomialEvaluator,
	PolynomialKernel, RbfEvaluator, RbfKernel,
};

#[derive(Debug)]
pub struct KernelHerding<K> {
	kernel: K,
	sample_percent: f64,
	class_column_name: Option<String>,
	first_batch_done: bool,
}

impl<K> KernelHerding<K>
where
	K: Kernel,
{
	/// Create a selector that keeps `floor(n * sample_percent / 100) + 1` records of an `n` record dataset. `sample_percent` must be greater than 0 and at most 100.
	pub fn new(kernel: K, sample_percent: f64) -> Result<Self, HerdingError> {
		if !(sample_percent > 0.0 && sample_percent <= 100.0) {
			return Err(HerdingError::InvalidSamplePercent(sample_percent));
		}
		Ok(Self {
			kernel,
			sample_percent,
			class_column_name: None,
			first_batch_done: false,
		})
	}

	/// Exclude the column named `class_column_name` from the kernel. It is still copied to the output.
	pub fn with_class_column(mut self, class_column_name: impl Into<String>) -> Self {
		self.class_column_name = Some(class_column_name.into());
		self
	}

	pub fn is_first_batch_done(&self) -> bool {
		self.first_batch_done
	}

	/**
	Subsample `data` the first time this is called. Every later call returns its input unchanged.

	Every column except the class column is used by the kernel. Number columns are used as they are, and enum columns contribute their 0-based option index.
	*/
	#[instrument(skip(self, data, rng))]
	pub fn process(
		&mut self,
		data: DataFrameView,
		rng: &mut impl Rng,
	) -> Result<DataFrame, HerdingError> {
		if self.first_batch_done {
			return Ok(data.to_dataframe());
		}
		let features = self.kernel_features(&data)?;
		let selected = self.select(features.view(), rng)?;
		self.first_batch_done = true;
		Ok(data.take_rows(&selected))
	}

	/**
	Select the indexes of the records to keep, in the order they were selected. The first index is the seed, drawn uniformly from `0..n - 1` with `rng`, or 0 if there is a single record. If no record has a positive objective in some round, that round selects the seed again.
	*/
	pub fn select(
		&self,
		features: ArrayView2<f32>,
		rng: &mut impl Rng,
	) -> Result<Vec<usize>, HerdingError> {
		let n = features.nrows();
		if n == 0 {
			return Err(HerdingError::EmptyDataset);
		}
		let seed_index = if n > 1 { rng.gen_range(0, n - 1) } else { 0 };
		let n_selected = (n as f64 * (self.sample_percent / 100.0)).floor() as usize + 1;
		debug!(n, seed_index, n_selected, "selecting records");
		let kernel = self.kernel.build(features)?;
		// The mean kernel value of each record against the whole dataset.
		let mut kxy = vec![0.0; n];
		for (i, value) in kxy.iter_mut().enumerate() {
			let mut sum = 0.0;
			for j in 0..n {
				sum += kernel.eval(i, j)?;
			}
			*value = sum / n as f64;
		}
		let mut selected = Vec::with_capacity(n_selected);
		selected.push(seed_index);
		let mut sums = vec![0.0; n];
		for f in 1..n_selected {
			let previous = selected[f - 1];
			for (i, sum) in sums.iter_mut().enumerate() {
				*sum += kernel.eval(previous, i)?;
			}
			let mut max_objective = std::f64::MIN_POSITIVE;
			let mut max_index = seed_index;
			for (i, (kxy, sum)) in kxy.iter().zip(sums.iter()).enumerate() {
				let objective = kxy - sum / (f + 1) as f64;
				if objective > max_objective {
					max_objective = objective;
					max_index = i;
				}
			}
			if max_objective == std::f64::MIN_POSITIVE {
				debug!(round = f, "no positive objective, selecting the seed");
			}
			selected.push(max_index);
		}
		Ok(selected)
	}

	fn kernel_features(&self, data: &DataFrameView) -> Result<Array2<f32>, HerdingError> {
		let columns: Vec<&ColumnView> = data
			.columns
			.iter()
			.filter(|column| Some(column.name()) != self.class_column_name.as_deref())
			.collect();
		let mut features = Array2::zeros((data.nrows(), columns.len()));
		for (mut feature_column, column) in features.gencolumns_mut().into_iter().zip(columns) {
			match column {
				ColumnView::Number(column) => {
					for (feature, value) in feature_column.iter_mut().zip(column.data.iter()) {
						*feature = *value;
					}
				}
				ColumnView::Enum(column) => {
					for (feature, value) in feature_column.iter_mut().zip(column.indexes()) {
						*feature = value.map(|value| value as f32).unwrap_or(std::f32::NAN);
					}
				}
				_ => {
					return Err(HerdingError::UnsupportedColumnType {
						column_name: column.name().to_owned(),
						column_type: column.type_name().to_owned(),
					})
				}
			}
		}
		Ok(features)
	}
}
