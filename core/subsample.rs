use crate::{config::Config, train::load_config, train::load_dataframe};
use anyhow::{format_err, Result};
use canopy_dataframe::DataFrame;
use canopy_herding::KernelHerding;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;
use std::path::Path;

/// Load the csv at `file_path` and subsample it with kernel herding, as configured by the config file at `config_path`.
pub fn subsample_csv(
	file_path: &Path,
	target_column_name: Option<&str>,
	config_path: Option<&Path>,
) -> Result<DataFrame> {
	let config = load_config(config_path)?;
	let dataframe = load_dataframe(file_path, &config)?;
	subsample(&dataframe, target_column_name, &config)
}

/**
Select a representative subset of the rows of `dataframe` with kernel herding. The target column, if given, is carried along in the output but does not take part in the kernel. The seed record is drawn from a generator seeded with the config's herding seed, so the same config always selects the same rows.
*/
pub fn subsample(
	dataframe: &DataFrame,
	target_column_name: Option<&str>,
	config: &Config,
) -> Result<DataFrame> {
	let dataframe = dataframe.view();
	let mut herding = KernelHerding::new(config.kernel_options(), config.sample_percent())?;
	if let Some(target_column_name) = target_column_name {
		if dataframe.split_off_column(target_column_name).is_none() {
			return Err(format_err!(
				"did not find target column \"{}\" among column names \"{}\"",
				target_column_name,
				dataframe.column_names().join(", ")
			));
		}
		herding = herding.with_class_column(target_column_name);
	}
	let mut rng = Xoshiro256Plus::seed_from_u64(config.herding_seed());
	let subsample = herding.process(dataframe, &mut rng)?;
	Ok(subsample)
}
