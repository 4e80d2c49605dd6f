/*!
This crate ties the other canopy crates together. It loads a csv, reads an optional json [`Config`](config/struct.Config.html), and then either trains a transform tree with [`train`](fn.train.html) and uses it with [`predict`](fn.predict.html), or subsamples the data with kernel herding using [`subsample`](fn.subsample.html).
*/

#![allow(clippy::tabs_in_doc_comments)]

pub mod config;
pub mod predict;
pub mod subsample;
pub mod train;

#[cfg(test)]
mod test;

pub use self::{
	config::Config,
	predict::{predict, PredictOutput},
	subsample::{subsample, subsample_csv},
	train::{train, train_dataframe, Model},
};
