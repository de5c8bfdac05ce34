//! # Decoder heads for fine-grained entity typing
//!
//! This crate provides the [tch](https://github.com/LaurentMazare/tch-rs) modules mapping a shared
//! sentence representation to multi-label predictions over a large, hierarchical label vocabulary,
//! together with the utilities used to evaluate them:
//! - decoder heads: simple, multi-task shared-weight, two-stage mask then prediction, two-layer
//! - encoders feeding the decoders: a character-level CNN and a self-attentive pooling
//! - evaluation helpers: thresholded prediction extraction, label string conversion and summary
//!   line formatting
//! - `sort_batch_by_length`, ordering a batch by decreasing sequence length with the indices needed
//!   to restore the original order
//!
//! Labels are organized in three output types (`open`, `wiki`, `kb`). The `wiki` and `kb`
//! vocabularies are prefixes of the `open` vocabulary, and multi-task decoders score them with the
//! leading rows of a single weight matrix.
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! use entity_typing::eval::get_output_index;
//! use entity_typing::typing::{DecoderOption, DecoderType, OutputType, TypingConfig};
//! use entity_typing::Config;
//! use tch::{nn, no_grad, Device, Kind, Tensor};
//!
//! let config = TypingConfig::from_file("path/to/config.json")?;
//! let mut vs = nn::VarStore::new(Device::cuda_if_available());
//! let decoder = DecoderOption::new(DecoderType::MultiSimple, vs.root() / "decoder", &config)?;
//! vs.load("path/to/model.ot")?;
//!
//! let representation = Tensor::rand([8, config.output_dim], (Kind::Float, vs.device()));
//! let scores = no_grad(|| decoder.forward(&representation, OutputType::Wiki))?;
//! let predictions = get_output_index(&scores.sigmoid(), config.threshold)?;
//! # Ok(())
//! # }
//! ```
//!
//! Training, data loading and the computation of precision / recall / F1 are left to the caller.

pub mod common;
pub mod eval;
pub mod typing;

pub use common::error::TypingError;
pub use common::{sort_batch_by_length, Config, SortedBatch};
