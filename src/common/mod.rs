//! # Common building blocks
//!
//! Error type, configuration loading, bias-free linear layer and batch utilities shared by the
//! typing modules.

mod batch;
pub mod config;
pub mod error;
pub(crate) mod linear;

pub use batch::{sort_batch_by_length, SortedBatch};
pub use config::Config;
