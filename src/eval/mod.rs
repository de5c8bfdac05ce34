//! # Evaluation utilities
//!
//! Turns decoder scores into label predictions, maps label indices to strings and formats the
//! evaluation summary. Precision, recall and F1 are computed by a caller-supplied `EvalMetric`.
//!
//! ```no_run
//! # fn main() -> Result<(), entity_typing::TypingError> {
//! use entity_typing::eval::{get_eval_string, get_gold_pred_str, get_output_index};
//! # use entity_typing::eval::{EvalMetric, GoldPredPair, MetricSummary};
//! use entity_typing::typing::{OutputType, TypingVocab};
//! use entity_typing::Config;
//! use tch::Tensor;
//! # struct Metric;
//! # impl EvalMetric for Metric {
//! #     fn micro(&self, _: &[GoldPredPair]) -> MetricSummary { MetricSummary::default() }
//! #     fn macro_avg(&self, _: &[GoldPredPair]) -> MetricSummary { MetricSummary::default() }
//! # }
//! # let metric = Metric;
//!
//! let vocab = TypingVocab::from_file("path/to/vocab.json")?;
//! let scores = Tensor::from_slice(&[0.2f32, 0.9, 0.4, 0.6]).view([1, 4]);
//! let pred_idx = get_output_index(&scores, 0.5)?;
//! let pairs = get_gold_pred_str(&pred_idx, &[vec![0, 1, 0, 1]], OutputType::Open, &vocab)?;
//! println!("{}", get_eval_string(&pairs, &metric));
//! # Ok(())
//! # }
//! ```

mod output;
mod report;

pub use output::{
    get_gold_pred_str, get_mask_str, get_output_index, gold_from_tensor, output_index,
    GoldPredPair,
};
pub use report::{get_eval_string, strict_accuracy, EvalMetric, MetricSummary};
