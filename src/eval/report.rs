// Copyright 2026 The entity-typing Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::eval::GoldPredPair;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// # Aggregate precision / recall / F1 over an evaluation batch
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricSummary {
    /// Number of evaluated examples
    pub count: usize,
    /// Number of examples with at least one predicted label
    pub pred_count: usize,
    /// Average number of predicted labels per example
    pub avg_pred_count: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// # Micro and macro averaged metrics over (gold, prediction) label pairs
/// Implemented by the caller; this crate only formats the results.
pub trait EvalMetric {
    fn micro(&self, true_prediction: &[GoldPredPair]) -> MetricSummary;

    fn macro_avg(&self, true_prediction: &[GoldPredPair]) -> MetricSummary;
}

/// Fraction of examples whose predicted label set equals the gold label set. Label order and
/// repeated labels are ignored. An empty batch has an accuracy of 0.
pub fn strict_accuracy(true_prediction: &[GoldPredPair]) -> f64 {
    if true_prediction.is_empty() {
        log::warn!("computing strict accuracy over an empty evaluation batch");
        return 0.0;
    }
    let matches = true_prediction
        .iter()
        .filter(|(gold, pred)| {
            gold.iter().collect::<HashSet<_>>() == pred.iter().collect::<HashSet<_>>()
        })
        .count();
    matches as f64 / true_prediction.len() as f64
}

/// Formats the evaluation summary line of a batch of (gold, prediction) pairs.
///
/// # Arguments
///
/// * `true_prediction` - (gold, predicted) label strings of each example
/// * `metric` - `EvalMetric` computing the micro and macro averages
///
/// # Returns
///
/// * `String` of the form
///   `Eval: {count} {pred_count} {avg} P:{p} R:{r} F1:{f1} Ma_P:{p} Ma_R:{r} Ma_F1:{f1}\t Dev accuracy: {acc}%`
pub fn get_eval_string<M: EvalMetric + ?Sized>(
    true_prediction: &[GoldPredPair],
    metric: &M,
) -> String {
    let micro = metric.micro(true_prediction);
    let macro_avg = metric.macro_avg(true_prediction);
    let accuracy = strict_accuracy(true_prediction);
    format!(
        "Eval: {} {} {:.3} P:{:.3} R:{:.3} F1:{:.3} Ma_P:{:.3} Ma_R:{:.3} Ma_F1:{:.3}\t Dev accuracy: {:.1}%",
        micro.count,
        micro.pred_count,
        micro.avg_pred_count,
        micro.precision,
        micro.recall,
        micro.f1,
        macro_avg.precision,
        macro_avg.recall,
        macro_avg.f1,
        accuracy * 100.0
    )
}

#[cfg(test)]
mod test {
    use super::*;

    fn pair(gold: &[&str], pred: &[&str]) -> GoldPredPair {
        (
            gold.iter().map(|label| label.to_string()).collect(),
            pred.iter().map(|label| label.to_string()).collect(),
        )
    }

    #[test]
    fn accuracy_ignores_order_and_repetitions() {
        let pairs = vec![
            pair(&["person", "artist"], &["artist", "person", "artist"]),
            pair(&["location"], &["location", "city"]),
        ];
        assert_eq!(strict_accuracy(&pairs), 0.5);
    }

    #[test]
    fn empty_batch_has_zero_accuracy() {
        assert_eq!(strict_accuracy(&[]), 0.0);
    }
}
