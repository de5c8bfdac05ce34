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

use crate::typing::{OutputType, TypingVocab};
use crate::TypingError;
use tch::{Device, Kind, Tensor};

/// Pair of gold and predicted label strings for one example.
pub type GoldPredPair = (Vec<String>, Vec<String>);

/// Selects the predicted label indices of a single score vector: the arg max first (the first
/// maximal index on ties), followed in increasing order by every other index scoring strictly
/// above `threshold`. A NaN score propagates like in numpy: the first NaN is the arg max.
pub fn output_index(scores: &[f64], threshold: f64) -> Result<Vec<i64>, TypingError> {
    let arg_max = match scores.iter().position(|score| score.is_nan()) {
        Some(index) => Some(index),
        None => scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (index, &score)| match best {
                Some((_, best_score)) if score <= best_score => best,
                _ => Some((index, score)),
            })
            .map(|(index, _)| index),
    }
    .ok_or_else(|| TypingError::ValueError("cannot select labels from empty scores".into()))?;

    let mut pred_id = vec![arg_max as i64];
    pred_id.extend(
        scores
            .iter()
            .enumerate()
            .filter(|&(index, &score)| score > threshold && index != arg_max)
            .map(|(index, _)| index as i64),
    );
    Ok(pred_id)
}

/// Generates the predicted label indices of every example of a batch of decoder outputs.
///
/// # Arguments
///
/// * `outputs` - scores of shape (batch size, answer count)
/// * `threshold` - probability above which labels are added to the arg max
///
/// # Returns
///
/// * `Vec<Vec<i64>>` with the predicted indices of each example, arg max first
///
/// # Example
///
/// ```no_run
/// use entity_typing::eval::get_output_index;
/// use tch::Tensor;
///
/// # fn main() -> Result<(), entity_typing::TypingError> {
/// let outputs = Tensor::from_slice(&[0.2f32, 0.9, 0.4, 0.6]).view([1, 4]);
/// assert_eq!(get_output_index(&outputs, 0.5)?, vec![vec![1, 3]]);
/// # Ok(())
/// # }
/// ```
pub fn get_output_index(outputs: &Tensor, threshold: f64) -> Result<Vec<Vec<i64>>, TypingError> {
    let size = outputs.size();
    if size.len() != 2 {
        return Err(TypingError::ValueError(format!(
            "decoder outputs must have shape (batch size, answer count), got {size:?}"
        )));
    }
    let outputs = outputs
        .detach()
        .f_to_device(Device::Cpu)?
        .f_to_kind(Kind::Double)?;

    (0..size[0])
        .map(|row| {
            let single_dist = Vec::<f64>::try_from(&outputs.f_get(row)?)?;
            output_index(&single_dist, threshold)
        })
        .collect()
}

/// Converts a (batch size, answer count) tensor of 0/1 flags into per-example flag vectors.
pub fn gold_from_tensor(gold: &Tensor) -> Result<Vec<Vec<i64>>, TypingError> {
    let size = gold.size();
    if size.len() != 2 {
        return Err(TypingError::ValueError(format!(
            "gold labels must have shape (batch size, answer count), got {size:?}"
        )));
    }
    let gold = gold.f_to_device(Device::Cpu)?.f_to_kind(Kind::Int64)?;
    (0..size[0])
        .map(|row| Ok(Vec::<i64>::try_from(&gold.f_get(row)?)?))
        .collect()
}

fn indices_to_labels(
    indices: &[i64],
    output_type: OutputType,
    vocab: &TypingVocab,
) -> Result<Vec<String>, TypingError> {
    indices
        .iter()
        .map(|&id| vocab.id_to_label(output_type, id).map(str::to_string))
        .collect()
}

/// Pairs the gold and predicted label strings of each example.
///
/// # Arguments
///
/// * `pred_idx` - predicted indices of each example, as returned by `get_output_index`
/// * `gold` - gold flag vectors of each example, 1 marking a true label
/// * `output_type` - vocabulary the indices refer to
/// * `vocab` - label dictionaries
///
/// # Returns
///
/// * `Vec<(Vec<String>, Vec<String>)>` of (gold, predicted) label strings, one per example
pub fn get_gold_pred_str(
    pred_idx: &[Vec<i64>],
    gold: &[Vec<i64>],
    output_type: OutputType,
    vocab: &TypingVocab,
) -> Result<Vec<GoldPredPair>, TypingError> {
    if pred_idx.len() != gold.len() {
        return Err(TypingError::ValueError(format!(
            "got {} predictions for {} gold examples",
            pred_idx.len(),
            gold.len()
        )));
    }
    gold.iter()
        .zip(pred_idx.iter())
        .map(|(gold_i, pred_i)| {
            let gold_indices = gold_i
                .iter()
                .enumerate()
                .filter(|&(_, &flag)| flag == 1)
                .map(|(index, _)| index as i64)
                .collect::<Vec<i64>>();
            Ok((
                indices_to_labels(&gold_indices, output_type, vocab)?,
                indices_to_labels(pred_i, output_type, vocab)?,
            ))
        })
        .collect()
}

/// Converts the mask indices of each example to label strings.
pub fn get_mask_str(
    mask_idx: &[Vec<i64>],
    output_type: OutputType,
    vocab: &TypingVocab,
) -> Result<Vec<Vec<String>>, TypingError> {
    mask_idx
        .iter()
        .map(|indices| indices_to_labels(indices, output_type, vocab))
        .collect()
}
