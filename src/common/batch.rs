// Copyright 2018 The Allen Institute for Artificial Intelligence
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

use crate::TypingError;
use tch::{Kind, Tensor};

/// # Batch sorted by decreasing sequence length
pub struct SortedBatch {
    /// Input tensor with its batch dimension reordered by decreasing length
    pub sorted_tensor: Tensor,
    /// Sequence lengths sorted in decreasing order
    pub sorted_sequence_lengths: Tensor,
    /// Indices into `sorted_tensor` such that
    /// `sorted_tensor.index_select(0, &restoration_indices)` is the original tensor
    pub restoration_indices: Tensor,
    /// Permutation applied to the original batch (`sorted_tensor = tensor.index_select(0, &permutation_index)`)
    pub permutation_index: Tensor,
}

fn is_integral(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Uint8 | Kind::Int8 | Kind::Int16 | Kind::Int | Kind::Int64
    )
}

/// Sorts a batch-first tensor by the provided sequence lengths, longest first.
///
/// # Arguments
///
/// * `tensor` - batch-first tensor of shape (batch size, *)
/// * `sequence_lengths` - integer tensor of shape (batch size) holding the length of each example
///
/// # Returns
///
/// * `SortedBatch` holding the sorted tensor, the sorted lengths and the restoration indices
///
/// # Example
///
/// ```no_run
/// use entity_typing::common::sort_batch_by_length;
/// use tch::{Device, Kind, Tensor};
///
/// # fn main() -> Result<(), entity_typing::TypingError> {
/// let tensor = Tensor::rand([3, 4, 8], (Kind::Float, Device::Cpu));
/// let lengths = Tensor::from_slice(&[3i64, 1, 2]);
/// let sorted = sort_batch_by_length(&tensor, &lengths)?;
/// let restored = sorted.sorted_tensor.index_select(0, &sorted.restoration_indices);
/// assert!(restored.equal(&tensor));
/// # Ok(())
/// # }
/// ```
pub fn sort_batch_by_length(
    tensor: &Tensor,
    sequence_lengths: &Tensor,
) -> Result<SortedBatch, TypingError> {
    if tensor.dim() < 1 {
        return Err(TypingError::ValueError(
            "the tensor to sort must have a batch dimension".to_string(),
        ));
    }
    if sequence_lengths.dim() != 1 || !is_integral(sequence_lengths.kind()) {
        return Err(TypingError::ValueError(format!(
            "sequence lengths must be a 1-dimensional integer tensor, got {:?} of shape {:?}",
            sequence_lengths.kind(),
            sequence_lengths.size()
        )));
    }
    let batch_size = tensor.size()[0];
    if sequence_lengths.size()[0] != batch_size {
        return Err(TypingError::ValueError(format!(
            "got {} sequence lengths for a batch of size {batch_size}",
            sequence_lengths.size()[0]
        )));
    }

    // Stable sort so that equal lengths keep their original relative order
    let (sorted_sequence_lengths, permutation_index) =
        sequence_lengths.f_sort_stable(true, 0, true)?;
    let sorted_tensor = tensor.f_index_select(0, &permutation_index)?;

    let index_range = Tensor::f_arange(batch_size, (Kind::Int64, sequence_lengths.device()))?;
    let (_, reverse_mapping) = permutation_index.f_sort(0, false)?;
    let restoration_indices = index_range.f_index_select(0, &reverse_mapping)?;

    Ok(SortedBatch {
        sorted_tensor,
        sorted_sequence_lengths,
        restoration_indices,
        permutation_index,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use tch::Device;

    #[test]
    fn restoration_indices_invert_the_permutation() {
        let lengths = Tensor::from_slice(&[3i64, 1, 2]);
        let tensor = Tensor::from_slice(&[10f32, 11., 12.]);

        let sorted = sort_batch_by_length(&tensor, &lengths).unwrap();

        assert_eq!(
            Vec::<i64>::try_from(&sorted.sorted_sequence_lengths).unwrap(),
            vec![3, 2, 1]
        );
        assert_eq!(
            Vec::<i64>::try_from(&sorted.permutation_index).unwrap(),
            vec![0, 2, 1]
        );
        assert_eq!(
            Vec::<i64>::try_from(&sorted.restoration_indices).unwrap(),
            vec![0, 2, 1]
        );
        assert_eq!(
            Vec::<f32>::try_from(&sorted.sorted_tensor).unwrap(),
            vec![10., 12., 11.]
        );
    }

    #[test]
    fn rejects_float_lengths() {
        let tensor = Tensor::rand([2, 3], (Kind::Float, Device::Cpu));
        let lengths = Tensor::from_slice(&[1f32, 2.]);
        assert!(matches!(
            sort_batch_by_length(&tensor, &lengths),
            Err(TypingError::ValueError(_))
        ));
    }

    #[test]
    fn rejects_mismatched_batch_size() {
        let tensor = Tensor::rand([2, 3], (Kind::Float, Device::Cpu));
        let lengths = Tensor::from_slice(&[1i64, 2, 3]);
        assert!(matches!(
            sort_batch_by_length(&tensor, &lengths),
            Err(TypingError::ValueError(_))
        ));
    }
}
