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

use crate::common::linear::{linear_no_bias, LinearNoBias};
use crate::typing::decoder::check_input_width;
use crate::typing::{LabelCounts, OutputType};
use crate::TypingError;
use std::borrow::Borrow;
use tch::{nn, Tensor};

/// Keeps the leading `answer_num.get(output_type)` columns of a full-vocabulary output.
fn active_slice(
    full: &Tensor,
    answer_num: &LabelCounts,
    output_type: OutputType,
) -> Result<Tensor, TypingError> {
    Ok(match output_type {
        OutputType::Open => full.shallow_clone(),
        OutputType::Wiki | OutputType::Kb => full.f_narrow(1, 0, answer_num.get(output_type))?,
    })
}

/// # Output of the mask decoder
pub struct MaskDecoderOutput {
    /// Mask restricted to the requested output type, shape (batch size, answer count of the output type)
    pub active: Tensor,
    /// Mask over the full open vocabulary, shape (batch size, open answer count), for chaining
    pub full: Tensor,
}

/// # First stage of the two-stage decoder
/// Produces a mask in [0, 1] over the open vocabulary from the shared representation and a prior
/// output (typically the scores of another decoder). Prior outputs of sub-tasks are zero-padded to
/// the full vocabulary width.
pub struct MaskDecoder {
    linear: LinearNoBias,
    output_dim: i64,
    answer_num: LabelCounts,
}

impl MaskDecoder {
    /// Build a new `MaskDecoder`
    ///
    /// # Arguments
    ///
    /// * `p` - Variable store path for the root of the decoder
    /// * `output_dim` - width of the input representation
    /// * `answer_num` - answer count of each output type, the mask spans the open vocabulary
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entity_typing::typing::{LabelCounts, MaskDecoder};
    /// use tch::{nn, Device};
    ///
    /// let vs = nn::VarStore::new(Device::Cpu);
    /// let decoder = MaskDecoder::new(vs.root() / "mask", 1024, &LabelCounts::default());
    /// ```
    pub fn new<'p, P>(p: P, output_dim: i64, answer_num: &LabelCounts) -> MaskDecoder
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let linear = linear_no_bias(
            p / "linear",
            output_dim + answer_num.open,
            answer_num.open,
            Default::default(),
        );
        log::debug!("built mask decoder {output_dim} + {0} -> {0}", answer_num.open);
        MaskDecoder {
            linear,
            output_dim,
            answer_num: *answer_num,
        }
    }

    /// Forward pass through the decoder
    ///
    /// # Arguments
    ///
    /// * `inputs` - representation of shape (batch size, output_dim)
    /// * `outputs` - prior output of shape (batch size, width). The width must be the open answer
    ///   count for `OutputType::Open`, and at most the open answer count otherwise.
    /// * `output_type` - label space of the returned active mask
    ///
    /// # Returns
    ///
    /// * `MaskDecoderOutput` with the active and full masks
    pub fn forward(
        &self,
        inputs: &Tensor,
        outputs: &Tensor,
        output_type: OutputType,
    ) -> Result<MaskDecoderOutput, TypingError> {
        check_input_width(inputs, self.output_dim, "inputs")?;
        let size = outputs.size();
        let answer_num = self.answer_num.open;
        if size.len() != 2 || size[0] != inputs.size()[0] {
            return Err(TypingError::ValueError(format!(
                "prior outputs must have shape (batch size, width), got {size:?}"
            )));
        }
        let width = size[1];

        let outputs = match output_type {
            OutputType::Open if width != answer_num => {
                return Err(TypingError::ValueError(format!(
                    "prior outputs for the open vocabulary must have {answer_num} columns, got {width}"
                )));
            }
            OutputType::Open => outputs.shallow_clone(),
            OutputType::Wiki | OutputType::Kb => {
                if width > answer_num {
                    return Err(TypingError::ValueError(format!(
                        "prior outputs cannot be wider than the open vocabulary ({answer_num}), got {width}"
                    )));
                }
                let pad = Tensor::f_zeros(
                    [size[0], answer_num - width],
                    (outputs.kind(), outputs.device()),
                )?;
                Tensor::f_cat(&[outputs, &pad], 1)?
            }
        };

        let full = self
            .linear
            .f_forward(&Tensor::f_cat(&[inputs, &outputs], 1)?)?
            .sigmoid();
        let active = active_slice(&full, &self.answer_num, output_type)?;
        Ok(MaskDecoderOutput { active, full })
    }
}

/// # Second stage of the two-stage decoder
/// Refines a full-vocabulary mask into label probabilities.
pub struct Mask2PredDecoder {
    linear: LinearNoBias,
    answer_num: LabelCounts,
}

impl Mask2PredDecoder {
    pub fn new<'p, P>(p: P, answer_num: &LabelCounts) -> Mask2PredDecoder
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let linear = linear_no_bias(
            p / "linear",
            answer_num.open,
            answer_num.open,
            Default::default(),
        );
        log::debug!("built mask to prediction decoder {0} -> {0}", answer_num.open);
        Mask2PredDecoder {
            linear,
            answer_num: *answer_num,
        }
    }

    /// Forward pass through the decoder
    ///
    /// # Arguments
    ///
    /// * `mask` - full mask of shape (batch size, open answer count)
    /// * `output_type` - label space of the returned predictions
    ///
    /// # Returns
    ///
    /// * `Tensor` of probabilities, shape (batch size, answer count of `output_type`)
    pub fn forward(&self, mask: &Tensor, output_type: OutputType) -> Result<Tensor, TypingError> {
        check_input_width(mask, self.answer_num.open, "mask")?;
        let pred = self.linear.f_forward(mask)?.sigmoid();
        active_slice(&pred, &self.answer_num, output_type)
    }
}
