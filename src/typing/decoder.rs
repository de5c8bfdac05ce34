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
use crate::typing::{LabelCounts, OutputType};
use crate::TypingError;
use std::borrow::Borrow;
use tch::{nn, Tensor};

/// Checks that `inputs` is a (batch size, `width`) matrix.
pub(crate) fn check_input_width(inputs: &Tensor, width: i64, name: &str) -> Result<(), TypingError> {
    let size = inputs.size();
    if size.len() != 2 || size[1] != width {
        return Err(TypingError::ValueError(format!(
            "{name} must have shape (batch size, {width}), got {size:?}"
        )));
    }
    Ok(())
}

/// # Single-task linear decoder
/// Projects the shared representation onto a fixed label space. The output type is ignored.
pub struct SimpleDecoder {
    linear: LinearNoBias,
    answer_num: i64,
}

impl SimpleDecoder {
    /// Build a new `SimpleDecoder`
    ///
    /// # Arguments
    ///
    /// * `p` - Variable store path for the root of the decoder
    /// * `output_dim` - width of the input representation
    /// * `answer_num` - number of labels scored
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entity_typing::typing::SimpleDecoder;
    /// use tch::{nn, Device};
    ///
    /// let vs = nn::VarStore::new(Device::Cpu);
    /// let decoder = SimpleDecoder::new(vs.root() / "decoder", 1024, 10331);
    /// ```
    pub fn new<'p, P>(p: P, output_dim: i64, answer_num: i64) -> SimpleDecoder
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let linear = linear_no_bias(p / "linear", output_dim, answer_num, Default::default());
        log::debug!("built simple decoder {output_dim} -> {answer_num}");
        SimpleDecoder { linear, answer_num }
    }

    pub fn answer_num(&self) -> i64 {
        self.answer_num
    }

    /// Forward pass through the decoder
    ///
    /// # Arguments
    ///
    /// * `inputs` - representation of shape (batch size, output_dim)
    /// * `_output_type` - unused, the label space is fixed at construction
    ///
    /// # Returns
    ///
    /// * `Tensor` of unnormalized scores, shape (batch size, answer_num)
    pub fn forward(&self, inputs: &Tensor, _output_type: OutputType) -> Result<Tensor, TypingError> {
        check_input_width(inputs, self.linear.in_dim(), "inputs")?;
        self.linear.f_forward(inputs)
    }
}

/// # Multi-task linear decoder with a shared weight matrix
/// The weight is sized for the open vocabulary. The wiki and kb label spaces use its leading rows.
pub struct MultiSimpleDecoder {
    linear: LinearNoBias,
    answer_num: LabelCounts,
}

impl MultiSimpleDecoder {
    pub fn new<'p, P>(p: P, output_dim: i64, answer_num: &LabelCounts) -> MultiSimpleDecoder
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let linear = linear_no_bias(p / "linear", output_dim, answer_num.open, Default::default());
        log::debug!("built multi-task simple decoder {output_dim} -> {answer_num:?}");
        MultiSimpleDecoder {
            linear,
            answer_num: *answer_num,
        }
    }

    pub fn answer_num(&self) -> &LabelCounts {
        &self.answer_num
    }

    /// Forward pass through the decoder
    ///
    /// # Arguments
    ///
    /// * `inputs` - representation of shape (batch size, output_dim)
    /// * `output_type` - label space to score
    ///
    /// # Returns
    ///
    /// * `Tensor` of unnormalized scores, shape (batch size, answer count of `output_type`)
    pub fn forward(&self, inputs: &Tensor, output_type: OutputType) -> Result<Tensor, TypingError> {
        check_input_width(inputs, self.linear.in_dim(), "inputs")?;
        match output_type {
            OutputType::Open => self.linear.f_forward(inputs),
            OutputType::Wiki | OutputType::Kb => self
                .linear
                .forward_prefix(inputs, self.answer_num.get(output_type)),
        }
    }
}

/// # Two-layer self-refining decoder over the open vocabulary
/// The second layer reads the representation together with the sigmoid output of the first.
///
/// Only the open output type is served: the wiki and kb branches of this head have never had a
/// working definition and return `TypingError::UnsupportedOutputType`.
pub struct MultiMLPDecoder {
    linear1: LinearNoBias,
    linear2: LinearNoBias,
}

impl MultiMLPDecoder {
    pub fn new<'p, P>(p: P, output_dim: i64, answer_num: &LabelCounts) -> MultiMLPDecoder
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let linear1 = linear_no_bias(p / "linear1", output_dim, answer_num.open, Default::default());
        let linear2 = linear_no_bias(
            p / "linear2",
            output_dim + answer_num.open,
            answer_num.open,
            Default::default(),
        );
        log::debug!("built multi-layer decoder {output_dim} -> {}", answer_num.open);
        MultiMLPDecoder { linear1, linear2 }
    }

    /// Forward pass through the decoder
    ///
    /// # Arguments
    ///
    /// * `inputs` - representation of shape (batch size, output_dim)
    /// * `output_type` - label space to score, only `OutputType::Open` is supported
    ///
    /// # Returns
    ///
    /// * `Tensor` of probabilities, shape (batch size, open answer count)
    pub fn forward(&self, inputs: &Tensor, output_type: OutputType) -> Result<Tensor, TypingError> {
        check_input_width(inputs, self.linear1.in_dim(), "inputs")?;
        match output_type {
            OutputType::Open => {
                let output1 = self.linear1.f_forward(inputs)?.sigmoid();
                let output2 = self
                    .linear2
                    .f_forward(&Tensor::f_cat(&[inputs, &output1], 1)?)?;
                Ok(output2.sigmoid())
            }
            OutputType::Wiki | OutputType::Kb => {
                Err(TypingError::UnsupportedOutputType(format!(
                    "the multi-layer decoder only scores the open vocabulary, got {output_type}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tch::{Device, Kind};

    #[test]
    fn input_width_is_checked() {
        let vs = nn::VarStore::new(Device::Cpu);
        let decoder = SimpleDecoder::new(vs.root(), 8, 3);
        let inputs = Tensor::rand([2, 7], (Kind::Float, Device::Cpu));
        assert!(matches!(
            decoder.forward(&inputs, OutputType::Open),
            Err(TypingError::ValueError(_))
        ));
    }
}
