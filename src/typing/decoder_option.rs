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

use crate::typing::{
    Mask2PredDecoder, MultiMLPDecoder, MultiSimpleDecoder, OutputType, SimpleDecoder,
    TypingConfig,
};
use crate::TypingError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use tch::{nn, Tensor};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// # Identifies a decoder head reading a single tensor
pub enum DecoderType {
    /// Single-task linear decoder over the open vocabulary
    Simple,
    /// Linear decoder with weights shared across output types
    MultiSimple,
    /// Mask refinement decoder, reading a full-vocabulary mask
    Mask2Pred,
    /// Two-layer self-refining decoder
    MultiMLP,
}

/// # Abstraction that holds one particular decoder head
pub enum DecoderOption {
    /// Single-task linear decoder
    Simple(SimpleDecoder),
    /// Multi-task linear decoder
    MultiSimple(MultiSimpleDecoder),
    /// Mask refinement decoder
    Mask2Pred(Mask2PredDecoder),
    /// Two-layer decoder
    MultiMLP(MultiMLPDecoder),
}

impl DecoderOption {
    /// Instantiate a new decoder of the supplied type.
    ///
    /// # Arguments
    ///
    /// * `decoder_type` - `DecoderType` indicating the decoder head to build
    /// * `p` - `tch::nn::Path` for the root of the decoder
    /// * `config` - `TypingConfig` providing the representation width and answer counts
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entity_typing::typing::{DecoderOption, DecoderType, TypingConfig};
    /// use tch::{nn, Device};
    ///
    /// # fn main() -> Result<(), entity_typing::TypingError> {
    /// let vs = nn::VarStore::new(Device::Cpu);
    /// let decoder = DecoderOption::new(
    ///     DecoderType::MultiSimple,
    ///     vs.root() / "decoder",
    ///     &TypingConfig::default(),
    /// )?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<'p, P>(
        decoder_type: DecoderType,
        p: P,
        config: &TypingConfig,
    ) -> Result<Self, TypingError>
    where
        P: Borrow<nn::Path<'p>>,
    {
        config.validate()?;
        let answer_num = &config.answer_num;
        Ok(match decoder_type {
            DecoderType::Simple => {
                DecoderOption::Simple(SimpleDecoder::new(p, config.output_dim, answer_num.open))
            }
            DecoderType::MultiSimple => DecoderOption::MultiSimple(MultiSimpleDecoder::new(
                p,
                config.output_dim,
                answer_num,
            )),
            DecoderType::Mask2Pred => DecoderOption::Mask2Pred(Mask2PredDecoder::new(p, answer_num)),
            DecoderType::MultiMLP => {
                DecoderOption::MultiMLP(MultiMLPDecoder::new(p, config.output_dim, answer_num))
            }
        })
    }

    /// Returns the `DecoderType` for this DecoderOption
    pub fn decoder_type(&self) -> DecoderType {
        match *self {
            Self::Simple(_) => DecoderType::Simple,
            Self::MultiSimple(_) => DecoderType::MultiSimple,
            Self::Mask2Pred(_) => DecoderType::Mask2Pred,
            Self::MultiMLP(_) => DecoderType::MultiMLP,
        }
    }

    /// Forward pass through the wrapped decoder
    ///
    /// # Arguments
    ///
    /// * `inputs` - representation of shape (batch size, output_dim), or a full mask for `Mask2Pred`
    /// * `output_type` - label space to score
    ///
    /// # Returns
    ///
    /// * `Tensor` of shape (batch size, answer count of `output_type`)
    pub fn forward(&self, inputs: &Tensor, output_type: OutputType) -> Result<Tensor, TypingError> {
        match *self {
            Self::Simple(ref decoder) => decoder.forward(inputs, output_type),
            Self::MultiSimple(ref decoder) => decoder.forward(inputs, output_type),
            Self::Mask2Pred(ref decoder) => decoder.forward(inputs, output_type),
            Self::MultiMLP(ref decoder) => decoder.forward(inputs, output_type),
        }
    }

    /// Forward pass selecting the output type by name (`open`, `wiki` or `kb`). Any other name
    /// fails with `TypingError::InvalidOutputType` before the decoder is called.
    pub fn forward_with_name(
        &self,
        inputs: &Tensor,
        output_type: &str,
    ) -> Result<Tensor, TypingError> {
        let output_type: OutputType = output_type.parse()?;
        self.forward(inputs, output_type)
    }
}
