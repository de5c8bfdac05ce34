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

use crate::typing::TypingConfig;
use crate::TypingError;
use std::borrow::Borrow;
use tch::{nn, Kind, Tensor};

/// # Character-level convolutional span encoder
/// Embeds character ids, applies a single 1-D convolution with ReLU and max-pools over the whole
/// character sequence.
pub struct CharCNN {
    char_embeddings: nn::Embedding,
    conv1d: nn::Conv1D,
    vocab_size: i64,
    kernel_width: i64,
}

impl CharCNN {
    /// Build a new `CharCNN`
    ///
    /// # Arguments
    ///
    /// * `p` - Variable store path for the root of the encoder
    /// * `config` - `TypingConfig` providing the character vocabulary size, embedding width,
    ///   number of filters and kernel width
    pub fn new<'p, P>(p: P, config: &TypingConfig) -> CharCNN
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let char_embeddings = nn::embedding(
            p / "char_W",
            config.char_vocab_size,
            config.char_embedding_dim,
            Default::default(),
        );
        let conv1d = nn::conv1d(
            p / "conv1d",
            config.char_embedding_dim,
            config.char_filters,
            config.char_kernel_width,
            Default::default(),
        );
        log::debug!(
            "built character CNN {} x {} -> {} (kernel width {})",
            config.char_vocab_size,
            config.char_embedding_dim,
            config.char_filters,
            config.char_kernel_width
        );
        CharCNN {
            char_embeddings,
            conv1d,
            vocab_size: config.char_vocab_size,
            kernel_width: config.char_kernel_width,
        }
    }

    /// Forward pass through the encoder
    ///
    /// # Arguments
    ///
    /// * `span_chars` - character ids of shape (batch size, max characters), at least as many
    ///   characters as the kernel width
    ///
    /// # Returns
    ///
    /// * `Tensor` of shape (batch size, number of filters)
    pub fn forward(&self, span_chars: &Tensor) -> Result<Tensor, TypingError> {
        let size = span_chars.size();
        if size.len() != 2 || size[0] == 0 || size[1] < self.kernel_width {
            return Err(TypingError::ValueError(format!(
                "character ids must have shape (batch size > 0, max characters >= {}), got {size:?}",
                self.kernel_width
            )));
        }
        if span_chars.kind() != Kind::Int64 {
            return Err(TypingError::ValueError(format!(
                "character ids must be Int64, got {:?}",
                span_chars.kind()
            )));
        }
        let (min_id, max_id) = (
            span_chars.min().int64_value(&[]),
            span_chars.max().int64_value(&[]),
        );
        if min_id < 0 || max_id >= self.vocab_size {
            return Err(TypingError::ValueError(format!(
                "character ids must be in 0..{}, got values in {min_id}..={max_id}",
                self.vocab_size
            )));
        }
        // (batch size, embedding dim, max characters)
        let char_embed = span_chars.apply(&self.char_embeddings).f_transpose(1, 2)?;
        let conv_output = char_embed.apply(&self.conv1d).relu();
        let temporal_extent = conv_output.size()[2];
        Ok(conv_output
            .f_max_pool1d([temporal_extent], [temporal_extent], [0], [1], false)?
            .f_squeeze_dim(2)?)
    }
}
