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
use crate::typing::TypingConfig;
use crate::TypingError;
use std::borrow::Borrow;
use tch::{nn, Tensor};

/// # Output of the self-attentive pooling
pub struct SelfAttentiveSumOutput {
    /// Attention-weighted sum of the sequence, shape (batch size, embedding dim)
    pub weighted_values: Tensor,
    /// Normalized attention weights, shape (batch size, sequence length, 1)
    pub attention_weights: Tensor,
}

/// # Self-attentive pooling
/// Scores every position with a small feed-forward network, normalizes the scores with a softmax
/// over the sequence and returns the weighted sum of the sequence.
pub struct SelfAttentiveSum {
    key_maker: LinearNoBias,
    key_output: LinearNoBias,
    hidden_dim: i64,
}

impl SelfAttentiveSum {
    /// Build a new `SelfAttentiveSum`
    ///
    /// # Arguments
    ///
    /// * `p` - Variable store path for the root of the module
    /// * `output_dim` - embedding dimension of the pooled sequence
    /// * `hidden_dim` - width of the scoring network. With a width of 1 the rectified hidden unit
    ///   is used directly as the score.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entity_typing::typing::SelfAttentiveSum;
    /// use tch::{nn, Device};
    ///
    /// let vs = nn::VarStore::new(Device::Cpu);
    /// let attentive_sum = SelfAttentiveSum::new(vs.root() / "attentive_sum", 300, 100);
    /// ```
    pub fn new<'p, P>(p: P, output_dim: i64, hidden_dim: i64) -> SelfAttentiveSum
    where
        P: Borrow<nn::Path<'p>>,
    {
        let p = p.borrow();
        let key_maker = linear_no_bias(p / "key_maker", output_dim, hidden_dim, Default::default());
        let key_output = linear_no_bias(p / "key_output", hidden_dim, 1, Default::default());
        log::debug!("built self-attentive sum {output_dim} -> {hidden_dim} -> 1");
        SelfAttentiveSum {
            key_maker,
            key_output,
            hidden_dim,
        }
    }

    /// Build a new `SelfAttentiveSum` with the scoring network width of a `TypingConfig`
    /// (`attention_hidden_dim`).
    pub fn from_config<'p, P>(p: P, output_dim: i64, config: &TypingConfig) -> SelfAttentiveSum
    where
        P: Borrow<nn::Path<'p>>,
    {
        SelfAttentiveSum::new(p, output_dim, config.attention_hidden_dim)
    }

    pub fn hidden_dim(&self) -> i64 {
        self.hidden_dim
    }

    /// Forward pass through the pooling
    ///
    /// # Arguments
    ///
    /// * `input_embed` - sequence of shape (batch size, sequence length, output_dim)
    ///
    /// # Returns
    ///
    /// * `SelfAttentiveSumOutput` with the pooled vectors and the attention weights
    pub fn forward(&self, input_embed: &Tensor) -> Result<SelfAttentiveSumOutput, TypingError> {
        let size = input_embed.size();
        if size.len() != 3 || size[1] == 0 || size[2] != self.key_maker.in_dim() {
            return Err(TypingError::ValueError(format!(
                "input embeddings must have shape (batch size, sequence length > 0, {}), got {size:?}",
                self.key_maker.in_dim()
            )));
        }
        let batch_size = size[0];

        let input_embed_squeezed = input_embed.f_view([-1, size[2]])?;
        let k_d = self.key_maker.f_forward(&input_embed_squeezed)?.relu();
        let k = if self.hidden_dim == 1 {
            k_d.f_view([batch_size, -1])?
        } else {
            self.key_output.f_forward(&k_d)?.f_view([batch_size, -1])?
        };
        let attention_weights = k
            .f_softmax(1, k.kind())?
            .f_view([batch_size, -1, 1])?;
        let weighted_values = (&attention_weights * input_embed).f_sum_dim_intlist(
            [1].as_slice(),
            false,
            input_embed.kind(),
        )?;

        Ok(SelfAttentiveSumOutput {
            weighted_values,
            attention_weights,
        })
    }
}
