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

use crate::typing::LabelCounts;
use crate::{Config, TypingError};
use serde::{Deserialize, Serialize};

fn default_char_vocab_size() -> i64 {
    115
}

fn default_char_embedding_dim() -> i64 {
    100
}

fn default_char_filters() -> i64 {
    50
}

fn default_char_kernel_width() -> i64 {
    5
}

fn default_attention_hidden_dim() -> i64 {
    100
}

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// # Entity typing model configuration
/// Defines the dimensions of the decoders, the character CNN and the attentive pooling, as well as
/// the answer count of each output type.
pub struct TypingConfig {
    /// Width of the shared representation fed to the decoders
    pub output_dim: i64,
    pub answer_num: LabelCounts,
    #[serde(default = "default_char_vocab_size")]
    pub char_vocab_size: i64,
    #[serde(default = "default_char_embedding_dim")]
    pub char_embedding_dim: i64,
    #[serde(default = "default_char_filters")]
    pub char_filters: i64,
    #[serde(default = "default_char_kernel_width")]
    pub char_kernel_width: i64,
    #[serde(default = "default_attention_hidden_dim")]
    pub attention_hidden_dim: i64,
    /// Probability above which a label is predicted in addition to the arg max
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl Config for TypingConfig {}

impl Default for TypingConfig {
    fn default() -> Self {
        TypingConfig {
            output_dim: 100,
            answer_num: LabelCounts::default(),
            char_vocab_size: default_char_vocab_size(),
            char_embedding_dim: default_char_embedding_dim(),
            char_filters: default_char_filters(),
            char_kernel_width: default_char_kernel_width(),
            attention_hidden_dim: default_attention_hidden_dim(),
            threshold: default_threshold(),
        }
    }
}

impl TypingConfig {
    pub fn validate(&self) -> Result<(), TypingError> {
        self.answer_num.validate()?;
        let dimensions = [
            ("output_dim", self.output_dim),
            ("char_vocab_size", self.char_vocab_size),
            ("char_embedding_dim", self.char_embedding_dim),
            ("char_filters", self.char_filters),
            ("char_kernel_width", self.char_kernel_width),
            ("attention_hidden_dim", self.attention_hidden_dim),
        ];
        if let Some((name, value)) = dimensions.iter().find(|(_, value)| *value <= 0) {
            return Err(TypingError::InvalidConfigurationError(format!(
                "{name} must be positive, got {value}"
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(TypingError::InvalidConfigurationError(format!(
                "threshold must be a probability, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
