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

use tch::TchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypingError {
    #[error("Decoder error: output type not one of the valid ({0})")]
    InvalidOutputType(String),

    #[error("Decoder error: output type not supported by this decoder ({0})")]
    UnsupportedOutputType(String),

    #[error("Value error: {0}")]
    ValueError(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfigurationError(String),

    #[error("IO error: {0}")]
    IOError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Tch tensor error: {0}")]
    TchError(String),
}

impl From<std::io::Error> for TypingError {
    fn from(error: std::io::Error) -> Self {
        TypingError::IOError(error.to_string())
    }
}

impl From<serde_json::Error> for TypingError {
    fn from(error: serde_json::Error) -> Self {
        TypingError::SerializationError(error.to_string())
    }
}

impl From<TchError> for TypingError {
    fn from(error: TchError) -> Self {
        TypingError::TchError(error.to_string())
    }
}
