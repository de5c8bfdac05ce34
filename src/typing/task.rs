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
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// # Label sub-vocabulary targeted by a decoder call
/// `Wiki` and `Kb` label spaces are prefixes of the `Open` label space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputType {
    /// Full (largest) label vocabulary
    Open,
    /// Labels derived from Wikipedia
    Wiki,
    /// Knowledge-base labels
    Kb,
}

impl OutputType {
    pub const ALL: [OutputType; 3] = [OutputType::Open, OutputType::Wiki, OutputType::Kb];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Open => "open",
            OutputType::Wiki => "wiki",
            OutputType::Kb => "kb",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = TypingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OutputType::Open),
            "wiki" => Ok(OutputType::Wiki),
            "kb" => Ok(OutputType::Kb),
            _ => Err(TypingError::InvalidOutputType(s.to_string())),
        }
    }
}

impl TryFrom<&str> for OutputType {
    type Error = TypingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_known_output_types() {
        for output_type in OutputType::ALL {
            assert_eq!(output_type.as_str().parse::<OutputType>().unwrap(), output_type);
        }
    }

    #[test]
    fn rejects_unknown_output_type() {
        let err = "gen".parse::<OutputType>().unwrap_err();
        assert!(matches!(err, TypingError::InvalidOutputType(name) if name == "gen"));
        assert!(OutputType::try_from("Open").is_err());
    }

    #[test]
    fn serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&OutputType::Kb).unwrap(), "\"kb\"");
        let parsed: OutputType = serde_json::from_str("\"wiki\"").unwrap();
        assert_eq!(parsed, OutputType::Wiki);
    }
}
