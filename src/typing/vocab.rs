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

use crate::typing::OutputType;
use crate::{Config, TypingError};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// # Number of answer labels for each output type
/// Fixed at model construction. `wiki` and `kb` must not exceed `open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    pub open: i64,
    pub wiki: i64,
    pub kb: i64,
}

impl LabelCounts {
    pub fn get(&self, output_type: OutputType) -> i64 {
        match output_type {
            OutputType::Open => self.open,
            OutputType::Wiki => self.wiki,
            OutputType::Kb => self.kb,
        }
    }

    pub fn validate(&self) -> Result<(), TypingError> {
        if self.open <= 0 {
            return Err(TypingError::InvalidConfigurationError(format!(
                "the open label count must be positive, got {}",
                self.open
            )));
        }
        for output_type in [OutputType::Wiki, OutputType::Kb] {
            let count = self.get(output_type);
            if count <= 0 || count > self.open {
                return Err(TypingError::InvalidConfigurationError(format!(
                    "the {output_type} label count must be in 1..={}, got {count}",
                    self.open
                )));
            }
        }
        Ok(())
    }
}

impl Default for LabelCounts {
    fn default() -> Self {
        LabelCounts {
            open: 10331,
            wiki: 4600,
            kb: 130,
        }
    }
}

#[derive(Deserialize)]
struct RawVocab {
    open: Vec<String>,
    wiki: Vec<String>,
    kb: Vec<String>,
}

/// # Index to label dictionaries for each output type
/// Loaded once and shared read-only. The `wiki` and `kb` dictionaries are prefixes of the `open`
/// dictionary, so that an index refers to the same label for every output type.
#[derive(Debug, Clone)]
pub struct TypingVocab {
    open: Vec<String>,
    wiki: Vec<String>,
    kb: Vec<String>,
    label_to_id: HashMap<String, i64>,
}

impl Config for TypingVocab {}

impl<'de> Deserialize<'de> for TypingVocab {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawVocab::deserialize(deserializer)?;
        TypingVocab::new(raw.open, raw.wiki, raw.kb).map_err(serde::de::Error::custom)
    }
}

impl TypingVocab {
    /// Creates a vocabulary from explicit label lists.
    ///
    /// # Arguments
    ///
    /// * `open` - labels of the full vocabulary, in index order
    /// * `wiki` - labels of the wiki vocabulary, must be a prefix of `open`
    /// * `kb` - labels of the knowledge-base vocabulary, must be a prefix of `open`
    pub fn new(
        open: Vec<String>,
        wiki: Vec<String>,
        kb: Vec<String>,
    ) -> Result<TypingVocab, TypingError> {
        for (output_type, labels) in [(OutputType::Wiki, &wiki), (OutputType::Kb, &kb)] {
            if labels.len() > open.len() || labels[..] != open[..labels.len()] {
                return Err(TypingError::InvalidConfigurationError(format!(
                    "the {output_type} vocabulary must be a prefix of the open vocabulary"
                )));
            }
        }

        let mut label_to_id = HashMap::with_capacity(open.len());
        for (id, label) in open.iter().enumerate() {
            if label_to_id.insert(label.clone(), id as i64).is_some() {
                return Err(TypingError::InvalidConfigurationError(format!(
                    "duplicate label in vocabulary: {label}"
                )));
            }
        }

        let vocab = TypingVocab {
            open,
            wiki,
            kb,
            label_to_id,
        };
        vocab.label_counts().validate()?;
        log::debug!("loaded typing vocabulary with counts {:?}", vocab.label_counts());
        Ok(vocab)
    }

    /// Creates a vocabulary from the full ordered label list, taking the first `wiki_num` and
    /// `kb_num` labels as the wiki and knowledge-base vocabularies.
    pub fn from_open_labels(
        open: Vec<String>,
        wiki_num: usize,
        kb_num: usize,
    ) -> Result<TypingVocab, TypingError> {
        if wiki_num > open.len() || kb_num > open.len() {
            return Err(TypingError::InvalidConfigurationError(format!(
                "cannot take {wiki_num} wiki and {kb_num} kb labels from {} open labels",
                open.len()
            )));
        }
        let wiki = open[..wiki_num].to_vec();
        let kb = open[..kb_num].to_vec();
        TypingVocab::new(open, wiki, kb)
    }

    pub fn labels(&self, output_type: OutputType) -> &[String] {
        match output_type {
            OutputType::Open => &self.open,
            OutputType::Wiki => &self.wiki,
            OutputType::Kb => &self.kb,
        }
    }

    pub fn label_counts(&self) -> LabelCounts {
        LabelCounts {
            open: self.open.len() as i64,
            wiki: self.wiki.len() as i64,
            kb: self.kb.len() as i64,
        }
    }

    /// Returns the label string for index `id` in the `output_type` vocabulary.
    pub fn id_to_label(&self, output_type: OutputType, id: i64) -> Result<&str, TypingError> {
        let labels = self.labels(output_type);
        usize::try_from(id)
            .ok()
            .and_then(|id| labels.get(id))
            .map(String::as_str)
            .ok_or_else(|| {
                TypingError::ValueError(format!(
                    "label id {id} out of range for the {output_type} vocabulary ({} labels)",
                    labels.len()
                ))
            })
    }

    /// Returns the index of `label` if it belongs to the `output_type` vocabulary.
    pub fn label_to_id(&self, output_type: OutputType, label: &str) -> Option<i64> {
        self.label_to_id
            .get(label)
            .copied()
            .filter(|id| *id < self.labels(output_type).len() as i64)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn sub_vocabularies_share_open_indices() {
        let vocab =
            TypingVocab::from_open_labels(labels(&["person", "location", "artist", "city"]), 3, 2)
                .unwrap();

        assert_eq!(
            vocab.label_counts(),
            LabelCounts {
                open: 4,
                wiki: 3,
                kb: 2
            }
        );
        assert_eq!(vocab.id_to_label(OutputType::Kb, 1).unwrap(), "location");
        assert_eq!(vocab.id_to_label(OutputType::Open, 3).unwrap(), "city");
        assert!(vocab.id_to_label(OutputType::Kb, 2).is_err());
        assert!(vocab.id_to_label(OutputType::Open, -1).is_err());
        assert_eq!(vocab.label_to_id(OutputType::Wiki, "artist"), Some(2));
        assert_eq!(vocab.label_to_id(OutputType::Kb, "artist"), None);
    }

    #[test]
    fn rejects_non_prefix_sub_vocabulary() {
        let result = TypingVocab::new(
            labels(&["person", "location"]),
            labels(&["location"]),
            labels(&["person"]),
        );
        assert!(matches!(
            result,
            Err(TypingError::InvalidConfigurationError(_))
        ));
    }

    #[test]
    fn rejects_empty_sub_vocabulary() {
        assert!(TypingVocab::from_open_labels(labels(&["person"]), 1, 0).is_err());
    }

    #[test]
    fn label_counts_validation() {
        assert!(LabelCounts::default().validate().is_ok());
        let counts = LabelCounts {
            open: 5,
            wiki: 6,
            kb: 1,
        };
        assert!(counts.validate().is_err());
    }
}
