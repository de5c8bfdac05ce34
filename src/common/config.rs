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
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// # Utility to deserialize JSON configuration files
pub trait Config
where
    for<'de> Self: Deserialize<'de>,
{
    /// Loads a `Config` object from a JSON file. The format is expected to be aligned with the
    /// [serde](https://serde.rs/) definition of the implementing type.
    ///
    /// # Arguments
    ///
    /// * `path` - `Path` to the configuration JSON file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use entity_typing::typing::TypingConfig;
    /// use entity_typing::Config;
    /// use std::path::Path;
    ///
    /// # fn main() -> Result<(), entity_typing::TypingError> {
    /// let config_path = Path::new("path/to/config.json");
    /// let config = TypingConfig::from_file(config_path)?;
    /// # Ok(())
    /// # }
    /// ```
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TypingError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            TypingError::IOError(format!("could not open {}: {e}", path.display()))
        })?;
        let br = BufReader::new(f);
        Ok(serde_json::from_reader(br)?)
    }
}
