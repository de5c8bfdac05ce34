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
use std::borrow::Borrow;
use tch::nn::init::DEFAULT_KAIMING_UNIFORM;
use tch::nn::{Init, Path};
use tch::Tensor;

#[derive(Debug, Clone, Copy)]
pub struct LinearNoBiasConfig {
    pub ws_init: Init,
}

impl Default for LinearNoBiasConfig {
    fn default() -> Self {
        LinearNoBiasConfig {
            ws_init: DEFAULT_KAIMING_UNIFORM,
        }
    }
}

/// # Bias-free linear projection
/// The weight is stored as `[out_dim, in_dim]`. Sub-tasks whose label space is a prefix of the
/// full label space reuse the leading rows of the same weight through `forward_prefix`.
#[derive(Debug)]
pub struct LinearNoBias {
    pub ws: Tensor,
}

pub fn linear_no_bias<'a, T: Borrow<Path<'a>>>(
    vs: T,
    in_dim: i64,
    out_dim: i64,
    c: LinearNoBiasConfig,
) -> LinearNoBias {
    let vs = vs.borrow();
    LinearNoBias {
        ws: vs.var("weight", &[out_dim, in_dim], c.ws_init),
    }
}

impl LinearNoBias {
    pub fn out_dim(&self) -> i64 {
        self.ws.size()[0]
    }

    pub fn in_dim(&self) -> i64 {
        self.ws.size()[1]
    }

    /// Projects `xs` onto all output units, returning an error on shape mismatch.
    pub fn f_forward(&self, xs: &Tensor) -> Result<Tensor, TypingError> {
        Ok(xs.f_matmul(&self.ws.tr())?)
    }

    /// Projects `xs` onto the first `rows` output units only.
    ///
    /// # Arguments
    ///
    /// * `xs` - input of shape (*, in_dim)
    /// * `rows` - number of leading output units to keep, in `1..=out_dim`
    ///
    /// # Returns
    ///
    /// * `Tensor` of shape (*, rows), equal to the leading `rows` columns of `forward(xs)`
    pub fn forward_prefix(&self, xs: &Tensor, rows: i64) -> Result<Tensor, TypingError> {
        if rows <= 0 || rows > self.out_dim() {
            return Err(TypingError::ValueError(format!(
                "cannot project onto {rows} rows of a layer with {} outputs",
                self.out_dim()
            )));
        }
        let ws = self.ws.f_narrow(0, 0, rows)?;
        Ok(xs.f_matmul(&ws.tr())?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tch::nn::VarStore;
    use tch::{Device, Kind};

    #[test]
    fn prefix_projection_matches_leading_columns() {
        let vs = VarStore::new(Device::Cpu);
        let linear = linear_no_bias(vs.root() / "linear", 4, 6, Default::default());
        let xs = Tensor::rand([3, 4], (Kind::Float, Device::Cpu));

        let full = linear.f_forward(&xs).unwrap();
        let prefix = linear.forward_prefix(&xs, 2).unwrap();

        assert_eq!(prefix.size(), vec![3, 2]);
        assert!(prefix.allclose(&full.narrow(1, 0, 2), 1e-5, 1e-6, false));
    }

    #[test]
    fn prefix_projection_rejects_out_of_range_rows() {
        let vs = VarStore::new(Device::Cpu);
        let linear = linear_no_bias(vs.root() / "linear", 4, 6, Default::default());
        let xs = Tensor::rand([3, 4], (Kind::Float, Device::Cpu));

        assert!(linear.forward_prefix(&xs, 0).is_err());
        assert!(linear.forward_prefix(&xs, 7).is_err());
    }

    #[test]
    fn full_projection_rejects_mismatched_input() {
        let vs = VarStore::new(Device::Cpu);
        let linear = linear_no_bias(vs.root() / "linear", 4, 6, Default::default());
        let xs = Tensor::rand([3, 5], (Kind::Float, Device::Cpu));

        assert!(matches!(
            linear.f_forward(&xs),
            Err(TypingError::TchError(_))
        ));
    }
}
