//! # Entity typing modules
//!
//! Decoder heads mapping a shared sentence representation to scores over a hierarchical label
//! vocabulary, and the encoders producing such representations.
//!
//! Three output types are supported (`OutputType`): the full `open` vocabulary and the `wiki` and
//! `kb` vocabularies, which are prefixes of it. Decoders sharing a weight matrix across output types
//! score a sub-vocabulary with the leading rows of the open weight.
//!
//! - `SimpleDecoder`, `MultiSimpleDecoder`: linear heads
//! - `MaskDecoder`, `Mask2PredDecoder`: two-stage mask then prediction heads
//! - `MultiMLPDecoder`: two-layer head over the open vocabulary
//! - `CharCNN`: character-level span encoder
//! - `SelfAttentiveSum`: attention pooling of a sequence
//!
//! ```no_run
//! # fn main() -> Result<(), entity_typing::TypingError> {
//! use entity_typing::typing::{LabelCounts, MultiSimpleDecoder, OutputType};
//! use tch::{nn, no_grad, Device, Kind, Tensor};
//!
//! let vs = nn::VarStore::new(Device::Cpu);
//! let answer_num = LabelCounts::default();
//! let decoder = MultiSimpleDecoder::new(vs.root() / "decoder", 1024, &answer_num);
//!
//! let inputs = Tensor::rand([2, 1024], (Kind::Float, Device::Cpu));
//! let scores = no_grad(|| decoder.forward(&inputs, OutputType::Kb))?;
//! assert_eq!(scores.size(), vec![2, answer_num.kb]);
//! # Ok(())
//! # }
//! ```

mod attention;
mod char_cnn;
mod config;
mod decoder;
mod decoder_option;
mod mask_decoder;
mod task;
mod vocab;

pub use attention::{SelfAttentiveSum, SelfAttentiveSumOutput};
pub use char_cnn::CharCNN;
pub use config::TypingConfig;
pub use decoder::{MultiMLPDecoder, MultiSimpleDecoder, SimpleDecoder};
pub use decoder_option::{DecoderOption, DecoderType};
pub use mask_decoder::{Mask2PredDecoder, MaskDecoder, MaskDecoderOutput};
pub use task::OutputType;
pub use vocab::{LabelCounts, TypingVocab};
