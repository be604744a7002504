//! Symbol encoding of annotated sentences.
//!
//! This module is organized into the following submodules:
//! - `config`: encoder settings (affix lengths, case sensitivity)
//! - `tag_rules`: declarative POS-tag-to-category classification
//! - `shape`: word-shape signatures
//! - `numeric`: the fixed-width numeric sentence representation

pub mod config;
pub mod numeric;
pub mod shape;
pub mod tag_rules;

pub use config::EncoderConfig;
pub use numeric::{EncodeError, NumericSentence, MAX_MORPH_FEATURES};
pub use shape::word_shape;
pub use tag_rules::{TagClassifier, TagPattern, TagRule, TokenCategory};

use rayon::prelude::*;

use crate::data::Sentence;
use crate::dict::DependencyDictionary;
use crate::precompute::PairwiseCounts;

/// A fully encoded sentence: the numeric instance plus its pairwise tables
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSentence {
    pub numeric: NumericSentence,
    pub pairwise: PairwiseCounts,
}

/// Encode one sentence end to end
pub fn encode_sentence(
    sentence: &Sentence,
    dict: &DependencyDictionary,
    config: &EncoderConfig,
) -> Result<EncodedSentence, EncodeError> {
    let numeric = NumericSentence::encode(sentence, dict, config)?;
    let pairwise = PairwiseCounts::build(&numeric);
    Ok(EncodedSentence { numeric, pairwise })
}

/// Encode a corpus.
///
/// Sentences are independent and the dictionaries are read-only here, so
/// encoding fans out across sentences; each sentence's pass stays
/// sequential.
pub fn encode_corpus(
    sentences: &[Sentence],
    dict: &DependencyDictionary,
    config: &EncoderConfig,
) -> Result<Vec<EncodedSentence>, EncodeError> {
    sentences
        .par_iter()
        .map(|sentence| encode_sentence(sentence, dict, config))
        .collect()
}
