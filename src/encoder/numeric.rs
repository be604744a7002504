//! Fixed-width numeric encoding of annotated sentences.
//!
//! `NumericSentence` holds one entry per token in parallel arrays. The
//! storage widths enforce the code budgets structurally: coarse namespaces
//! (POS, coarse POS, 4-/6-bit clusters) are `u8`, fine namespaces (form,
//! lemma, cluster path, prefix, suffix, morph features) are `u16`. A
//! dictionary id that does not fit its width is a vocabulary/configuration
//! mismatch and aborts the sentence; a plain out-of-vocabulary miss resolves
//! to `TOKEN_UNKNOWN` and never fails.

use log::warn;
use thiserror::Error;

use crate::data::Sentence;
use crate::dict::{DependencyDictionary, RELATION_UNKNOWN, TOKEN_UNKNOWN};
use crate::encoder::config::EncoderConfig;
use crate::encoder::shape::word_shape;
use crate::encoder::tag_rules::{TagClassifier, TokenCategory};

/// Hard cap on the number of morphological features a single token may carry
pub const MAX_MORPH_FEATURES: usize = u16::MAX as usize;

/// Errors that abort the encoding of a sentence
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A dictionary id does not fit its namespace's code width. This is a
    /// vocabulary/configuration mismatch, not bad input, so it is fatal
    /// rather than truncated away.
    #[error("token {token}: {namespace} id {id} exceeds the {bits}-bit code budget")]
    CodeOverflow {
        token: usize,
        namespace: &'static str,
        id: usize,
        bits: u32,
    },

    #[error("token {token}: {count} morphological features, more than the supported maximum")]
    TooManyMorphFeatures { token: usize, count: usize },
}

fn fine_id(
    lookup: Option<usize>,
    token: usize,
    namespace: &'static str,
) -> Result<u16, EncodeError> {
    match lookup {
        Some(id) => u16::try_from(id).map_err(|_| EncodeError::CodeOverflow {
            token,
            namespace,
            id,
            bits: 16,
        }),
        None => Ok(TOKEN_UNKNOWN as u16),
    }
}

fn coarse_id(
    lookup: Option<usize>,
    token: usize,
    namespace: &'static str,
) -> Result<u8, EncodeError> {
    match lookup {
        Some(id) => u8::try_from(id).map_err(|_| EncodeError::CodeOverflow {
            token,
            namespace,
            id,
            bits: 8,
        }),
        None => Ok(TOKEN_UNKNOWN as u8),
    }
}

/// Fixed-width numeric view of one sentence.
///
/// Created fresh per sentence, populated once, then read-only for the
/// lifetime of the scoring pass that consumes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericSentence {
    form_ids: Vec<u16>,
    cluster_all_ids: Vec<u16>,
    lemma_ids: Vec<u16>,
    prefix_ids: Vec<u16>,
    suffix_ids: Vec<u16>,
    morph_ids: Vec<Vec<u16>>,
    pos_ids: Vec<u8>,
    cpos_ids: Vec<u8>,
    cluster4_ids: Vec<u8>,
    cluster6_ids: Vec<u8>,
    shapes: Vec<String>,
    is_noun: Vec<bool>,
    is_verb: Vec<bool>,
    is_punc: Vec<bool>,
    is_coord: Vec<bool>,
    heads: Vec<i32>,
    selects: Vec<bool>,
    relation_ids: Vec<usize>,
}

impl NumericSentence {
    fn with_capacity(len: usize) -> Self {
        Self {
            form_ids: Vec::with_capacity(len),
            cluster_all_ids: Vec::with_capacity(len),
            lemma_ids: Vec::with_capacity(len),
            prefix_ids: Vec::with_capacity(len),
            suffix_ids: Vec::with_capacity(len),
            morph_ids: Vec::with_capacity(len),
            pos_ids: Vec::with_capacity(len),
            cpos_ids: Vec::with_capacity(len),
            cluster4_ids: Vec::with_capacity(len),
            cluster6_ids: Vec::with_capacity(len),
            shapes: Vec::with_capacity(len),
            is_noun: Vec::with_capacity(len),
            is_verb: Vec::with_capacity(len),
            is_punc: Vec::with_capacity(len),
            is_coord: Vec::with_capacity(len),
            heads: Vec::with_capacity(len),
            selects: Vec::with_capacity(len),
            relation_ids: Vec::with_capacity(len),
        }
    }

    /// Encode a sentence with the default tag rule set
    pub fn encode(
        sentence: &Sentence,
        dict: &DependencyDictionary,
        config: &EncoderConfig,
    ) -> Result<Self, EncodeError> {
        Self::encode_with_classifier(sentence, dict, config, &TagClassifier::default())
    }

    /// Encode a sentence, deriving category flags with the given classifier
    pub fn encode_with_classifier(
        sentence: &Sentence,
        dict: &DependencyDictionary,
        config: &EncoderConfig,
        classifier: &TagClassifier,
    ) -> Result<Self, EncodeError> {
        let tokens = dict.token_dictionary();
        let mut out = Self::with_capacity(sentence.len());

        for i in 0..sentence.len() {
            let raw_form = sentence.form(i);
            let form = config.normalize_form(raw_form);

            out.form_ids
                .push(fine_id(tokens.form_id(&form), i, "form")?);
            out.cluster_all_ids.push(fine_id(
                tokens.cluster_all_id(sentence.cluster_all(i)),
                i,
                "cluster-all",
            )?);
            out.lemma_ids
                .push(fine_id(tokens.lemma_id(sentence.lemma(i)), i, "lemma")?);
            out.prefix_ids.push(fine_id(
                tokens.prefix_id(&config.prefix_of(&form)),
                i,
                "prefix",
            )?);
            out.suffix_ids.push(fine_id(
                tokens.suffix_id(&config.suffix_of(&form)),
                i,
                "suffix",
            )?);

            out.pos_ids
                .push(coarse_id(tokens.pos_id(sentence.pos(i)), i, "pos")?);
            out.cpos_ids
                .push(coarse_id(tokens.cpos_id(sentence.cpos(i)), i, "cpos")?);
            out.cluster4_ids.push(coarse_id(
                tokens.cluster4_id(sentence.cluster4(i)),
                i,
                "cluster-4",
            )?);
            out.cluster6_ids.push(coarse_id(
                tokens.cluster6_id(sentence.cluster6(i)),
                i,
                "cluster-6",
            )?);

            let feats = sentence.feats(i);
            if feats.len() > MAX_MORPH_FEATURES {
                return Err(EncodeError::TooManyMorphFeatures {
                    token: i,
                    count: feats.len(),
                });
            }
            let mut feat_ids = Vec::with_capacity(feats.len());
            for feat in feats {
                feat_ids.push(fine_id(tokens.morph_feature_id(feat), i, "morph feature")?);
            }
            out.morph_ids.push(feat_ids);

            // Shape comes from the original form, before case normalization
            out.shapes.push(word_shape(raw_form));

            let category = classifier.classify(sentence.pos(i));
            out.is_verb.push(category == Some(TokenCategory::Verb));
            out.is_noun.push(category == Some(TokenCategory::Noun));
            out.is_punc.push(category == Some(TokenCategory::Punctuation));
            out.is_coord.push(category == Some(TokenCategory::Coordination));

            out.heads.push(sentence.head(i));
            out.selects.push(sentence.select(i));

            let relation = sentence.relation(i);
            let relation_id = match dict.relation_alphabet().get_id(relation) {
                Some(id) => id,
                None => {
                    warn!("relation label '{relation}' missing from the label alphabet, using the unknown code");
                    RELATION_UNKNOWN
                }
            };
            out.relation_ids.push(relation_id);
        }

        Ok(out)
    }

    pub fn len(&self) -> usize {
        self.form_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.form_ids.is_empty()
    }

    pub fn form_id(&self, i: usize) -> u16 {
        self.form_ids[i]
    }

    pub fn cluster_all_id(&self, i: usize) -> u16 {
        self.cluster_all_ids[i]
    }

    pub fn lemma_id(&self, i: usize) -> u16 {
        self.lemma_ids[i]
    }

    pub fn prefix_id(&self, i: usize) -> u16 {
        self.prefix_ids[i]
    }

    pub fn suffix_id(&self, i: usize) -> u16 {
        self.suffix_ids[i]
    }

    pub fn morph_ids(&self, i: usize) -> &[u16] {
        &self.morph_ids[i]
    }

    pub fn pos_id(&self, i: usize) -> u8 {
        self.pos_ids[i]
    }

    pub fn cpos_id(&self, i: usize) -> u8 {
        self.cpos_ids[i]
    }

    pub fn cluster4_id(&self, i: usize) -> u8 {
        self.cluster4_ids[i]
    }

    pub fn cluster6_id(&self, i: usize) -> u8 {
        self.cluster6_ids[i]
    }

    pub fn shape(&self, i: usize) -> &str {
        &self.shapes[i]
    }

    pub fn is_noun(&self, i: usize) -> bool {
        self.is_noun[i]
    }

    pub fn is_verb(&self, i: usize) -> bool {
        self.is_verb[i]
    }

    pub fn is_punctuation(&self, i: usize) -> bool {
        self.is_punc[i]
    }

    pub fn is_coordination(&self, i: usize) -> bool {
        self.is_coord[i]
    }

    pub fn head(&self, i: usize) -> i32 {
        self.heads[i]
    }

    pub fn select(&self, i: usize) -> bool {
        self.selects[i]
    }

    pub fn relation_id(&self, i: usize) -> usize {
        self.relation_ids[i]
    }
}
