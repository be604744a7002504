use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::data::Sentence;
use crate::dict::alphabet::Alphabet;
use crate::encoder::EncoderConfig;

/// Reserved id for out-of-vocabulary symbols, present in every namespace
pub const TOKEN_UNKNOWN: usize = 0;
/// Reserved id for the left-boundary symbol
pub const TOKEN_START: usize = 1;
/// Reserved id for the right-boundary symbol
pub const TOKEN_STOP: usize = 2;

/// Reserved id for relation labels missing from the label alphabet
pub const RELATION_UNKNOWN: usize = 0;

const SPECIAL_SYMBOLS: [&str; 3] = ["_UNKNOWN_", "_START_", "_STOP_"];

/// Options controlling dictionary construction
#[derive(Debug, Clone, Default)]
pub struct DictionaryOptions {
    /// Forms and lemmas occurring at most this many times are left out of
    /// their namespaces and resolve to the unknown code at encoding time
    pub frequency_cutoff: usize,
}

/// One symbol alphabet per token attribute namespace.
///
/// The form, lemma, cluster-all, prefix, suffix, and morphological-feature
/// namespaces are bounded to 16-bit code space; POS, coarse POS, and the two
/// coarse cluster namespaces to 8-bit code space. The bounds are enforced at
/// encoding time, not here: a dictionary built from an oversized vocabulary
/// is a configuration error the encoder reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDictionary {
    forms: Alphabet,
    lemmas: Alphabet,
    prefixes: Alphabet,
    suffixes: Alphabet,
    pos_tags: Alphabet,
    cpos_tags: Alphabet,
    clusters_all: Alphabet,
    clusters4: Alphabet,
    clusters6: Alphabet,
    morph_features: Alphabet,
}

impl Default for TokenDictionary {
    fn default() -> Self {
        let mut seeded = Alphabet::new();
        for symbol in SPECIAL_SYMBOLS {
            seeded.get_or_create_id(symbol);
        }
        Self {
            forms: seeded.clone(),
            lemmas: seeded.clone(),
            prefixes: seeded.clone(),
            suffixes: seeded.clone(),
            pos_tags: seeded.clone(),
            cpos_tags: seeded.clone(),
            clusters_all: seeded.clone(),
            clusters4: seeded.clone(),
            clusters6: seeded.clone(),
            morph_features: seeded,
        }
    }
}

impl TokenDictionary {
    /// Build all namespaces from a corpus.
    ///
    /// Form normalization and the prefix/suffix substrings follow `config`,
    /// so lookups made by the encoder with the same config always hit the
    /// entries created here.
    pub fn from_sentences(
        sentences: &[Sentence],
        config: &EncoderConfig,
        options: &DictionaryOptions,
    ) -> Self {
        let mut dict = Self::default();

        let mut form_counts: HashMap<String, usize> = HashMap::new();
        let mut lemma_counts: HashMap<String, usize> = HashMap::new();
        for sentence in sentences {
            for token in &sentence.tokens {
                *form_counts
                    .entry(config.normalize_form(&token.form))
                    .or_insert(0) += 1;
                *lemma_counts.entry(token.lemma.clone()).or_insert(0) += 1;
            }
        }

        for sentence in sentences {
            for token in &sentence.tokens {
                let form = config.normalize_form(&token.form);
                if form_counts[&form] > options.frequency_cutoff {
                    dict.forms.get_or_create_id(&form);
                }
                if lemma_counts[&token.lemma] > options.frequency_cutoff {
                    dict.lemmas.get_or_create_id(&token.lemma);
                }
                dict.prefixes.get_or_create_id(&config.prefix_of(&form));
                dict.suffixes.get_or_create_id(&config.suffix_of(&form));
                dict.pos_tags.get_or_create_id(&token.pos);
                dict.cpos_tags.get_or_create_id(&token.cpos);
                dict.clusters_all.get_or_create_id(&token.cluster_all);
                dict.clusters4.get_or_create_id(&token.cluster4);
                dict.clusters6.get_or_create_id(&token.cluster6);
                for feat in &token.feats {
                    dict.morph_features.get_or_create_id(feat);
                }
            }
        }

        log::debug!(
            "built token dictionary: {} forms, {} lemmas, {} POS tags, {} morph features",
            dict.forms.len(),
            dict.lemmas.len(),
            dict.pos_tags.len(),
            dict.morph_features.len()
        );
        dict
    }

    pub fn form_id(&self, form: &str) -> Option<usize> {
        self.forms.get_id(form)
    }

    pub fn lemma_id(&self, lemma: &str) -> Option<usize> {
        self.lemmas.get_id(lemma)
    }

    pub fn prefix_id(&self, prefix: &str) -> Option<usize> {
        self.prefixes.get_id(prefix)
    }

    pub fn suffix_id(&self, suffix: &str) -> Option<usize> {
        self.suffixes.get_id(suffix)
    }

    pub fn pos_id(&self, tag: &str) -> Option<usize> {
        self.pos_tags.get_id(tag)
    }

    pub fn cpos_id(&self, tag: &str) -> Option<usize> {
        self.cpos_tags.get_id(tag)
    }

    pub fn cluster_all_id(&self, cluster: &str) -> Option<usize> {
        self.clusters_all.get_id(cluster)
    }

    pub fn cluster4_id(&self, cluster: &str) -> Option<usize> {
        self.clusters4.get_id(cluster)
    }

    pub fn cluster6_id(&self, cluster: &str) -> Option<usize> {
        self.clusters6.get_id(cluster)
    }

    pub fn morph_feature_id(&self, feature: &str) -> Option<usize> {
        self.morph_features.get_id(feature)
    }

    pub fn num_forms(&self) -> usize {
        self.forms.len()
    }

    pub fn num_lemmas(&self) -> usize {
        self.lemmas.len()
    }

    pub fn num_pos_tags(&self) -> usize {
        self.pos_tags.len()
    }
}

/// Token dictionary plus the relation-label alphabet, built together from
/// the same corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyDictionary {
    tokens: TokenDictionary,
    relations: Alphabet,
}

impl DependencyDictionary {
    pub fn from_sentences(
        sentences: &[Sentence],
        config: &EncoderConfig,
        options: &DictionaryOptions,
    ) -> Self {
        let tokens = TokenDictionary::from_sentences(sentences, config, options);

        let mut relations = Alphabet::new();
        relations.get_or_create_id(SPECIAL_SYMBOLS[RELATION_UNKNOWN]);
        for sentence in sentences {
            for token in &sentence.tokens {
                relations.get_or_create_id(&token.relation);
            }
        }

        Self { tokens, relations }
    }

    pub fn token_dictionary(&self) -> &TokenDictionary {
        &self.tokens
    }

    pub fn relation_alphabet(&self) -> &Alphabet {
        &self.relations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_conll, ClusterLexicon};

    const SAMPLE: &str = "\
1\tJohn\tjohn\tN\tNNP\t_\t2\tnsubj\t_\t_
2\tsleeps\tsleep\tV\tVBZ\tNum=Sing\t0\troot\t_\t_
3\tsoundly\tsoundly\tA\tRB\t_\t2\tadvmod\t_\t_
";

    fn sample_sentences() -> Vec<Sentence> {
        parse_conll(SAMPLE.as_bytes(), &ClusterLexicon::empty()).unwrap()
    }

    #[test]
    fn test_special_symbols_are_reserved() {
        let dict = TokenDictionary::default();
        assert_eq!(dict.form_id("_UNKNOWN_"), Some(TOKEN_UNKNOWN));
        assert_eq!(dict.form_id("_START_"), Some(TOKEN_START));
        assert_eq!(dict.form_id("_STOP_"), Some(TOKEN_STOP));
        assert_eq!(dict.pos_id("_UNKNOWN_"), Some(TOKEN_UNKNOWN));
    }

    #[test]
    fn test_build_from_corpus() {
        let sentences = sample_sentences();
        let config = EncoderConfig::default();
        let dict =
            TokenDictionary::from_sentences(&sentences, &config, &DictionaryOptions::default());

        // Forms are stored lower-cased under the default config
        assert!(dict.form_id("john").is_some());
        assert_eq!(dict.form_id("John"), None);
        assert!(dict.pos_id("VBZ").is_some());
        assert!(dict.morph_feature_id("Num=Sing").is_some());
        assert!(dict.suffix_id("eeps").is_some());
        assert_eq!(dict.form_id("absent"), None);
    }

    #[test]
    fn test_frequency_cutoff_drops_rare_forms() {
        let sentences = sample_sentences();
        let config = EncoderConfig::default();
        let options = DictionaryOptions { frequency_cutoff: 1 };
        let dict = TokenDictionary::from_sentences(&sentences, &config, &options);

        // Every form occurs once, so only the reserved symbols remain
        assert_eq!(dict.form_id("john"), None);
        assert_eq!(dict.num_forms(), SPECIAL_SYMBOLS.len());
        // Coarse namespaces ignore the cutoff
        assert!(dict.pos_id("NNP").is_some());
    }

    #[test]
    fn test_relation_alphabet() {
        let sentences = sample_sentences();
        let dict = DependencyDictionary::from_sentences(
            &sentences,
            &EncoderConfig::default(),
            &DictionaryOptions::default(),
        );

        let relations = dict.relation_alphabet();
        assert_eq!(relations.get_id("_UNKNOWN_"), Some(RELATION_UNKNOWN));
        assert!(relations.get_id("nsubj").is_some());
        assert!(relations.get_id("advmod").is_some());
        assert_eq!(relations.get_id("missing"), None);
    }
}
