pub mod data;
pub mod dict;
pub mod encoder;
pub mod precompute;

pub use data::{ClusterLexicon, Sentence, Token};
pub use dict::{Alphabet, DependencyDictionary, DictionaryOptions, TokenDictionary};
pub use encoder::{
    encode_corpus, encode_sentence, EncodeError, EncodedSentence, EncoderConfig, NumericSentence,
    TagClassifier,
};
pub use precompute::{CountCategory, PackedCount, PairwiseCounts};
