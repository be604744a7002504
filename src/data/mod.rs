pub mod reader;
pub mod sentence;

pub use reader::{parse_conll, parse_json_sentences, read_conll, read_json, ClusterLexicon};
pub use sentence::{Sentence, Token, NO_HEAD};
