pub mod alphabet;
pub mod token_dictionary;

pub use alphabet::Alphabet;
pub use token_dictionary::{
    DependencyDictionary, DictionaryOptions, TokenDictionary, RELATION_UNKNOWN, TOKEN_START,
    TOKEN_STOP, TOKEN_UNKNOWN,
};
