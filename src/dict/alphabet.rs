use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Bidirectional string<->id symbol table for one attribute namespace
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alphabet {
    id_to_term: Vec<String>,
    term_to_id: HashMap<String, usize>,
}

impl Alphabet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create ID for a term
    pub fn get_or_create_id(&mut self, term: &str) -> usize {
        if let Some(&id) = self.term_to_id.get(term) {
            id
        } else {
            let id = self.id_to_term.len();
            self.id_to_term.push(term.to_string());
            self.term_to_id.insert(term.to_string(), id);
            id
        }
    }

    /// Get ID for a term
    pub fn get_id(&self, term: &str) -> Option<usize> {
        self.term_to_id.get(term).copied()
    }

    /// Get term for an ID
    pub fn get_term(&self, id: usize) -> Option<&str> {
        self.id_to_term.get(id).map(|s| s.as_str())
    }

    /// Check if the alphabet contains a term
    pub fn contains(&self, term: &str) -> bool {
        self.term_to_id.contains_key(term)
    }

    /// Get the number of terms
    pub fn len(&self) -> usize {
        self.id_to_term.len()
    }

    /// Check if the alphabet is empty
    pub fn is_empty(&self) -> bool {
        self.id_to_term.is_empty()
    }
}
