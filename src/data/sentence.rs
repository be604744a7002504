use serde::{Deserialize, Serialize};

/// Head index of tokens with no assigned head (the artificial root)
pub const NO_HEAD: i32 = -1;

fn default_select() -> bool {
    true
}

/// A single token with its linguistic annotations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub form: String,
    pub lemma: String,
    /// Coarse-grained part-of-speech tag
    pub cpos: String,
    /// Fine-grained part-of-speech tag
    pub pos: String,
    /// Full cluster bit path
    #[serde(default)]
    pub cluster_all: String,
    /// 4-bit prefix of the cluster bit path
    #[serde(default)]
    pub cluster4: String,
    /// 6-bit prefix of the cluster bit path
    #[serde(default)]
    pub cluster6: String,
    /// Morphological feature strings, order significant
    #[serde(default)]
    pub feats: Vec<String>,
    /// Gold head index, `NO_HEAD` when unassigned
    pub head: i32,
    /// Whether the token participates in training/scoring
    #[serde(default = "default_select")]
    pub select: bool,
    /// Dependency relation label
    pub relation: String,
}

impl Token {
    /// The artificial root token prepended at position 0
    pub fn root() -> Self {
        Self {
            form: "_root_".to_string(),
            lemma: "_root_".to_string(),
            cpos: "_root_".to_string(),
            pos: "_root_".to_string(),
            cluster_all: "_root_".to_string(),
            cluster4: "_root_".to_string(),
            cluster6: "_root_".to_string(),
            feats: Vec::new(),
            head: NO_HEAD,
            select: true,
            relation: "_root_".to_string(),
        }
    }
}

/// An annotated sentence: an ordered, immutable sequence of tokens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn form(&self, i: usize) -> &str {
        &self.tokens[i].form
    }

    pub fn lemma(&self, i: usize) -> &str {
        &self.tokens[i].lemma
    }

    pub fn cpos(&self, i: usize) -> &str {
        &self.tokens[i].cpos
    }

    pub fn pos(&self, i: usize) -> &str {
        &self.tokens[i].pos
    }

    pub fn cluster_all(&self, i: usize) -> &str {
        &self.tokens[i].cluster_all
    }

    pub fn cluster4(&self, i: usize) -> &str {
        &self.tokens[i].cluster4
    }

    pub fn cluster6(&self, i: usize) -> &str {
        &self.tokens[i].cluster6
    }

    pub fn feats(&self, i: usize) -> &[String] {
        &self.tokens[i].feats
    }

    pub fn head(&self, i: usize) -> i32 {
        self.tokens[i].head
    }

    pub fn select(&self, i: usize) -> bool {
        self.tokens[i].select
    }

    pub fn relation(&self, i: usize) -> &str {
        &self.tokens[i].relation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(form: &str, pos: &str) -> Token {
        Token {
            form: form.to_string(),
            lemma: form.to_string(),
            cpos: pos.to_string(),
            pos: pos.to_string(),
            cluster_all: "_".to_string(),
            cluster4: "_".to_string(),
            cluster6: "_".to_string(),
            feats: Vec::new(),
            head: NO_HEAD,
            select: true,
            relation: "dep".to_string(),
        }
    }

    #[test]
    fn test_accessors() {
        let sentence = Sentence::new(vec![token("John", "NNP"), token("sleeps", "VBZ")]);

        assert_eq!(sentence.len(), 2);
        assert_eq!(sentence.form(0), "John");
        assert_eq!(sentence.pos(1), "VBZ");
        assert_eq!(sentence.head(0), NO_HEAD);
        assert!(sentence.select(1));
    }

    #[test]
    fn test_root_token_has_no_head() {
        let root = Token::root();
        assert_eq!(root.head, NO_HEAD);
        assert_eq!(root.form, "_root_");
        assert!(root.feats.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let sentence = Sentence::new(vec![token("a", "DT")]);
        let json = serde_json::to_string(&sentence).unwrap();
        let parsed: Sentence = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sentence);
    }
}
