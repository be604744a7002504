//! Declarative classification of fine POS tags into coarse categories.
//!
//! The category flags drive the pairwise precompute tables. Rules are an
//! ordered list checked first-match-wins, so tagset-specific rule sets can
//! be swapped in without touching the encoder. Tags matching no rule
//! classify as none of the four categories, which downstream consumers
//! treat as a valid outcome.

/// Coarse linguistic category derived from a fine POS tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Verb,
    Noun,
    Punctuation,
    Coordination,
}

/// Predicate half of a classification rule
#[derive(Debug, Clone)]
pub enum TagPattern {
    /// Tag starts with any of these characters
    Initial(Vec<char>),
    /// Tag equals one of these literals (case-sensitive)
    Exact(Vec<String>),
}

impl TagPattern {
    fn matches(&self, tag: &str) -> bool {
        match self {
            Self::Initial(chars) => tag
                .chars()
                .next()
                .map(|first| chars.contains(&first))
                .unwrap_or(false),
            Self::Exact(literals) => literals.iter().any(|l| l == tag),
        }
    }
}

/// One classification rule: a predicate and the category it assigns
#[derive(Debug, Clone)]
pub struct TagRule {
    pub pattern: TagPattern,
    pub category: TokenCategory,
}

/// Ordered first-match classifier from fine POS tag strings to categories
#[derive(Debug, Clone)]
pub struct TagClassifier {
    rules: Vec<TagRule>,
}

impl TagClassifier {
    pub fn new(rules: Vec<TagRule>) -> Self {
        Self { rules }
    }

    /// Category of a tag, or `None` when no rule matches
    pub fn classify(&self, tag: &str) -> Option<TokenCategory> {
        self.rules
            .iter()
            .find(|rule| rule.pattern.matches(tag))
            .map(|rule| rule.category)
    }
}

impl Default for TagClassifier {
    /// Rule set covering the tag literals of the common treebank tagsets
    /// (Penn, Tiger/Negra, CoNLL multilingual, AnCora)
    fn default() -> Self {
        let exact = |literals: &[&str]| {
            TagPattern::Exact(literals.iter().map(|s| s.to_string()).collect())
        };
        Self::new(vec![
            TagRule {
                pattern: TagPattern::Initial(vec!['v', 'V']),
                category: TokenCategory::Verb,
            },
            TagRule {
                pattern: TagPattern::Initial(vec!['n', 'N']),
                category: TokenCategory::Noun,
            },
            TagRule {
                pattern: exact(&[
                    "Punc", "$,", "$.", "PUNC", "punc", "F", "IK", "XP", ",", ";",
                ]),
                category: TokenCategory::Punctuation,
            },
            TagRule {
                pattern: exact(&["Conj", "KON", "conj", "Conjunction", "CC", "cc", "&"]),
                category: TokenCategory::Coordination,
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let classifier = TagClassifier::default();

        assert_eq!(classifier.classify("VBZ"), Some(TokenCategory::Verb));
        assert_eq!(classifier.classify("vmis3s0"), Some(TokenCategory::Verb));
        assert_eq!(classifier.classify("NNP"), Some(TokenCategory::Noun));
        assert_eq!(classifier.classify("$,"), Some(TokenCategory::Punctuation));
        assert_eq!(classifier.classify(","), Some(TokenCategory::Punctuation));
        assert_eq!(classifier.classify("KON"), Some(TokenCategory::Coordination));
        assert_eq!(classifier.classify("CC"), Some(TokenCategory::Coordination));
    }

    #[test]
    fn test_priority_order() {
        // A verb-initial tag never reaches the later rules
        let classifier = TagClassifier::default();
        assert_eq!(classifier.classify("V,"), Some(TokenCategory::Verb));
    }

    #[test]
    fn test_unmatched_tags_classify_as_none() {
        let classifier = TagClassifier::default();
        assert_eq!(classifier.classify("JJ"), None);
        assert_eq!(classifier.classify("DT"), None);
        assert_eq!(classifier.classify(""), None);
        // Exact punctuation literals are case-sensitive
        assert_eq!(classifier.classify("puNC"), None);
    }

    #[test]
    fn test_custom_rule_set() {
        let classifier = TagClassifier::new(vec![TagRule {
            pattern: TagPattern::Exact(vec!["PUNCT".to_string()]),
            category: TokenCategory::Punctuation,
        }]);
        assert_eq!(classifier.classify("PUNCT"), Some(TokenCategory::Punctuation));
        assert_eq!(classifier.classify("VBZ"), None);
    }
}
