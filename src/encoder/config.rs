//! Encoder configuration types

use serde::Deserialize;

/// Encoder settings, passed explicitly at call time
#[derive(Debug, Clone, Deserialize)]
pub struct EncoderConfig {
    /// Number of leading characters interned as the prefix attribute
    pub prefix_length: usize,
    /// Number of trailing characters interned as the suffix attribute
    pub suffix_length: usize,
    /// Keep surface forms as-is instead of lower-casing them
    pub form_case_sensitive: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            prefix_length: 4,
            suffix_length: 4,
            form_case_sensitive: false,
        }
    }
}

impl EncoderConfig {
    /// Case-normalized surface form
    pub fn normalize_form(&self, form: &str) -> String {
        if self.form_case_sensitive {
            form.to_string()
        } else {
            form.to_lowercase()
        }
    }

    /// First `prefix_length` characters of the form
    pub fn prefix_of(&self, form: &str) -> String {
        form.chars().take(self.prefix_length).collect()
    }

    /// Last `suffix_length` characters of the form; the whole form when
    /// shorter (no padding)
    pub fn suffix_of(&self, form: &str) -> String {
        let len = form.chars().count();
        let start = len.saturating_sub(self.suffix_length);
        form.chars().skip(start).collect()
    }
}
