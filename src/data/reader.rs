use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use flate2::read::GzDecoder;

use crate::data::sentence::{Sentence, Token, NO_HEAD};

/// Minimum tab-separated columns in a CoNLL-X token line
const CONLL_MIN_COLUMNS: usize = 8;

/// Placeholder used by CoNLL-X for absent fields
const ABSENT: &str = "_";

/// Lexicon mapping surface forms to hierarchical cluster bit paths.
///
/// The 4-bit and 6-bit granularities are derived as prefixes of the full
/// path, so one lexicon file serves all three cluster attributes.
#[derive(Debug, Clone, Default)]
pub struct ClusterLexicon {
    paths: HashMap<String, String>,
}

impl ClusterLexicon {
    /// A lexicon with no entries; every token gets the absent marker
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a `form<TAB>bit path` lexicon (plain or gzipped)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = open_maybe_gzip(path)?;
        let mut paths = HashMap::new();
        for (line_no, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_context(|| format!("reading {}", path.display()))?;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            let mut cols = line.split('\t');
            match (cols.next(), cols.next()) {
                (Some(form), Some(bits)) if !form.is_empty() && !bits.is_empty() => {
                    paths.insert(form.to_string(), bits.to_string());
                }
                _ => {
                    return Err(anyhow!(
                        "{}:{}: expected 'form<TAB>bit path'",
                        path.display(),
                        line_no + 1
                    ));
                }
            }
        }
        log::debug!("loaded cluster lexicon with {} entries", paths.len());
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Full bit path for a form, if present
    pub fn get(&self, form: &str) -> Option<&str> {
        self.paths.get(form).map(|s| s.as_str())
    }

    /// Fill in the three cluster attributes of a token from its form.
    /// Forms without an entry get the absent marker in all granularities.
    pub fn annotate(&self, token: &mut Token) {
        match self.get(&token.form) {
            Some(bits) => {
                token.cluster_all = bits.to_string();
                token.cluster4 = bit_prefix(bits, 4);
                token.cluster6 = bit_prefix(bits, 6);
            }
            None => {
                token.cluster_all = ABSENT.to_string();
                token.cluster4 = ABSENT.to_string();
                token.cluster6 = ABSENT.to_string();
            }
        }
    }
}

/// First `k` characters of a bit path; the whole path when shorter
fn bit_prefix(bits: &str, k: usize) -> String {
    bits.chars().take(k).collect()
}

/// Open a file, transparently decoding gzip detected by magic bytes
fn open_maybe_gzip(path: &Path) -> Result<Box<dyn Read>> {
    let mut file =
        File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file.read(&mut magic)?;

    // Reopen so the consumer sees the stream from the start
    let file = File::open(path)?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Read a CoNLL-X corpus from a plain or gzipped file.
///
/// Each sentence gets the artificial root token prepended at position 0, so
/// the 1-based head column indexes tokens directly (head 0 is the root).
pub fn read_conll<P: AsRef<Path>>(path: P, clusters: &ClusterLexicon) -> Result<Vec<Sentence>> {
    let path = path.as_ref();
    let reader = open_maybe_gzip(path)?;
    parse_conll(BufReader::new(reader), clusters)
        .with_context(|| format!("parsing {}", path.display()))
}

/// Parse CoNLL-X sentences from a buffered reader
pub fn parse_conll<R: BufRead>(reader: R, clusters: &ClusterLexicon) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    let mut tokens = vec![Token::root()];

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();

        if line.is_empty() {
            if tokens.len() > 1 {
                sentences.push(Sentence::new(std::mem::replace(
                    &mut tokens,
                    vec![Token::root()],
                )));
            }
            continue;
        }
        if line.starts_with('#') {
            continue;
        }

        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < CONLL_MIN_COLUMNS {
            return Err(anyhow!(
                "line {}: expected at least {} columns, got {}",
                line_no + 1,
                CONLL_MIN_COLUMNS,
                cols.len()
            ));
        }

        let head = if cols[6] == ABSENT {
            NO_HEAD
        } else {
            cols[6]
                .parse()
                .with_context(|| format!("line {}: invalid head index '{}'", line_no + 1, cols[6]))?
        };

        let feats = if cols[5] == ABSENT {
            Vec::new()
        } else {
            cols[5].split('|').map(str::to_string).collect()
        };

        let mut token = Token {
            form: cols[1].to_string(),
            lemma: cols[2].to_string(),
            cpos: cols[3].to_string(),
            pos: cols[4].to_string(),
            cluster_all: String::new(),
            cluster4: String::new(),
            cluster6: String::new(),
            feats,
            head,
            select: true,
            relation: cols[7].to_string(),
        };
        clusters.annotate(&mut token);
        tokens.push(token);
    }

    if tokens.len() > 1 {
        sentences.push(Sentence::new(tokens));
    }
    Ok(sentences)
}

/// Read sentences from a JSON file (plain or gzipped)
pub fn read_json<P: AsRef<Path>>(path: P, clusters: &ClusterLexicon) -> Result<Vec<Sentence>> {
    let path = path.as_ref();
    let mut content = String::new();
    open_maybe_gzip(path)?
        .read_to_string(&mut content)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut sentences = parse_json_sentences(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    if !clusters.is_empty() {
        for sentence in &mut sentences {
            for token in &mut sentence.tokens {
                clusters.annotate(token);
            }
        }
    }
    Ok(sentences)
}

/// Parse sentences from a JSON string: an array first, then line-delimited JSON
pub fn parse_json_sentences(content: &str) -> Result<Vec<Sentence>> {
    if let Ok(sentences) = serde_json::from_str::<Vec<Sentence>>(content) {
        return Ok(sentences);
    }

    let mut sentences = Vec::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let sentence: Sentence = serde_json::from_str(line)?;
        sentences.push(sentence);
    }
    Ok(sentences)
}
