use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rayon::prelude::*;

use rustdp::data::{read_conll, read_json, ClusterLexicon};
use rustdp::dict::{DictionaryOptions, TOKEN_UNKNOWN};
use rustdp::{encode_sentence, DependencyDictionary, EncodedSentence, EncoderConfig};

#[derive(Parser, Debug)]
#[command(name = "encode_corpus")]
#[command(about = "Encode an annotated corpus into numeric parsing instances")]
#[command(version)]
struct Args {
    /// Input corpus file (optionally gzipped)
    #[arg(short, long)]
    input: PathBuf,

    /// Corpus format
    #[arg(short, long, default_value = "conll")]
    format: CorpusFormat,

    /// Cluster lexicon file (form<TAB>bit path)
    #[arg(short, long)]
    clusters: Option<PathBuf>,

    /// Leading characters interned as prefixes
    #[arg(long, default_value_t = 4)]
    prefix_length: usize,

    /// Trailing characters interned as suffixes
    #[arg(long, default_value_t = 4)]
    suffix_length: usize,

    /// Keep surface forms case-sensitive
    #[arg(long)]
    case_sensitive: bool,

    /// Drop forms and lemmas occurring at most this many times
    #[arg(long, default_value_t = 0)]
    cutoff: usize,
}

#[derive(Debug, Clone, ValueEnum)]
enum CorpusFormat {
    Conll,
    Json,
}

#[derive(Debug, Default)]
struct EncodeStats {
    sentences: usize,
    tokens: usize,
    unknown_forms: usize,
    verbs: usize,
    nouns: usize,
    puncts: usize,
    coords: usize,
}

impl EncodeStats {
    fn collect(encoded: &[EncodedSentence]) -> Self {
        let mut stats = Self {
            sentences: encoded.len(),
            ..Self::default()
        };
        for sentence in encoded {
            let numeric = &sentence.numeric;
            stats.tokens += numeric.len();
            for i in 0..numeric.len() {
                if usize::from(numeric.form_id(i)) == TOKEN_UNKNOWN {
                    stats.unknown_forms += 1;
                }
                stats.verbs += numeric.is_verb(i) as usize;
                stats.nouns += numeric.is_noun(i) as usize;
                stats.puncts += numeric.is_punctuation(i) as usize;
                stats.coords += numeric.is_coordination(i) as usize;
            }
        }
        stats
    }

    fn report(&self) {
        println!("Encoded {} sentences, {} tokens", self.sentences, self.tokens);
        if self.tokens > 0 {
            println!(
                "Unknown forms: {} ({:.2}%)",
                self.unknown_forms,
                100.0 * self.unknown_forms as f64 / self.tokens as f64
            );
        }
        println!(
            "Category flags: {} verbs, {} nouns, {} puncts, {} coords",
            self.verbs, self.nouns, self.puncts, self.coords
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let clusters = match &args.clusters {
        Some(path) => ClusterLexicon::from_file(path)?,
        None => ClusterLexicon::empty(),
    };
    if !clusters.is_empty() {
        info!("cluster lexicon: {} entries", clusters.len());
    }

    let sentences = match args.format {
        CorpusFormat::Conll => read_conll(&args.input, &clusters)?,
        CorpusFormat::Json => read_json(&args.input, &clusters)?,
    };
    if sentences.is_empty() {
        return Err(anyhow!("no sentences found in {}", args.input.display()));
    }
    info!("read {} sentences from {}", sentences.len(), args.input.display());

    let config = EncoderConfig {
        prefix_length: args.prefix_length,
        suffix_length: args.suffix_length,
        form_case_sensitive: args.case_sensitive,
    };
    let options = DictionaryOptions {
        frequency_cutoff: args.cutoff,
    };
    let dict = DependencyDictionary::from_sentences(&sentences, &config, &options);
    info!(
        "dictionary: {} forms, {} lemmas, {} POS tags, {} relation labels",
        dict.token_dictionary().num_forms(),
        dict.token_dictionary().num_lemmas(),
        dict.token_dictionary().num_pos_tags(),
        dict.relation_alphabet().len()
    );

    let progress = ProgressBar::new(sentences.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} sentences ({eta})")?
            .progress_chars("#>-"),
    );

    let encoded: Result<Vec<_>, _> = sentences
        .par_iter()
        .map(|sentence| {
            let result = encode_sentence(sentence, &dict, &config);
            progress.inc(1);
            result
        })
        .collect();
    progress.finish_and_clear();

    let encoded = encoded?;
    EncodeStats::collect(&encoded).report();

    Ok(())
}
