use anyhow::Result;
use rustdp::data::parse_conll;
use rustdp::dict::DictionaryOptions;
use rustdp::{encode_sentence, ClusterLexicon, DependencyDictionary, EncoderConfig};

const DEMO: &str = "\
1\tJohn\tjohn\tN\tNNP\t_\t2\tnsubj\t_\t_
2\tsaw\tsee\tV\tVBD\tTense=Past\t0\troot\t_\t_
3\tMary\tmary\tN\tNNP\t_\t2\tdobj\t_\t_
4\tand\tand\tConj\tCC\t_\t3\tcc\t_\t_
5\tBill\tbill\tN\tNNP\t_\t3\tconj\t_\t_
6\t.\t.\tPunc\tPunc\t_\t2\tpunct\t_\t_
";

fn main() -> Result<()> {
    println!("=== RustDP: numeric sentence encoding demo ===");

    let sentences = parse_conll(DEMO.as_bytes(), &ClusterLexicon::empty())?;
    let config = EncoderConfig::default();
    let dict =
        DependencyDictionary::from_sentences(&sentences, &config, &DictionaryOptions::default());

    println!(
        "Dictionary: {} forms, {} POS tags",
        dict.token_dictionary().num_forms(),
        dict.token_dictionary().num_pos_tags()
    );

    for sentence in &sentences {
        let encoded = encode_sentence(sentence, &dict, &config)?;
        let numeric = &encoded.numeric;

        println!("\n--- Sentence with {} tokens ---", sentence.len());
        for i in 0..numeric.len() {
            println!(
                "  {:>2} {:<8} form={:<4} pos={:<3} shape={:<6} verb={} noun={} punc={} coord={}",
                i,
                sentence.form(i),
                numeric.form_id(i),
                numeric.pos_id(i),
                numeric.shape(i),
                numeric.is_verb(i) as u8,
                numeric.is_noun(i) as u8,
                numeric.is_punctuation(i) as u8,
                numeric.is_coordination(i) as u8,
            );
        }

        let last = numeric.len() - 1;
        println!(
            "Between token 0 and token {}: {} verbs, {} puncts, {} coords",
            last,
            encoded.pairwise.verbs_between(0, last),
            encoded.pairwise.puncts_between(0, last),
            encoded.pairwise.coords_between(0, last),
        );
    }

    Ok(())
}
