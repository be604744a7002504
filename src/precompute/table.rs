use crate::encoder::NumericSentence;

/// Category tag stored in the low nibble of a packed count byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CountCategory {
    Verb = 0,
    Punctuation = 1,
    Coordination = 2,
}

impl CountCategory {
    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Verb),
            1 => Some(Self::Punctuation),
            2 => Some(Self::Coordination),
            _ => None,
        }
    }
}

/// One decoded table cell: a category tag plus a clamped occurrence count.
///
/// The byte layout is tag in bits 0-3, count in bits 4-7. The tag is
/// encoded identically in all three tables even though the table identity
/// already determines it, keeping cells uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedCount {
    pub category: CountCategory,
    pub count: u8,
}

impl PackedCount {
    /// Largest representable occurrence count
    pub const MAX_COUNT: u8 = 14;
    /// Reserved count value marking a boundary cell
    pub const SENTINEL: u8 = 15;

    /// A cell with the count clamped to `MAX_COUNT`
    pub fn new(category: CountCategory, count: usize) -> Self {
        Self {
            category,
            count: count.min(usize::from(Self::MAX_COUNT)) as u8,
        }
    }

    /// The boundary-sentinel cell for a category
    pub fn sentinel(category: CountCategory) -> Self {
        Self {
            category,
            count: Self::SENTINEL,
        }
    }

    pub fn encode(self) -> u8 {
        (self.count << 4) | self.category as u8
    }

    /// Decode a cell byte; `None` when the tag nibble is not a known category
    pub fn decode(byte: u8) -> Option<Self> {
        CountCategory::from_tag(byte & 0x0f).map(|category| Self {
            category,
            count: byte >> 4,
        })
    }

    pub fn is_sentinel(self) -> bool {
        self.count == Self::SENTINEL
    }
}

/// Three (n+1)x(n+1) byte tables of clamped intervening-category counts.
///
/// Cell `[left + 1][right + 1]` describes the open interval strictly between
/// 0-based token positions `left` and `right` with `left < right`. Row 0 is
/// the boundary-sentinel row consulted when a span has no real left context.
/// Cells with `left >= right` (row > 0) are never written; callers must not
/// read them.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseCounts {
    side: usize,
    verbs: Vec<u8>,
    puncts: Vec<u8>,
    coords: Vec<u8>,
}

impl PairwiseCounts {
    /// Build the three tables from the category flags of an encoded sentence.
    ///
    /// Runs in Θ(n²): per-category prefix sums over the flags, then one
    /// subtraction per cell.
    pub fn build(numeric: &NumericSentence) -> Self {
        let n = numeric.len();
        let side = n + 1;
        let mut verbs = vec![0u8; side * side];
        let mut puncts = vec![0u8; side * side];
        let mut coords = vec![0u8; side * side];

        for col in 0..side {
            verbs[col] = PackedCount::sentinel(CountCategory::Verb).encode();
            puncts[col] = PackedCount::sentinel(CountCategory::Punctuation).encode();
            coords[col] = PackedCount::sentinel(CountCategory::Coordination).encode();
        }

        // prefix[i] = occurrences among tokens 0..i; flags are mutually
        // exclusive, so each position feeds at most one sum
        let mut verb_sum = vec![0usize; n + 1];
        let mut punct_sum = vec![0usize; n + 1];
        let mut coord_sum = vec![0usize; n + 1];
        for i in 0..n {
            verb_sum[i + 1] = verb_sum[i] + usize::from(numeric.is_verb(i));
            punct_sum[i + 1] = punct_sum[i] + usize::from(numeric.is_punctuation(i));
            coord_sum[i + 1] = coord_sum[i] + usize::from(numeric.is_coordination(i));
        }

        for left in 0..n {
            for right in (left + 1)..n {
                let cell = (left + 1) * side + (right + 1);
                verbs[cell] = PackedCount::new(
                    CountCategory::Verb,
                    verb_sum[right] - verb_sum[left + 1],
                )
                .encode();
                puncts[cell] = PackedCount::new(
                    CountCategory::Punctuation,
                    punct_sum[right] - punct_sum[left + 1],
                )
                .encode();
                coords[cell] = PackedCount::new(
                    CountCategory::Coordination,
                    coord_sum[right] - coord_sum[left + 1],
                )
                .encode();
            }
        }

        Self {
            side,
            verbs,
            puncts,
            coords,
        }
    }

    /// Side length of the square tables (sentence length + 1)
    pub fn side(&self) -> usize {
        self.side
    }

    /// Raw verb-table byte; `row`/`col` carry the +1 shift, row 0 is the
    /// sentinel row
    pub fn packed_verbs(&self, row: usize, col: usize) -> u8 {
        self.verbs[row * self.side + col]
    }

    /// Raw punctuation-table byte, indexed like [`packed_verbs`](Self::packed_verbs)
    pub fn packed_puncts(&self, row: usize, col: usize) -> u8 {
        self.puncts[row * self.side + col]
    }

    /// Raw coordination-table byte, indexed like [`packed_verbs`](Self::packed_verbs)
    pub fn packed_coords(&self, row: usize, col: usize) -> u8 {
        self.coords[row * self.side + col]
    }

    /// Clamped number of verbs strictly between token positions `left` and
    /// `right` (`left < right`)
    pub fn verbs_between(&self, left: usize, right: usize) -> u8 {
        debug_assert!(left < right);
        self.packed_verbs(left + 1, right + 1) >> 4
    }

    /// Clamped number of punctuation tokens strictly between `left` and `right`
    pub fn puncts_between(&self, left: usize, right: usize) -> u8 {
        debug_assert!(left < right);
        self.packed_puncts(left + 1, right + 1) >> 4
    }

    /// Clamped number of coordinators strictly between `left` and `right`
    pub fn coords_between(&self, left: usize, right: usize) -> u8 {
        debug_assert!(left < right);
        self.packed_coords(left + 1, right + 1) >> 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{parse_conll, ClusterLexicon};
    use crate::dict::{DependencyDictionary, DictionaryOptions};
    use crate::encoder::EncoderConfig;

    fn encode(conll: &str) -> NumericSentence {
        let sentences = parse_conll(conll.as_bytes(), &ClusterLexicon::empty()).unwrap();
        let config = EncoderConfig::default();
        let dict = DependencyDictionary::from_sentences(
            &sentences,
            &config,
            &DictionaryOptions::default(),
        );
        NumericSentence::encode(&sentences[0], &dict, &config).unwrap()
    }

    /// V N Punc with the artificial root in front
    const SMALL: &str = "\
1\teats\teat\tV\tV\t_\t0\troot\t_\t_
2\tfish\tfish\tN\tN\t_\t1\tdobj\t_\t_
3\t.\t.\tPunc\tPunc\t_\t1\tpunct\t_\t_
";

    #[test]
    fn test_packed_count_round_trip() {
        let cell = PackedCount::new(CountCategory::Punctuation, 7);
        let byte = cell.encode();
        assert_eq!(byte & 0x0f, 1);
        assert_eq!(byte >> 4, 7);
        assert_eq!(PackedCount::decode(byte), Some(cell));
    }

    #[test]
    fn test_packed_count_clamps() {
        let cell = PackedCount::new(CountCategory::Verb, 200);
        assert_eq!(cell.count, PackedCount::MAX_COUNT);
        assert!(!cell.is_sentinel());
        assert!(PackedCount::sentinel(CountCategory::Verb).is_sentinel());
    }

    #[test]
    fn test_packed_count_rejects_unknown_tag() {
        assert_eq!(PackedCount::decode(0x0f), None);
    }

    #[test]
    fn test_interior_counts() {
        let numeric = encode(SMALL);
        // Tokens: 0 = root, 1 = verb, 2 = noun, 3 = punct
        let counts = PairwiseCounts::build(&numeric);

        // Between the verb (1) and the punct (3) sits only the noun
        assert_eq!(counts.verbs_between(1, 3), 0);
        assert_eq!(counts.puncts_between(1, 3), 0);
        assert_eq!(counts.coords_between(1, 3), 0);

        // Between the root (0) and the punct (3) sits one verb
        assert_eq!(counts.verbs_between(0, 3), 1);
        assert_eq!(counts.puncts_between(0, 3), 0);

        // Adjacent positions have an empty interior
        assert_eq!(counts.verbs_between(1, 2), 0);
    }

    #[test]
    fn test_counts_match_direct_scan() {
        let conll = "\
1\tsaw\tsee\tV\tV\t_\t0\troot\t_\t_
2\tand\tand\tConj\tCC\t_\t1\tcc\t_\t_
3\theard\thear\tV\tV\t_\t1\tconj\t_\t_
4\t,\t,\tPunc\t,\t_\t1\tpunct\t_\t_
5\tleft\tleave\tV\tV\t_\t1\tconj\t_\t_
";
        let numeric = encode(conll);
        let counts = PairwiseCounts::build(&numeric);

        for left in 0..numeric.len() {
            for right in (left + 1)..numeric.len() {
                let mut verbs = 0u8;
                let mut puncts = 0u8;
                let mut coords = 0u8;
                for i in (left + 1)..right {
                    if numeric.is_verb(i) {
                        verbs += 1;
                    } else if numeric.is_punctuation(i) {
                        puncts += 1;
                    } else if numeric.is_coordination(i) {
                        coords += 1;
                    }
                }
                assert_eq!(counts.verbs_between(left, right), verbs.min(14));
                assert_eq!(counts.puncts_between(left, right), puncts.min(14));
                assert_eq!(counts.coords_between(left, right), coords.min(14));
            }
        }
    }

    #[test]
    fn test_count_clamped_at_fourteen() {
        // 20 verbs in a row: every interior count saturates at 14
        let mut conll = String::new();
        for i in 1..=20 {
            conll.push_str(&format!("{i}\tv{i}\tv{i}\tV\tV\t_\t0\troot\t_\t_\n"));
        }
        let numeric = encode(&conll);
        let counts = PairwiseCounts::build(&numeric);

        assert_eq!(counts.verbs_between(0, 20), 14);
        let decoded = PackedCount::decode(counts.packed_verbs(1, 21)).unwrap();
        assert_eq!(decoded.count, 14);
        assert!(!decoded.is_sentinel());
    }

    #[test]
    fn test_sentinel_row() {
        let numeric = encode(SMALL);
        let counts = PairwiseCounts::build(&numeric);

        for col in 0..counts.side() {
            for byte in [
                counts.packed_verbs(0, col),
                counts.packed_puncts(0, col),
                counts.packed_coords(0, col),
            ] {
                let cell = PackedCount::decode(byte).unwrap();
                assert!(cell.is_sentinel());
            }
            // Tag bits still identify the table
            assert_eq!(counts.packed_verbs(0, col) & 0x0f, 0);
            assert_eq!(counts.packed_puncts(0, col) & 0x0f, 1);
            assert_eq!(counts.packed_coords(0, col) & 0x0f, 2);
        }
    }

    #[test]
    fn test_empty_sentence_gives_sentinel_only_table() {
        let numeric = NumericSentence::default();
        let counts = PairwiseCounts::build(&numeric);

        assert_eq!(counts.side(), 1);
        let cell = PackedCount::decode(counts.packed_verbs(0, 0)).unwrap();
        assert_eq!(cell.count, PackedCount::SENTINEL);
        assert!(PackedCount::decode(counts.packed_puncts(0, 0)).unwrap().is_sentinel());
        assert!(PackedCount::decode(counts.packed_coords(0, 0)).unwrap().is_sentinel());
    }

    #[test]
    fn test_tables_are_deterministic() {
        let numeric = encode(SMALL);
        assert_eq!(
            PairwiseCounts::build(&numeric),
            PairwiseCounts::build(&numeric)
        );
    }

    #[test]
    fn test_single_token_sentence() {
        // Only the root pair exists; no writable cells besides row 0
        let sentences =
            parse_conll("1\thi\thi\tI\tUH\t_\t0\troot\t_\t_".as_bytes(), &ClusterLexicon::empty())
                .unwrap();
        let config = EncoderConfig::default();
        let dict = DependencyDictionary::from_sentences(
            &sentences,
            &config,
            &DictionaryOptions::default(),
        );
        let numeric = NumericSentence::encode(&sentences[0], &dict, &config).unwrap();
        let counts = PairwiseCounts::build(&numeric);

        assert_eq!(counts.side(), 3);
        assert_eq!(counts.verbs_between(0, 1), 0);
    }
}
