use std::path::Path;

use crate::dict::Dictionary;
use crate::error::SegmenterError;
use crate::postprocess;
use crate::viterbi;

/// Feature toggles for the pipeline. Normalization is not a toggle here: per
/// the crate's contract, input is only ever stripped of U+200B, never
/// otherwise rewritten.
#[derive(Clone, Copy, Debug)]
pub struct SegmenterConfig {
    pub enable_repair_mode: bool,
    pub enable_acronym_detection: bool,
    pub enable_unknown_merging: bool,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            enable_repair_mode: true,
            enable_acronym_detection: true,
            enable_unknown_merging: true,
        }
    }
}

/// A constructed, immutable segmenter: dictionary, trie, and cost table are
/// built once and shared read-only across every `segment` call and thread.
pub struct Segmenter {
    dict: Dictionary,
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(
        dictionary_path: &Path,
        frequency_path: Option<&Path>,
        config: SegmenterConfig,
    ) -> Result<Self, SegmenterError> {
        let dict = Dictionary::load(dictionary_path, frequency_path)?;
        Ok(Segmenter { dict, config })
    }

    /// Segments `text` into a sequence of non-empty substrings whose
    /// concatenation reproduces `text` with every U+200B removed.
    pub fn segment(&self, text: &str) -> Result<Vec<String>, SegmenterError> {
        let chars: Vec<char> = text.chars().filter(|&c| c != '\u{200B}').collect();
        if chars.is_empty() {
            return Ok(Vec::new());
        }

        let raw_spans = viterbi::segment_raw(
            &chars,
            &self.dict,
            self.config.enable_repair_mode,
            self.config.enable_acronym_detection,
        )?;

        let raw_segments: Vec<String> = raw_spans
            .into_iter()
            .map(|(start, end)| chars[start..end].iter().collect())
            .collect();

        if self.config.enable_unknown_merging {
            Ok(postprocess::apply(raw_segments, &self.dict))
        } else {
            Ok(raw_segments)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn build(words: &[&str]) -> (tempfile::NamedTempFile, Segmenter) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for w in words {
            writeln!(f, "{}", w).unwrap();
        }
        let seg = Segmenter::new(f.path(), None, SegmenterConfig::default()).unwrap();
        (f, seg)
    }

    #[test]
    fn greeting_is_one_word() {
        let (_f, seg) = build(&["សួស្តី"]);
        assert_eq!(seg.segment("សួស្តី").unwrap(), vec!["សួស្តី"]);
    }

    #[test]
    fn three_word_sentence() {
        let (_f, seg) = build(&["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]);
        assert_eq!(
            seg.segment("ខ្ញុំស្រលាញ់កម្ពុជា").unwrap(),
            vec!["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]
        );
    }

    #[test]
    fn space_separates_words() {
        let (_f, seg) = build(&["សួស្តី", "បង"]);
        assert_eq!(seg.segment("សួស្តី បង").unwrap(), vec!["សួស្តី", " ", "បង"]);
    }

    #[test]
    fn digits_form_a_single_number_segment() {
        let (_f, seg) = build(&["dummy"]);
        assert_eq!(seg.segment("១២៣៤៥").unwrap(), vec!["១២៣៤៥"]);
    }

    #[test]
    fn empty_input_segments_to_empty_sequence() {
        let (_f, seg) = build(&["dummy"]);
        assert_eq!(seg.segment("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn sentence_final_punctuation_is_its_own_segment() {
        let (_f, seg) = build(&["សួស្តី"]);
        assert_eq!(seg.segment("សួស្តី។").unwrap(), vec!["សួស្តី", "។"]);
    }

    #[test]
    fn zero_width_space_is_stripped_without_changing_result() {
        let (_f, seg) = build(&["កម្ពុជា"]);
        let with_zws = seg.segment("\u{200B}កម្ពុជា\u{200B}").unwrap();
        let without = seg.segment("កម្ពុជា").unwrap();
        assert_eq!(with_zws, without);
    }

    #[test]
    fn concatenation_reproduces_zws_stripped_input() {
        let (_f, seg) = build(&["សួស្តី", "បង"]);
        let input = "សួស្តី\u{200B} បង";
        let segments = seg.segment(input).unwrap();
        let joined: String = segments.concat();
        assert_eq!(joined, input.replace('\u{200B}', ""));
    }

    #[test]
    fn no_segment_starts_with_coeng_on_well_formed_input() {
        let (_f, seg) = build(&["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]);
        let segments = seg.segment("ខ្ញុំស្រលាញ់កម្ពុជា").unwrap();
        for s in &segments {
            assert!(!s.starts_with('\u{17D2}'));
        }
    }

    /// An orphan Coeng at the very start of the input has no preceding
    /// segment to fold into, so the repair edge only guarantees the DP
    /// terminates and consumes every character — not that the leading
    /// fragment avoids starting with U+17D2 itself.
    #[test]
    fn leading_orphan_coeng_is_repaired_without_failing() {
        let (_f, seg) = build(&["ក"]);
        let segments = seg.segment("\u{17D2}ក").unwrap();
        let joined: String = segments.concat();
        assert_eq!(joined, "\u{17D2}ក");
    }

    #[test]
    fn determinism_across_repeated_calls() {
        let (_f, seg) = build(&["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]);
        let a = seg.segment("ខ្ញុំស្រលាញ់កម្ពុជា").unwrap();
        let b = seg.segment("ខ្ញុំស្រលាញ់កម្ពុជា").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn idempotent_under_resegmentation() {
        let (_f, seg) = build(&["ខ្ញុំ", "ស្រលាញ់", "កម្ពុជា"]);
        let first = seg.segment("ខ្ញុំស្រលាញ់កម្ពុជា").unwrap();
        let rejoined = first.concat();
        let second = seg.segment(&rejoined).unwrap();
        assert_eq!(first, second);
    }
}
