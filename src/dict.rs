//! Dictionary loading: orthographic variant expansion, invalid-entry
//! filtering, and the trie + cost table built from the surviving word set.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use crate::classify::is_valid_single_consonant;
use crate::cost::CostModel;
use crate::error::SegmenterError;
use crate::trie::Trie;

const COENG: char = '\u{17D2}';
const COENG_TA: &str = "\u{17D2}\u{178F}";
const COENG_DA: &str = "\u{17D2}\u{178D}";
const COENG_RO: &str = "\u{17D2}\u{179A}";
const REPETITION_MARK: char = '\u{17D7}';
const OR_VOWEL: char = '\u{17AC}';
const EXCLUDED_FRAGMENT: &str = "\u{178F}\u{17D2}\u{178F}\u{17B7}"; // ត្តិ

/// The normalized word set plus the trie and cost table derived from it.
pub struct Dictionary {
    words: HashSet<String>,
    trie: Trie,
    pub max_word_length: usize,
    pub default_cost: f32,
    pub unknown_cost: f32,
    pub filtered_count: usize,
}

impl Dictionary {
    pub fn load(dict_path: &Path, frequency_path: Option<&Path>) -> Result<Self, SegmenterError> {
        let raw = fs::read_to_string(dict_path).map_err(|source| SegmenterError::DictionaryNotFound {
            path: dict_path.to_path_buf(),
            source,
        })?;

        let mut words: HashSet<String> = HashSet::new();
        for line in raw.lines() {
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            if word.chars().count() == 1 {
                let c = word.chars().next().unwrap();
                if !is_valid_single_consonant(c) {
                    continue;
                }
            }
            words.insert(word.to_string());
            for variant in generate_variants(word) {
                words.insert(variant);
            }
        }

        let before_filter = words.len();
        let words = filter_invalid_entries(words);
        let filtered_count = before_filter - words.len();
        let max_word_length = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);

        let cost_model = match frequency_path {
            Some(path) => match fs::read_to_string(path) {
                Ok(raw) => {
                    let freq: HashMap<String, f64> = serde_json::from_str(&raw).map_err(|source| {
                        SegmenterError::FrequencyFileMalformed {
                            path: path.to_path_buf(),
                            source,
                        }
                    })?;
                    CostModel::from_frequencies(&freq, |w| generate_variants(w))
                }
                Err(_) => {
                    log::warn!(
                        "frequency file not found at {}, falling back to default costs",
                        path.display()
                    );
                    CostModel::without_frequencies()
                }
            },
            None => CostModel::without_frequencies(),
        };

        let mut trie = Trie::new();
        for word in &words {
            trie.insert(word, cost_model.cost_for(word));
        }

        log::info!(
            "loaded {} words ({} filtered invalid entries); default_cost={:.2} unknown_cost={:.2}",
            words.len(),
            filtered_count,
            cost_model.default_cost,
            cost_model.unknown_cost,
        );

        Ok(Dictionary {
            words,
            trie,
            max_word_length,
            default_cost: cost_model.default_cost,
            unknown_cost: cost_model.unknown_cost,
            filtered_count,
        })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }
}

/// Ta/Da subscript interchange and Coeng-Ro reordering, per §4.2.
fn generate_variants(word: &str) -> Vec<String> {
    let mut variants: HashSet<String> = HashSet::new();

    if word.contains(COENG_TA) {
        variants.insert(word.replace(COENG_TA, COENG_DA));
    }
    if word.contains(COENG_DA) {
        variants.insert(word.replace(COENG_DA, COENG_TA));
    }

    let mut base_set: Vec<String> = vec![word.to_string()];
    base_set.extend(variants.iter().cloned());

    for base in &base_set {
        if let Some(swapped) = swap_ro_adjacent_coeng(base, true) {
            variants.insert(swapped);
        }
        if let Some(swapped) = swap_ro_adjacent_coeng(base, false) {
            variants.insert(swapped);
        }
    }

    variants.remove(word);
    variants.into_iter().collect()
}

/// Swaps every adjacent `(Coeng-Ro, other Coeng pair)` — or, when
/// `ro_first` is false, `(other Coeng pair, Coeng-Ro)` — occurrence in `word`.
/// Returns `None` if no such adjacent pair exists.
fn swap_ro_adjacent_coeng(word: &str, ro_first: bool) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    let mut i = 0;
    let mut swapped_any = false;

    while i < chars.len() {
        if i + 3 < chars.len() && chars[i] == COENG && chars[i + 2] == COENG {
            let (first_sub, second_sub) = (chars[i + 1], chars[i + 3]);
            let first_is_ro = first_sub == '\u{179A}';
            let second_is_ro = second_sub == '\u{179A}';
            let matches = if ro_first {
                first_is_ro && !second_is_ro
            } else {
                !first_is_ro && second_is_ro
            };
            if matches {
                out.push(chars[i + 2]);
                out.push(chars[i + 3]);
                out.push(chars[i]);
                out.push(chars[i + 1]);
                i += 4;
                swapped_any = true;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    swapped_any.then_some(out)
}

fn filter_invalid_entries(mut words: HashSet<String>) -> HashSet<String> {
    let mut to_remove: HashSet<String> = HashSet::new();

    for word in &words {
        if word.chars().count() > 1 && word.contains(OR_VOWEL) {
            if is_compound_or(word, &words) {
                to_remove.insert(word.clone());
            }
        }
        if word.contains(REPETITION_MARK) {
            to_remove.insert(word.clone());
        }
        if word.starts_with(COENG) {
            to_remove.insert(word.clone());
        }
    }
    to_remove.insert(EXCLUDED_FRAGMENT.to_string());

    for w in to_remove {
        words.remove(&w);
    }
    words
}

fn is_compound_or(word: &str, words: &HashSet<String>) -> bool {
    let or_str = OR_VOWEL.to_string();
    if let Some(suffix) = word.strip_prefix(&or_str) {
        return words.contains(suffix);
    }
    if let Some(prefix) = word.strip_suffix(&or_str) {
        return words.contains(prefix);
    }
    word.split(OR_VOWEL).all(|part| part.is_empty() || words.contains(part))
}
