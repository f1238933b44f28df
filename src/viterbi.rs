//! Minimum-cost path search over code-point positions.

use crate::classify::{is_coeng, is_dependent_vowel, is_digit, is_khmer_char, is_valid_single_consonant};
use crate::dict::Dictionary;
use crate::error::SegmenterError;
use crate::scan::{acronym_length, cluster_length, is_acronym_start, number_length};

const REPAIR_PENALTY: f32 = 50.0;
const INVALID_SINGLE_PENALTY: f32 = 10.0;
const NUMBER_COST: f32 = 1.0;
const ACRONYM_COST: f32 = 1.0;

#[derive(Clone, Copy)]
struct State {
    cost: f32,
    parent: isize,
}

/// Runs the Viterbi search over `chars` and backtracks to a raw segmentation.
/// `chars` must already have U+200B stripped; an empty slice yields an empty
/// result without touching the DP tables.
pub fn segment_raw(
    chars: &[char],
    dict: &Dictionary,
    enable_repair: bool,
    enable_acronyms: bool,
) -> Result<Vec<(usize, usize)>, SegmenterError> {
    let n = chars.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut dp = vec![
        State {
            cost: f32::INFINITY,
            parent: -1
        };
        n + 1
    ];
    dp[0].cost = 0.0;

    let trie = dict.trie();

    for i in 0..n {
        if dp[i].cost.is_infinite() {
            continue;
        }

        if enable_repair {
            let prev_is_coeng = i > 0 && is_coeng(chars[i - 1]);
            let starts_with_dependent_vowel = is_dependent_vowel(chars[i]);
            if prev_is_coeng || starts_with_dependent_vowel {
                relax(&mut dp, i, i + 1, dict.unknown_cost + REPAIR_PENALTY);
                continue;
            }
        }

        if is_digit(chars[i]) {
            let len = number_length(chars, i);
            relax(&mut dp, i, i + len, NUMBER_COST);
        }

        if enable_acronyms && is_acronym_start(chars, i) {
            let len = acronym_length(chars, i);
            relax(&mut dp, i, i + len, ACRONYM_COST);
        }

        // Single trie walk covers every dictionary word starting at `i`.
        let mut cursor = trie.root();
        let max_end = (i + dict.max_word_length).min(n);
        for j in (i + 1)..=max_end {
            match trie.step(cursor, chars[j - 1]) {
                Some(next) => {
                    cursor = next;
                    if let Some(cost) = trie.accepting_cost(cursor) {
                        relax(&mut dp, i, j, cost);
                    }
                }
                None => break,
            }
        }

        let (cluster_len, step_cost) = if is_khmer_char(chars[i]) {
            let len = cluster_length(chars, i);
            let mut cost = dict.unknown_cost;
            if len == 1 && !is_valid_single_consonant(chars[i]) {
                cost += INVALID_SINGLE_PENALTY;
            }
            (len, cost)
        } else {
            (1, dict.unknown_cost)
        };
        relax(&mut dp, i, i + cluster_len, step_cost);
    }

    backtrack(&dp, chars, n)
}

fn relax(dp: &mut [State], from: usize, to: usize, step_cost: f32) {
    if to >= dp.len() {
        return;
    }
    let candidate = dp[from].cost + step_cost;
    if candidate < dp[to].cost {
        dp[to].cost = candidate;
        dp[to].parent = from as isize;
    }
}

fn backtrack(dp: &[State], chars: &[char], n: usize) -> Result<Vec<(usize, usize)>, SegmenterError> {
    if dp[n].parent == -1 {
        let furthest = dp
            .iter()
            .enumerate()
            .filter(|(i, s)| *i == 0 || s.parent != -1)
            .map(|(i, _)| i)
            .max()
            .unwrap_or(0);
        let remainder: String = chars[furthest..n.min(furthest + 20)].iter().collect();
        return Err(SegmenterError::SegmentationFailed {
            reached: furthest,
            remainder,
            input_len: n,
        });
    }

    let mut spans = Vec::new();
    let mut curr = n;
    while curr > 0 {
        let parent = dp[curr].parent as usize;
        spans.push((parent, curr));
        curr = parent;
    }
    spans.reverse();
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn dict_with(words: &[&str]) -> (tempfile::NamedTempFile, Dictionary) {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        for w in words {
            writeln!(f, "{}", w).unwrap();
        }
        let d = Dictionary::load(f.path(), None).unwrap();
        (f, d)
    }

    #[test]
    fn dictionary_word_is_chosen_as_one_segment() {
        let (_f, dict) = dict_with(&["សួស្តី"]);
        let chars: Vec<char> = "សួស្តី".chars().collect();
        let spans = segment_raw(&chars, &dict, true, true).unwrap();
        assert_eq!(spans, vec![(0, chars.len())]);
    }

    #[test]
    fn empty_input_yields_no_segments() {
        let (_f, dict) = dict_with(&["dummy"]);
        let spans = segment_raw(&[], &dict, true, true).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn orphan_coeng_is_repaired_not_fatal() {
        let (_f, dict) = dict_with(&["ក"]);
        let chars: Vec<char> = "\u{17D2}ក".chars().collect();
        let spans = segment_raw(&chars, &dict, true, true).unwrap();
        // total coverage with no gaps, first span starts at 0
        assert_eq!(spans[0].0, 0);
        let total: usize = spans.iter().map(|(s, e)| e - s).sum();
        assert_eq!(total, chars.len());
    }

    #[test]
    fn number_run_is_single_segment() {
        let (_f, dict) = dict_with(&["dummy"]);
        let chars: Vec<char> = "១២៣៤៥".chars().collect();
        let spans = segment_raw(&chars, &dict, true, true).unwrap();
        assert_eq!(spans, vec![(0, chars.len())]);
    }
}
