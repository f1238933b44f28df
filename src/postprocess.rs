//! Three sequential passes that rewrite a raw Viterbi segmentation:
//! snap invalid singletons, apply diacritic-merge heuristics, then coalesce
//! consecutive unknown fragments.

use crate::classify::{is_consonant, is_digit, is_separator, is_valid_single_consonant};
use crate::dict::Dictionary;

const AHSDA: char = '\u{17CF}';
const KAKABAT: char = '\u{17CE}';
const BANTOC: char = '\u{17CB}';
const VOWEL_I: char = '\u{17B7}';
const SIGN_TOE: char = '\u{17CD}';
const SAMYOK_SANNYA: char = '\u{17D0}';

/// Runs all three passes in order and returns the final segmentation.
pub fn apply(raw_segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let pass1 = snap_invalid_singletons(raw_segments, dict);
    let pass2 = merge_diacritics(pass1, dict);
    coalesce_unknowns(pass2, dict)
}

/// Pass 1 — a bare singleton that is not a dictionary word, a valid single
/// consonant, a digit, or a separator gets folded into the previous segment
/// (unless the previous segment is itself a separator).
fn snap_invalid_singletons(segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());

    for seg in segments {
        let is_invalid_singleton = {
            let mut chars = seg.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    !dict.contains(&seg)
                        && !is_valid_single_consonant(c)
                        && !is_digit(c)
                        && !is_separator(c)
                }
                _ => false,
            }
        };

        if is_invalid_singleton {
            let prev_is_separator = out.last().is_some_and(|p: &String| {
                let mut chars = p.chars();
                matches!((chars.next(), chars.next()), (Some(c), None) if is_separator(c))
            });
            if !out.is_empty() && !prev_is_separator {
                let prev = out.pop().unwrap();
                out.push(prev + &seg);
                continue;
            }
        }
        out.push(seg);
    }
    out
}

/// Pass 2 — consonant + specific sign sequences merge with a neighbour.
/// Known dictionary words are never rewritten.
fn merge_diacritics(segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    let mut iter = segments.into_iter().peekable();

    while let Some(seg) = iter.next() {
        if dict.contains(&seg) {
            out.push(seg);
            continue;
        }

        let chars: Vec<char> = seg.chars().collect();

        if chars.len() == 2
            && is_consonant(chars[0])
            && matches!(chars[1], BANTOC | KAKABAT | AHSDA)
        {
            if let Some(prev) = out.pop() {
                out.push(prev + &seg);
            } else {
                out.push(seg);
            }
            continue;
        }

        if chars.len() == 3 && is_consonant(chars[0]) && chars[1] == VOWEL_I && chars[2] == SIGN_TOE {
            if let Some(prev) = out.pop() {
                out.push(prev + &seg);
            } else {
                out.push(seg);
            }
            continue;
        }

        if chars.len() == 2 && is_consonant(chars[0]) && chars[1] == SAMYOK_SANNYA {
            if let Some(next) = iter.peek() {
                let merged = seg.clone() + next;
                iter.next();
                out.push(merged);
                continue;
            }
        }

        out.push(seg);
    }
    out
}

/// Pass 3 — consecutive unknown segments are concatenated into a single run;
/// separators and other known segments flush the buffer.
fn coalesce_unknowns(segments: Vec<String>, dict: &Dictionary) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    let mut buffer = String::new();

    for seg in segments {
        if is_known_segment(&seg, dict) {
            if !buffer.is_empty() {
                out.push(std::mem::take(&mut buffer));
            }
            out.push(seg);
        } else {
            buffer.push_str(&seg);
        }
    }
    if !buffer.is_empty() {
        out.push(buffer);
    }
    out
}

fn is_known_segment(seg: &str, dict: &Dictionary) -> bool {
    let chars: Vec<char> = seg.chars().collect();
    if chars.is_empty() {
        return false;
    }
    if is_digit(chars[0]) {
        return true;
    }
    if dict.contains(seg) {
        return true;
    }
    if chars.len() == 1 && is_valid_single_consonant(chars[0]) {
        return true;
    }
    if chars.len() == 1 && is_separator(chars[0]) {
        return true;
    }
    if chars.len() >= 2 && seg.contains('.') {
        return true;
    }
    false
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
    fn snap_folds_invalid_singleton_into_previous() {
        let (_f, dict) = dict_with(&["ម្រា"]);
        let raw = vec!["ស".to_string(), "ម្រា ប់".to_string(), "ការ".to_string()];
        // "ស" is a valid single consonant so it is NOT snapped here; verify a
        // genuinely invalid singleton (not consonant/vowel/digit/sep) does snap.
        let raw2 = vec!["ស".to_string(), "្".to_string()];
        let out = snap_invalid_singletons(raw2, &dict);
        assert_eq!(out, vec!["ស្".to_string()]);
        let _ = snap_invalid_singletons(raw, &dict);
    }

    #[test]
    fn merge_with_previous_bantoc() {
        let (_f, dict) = dict_with(&["dummy"]);
        let raw = vec!["word".to_string(), format!("\u{1780}{}", BANTOC)];
        let out = merge_diacritics(raw, &dict);
        assert_eq!(out, vec![format!("word\u{1780}{}", BANTOC)]);
    }

    #[test]
    fn merge_with_next_samyok_sannya() {
        let (_f, dict) = dict_with(&["dummy"]);
        let raw = vec![format!("\u{1780}{}", SAMYOK_SANNYA), "next".to_string()];
        let out = merge_diacritics(raw, &dict);
        assert_eq!(out, vec![format!("\u{1780}{}next", SAMYOK_SANNYA)]);
    }

    #[test]
    fn known_word_is_never_rewritten_by_pass2() {
        let word = format!("\u{1780}{}", BANTOC);
        let (_f, dict) = dict_with(&[&word]);
        let raw = vec!["prev".to_string(), word.clone()];
        let out = merge_diacritics(raw, &dict);
        assert_eq!(out, vec!["prev".to_string(), word]);
    }

    #[test]
    fn coalesce_merges_consecutive_unknowns_but_not_across_separator() {
        let (_f, dict) = dict_with(&["dummy"]);
        let raw = vec!["x".to_string(), "y".to_string(), " ".to_string(), "z".to_string()];
        let out = coalesce_unknowns(raw, &dict);
        assert_eq!(out, vec!["xy".to_string(), " ".to_string(), "z".to_string()]);
    }
}
