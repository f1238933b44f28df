//! Character classification over Khmer code points.
//!
//! Every function here takes a single `char` and returns a boolean or small
//! integer; nothing here looks at neighbouring characters. Cluster-level
//! rules that need lookahead live in [`crate::scan`].

/// The 23 single characters the dictionary is allowed to carry as one-character
/// entries: the 21 consonants with no independent-vowel counterpart plus the
/// "standalone" independent vowels that also function as content words.
pub const VALID_SINGLE_CHARS: [char; 23] = [
    '\u{1780}', '\u{1781}', '\u{1782}', '\u{1784}', '\u{1785}', '\u{1786}', '\u{1789}',
    '\u{178A}', '\u{178F}', '\u{1791}', '\u{1796}', '\u{179A}', '\u{179B}', '\u{179F}',
    '\u{17A1}', '\u{17AC}', '\u{17AE}', '\u{17AA}', '\u{17AF}', '\u{17B1}', '\u{17A6}',
    '\u{17A7}', '\u{17B3}',
];
// ក ខ គ ង ច ឆ ញ ដ ត ទ ព រ ល ស ឡ ឬ ឮ ឪ ឯ ឱ ឦ ឧ ឳ

pub fn is_consonant(c: char) -> bool {
    ('\u{1780}'..='\u{17A2}').contains(&c)
}

pub fn is_independent_vowel(c: char) -> bool {
    ('\u{17A3}'..='\u{17B3}').contains(&c)
}

/// A consonant or an independent vowel: the only characters that may open a cluster.
pub fn is_cluster_starter(c: char) -> bool {
    is_consonant(c) || is_independent_vowel(c)
}

pub fn is_dependent_vowel(c: char) -> bool {
    ('\u{17B6}'..='\u{17C5}').contains(&c)
}

pub fn is_sign(c: char) -> bool {
    ('\u{17C6}'..='\u{17D1}').contains(&c) || c == '\u{17D3}' || c == '\u{17DD}'
}

pub fn is_coeng(c: char) -> bool {
    c == '\u{17D2}'
}

pub fn is_khmer_char(c: char) -> bool {
    ('\u{1780}'..='\u{17FF}').contains(&c) || ('\u{19E0}'..='\u{19FF}').contains(&c)
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('\u{17E0}'..='\u{17E9}').contains(&c)
}

pub fn is_separator(c: char) -> bool {
    if ('\u{17D4}'..='\u{17DA}').contains(&c) {
        return true;
    }
    matches!(
        c,
        '!' | '?'
            | '.'
            | ','
            | ';'
            | ':'
            | '"'
            | '\''
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '-'
            | ' '
            | '\u{00AB}'
            | '\u{00BB}'
            | '\u{201C}'
            | '\u{201D}'
            | '\u{02DD}'
    )
}

pub fn is_valid_single_consonant(c: char) -> bool {
    VALID_SINGLE_CHARS.contains(&c)
}
