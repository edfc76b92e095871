/// Punctuation replaced by a single space, including the Hebrew maqaf,
/// gershayim and geresh.
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '"', '\'', '(', ')', '-', '\u{2013}', '\u{2014}', '!', '?', '[', ']',
    '{', '}', '<', '>', '/', '\\', '\u{05BE}', '\u{05F4}', '\u{05F3}',
];

/// Cantillation marks and vowel points (U+0591..=U+05C7, excluding the maqaf)
fn is_pointing_mark(c: char) -> bool {
    matches!(c, '\u{0591}'..='\u{05BD}' | '\u{05BF}'..='\u{05C7}')
}

/// Map word-final letter forms to their base letter
fn base_letter(c: char) -> char {
    match c {
        'ך' => 'כ',
        'ם' => 'מ',
        'ן' => 'נ',
        'ף' => 'פ',
        'ץ' => 'צ',
        other => other,
    }
}

/// Canonicalize a raw word or phrase into a comparable form.
///
/// Strips pointing, folds final letters, turns punctuation into spaces,
/// collapses whitespace runs and trims. Idempotent.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if is_pointing_mark(c) {
            continue;
        }
        let c = base_letter(c);
        if c.is_whitespace() || PUNCTUATION.contains(&c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// Normalize and split into tokens
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Length in code points, the unit the minimum-length threshold is measured in
pub fn token_len(token: &str) -> usize {
    token.chars().count()
}
