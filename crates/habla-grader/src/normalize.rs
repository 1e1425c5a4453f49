use unicode_normalization::UnicodeNormalization;

/// Spanish definite and indefinite articles stripped from the start of an
/// answer before comparison.
const ARTICLES: [&str; 8] = ["el", "la", "los", "las", "un", "una", "unos", "unas"];

/// Lowercase and trim surrounding whitespace.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Remove one leading article token followed by whitespace.
///
/// Only a *leading* article is stripped; articles elsewhere in the string are
/// left alone. Input is expected to be lowercased already.
pub fn strip_leading_article(s: &str) -> &str {
    if let Some((first, rest)) = s.split_once(char::is_whitespace) {
        if ARTICLES.contains(&first) {
            return rest.trim_start();
        }
    }
    s
}

/// Drop accents: NFD-decompose and remove combining diacritical marks
/// (U+0300–U+036F), so "célula" and "celula" compare equal.
pub fn fold_accents(s: &str) -> String {
    s.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect()
}
