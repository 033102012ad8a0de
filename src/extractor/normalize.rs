use unicode_normalization::UnicodeNormalization;

/// Canonicalizes an extracted string: Unicode NFKC normalization followed by
/// a surrounding-whitespace trim. Idempotent, so fields can be normalized
/// again without changing.
pub fn normalize(s: &str) -> String {
    s.nfkc().collect::<String>().trim().to_string()
}
