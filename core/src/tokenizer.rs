use unicode_general_category::{get_general_category, GeneralCategory};

/// Letters (any `L*` category) and decimal digits (`Nd`).
fn is_letter_or_digit(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
    )
}

/// Map a raw token to its index key.
///
/// The token is lowercased, then characters that are neither letters nor
/// decimal digits are trimmed from both ends. Interior characters are kept.
/// Trimming must follow lowercasing, which can end a token in a combining
/// mark (`İ` → `i\u{307}`).
/// A token made only of punctuation becomes the empty key, which is indexed
/// like any other word.
pub fn normalize(token: &str) -> String {
    token
        .to_lowercase()
        .trim_matches(|c: char| !is_letter_or_digit(c))
        .to_string()
}

/// Split text on runs of whitespace and normalize every token, in order.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(normalize)
}
