//! Raw token to [`OptionValue`] coercion.
//!
//! Priority is fixed: boolean keyword, then base-10 integer, then comma list,
//! then plain string. List elements are never coerced further, so `"4,0"`
//! stays `["4", "0"]`.

use crate::model::OptionValue;

/// Which tokens count as booleans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolVocabulary {
    /// `true` / `false` only (properties dialect).
    Literal,
    /// Adds `yes/no`, `on/off`, `enabled/disabled` (INI and YAML dialects).
    Keywords,
    /// [`BoolVocabulary::Keywords`] plus `1` / `0`. Only for keys that are known flags.
    KeywordsAndDigits,
}

impl BoolVocabulary {
    /// Match a whole token, case-insensitively.
    pub fn matches(self, token: &str) -> Option<bool> {
        let lower = token.trim().to_ascii_lowercase();
        match (self, lower.as_str()) {
            (_, "true") => Some(true),
            (_, "false") => Some(false),
            (BoolVocabulary::Literal, _) => None,
            (_, "yes" | "on" | "enabled") => Some(true),
            (_, "no" | "off" | "disabled") => Some(false),
            (BoolVocabulary::KeywordsAndDigits, "1") => Some(true),
            (BoolVocabulary::KeywordsAndDigits, "0") => Some(false),
            _ => None,
        }
    }
}

/// Coerce a raw token under the given boolean vocabulary.
pub fn coerce(raw: &str, vocabulary: BoolVocabulary) -> OptionValue {
    let token = raw.trim();

    if let Some(b) = vocabulary.matches(token) {
        return OptionValue::Bool(b);
    }

    if let Ok(n) = token.parse::<i64>() {
        return OptionValue::Int(n);
    }

    if token.contains(',') {
        return OptionValue::List(token.split(',').map(|p| p.trim().to_string()).collect());
    }

    OptionValue::Str(token.to_string())
}

/// Interpret a value on a dedicated flag key. Unrecognised tokens read as `false`.
pub fn parse_flag(raw: &str, vocabulary: BoolVocabulary) -> bool {
    vocabulary.matches(raw).unwrap_or(false)
}

/// Parse a port-like integer; anything that is not a base-10 integer yields `None`.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::{coerce, parse_flag, BoolVocabulary};
    use crate::model::OptionValue;

    fn list(items: &[&str]) -> OptionValue {
        OptionValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn comma_token_becomes_string_list_not_integers() {
        assert_eq!(coerce("4,0", BoolVocabulary::Literal), list(&["4", "0"]));
        assert_eq!(
            coerce(" a , b,c ", BoolVocabulary::Keywords),
            list(&["a", "b", "c"])
        );
    }

    #[test]
    fn single_number_is_integer_not_list() {
        assert_eq!(coerce("7", BoolVocabulary::Literal), OptionValue::Int(7));
        assert_eq!(coerce("-3", BoolVocabulary::Keywords), OptionValue::Int(-3));
    }

    #[test]
    fn properties_vocabulary_only_knows_true_false() {
        assert_eq!(coerce("TRUE", BoolVocabulary::Literal), OptionValue::Bool(true));
        assert_eq!(coerce("yes", BoolVocabulary::Literal), OptionValue::from("yes"));
        assert_eq!(coerce("1", BoolVocabulary::Literal), OptionValue::Int(1));
    }

    #[test]
    fn keyword_vocabulary_accepts_switch_words() {
        for word in ["yes", "On", "ENABLED"] {
            assert_eq!(coerce(word, BoolVocabulary::Keywords), OptionValue::Bool(true));
        }
        for word in ["no", "off", "Disabled"] {
            assert_eq!(coerce(word, BoolVocabulary::Keywords), OptionValue::Bool(false));
        }
    }

    #[test]
    fn digits_are_boolean_only_when_requested() {
        assert_eq!(coerce("1", BoolVocabulary::Keywords), OptionValue::Int(1));
        assert_eq!(
            coerce("0", BoolVocabulary::KeywordsAndDigits),
            OptionValue::Bool(false)
        );
        assert!(parse_flag("1", BoolVocabulary::KeywordsAndDigits));
        assert!(!parse_flag("1", BoolVocabulary::Keywords));
        assert!(!parse_flag("maybe", BoolVocabulary::KeywordsAndDigits));
    }

    #[test]
    fn plain_tokens_are_trimmed_strings() {
        assert_eq!(
            coerce("  example.i2p ", BoolVocabulary::Literal),
            OptionValue::from("example.i2p")
        );
    }
}
