//! The translation boundary.
//!
//! Newly discovered values for non-default languages are offered to a
//! [`Translator`] before being stored. Translation is best-effort: any
//! error or empty response falls back to the untranslated value and the
//! run continues. HTTP-backed implementations live outside this crate.

use crate::error::Error;

/// Translates a single value between two language codes.
pub trait Translator {
    fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, Error>;
}

/// The identity translator: every language receives the source value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, text: &str, _from: &str, _to: &str) -> Result<String, Error> {
        Ok(text.to_string())
    }
}

/// Applies `translator` and falls back to `value` on error or an empty
/// response.
pub fn translate_or_fallback(
    translator: &dyn Translator,
    value: &str,
    from: &str,
    to: &str,
) -> String {
    match translator.translate(value, from, to) {
        Ok(translated) if !translated.is_empty() => translated,
        _ => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str, _from: &str, _to: &str) -> Result<String, Error> {
            Err(Error::Translation("service unavailable".to_string()))
        }
    }

    struct EmptyTranslator;

    impl Translator for EmptyTranslator {
        fn translate(&self, _text: &str, _from: &str, _to: &str) -> Result<String, Error> {
            Ok(String::new())
        }
    }

    struct UppercaseTranslator;

    impl Translator for UppercaseTranslator {
        fn translate(&self, text: &str, _from: &str, _to: &str) -> Result<String, Error> {
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn test_no_translation_is_identity() {
        assert_eq!(translate_or_fallback(&NoTranslation, "Hi", "en", "fr"), "Hi");
    }

    #[test]
    fn test_error_falls_back_to_source_value() {
        assert_eq!(
            translate_or_fallback(&FailingTranslator, "Hi", "en", "fr"),
            "Hi"
        );
    }

    #[test]
    fn test_empty_response_falls_back_to_source_value() {
        assert_eq!(
            translate_or_fallback(&EmptyTranslator, "Hi", "en", "fr"),
            "Hi"
        );
    }

    #[test]
    fn test_successful_translation_is_used() {
        assert_eq!(
            translate_or_fallback(&UppercaseTranslator, "Hi", "en", "fr"),
            "HI"
        );
    }
}
