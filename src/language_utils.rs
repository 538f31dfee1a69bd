use isolang::Language;

/// Language utilities for prompt parametrization
///
/// The translation prompt wants human-readable language names ("Arabic",
/// "English"); configuration may carry ISO 639-1/639-3 codes or names.
/// Resolution is best-effort: an unrecognized value is passed through
/// unchanged, since the language tag is opaque to the rest of the system.
/// Resolve a language code or name to its English display name
pub fn display_name(language: &str) -> String {
    let trimmed = language.trim();
    let lower = trimmed.to_lowercase();

    if lower.len() == 2 {
        if let Some(lang) = Language::from_639_1(&lower) {
            return lang.to_name().to_string();
        }
    }

    if lower.len() == 3 {
        if let Some(lang) = Language::from_639_3(&lower) {
            return lang.to_name().to_string();
        }
    }

    if let Some(lang) = Language::from_name(trimmed) {
        return lang.to_name().to_string();
    }

    trimmed.to_string()
}

/// Whether a language code or name resolves to a known language
pub fn is_known_language(language: &str) -> bool {
    let trimmed = language.trim();
    let lower = trimmed.to_lowercase();

    (lower.len() == 2 && Language::from_639_1(&lower).is_some())
        || (lower.len() == 3 && Language::from_639_3(&lower).is_some())
        || Language::from_name(trimmed).is_some()
}
