//! Languages offered for selection.
//!
//! The remote pipeline supports more languages than this; the table is
//! the curated set presented to users and used as the fallback answer
//! when discovery metadata lists none.

/// A selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code sent on the wire.
    pub code: &'static str,
    /// English name.
    pub name: &'static str,
    /// Name in the language's own script.
    pub native: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "hi", name: "Hindi", native: "हिंदी" },
    Language { code: "en", name: "English", native: "English" },
    Language { code: "bn", name: "Bengali", native: "বাংলা" },
    Language { code: "te", name: "Telugu", native: "తెలుగు" },
    Language { code: "mr", name: "Marathi", native: "मराठी" },
    Language { code: "ta", name: "Tamil", native: "தமிழ்" },
    Language { code: "gu", name: "Gujarati", native: "ગુજરાતી" },
    Language { code: "kn", name: "Kannada", native: "ಕನ್ನಡ" },
    Language { code: "ml", name: "Malayalam", native: "മലയാളം" },
    Language { code: "pa", name: "Punjabi", native: "ਪੰਜਾਬੀ" },
];

/// Look up a language by code (case-insensitive).
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    SUPPORTED_LANGUAGES
        .iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}

/// Comma-separated English names, e.g. for help text.
pub fn language_names() -> String {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|l| l.name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_languages_with_unique_codes() {
        assert_eq!(SUPPORTED_LANGUAGES.len(), 10);
        let mut codes: Vec<_> = SUPPORTED_LANGUAGES.iter().map(|l| l.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 10);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find_language("TA").map(|l| l.name), Some("Tamil"));
        assert_eq!(find_language(" hi ").map(|l| l.native), Some("हिंदी"));
        assert!(find_language("fr").is_none());
    }

    #[test]
    fn names_start_with_hindi() {
        assert!(language_names().starts_with("Hindi, English, Bengali"));
    }
}
