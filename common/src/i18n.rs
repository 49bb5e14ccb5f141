//! Arabic/English string selection.
//!
//! Every user-facing text is stored as an `{ar, en}` pair and resolved
//! through [`Bilingual::resolve`], so pages never branch on the language
//! themselves.

use serde::{Deserialize, Serialize};

/// Display language. Arabic is the site's primary language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Ar,
    En,
}

impl Lang {
    pub fn toggle(self) -> Self {
        match self {
            Self::Ar => Self::En,
            Self::En => Self::Ar,
        }
    }

    /// BCP-47 code used for the `lang` attribute.
    pub fn code(self) -> &'static str {
        match self {
            Self::Ar => "ar",
            Self::En => "en",
        }
    }

    /// Text direction used for the `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Self::Ar => "rtl",
            Self::En => "ltr",
        }
    }

    /// Parse a language code, case-insensitively. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "ar" => Some(Self::Ar),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// A value available in both languages.
///
/// `T` is `String` for content rows and `&'static str` for static copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bilingual<T = String> {
    pub ar: T,
    pub en: T,
}

impl<T> Bilingual<T> {
    pub const fn new(ar: T, en: T) -> Self {
        Self { ar, en }
    }
}

impl<'a> Bilingual<&'a str> {
    /// Pick the text for `lang`. An empty translation falls back to the
    /// other language so a half-filled row still renders something.
    pub fn pick(self, lang: Lang) -> &'a str {
        let (primary, fallback) = match lang {
            Lang::Ar => (self.ar, self.en),
            Lang::En => (self.en, self.ar),
        };
        if primary.trim().is_empty() {
            fallback
        } else {
            primary
        }
    }
}

impl<T: AsRef<str>> Bilingual<T> {
    /// Borrowing form of [`Bilingual::pick`].
    pub fn resolve(&self, lang: Lang) -> &str {
        Bilingual::new(self.ar.as_ref(), self.en.as_ref()).pick(lang)
    }

    pub fn as_deref(&self) -> Bilingual<&str> {
        Bilingual::new(self.ar.as_ref(), self.en.as_ref())
    }

    /// Both sides empty (after trimming).
    pub fn is_blank(&self) -> bool {
        self.ar.as_ref().trim().is_empty() && self.en.as_ref().trim().is_empty()
    }
}

impl Bilingual<String> {
    /// Build from two optional columns, treating `None` as empty.
    pub fn from_options(ar: Option<&str>, en: Option<&str>) -> Self {
        Self {
            ar: ar.unwrap_or_default().to_string(),
            en: en.unwrap_or_default().to_string(),
        }
    }
}

impl From<Bilingual<&str>> for Bilingual<String> {
    fn from(b: Bilingual<&str>) -> Self {
        Self {
            ar: b.ar.to_string(),
            en: b.en.to_string(),
        }
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_picks_language() {
        let title = Bilingual::new("تصوير", "Photography");
        assert_eq!(title.resolve(Lang::Ar), "تصوير");
        assert_eq!(title.resolve(Lang::En), "Photography");
        let owned: Bilingual = title.into();
        assert_eq!(owned.as_deref().pick(Lang::Ar), "تصوير");
    }

    #[test]
    fn test_resolve_falls_back_when_empty() {
        let title = Bilingual::new("مونتاج".to_string(), "  ".to_string());
        assert_eq!(title.resolve(Lang::En), "مونتاج");
        assert!(!title.is_blank());
        assert!(Bilingual::from_options(None, Some("")).is_blank());
    }

    #[test]
    fn test_lang_helpers() {
        assert_eq!(Lang::default(), Lang::Ar);
        assert_eq!(Lang::Ar.toggle(), Lang::En);
        assert_eq!(Lang::En.dir(), "ltr");
        assert_eq!(Lang::from_code(" EN "), Some(Lang::En));
        assert_eq!(Lang::from_code("fr"), None);
    }
}
