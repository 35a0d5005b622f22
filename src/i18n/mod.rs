//! Locale selection and message lookup.
//!
//! SYSTEM CONTEXT
//! ==============
//! Menu entries and notifications carry dotted message keys
//! (`navigation.users`). [`t`] resolves a key in the active locale, then in
//! en-US, then returns the key itself so a missing translation is visible
//! but never fatal.

mod en_us;
mod id_id;

/// Supported UI locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    EnUs,
    IdId,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::EnUs, Self::IdId];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::IdId => "id-ID",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::EnUs => "English",
            Self::IdId => "Bahasa Indonesia",
        }
    }

    /// Exact match on a supported locale code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// Pick a locale from a saved preference, then a language tag such as
    /// `id`, `id-ID` or `en-GB`. Falls back to en-US.
    #[must_use]
    pub fn detect(saved: Option<&str>, language_tag: Option<&str>) -> Self {
        if let Some(locale) = saved.and_then(Self::from_code) {
            return locale;
        }
        match language_tag {
            Some(tag) if tag.starts_with("id") => Self::IdId,
            _ => Self::EnUs,
        }
    }

    fn messages(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::EnUs => en_us::MESSAGES,
            Self::IdId => id_id::MESSAGES,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Translate `key` for `locale`.
#[must_use]
pub fn t(locale: Locale, key: &str) -> String {
    lookup(locale, key)
        .or_else(|| lookup(Locale::EnUs, key))
        .unwrap_or(key)
        .to_owned()
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    locale
        .messages()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

#[cfg(test)]
#[path = "i18n_test.rs"]
mod tests;
