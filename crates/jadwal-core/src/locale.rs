// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "ar" | "arabic" => Some(Self::Ar),
            _ => None,
        }
    }

    pub const fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }
}

/// Flips horizontally oriented glyphs for right-to-left text. Vertical
/// glyphs such as sort arrows come back unchanged.
pub fn mirror_glyph(glyph: &'static str, direction: TextDirection) -> &'static str {
    if !direction.is_rtl() {
        return glyph;
    }
    match glyph {
        "‹" => "›",
        "›" => "‹",
        "←" => "→",
        "→" => "←",
        "◀" => "▶",
        "▶" => "◀",
        "«" => "»",
        "»" => "«",
        other => other,
    }
}

/// A label with an English value and an optional Arabic translation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub ar: Option<String>,
}

impl Localized {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: None,
        }
    }

    pub fn bilingual(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: Some(ar.into()),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match (locale, &self.ar) {
            (Locale::Ar, Some(ar)) => ar,
            _ => &self.en,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Locale, Localized, TextDirection, mirror_glyph};

    #[test]
    fn locale_parse_accepts_codes_and_names() {
        assert_eq!(Locale::parse("ar"), Some(Locale::Ar));
        assert_eq!(Locale::parse(" English "), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Locale::Ar.direction(), TextDirection::Rtl);
        assert!(!Locale::En.direction().is_rtl());
        assert_eq!(Locale::En.toggled(), Locale::Ar);
    }

    #[test]
    fn mirroring_only_flips_horizontal_glyphs() {
        assert_eq!(mirror_glyph("‹", TextDirection::Rtl), "›");
        assert_eq!(mirror_glyph("‹", TextDirection::Ltr), "‹");
        assert_eq!(mirror_glyph("↑", TextDirection::Rtl), "↑");
    }

    #[test]
    fn localized_falls_back_to_english() {
        let only_en = Localized::new("Search...");
        assert_eq!(only_en.get(Locale::Ar), "Search...");

        let both = Localized::bilingual("Search...", "بحث...");
        assert_eq!(both.get(Locale::Ar), "بحث...");
        assert_eq!(both.get(Locale::En), "Search...");
    }
}
