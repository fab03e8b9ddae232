// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Search box and pagination bar shown around the table body. Both only
//! describe what to draw; filtering and slicing rows is up to the caller.

use crate::locale::{Locale, Localized, TextDirection, mirror_glyph};

const MAX_PAGE_LINKS: usize = 5;
const PREVIOUS_GLYPH: &str = "‹";
const NEXT_GLYPH: &str = "›";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub enabled: bool,
    pub value: String,
    pub placeholder: Localized,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            value: String::new(),
            placeholder: Localized::bilingual("Search...", "بحث..."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub value: String,
    pub placeholder: String,
    pub clearable: bool,
    pub enabled: bool,
}

impl SearchOptions {
    pub fn view(&self, locale: Locale, loading: bool) -> Option<SearchView> {
        if !self.enabled {
            return None;
        }
        Some(SearchView {
            value: self.value.clone(),
            placeholder: self.placeholder.get(locale).to_owned(),
            clearable: !self.value.is_empty(),
            enabled: !loading,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationOptions {
    pub enabled: bool,
    /// One-based.
    pub current_page: usize,
    pub total_pages: usize,
    pub previous_label: Localized,
    pub next_label: Localized,
    /// Overrides the default "Page {current} of {total}" label.
    pub page_label: Option<String>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            current_page: 1,
            total_pages: 1,
            previous_label: Localized::bilingual("Previous", "السابق"),
            next_label: Localized::bilingual("Next", "التالي"),
            page_label: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub total_pages: usize,
    pub label: String,
    pub previous: NavButton,
    pub next: NavButton,
    pub pages: Vec<PageItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub glyph: &'static str,
    pub enabled: bool,
}

impl PaginationOptions {
    /// Hidden while loading, when disabled, or when everything fits on one page.
    pub fn view(&self, locale: Locale, loading: bool) -> Option<PaginationView> {
        if !self.enabled || loading || self.total_pages <= 1 {
            return None;
        }
        let total = self.total_pages;
        let current = self.current_page.clamp(1, total);
        let direction = locale.direction();
        let label = match &self.page_label {
            Some(label) => label.clone(),
            None => default_page_label(locale, current, total),
        };

        Some(PaginationView {
            current_page: current,
            total_pages: total,
            label,
            previous: NavButton {
                label: self.previous_label.get(locale).to_owned(),
                glyph: mirror_glyph(PREVIOUS_GLYPH, direction),
                enabled: current > 1,
            },
            next: NavButton {
                label: self.next_label.get(locale).to_owned(),
                glyph: mirror_glyph(NEXT_GLYPH, direction),
                enabled: current < total,
            },
            pages: page_window(current, total),
        })
    }
}

fn default_page_label(locale: Locale, current: usize, total: usize) -> String {
    match locale {
        Locale::En => format!("Page {current} of {total}"),
        Locale::Ar => format!("صفحة {current} من {total}"),
    }
}

/// Page links to show: every page when there are few, otherwise the first
/// and last pages plus the current page's neighbours, with gaps elided.
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    if total <= MAX_PAGE_LINKS {
        return (1..=total).map(PageItem::Page).collect();
    }

    let current = current.clamp(1, total);
    let mut pages = vec![PageItem::Page(1)];
    if current > 3 {
        pages.push(PageItem::Ellipsis);
    }
    let start = current.saturating_sub(1).max(2);
    let end = (current + 1).min(total - 1);
    pages.extend((start..=end).map(PageItem::Page));
    if current + 2 < total {
        pages.push(PageItem::Ellipsis);
    }
    pages.push(PageItem::Page(total));
    pages
}

/// Which side the previous/next buttons sit on, physically.
pub fn nav_order(direction: TextDirection) -> [NavSlot; 2] {
    match direction {
        TextDirection::Ltr => [NavSlot::Previous, NavSlot::Next],
        TextDirection::Rtl => [NavSlot::Next, NavSlot::Previous],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSlot {
    Previous,
    Next,
}
