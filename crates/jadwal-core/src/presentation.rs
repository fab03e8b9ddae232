// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::column::{Alignment, ColumnId, ColumnSet, ColumnWidth, RenderedCell};
use crate::locale::{Locale, TextDirection, mirror_glyph};
use crate::sort::{SortDescriptor, SortDirection};

/// Placeholder rows or cards drawn while data loads.
pub const LOADING_PLACEHOLDERS: usize = 5;

/// Viewport class, decided by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Compact,
    #[default]
    Regular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationPreference {
    #[default]
    Auto,
    Table,
    Cards,
}

impl PresentationPreference {
    pub const ALL: [Self; 3] = [Self::Auto, Self::Table, Self::Cards];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::Auto),
            "table" => Some(Self::Table),
            "cards" => Some(Self::Cards),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|preference| *preference == self)
            .unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presentation {
    Table,
    Cards,
}

impl Presentation {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }
}

/// Forced preferences win; `Auto` shows cards on compact viewports.
pub fn select_presentation(viewport: Viewport, preference: PresentationPreference) -> Presentation {
    match (preference, viewport) {
        (PresentationPreference::Table, _) => Presentation::Table,
        (PresentationPreference::Cards, _) => Presentation::Cards,
        (PresentationPreference::Auto, Viewport::Compact) => Presentation::Cards,
        (PresentationPreference::Auto, Viewport::Regular) => Presentation::Table,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortIndicator {
    Inactive,
    Ascending,
    Descending,
}

impl SortIndicator {
    pub fn for_column(descriptor: &SortDescriptor, column: &str) -> Self {
        match descriptor.direction_for(column) {
            Some(SortDirection::Asc) => Self::Ascending,
            Some(SortDirection::Desc) => Self::Descending,
            None => Self::Inactive,
        }
    }

    pub fn is_active(self) -> bool {
        !matches!(self, Self::Inactive)
    }

    pub fn glyph(self, direction: TextDirection) -> &'static str {
        let glyph = match self {
            Self::Inactive => "⇅",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        };
        mirror_glyph(glyph, direction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortAffordance {
    /// Not sortable, or nobody listens for sort requests.
    Static,
    Actionable(SortIndicator),
    /// Sortable but temporarily inert, e.g. while loading.
    Disabled(SortIndicator),
}

impl SortAffordance {
    pub fn indicator(self) -> Option<SortIndicator> {
        match self {
            Self::Static => None,
            Self::Actionable(indicator) | Self::Disabled(indicator) => Some(indicator),
        }
    }

    pub fn is_actionable(self) -> bool {
        matches!(self, Self::Actionable(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    pub id: ColumnId,
    pub label: String,
    pub alignment: Alignment,
    pub width: Option<ColumnWidth>,
    pub sort: SortAffordance,
}

/// One toggle of the card-mode sort bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortControl {
    pub id: ColumnId,
    pub label: String,
    pub indicator: SortIndicator,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub cells: Vec<RenderedCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardField {
    pub id: ColumnId,
    pub label: String,
    pub value: RenderedCell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub fields: Vec<CardField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewBody {
    Loading { placeholders: usize, columns: usize },
    Empty { message: String },
    Rows(Vec<RowView>),
    Cards(Vec<CardView>),
}

impl ViewBody {
    pub fn len(&self) -> usize {
        match self {
            Self::Loading { placeholders, .. } => *placeholders,
            Self::Empty { .. } => 0,
            Self::Rows(rows) => rows.len(),
            Self::Cards(cards) => cards.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inputs shared by both strategies when laying out one frame.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub descriptor: &'a SortDescriptor,
    pub locale: Locale,
    pub interactive: bool,
    pub loading: bool,
    pub card_sorting: bool,
}

impl LayoutContext<'_> {
    fn affordance<T>(&self, columns: &ColumnSet<T>, column: &str) -> SortAffordance {
        if !self.interactive || !columns.is_sortable(column) {
            return SortAffordance::Static;
        }
        let indicator = SortIndicator::for_column(self.descriptor, column);
        if self.loading {
            SortAffordance::Disabled(indicator)
        } else {
            SortAffordance::Actionable(indicator)
        }
    }
}

pub fn header_views<T>(columns: &ColumnSet<T>, context: &LayoutContext<'_>) -> Vec<HeaderView> {
    columns
        .iter()
        .map(|column| HeaderView {
            id: column.id().clone(),
            label: column.label(context.locale).to_owned(),
            alignment: column.alignment(),
            width: column.width_hint(),
            sort: context.affordance(columns, column.id().as_str()),
        })
        .collect()
}

/// Sort bar above the cards: one toggle per sortable column, driving the
/// same requests as table headers do.
pub fn sort_controls<T>(columns: &ColumnSet<T>, context: &LayoutContext<'_>) -> Vec<SortControl> {
    if !context.card_sorting || !context.interactive {
        return Vec::new();
    }
    columns
        .sortable()
        .map(|column| SortControl {
            id: column.id().clone(),
            label: column.label(context.locale).to_owned(),
            indicator: SortIndicator::for_column(context.descriptor, column.id().as_str()),
            enabled: !context.loading,
        })
        .collect()
}

pub fn table_rows<T>(columns: &ColumnSet<T>, rows: &[&T]) -> Vec<RowView> {
    rows.iter()
        .map(|row| RowView {
            cells: columns.iter().map(|column| column.render(row)).collect(),
        })
        .collect()
}

pub fn cards<T>(columns: &ColumnSet<T>, rows: &[&T], locale: Locale) -> Vec<CardView> {
    rows.iter()
        .map(|row| CardView {
            fields: columns
                .iter()
                .map(|column| CardField {
                    id: column.id().clone(),
                    label: column.label(locale).to_owned(),
                    value: column.render(row),
                })
                .collect(),
        })
        .collect()
}
