// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use time::Date;

use crate::error::ConfigError;
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ColumnId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ColumnId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ColumnId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Logical alignment: `Start` is the leading edge in the active text direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Sizing hint passed through to the renderer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnWidth {
    /// Fixed width in terminal cells.
    Fixed(u16),
    /// Share of the remaining width, by weight.
    Flex(u16),
    Percent(u16),
}

/// Display value extracted from a row by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    Date(Date),
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(value) => value.clone(),
            Self::Integer(value) => value.to_string(),
            Self::Decimal(value) => value.to_string(),
            Self::Bool(value) => value.to_string(),
            Self::Date(value) => value.to_string(),
        }
    }

    /// True when the accessor could not resolve a value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Date> for CellValue {
    fn from(value: Date) -> Self {
        Self::Date(value)
    }
}

impl<V: Into<CellValue>> From<Option<V>> for CellValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeVariant {
    Default,
    Secondary,
    Outline,
}

/// Emphasis hint for a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellTone {
    #[default]
    Plain,
    Strong,
    Muted,
    Badge(BadgeVariant),
}

/// Renderable node produced for one cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedCell {
    pub text: String,
    pub tone: CellTone,
}

impl RenderedCell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Plain,
        }
    }

    pub fn strong(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Strong,
        }
    }

    pub fn muted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Muted,
        }
    }

    pub fn badge(text: impl Into<String>, variant: BadgeVariant) -> Self {
        Self {
            text: text.into(),
            tone: CellTone::Badge(variant),
        }
    }
}

type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;
type Renderer<T> = Arc<dyn Fn(&T) -> RenderedCell + Send + Sync>;

/// Describes how one logical column reads, labels, renders and sorts a row of `T`.
///
/// ```
/// use jadwal_core::{Alignment, Column};
///
/// struct Member {
///     name: String,
///     age: u32,
/// }
///
/// let name = Column::new("name", "Name")
///     .header_localized("الاسم")
///     .accessor(|member: &Member| member.name.clone())
///     .sortable(true);
/// let age = Column::new("age", "Age")
///     .accessor(|member: &Member| member.age)
///     .align(Alignment::End);
///
/// let member = Member { name: "Layla".to_owned(), age: 31 };
/// assert_eq!(name.render(&member).text, "Layla");
/// assert_eq!(age.render(&member).text, "31");
/// ```
pub struct Column<T> {
    id: ColumnId,
    header: String,
    header_localized: Option<String>,
    accessor: Option<Accessor<T>>,
    renderer: Option<Renderer<T>>,
    sortable: bool,
    alignment: Alignment,
    width: Option<ColumnWidth>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            header_localized: self.header_localized.clone(),
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
            sortable: self.sortable,
            alignment: self.alignment,
            width: self.width,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("header_localized", &self.header_localized)
            .field("accessor", &self.accessor.is_some())
            .field("renderer", &self.renderer.is_some())
            .field("sortable", &self.sortable)
            .field("alignment", &self.alignment)
            .field("width", &self.width)
            .finish()
    }
}

impl<T: 'static> Column<T> {
    pub fn new(id: impl Into<ColumnId>, header: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            header_localized: None,
            accessor: None,
            renderer: None,
            sortable: false,
            alignment: Alignment::Start,
            width: None,
        }
    }

    pub fn header_localized(mut self, label: impl Into<String>) -> Self {
        self.header_localized = Some(label.into());
        self
    }

    pub fn accessor<V, F>(mut self, accessor: F) -> Self
    where
        V: Into<CellValue> + 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(move |row: &T| accessor(row).into()));
        self
    }

    pub fn renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T) -> RenderedCell + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = Some(width);
        self
    }
}

impl<T> Column<T> {
    pub fn id(&self) -> &ColumnId {
        &self.id
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// Header text for `locale`; Arabic uses the localized label when one is set.
    pub fn label(&self, locale: Locale) -> &str {
        match (locale, &self.header_localized) {
            (Locale::Ar, Some(localized)) => localized,
            _ => &self.header,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn width_hint(&self) -> Option<ColumnWidth> {
        self.width
    }

    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => CellValue::Empty,
        }
    }

    pub fn render(&self, row: &T) -> RenderedCell {
        match &self.renderer {
            Some(renderer) => renderer(row),
            None => RenderedCell::plain(self.value(row).display()),
        }
    }
}

/// A validated, ordered set of columns with unique ids.
pub struct ColumnSet<T> {
    columns: Vec<Column<T>>,
}

impl<T> Clone for ColumnSet<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}

impl<T> ColumnSet<T> {
    pub fn new(columns: Vec<Column<T>>) -> Result<Self, ConfigError> {
        validate_columns(&columns)?;
        Ok(Self { columns })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column<T>> {
        self.columns.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|column| column.id == id)
    }

    pub fn is_sortable(&self, id: &str) -> bool {
        self.get(id).is_some_and(Column::is_sortable)
    }

    pub fn sortable(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter().filter(|column| column.sortable)
    }

    pub fn has_sortable(&self) -> bool {
        self.columns.iter().any(Column::is_sortable)
    }
}

fn validate_columns<T>(columns: &[Column<T>]) -> Result<(), ConfigError> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for (position, column) in columns.iter().enumerate() {
        let id = column.id.as_str();
        if id.trim().is_empty() {
            return Err(ConfigError::EmptyColumnId { position });
        }
        if let Some(first) = seen.insert(id, position) {
            return Err(ConfigError::DuplicateColumnId {
                id: id.to_owned(),
                first,
                second: position,
            });
        }
        if column.sortable && column.accessor.is_none() {
            return Err(ConfigError::SortableWithoutAccessor { id: id.to_owned() });
        }
    }
    Ok(())
}

impl<'a, T> IntoIterator for &'a ColumnSet<T> {
    type Item = &'a Column<T>;
    type IntoIter = std::slice::Iter<'a, Column<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
