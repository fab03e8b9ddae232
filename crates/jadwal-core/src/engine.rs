// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::{debug, info, warn};

use crate::chrome::{PaginationOptions, PaginationView, SearchOptions, SearchView};
use crate::column::{Column, ColumnSet};
use crate::compare::sorted_rows;
use crate::error::ConfigError;
use crate::locale::{Locale, Localized, TextDirection};
use crate::presentation::{
    HeaderView, LOADING_PLACEHOLDERS, LayoutContext, Presentation, PresentationPreference,
    SortControl, ViewBody, Viewport, cards, header_views, select_presentation, sort_controls,
    table_rows,
};
use crate::sort::{ManagedSort, SortDescriptor, SortEvent, SortMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayHints {
    pub striped: bool,
    pub compact: bool,
}

/// Per-frame inputs the caller owns: locale, viewport class, flags and chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub locale: Locale,
    pub viewport: Viewport,
    pub preference: PresentationPreference,
    pub loading: bool,
    pub card_sorting: bool,
    pub empty_message: Localized,
    pub search: SearchOptions,
    pub pagination: PaginationOptions,
    pub hints: DisplayHints,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            viewport: Viewport::default(),
            preference: PresentationPreference::default(),
            loading: false,
            card_sorting: true,
            empty_message: Localized::bilingual("No results found", "لم يتم العثور على نتائج"),
            search: SearchOptions::default(),
            pagination: PaginationOptions::default(),
            hints: DisplayHints::default(),
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub presentation: Presentation,
    pub locale: Locale,
    pub direction: TextDirection,
    pub headers: Vec<HeaderView>,
    /// Only populated for card presentation.
    pub sort_controls: Vec<SortControl>,
    pub body: ViewBody,
    pub search: Option<SearchView>,
    pub pagination: Option<PaginationView>,
    pub hints: DisplayHints,
}

/// Columns, sort ownership and presentation options for one table.
#[derive(Debug, Clone)]
pub struct TableEngine<T> {
    columns: ColumnSet<T>,
    sort: SortMode,
    options: TableOptions,
}

impl<T> TableEngine<T> {
    pub fn new(
        columns: Vec<Column<T>>,
        sort: SortMode,
        options: TableOptions,
    ) -> Result<Self, ConfigError> {
        let columns = ColumnSet::new(columns)?;
        check_initial_sort(&columns, &sort)?;
        info!(
            columns = columns.len(),
            sortable = columns.sortable().count(),
            managed = sort.is_managed(),
            "table engine ready"
        );
        Ok(Self {
            columns,
            sort,
            options,
        })
    }

    pub fn columns(&self) -> &ColumnSet<T> {
        &self.columns
    }

    /// Replaces the column set. A managed descriptor pointing at a column that
    /// is gone or no longer sortable is cleared.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) -> Result<(), ConfigError> {
        self.columns = ColumnSet::new(columns)?;
        if let SortMode::Managed(managed) = &mut self.sort
            && let Some(column) = &managed.descriptor().column
            && !self.columns.is_sortable(column.as_str())
        {
            debug!(column = %column, "clearing sort on removed column");
            *managed = ManagedSort::new();
        }
        Ok(())
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut TableOptions {
        &mut self.options
    }

    pub fn mode(&self) -> &SortMode {
        &self.sort
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        self.sort.descriptor()
    }

    /// Feeds a caller-owned descriptor back in. Returns false in managed mode,
    /// where the engine keeps its own.
    pub fn set_descriptor(&mut self, descriptor: SortDescriptor) -> bool {
        let SortMode::Controlled(controlled) = &mut self.sort else {
            warn!("ignoring external sort descriptor: table manages its own sort");
            return false;
        };
        if let Some(column) = &descriptor.column
            && self.columns.get(column.as_str()).is_none()
        {
            warn!(column = %column, "sort descriptor names an unknown column");
        }
        controlled.set_descriptor(descriptor);
        true
    }

    /// Forwards a header or sort-control activation to the sort state machine.
    /// Ignored while loading.
    pub fn request_sort(&mut self, column: &str) -> Option<SortEvent> {
        if self.options.loading {
            debug!(column, "sort request ignored while loading");
            return None;
        }
        self.sort.request_sort(&self.columns, column)
    }

    pub fn presentation(&self) -> Presentation {
        select_presentation(self.options.viewport, self.options.preference)
    }

    /// Rows in display order: sorted when managed, as given when controlled.
    pub fn ordered<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        match &self.sort {
            SortMode::Managed(managed) => sorted_rows(
                rows,
                &self.columns,
                managed.descriptor(),
                self.options.locale,
            ),
            SortMode::Controlled(_) => rows.iter().collect(),
        }
    }

    pub fn view(&self, rows: &[T]) -> TableView {
        let options = &self.options;
        let presentation = self.presentation();
        let context = LayoutContext {
            descriptor: self.sort.descriptor(),
            locale: options.locale,
            interactive: self.sort.accepts_requests(),
            loading: options.loading,
            card_sorting: options.card_sorting,
        };

        let sort_controls = match presentation {
            Presentation::Cards => sort_controls(&self.columns, &context),
            Presentation::Table => Vec::new(),
        };

        let body = if options.loading {
            ViewBody::Loading {
                placeholders: LOADING_PLACEHOLDERS,
                columns: self.columns.len(),
            }
        } else if rows.is_empty() {
            ViewBody::Empty {
                message: options.empty_message.get(options.locale).to_owned(),
            }
        } else {
            let ordered = self.ordered(rows);
            match presentation {
                Presentation::Table => ViewBody::Rows(table_rows(&self.columns, &ordered)),
                Presentation::Cards => {
                    ViewBody::Cards(cards(&self.columns, &ordered, options.locale))
                }
            }
        };

        TableView {
            presentation,
            locale: options.locale,
            direction: options.locale.direction(),
            headers: header_views(&self.columns, &context),
            sort_controls,
            body,
            search: options.search.view(options.locale, options.loading),
            pagination: options.pagination.view(options.locale, options.loading),
            hints: options.hints,
        }
    }
}

fn check_initial_sort<T>(columns: &ColumnSet<T>, sort: &SortMode) -> Result<(), ConfigError> {
    let Some(column) = &sort.descriptor().column else {
        return Ok(());
    };
    match sort {
        SortMode::Managed(_) => match columns.get(column.as_str()) {
            None => Err(ConfigError::UnknownSortColumn {
                id: column.to_string(),
            }),
            Some(found) if !found.is_sortable() => Err(ConfigError::UnsortableSortColumn {
                id: column.to_string(),
            }),
            Some(_) => Ok(()),
        },
        SortMode::Controlled(_) => {
            if columns.get(column.as_str()).is_none() {
                warn!(column = %column, "sort descriptor names an unknown column");
            }
            Ok(())
        }
    }
}
