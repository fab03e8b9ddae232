// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use thiserror::Error;

/// Caller misuse detected while building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("column at position {position} has an empty id")]
    EmptyColumnId { position: usize },

    #[error("duplicate column id {id:?} at positions {first} and {second}")]
    DuplicateColumnId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("column {id:?} is sortable but has no accessor to sort by")]
    SortableWithoutAccessor { id: String },

    #[error("initial sort column {id:?} is not a column of this table")]
    UnknownSortColumn { id: String },

    #[error("initial sort column {id:?} is not sortable")]
    UnsortableSortColumn { id: String },
}
