// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::column::{ColumnId, ColumnSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Active sort column and direction. A missing column or a missing
/// direction both mean no ordering is applied.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortDescriptor {
    pub column: Option<ColumnId>,
    pub direction: Option<SortDirection>,
}

impl SortDescriptor {
    pub const fn unsorted() -> Self {
        Self {
            column: None,
            direction: None,
        }
    }

    pub fn new(column: impl Into<ColumnId>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction: Some(direction),
        }
    }

    pub fn active(&self) -> Option<(&ColumnId, SortDirection)> {
        match (&self.column, self.direction) {
            (Some(column), Some(direction)) => Some((column, direction)),
            _ => None,
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.active().is_some()
    }

    /// Direction applied to `column`, if it is the active sort target.
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        self.active()
            .filter(|(active, _)| *active == column)
            .map(|(_, direction)| direction)
    }

    /// Descriptor that follows a request on `column`:
    /// unsorted -> asc -> desc -> unsorted, and a new column always starts at asc.
    pub fn next(&self, column: &ColumnId) -> Self {
        match (&self.column, self.direction) {
            (Some(current), Some(SortDirection::Asc)) if current == column => {
                Self::new(column.clone(), SortDirection::Desc)
            }
            (Some(current), Some(SortDirection::Desc)) if current == column => Self::unsorted(),
            _ => Self::new(column.clone(), SortDirection::Asc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortEvent {
    /// Controlled mode: the caller owns the descriptor and should adopt `next`.
    Requested { column: ColumnId, next: SortDescriptor },
    /// Managed mode: the engine's own descriptor changed.
    Changed {
        column: ColumnId,
        descriptor: SortDescriptor,
    },
}

impl SortEvent {
    pub fn column(&self) -> &ColumnId {
        match self {
            Self::Requested { column, .. } | Self::Changed { column, .. } => column,
        }
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        match self {
            Self::Requested { next, .. } => next,
            Self::Changed { descriptor, .. } => descriptor,
        }
    }
}

/// Descriptor owned by the caller. Requests are reported, never applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlledSort {
    descriptor: SortDescriptor,
    interactive: bool,
}

impl ControlledSort {
    pub fn new(descriptor: SortDescriptor) -> Self {
        Self {
            descriptor,
            interactive: true,
        }
    }

    /// A caller that never listens for requests: headers are not actionable.
    pub fn read_only(descriptor: SortDescriptor) -> Self {
        Self {
            descriptor,
            interactive: false,
        }
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        &self.descriptor
    }

    pub fn set_descriptor(&mut self, descriptor: SortDescriptor) {
        self.descriptor = descriptor;
    }

    fn request(&self, column: ColumnId) -> Option<SortEvent> {
        if !self.interactive {
            return None;
        }
        let next = self.descriptor.next(&column);
        Some(SortEvent::Requested { column, next })
    }
}

/// Descriptor owned by the engine for the lifetime of the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManagedSort {
    descriptor: SortDescriptor,
}

impl ManagedSort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the descriptor. A seeded column defaults to ascending; without a
    /// column the table starts unsorted.
    pub fn with_initial(column: Option<ColumnId>, direction: Option<SortDirection>) -> Self {
        let direction = column
            .as_ref()
            .map(|_| direction.unwrap_or(SortDirection::Asc));
        Self {
            descriptor: SortDescriptor { column, direction },
        }
    }

    pub fn from_descriptor(descriptor: SortDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        &self.descriptor
    }

    fn request(&mut self, column: ColumnId) -> Option<SortEvent> {
        self.descriptor = self.descriptor.next(&column);
        Some(SortEvent::Changed {
            column,
            descriptor: self.descriptor.clone(),
        })
    }
}

/// Who owns the sort descriptor. Chosen once when the table is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortMode {
    Controlled(ControlledSort),
    Managed(ManagedSort),
}

impl Default for SortMode {
    fn default() -> Self {
        Self::Managed(ManagedSort::new())
    }
}

impl SortMode {
    pub fn controlled(descriptor: SortDescriptor) -> Self {
        Self::Controlled(ControlledSort::new(descriptor))
    }

    pub fn managed(column: Option<ColumnId>, direction: Option<SortDirection>) -> Self {
        Self::Managed(ManagedSort::with_initial(column, direction))
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        match self {
            Self::Controlled(sort) => sort.descriptor(),
            Self::Managed(sort) => sort.descriptor(),
        }
    }

    pub fn is_managed(&self) -> bool {
        matches!(self, Self::Managed(_))
    }

    /// Whether sort affordances do anything in this mode.
    pub fn accepts_requests(&self) -> bool {
        match self {
            Self::Controlled(sort) => sort.interactive,
            Self::Managed(_) => true,
        }
    }

    /// Advances the tri-state cycle for `column`. Requests on unknown or
    /// non-sortable columns are ignored.
    pub fn request_sort<T>(&mut self, columns: &ColumnSet<T>, column: &str) -> Option<SortEvent> {
        if !columns.is_sortable(column) {
            debug!(column, "sort request ignored: column is not sortable");
            return None;
        }

        let column = ColumnId::from(column);
        let event = match self {
            Self::Controlled(sort) => sort.request(column),
            Self::Managed(sort) => sort.request(column),
        };
        if let Some(event) = &event {
            let descriptor = event.descriptor();
            debug!(
                column = %event.column(),
                direction = descriptor.direction.map_or("none", SortDirection::as_str),
                managed = self.is_managed(),
                "sort requested"
            );
        }
        event
    }
}
