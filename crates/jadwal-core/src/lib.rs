// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod chrome;
pub mod column;
pub mod compare;
pub mod engine;
pub mod error;
pub mod locale;
pub mod presentation;
pub mod sort;

pub use chrome::*;
pub use column::*;
pub use compare::*;
pub use engine::*;
pub use error::*;
pub use locale::*;
pub use presentation::*;
pub use sort::*;
