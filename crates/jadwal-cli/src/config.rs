// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use jadwal_core::{
    DisplayHints, Locale, PresentationPreference, SortDescriptor, SortDirection,
};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "jadwal";
pub const CONFIG_PATH_ENV: &str = "JADWAL_CONFIG_PATH";

const CONFIG_VERSION: i64 = 1;
const DEFAULT_COMPACT_BELOW: i64 = 100;
const DEFAULT_PAGE_SIZE: i64 = 10;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub table: TableSection,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            table: TableSection::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub locale: Option<String>,
    pub presentation: Option<String>,
    pub compact_below: Option<i64>,
    pub card_sorting: Option<bool>,
    pub striped: Option<bool>,
    pub compact: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSection {
    pub mode: Option<String>,
    pub default_sort_by: Option<String>,
    pub default_sort_direction: Option<String>,
    pub page_size: Option<i64>,
    pub pagination: Option<bool>,
    pub searchable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

/// Who owns the sort descriptor in the showcase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Controlled,
    Managed,
}

impl ModeKind {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "controlled" => Some(Self::Controlled),
            "managed" => Some(Self::Managed),
            _ => None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set {CONFIG_PATH_ENV} to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [ui], [table], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(locale) = &self.ui.locale
            && Locale::parse(locale).is_none()
        {
            bail!(
                "ui.locale in {} must be \"en\" or \"ar\", got {locale:?}",
                path.display()
            );
        }

        if let Some(presentation) = &self.ui.presentation
            && PresentationPreference::parse(presentation).is_none()
        {
            bail!(
                "ui.presentation in {} must be \"auto\", \"table\" or \"cards\", got {presentation:?}",
                path.display()
            );
        }

        if let Some(width) = self.ui.compact_below
            && u16::try_from(width).map_or(true, |width| width == 0)
        {
            bail!(
                "ui.compact_below in {} must be a terminal width between 1 and {}, got {}",
                path.display(),
                u16::MAX,
                width
            );
        }

        if let Some(mode) = &self.table.mode
            && ModeKind::parse(mode).is_none()
        {
            bail!(
                "table.mode in {} must be \"controlled\" or \"managed\", got {mode:?}",
                path.display()
            );
        }

        if let Some(direction) = &self.table.default_sort_direction
            && direction != "none"
            && SortDirection::parse(direction).is_none()
        {
            bail!(
                "table.default_sort_direction in {} must be \"asc\", \"desc\" or \"none\", got {direction:?}",
                path.display()
            );
        }

        if let Some(column) = &self.table.default_sort_by
            && column.trim().is_empty()
        {
            bail!(
                "table.default_sort_by in {} must name a column; remove it to start unsorted",
                path.display()
            );
        }

        if let Some(page_size) = self.table.page_size
            && page_size <= 0
        {
            bail!(
                "table.page_size in {} must be positive, got {}",
                path.display(),
                page_size
            );
        }

        if let Some(level) = &self.log.level
            && level.trim().is_empty()
        {
            bail!(
                "log.level in {} must not be empty; use a filter such as \"info\" or \"jadwal_core=debug\"",
                path.display()
            );
        }

        Ok(())
    }

    pub fn locale(&self) -> Locale {
        self.ui
            .locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or_default()
    }

    pub fn presentation(&self) -> PresentationPreference {
        self.ui
            .presentation
            .as_deref()
            .and_then(PresentationPreference::parse)
            .unwrap_or_default()
    }

    pub fn compact_below(&self) -> u16 {
        let width = self.ui.compact_below.unwrap_or(DEFAULT_COMPACT_BELOW);
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    pub fn card_sorting(&self) -> bool {
        self.ui.card_sorting.unwrap_or(true)
    }

    pub fn hints(&self) -> DisplayHints {
        DisplayHints {
            striped: self.ui.striped.unwrap_or(true),
            compact: self.ui.compact.unwrap_or(false),
        }
    }

    pub fn mode(&self) -> ModeKind {
        self.table
            .mode
            .as_deref()
            .and_then(ModeKind::parse)
            .unwrap_or(ModeKind::Managed)
    }

    /// Starting sort. A column without a direction starts ascending.
    pub fn initial_sort(&self) -> SortDescriptor {
        let Some(column) = self.table.default_sort_by.as_deref() else {
            return SortDescriptor::unsorted();
        };
        match self.table.default_sort_direction.as_deref() {
            Some("none") => SortDescriptor::unsorted(),
            Some(direction) => SortDirection::parse(direction).map_or_else(
                SortDescriptor::unsorted,
                |direction| SortDescriptor::new(column, direction),
            ),
            None => SortDescriptor::new(column, SortDirection::Asc),
        }
    }

    pub fn page_size(&self) -> usize {
        let size = self.table.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        usize::try_from(size).unwrap_or(1).max(1)
    }

    pub fn pagination(&self) -> bool {
        self.table.pagination.unwrap_or(true)
    }

    pub fn searchable(&self) -> bool {
        self.table.searchable.unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        match &self.log.file {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(data_dir()?.join("jadwal.log")),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# jadwal config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\nlocale = \"en\"            # en | ar\npresentation = \"auto\"     # auto | table | cards\n# Terminals narrower than this many columns get cards under `auto`\ncompact_below = {}\ncard_sorting = true\nstriped = true\ncompact = false\n\n[table]\nmode = \"managed\"          # managed | controlled\n# default_sort_by = \"name\"\ndefault_sort_direction = \"asc\"  # asc | desc | none\npage_size = {}\npagination = true\nsearchable = true\n\n[log]\nlevel = \"{}\"              # overridden by JADWAL_LOG\n# Optional. Default is the platform data dir (for example ~/.local/share/jadwal/jadwal.log)\n# file = \"/absolute/path/to/jadwal.log\"\n",
            path.display(),
            DEFAULT_COMPACT_BELOW,
            DEFAULT_PAGE_SIZE,
            DEFAULT_LOG_LEVEL,
        )
    }
}

/// Platform data directory for logs and exports.
pub fn data_dir() -> Result<PathBuf> {
    let root = dirs::data_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set [log].file and pass --export-csv <path>")
    })?;
    Ok(root.join(APP_NAME))
}
