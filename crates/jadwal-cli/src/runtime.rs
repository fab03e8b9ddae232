// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::config::ModeKind;
use anyhow::{Context, Result};
use jadwal_core::{
    ColumnId, Locale, ManagedSort, PresentationPreference, SortDescriptor, SortEvent, SortMode,
    TableEngine, TableOptions, TableView, Viewport, sorted_rows,
};
use jadwal_testkit::{Member, member_columns};
use std::fs;
use std::path::{Path, PathBuf};
use time::Date;
use time::macros::format_description;
use tracing::{debug, info};

const CSV_HEADER: [&str; 7] = [
    "Name",
    "Email",
    "Role",
    "Status",
    "Department",
    "Join Date",
    "Last Active",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseSettings {
    pub mode: ModeKind,
    pub initial_sort: SortDescriptor,
    pub page_size: usize,
    /// Directory `e` writes exports into.
    pub export_dir: PathBuf,
    /// Stamped into export file names.
    pub today: Date,
}

/// Plays the caller for the member directory: owns the rows, the search
/// query and the page, and in controlled mode the sort descriptor too.
pub struct ShowcaseRuntime {
    engine: TableEngine<Member>,
    members: Vec<Member>,
    settings: ShowcaseSettings,
    /// Caller-owned descriptor; only consulted in controlled mode.
    sort: SortDescriptor,
    query: String,
    page: usize,
    loading: bool,
}

impl ShowcaseRuntime {
    pub fn new(
        members: Vec<Member>,
        settings: ShowcaseSettings,
        options: TableOptions,
    ) -> Result<Self> {
        let sort = match settings.mode {
            ModeKind::Controlled => settings.initial_sort.clone(),
            ModeKind::Managed => SortDescriptor::unsorted(),
        };
        let engine = build_engine(settings.mode, &settings.initial_sort, options)?;
        info!(
            members = members.len(),
            page_size = settings.page_size,
            "member showcase ready"
        );
        Ok(Self {
            engine,
            members,
            settings,
            sort,
            query: String::new(),
            page: 1,
            loading: false,
        })
    }

    pub fn descriptor(&self) -> &SortDescriptor {
        self.engine.descriptor()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Members matching the query, case-insensitively, on name, email or
    /// either department label.
    fn filtered(&self) -> Vec<Member> {
        let query = self.query.trim().to_lowercase();
        self.members
            .iter()
            .filter(|member| {
                query.is_empty()
                    || [
                        member.name.as_str(),
                        member.email.as_str(),
                        member.department.as_str(),
                        member.department_ar.as_str(),
                    ]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&query))
            })
            .cloned()
            .collect()
    }

    fn total_pages(&self, rows: usize) -> usize {
        rows.div_ceil(self.settings.page_size).max(1)
    }

    /// Filtered rows in the order the caller hands them to the engine.
    fn caller_rows(&self) -> Vec<Member> {
        let filtered = self.filtered();
        match self.settings.mode {
            ModeKind::Controlled => sorted_rows(
                &filtered,
                self.engine.columns(),
                &self.sort,
                self.engine.options().locale,
            )
            .into_iter()
            .cloned()
            .collect(),
            ModeKind::Managed => filtered,
        }
    }

    /// Every filtered member ordered by the active descriptor, regardless of
    /// page.
    pub fn export_rows(&self) -> Vec<Member> {
        let filtered = self.filtered();
        sorted_rows(
            &filtered,
            self.engine.columns(),
            self.engine.descriptor(),
            self.engine.options().locale,
        )
        .into_iter()
        .cloned()
        .collect()
    }

    pub fn export_to(&self, path: &Path) -> Result<usize> {
        let rows = self.export_rows();
        let csv = members_csv(&rows, self.engine.options().locale)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create export directory {}", parent.display()))?;
        }
        fs::write(path, csv).with_context(|| format!("write CSV export {}", path.display()))?;
        info!(path = %path.display(), rows = rows.len(), "exported members");
        Ok(rows.len())
    }

    fn default_export_path(&self) -> Result<PathBuf> {
        let stamp = self
            .settings
            .today
            .format(&format_description!("[year]-[month]-[day]"))
            .context("format export date")?;
        Ok(self.settings.export_dir.join(format!("members-{stamp}.csv")))
    }

    fn reset_sort(&mut self) -> Result<()> {
        self.sort = SortDescriptor::unsorted();
        let options = self.engine.options().clone();
        self.engine = build_engine(self.settings.mode, &self.sort, options)?;
        Ok(())
    }
}

fn build_engine(
    mode: ModeKind,
    initial: &SortDescriptor,
    options: TableOptions,
) -> Result<TableEngine<Member>> {
    let sort = match mode {
        ModeKind::Controlled => SortMode::controlled(initial.clone()),
        ModeKind::Managed => SortMode::Managed(ManagedSort::from_descriptor(initial.clone())),
    };
    TableEngine::new(member_columns(options.locale), sort, options).with_context(|| {
        format!(
            "build member table; check [table].default_sort_by (got {})",
            initial
                .column
                .as_ref()
                .map_or_else(|| "none".to_owned(), ColumnId::to_string)
        )
    })
}

impl jadwal_tui::TableRuntime for ShowcaseRuntime {
    fn table_view(&mut self, viewport: Viewport) -> Result<TableView> {
        let rows = self.caller_rows();
        let total_pages = self.total_pages(rows.len());
        self.page = self.page.clamp(1, total_pages);
        let page_rows = rows
            .into_iter()
            .skip((self.page - 1) * self.settings.page_size)
            .take(self.settings.page_size)
            .collect::<Vec<_>>();

        let options = self.engine.options_mut();
        options.viewport = viewport;
        options.loading = self.loading;
        options.search.value = self.query.clone();
        options.pagination.current_page = self.page;
        options.pagination.total_pages = total_pages;
        Ok(self.engine.view(&page_rows))
    }

    fn request_sort(&mut self, column: &ColumnId) -> Result<Option<SortEvent>> {
        let event = self.engine.request_sort(column.as_str());
        match &event {
            Some(SortEvent::Requested { column, .. }) => {
                self.sort = self.sort.next(column);
                self.engine.set_descriptor(self.sort.clone());
                self.page = 1;
            }
            Some(SortEvent::Changed { .. }) => self.page = 1,
            None => debug!(column = %column, "sort request produced no event"),
        }
        Ok(event)
    }

    fn set_search(&mut self, query: &str) -> Result<()> {
        if self.query != query {
            self.query = query.to_owned();
            self.page = 1;
        }
        Ok(())
    }

    fn go_to_page(&mut self, page: usize) -> Result<()> {
        let total = self.total_pages(self.filtered().len());
        self.page = page.clamp(1, total);
        Ok(())
    }

    fn cycle_presentation(&mut self) -> Result<PresentationPreference> {
        let options = self.engine.options_mut();
        options.preference = options.preference.next();
        Ok(options.preference)
    }

    fn toggle_locale(&mut self) -> Result<Locale> {
        let locale = self.engine.options().locale.toggled();
        self.engine
            .set_columns(member_columns(locale))
            .context("rebuild member columns")?;
        self.engine.options_mut().locale = locale;
        info!(locale = locale.code(), "locale toggled");
        Ok(locale)
    }

    fn begin_refresh(&mut self) -> Result<()> {
        self.loading = true;
        Ok(())
    }

    fn finish_refresh(&mut self) -> Result<()> {
        self.loading = false;
        self.query.clear();
        self.page = 1;
        self.reset_sort()
    }

    fn export_csv(&mut self) -> Result<PathBuf> {
        let path = self.default_export_path()?;
        self.export_to(&path)?;
        Ok(path)
    }
}

/// CSV with a header line; every field quoted and embedded quotes doubled.
pub fn members_csv(rows: &[Member], locale: Locale) -> Result<String> {
    let date_format = format_description!("[year]-[month]-[day]");
    let mut out = csv_line(CSV_HEADER.iter().copied());
    for member in rows {
        let join_date = member
            .join_date
            .format(&date_format)
            .context("format join date")?;
        let last_active = member
            .last_active
            .format(&date_format)
            .context("format last active date")?;
        out.push_str(&csv_line([
            member.name.as_str(),
            member.email.as_str(),
            member.role.label(locale),
            member.status.label(locale),
            member.department_label(locale),
            join_date.as_str(),
            last_active.as_str(),
        ]));
    }
    Ok(out)
}

fn csv_line<'a>(fields: impl IntoIterator<Item = &'a str>) -> String {
    let mut line = fields
        .into_iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::{ShowcaseRuntime, ShowcaseSettings, members_csv};
    use crate::config::ModeKind;
    use anyhow::Result;
    use jadwal_core::{
        ColumnId, Locale, PaginationOptions, SearchOptions, SortDescriptor, SortDirection,
        SortEvent, TableOptions, TableView, ViewBody, Viewport,
    };
    use jadwal_testkit::{DirectoryFaker, Member, departments, member_directory, named_members};
    use jadwal_tui::TableRuntime;
    use std::path::PathBuf;
    use time::macros::date;

    fn settings(mode: ModeKind, page_size: usize, export_dir: PathBuf) -> ShowcaseSettings {
        ShowcaseSettings {
            mode,
            initial_sort: SortDescriptor::unsorted(),
            page_size,
            export_dir,
            today: date!(2026 - 03 - 14),
        }
    }

    fn options() -> TableOptions {
        TableOptions {
            search: SearchOptions {
                enabled: true,
                ..SearchOptions::default()
            },
            pagination: PaginationOptions {
                enabled: true,
                ..PaginationOptions::default()
            },
            ..TableOptions::default()
        }
    }

    fn showcase(mode: ModeKind, members: Vec<Member>, page_size: usize) -> ShowcaseRuntime {
        ShowcaseRuntime::new(
            members,
            settings(mode, page_size, PathBuf::from("/nonexistent")),
            options(),
        )
        .expect("member showcase should build")
    }

    fn names(view: &TableView) -> Vec<String> {
        match &view.body {
            ViewBody::Rows(rows) => rows.iter().map(|row| row.cells[0].text.clone()).collect(),
            other => panic!("expected rows, got {other:?}"),
        }
    }

    fn trio() -> Vec<Member> {
        named_members(&[
            ("Basma", "basma@company.sa"),
            ("Adel", "adel@company.sa"),
            ("Carim", "carim@company.sa"),
        ])
    }

    #[test]
    fn full_directory_pages_by_ten() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, member_directory(), 10);
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(view.body.len(), 10);
        let pagination = view.pagination.expect("pagination should be visible");
        assert_eq!(pagination.total_pages, 5);
        assert_eq!(pagination.label, "Page 1 of 5");
        Ok(())
    }

    #[test]
    fn controlled_mode_sorts_before_paging() -> Result<()> {
        let mut runtime = showcase(ModeKind::Controlled, trio(), 2);
        let event = runtime.request_sort(&ColumnId::from("name"))?;
        assert!(matches!(event, Some(SortEvent::Requested { .. })));
        assert_eq!(
            runtime.descriptor(),
            &SortDescriptor::new("name", SortDirection::Asc)
        );

        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(names(&view), vec!["Adel", "Basma"]);

        runtime.go_to_page(2)?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(names(&view), vec!["Carim"]);
        Ok(())
    }

    #[test]
    fn managed_mode_sorts_only_the_page_it_receives() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, trio(), 2);
        let event = runtime.request_sort(&ColumnId::from("name"))?;
        assert!(matches!(event, Some(SortEvent::Changed { .. })));

        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(names(&view), vec!["Adel", "Basma"]);
        runtime.request_sort(&ColumnId::from("name"))?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(names(&view), vec!["Basma", "Adel"]);
        Ok(())
    }

    #[test]
    fn sort_and_search_reset_the_page() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, trio(), 2);
        runtime.go_to_page(2)?;
        runtime.request_sort(&ColumnId::from("email"))?;
        assert_eq!(runtime.page(), 1);

        runtime.go_to_page(2)?;
        runtime.set_search("a")?;
        assert_eq!(runtime.page(), 1);
        Ok(())
    }

    #[test]
    fn page_navigation_is_clamped() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, trio(), 2);
        runtime.go_to_page(9)?;
        assert_eq!(runtime.page(), 2);
        runtime.go_to_page(0)?;
        assert_eq!(runtime.page(), 1);
        Ok(())
    }

    #[test]
    fn search_matches_name_email_and_department() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, member_directory(), 50);

        runtime.set_search("ENGINEERING")?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(view.body.len(), 5);

        runtime.set_search("هندسة")?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(view.body.len(), 5);

        runtime.set_search("no such member")?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert!(matches!(view.body, ViewBody::Empty { .. }));
        assert!(view.pagination.is_none());
        assert!(view.search.is_some());
        Ok(())
    }

    #[test]
    fn every_department_is_searchable() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, member_directory(), 50);
        for department in departments() {
            runtime.set_search(department)?;
            let view = runtime.table_view(Viewport::Regular)?;
            assert!(
                view.body.len() >= 5,
                "{department} matched {} members",
                view.body.len()
            );
        }
        Ok(())
    }

    #[test]
    fn controlled_order_ignores_input_order() -> Result<()> {
        let mut faker = DirectoryFaker::new(7);
        let members = faker.members(30);
        let mut shuffled = members.clone();
        faker.shuffle(&mut shuffled);

        let mut ordered = Vec::new();
        for rows in [members, shuffled] {
            let mut runtime = showcase(ModeKind::Controlled, rows, 30);
            runtime.request_sort(&ColumnId::from("email"))?;
            let view = runtime.table_view(Viewport::Regular)?;
            let ViewBody::Rows(rows) = view.body else {
                panic!("expected rows");
            };
            ordered.push(
                rows.into_iter()
                    .map(|row| row.cells[1].text.clone())
                    .collect::<Vec<_>>(),
            );
        }
        assert_eq!(ordered[0].len(), 30);
        assert_eq!(ordered[0], ordered[1]);
        Ok(())
    }

    #[test]
    fn refresh_shows_loading_then_clears_state() -> Result<()> {
        let mut runtime = showcase(ModeKind::Managed, trio(), 2);
        runtime.request_sort(&ColumnId::from("name"))?;
        runtime.set_search("a")?;

        runtime.begin_refresh()?;
        let view = runtime.table_view(Viewport::Regular)?;
        assert!(matches!(view.body, ViewBody::Loading { .. }));
        assert_eq!(runtime.request_sort(&ColumnId::from("email"))?, None);

        runtime.finish_refresh()?;
        assert_eq!(runtime.descriptor(), &SortDescriptor::unsorted());
        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(names(&view), vec!["Basma", "Adel"]);
        assert_eq!(view.search.map(|search| search.value), Some(String::new()));
        Ok(())
    }

    #[test]
    fn locale_toggle_keeps_sort_and_relabels() -> Result<()> {
        let mut runtime = showcase(ModeKind::Controlled, trio(), 2);
        runtime.request_sort(&ColumnId::from("name"))?;
        assert_eq!(runtime.toggle_locale()?, Locale::Ar);

        let view = runtime.table_view(Viewport::Regular)?;
        assert_eq!(view.headers[0].label, "الاسم");
        assert_eq!(
            runtime.descriptor(),
            &SortDescriptor::new("name", SortDirection::Asc)
        );
        let pagination = view.pagination.expect("pagination should be visible");
        assert_eq!(pagination.label, "صفحة 1 من 2");
        Ok(())
    }

    #[test]
    fn csv_quotes_every_field_and_doubles_quotes() -> Result<()> {
        let members = named_members(&[("Sara \"Sam\" Ali", "sara@company.sa")]);
        let csv = members_csv(&members, Locale::En)?;
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "\"Name\",\"Email\",\"Role\",\"Status\",\"Department\",\"Join Date\",\"Last Active\""
            )
        );
        let row = lines.next().expect("one data row");
        assert!(row.starts_with("\"Sara \"\"Sam\"\" Ali\",\"sara@company.sa\",\"User\""));
        assert!(row.ends_with(",\"2024-01-01\",\"2024-01-01\""));
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn export_writes_filtered_rows_in_sort_order() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let mut runtime = ShowcaseRuntime::new(
            trio(),
            settings(ModeKind::Managed, 2, temp.path().join("exports")),
            options(),
        )?;
        runtime.request_sort(&ColumnId::from("name"))?;
        runtime.request_sort(&ColumnId::from("name"))?;

        let path = runtime.export_csv()?;
        assert!(path.ends_with("exports/members-2026-03-14.csv"));
        let csv = std::fs::read_to_string(&path)?;
        let first_cells = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(first_cells, vec!["\"Carim\"", "\"Basma\"", "\"Adel\""]);
        Ok(())
    }
}
