// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use jadwal_core::{
    Alignment as ColumnAlignment, BadgeVariant, CardView, CellTone, ColumnId, ColumnWidth,
    HeaderView, Locale, NavButton, NavSlot, PageItem, PaginationView, Presentation,
    PresentationPreference, RenderedCell, RowView, SearchView, SortAffordance, SortControl,
    SortDirection, SortEvent, TableView, TextDirection, ViewBody, Viewport, nav_order,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::{Frame, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

const PLACEHOLDER_CELL: &str = "░░░░░░";
const SEARCH_CURSOR: &str = "▏";
const CLEAR_MARK: &str = "✕";
const CARD_RULE: &str = "────────────────────────";
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const POLL_INTERVAL: Duration = Duration::from_millis(120);

/// The caller side of the table: owns rows, filtering, paging and, in
/// controlled mode, the sort descriptor.
pub trait TableRuntime {
    /// Builds the frame for the current search, sort and page.
    fn table_view(&mut self, viewport: Viewport) -> Result<TableView>;
    fn request_sort(&mut self, column: &ColumnId) -> Result<Option<SortEvent>>;
    fn set_search(&mut self, query: &str) -> Result<()>;
    fn go_to_page(&mut self, page: usize) -> Result<()>;
    fn cycle_presentation(&mut self) -> Result<PresentationPreference>;
    fn toggle_locale(&mut self) -> Result<Locale>;
    /// Enters the loading phase; `finish_refresh` follows after the
    /// configured delay.
    fn begin_refresh(&mut self) -> Result<()>;
    fn finish_refresh(&mut self) -> Result<()>;
    fn export_csv(&mut self) -> Result<PathBuf>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    /// Terminal widths below this many columns count as a compact viewport.
    pub compact_below: u16,
    pub refresh_delay: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            compact_below: 100,
            refresh_delay: Duration::from_secs(2),
        }
    }
}

pub fn viewport_for_width(width: u16, compact_below: u16) -> Viewport {
    if width < compact_below {
        Viewport::Compact
    } else {
        Viewport::Regular
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UiCommand {
    FocusNext,
    FocusPrev,
    SortFocused,
    SortNth(usize),
    StartSearch,
    NextPage,
    PrevPage,
    Scroll(isize),
    CyclePresentation,
    ToggleLocale,
    Refresh,
    ExportCsv,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum UiStatus {
    Sorted {
        column: String,
        direction: Option<SortDirection>,
    },
    SortUnavailable,
    NoSortableColumns,
    Loading,
    Page {
        current: usize,
        total: usize,
    },
    FirstPage,
    LastPage,
    SinglePage,
    SearchUnavailable,
    SearchCleared,
    Presentation(PresentationPreference),
    Locale(Locale),
    Refreshing,
    Refreshed,
    Exported(PathBuf),
    Failed {
        action: &'static str,
        error: String,
    },
}

impl UiStatus {
    fn message(&self) -> String {
        match self {
            Self::Sorted {
                column,
                direction: Some(direction),
            } => format!("sort {column} {}", direction.as_str()),
            Self::Sorted {
                direction: None, ..
            } => "sort cleared".to_owned(),
            Self::SortUnavailable => "sort unavailable".to_owned(),
            Self::NoSortableColumns => "no sortable columns".to_owned(),
            Self::Loading => "loading; try again shortly".to_owned(),
            Self::Page { current, total } => format!("page {current} of {total}"),
            Self::FirstPage => "already on first page".to_owned(),
            Self::LastPage => "already on last page".to_owned(),
            Self::SinglePage => "everything fits on one page".to_owned(),
            Self::SearchUnavailable => "search disabled".to_owned(),
            Self::SearchCleared => "search cleared".to_owned(),
            Self::Presentation(preference) => format!("view {}", preference.as_str()),
            Self::Locale(locale) => format!("language {}", locale.code()),
            Self::Refreshing => "refreshing".to_owned(),
            Self::Refreshed => "refreshed".to_owned(),
            Self::Exported(path) => format!("exported {}", path.display()),
            Self::Failed { action, error } => format!("{action} failed: {error}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum InternalEvent {
    ClearStatus { token: u64 },
    RefreshDone { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct UiState {
    view: Option<TableView>,
    viewport: Viewport,
    /// Index into the sortable targets of the current view.
    focus: usize,
    /// Draft query while the search box has focus.
    search_input: Option<String>,
    scroll: usize,
    status: Option<String>,
    status_token: u64,
    refresh_token: u64,
    refreshing: bool,
}

impl UiState {
    fn set_view(&mut self, view: TableView) {
        let targets = sort_targets(&view).len();
        self.focus = self.focus.min(targets.saturating_sub(1));
        self.scroll = self.scroll.min(view.body.len().saturating_sub(1));
        self.view = Some(view);
    }

    fn loading(&self) -> bool {
        self.view
            .as_ref()
            .is_some_and(|view| matches!(view.body, ViewBody::Loading { .. }))
    }
}

pub fn run_app<R: TableRuntime>(runtime: &mut R, options: UiOptions) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let result = event_loop(&mut terminal, runtime, options);

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<B: Backend, R: TableRuntime>(
    terminal: &mut Terminal<B>,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    let mut ui = UiState::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    loop {
        process_internal_events(runtime, &mut ui, &internal_tx, &internal_rx);

        let size = terminal.size().context("read terminal size")?;
        ui.viewport = viewport_for_width(size.width, options.compact_below);
        let view = runtime
            .table_view(ui.viewport)
            .context("build table view")?;
        ui.set_view(view);

        terminal
            .draw(|frame| render(frame, &ui))
            .context("draw frame")?;

        if !event::poll(POLL_INTERVAL).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(runtime, &mut ui, &internal_tx, options, key)
        {
            return Ok(());
        }
    }
}

fn process_internal_events<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == ui.status_token => {
                ui.status = None;
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::RefreshDone { token } if token == ui.refresh_token => {
                ui.refreshing = false;
                ui.focus = 0;
                ui.scroll = 0;
                ui.search_input = None;
                match runtime.finish_refresh() {
                    Ok(()) => emit_status(ui, tx, UiStatus::Refreshed),
                    Err(error) => emit_failure(ui, tx, "refresh", &error),
                }
            }
            InternalEvent::RefreshDone { .. } => {}
        }
    }
}

fn schedule(tx: &Sender<InternalEvent>, event: InternalEvent, delay: Duration) {
    let sender = tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(event);
    });
}

fn emit_status(ui: &mut UiState, tx: &Sender<InternalEvent>, status: UiStatus) {
    ui.status = Some(status.message());
    ui.status_token = ui.status_token.saturating_add(1);
    schedule(
        tx,
        InternalEvent::ClearStatus {
            token: ui.status_token,
        },
        STATUS_CLEAR_DELAY,
    );
}

fn emit_failure(
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    action: &'static str,
    error: &anyhow::Error,
) {
    warn!(action, error = %error, "table action failed");
    emit_status(
        ui,
        tx,
        UiStatus::Failed {
            action,
            error: format!("{error:#}"),
        },
    );
}

fn handle_key_event<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    options: UiOptions,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if ui.search_input.is_some() {
        handle_search_key(runtime, ui, tx, key);
        return false;
    }

    let Some(command) = ui_command_for_key(key) else {
        return false;
    };
    apply_ui_command(runtime, ui, tx, options, command)
}

fn ui_command_for_key(key: KeyEvent) -> Option<UiCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => Some(UiCommand::FocusNext),
        (KeyCode::BackTab, _) => Some(UiCommand::FocusPrev),
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::NONE) => {
            Some(UiCommand::SortFocused)
        }
        (KeyCode::Char(digit @ '1'..='9'), _) => {
            let index = digit.to_digit(10).map_or(0, |value| value as usize - 1);
            Some(UiCommand::SortNth(index))
        }
        (KeyCode::Char('/'), _) => Some(UiCommand::StartSearch),
        (KeyCode::Char('n'), KeyModifiers::NONE) | (KeyCode::PageDown, _) => {
            Some(UiCommand::NextPage)
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::PageUp, _) => {
            Some(UiCommand::PrevPage)
        }
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Some(UiCommand::Scroll(1)),
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Some(UiCommand::Scroll(-1)),
        (KeyCode::Char('v'), KeyModifiers::NONE) => Some(UiCommand::CyclePresentation),
        (KeyCode::Char('L'), _) => Some(UiCommand::ToggleLocale),
        (KeyCode::Char('r'), KeyModifiers::NONE) => Some(UiCommand::Refresh),
        (KeyCode::Char('e'), KeyModifiers::NONE) => Some(UiCommand::ExportCsv),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(UiCommand::Quit),
        _ => None,
    }
}

fn apply_ui_command<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    options: UiOptions,
    command: UiCommand,
) -> bool {
    let targets = ui.view.as_ref().map(sort_targets).unwrap_or_default();
    match command {
        UiCommand::Quit => return true,
        UiCommand::FocusNext | UiCommand::FocusPrev => {
            if targets.is_empty() {
                emit_status(ui, tx, UiStatus::NoSortableColumns);
            } else {
                let delta = if command == UiCommand::FocusNext { 1 } else { -1 };
                let len = targets.len() as isize;
                ui.focus = (ui.focus as isize + delta).rem_euclid(len) as usize;
            }
        }
        UiCommand::SortFocused => match targets.get(ui.focus) {
            Some(column) => request_sort(runtime, ui, tx, column),
            None => emit_status(ui, tx, UiStatus::NoSortableColumns),
        },
        UiCommand::SortNth(index) => match targets.get(index) {
            Some(column) => {
                ui.focus = index;
                request_sort(runtime, ui, tx, column);
            }
            None => emit_status(ui, tx, UiStatus::SortUnavailable),
        },
        UiCommand::StartSearch => start_search(ui, tx),
        UiCommand::NextPage | UiCommand::PrevPage => {
            change_page(runtime, ui, tx, command == UiCommand::NextPage);
        }
        UiCommand::Scroll(delta) => {
            let len = ui.view.as_ref().map_or(0, |view| view.body.len());
            ui.scroll = ui
                .scroll
                .saturating_add_signed(delta)
                .min(len.saturating_sub(1));
        }
        UiCommand::CyclePresentation => match runtime.cycle_presentation() {
            Ok(preference) => emit_status(ui, tx, UiStatus::Presentation(preference)),
            Err(error) => emit_failure(ui, tx, "view change", &error),
        },
        UiCommand::ToggleLocale => match runtime.toggle_locale() {
            Ok(locale) => emit_status(ui, tx, UiStatus::Locale(locale)),
            Err(error) => emit_failure(ui, tx, "language change", &error),
        },
        UiCommand::Refresh => start_refresh(runtime, ui, tx, options),
        UiCommand::ExportCsv => match runtime.export_csv() {
            Ok(path) => emit_status(ui, tx, UiStatus::Exported(path)),
            Err(error) => emit_failure(ui, tx, "export", &error),
        },
    }
    false
}

fn request_sort<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    column: &ColumnId,
) {
    if ui.loading() {
        emit_status(ui, tx, UiStatus::Loading);
        return;
    }
    match runtime.request_sort(column) {
        Ok(Some(event)) => {
            debug!(column = %column, "sort affordance activated");
            ui.scroll = 0;
            let label = ui
                .view
                .as_ref()
                .and_then(|view| view.headers.iter().find(|header| header.id == *column))
                .map_or_else(|| column.to_string(), |header| header.label.clone());
            emit_status(
                ui,
                tx,
                UiStatus::Sorted {
                    column: label,
                    direction: event.descriptor().direction_for(column.as_str()),
                },
            );
        }
        Ok(None) => emit_status(ui, tx, UiStatus::SortUnavailable),
        Err(error) => emit_failure(ui, tx, "sort", &error),
    }
}

fn start_search(ui: &mut UiState, tx: &Sender<InternalEvent>) {
    let Some(search) = ui.view.as_ref().and_then(|view| view.search.as_ref()) else {
        emit_status(ui, tx, UiStatus::SearchUnavailable);
        return;
    };
    if !search.enabled {
        emit_status(ui, tx, UiStatus::Loading);
        return;
    }
    ui.search_input = Some(search.value.clone());
}

fn handle_search_key<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(input) = ui.search_input.as_mut() else {
        return;
    };
    let query = match key.code {
        KeyCode::Enter => {
            ui.search_input = None;
            return;
        }
        KeyCode::Esc => {
            ui.search_input = None;
            apply_search(runtime, ui, tx, "");
            emit_status(ui, tx, UiStatus::SearchCleared);
            return;
        }
        KeyCode::Backspace => {
            input.pop();
            input.clone()
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.push(ch);
            input.clone()
        }
        _ => return,
    };
    apply_search(runtime, ui, tx, &query);
}

fn apply_search<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    query: &str,
) {
    ui.scroll = 0;
    if let Err(error) = runtime.set_search(query) {
        emit_failure(ui, tx, "search", &error);
    }
}

fn change_page<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    forward: bool,
) {
    if ui.loading() {
        emit_status(ui, tx, UiStatus::Loading);
        return;
    }
    let Some(pagination) = ui.view.as_ref().and_then(|view| view.pagination.as_ref()) else {
        emit_status(ui, tx, UiStatus::SinglePage);
        return;
    };
    let (button, blocked) = if forward {
        (&pagination.next, UiStatus::LastPage)
    } else {
        (&pagination.previous, UiStatus::FirstPage)
    };
    if !button.enabled {
        emit_status(ui, tx, blocked);
        return;
    }

    let total = pagination.total_pages;
    let target = if forward {
        pagination.current_page + 1
    } else {
        pagination.current_page - 1
    };
    match runtime.go_to_page(target) {
        Ok(()) => {
            ui.scroll = 0;
            emit_status(
                ui,
                tx,
                UiStatus::Page {
                    current: target,
                    total,
                },
            );
        }
        Err(error) => emit_failure(ui, tx, "page change", &error),
    }
}

fn start_refresh<R: TableRuntime>(
    runtime: &mut R,
    ui: &mut UiState,
    tx: &Sender<InternalEvent>,
    options: UiOptions,
) {
    if ui.refreshing {
        emit_status(ui, tx, UiStatus::Loading);
        return;
    }
    if let Err(error) = runtime.begin_refresh() {
        emit_failure(ui, tx, "refresh", &error);
        return;
    }
    ui.refreshing = true;
    ui.refresh_token = ui.refresh_token.saturating_add(1);
    schedule(
        tx,
        InternalEvent::RefreshDone {
            token: ui.refresh_token,
        },
        options.refresh_delay,
    );
    emit_status(ui, tx, UiStatus::Refreshing);
}

/// Columns a sort key can reach in the current presentation.
fn sort_targets(view: &TableView) -> Vec<ColumnId> {
    match view.presentation {
        Presentation::Table => view
            .headers
            .iter()
            .filter(|header| header.sort.indicator().is_some())
            .map(|header| header.id.clone())
            .collect(),
        Presentation::Cards => view
            .sort_controls
            .iter()
            .map(|control| control.id.clone())
            .collect(),
    }
}

fn focused_target(ui: &UiState, view: &TableView) -> Option<ColumnId> {
    sort_targets(view).into_iter().nth(ui.focus)
}

fn render(frame: &mut Frame<'_>, ui: &UiState) {
    let Some(view) = &ui.view else {
        return;
    };

    let show_sort_bar = view.presentation == Presentation::Cards && !view.sort_controls.is_empty();
    let mut constraints = Vec::with_capacity(5);
    if view.search.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if show_sort_bar {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(3));
    if view.pagination.is_some() {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Length(3));

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());
    let mut areas = layout.iter().copied();
    let focused = focused_target(ui, view);

    if let (Some(search), Some(area)) = (&view.search, areas.next()) {
        let line = search_line(search, ui.search_input.as_deref(), view.direction);
        let border = if ui.search_input.is_some() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let widget = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        );
        frame.render_widget(widget, area);
    }

    if show_sort_bar && let Some(area) = areas.next() {
        let line = sort_bar_line(&view.sort_controls, focused.as_ref(), view.direction);
        let widget = Paragraph::new(line).block(
            Block::default()
                .title(sort_bar_title(view.locale))
                .borders(Borders::ALL),
        );
        frame.render_widget(widget, area);
    }

    if let Some(area) = areas.next() {
        render_body(frame, area, view, ui, focused.as_ref());
    }

    if let (Some(pagination), Some(area)) = (&view.pagination, areas.next()) {
        frame.render_widget(
            Paragraph::new(pagination_line(pagination, view.direction)),
            area,
        );
    }

    if let Some(area) = areas.next() {
        let status = Paragraph::new(status_text(ui))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, area);
    }
}

fn render_body(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &TableView,
    ui: &UiState,
    focused: Option<&ColumnId>,
) {
    let block = Block::default()
        .title(body_title(view))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match (&view.body, view.presentation) {
        (ViewBody::Rows(rows), _) => {
            let table = table_widget(view, table_rows(view, rows), focused);
            let mut state = TableState::default().with_offset(ui.scroll);
            frame.render_stateful_widget(table, inner, &mut state);
        }
        (ViewBody::Loading { placeholders, .. }, Presentation::Table) => {
            let table = table_widget(view, placeholder_rows(view, *placeholders), focused);
            frame.render_widget(table, inner);
        }
        (ViewBody::Empty { message }, Presentation::Table) => {
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)])
                .split(inner);
            frame.render_widget(table_widget(view, Vec::new(), focused), split[0]);
            frame.render_widget(empty_message(message), split[1]);
        }
        (ViewBody::Empty { message }, Presentation::Cards) => {
            frame.render_widget(empty_message(message), inner);
        }
        (ViewBody::Cards(cards), _) => {
            let lines = card_lines(cards, view.direction);
            let offset = card_scroll_offset(cards, ui.scroll);
            frame.render_widget(Paragraph::new(lines).scroll((offset, 0)), inner);
        }
        (ViewBody::Loading {
            placeholders,
            columns,
        }, Presentation::Cards) => {
            let lines = placeholder_card_lines(*placeholders, *columns, view.direction);
            frame.render_widget(Paragraph::new(lines), inner);
        }
    }
}

fn empty_message(message: &str) -> Paragraph<'static> {
    Paragraph::new(message.to_owned())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
}

fn body_title(view: &TableView) -> String {
    let mut title = format!(
        "jadwal · {} · {}",
        view.presentation.label(),
        view.locale.code()
    );
    if matches!(view.body, ViewBody::Loading { .. }) {
        title.push_str(" · loading");
    }
    title
}

fn table_widget<'a>(view: &TableView, rows: Vec<Row<'a>>, focused: Option<&ColumnId>) -> Table<'a> {
    let headers = physical_order(view.headers.iter().collect(), view.direction);
    let widths = headers
        .iter()
        .map(|header| width_constraint(header.width))
        .collect::<Vec<_>>();
    let header_cells = headers
        .iter()
        .map(|header| {
            let is_focused = focused.is_some_and(|id| *id == header.id);
            let line = Line::from(header_label(header, view.direction))
                .alignment(physical_alignment(header.alignment, view.direction));
            Cell::from(line).style(header_style(header.sort, is_focused))
        })
        .collect::<Vec<_>>();
    let spacing = if view.hints.compact { 1 } else { 2 };

    Table::new(rows, widths)
        .header(Row::new(header_cells).bottom_margin(u16::from(!view.hints.compact)))
        .column_spacing(spacing)
}

fn table_rows(view: &TableView, rows: &[RowView]) -> Vec<Row<'static>> {
    let alignments = view
        .headers
        .iter()
        .map(|header| physical_alignment(header.alignment, view.direction))
        .collect::<Vec<_>>();
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let cells = row
                .cells
                .iter()
                .zip(alignments.iter().copied())
                .map(|(cell, alignment)| {
                    Cell::from(Text::from(Line::from(cell_span(cell)).alignment(alignment)))
                })
                .collect::<Vec<_>>();
            let mut style = Style::default();
            if view.hints.striped && index % 2 == 1 {
                style = style.bg(Color::Indexed(236));
            }
            Row::new(physical_order(cells, view.direction)).style(style)
        })
        .collect()
}

fn placeholder_rows(view: &TableView, count: usize) -> Vec<Row<'static>> {
    let style = Style::default().fg(Color::DarkGray);
    (0..count)
        .map(|_| {
            Row::new(
                view.headers
                    .iter()
                    .map(|_| Cell::from(PLACEHOLDER_CELL).style(style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn header_label(header: &HeaderView, direction: TextDirection) -> String {
    match header.sort.indicator() {
        None => header.label.clone(),
        Some(indicator) => {
            let glyph = indicator.glyph(direction);
            if direction.is_rtl() {
                format!("{glyph} {}", header.label)
            } else {
                format!("{} {glyph}", header.label)
            }
        }
    }
}

fn header_style(sort: SortAffordance, focused: bool) -> Style {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    match sort {
        SortAffordance::Static => style = style.fg(Color::White),
        SortAffordance::Actionable(indicator) => {
            style = style.fg(if indicator.is_active() {
                Color::Cyan
            } else {
                Color::White
            });
            if focused {
                style = style.add_modifier(Modifier::REVERSED);
            }
        }
        SortAffordance::Disabled(_) => style = style.fg(Color::DarkGray),
    }
    style
}

fn cell_span(cell: &RenderedCell) -> Span<'static> {
    match cell.tone {
        CellTone::Plain => Span::raw(cell.text.clone()),
        CellTone::Strong => Span::styled(
            cell.text.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        CellTone::Muted => Span::styled(cell.text.clone(), Style::default().fg(Color::DarkGray)),
        CellTone::Badge(variant) => {
            let style = match variant {
                BadgeVariant::Default => Style::default().fg(Color::Black).bg(Color::Cyan),
                BadgeVariant::Secondary => Style::default().fg(Color::Black).bg(Color::Gray),
                BadgeVariant::Outline => Style::default().fg(Color::Cyan),
            };
            Span::styled(format!(" {} ", cell.text), style)
        }
    }
}

fn card_lines(cards: &[CardView], direction: TextDirection) -> Vec<Line<'static>> {
    let alignment = physical_alignment(ColumnAlignment::Start, direction);
    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    for (index, card) in cards.iter().enumerate() {
        if index > 0 {
            lines.push(
                Line::styled(CARD_RULE, Style::default().fg(Color::DarkGray)).alignment(alignment),
            );
        }
        for field in &card.fields {
            let label = Span::styled(field.label.clone(), label_style);
            let value = cell_span(&field.value);
            let spans = if direction.is_rtl() {
                vec![value, Span::raw(" :"), label]
            } else {
                vec![label, Span::raw(": "), value]
            };
            lines.push(Line::from(spans).alignment(alignment));
        }
    }
    lines
}

fn placeholder_card_lines(
    count: usize,
    columns: usize,
    direction: TextDirection,
) -> Vec<Line<'static>> {
    let alignment = physical_alignment(ColumnAlignment::Start, direction);
    let style = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();
    for index in 0..count {
        if index > 0 {
            lines.push(Line::styled(CARD_RULE, style).alignment(alignment));
        }
        for _ in 0..columns {
            lines.push(Line::styled(PLACEHOLDER_CELL, style).alignment(alignment));
        }
    }
    lines
}

/// Line offset of the `card`-th card, counting one rule line between cards.
fn card_scroll_offset(cards: &[CardView], card: usize) -> u16 {
    let lines: usize = cards
        .iter()
        .take(card)
        .map(|card| card.fields.len() + 1)
        .sum();
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn sort_bar_title(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Sort by",
        Locale::Ar => "ترتيب حسب",
    }
}

fn sort_bar_line(
    controls: &[SortControl],
    focused: Option<&ColumnId>,
    direction: TextDirection,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(controls.len() * 2);
    for (index, control) in controls.iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw(" "));
        }
        let glyph = control.indicator.glyph(direction);
        let text = if direction.is_rtl() {
            format!("[{glyph} {}]", control.label)
        } else {
            format!("[{} {glyph}]", control.label)
        };
        let mut style = Style::default();
        if !control.enabled {
            style = style.fg(Color::DarkGray);
        } else if control.indicator.is_active() {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if focused.is_some_and(|id| *id == control.id) && control.enabled {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(text, style));
    }
    Line::from(physical_order(spans, direction))
        .alignment(physical_alignment(ColumnAlignment::Start, direction))
}

fn search_line(
    search: &SearchView,
    editing: Option<&str>,
    direction: TextDirection,
) -> Line<'static> {
    let text = editing.unwrap_or(&search.value);
    let mut spans = Vec::with_capacity(3);
    if text.is_empty() && editing.is_none() {
        spans.push(Span::styled(
            search.placeholder.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        let style = if search.enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(text.to_owned(), style));
    }
    if editing.is_some() {
        spans.push(Span::styled(
            SEARCH_CURSOR,
            Style::default().fg(Color::Cyan),
        ));
    }
    if !text.is_empty() {
        spans.push(Span::styled(
            format!("  {CLEAR_MARK}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(physical_order(spans, direction))
        .alignment(physical_alignment(ColumnAlignment::Start, direction))
}

fn pagination_line(pagination: &PaginationView, direction: TextDirection) -> Line<'static> {
    let [left, _] = nav_order(direction);
    let button = |slot: NavSlot, button: &NavButton| {
        let on_left = slot == left;
        let text = if on_left {
            format!("{} {}", button.glyph, button.label)
        } else {
            format!("{} {}", button.label, button.glyph)
        };
        let style = if button.enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(text, style)
    };

    let mut spans = vec![button(NavSlot::Previous, &pagination.previous)];
    for item in &pagination.pages {
        spans.push(Span::raw(" "));
        spans.push(match item {
            PageItem::Page(page) if *page == pagination.current_page => Span::styled(
                format!("[{page}]"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            PageItem::Page(page) => Span::raw(page.to_string()),
            PageItem::Ellipsis => Span::raw("…"),
        });
    }
    spans.push(Span::raw(" "));
    spans.push(button(NavSlot::Next, &pagination.next));
    spans.push(Span::raw("   "));
    spans.push(Span::styled(
        pagination.label.clone(),
        Style::default().fg(Color::DarkGray),
    ));

    Line::from(physical_order(spans, direction)).alignment(Alignment::Center)
}

fn status_text(ui: &UiState) -> String {
    let default = if ui.search_input.is_some() {
        "type to filter | enter done | esc clear"
    } else {
        "tab focus | enter sort | 1-9 column | / search | n/p page | v view | L lang | r refresh | e export | q quit"
    };
    match &ui.status {
        Some(status) => format!("{status} | {default}"),
        None => default.to_owned(),
    }
}

fn physical_order<T>(mut items: Vec<T>, direction: TextDirection) -> Vec<T> {
    if direction.is_rtl() {
        items.reverse();
    }
    items
}

fn physical_alignment(alignment: ColumnAlignment, direction: TextDirection) -> Alignment {
    match (alignment, direction) {
        (ColumnAlignment::Center, _) => Alignment::Center,
        (ColumnAlignment::Start, TextDirection::Ltr) | (ColumnAlignment::End, TextDirection::Rtl) => {
            Alignment::Left
        }
        (ColumnAlignment::Start, TextDirection::Rtl) | (ColumnAlignment::End, TextDirection::Ltr) => {
            Alignment::Right
        }
    }
}

fn width_constraint(width: Option<ColumnWidth>) -> Constraint {
    match width {
        Some(ColumnWidth::Fixed(cells)) => Constraint::Length(cells),
        Some(ColumnWidth::Flex(weight)) => Constraint::Fill(weight.max(1)),
        Some(ColumnWidth::Percent(percent)) => Constraint::Percentage(percent.min(100)),
        None => Constraint::Fill(1),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        InternalEvent, TableRuntime, UiCommand, UiOptions, UiState, card_lines, handle_key_event,
        header_label, pagination_line, physical_alignment, process_internal_events, render,
        search_line, sort_targets, status_text, ui_command_for_key, viewport_for_width,
        width_constraint,
    };
    use anyhow::Result;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use jadwal_core::{
        Alignment as ColumnAlignment, ColumnId, ColumnWidth, Locale, PaginationOptions,
        PresentationPreference, SearchOptions, SortDescriptor, SortDirection, SortEvent, SortMode,
        TableEngine, TableOptions, TableView, TextDirection, ViewBody, Viewport,
    };
    use jadwal_testkit::{Member, member_columns, named_members};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::{Alignment, Constraint};
    use ratatui::text::Line;
    use std::path::PathBuf;
    use std::sync::mpsc;

    const PAGE_SIZE: usize = 2;

    struct TestRuntime {
        engine: TableEngine<Member>,
        members: Vec<Member>,
        query: String,
        page: usize,
        loading: bool,
        refreshes: usize,
        exports: usize,
    }

    impl TestRuntime {
        fn new() -> Self {
            let options = TableOptions {
                search: SearchOptions {
                    enabled: true,
                    ..SearchOptions::default()
                },
                ..TableOptions::default()
            };
            let engine = TableEngine::new(member_columns(Locale::En), SortMode::default(), options)
                .expect("member columns should be valid");
            Self {
                engine,
                members: named_members(&[
                    ("Basma", "basma@x"),
                    ("Adel", "adel@x"),
                    ("Carim", "carim@x"),
                ]),
                query: String::new(),
                page: 1,
                loading: false,
                refreshes: 0,
                exports: 0,
            }
        }
    }

    impl TableRuntime for TestRuntime {
        fn table_view(&mut self, viewport: Viewport) -> Result<TableView> {
            let query = self.query.to_lowercase();
            let filtered = self
                .members
                .iter()
                .filter(|member| member.name.to_lowercase().contains(&query))
                .cloned()
                .collect::<Vec<_>>();
            let total = filtered.len().div_ceil(PAGE_SIZE).max(1);
            self.page = self.page.clamp(1, total);
            let rows = filtered
                .into_iter()
                .skip((self.page - 1) * PAGE_SIZE)
                .take(PAGE_SIZE)
                .collect::<Vec<_>>();

            let options = self.engine.options_mut();
            options.viewport = viewport;
            options.loading = self.loading;
            options.search.value = self.query.clone();
            options.pagination = PaginationOptions {
                enabled: true,
                current_page: self.page,
                total_pages: total,
                ..PaginationOptions::default()
            };
            Ok(self.engine.view(&rows))
        }

        fn request_sort(&mut self, column: &ColumnId) -> Result<Option<SortEvent>> {
            Ok(self.engine.request_sort(column.as_str()))
        }

        fn set_search(&mut self, query: &str) -> Result<()> {
            self.query = query.to_owned();
            self.page = 1;
            Ok(())
        }

        fn go_to_page(&mut self, page: usize) -> Result<()> {
            self.page = page;
            Ok(())
        }

        fn cycle_presentation(&mut self) -> Result<PresentationPreference> {
            let options = self.engine.options_mut();
            options.preference = options.preference.next();
            Ok(options.preference)
        }

        fn toggle_locale(&mut self) -> Result<Locale> {
            let locale = self.engine.options().locale.toggled();
            self.engine.set_columns(member_columns(locale))?;
            self.engine.options_mut().locale = locale;
            Ok(locale)
        }

        fn begin_refresh(&mut self) -> Result<()> {
            self.loading = true;
            self.refreshes += 1;
            Ok(())
        }

        fn finish_refresh(&mut self) -> Result<()> {
            self.loading = false;
            self.query.clear();
            self.page = 1;
            Ok(())
        }

        fn export_csv(&mut self) -> Result<PathBuf> {
            self.exports += 1;
            Ok(PathBuf::from("members.csv"))
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(runtime: &mut TestRuntime, ui: &mut UiState, code: KeyCode) -> Result<bool> {
        let (tx, _rx) = mpsc::channel();
        let quit = handle_key_event(runtime, ui, &tx, UiOptions::default(), key(code));
        refresh(runtime, ui)?;
        Ok(quit)
    }

    fn refresh(runtime: &mut TestRuntime, ui: &mut UiState) -> Result<()> {
        let view = runtime.table_view(ui.viewport)?;
        ui.set_view(view);
        Ok(())
    }

    fn ready() -> Result<(TestRuntime, UiState)> {
        let mut runtime = TestRuntime::new();
        let mut ui = UiState::default();
        refresh(&mut runtime, &mut ui)?;
        Ok((runtime, ui))
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn key_mapping_covers_table_commands() {
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('1'))),
            Some(UiCommand::SortNth(0))
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('9'))),
            Some(UiCommand::SortNth(8))
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Tab)),
            Some(UiCommand::FocusNext)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::BackTab)),
            Some(UiCommand::FocusPrev)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Enter)),
            Some(UiCommand::SortFocused)
        );
        assert_eq!(
            ui_command_for_key(key(KeyCode::Char('L'))),
            Some(UiCommand::ToggleLocale)
        );
        assert_eq!(ui_command_for_key(key(KeyCode::Char('0'))), None);
        assert_eq!(
            ui_command_for_key(key(KeyCode::Esc)),
            Some(UiCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_and_q_quit() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        let (tx, _rx) = mpsc::channel();
        assert!(handle_key_event(
            &mut runtime,
            &mut ui,
            &tx,
            UiOptions::default(),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ));
        assert!(press(&mut runtime, &mut ui, KeyCode::Char('q'))?);
        Ok(())
    }

    #[test]
    fn number_keys_walk_the_sort_cycle() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;

        press(&mut runtime, &mut ui, KeyCode::Char('1'))?;
        assert_eq!(
            runtime.engine.descriptor(),
            &SortDescriptor::new("name", SortDirection::Asc)
        );
        assert_eq!(ui.status.as_deref(), Some("sort Name asc"));

        press(&mut runtime, &mut ui, KeyCode::Char('1'))?;
        assert_eq!(ui.status.as_deref(), Some("sort Name desc"));

        press(&mut runtime, &mut ui, KeyCode::Char('1'))?;
        assert_eq!(runtime.engine.descriptor(), &SortDescriptor::unsorted());
        assert_eq!(ui.status.as_deref(), Some("sort cleared"));
        Ok(())
    }

    #[test]
    fn focus_moves_between_sortable_columns() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;

        press(&mut runtime, &mut ui, KeyCode::Tab)?;
        assert_eq!(ui.focus, 1);
        press(&mut runtime, &mut ui, KeyCode::Enter)?;
        assert_eq!(
            runtime.engine.descriptor(),
            &SortDescriptor::new("email", SortDirection::Asc)
        );

        press(&mut runtime, &mut ui, KeyCode::BackTab)?;
        press(&mut runtime, &mut ui, KeyCode::BackTab)?;
        let targets = ui.view.as_ref().map(sort_targets).unwrap_or_default();
        assert_eq!(ui.focus, targets.len() - 1);
        Ok(())
    }

    #[test]
    fn search_edits_filter_live_and_escape_clears() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;

        press(&mut runtime, &mut ui, KeyCode::Char('/'))?;
        assert_eq!(ui.search_input.as_deref(), Some(""));
        press(&mut runtime, &mut ui, KeyCode::Char('a'))?;
        press(&mut runtime, &mut ui, KeyCode::Char('d'))?;
        assert_eq!(runtime.query, "ad");
        assert!(status_text(&ui).starts_with("type to filter"));

        let view = ui.view.as_ref().expect("view should be built");
        assert_eq!(view.body.len(), 1);

        press(&mut runtime, &mut ui, KeyCode::Enter)?;
        assert_eq!(ui.search_input, None);
        assert_eq!(runtime.query, "ad");

        press(&mut runtime, &mut ui, KeyCode::Char('/'))?;
        press(&mut runtime, &mut ui, KeyCode::Esc)?;
        assert_eq!(runtime.query, "");
        assert_eq!(ui.status.as_deref(), Some("search cleared"));
        Ok(())
    }

    #[test]
    fn page_keys_stop_at_the_edges() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;

        press(&mut runtime, &mut ui, KeyCode::Char('p'))?;
        assert_eq!(ui.status.as_deref(), Some("already on first page"));

        press(&mut runtime, &mut ui, KeyCode::Char('n'))?;
        assert_eq!(runtime.page, 2);
        assert_eq!(ui.status.as_deref(), Some("page 2 of 2"));

        press(&mut runtime, &mut ui, KeyCode::Char('n'))?;
        assert_eq!(runtime.page, 2);
        assert_eq!(ui.status.as_deref(), Some("already on last page"));
        Ok(())
    }

    #[test]
    fn refresh_blocks_sorting_until_done() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        let (tx, rx) = mpsc::channel();
        let options = UiOptions {
            refresh_delay: std::time::Duration::from_secs(3600),
            ..UiOptions::default()
        };

        handle_key_event(&mut runtime, &mut ui, &tx, options, key(KeyCode::Char('r')));
        refresh(&mut runtime, &mut ui)?;
        assert!(runtime.loading);
        assert!(matches!(
            ui.view.as_ref().map(|view| &view.body),
            Some(ViewBody::Loading { .. })
        ));

        handle_key_event(&mut runtime, &mut ui, &tx, options, key(KeyCode::Char('1')));
        assert_eq!(runtime.engine.descriptor(), &SortDescriptor::unsorted());
        assert_eq!(ui.status.as_deref(), Some("loading; try again shortly"));

        handle_key_event(&mut runtime, &mut ui, &tx, options, key(KeyCode::Char('r')));
        assert_eq!(runtime.refreshes, 1);

        tx.send(InternalEvent::RefreshDone {
            token: ui.refresh_token,
        })?;
        process_internal_events(&mut runtime, &mut ui, &tx, &rx);
        assert!(!runtime.loading);
        assert!(!ui.refreshing);
        assert_eq!(ui.status.as_deref(), Some("refreshed"));
        Ok(())
    }

    #[test]
    fn stale_status_clear_is_ignored() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        let (tx, rx) = mpsc::channel();
        handle_key_event(
            &mut runtime,
            &mut ui,
            &tx,
            UiOptions::default(),
            key(KeyCode::Char('e')),
        );
        assert_eq!(runtime.exports, 1);
        assert_eq!(ui.status.as_deref(), Some("exported members.csv"));

        tx.send(InternalEvent::ClearStatus {
            token: ui.status_token - 1,
        })?;
        process_internal_events(&mut runtime, &mut ui, &tx, &rx);
        assert!(ui.status.is_some());

        tx.send(InternalEvent::ClearStatus {
            token: ui.status_token,
        })?;
        process_internal_events(&mut runtime, &mut ui, &tx, &rx);
        assert_eq!(ui.status, None);
        Ok(())
    }

    #[test]
    fn presentation_and_locale_keys_keep_sort_state() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        press(&mut runtime, &mut ui, KeyCode::Char('2'))?;

        press(&mut runtime, &mut ui, KeyCode::Char('v'))?;
        press(&mut runtime, &mut ui, KeyCode::Char('v'))?;
        assert_eq!(ui.status.as_deref(), Some("view cards"));
        let view = ui.view.as_ref().expect("view should be built");
        assert_eq!(view.sort_controls.len(), 6);

        press(&mut runtime, &mut ui, KeyCode::Char('L'))?;
        assert_eq!(ui.status.as_deref(), Some("language ar"));
        assert_eq!(
            runtime.engine.descriptor(),
            &SortDescriptor::new("email", SortDirection::Asc)
        );
        let view = ui.view.as_ref().expect("view should be built");
        assert_eq!(view.direction, TextDirection::Rtl);
        assert_eq!(view.sort_controls[0].label, "الاسم");
        Ok(())
    }

    #[test]
    fn compact_terminals_get_cards() -> Result<()> {
        assert_eq!(viewport_for_width(80, 100), Viewport::Compact);
        assert_eq!(viewport_for_width(100, 100), Viewport::Regular);

        let mut runtime = TestRuntime::new();
        let mut ui = UiState {
            viewport: Viewport::Compact,
            ..UiState::default()
        };
        refresh(&mut runtime, &mut ui)?;
        let view = ui.view.as_ref().expect("view should be built");
        assert!(matches!(view.body, ViewBody::Cards(_)));
        Ok(())
    }

    #[test]
    fn header_glyph_sits_at_the_logical_end() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        press(&mut runtime, &mut ui, KeyCode::Char('1'))?;
        let view = ui.view.as_ref().expect("view should be built");

        assert_eq!(header_label(&view.headers[0], TextDirection::Ltr), "Name ↑");
        assert_eq!(header_label(&view.headers[0], TextDirection::Rtl), "↑ Name");
        assert_eq!(header_label(&view.headers[1], TextDirection::Ltr), "Email ⇅");
        Ok(())
    }

    #[test]
    fn alignment_and_width_follow_direction() {
        assert_eq!(
            physical_alignment(ColumnAlignment::Start, TextDirection::Ltr),
            Alignment::Left
        );
        assert_eq!(
            physical_alignment(ColumnAlignment::Start, TextDirection::Rtl),
            Alignment::Right
        );
        assert_eq!(
            physical_alignment(ColumnAlignment::End, TextDirection::Rtl),
            Alignment::Left
        );
        assert_eq!(
            width_constraint(Some(ColumnWidth::Fixed(12))),
            Constraint::Length(12)
        );
        assert_eq!(width_constraint(None), Constraint::Fill(1));
    }

    #[test]
    fn pagination_line_reverses_in_rtl() {
        let options = PaginationOptions {
            enabled: true,
            current_page: 2,
            total_pages: 3,
            ..PaginationOptions::default()
        };
        let ltr = options
            .view(Locale::En, false)
            .expect("pagination should be visible");
        assert_eq!(
            line_text(&pagination_line(&ltr, TextDirection::Ltr)),
            "‹ Previous 1 [2] 3 Next ›   Page 2 of 3"
        );

        let rtl = options
            .view(Locale::Ar, false)
            .expect("pagination should be visible");
        assert_eq!(
            line_text(&pagination_line(&rtl, TextDirection::Rtl)),
            "صفحة 2 من 3   ‹ التالي 3 [2] 1 السابق ›"
        );
    }

    #[test]
    fn search_line_shows_placeholder_cursor_and_clear_mark() {
        let search = SearchOptions {
            enabled: true,
            ..SearchOptions::default()
        };
        let idle = search
            .view(Locale::En, false)
            .expect("search should be visible");
        assert_eq!(line_text(&search_line(&idle, None, TextDirection::Ltr)), "Search...");
        assert_eq!(
            line_text(&search_line(&idle, Some("om"), TextDirection::Ltr)),
            "om▏  ✕"
        );
        assert_eq!(
            line_text(&search_line(&idle, Some("om"), TextDirection::Rtl)),
            "  ✕▏om"
        );
    }

    #[test]
    fn card_lines_put_labels_on_the_start_side() -> Result<()> {
        let mut runtime = TestRuntime::new();
        runtime.engine.options_mut().preference = PresentationPreference::Cards;
        runtime.toggle_locale()?;
        let view = runtime.table_view(Viewport::Regular)?;
        let ViewBody::Cards(cards) = &view.body else {
            panic!("expected cards, got {:?}", view.body);
        };

        let lines = card_lines(cards, view.direction);
        assert_eq!(line_text(&lines[0]), "Basma :الاسم");
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
        assert_eq!(lines.len(), 6 * 2 + 1);

        let ltr = card_lines(cards, TextDirection::Ltr);
        assert_eq!(line_text(&ltr[0]), "الاسم: Basma");
        Ok(())
    }

    #[test]
    fn rendered_table_shows_headers_rows_and_chrome() -> Result<()> {
        let (_, ui) = ready()?;
        let mut terminal = Terminal::new(TestBackend::new(120, 20))?;
        terminal.draw(|frame| render(frame, &ui))?;
        let text = buffer_text(&terminal);

        assert!(text.contains("Name ⇅"));
        assert!(text.contains("Basma"));
        assert!(text.contains("Page 1 of 2"));
        assert!(text.contains("Search..."));
        assert!(text.contains("jadwal · table · en"));
        Ok(())
    }

    #[test]
    fn rendered_empty_state_keeps_headers() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        runtime.set_search("zzz")?;
        refresh(&mut runtime, &mut ui)?;

        let mut terminal = Terminal::new(TestBackend::new(120, 20))?;
        terminal.draw(|frame| render(frame, &ui))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("No results found"));
        assert!(text.contains("Email ⇅"));
        Ok(())
    }

    #[test]
    fn rendered_rtl_table_reverses_columns() -> Result<()> {
        let (mut runtime, mut ui) = ready()?;
        press(&mut runtime, &mut ui, KeyCode::Char('L'))?;

        let mut terminal = Terminal::new(TestBackend::new(160, 20))?;
        terminal.draw(|frame| render(frame, &ui))?;
        let text = buffer_text(&terminal);
        let name = text.find("الاسم").expect("name header should render");
        let email = text
            .find("البريد الإلكتروني")
            .expect("email header should render");
        assert!(email < name);
        Ok(())
    }
}
