// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use quotedesk_app::{
    AppCommand, AppEvent, AppState, EditableField, FieldChange, PAGE_SIZES, Quote, QuoteId,
    QuoteRepository, RowStyle, parse_field, yes_no,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::Date;
use tracing::debug;

const EXPAND_CLOSED: &str = "▸";
const EXPAND_OPEN: &str = "▾";
const DESCRIPTION_WIDTH: usize = 40;
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);

const COLUMN_LABELS: [&str; 9] = [
    "",
    "Item Name",
    "Item Description",
    "Supplier",
    "Quote Date",
    "First Cost ($)",
    "Retail Price ($)",
    "Committed",
    "Actions",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum UiMode {
    #[default]
    Nav,
    Edit {
        id: QuoteId,
        field: usize,
    },
    Input {
        id: QuoteId,
        field: usize,
        text: String,
    },
    PageJump {
        text: String,
    },
}

impl UiMode {
    fn editing_id(&self) -> Option<&QuoteId> {
        match self {
            Self::Edit { id, .. } | Self::Input { id, .. } => Some(id),
            Self::Nav | Self::PageJump { .. } => None,
        }
    }

    fn focused_field(&self) -> Option<EditableField> {
        match self {
            Self::Edit { field, .. } | Self::Input { field, .. } => Some(field_at(*field)),
            Self::Nav | Self::PageJump { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    mode: UiMode,
    help_visible: bool,
    status_token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableLine {
    Quote {
        cells: [String; 9],
        style: RowStyle,
        selected: bool,
        focused_column: Option<usize>,
    },
    MaterialHeader,
    Material {
        description: String,
        cost: String,
    },
    NoMaterials,
}

pub fn run_app<R: QuoteRepository + ?Sized>(state: &mut AppState, repo: &mut R) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(state, repo, &view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &*repo, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if !has_event {
            continue;
        }
        match event::read().context("read event") {
            Ok(Event::Key(key)) => {
                if handle_key_event(state, repo, &mut view_data, &internal_tx, key) {
                    break;
                }
            }
            Ok(_) => {}
            Err(error) => {
                result = Err(error);
                break;
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(repo, AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

/// Dispatches `command` and keeps the view in step with the resulting events.
fn apply_command<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) -> Vec<AppEvent> {
    let events = state.dispatch(repo, command);
    for event in &events {
        match event {
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            AppEvent::QuoteSaved(id) | AppEvent::EditCancelled(id) => {
                if view_data.mode.editing_id() == Some(id) {
                    view_data.mode = UiMode::Nav;
                }
            }
            _ => {}
        }
    }
    debug!(?events, "dispatched");
    events
}

fn emit_status<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    apply_command(
        state,
        repo,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn handle_key_event<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match view_data.mode.clone() {
        UiMode::Nav => return handle_nav_key(state, repo, view_data, internal_tx, key),
        UiMode::Edit { id, field } => {
            handle_edit_key(state, repo, view_data, internal_tx, id, field, key);
        }
        UiMode::Input { id, field, text } => {
            handle_input_key(state, repo, view_data, internal_tx, id, field, text, key);
        }
        UiMode::PageJump { text } => {
            handle_page_jump_key(state, repo, view_data, internal_tx, text, key);
        }
    }
    false
}

fn handle_nav_key<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let command = match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => Some(AppCommand::MoveCursor(1)),
        KeyCode::Char('k') | KeyCode::Up => Some(AppCommand::MoveCursor(-1)),
        KeyCode::Char('n') | KeyCode::PageDown => Some(AppCommand::NextPage),
        KeyCode::Char('p') | KeyCode::PageUp => Some(AppCommand::PrevPage),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Some(next_page_size(state.pager.page_size(), true))
        }
        KeyCode::Char('-') => Some(next_page_size(state.pager.page_size(), false)),
        KeyCode::Char('g') => {
            view_data.mode = UiMode::PageJump {
                text: String::new(),
            };
            None
        }
        KeyCode::Char('?') => {
            view_data.help_visible = true;
            None
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            state.selected_id(&*repo).map(AppCommand::ToggleExpand)
        }
        KeyCode::Char('e') => {
            if let Some(id) = state.selected_id(&*repo) {
                apply_command(
                    state,
                    repo,
                    view_data,
                    internal_tx,
                    AppCommand::BeginEdit(id.clone()),
                );
                if state.sessions.is_editing(&id) {
                    view_data.mode = UiMode::Edit { id, field: 0 };
                }
            }
            None
        }
        _ => None,
    };
    if let Some(command) = command {
        apply_command(state, repo, view_data, internal_tx, command);
    }
    false
}

fn handle_edit_key<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: QuoteId,
    field: usize,
    key: KeyEvent,
) {
    let last_field = EditableField::ALL.len() - 1;
    match key.code {
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            view_data.mode = UiMode::Edit {
                id,
                field: field.saturating_sub(1),
            };
        }
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            view_data.mode = UiMode::Edit {
                id,
                field: (field + 1).min(last_field),
            };
        }
        KeyCode::Char('i') | KeyCode::Enter => {
            if field_at(field) == EditableField::CommittedFlag {
                toggle_committed(state, repo, view_data, internal_tx, &id);
                return;
            }
            let text = repo
                .get(&id)
                .map(|quote| input_prefill(state, quote, field_at(field)))
                .unwrap_or_default();
            view_data.mode = UiMode::Input { id, field, text };
        }
        KeyCode::Char(' ') => toggle_committed(state, repo, view_data, internal_tx, &id),
        KeyCode::Char('[') => shift_quote_date(state, repo, view_data, internal_tx, &id, -1),
        KeyCode::Char(']') => shift_quote_date(state, repo, view_data, internal_tx, &id, 1),
        KeyCode::Char('s') => {
            apply_command(state, repo, view_data, internal_tx, AppCommand::Save(id));
        }
        KeyCode::Char('b') => {
            view_data.mode = UiMode::Nav;
            emit_status(
                state,
                repo,
                view_data,
                internal_tx,
                format!("edit of {id} kept open; press e on it to resume"),
            );
        }
        KeyCode::Esc => {
            apply_command(
                state,
                repo,
                view_data,
                internal_tx,
                AppCommand::Cancel(id),
            );
            view_data.mode = UiMode::Nav;
        }
        _ => {}
    }
}

#[allow(clippy::too_many_arguments)]
fn handle_input_key<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: QuoteId,
    field: usize,
    mut text: String,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => {
            view_data.mode = UiMode::Edit { id, field };
        }
        KeyCode::Enter => {
            view_data.mode = UiMode::Edit {
                id: id.clone(),
                field,
            };
            match parse_field(field_at(field), &text) {
                Ok(change) => {
                    apply_command(
                        state,
                        repo,
                        view_data,
                        internal_tx,
                        AppCommand::ChangeField(id, change),
                    );
                }
                Err(error) => emit_status(state, repo, view_data, internal_tx, error.to_string()),
            }
        }
        KeyCode::Backspace => {
            text.pop();
            view_data.mode = UiMode::Input { id, field, text };
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            text.push(ch);
            view_data.mode = UiMode::Input { id, field, text };
        }
        _ => {}
    }
}

fn handle_page_jump_key<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mut text: String,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc => view_data.mode = UiMode::Nav,
        KeyCode::Enter => {
            view_data.mode = UiMode::Nav;
            match text.parse::<usize>() {
                Ok(page) if page >= 1 => {
                    apply_command(
                        state,
                        repo,
                        view_data,
                        internal_tx,
                        AppCommand::GoToPage(page - 1),
                    );
                }
                _ => emit_status(
                    state,
                    repo,
                    view_data,
                    internal_tx,
                    format!("page {text:?} is not a page number -- type 1 or higher"),
                ),
            }
        }
        KeyCode::Backspace => {
            text.pop();
            view_data.mode = UiMode::PageJump { text };
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            text.push(ch);
            view_data.mode = UiMode::PageJump { text };
        }
        _ => {}
    }
}

fn toggle_committed<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: &QuoteId,
) {
    let Some(current) = repo
        .get(id)
        .map(|quote| state.sessions.display(quote).committed_flag)
    else {
        return;
    };
    apply_command(
        state,
        repo,
        view_data,
        internal_tx,
        AppCommand::ChangeField(id.clone(), FieldChange::CommittedFlag(!current)),
    );
}

fn shift_quote_date<R: QuoteRepository + ?Sized>(
    state: &mut AppState,
    repo: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    id: &QuoteId,
    days: i64,
) {
    let Some(next) = repo
        .get(id)
        .and_then(|quote| shift_date_by_days(state.sessions.display(quote).quote_date, days))
    else {
        return;
    };
    apply_command(
        state,
        repo,
        view_data,
        internal_tx,
        AppCommand::ChangeField(id.clone(), FieldChange::QuoteDate(next)),
    );
}

fn next_page_size(current: usize, grow: bool) -> AppCommand {
    let next = if grow {
        PAGE_SIZES.iter().copied().find(|size| *size > current)
    } else {
        PAGE_SIZES.iter().rev().copied().find(|size| *size < current)
    };
    match next {
        Some(size) => AppCommand::SetPageSize(size),
        None => AppCommand::SetStatus(format!("{current} / page is already the limit")),
    }
}

fn input_prefill(state: &AppState, quote: &Quote, field: EditableField) -> String {
    let shown = state.sessions.display_field(quote, field);
    shown.trim_start_matches('$').to_owned()
}

fn field_at(index: usize) -> EditableField {
    EditableField::ALL[index.min(EditableField::ALL.len() - 1)]
}

const fn column_for_field(field: EditableField) -> usize {
    match field {
        EditableField::QuoteDate => 4,
        EditableField::FirstCost => 5,
        EditableField::RetailPrice => 6,
        EditableField::CommittedFlag => 7,
    }
}

fn shift_date_by_days(date: Date, days: i64) -> Option<Date> {
    date.checked_add(time::Duration::days(days))
}

fn table_lines(state: &AppState, view_data: &ViewData, quotes: &[Quote]) -> Vec<TableLine> {
    let mut lines = Vec::new();
    let range = state.pager.range(quotes.len());
    let start = range.start;
    for (offset, quote) in quotes[range].iter().enumerate() {
        let expanded = state.is_expanded(&quote.id);
        let row = state.sessions.display(quote);
        let style = state.sessions.row_style(&quote.id);
        let actions = match style {
            RowStyle::Normal => "e edit",
            RowStyle::Editing => "s save | esc cancel",
            RowStyle::Unsaved => "s save* | esc cancel",
        };
        let focused_column = if view_data.mode.editing_id() == Some(&quote.id) {
            view_data.mode.focused_field().map(column_for_field)
        } else {
            None
        };
        lines.push(TableLine::Quote {
            cells: [
                (if expanded { EXPAND_OPEN } else { EXPAND_CLOSED }).to_owned(),
                quote.item_name.clone(),
                truncate_label(&quote.item_description, DESCRIPTION_WIDTH),
                quote.supplier.name.clone(),
                quotedesk_app::iso_date::format(row.quote_date),
                row.first_cost.to_string(),
                row.retail_price.to_string(),
                yes_no(row.committed_flag).to_owned(),
                actions.to_owned(),
            ],
            style,
            selected: start + offset == state.cursor,
            focused_column,
        });

        if !expanded {
            continue;
        }
        lines.push(TableLine::MaterialHeader);
        if quote.materials().is_empty() {
            lines.push(TableLine::NoMaterials);
        }
        for material in quote.materials() {
            lines.push(TableLine::Material {
                description: material.material_description.clone(),
                cost: material.cost_per_selling_unit.to_string(),
            });
        }
    }
    lines
}

fn render<R: QuoteRepository + ?Sized>(
    frame: &mut ratatui::Frame<'_>,
    state: &AppState,
    repo: &R,
    view_data: &ViewData,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(header_text(state, repo.quotes().len()))
        .block(Block::default().title("quotedesk").borders(Borders::ALL));
    frame.render_widget(header, layout[0]);

    render_table(frame, layout[1], state, repo.quotes(), view_data);

    let status_widget = Paragraph::new(status_text(state, view_data, repo.quotes().len()))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    match &view_data.mode {
        UiMode::Input { field, text, .. } => {
            let area = centered_rect(48, 24, frame.area());
            frame.render_widget(Clear, area);
            let input = Paragraph::new(render_input_overlay_text(field_at(*field), text))
                .block(Block::default().title("edit").borders(Borders::ALL));
            frame.render_widget(input, area);
        }
        UiMode::PageJump { text } => {
            let area = centered_rect(40, 20, frame.area());
            frame.render_widget(Clear, area);
            let page_count = state.pager.page_count(repo.quotes().len());
            let jump = Paragraph::new(render_page_jump_text(text, page_count))
                .block(Block::default().title("go to page").borders(Borders::ALL));
            frame.render_widget(jump, area);
        }
        UiMode::Nav | UiMode::Edit { .. } => {}
    }

    if view_data.help_visible {
        let area = centered_rect(70, 70, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_table(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &AppState,
    quotes: &[Quote],
    view_data: &ViewData,
) {
    let widths = [
        Constraint::Length(2),
        Constraint::Min(14),
        Constraint::Min(20),
        Constraint::Min(14),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Min(20),
    ];

    let header = Row::new(COLUMN_LABELS.iter().map(|label| {
        Cell::from(*label).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows = table_lines(state, view_data, quotes)
        .into_iter()
        .map(|line| match line {
            TableLine::Quote {
                cells,
                style,
                selected,
                focused_column,
            } => {
                let mut base = match style {
                    RowStyle::Normal => Style::default(),
                    RowStyle::Editing => Style::default().fg(Color::Cyan),
                    RowStyle::Unsaved => Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                };
                if selected {
                    base = base.bg(Color::DarkGray);
                }
                let cells = cells
                    .into_iter()
                    .enumerate()
                    .map(|(column, text)| {
                        let style = if focused_column == Some(column) {
                            Style::default()
                                .fg(Color::Black)
                                .bg(Color::Cyan)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            base
                        };
                        Cell::from(text).style(style)
                    })
                    .collect::<Vec<_>>();
                Row::new(cells)
            }
            TableLine::MaterialHeader => nested_row(
                "Component Material Costing",
                "Cost / Unit",
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ),
            TableLine::Material { description, cost } => nested_row(
                format!("  {description}"),
                cost,
                Style::default().fg(Color::Gray),
            ),
            TableLine::NoMaterials => nested_row(
                "  no material costing",
                "",
                Style::default().fg(Color::DarkGray),
            ),
        });

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(format!("quotes ({})", state.pager.summary(quotes.len())))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn nested_row(
    description: impl Into<String>,
    cost: impl Into<String>,
    style: Style,
) -> Row<'static> {
    let mut cells = vec![Cell::from(""); COLUMN_LABELS.len()];
    cells[2] = Cell::from(description.into());
    cells[5] = Cell::from(cost.into());
    Row::new(cells).style(style)
}

fn header_text(state: &AppState, total: usize) -> String {
    let editing = state.sessions.editing_count();
    let page = state.pager.page() + 1;
    let pages = state.pager.page_count(total);
    format!(
        "{total} quotes | page {page}/{pages} | {} / page | {editing} editing",
        state.pager.page_size()
    )
}

fn status_text(state: &AppState, view_data: &ViewData, total: usize) -> String {
    let (mode, hints) = match view_data.mode {
        UiMode::Nav => (
            "NAV",
            "j/k rows | n/p pages | +/- size | g page | enter expand | e edit | ? help | q quit",
        ),
        UiMode::Edit { .. } => (
            "EDIT",
            "h/l field | i/enter type | space committed | [/] date | s save | b back | esc cancel",
        ),
        UiMode::Input { .. } => ("EDIT", "enter apply | esc back"),
        UiMode::PageJump { .. } => ("PAGE", "enter go | esc back"),
    };
    let summary = state.pager.summary(total);
    match &state.status_line {
        Some(status) => format!("{mode} | {summary} | {status} | {hints}"),
        None => format!("{mode} | {summary} | {hints}"),
    }
}

fn render_input_overlay_text(field: EditableField, text: &str) -> String {
    let hint = match field {
        EditableField::QuoteDate => "YYYY-MM-DD",
        EditableField::FirstCost | EditableField::RetailPrice => "dollars, e.g. 12.50",
        EditableField::CommittedFlag => "yes or no",
    };
    format!("{}: {text}_\n\n{hint}\nenter apply | esc back", field.label())
}

fn render_page_jump_text(text: &str, page_count: usize) -> String {
    format!("page (1-{page_count}): {text}_")
}

fn help_overlay_text() -> &'static str {
    "j/k, up/down   move between rows
n/p            next / previous page
+/-            change page size (10, 20, 50, 100)
g              jump to a page
enter/space    expand or collapse material costing
e              edit the selected quote

while editing
h/l            choose field
i/enter        type a new value
space          toggle committed
[ / ]          move the quote date by one day
s              save
b              back to rows, keep the edit open
esc            cancel and discard changes

q, ctrl+q      quit
?/esc          close help"
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
