// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! A ratatui/crossterm shell around [`Dashboard`]: it turns keys and mouse events into dashboard
//! events, hands the resulting effects to an [`EffectRunner`], and drains completions from a
//! channel between frames.

use std::{
    error::Error,
    io,
    mem,
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::warn;

use crate::api::Backend;
use crate::compose::PublishDraft;
use crate::dashboard::{Dashboard, Effect, Event, Mode, Notice, NoticeKind};
use crate::editor::{BufferEdit, EditSession, EditorField, RewriteKind, TextBuffer};
use crate::model::{Item, ItemId};
use crate::paginator::{PageButton, PageButtonKind};
use crate::runtime::EffectRunner;
use crate::selection::{
    selected_text, Anchor, ScrollOffset, SelectionRect, TextPoint, TextSelection,
};

use self::table::VisibleRow;

mod table;

const FOCUS_COLOR: Color = Color::LightGreen;
const ALERT_COLOR: Color = Color::LightRed;
const CURRENT_PAGE_COLOR: Color = Color::LightGreen;
const EDITING_ROW_COLOR: Color = Color::LightYellow;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "curator";
const POPUP_WIDTH: u16 = 64;
const POPUP_HEIGHT: u16 = 14;
const POLL_INTERVAL: Duration = Duration::from_millis(50);
const TOAST_DURATION: Duration = Duration::from_secs(2);
const WHEEL_STEP: isize = 3;

/// Runs the dashboard until the user quits.
///
/// Must be called off the runtime's worker thread (e.g. from `spawn_blocking`); network effects
/// are spawned onto `handle`.
pub fn run(
    dashboard: Dashboard,
    backend: Arc<dyn Backend>,
    handle: Handle,
) -> Result<(), Box<dyn Error>> {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let runner = EffectRunner::new(backend, handle, events_tx);

    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(dashboard);
    app.start();

    while !app.should_quit {
        runner.run_all(app.take_effects());
        while let Ok(event) = events_rx.try_recv() {
            app.dispatch(event);
        }
        runner.run_all(app.take_effects());

        app.expire_toast(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                TermEvent::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if let Some(link) = app.link_request.take() {
            let result = webbrowser::open(&link);
            app.link_opened(&link, result);
        }
    }

    Ok(())
}

// Extracted header/footer/modal/help rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

/// Hit-test geometry recorded by the last draw.
#[derive(Debug, Clone, Default)]
struct ViewLayout {
    table_area: Rect,
    rows: Vec<VisibleRow>,
    popup: Option<Rect>,
    page_buttons: Vec<(Rect, PageButton)>,
}

impl ViewLayout {
    fn row_at(&self, column: u16, row: u16) -> Option<&VisibleRow> {
        if !rect_contains(self.table_area, column, row) {
            return None;
        }
        self.rows.iter().find(|visible| row >= visible.y && row < visible.y + visible.height)
    }

    fn page_button_at(&self, column: u16, row: u16) -> Option<PageButton> {
        self.page_buttons
            .iter()
            .find(|(area, _)| rect_contains(*area, column, row))
            .map(|(_, button)| *button)
    }
}

/// A mouse drag in progress inside one summary cell.
#[derive(Debug, Clone, Copy)]
struct Drag {
    item_id: ItemId,
    row: VisibleRow,
    cell: Rect,
    start: (u16, u16),
    end: (u16, u16),
}

impl Drag {
    fn points(&self, summary: &str) -> (TextPoint, TextPoint) {
        let wrapped = table::wrap_summary(summary, self.cell.width);
        (
            table::text_point_at(&wrapped, self.cell, &self.row, self.start.0, self.start.1),
            table::text_point_at(&wrapped, self.cell, &self.row, self.end.0, self.end.1),
        )
    }
}

struct App {
    dashboard: Dashboard,
    effects: Vec<Effect>,
    cursor: usize,
    scroll_y: usize,
    seen_revision: u64,
    detail_visible: bool,
    show_help: bool,
    help_scroll: u16,
    toast: Option<Toast>,
    drag: Option<Drag>,
    /// Link waiting to be handed to the system browser by the run loop.
    link_request: Option<String>,
    view: ViewLayout,
    should_quit: bool,
}

impl App {
    fn new(dashboard: Dashboard) -> Self {
        let seen_revision = dashboard.paginator().revision();
        Self {
            dashboard,
            effects: Vec::new(),
            cursor: 0,
            scroll_y: 0,
            seen_revision,
            detail_visible: false,
            show_help: false,
            help_scroll: 0,
            toast: None,
            drag: None,
            link_request: None,
            view: ViewLayout::default(),
            should_quit: false,
        }
    }

    fn start(&mut self) {
        let effects = self.dashboard.start();
        self.effects.extend(effects);
    }

    fn take_effects(&mut self) -> Vec<Effect> {
        mem::take(&mut self.effects)
    }

    fn items(&self) -> &[Item] {
        self.dashboard.paginator().items()
    }

    /// The row under the cursor. Rows hidden behind a fetch error cannot be highlighted.
    fn highlighted(&self) -> Option<&Item> {
        if self.dashboard.paginator().error().is_some() {
            return None;
        }
        self.items().get(self.cursor)
    }

    fn dispatch(&mut self, event: Event) {
        let effects = self.dashboard.dispatch(event);
        self.effects.extend(effects);

        let revision = self.dashboard.paginator().revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.cursor = 0;
            self.scroll_y = 0;
            self.drag = None;
        }
        self.cursor = self.cursor.min(self.items().len().saturating_sub(1));
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast { message: message.into(), expires_at: Instant::now() + TOAST_DURATION });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }

    fn toast_suffix(&self) -> String {
        self.toast.as_ref().map(|toast| format!("  {}", toast.message)).unwrap_or_default()
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            self.handle_help_key(key);
            return;
        }

        match self.dashboard.mode() {
            Mode::Notice => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.dispatch(Event::DismissNotice);
                }
            }
            Mode::ConfirmPublish => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.dispatch(Event::PublishAnswered { accepted: true });
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.dispatch(Event::PublishAnswered { accepted: false });
                }
                _ => {}
            },
            Mode::Editing | Mode::Busy => self.handle_editor_key(key),
            Mode::Browsing => self.handle_browse_key(key),
        }
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                self.show_help = false;
                self.help_scroll = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => self.help_scroll = self.help_scroll.saturating_add(1),
            KeyCode::Char('k') | KeyCode::Up => self.help_scroll = self.help_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_cursor(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-1),
            KeyCode::Char('g') | KeyCode::Home => self.move_cursor(isize::MIN),
            KeyCode::Char('G') | KeyCode::End => self.move_cursor(isize::MAX),
            KeyCode::PageDown => self.scroll_by(self.page_height()),
            KeyCode::PageUp => self.scroll_by(-self.page_height()),
            KeyCode::Char('n') | KeyCode::Right | KeyCode::Char(']') => self.dispatch(Event::NextPage),
            KeyCode::Char('p') | KeyCode::Left | KeyCode::Char('[') => {
                self.dispatch(Event::PreviousPage)
            }
            KeyCode::Char('1') => self.jump_if_shown(0),
            KeyCode::Char('2') => self.jump_if_shown(1),
            KeyCode::Char('r') => self.dispatch(Event::Reload),
            KeyCode::Enter | KeyCode::Char('e') => self.select_highlighted_summary(),
            KeyCode::Char('o') => self.open_highlighted_link(),
            KeyCode::Char('P') => {
                if let Some(id) = self.highlighted().map(|item| item.id) {
                    self.dispatch(Event::PublishItem(id));
                }
            }
            KeyCode::Char('y') => self.yank(|item| item.summary.clone(), "summary"),
            KeyCode::Char('Y') => self.yank(|item| item.link.clone(), "link"),
            KeyCode::Char('d') => self.detail_visible = !self.detail_visible,
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let event = match (ctrl, key.code) {
            (_, KeyCode::Esc) => Event::Cancel,
            (true, KeyCode::Char('s')) => Event::Rewrite(RewriteKind::Shrink),
            (true, KeyCode::Char('g')) => Event::Rewrite(RewriteKind::Expand),
            (true, KeyCode::Char('r')) => Event::Rewrite(RewriteKind::Instruct),
            (true, KeyCode::Char('o')) => Event::Confirm,
            (true, KeyCode::Char('p')) => Event::PublishWorkingCopy,
            (_, KeyCode::Tab | KeyCode::BackTab) => Event::ToggleFocus,
            (false, KeyCode::Char(ch)) => Event::Edit(BufferEdit::Insert(ch)),
            (_, KeyCode::Enter) => Event::Edit(BufferEdit::Newline),
            (_, KeyCode::Backspace) => Event::Edit(BufferEdit::Backspace),
            (_, KeyCode::Delete) => Event::Edit(BufferEdit::Delete),
            (_, KeyCode::Left) => Event::Edit(BufferEdit::Left),
            (_, KeyCode::Right) => Event::Edit(BufferEdit::Right),
            (_, KeyCode::Up) => Event::Edit(BufferEdit::Up),
            (_, KeyCode::Down) => Event::Edit(BufferEdit::Down),
            (_, KeyCode::Home) => Event::Edit(BufferEdit::Home),
            (_, KeyCode::End) => Event::Edit(BufferEdit::End),
            _ => return,
        };

        if matches!(event, Event::Rewrite(_)) && self.dashboard.mode() == Mode::Busy {
            self.set_toast("Rewrite in progress");
            return;
        }
        self.dispatch(event);
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help || matches!(self.dashboard.mode(), Mode::Notice | Mode::ConfirmPublish) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(column, row),
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.end = clamp_into(drag.cell, column, row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(drag) = self.drag.take() {
                    self.finish_drag(drag);
                }
            }
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP),
            _ => {}
        }
    }

    fn pointer_down(&mut self, column: u16, row: u16) {
        if self.dashboard.editor().is_open() {
            let inside_popup =
                self.view.popup.is_some_and(|popup| rect_contains(popup, column, row));
            self.dispatch(Event::PointerDown { inside_popup });
            if inside_popup {
                return;
            }
        }

        if let Some(button) = self.view.page_button_at(column, row) {
            self.activate_page_button(button);
            return;
        }

        let Some(visible) = self.view.row_at(column, row).copied() else {
            return;
        };
        self.cursor = visible.index;
        let title = table::column_cell(self.view.table_area, &visible, table::TITLE_COLUMN);
        if visible.first_line == 0 && row == visible.y && rect_contains(title, column, row) {
            self.open_highlighted_link();
            return;
        }
        let cell = table::summary_cell(self.view.table_area, &visible);
        if rect_contains(cell, column, row) {
            self.drag = Some(Drag {
                item_id: visible.item_id,
                row: visible,
                cell,
                start: (column, row),
                end: (column, row),
            });
        }
    }

    fn finish_drag(&mut self, drag: Drag) {
        // A click without movement selects nothing.
        if drag.start == drag.end {
            return;
        }
        let Some(item) = self.dashboard.paginator().item(drag.item_id) else {
            return;
        };
        let (a, b) = drag.points(&item.summary);
        let text = selected_text(&item.summary, a, b);

        let origin = self.view.table_area;
        let local = |(x, y): (u16, u16)| (x.saturating_sub(origin.x), y.saturating_sub(origin.y));
        let selection = TextSelection {
            item_id: drag.item_id,
            text,
            rect: SelectionRect::spanning(local(drag.start), local(drag.end)),
            scroll: self.scroll_offset(),
        };
        self.dispatch(Event::TextSelected(selection));
    }

    /// Keyboard equivalent of dragging across the whole summary cell of the highlighted row.
    fn select_highlighted_summary(&mut self) {
        let Some(item) = self.highlighted() else {
            return;
        };
        let item_id = item.id;
        let text = item.summary.clone();
        let width = table::summary_width(self.view.table_area.width);
        let top = table::row_top(self.items(), self.cursor, width);
        let bottom = top + table::row_height(item, width);

        self.scroll_y =
            table::scroll_to_row(self.items(), self.cursor, self.scroll_y, self.view.table_area);
        let widths = table::column_widths(self.view.table_area.width);
        let offsets = table::column_offsets(&widths);
        let to_local = |line: usize| u16::try_from(line.saturating_sub(self.scroll_y)).unwrap_or(u16::MAX);

        let selection = TextSelection {
            item_id,
            text,
            rect: SelectionRect {
                top: to_local(top),
                left: offsets[5],
                bottom: to_local(bottom),
                right: offsets[5].saturating_add(widths[5]),
            },
            scroll: self.scroll_offset(),
        };
        self.dispatch(Event::TextSelected(selection));
    }

    fn activate_page_button(&mut self, button: PageButton) {
        if !button.enabled {
            return;
        }
        match button.kind {
            PageButtonKind::Previous => self.dispatch(Event::PreviousPage),
            PageButtonKind::Next => self.dispatch(Event::NextPage),
            PageButtonKind::Jump(page) => self.dispatch(Event::GoToPage(page)),
            PageButtonKind::Current(_) => {}
        }
    }

    fn jump_if_shown(&mut self, page: usize) {
        let button = self
            .dashboard
            .paginator()
            .page_buttons()
            .into_iter()
            .find(|button| button.kind == PageButtonKind::Jump(page));
        if let Some(button) = button {
            self.activate_page_button(button);
        }
    }

    fn scroll_offset(&self) -> ScrollOffset {
        ScrollOffset { x: 0, y: self.scroll_y }
    }

    fn page_height(&self) -> isize {
        isize::try_from(self.view.table_area.height.max(1)).unwrap_or(isize::MAX)
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.items().len();
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
        self.scroll_y =
            table::scroll_to_row(self.items(), self.cursor, self.scroll_y, self.view.table_area);
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = table::max_scroll(self.items(), self.view.table_area);
        self.scroll_y = self.scroll_y.saturating_add_signed(delta).min(max);
    }

    fn yank(&mut self, field: impl FnOnce(&Item) -> String, what: &str) {
        let Some(text) = self.highlighted().map(field) else {
            self.set_toast("No item selected");
            return;
        };
        if text.is_empty() {
            self.set_toast(format!("No {what} to copy"));
            return;
        }
        match copy_to_clipboard(&text) {
            Ok(backend) => self.set_toast(format!("Copied {what} ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }

    /// Queues the highlighted item's link for the browser and shows its summary beside the table.
    fn open_highlighted_link(&mut self) {
        let Some(link) = self.highlighted().map(|item| item.link.clone()) else {
            self.set_toast("No item selected");
            return;
        };
        if link.trim().is_empty() {
            self.set_toast("No link to open");
            return;
        }
        self.detail_visible = true;
        self.link_request = Some(link);
    }

    fn link_opened(&mut self, link: &str, result: io::Result<()>) {
        match result {
            Ok(()) => self.set_toast("Opened link in your browser"),
            Err(err) => {
                warn!(%link, error = %err, "failed to open link");
                self.set_toast(format!("Failed to open link: {err}"));
            }
        }
    }
}

fn clamp_into(rect: Rect, column: u16, row: u16) -> (u16, u16) {
    (
        column.clamp(rect.x, rect.right().saturating_sub(1).max(rect.x)),
        row.clamp(rect.y, rect.bottom().saturating_sub(1).max(rect.y)),
    )
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.area();
    let [main_area, pager_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1), Constraint::Length(1)])
        .areas(area);

    let (table_panel, detail_panel) = if app.detail_visible {
        let [table_panel, detail_panel] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .areas(main_area);
        (table_panel, Some(detail_panel))
    } else {
        (main_area, None)
    };

    render_table(frame, app, table_panel);
    if let Some(detail_panel) = detail_panel {
        render_detail(frame, app.highlighted(), detail_panel);
    }

    let buttons = page_button_areas(&app.dashboard.paginator().page_buttons(), pager_area);
    render_page_buttons(frame, &buttons);
    app.view.page_buttons = buttons;

    render_footer(frame, app, footer_area);

    let scroll = app.scroll_offset();
    let table_area = app.view.table_area;
    app.view.popup = app
        .dashboard
        .editor()
        .session()
        .map(|session| popup_rect(session.anchor(), scroll, table_area, main_area));
    if let (Some(session), Some(popup)) = (app.dashboard.editor().session(), app.view.popup) {
        render_popup(frame, session, popup);
    }

    if let Some(draft) = app.dashboard.pending_publish() {
        render_publish_confirm(frame, draft, main_area);
    }
    if let Some(notice) = app.dashboard.notice() {
        render_notice(frame, notice, main_area);
    }
    if app.show_help {
        render_help(frame, app, main_area);
    }
}

fn render_table(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let paginator = app.dashboard.paginator();
    let counter = page_counter_label(paginator.page(), paginator.items().len(), paginator.is_loading());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(FOCUS_COLOR))
        .title(view_title("Items", Some(&counter)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, rows_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .areas(inner);
    app.view.table_area = rows_area;

    let widths = table::column_widths(rows_area.width);
    let offsets = table::column_offsets(&widths);
    for ((title, width), offset) in table::COLUMN_TITLES.iter().zip(widths).zip(offsets) {
        let cell = Rect { x: header_area.x + offset, y: header_area.y, width, height: 1 }
            .intersection(header_area);
        frame.render_widget(Paragraph::new(*title).style(help_header_style()), cell);
    }

    if let Some(error) = paginator.error() {
        app.view.rows.clear();
        let message = Paragraph::new(error.to_owned())
            .style(Style::default().fg(ALERT_COLOR))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, rows_area);
        return;
    }

    let items = paginator.items();
    app.scroll_y = app.scroll_y.min(table::max_scroll(items, rows_area));
    let rows = table::visible_rows(items, app.scroll_y, rows_area);
    let editing = app.dashboard.editor().session().map(EditSession::item_id);

    for visible in &rows {
        let item = &items[visible.index];
        let mut style = Style::default();
        if visible.index == app.cursor {
            style = style.bg(Color::DarkGray);
        }
        if editing == Some(item.id) {
            style = style.fg(EDITING_ROW_COLOR);
        }

        if visible.first_line == 0 {
            let score = item.score_label();
            let cells = [
                item.source.as_str(),
                item.title.as_str(),
                item.time.as_str(),
                item.tags.as_str(),
                score.as_str(),
            ];
            for (index, text) in cells.iter().enumerate() {
                let cell = Rect {
                    x: rows_area.x + offsets[index],
                    y: visible.y,
                    width: widths[index],
                    height: 1,
                }
                .intersection(rows_area);
                frame.render_widget(Paragraph::new(*text).style(style), cell);
            }
        }

        let summary_cell = table::summary_cell(rows_area, visible);
        let drag = app
            .drag
            .filter(|drag| drag.item_id == item.id)
            .map(|drag| drag.points(&item.summary));
        let lines: Vec<Line<'static>> = table::wrap_summary(&item.summary, summary_cell.width)
            .into_iter()
            .skip(visible.first_line)
            .take(usize::from(visible.height))
            .map(|piece| {
                let range = drag.and_then(|(a, b)| wrapped_selection_range(a, b, &piece));
                highlight_line(piece.text, range)
            })
            .collect();
        let cell = summary_cell.intersection(rows_area);
        frame.render_widget(Paragraph::new(lines).style(style), cell);
    }
    app.view.rows = rows;
}

fn render_detail(frame: &mut Frame<'_>, item: Option<&Item>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(view_title("Detail", item.map(|item| format!("#{}", item.id)).as_deref()));

    let mut lines = Vec::<Line<'static>>::new();
    if let Some(item) = item {
        lines.push(Line::from(Span::styled(item.title.clone(), help_header_style())));
        lines.push(Line::from(""));
        lines.extend(item.summary_lines().map(|line| Line::from(line.to_owned())));
        lines.push(Line::from(""));
        lines.push(Line::from(item.link.clone()));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            footer_key_span("y"),
            Span::raw(" "),
            footer_label_span("copy summary"),
            Span::raw("  "),
            footer_key_span("Y"),
            Span::raw(" "),
            footer_label_span("copy link"),
        ]));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

fn render_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let brand = footer_brand_line();
    let brand_width = brand.width() as u16;
    let [help_area, brand_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(brand_width)])
        .areas(area);

    let mut suffix = app.toast_suffix();
    if app.dashboard.paginator().is_loading() {
        suffix.push_str("  Loading…");
    }
    frame.render_widget(Paragraph::new(footer_help_line(app.dashboard.mode(), &suffix)), help_area);
    frame.render_widget(Paragraph::new(brand), brand_area);
}

fn render_popup(frame: &mut Frame<'_>, session: &EditSession, area: Rect) {
    frame.render_widget(Clear, area);
    let mut title = format!("Edit #{}", session.item_id());
    if session.is_busy() {
        title.push_str(" (working…)");
    }
    let border = if session.is_busy() { Color::Yellow } else { FOCUS_COLOR };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(view_title(&title, None));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [buffer_area, instruction_area, hint_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .areas(inner);

    let focus = session.focus();
    let (buffer_scroll, buffer_cursor) = buffer_view(session.buffer(), buffer_area);
    let buffer = Paragraph::new(session.working_text().to_owned()).scroll(buffer_scroll);
    frame.render_widget(buffer, buffer_area);

    let label = "Instruction: ";
    let label_width = label.chars().count() as u16;
    let [label_area, input_area] = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(label_width), Constraint::Min(0)])
        .areas(instruction_area);
    let label_style = if focus == EditorField::Instruction {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default().fg(FOOTER_LABEL_COLOR)
    };
    frame.render_widget(Paragraph::new(label).style(label_style), label_area);
    let (instruction_scroll, instruction_cursor) = buffer_view(session.instruction(), input_area);
    frame.render_widget(
        Paragraph::new(session.instruction().text().to_owned()).scroll(instruction_scroll),
        input_area,
    );

    let hint_style = if session.is_busy() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(FOOTER_LABEL_COLOR)
    };
    frame.render_widget(
        Paragraph::new("^S shrink  ^G expand  ^R rewrite  ^O confirm  ^P publish").style(hint_style),
        hint_area,
    );

    let cursor = match focus {
        EditorField::Summary => buffer_cursor,
        EditorField::Instruction => instruction_cursor,
    };
    frame.set_cursor_position(cursor);
}

/// Scroll offset that keeps the buffer cursor inside `area`, and the cursor's screen position.
fn buffer_view(buffer: &TextBuffer, area: Rect) -> ((u16, u16), Position) {
    let (line, column) = buffer.cursor_position();
    let line = u16::try_from(line).unwrap_or(u16::MAX);
    let column = u16::try_from(column).unwrap_or(u16::MAX);
    let scroll_y = line.saturating_sub(area.height.saturating_sub(1));
    let scroll_x = column.saturating_sub(area.width.saturating_sub(1));
    let position = Position {
        x: area.x.saturating_add(column - scroll_x),
        y: area.y.saturating_add(line - scroll_y),
    };
    ((scroll_y, scroll_x), position)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
