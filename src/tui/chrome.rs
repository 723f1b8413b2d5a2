// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Layout, title, footer, modal, help, and style helpers used by TUI rendering.
fn view_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push(' ');
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn page_counter_label(page: usize, items: usize, loading: bool) -> String {
    if loading {
        format!("[page {}, loading…]", page + 1)
    } else {
        format!("[page {}, {items} items]", page + 1)
    }
}

fn page_button_style(button: &PageButton) -> Style {
    if button.is_current() {
        Style::default().fg(Color::Black).bg(CURRENT_PAGE_COLOR).add_modifier(Modifier::BOLD)
    } else if button.enabled {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Lays the page buttons out left to right and returns their hit areas.
fn page_button_areas(buttons: &[PageButton], area: Rect) -> Vec<(Rect, PageButton)> {
    let mut x = area.x;
    let mut out = Vec::with_capacity(buttons.len());
    for button in buttons {
        let width = (button.label().chars().count() as u16).saturating_add(2);
        if x.saturating_add(width) > area.right() {
            break;
        }
        out.push((Rect { x, y: area.y, width, height: 1 }, *button));
        x = x.saturating_add(width).saturating_add(1);
    }
    out
}

fn render_page_buttons(frame: &mut Frame<'_>, areas: &[(Rect, PageButton)]) {
    for (area, button) in areas {
        let label = Paragraph::new(format!(" {} ", button.label())).style(page_button_style(button));
        frame.render_widget(label, *area);
    }
}

fn footer_key_span(key: &str) -> Span<'static> {
    Span::styled(key.to_owned(), Style::default().fg(FOOTER_KEY_COLOR))
}

fn footer_label_span(label: &str) -> Span<'static> {
    Span::styled(label.to_owned(), Style::default().fg(FOOTER_LABEL_COLOR))
}

fn footer_hints(mode: Mode) -> &'static [(&'static str, &'static str)] {
    match mode {
        Mode::Browsing => &[
            ("j/k", "move"),
            ("Enter", "edit"),
            ("P", "publish"),
            ("o", "open"),
            ("n/p", "page"),
            ("r", "reload"),
            ("y", "copy"),
            ("d", "detail"),
            ("?", "help"),
            ("q", "quit"),
        ],
        Mode::Editing | Mode::Busy => &[
            ("^S", "shrink"),
            ("^G", "expand"),
            ("^R", "rewrite"),
            ("^O", "confirm"),
            ("^P", "publish"),
            ("Tab", "field"),
            ("Esc", "close"),
        ],
        Mode::ConfirmPublish => &[("y", "publish"), ("n", "cancel")],
        Mode::Notice => &[("Enter", "dismiss")],
    }
}

fn footer_help_line(mode: Mode, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::new();
    for (index, (key, label)) in footer_hints(mode).iter().enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(footer_key_span(key));
        spans.push(Span::raw(" "));
        spans.push(footer_label_span(label));
    }
    if !toast_suffix.is_empty() {
        spans.push(Span::styled(toast_suffix.to_owned(), Style::default().fg(Color::White)));
    }
    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(Span::styled(FOOTER_BRAND, Style::default().fg(FOOTER_BRAND_COLOR)))
}

/// Places the editor popup below its anchor, shifted to stay inside `bounds`.
fn popup_rect(anchor: Anchor, scroll: ScrollOffset, table_area: Rect, bounds: Rect) -> Rect {
    let width = POPUP_WIDTH.min(bounds.width);
    let height = POPUP_HEIGHT.min(bounds.height);
    let (left, top) = anchor.to_viewport(scroll).unwrap_or((anchor.left, 0));
    let left = u16::try_from(left).unwrap_or(u16::MAX);
    let top = u16::try_from(top).unwrap_or(u16::MAX);

    let mut x = table_area.x.saturating_add(left);
    let mut y = table_area.y.saturating_add(top);
    if x.saturating_add(width) > bounds.right() {
        x = bounds.right().saturating_sub(width);
    }
    if y.saturating_add(height) > bounds.bottom() {
        y = bounds.bottom().saturating_sub(height);
    }
    Rect { x: x.max(bounds.x), y: y.max(bounds.y), width, height }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100 - height_percent) / 2;
    let horizontal_margin = (100 - width_percent) / 2;
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

/// `line` with the character range `[from, to)` reversed.
fn highlight_line(line: &str, range: Option<(usize, usize)>) -> Line<'static> {
    let Some((from, to)) = range.filter(|(from, to)| from < to) else {
        return Line::from(line.to_owned());
    };
    let before: String = line.chars().take(from).collect();
    let selected: String = line.chars().skip(from).take(to - from).collect();
    let after: String = line.chars().skip(to).collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(selected, Style::default().add_modifier(Modifier::REVERSED)),
        Span::raw(after),
    ])
}

/// Column range of line `line` covered by a selection between `a` and `b` (inclusive).
fn selection_range_on_line(
    a: TextPoint,
    b: TextPoint,
    line: usize,
    line_len: usize,
) -> Option<(usize, usize)> {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    if line < start.line || line > end.line {
        return None;
    }
    let from = if line == start.line { start.column.min(line_len) } else { 0 };
    let to = if line == end.line { (end.column + 1).min(line_len) } else { line_len };
    Some((from, to))
}

/// Selection columns within one wrapped piece, relative to the piece's first character.
fn wrapped_selection_range(
    a: TextPoint,
    b: TextPoint,
    piece: &table::WrappedLine<'_>,
) -> Option<(usize, usize)> {
    let (from, to) = selection_range_on_line(a, b, piece.line, usize::MAX)?;
    let from = from.max(piece.start);
    let to = to.min(piece.start + piece.len);
    (from < to).then(|| (from - piece.start, to - piece.start))
}

fn render_modal(frame: &mut Frame<'_>, area: Rect, title: &str, color: Color, body: Text<'static>) {
    frame.render_widget(Clear, area);
    let modal = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(view_title(title, None)),
    );
    frame.render_widget(modal, area);
}

fn render_notice(frame: &mut Frame<'_>, notice: &Notice, main_area: Rect) {
    let (title, color) = match notice.kind {
        NoticeKind::Info => ("Notice", FOCUS_COLOR),
        NoticeKind::Alert => ("Error", ALERT_COLOR),
    };
    let mut lines: Vec<Line<'static>> =
        notice.message.split('\n').map(|line| Line::from(line.to_owned())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(vec![footer_key_span("[Enter]"), Span::raw(" OK")]));
    render_modal(frame, centered_rect(50, 30, main_area), title, color, Text::from(lines));
}

fn render_publish_confirm(frame: &mut Frame<'_>, draft: &PublishDraft, main_area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Publish item #{} with this exact text?", draft.item_id),
            help_header_style(),
        )),
        Line::from(""),
    ];
    lines.extend(draft.content.split('\n').map(|line| Line::from(line.to_owned())));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        footer_key_span("[y]"),
        Span::raw(" Publish   "),
        footer_key_span("[n]"),
        Span::raw(" Cancel"),
    ]));
    render_modal(frame, centered_rect(70, 60, main_area), "Publish", FOCUS_COLOR, Text::from(lines));
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = ["j/k, ↑/↓, PgUp/PgDn", "n/p, →/←, ]/["].iter().map(|s| s.chars().count()).max().unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    lines.push(Line::from(Span::styled("--- Table ---", header_style)));
    lines.push(help_kv("?", "Help (toggle)", key_col_width, key_style));
    lines.push(help_kv("q", "Quit", key_col_width, key_style));
    lines.push(help_kv("j/k, ↑/↓, PgUp/PgDn", "Move / scroll", key_col_width, key_style));
    lines.push(help_kv("n/p, →/←, ]/[", "Next / previous page", key_col_width, key_style));
    lines.push(help_kv("1/2", "Jump to page 1/2 (when shown)", key_col_width, key_style));
    lines.push(help_kv("r", "Reload page", key_col_width, key_style));
    lines.push(help_kv("Enter/e", "Edit summary of row", key_col_width, key_style));
    lines.push(help_kv("P", "Publish row", key_col_width, key_style));
    lines.push(help_kv("o", "Open link in browser", key_col_width, key_style));
    lines.push(help_kv("y/Y", "Copy summary / link", key_col_width, key_style));
    lines.push(help_kv("d", "Toggle detail panel", key_col_width, key_style));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("--- Mouse ---", header_style)));
    lines.push(help_kv("drag", "Select summary text to edit", key_col_width, key_style));
    lines.push(help_kv("click title", "Open link in browser", key_col_width, key_style));
    lines.push(help_kv("click", "Close editor (outside popup)", key_col_width, key_style));
    lines.push(help_kv("wheel", "Scroll", key_col_width, key_style));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("--- Editor ---", header_style)));
    lines.push(help_kv("Ctrl-S", "Shrink summary", key_col_width, key_style));
    lines.push(help_kv("Ctrl-G", "Expand summary", key_col_width, key_style));
    lines.push(help_kv("Ctrl-R", "Rewrite with instruction", key_col_width, key_style));
    lines.push(help_kv("Ctrl-O", "Confirm into table", key_col_width, key_style));
    lines.push(help_kv("Ctrl-P", "Publish working copy", key_col_width, key_style));
    lines.push(help_kv("Tab", "Switch summary / instruction", key_col_width, key_style));
    lines.push(help_kv("Esc", "Close without saving", key_col_width, key_style));
    lines
}

fn render_help(frame: &mut Frame<'_>, app: &mut App, main_area: Rect) {
    let area = centered_rect(70, 80, main_area);
    frame.render_widget(Clear, area);

    let lines = help_lines();
    let viewport = area.height.saturating_sub(2);
    let max_scroll = (lines.len() as u16).saturating_sub(viewport);
    app.help_scroll = app.help_scroll.min(max_scroll);

    let help = Paragraph::new(Text::from(lines)).scroll((app.help_scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(FOCUS_COLOR))
            .title(view_title("Help", Some("(Esc to close)"))),
    );
    frame.render_widget(help, area);
}
