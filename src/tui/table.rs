// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Item table geometry.
//!
//! Rows are as tall as their summary once wrapped to the summary column. Geometry is computed in
//! content lines and then clipped against the scrolled viewport, which keeps hit testing exact.

use ratatui::layout::Rect;

use crate::model::{Item, ItemId};
use crate::selection::TextPoint;

pub(crate) const COLUMN_TITLES: [&str; 6] = ["Source", "Title", "Time", "Tags", "Score", "Summary"];
const FIXED_WIDTHS: [u16; 5] = [12, 0, 16, 18, 6];
const TITLE_SHARE_PERCENT: u16 = 35;
const COLUMN_GAP: u16 = 1;
pub(crate) const TITLE_COLUMN: usize = 1;
pub(crate) const SUMMARY_COLUMN: usize = 5;

/// Widths of the six columns for a table of `total` cells.
pub(crate) fn column_widths(total: u16) -> [u16; 6] {
    let gaps = COLUMN_GAP * (COLUMN_TITLES.len() as u16 - 1);
    let fixed: u16 = FIXED_WIDTHS.iter().sum();
    let flexible = total.saturating_sub(fixed + gaps);
    let title = flexible * TITLE_SHARE_PERCENT / 100;
    let summary = flexible - title;
    [FIXED_WIDTHS[0], title, FIXED_WIDTHS[2], FIXED_WIDTHS[3], FIXED_WIDTHS[4], summary]
}

/// Left edge of each column, relative to the table's left edge.
pub(crate) fn column_offsets(widths: &[u16; 6]) -> [u16; 6] {
    let mut offsets = [0u16; 6];
    let mut x = 0u16;
    for (offset, width) in offsets.iter_mut().zip(widths) {
        *offset = x;
        x = x.saturating_add(*width).saturating_add(COLUMN_GAP);
    }
    offsets
}

/// Width of the summary column for a table of `total` cells.
pub(crate) fn summary_width(total: u16) -> u16 {
    column_widths(total)[5]
}

/// One screen line of a wrapped summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WrappedLine<'a> {
    /// Text line (split on `\n`) this piece belongs to.
    pub line: usize,
    /// Character column where the piece starts in that line.
    pub start: usize,
    /// Length of the piece in characters.
    pub len: usize,
    pub text: &'a str,
}

/// Wraps every text line of `summary` to `width` characters, breaking after the last space that
/// fits and hard-breaking words longer than the cell. A width of zero disables wrapping.
pub(crate) fn wrap_summary(summary: &str, width: u16) -> Vec<WrappedLine<'_>> {
    let width = if width == 0 { usize::MAX } else { usize::from(width) };
    let mut out = Vec::new();
    for (line, text) in summary.split('\n').enumerate() {
        let chars: Vec<char> = text.chars().collect();
        let offsets: Vec<usize> =
            text.char_indices().map(|(index, _)| index).chain([text.len()]).collect();
        let mut start = 0;
        loop {
            let remaining = chars.len() - start;
            if remaining <= width {
                out.push(WrappedLine { line, start, len: remaining, text: &text[offsets[start]..] });
                break;
            }
            let len = (2..=width).rev().find(|n| chars[start + n - 1] == ' ').unwrap_or(width);
            out.push(WrappedLine {
                line,
                start,
                len,
                text: &text[offsets[start]..offsets[start + len]],
            });
            start += len;
        }
    }
    out
}

pub(crate) fn row_height(item: &Item, width: u16) -> usize {
    wrap_summary(&item.summary, width).len().max(1)
}

pub(crate) fn content_height(items: &[Item], width: u16) -> usize {
    items.iter().map(|item| row_height(item, width)).sum()
}

/// Content line where row `index` starts.
pub(crate) fn row_top(items: &[Item], index: usize, width: u16) -> usize {
    items.iter().take(index).map(|item| row_height(item, width)).sum()
}

/// The part of a row that is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VisibleRow {
    pub index: usize,
    pub item_id: ItemId,
    /// Screen row of the first visible line.
    pub y: u16,
    /// Index of the first visible wrapped summary line.
    pub first_line: usize,
    pub height: u16,
}

pub(crate) fn visible_rows(items: &[Item], scroll_y: usize, area: Rect) -> Vec<VisibleRow> {
    let width = summary_width(area.width);
    let viewport_end = scroll_y + usize::from(area.height);
    let mut rows = Vec::new();
    let mut top = 0usize;
    for (index, item) in items.iter().enumerate() {
        let height = row_height(item, width);
        let bottom = top + height;
        if bottom > scroll_y && top < viewport_end {
            let first_visible = top.max(scroll_y);
            let last_visible = bottom.min(viewport_end);
            rows.push(VisibleRow {
                index,
                item_id: item.id,
                y: area.y + (first_visible - scroll_y) as u16,
                first_line: first_visible - top,
                height: (last_visible - first_visible) as u16,
            });
        }
        if top >= viewport_end {
            break;
        }
        top = bottom;
    }
    rows
}

/// Screen rectangle of one column of a row. Only the first line of the row carries text for
/// columns other than the summary.
pub(crate) fn column_cell(area: Rect, row: &VisibleRow, column: usize) -> Rect {
    let widths = column_widths(area.width);
    let offsets = column_offsets(&widths);
    Rect { x: area.x + offsets[column], y: row.y, width: widths[column], height: row.height }
}

/// Screen rectangle of a row's summary cell.
pub(crate) fn summary_cell(area: Rect, row: &VisibleRow) -> Rect {
    column_cell(area, row, SUMMARY_COLUMN)
}

/// Maps a screen cell inside a summary cell to a text position, through the wrapping.
///
/// Columns past the end of a wrapped piece clamp to its last character so they never spill into
/// the next piece.
pub(crate) fn text_point_at(
    wrapped: &[WrappedLine<'_>],
    cell: Rect,
    row: &VisibleRow,
    column: u16,
    line: u16,
) -> TextPoint {
    let visual = row.first_line + usize::from(line.saturating_sub(cell.y));
    let column = usize::from(column.saturating_sub(cell.x));
    match wrapped.get(visual).or(wrapped.last()) {
        Some(piece) => {
            TextPoint::new(piece.line, piece.start + column.min(piece.len.saturating_sub(1)))
        }
        None => TextPoint::new(0, 0),
    }
}

/// Scroll offset that keeps row `index` fully visible when possible.
pub(crate) fn scroll_to_row(items: &[Item], index: usize, scroll_y: usize, area: Rect) -> usize {
    let Some(item) = items.get(index) else {
        return scroll_y;
    };
    let width = summary_width(area.width);
    let top = row_top(items, index, width);
    let bottom = top + row_height(item, width);
    let height = usize::from(area.height.max(1));
    if top < scroll_y {
        top
    } else if bottom > scroll_y + height {
        bottom.saturating_sub(height).min(top)
    } else {
        scroll_y
    }
}

pub(crate) fn max_scroll(items: &[Item], area: Rect) -> usize {
    content_height(items, summary_width(area.width)).saturating_sub(usize::from(area.height))
}
