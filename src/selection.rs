// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text selections inside summary cells and popup anchoring.

use crate::model::ItemId;

/// Bounding rectangle of a selection in viewport cells. `bottom` and `right` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRect {
    pub top: u16,
    pub left: u16,
    pub bottom: u16,
    pub right: u16,
}

impl SelectionRect {
    /// Smallest rectangle covering both cells (inclusive corners).
    pub fn spanning(a: (u16, u16), b: (u16, u16)) -> Self {
        let (ax, ay) = a;
        let (bx, by) = b;
        Self {
            top: ay.min(by),
            left: ax.min(bx),
            bottom: ay.max(by).saturating_add(1),
            right: ax.max(bx).saturating_add(1),
        }
    }
}

/// How far the item table is scrolled, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollOffset {
    pub x: usize,
    pub y: usize,
}

/// Popup position in page coordinates (independent of scrolling).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    pub top: usize,
    pub left: usize,
}

impl Anchor {
    /// Anchors just below the selection: bottom edge plus vertical scroll, left edge plus
    /// horizontal scroll.
    pub fn below(rect: SelectionRect, scroll: ScrollOffset) -> Self {
        Self { top: usize::from(rect.bottom) + scroll.y, left: usize::from(rect.left) + scroll.x }
    }

    /// Converts back into viewport cells for the given scroll. `None` when scrolled out above or
    /// to the left of the viewport.
    pub fn to_viewport(self, scroll: ScrollOffset) -> Option<(usize, usize)> {
        Some((self.left.checked_sub(scroll.x)?, self.top.checked_sub(scroll.y)?))
    }
}

/// A text selection made inside the summary cell of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSelection {
    pub item_id: ItemId,
    pub text: String,
    pub rect: SelectionRect,
    pub scroll: ScrollOffset,
}

impl TextSelection {
    /// Whitespace-only selections do not open the editor.
    pub fn is_qualifying(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn anchor(&self) -> Anchor {
        Anchor::below(self.rect, self.scroll)
    }
}

/// A position inside multi-line text: line index and character column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TextPoint {
    pub line: usize,
    pub column: usize,
}

impl TextPoint {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Text between two points, both inclusive of the character under them.
///
/// Points may come in either order. Columns past the end of a line clamp to the line end, so a
/// drag that strays into cell padding still selects up to the last character.
pub fn selected_text(text: &str, a: TextPoint, b: TextPoint) -> String {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    let lines: Vec<&str> = text.split('\n').collect();
    if start.line >= lines.len() {
        return String::new();
    }
    let last_line = end.line.min(lines.len() - 1);

    let mut out = String::new();
    for (index, line) in lines.iter().enumerate().take(last_line + 1).skip(start.line) {
        let from = if index == start.line { start.column } else { 0 };
        let to = if index == end.line { end.column.saturating_add(1) } else { usize::MAX };
        if index > start.line {
            out.push('\n');
        }
        out.extend(line.chars().skip(from).take(to.saturating_sub(from)));
    }
    out
}
