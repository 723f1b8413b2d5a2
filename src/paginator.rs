// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page fetch lifecycle and page-selector policy.
//!
//! The paginator never performs I/O. Page changes hand out a [`FetchRequest`]; the caller runs it
//! and feeds the result back through [`Paginator::apply`], which discards anything that is not
//! the answer to the latest request.

use tracing::{debug, warn};

use crate::api::ApiError;
use crate::model::{Item, ItemId, PageResult};

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch data. Please try again later.";

/// Identifies one issued fetch. Only the latest ticket is ever applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    page: usize,
    generation: u64,
}

impl FetchTicket {
    pub fn page(self) -> usize {
        self.page
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// The ticket was superseded by a later request; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageButtonKind {
    Previous,
    /// Shortcut to a zero-based page index.
    Jump(usize),
    /// The page being shown. Never navigates.
    Current(usize),
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageButton {
    pub kind: PageButtonKind,
    pub enabled: bool,
}

impl PageButton {
    pub fn label(&self) -> String {
        match self.kind {
            PageButtonKind::Previous => "Previous".to_owned(),
            PageButtonKind::Jump(page) | PageButtonKind::Current(page) => (page + 1).to_string(),
            PageButtonKind::Next => "Next".to_owned(),
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self.kind, PageButtonKind::Current(_))
    }
}

#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: usize,
    page: usize,
    items: Vec<Item>,
    has_more: bool,
    error: Option<String>,
    generation: u64,
    in_flight: Option<FetchTicket>,
    revision: u64,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 0,
            items: Vec::new(),
            has_more: true,
            error: None,
            generation: 0,
            in_flight: None,
            revision: 0,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// User-visible fetch failure. Takes precedence over any items still held.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Bumped whenever a fetch result replaces the item set.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn load_page(&mut self, page: usize) -> FetchRequest {
        self.generation = self.generation.wrapping_add(1);
        self.page = page;
        let ticket = FetchTicket { page, generation: self.generation };
        self.in_flight = Some(ticket);
        debug!(page, generation = self.generation, "page fetch issued");
        FetchRequest { ticket, page, limit: self.page_size }
    }

    pub fn go_to_page(&mut self, page: usize) -> FetchRequest {
        self.load_page(page)
    }

    pub fn reload(&mut self) -> FetchRequest {
        self.load_page(self.page)
    }

    pub fn next_page(&mut self) -> Option<FetchRequest> {
        if !self.has_more {
            return None;
        }
        Some(self.load_page(self.page + 1))
    }

    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        if self.page == 0 {
            return None;
        }
        Some(self.load_page(self.page - 1))
    }

    pub fn apply(
        &mut self,
        ticket: FetchTicket,
        result: Result<PageResult, ApiError>,
    ) -> FetchOutcome {
        if self.in_flight != Some(ticket) {
            debug!(page = ticket.page, current = self.page, "stale page result discarded");
            return FetchOutcome::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(result) => {
                debug!(page = ticket.page, items = result.items.len(), "page applied");
                self.items = result.items;
                self.has_more = result.has_more;
                self.error = None;
                self.revision = self.revision.wrapping_add(1);
                FetchOutcome::Applied
            }
            Err(err) => {
                warn!(page = ticket.page, error = %err, "page fetch failed");
                self.error = Some(FETCH_ERROR_MESSAGE.to_owned());
                FetchOutcome::Failed
            }
        }
    }

    /// Writes `summary` into the item with `id`. Returns `false` when the item is not on the
    /// current page.
    pub fn commit_summary(&mut self, id: ItemId, summary: String) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.summary = summary;
                true
            }
            None => false,
        }
    }

    pub fn page_buttons(&self) -> Vec<PageButton> {
        page_buttons(self.page, self.has_more)
    }
}

/// Page-selector policy.
///
/// Previous and Next are always present and disabled at their boundary. Shortcuts to pages 1
/// and 2 appear only once they have scrolled out of the immediate vicinity of the current page.
pub fn page_buttons(page: usize, has_more: bool) -> Vec<PageButton> {
    let mut buttons = Vec::with_capacity(5);
    buttons.push(PageButton { kind: PageButtonKind::Previous, enabled: page > 0 });
    if page > 2 {
        buttons.push(PageButton { kind: PageButtonKind::Jump(0), enabled: true });
    }
    if page > 1 {
        buttons.push(PageButton { kind: PageButtonKind::Jump(1), enabled: true });
    }
    buttons.push(PageButton { kind: PageButtonKind::Current(page), enabled: false });
    buttons.push(PageButton { kind: PageButtonKind::Next, enabled: has_more });
    buttons
}
