// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Inline editor: the edit-session state machine.
//!
//! States are Closed, Open(editing) and Open(busy). A session owns a working copy of one item's
//! summary; nothing here touches the item set except through [`InlineEditor::take_commit`].

use tracing::{debug, warn};

use crate::api::{ApiError, RewriteCall};
use crate::model::{Item, ItemId, SessionId};
use crate::selection::{Anchor, TextSelection};

mod buffer;

pub use buffer::{BufferEdit, TextBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Closed,
    Editing,
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Summary,
    Instruction,
}

impl EditorField {
    fn toggle(self) -> Self {
        match self {
            Self::Summary => Self::Instruction,
            Self::Instruction => Self::Summary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteKind {
    Shrink,
    Expand,
    Instruct,
}

/// Identifies one rewrite call: the session that issued it plus a per-editor sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RewriteTicket {
    session: SessionId,
    seq: u64,
}

impl RewriteTicket {
    pub fn session(self) -> SessionId {
        self.session
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RewriteRequest {
    pub ticket: RewriteTicket,
    pub call: RewriteCall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteRejected {
    Closed,
    Busy,
    EmptyInstruction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Applied,
    /// Buffer untouched; the message is meant for the operator.
    Failed(String),
    /// The issuing session is gone or no longer waiting on this ticket.
    Stale,
}

/// An open edit session.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: SessionId,
    item_id: ItemId,
    buffer: TextBuffer,
    instruction: TextBuffer,
    anchor: Anchor,
    focus: EditorField,
    pending: Option<RewriteTicket>,
}

impl EditSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn working_text(&self) -> &str {
        self.buffer.text()
    }

    pub fn instruction(&self) -> &TextBuffer {
        &self.instruction
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn focus(&self) -> EditorField {
        self.focus
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct InlineEditor {
    session: Option<EditSession>,
    last_session: SessionId,
    rewrite_seq: u64,
    expansion: f64,
}

impl InlineEditor {
    pub fn new(expansion: f64) -> Self {
        Self { session: None, last_session: SessionId::new(0), rewrite_seq: 0, expansion }
    }

    pub fn state(&self) -> EditorState {
        match &self.session {
            None => EditorState::Closed,
            Some(session) if session.is_busy() => EditorState::Busy,
            Some(_) => EditorState::Editing,
        }
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Opens a session for `item` from a selection made in its summary cell.
    ///
    /// The working buffer is the whole committed summary, not just the selected substring. Any
    /// previous session is discarded. Returns `None` when the selection does not qualify.
    pub fn open(&mut self, selection: &TextSelection, item: &Item) -> Option<SessionId> {
        if !selection.is_qualifying() || selection.item_id != item.id {
            return None;
        }

        if let Some(previous) = self.session.take() {
            debug!(session = %previous.id, "edit session replaced");
        }
        self.last_session = self.last_session.next();
        let id = self.last_session;
        self.session = Some(EditSession {
            id,
            item_id: item.id,
            buffer: TextBuffer::multiline(item.summary.clone()),
            instruction: TextBuffer::single_line(),
            anchor: selection.anchor(),
            focus: EditorField::Summary,
            pending: None,
        });
        debug!(session = %id, item = %item.id, "edit session opened");
        Some(id)
    }

    /// Drops the session and everything in it.
    pub fn close(&mut self) -> Option<EditSession> {
        let session = self.session.take()?;
        debug!(session = %session.id, busy = session.is_busy(), "edit session closed");
        Some(session)
    }

    /// Pointer-down handling: closes on any press outside the popup, busy or not.
    pub fn pointer_down(&mut self, inside_popup: bool) -> bool {
        if inside_popup || self.session.is_none() {
            return false;
        }
        self.close().is_some()
    }

    pub fn edit(&mut self, edit: BufferEdit) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.focus {
            EditorField::Summary => session.buffer.apply(edit),
            EditorField::Instruction => session.instruction.apply(edit),
        }
    }

    pub fn set_focus(&mut self, field: EditorField) {
        if let Some(session) = self.session.as_mut() {
            session.focus = field;
        }
    }

    pub fn toggle_focus(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.focus = session.focus.toggle();
        }
    }

    /// Marks the session busy and builds the one request allowed for it.
    pub fn request_rewrite(&mut self, kind: RewriteKind) -> Result<RewriteRequest, RewriteRejected> {
        let Some(session) = self.session.as_mut() else {
            return Err(RewriteRejected::Closed);
        };
        if session.pending.is_some() {
            return Err(RewriteRejected::Busy);
        }

        let summary = session.buffer.text().to_owned();
        let call = match kind {
            RewriteKind::Shrink => RewriteCall::Shrink { id: session.item_id, summary },
            RewriteKind::Expand => RewriteCall::Expand { summary, expansion: self.expansion },
            RewriteKind::Instruct => {
                let instruction = session.instruction.text().trim();
                if instruction.is_empty() {
                    return Err(RewriteRejected::EmptyInstruction);
                }
                RewriteCall::Instruct {
                    id: session.item_id,
                    summary,
                    instruction: instruction.to_owned(),
                }
            }
        };

        self.rewrite_seq = self.rewrite_seq.wrapping_add(1);
        let ticket = RewriteTicket { session: session.id, seq: self.rewrite_seq };
        session.pending = Some(ticket);
        debug!(session = %session.id, call = call.label(), "rewrite issued");
        Ok(RewriteRequest { ticket, call })
    }

    /// Applies a rewrite completion. Responses for a session that is no longer the active one
    /// are dropped without touching anything.
    pub fn finish_rewrite(
        &mut self,
        ticket: RewriteTicket,
        result: Result<String, ApiError>,
    ) -> RewriteOutcome {
        let Some(session) = self.session.as_mut().filter(|s| s.pending == Some(ticket)) else {
            debug!(session = %ticket.session, "stale rewrite response discarded");
            return RewriteOutcome::Stale;
        };
        session.pending = None;

        match result {
            Ok(text) => {
                session.buffer.set_text(text);
                debug!(session = %session.id, "rewrite applied");
                RewriteOutcome::Applied
            }
            Err(err) => {
                warn!(session = %session.id, error = %err, "rewrite failed");
                RewriteOutcome::Failed(format!("Rewrite failed: {err}"))
            }
        }
    }

    /// Closes the session and hands back what should be committed.
    pub fn take_commit(&mut self) -> Option<(ItemId, String)> {
        let session = self.close()?;
        Some((session.item_id, session.buffer.text().to_owned()))
    }
}

#[cfg(test)]
mod tests;
