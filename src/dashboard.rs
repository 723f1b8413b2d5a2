// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Event dispatch between the paginator, the inline editor, and the publish flow.
//!
//! [`Dashboard::dispatch`] is the single entry point: it takes one [`Event`], updates state, and
//! returns the [`Effect`]s (network calls) the runtime must perform. Completions of those calls
//! come back in as events, so every ordering rule is decided here and nowhere else.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::compose::PublishDraft;
use crate::editor::{
    BufferEdit, EditorField, EditorState, InlineEditor, RewriteKind, RewriteOutcome,
    RewriteRejected, RewriteRequest, RewriteTicket,
};
use crate::model::{ItemId, PageResult};
use crate::paginator::{FetchRequest, FetchTicket, Paginator};
use crate::selection::TextSelection;

pub const PUBLISH_SUCCESS_MESSAGE: &str = "Published successfully.";

#[derive(Debug)]
pub enum Event {
    GoToPage(usize),
    NextPage,
    PreviousPage,
    Reload,
    PageLoaded { ticket: FetchTicket, result: Result<PageResult, ApiError> },
    TextSelected(TextSelection),
    /// Pointer pressed somewhere on screen; `inside_popup` is decided by the caller's hit test.
    PointerDown { inside_popup: bool },
    Edit(BufferEdit),
    Focus(EditorField),
    ToggleFocus,
    Rewrite(RewriteKind),
    RewriteFinished { ticket: RewriteTicket, result: Result<String, ApiError> },
    Confirm,
    Cancel,
    /// Publish the committed summary of a row.
    PublishItem(ItemId),
    /// Publish the uncommitted working copy of the open session.
    PublishWorkingCopy,
    PublishAnswered { accepted: bool },
    PublishFinished { item_id: ItemId, result: Result<(), ApiError> },
    DismissNotice,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Fetch(FetchRequest),
    Rewrite(RewriteRequest),
    Publish(PublishDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Alert,
}

/// A modal message the operator has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Alert, message: message.into() }
    }
}

/// Which dispatch table row applies. Modal states swallow operator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Notice,
    ConfirmPublish,
    Browsing,
    Editing,
    Busy,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    paginator: Paginator,
    editor: InlineEditor,
    pending_publish: Option<PublishDraft>,
    notices: VecDeque<Notice>,
}

impl Dashboard {
    pub fn new(page_size: usize, expansion: f64) -> Self {
        Self {
            paginator: Paginator::new(page_size),
            editor: InlineEditor::new(expansion),
            pending_publish: None,
            notices: VecDeque::new(),
        }
    }

    /// Effects to run at startup: the fetch for page zero.
    pub fn start(&mut self) -> Vec<Effect> {
        vec![Effect::Fetch(self.paginator.load_page(0))]
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn editor(&self) -> &InlineEditor {
        &self.editor
    }

    pub fn pending_publish(&self) -> Option<&PublishDraft> {
        self.pending_publish.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn mode(&self) -> Mode {
        if !self.notices.is_empty() {
            return Mode::Notice;
        }
        if self.pending_publish.is_some() {
            return Mode::ConfirmPublish;
        }
        match self.editor.state() {
            EditorState::Closed => Mode::Browsing,
            EditorState::Editing => Mode::Editing,
            EditorState::Busy => Mode::Busy,
        }
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mode = self.mode();

        match (mode, event) {
            // Completions are accepted in every mode.
            (_, Event::PageLoaded { ticket, result }) => {
                self.paginator.apply(ticket, result);
            }
            (_, Event::RewriteFinished { ticket, result }) => {
                if let RewriteOutcome::Failed(message) = self.editor.finish_rewrite(ticket, result)
                {
                    self.notices.push_back(Notice::alert(message));
                }
            }
            (_, Event::PublishFinished { item_id, result }) => match result {
                Ok(()) => {
                    info!(item = %item_id, "published");
                    self.notices.push_back(Notice::info(PUBLISH_SUCCESS_MESSAGE));
                }
                Err(err) => {
                    warn!(item = %item_id, error = %err, "publish failed");
                    self.notices.push_back(Notice::alert(format!("Failed to publish: {err}")));
                }
            },

            (Mode::Notice, Event::DismissNotice) => {
                self.notices.pop_front();
            }
            (Mode::Notice, _) => {}

            (Mode::ConfirmPublish, Event::PublishAnswered { accepted }) => {
                if let Some(draft) = self.pending_publish.take() {
                    if accepted {
                        debug!(item = %draft.item_id, "publish dispatched");
                        effects.push(Effect::Publish(draft));
                    } else {
                        debug!(item = %draft.item_id, "publish declined");
                    }
                }
            }
            (Mode::ConfirmPublish, _) => {}

            (_, Event::GoToPage(page)) => {
                effects.push(Effect::Fetch(self.paginator.go_to_page(page)));
            }
            (_, Event::NextPage) => {
                effects.extend(self.paginator.next_page().map(Effect::Fetch));
            }
            (_, Event::PreviousPage) => {
                effects.extend(self.paginator.previous_page().map(Effect::Fetch));
            }
            (_, Event::Reload) => {
                effects.push(Effect::Fetch(self.paginator.reload()));
            }
            // Rows stay hidden behind a fetch error until a page loads.
            (_, Event::TextSelected(_) | Event::PublishItem(_))
                if self.paginator.error().is_some() =>
            {
                debug!("row action ignored while the page shows a fetch error");
            }
            (_, Event::TextSelected(selection)) => {
                if let Some(item) = self.paginator.item(selection.item_id) {
                    self.editor.open(&selection, item);
                } else {
                    debug!(item = %selection.item_id, "selection for unknown item ignored");
                }
            }
            (_, Event::PublishItem(item_id)) => {
                if let Some(item) = self.paginator.item(item_id) {
                    self.pending_publish = Some(PublishDraft::for_item(item, &item.summary));
                }
            }

            (Mode::Browsing, _) => {}

            (_, Event::PointerDown { inside_popup }) => {
                self.editor.pointer_down(inside_popup);
            }
            (_, Event::Edit(edit)) => self.editor.edit(edit),
            (_, Event::Focus(field)) => self.editor.set_focus(field),
            (_, Event::ToggleFocus) => self.editor.toggle_focus(),
            (_, Event::Rewrite(kind)) => match self.editor.request_rewrite(kind) {
                Ok(request) => effects.push(Effect::Rewrite(request)),
                Err(RewriteRejected::EmptyInstruction) => {
                    self.notices.push_back(Notice::alert("Enter an instruction first."));
                }
                Err(RewriteRejected::Busy | RewriteRejected::Closed) => {}
            },
            (_, Event::Confirm) => self.confirm(),
            (_, Event::Cancel) => {
                self.editor.close();
            }
            (_, Event::PublishWorkingCopy) => {
                let draft = self.editor.session().and_then(|session| {
                    let item = self.paginator.item(session.item_id())?;
                    Some(PublishDraft::for_item(item, session.working_text()))
                });
                match draft {
                    Some(draft) => self.pending_publish = Some(draft),
                    None => {
                        self.notices.push_back(Notice::alert(
                            "This item is no longer on the current page.",
                        ));
                    }
                }
            }
            (_, Event::DismissNotice | Event::PublishAnswered { .. }) => {}
        }

        effects
    }

    fn confirm(&mut self) {
        let Some((item_id, text)) = self.editor.take_commit() else {
            return;
        };
        if !self.paginator.commit_summary(item_id, text) {
            debug!(item = %item_id, "orphan commit dropped");
        }
    }
}

#[cfg(test)]
mod tests;
