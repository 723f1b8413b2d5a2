// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{
    BufferEdit, EditorField, EditorState, InlineEditor, RewriteKind, RewriteOutcome,
    RewriteRejected,
};
use crate::api::{ApiError, RewriteCall};
use crate::model::{Item, ItemId};
use crate::selection::{Anchor, ScrollOffset, SelectionRect, TextSelection};

fn item(id: i64, summary: &str) -> Item {
    Item::new(id).with_summary(summary)
}

fn selection_in(item: &Item, text: &str) -> TextSelection {
    TextSelection {
        item_id: item.id,
        text: text.to_owned(),
        rect: SelectionRect { top: 3, left: 40, bottom: 4, right: 48 },
        scroll: ScrollOffset { x: 0, y: 10 },
    }
}

fn timeout() -> ApiError {
    ApiError::Status { endpoint: "/api/summary/decrease".to_owned(), status: 504 }
}

#[fixture]
fn editor() -> InlineEditor {
    InlineEditor::new(1.5)
}

#[rstest]
fn open_copies_whole_summary_and_anchors_below_selection(mut editor: InlineEditor) {
    let row = item(7, "Original text.");
    editor.open(&selection_in(&row, "text"), &row).expect("session opens");

    let session = editor.session().expect("session");
    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(session.item_id(), ItemId::new(7));
    assert_eq!(session.working_text(), "Original text.");
    assert_eq!(session.anchor(), Anchor { top: 14, left: 40 });
    assert_eq!(session.focus(), EditorField::Summary);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_selection_keeps_editor_closed(mut editor: InlineEditor, #[case] text: &str) {
    let row = item(1, "Summary");
    assert!(editor.open(&selection_in(&row, text), &row).is_none());
    assert_eq!(editor.state(), EditorState::Closed);
}

#[rstest]
fn selection_for_another_item_is_rejected(mut editor: InlineEditor) {
    let row = item(1, "Summary");
    let other = item(2, "Other");
    assert!(editor.open(&selection_in(&other, "Other"), &row).is_none());
}

#[rstest]
fn working_copy_edits_do_not_touch_the_item(mut editor: InlineEditor) {
    let row = item(1, "abc");
    editor.open(&selection_in(&row, "abc"), &row);
    editor.edit(BufferEdit::Insert('!'));

    assert_eq!(editor.session().unwrap().working_text(), "abc!");
    assert_eq!(row.summary, "abc");
}

#[rstest]
fn new_selection_replaces_previous_session(mut editor: InlineEditor) {
    let first = item(1, "first");
    let second = item(2, "second");
    let first_id = editor.open(&selection_in(&first, "first"), &first).unwrap();
    editor.edit(BufferEdit::Insert('?'));
    let second_id = editor.open(&selection_in(&second, "second"), &second).unwrap();

    assert_ne!(first_id, second_id);
    let session = editor.session().unwrap();
    assert_eq!(session.item_id(), ItemId::new(2));
    assert_eq!(session.working_text(), "second");
}

#[rstest]
fn second_rewrite_while_busy_is_rejected(mut editor: InlineEditor) {
    let row = item(1, "Long summary text.");
    editor.open(&selection_in(&row, "Long"), &row);

    let first = editor.request_rewrite(RewriteKind::Shrink).expect("first shrink");
    assert_eq!(editor.state(), EditorState::Busy);
    assert_eq!(editor.request_rewrite(RewriteKind::Shrink), Err(RewriteRejected::Busy));
    assert_eq!(editor.request_rewrite(RewriteKind::Expand), Err(RewriteRejected::Busy));

    assert_eq!(
        editor.finish_rewrite(first.ticket, Ok("Short.".to_owned())),
        RewriteOutcome::Applied
    );
    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(editor.session().unwrap().working_text(), "Short.");
}

#[rstest]
fn duplicate_completion_is_applied_once(mut editor: InlineEditor) {
    let row = item(1, "text");
    editor.open(&selection_in(&row, "text"), &row);
    let request = editor.request_rewrite(RewriteKind::Expand).unwrap();

    editor.finish_rewrite(request.ticket, Ok("longer text".to_owned()));
    editor.edit(BufferEdit::Insert('.'));
    assert_eq!(
        editor.finish_rewrite(request.ticket, Ok("ignored".to_owned())),
        RewriteOutcome::Stale
    );
    assert_eq!(editor.session().unwrap().working_text(), "longer text.");
}

#[rstest]
fn failed_rewrite_keeps_buffer_and_clears_busy(mut editor: InlineEditor) {
    let row = item(1, "keep me");
    editor.open(&selection_in(&row, "keep"), &row);
    let request = editor.request_rewrite(RewriteKind::Shrink).unwrap();

    let outcome = editor.finish_rewrite(request.ticket, Err(timeout()));

    assert!(matches!(outcome, RewriteOutcome::Failed(message) if message.contains("504")));
    assert_eq!(editor.state(), EditorState::Editing);
    assert_eq!(editor.session().unwrap().working_text(), "keep me");
}

#[rstest]
fn requests_carry_the_working_buffer(mut editor: InlineEditor) {
    let row = item(3, "base");
    editor.open(&selection_in(&row, "base"), &row);
    editor.edit(BufferEdit::Insert('!'));

    let shrink = editor.request_rewrite(RewriteKind::Shrink).unwrap();
    assert_eq!(
        shrink.call,
        RewriteCall::Shrink { id: ItemId::new(3), summary: "base!".to_owned() }
    );
    editor.finish_rewrite(shrink.ticket, Err(timeout()));

    let expand = editor.request_rewrite(RewriteKind::Expand).unwrap();
    assert_eq!(expand.call, RewriteCall::Expand { summary: "base!".to_owned(), expansion: 1.5 });
}

#[rstest]
fn instruction_rewrite_needs_an_instruction(mut editor: InlineEditor) {
    let row = item(3, "base");
    editor.open(&selection_in(&row, "base"), &row);
    assert_eq!(
        editor.request_rewrite(RewriteKind::Instruct),
        Err(RewriteRejected::EmptyInstruction)
    );
    assert_eq!(editor.state(), EditorState::Editing);

    editor.toggle_focus();
    for ch in "more formal".chars() {
        editor.edit(BufferEdit::Insert(ch));
    }
    let request = editor.request_rewrite(RewriteKind::Instruct).unwrap();
    assert_eq!(
        request.call,
        RewriteCall::Instruct {
            id: ItemId::new(3),
            summary: "base".to_owned(),
            instruction: "more formal".to_owned(),
        }
    );
    assert_eq!(editor.session().unwrap().working_text(), "base");
}

#[rstest]
fn rewrite_on_closed_editor_is_rejected(mut editor: InlineEditor) {
    assert_eq!(editor.request_rewrite(RewriteKind::Shrink), Err(RewriteRejected::Closed));
}

#[rstest]
fn click_inside_popup_keeps_busy_session_open(mut editor: InlineEditor) {
    let row = item(1, "text");
    editor.open(&selection_in(&row, "text"), &row);
    editor.request_rewrite(RewriteKind::Shrink).unwrap();

    assert!(!editor.pointer_down(true));
    assert_eq!(editor.state(), EditorState::Busy);

    assert!(editor.pointer_down(false));
    assert_eq!(editor.state(), EditorState::Closed);
}

#[rstest]
fn late_response_never_reaches_a_newer_session(mut editor: InlineEditor) {
    let first = item(1, "first");
    let second = item(2, "second");
    editor.open(&selection_in(&first, "first"), &first);
    let in_flight = editor.request_rewrite(RewriteKind::Expand).unwrap();

    editor.pointer_down(false);
    editor.open(&selection_in(&second, "second"), &second);

    assert_eq!(
        editor.finish_rewrite(in_flight.ticket, Ok("first, expanded".to_owned())),
        RewriteOutcome::Stale
    );
    let session = editor.session().unwrap();
    assert_eq!(session.working_text(), "second");
    assert!(!session.is_busy());
}

#[rstest]
fn take_commit_closes_and_returns_working_copy(mut editor: InlineEditor) {
    let row = item(9, "draft");
    editor.open(&selection_in(&row, "draft"), &row);
    editor.edit(BufferEdit::Newline);
    editor.edit(BufferEdit::Insert('x'));

    assert_eq!(editor.take_commit(), Some((ItemId::new(9), "draft\nx".to_owned())));
    assert_eq!(editor.state(), EditorState::Closed);
    assert_eq!(editor.take_commit(), None);
}
