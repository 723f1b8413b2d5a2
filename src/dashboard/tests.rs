// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::{fixture, rstest};

use super::{Dashboard, Effect, Event, Mode, NoticeKind, PUBLISH_SUCCESS_MESSAGE};
use crate::api::{ApiError, RewriteCall};
use crate::compose::PublishDraft;
use crate::editor::{BufferEdit, RewriteKind};
use crate::model::{Item, ItemId, PageResult};
use crate::paginator::FetchRequest;
use crate::selection::{Anchor, ScrollOffset, SelectionRect, TextSelection};

fn row(id: i64) -> Item {
    Item::new(id)
        .with_title(format!("Item {id}"))
        .with_summary(format!("Summary {id}."))
        .with_tags("ai, climate ,, policy")
        .with_link(format!("https://example.org/{id}"))
}

fn fetch_of(effects: &[Effect]) -> FetchRequest {
    match effects {
        [Effect::Fetch(request)] => *request,
        other => panic!("expected a single fetch, got {other:?}"),
    }
}

fn selection(id: i64, text: &str) -> TextSelection {
    TextSelection {
        item_id: ItemId::new(id),
        text: text.to_owned(),
        rect: SelectionRect { top: 5, left: 60, bottom: 6, right: 70 },
        scroll: ScrollOffset { x: 0, y: 2 },
    }
}

fn load(dashboard: &mut Dashboard, effects: Vec<Effect>, items: Vec<Item>, has_more: bool) {
    let request = fetch_of(&effects);
    dashboard.dispatch(Event::PageLoaded {
        ticket: request.ticket,
        result: Ok(PageResult::new(items, has_more)),
    });
}

fn summaries(dashboard: &Dashboard) -> Vec<(i64, String)> {
    dashboard
        .paginator()
        .items()
        .iter()
        .map(|item| (item.id.get(), item.summary.clone()))
        .collect()
}

fn rewrite_of(effects: Vec<Effect>) -> crate::editor::RewriteRequest {
    match effects.as_slice() {
        [Effect::Rewrite(request)] => request.clone(),
        other => panic!("expected a single rewrite, got {other:?}"),
    }
}

#[fixture]
fn loaded() -> Dashboard {
    let mut dashboard = Dashboard::new(5, 1.5);
    let effects = dashboard.start();
    load(&mut dashboard, effects, vec![row(5), row(6), row(7)], true);
    dashboard
}

#[test]
fn start_fetches_first_page_with_configured_limit() {
    let mut dashboard = Dashboard::new(5, 1.5);
    let request = fetch_of(&dashboard.start());
    assert_eq!(request.page, 0);
    assert_eq!(request.limit, 5);
    assert!(dashboard.paginator().is_loading());
}

#[test]
fn pagination_scenario_disables_next_on_last_page() {
    let mut dashboard = Dashboard::new(5, 1.5);
    let effects = dashboard.start();
    load(&mut dashboard, effects, (0..5).map(row).collect(), true);
    assert_eq!(dashboard.paginator().items().len(), 5);

    let effects = dashboard.dispatch(Event::NextPage);
    assert_eq!(fetch_of(&effects).page, 1);
    load(&mut dashboard, effects, (5..8).map(row).collect(), false);

    let buttons = dashboard.paginator().page_buttons();
    assert!(buttons.first().unwrap().enabled, "previous enabled");
    assert!(!buttons.last().unwrap().enabled, "next disabled");
    assert!(dashboard.dispatch(Event::NextPage).is_empty());
}

#[test]
fn rapid_navigation_keeps_only_latest_page() {
    let mut dashboard = Dashboard::new(5, 1.5);
    let first = fetch_of(&dashboard.start());
    let second = fetch_of(&dashboard.dispatch(Event::GoToPage(3)));

    dashboard.dispatch(Event::PageLoaded {
        ticket: second.ticket,
        result: Ok(PageResult::new(vec![row(30)], true)),
    });
    dashboard.dispatch(Event::PageLoaded {
        ticket: first.ticket,
        result: Ok(PageResult::new(vec![row(1)], true)),
    });

    assert_eq!(dashboard.paginator().page(), 3);
    assert_eq!(summaries(&dashboard), vec![(30, "Summary 30.".to_owned())]);
}

#[rstest]
fn open_then_confirm_without_edits_changes_nothing(mut loaded: Dashboard) {
    let before = summaries(&loaded);
    loaded.dispatch(Event::TextSelected(selection(6, "Summary")));
    assert_eq!(loaded.mode(), Mode::Editing);
    assert_eq!(loaded.editor().session().unwrap().working_text(), "Summary 6.");

    loaded.dispatch(Event::Confirm);

    assert_eq!(loaded.mode(), Mode::Browsing);
    assert_eq!(summaries(&loaded), before);
}

#[rstest]
fn select_expand_confirm_updates_only_item_seven(mut loaded: Dashboard) {
    let mut items = loaded.paginator().items().to_vec();
    items[2].summary = "Original text.".to_owned();
    let effects = loaded.dispatch(Event::Reload);
    load(&mut loaded, effects, items, true);

    loaded.dispatch(Event::TextSelected(selection(7, "Original")));
    let session = loaded.editor().session().expect("editor open");
    assert_eq!(session.anchor(), Anchor { top: 8, left: 60 });

    let request = rewrite_of(loaded.dispatch(Event::Rewrite(RewriteKind::Expand)));
    assert_eq!(
        request.call,
        RewriteCall::Expand { summary: "Original text.".to_owned(), expansion: 1.5 }
    );
    assert_eq!(loaded.mode(), Mode::Busy);

    loaded.dispatch(Event::RewriteFinished {
        ticket: request.ticket,
        result: Ok("Original text, now with more detail.".to_owned()),
    });
    assert_eq!(loaded.mode(), Mode::Editing);
    loaded.dispatch(Event::Confirm);

    assert_eq!(
        summaries(&loaded),
        vec![
            (5, "Summary 5.".to_owned()),
            (6, "Summary 6.".to_owned()),
            (7, "Original text, now with more detail.".to_owned()),
        ]
    );
}

#[rstest]
fn shrink_twice_issues_one_request(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));

    let first = loaded.dispatch(Event::Rewrite(RewriteKind::Shrink));
    let second = loaded.dispatch(Event::Rewrite(RewriteKind::Shrink));

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[rstest]
fn rewrite_failure_alerts_and_keeps_session(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    let request = rewrite_of(loaded.dispatch(Event::Rewrite(RewriteKind::Shrink)));

    loaded.dispatch(Event::RewriteFinished {
        ticket: request.ticket,
        result: Err(ApiError::Status { endpoint: "/api/summary/decrease".to_owned(), status: 500 }),
    });

    assert_eq!(loaded.mode(), Mode::Notice);
    assert_eq!(loaded.notice().unwrap().kind, NoticeKind::Alert);
    loaded.dispatch(Event::DismissNotice);
    assert_eq!(loaded.mode(), Mode::Editing);
    assert_eq!(loaded.editor().session().unwrap().working_text(), "Summary 5.");
}

#[rstest]
fn confirm_after_page_change_is_dropped_silently(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(6, "Summary")));
    loaded.dispatch(Event::Edit(BufferEdit::Insert('!')));

    let effects = loaded.dispatch(Event::NextPage);
    load(&mut loaded, effects, vec![row(10), row(11)], false);
    loaded.dispatch(Event::Confirm);

    assert_eq!(loaded.mode(), Mode::Browsing);
    assert!(loaded.notice().is_none());
    assert_eq!(
        summaries(&loaded),
        vec![(10, "Summary 10.".to_owned()), (11, "Summary 11.".to_owned())]
    );
}

#[rstest]
fn outside_click_closes_even_when_busy(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    let request = rewrite_of(loaded.dispatch(Event::Rewrite(RewriteKind::Shrink)));

    loaded.dispatch(Event::PointerDown { inside_popup: true });
    assert_eq!(loaded.mode(), Mode::Busy);

    loaded.dispatch(Event::PointerDown { inside_popup: false });
    assert_eq!(loaded.mode(), Mode::Browsing);

    loaded.dispatch(Event::RewriteFinished {
        ticket: request.ticket,
        result: Ok("late".to_owned()),
    });
    assert_eq!(loaded.mode(), Mode::Browsing);
    assert!(summaries(&loaded).iter().all(|(_, summary)| summary != "late"));
}

#[rstest]
fn late_rewrite_does_not_leak_into_next_session(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    let request = rewrite_of(loaded.dispatch(Event::Rewrite(RewriteKind::Shrink)));
    loaded.dispatch(Event::PointerDown { inside_popup: false });
    loaded.dispatch(Event::TextSelected(selection(6, "Summary")));

    loaded.dispatch(Event::RewriteFinished { ticket: request.ticket, result: Ok("x".to_owned()) });

    let session = loaded.editor().session().unwrap();
    assert_eq!(session.item_id(), ItemId::new(6));
    assert_eq!(session.working_text(), "Summary 6.");
    assert_eq!(loaded.mode(), Mode::Editing);
}

#[rstest]
fn publish_from_row_requires_confirmation(mut loaded: Dashboard) {
    assert!(loaded.dispatch(Event::PublishItem(ItemId::new(7))).is_empty());
    assert_eq!(loaded.mode(), Mode::ConfirmPublish);

    let expected = PublishDraft {
        item_id: ItemId::new(7),
        content: "Summary 7.\n\n#ai #climate #policy\n\nhttps://example.org/7".to_owned(),
    };
    assert_eq!(loaded.pending_publish(), Some(&expected));

    let effects = loaded.dispatch(Event::PublishAnswered { accepted: true });
    assert_eq!(effects, vec![Effect::Publish(expected)]);
    assert_eq!(loaded.mode(), Mode::Browsing);
}

#[rstest]
fn declined_publish_sends_nothing(mut loaded: Dashboard) {
    loaded.dispatch(Event::PublishItem(ItemId::new(5)));
    assert!(loaded.dispatch(Event::PublishAnswered { accepted: false }).is_empty());
    assert!(loaded.pending_publish().is_none());
}

#[rstest]
fn publish_from_popup_uses_uncommitted_working_copy(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    loaded.dispatch(Event::Edit(BufferEdit::Backspace));
    loaded.dispatch(Event::Edit(BufferEdit::Insert('!')));
    loaded.dispatch(Event::PublishWorkingCopy);

    let draft = loaded.pending_publish().expect("draft").clone();
    assert!(draft.content.starts_with("Summary 5!\n\n"));

    loaded.dispatch(Event::PublishAnswered { accepted: true });
    assert_eq!(loaded.mode(), Mode::Editing);
    assert_eq!(summaries(&loaded)[0], (5, "Summary 5.".to_owned()));
}

#[rstest]
fn publish_outcome_is_reported_without_touching_state(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    let before = summaries(&loaded);

    loaded.dispatch(Event::PublishFinished { item_id: ItemId::new(5), result: Ok(()) });
    assert_eq!(loaded.notice().unwrap().message, PUBLISH_SUCCESS_MESSAGE);
    loaded.dispatch(Event::DismissNotice);

    loaded.dispatch(Event::PublishFinished {
        item_id: ItemId::new(5),
        result: Err(ApiError::Rejected),
    });
    assert_eq!(loaded.notice().unwrap().kind, NoticeKind::Alert);
    loaded.dispatch(Event::DismissNotice);

    assert_eq!(loaded.mode(), Mode::Editing);
    assert_eq!(summaries(&loaded), before);
}

#[rstest]
fn modal_notice_swallows_operator_input(mut loaded: Dashboard) {
    loaded.dispatch(Event::PublishFinished { item_id: ItemId::new(5), result: Ok(()) });

    assert!(loaded.dispatch(Event::NextPage).is_empty());
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    assert!(!loaded.editor().is_open());
}

#[rstest]
fn fetch_failure_surfaces_error_and_keeps_items(mut loaded: Dashboard) {
    let request = fetch_of(&loaded.dispatch(Event::NextPage));
    loaded.dispatch(Event::PageLoaded {
        ticket: request.ticket,
        result: Err(ApiError::Status { endpoint: "/api/newspapers".to_owned(), status: 502 }),
    });

    assert!(loaded.paginator().error().is_some());
    assert_eq!(loaded.paginator().items().len(), 3);
    assert_eq!(loaded.mode(), Mode::Browsing);
}

#[rstest]
fn rows_behind_a_fetch_error_cannot_be_edited_or_published(mut loaded: Dashboard) {
    let request = fetch_of(&loaded.dispatch(Event::NextPage));
    loaded.dispatch(Event::PageLoaded { ticket: request.ticket, result: Err(ApiError::Rejected) });

    assert!(loaded.dispatch(Event::PublishItem(ItemId::new(6))).is_empty());
    assert_eq!(loaded.mode(), Mode::Browsing);
    assert!(loaded.pending_publish().is_none());

    loaded.dispatch(Event::TextSelected(selection(6, "Summary")));
    assert!(!loaded.editor().is_open());

    let request = fetch_of(&loaded.dispatch(Event::Reload));
    loaded.dispatch(Event::PageLoaded {
        ticket: request.ticket,
        result: Ok(PageResult::new(vec![row(8)], false)),
    });
    loaded.dispatch(Event::PublishItem(ItemId::new(8)));
    assert_eq!(loaded.mode(), Mode::ConfirmPublish);
}

#[rstest]
fn empty_instruction_is_reported(mut loaded: Dashboard) {
    loaded.dispatch(Event::TextSelected(selection(5, "Summary")));
    assert!(loaded.dispatch(Event::Rewrite(RewriteKind::Instruct)).is_empty());
    assert_eq!(loaded.mode(), Mode::Notice);
}
