// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Executes dashboard effects against a backend.
//!
//! Each effect becomes one task on the runtime; its completion is sent back as an [`Event`] to
//! the loop that owns the [`Dashboard`](crate::dashboard::Dashboard). Nothing is cancelled: late
//! completions are left for the dashboard to discard.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::api::{run_rewrite, Backend};
use crate::dashboard::{Effect, Event};

#[derive(Clone)]
pub struct EffectRunner {
    backend: Arc<dyn Backend>,
    handle: Handle,
    events: UnboundedSender<Event>,
}

impl EffectRunner {
    pub fn new(backend: Arc<dyn Backend>, handle: Handle, events: UnboundedSender<Event>) -> Self {
        Self { backend, handle, events }
    }

    pub fn run_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    pub fn run(&self, effect: Effect) {
        let backend = self.backend.clone();
        let events = self.events.clone();
        self.handle.spawn(async move {
            let event = execute(backend.as_ref(), effect).await;
            if events.send(event).is_err() {
                debug!("event loop gone; completion dropped");
            }
        });
    }
}

/// Runs one effect to completion and turns the result into the matching event.
pub async fn execute(backend: &dyn Backend, effect: Effect) -> Event {
    match effect {
        Effect::Fetch(request) => {
            let result = backend.fetch_page(request.page, request.limit).await;
            Event::PageLoaded { ticket: request.ticket, result }
        }
        Effect::Rewrite(request) => {
            let result = run_rewrite(backend, &request.call).await;
            Event::RewriteFinished { ticket: request.ticket, result }
        }
        Effect::Publish(draft) => {
            let result = backend.publish(draft.item_id, &draft.content).await;
            Event::PublishFinished { item_id: draft.item_id, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use super::{execute, EffectRunner};
    use crate::api::{ApiError, Backend};
    use crate::compose::PublishDraft;
    use crate::dashboard::{Dashboard, Effect, Event};
    use crate::editor::RewriteKind;
    use crate::model::{Item, ItemId, PageResult};
    use crate::selection::{ScrollOffset, SelectionRect, TextSelection};

    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingBackend {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl Backend for RecordingBackend {
        async fn fetch_page(&self, page: usize, limit: usize) -> Result<PageResult, ApiError> {
            self.record(format!("fetch {page} {limit}"));
            let items = (0..limit as i64)
                .map(|n| Item::new(page as i64 * 100 + n).with_summary("text"))
                .collect();
            Ok(PageResult::new(items, page < 2))
        }

        async fn publish(&self, id: ItemId, content: &str) -> Result<(), ApiError> {
            self.record(format!("publish {id} {content}"));
            Err(ApiError::Rejected)
        }

        async fn shrink(&self, id: ItemId, summary: &str) -> Result<String, ApiError> {
            self.record(format!("shrink {id} {summary}"));
            Ok("short".to_owned())
        }

        async fn expand(&self, summary: &str, expansion: f64) -> Result<String, ApiError> {
            self.record(format!("expand {summary} {expansion}"));
            Ok(format!("{summary} and more"))
        }

        async fn rewrite(
            &self,
            id: ItemId,
            summary: &str,
            instruction: &str,
        ) -> Result<String, ApiError> {
            self.record(format!("rewrite {id} {summary} {instruction}"));
            Ok(instruction.to_owned())
        }
    }

    #[tokio::test]
    async fn publish_effect_reports_rejection() {
        let backend = RecordingBackend::default();
        let draft = PublishDraft { item_id: ItemId::new(3), content: "post".to_owned() };

        let event = execute(&backend, Effect::Publish(draft)).await;

        assert!(matches!(
            event,
            Event::PublishFinished { item_id, result: Err(ApiError::Rejected) } if item_id == ItemId::new(3)
        ));
        assert_eq!(backend.calls.lock().unwrap().as_slice(), ["publish 3 post"]);
    }

    #[tokio::test]
    async fn runner_round_trips_fetch_and_rewrite_through_dashboard() {
        let backend = Arc::new(RecordingBackend::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(backend.clone(), tokio::runtime::Handle::current(), tx);
        let mut dashboard = Dashboard::new(2, 2.0);

        runner.run_all(dashboard.start());
        let event = rx.recv().await.expect("page event");
        dashboard.dispatch(event);
        assert_eq!(dashboard.paginator().items().len(), 2);

        dashboard.dispatch(Event::TextSelected(TextSelection {
            item_id: ItemId::new(1),
            text: "text".to_owned(),
            rect: SelectionRect::default(),
            scroll: ScrollOffset::default(),
        }));
        runner.run_all(dashboard.dispatch(Event::Rewrite(RewriteKind::Expand)));
        let event = rx.recv().await.expect("rewrite event");
        dashboard.dispatch(event);

        assert_eq!(dashboard.editor().session().unwrap().working_text(), "text and more");
        assert_eq!(
            backend.calls.lock().unwrap().as_slice(),
            ["fetch 0 2", "expand text 2"]
        );
    }
}
