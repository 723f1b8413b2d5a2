// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-process demo backend.
//!
//! Serves a seeded in-memory item set over the same HTTP contract as the real backend, with toy
//! deterministic rewrites, so the dashboard can run (and be tested) without one.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::api::wire::{
    ExpandBody, ExpandReply, InstructBody, InstructReply, PageQuery, PublishBody, PublishReply,
    ShrinkBody, ShrinkReply,
};
use crate::config::Endpoints;
use crate::model::{Item, PageResult};

const DEMO_ITEM_COUNT: i64 = 23;
const SOURCES: [&str; 4] = ["Reuters", "AP", "The Guardian", "Le Monde"];
const TOPICS: [(&str, &str); 6] = [
    ("Grid operators brace for record heat", "energy, climate"),
    ("Chip export rules tighten again", "ai, policy, trade"),
    ("Coastal cities test floating barriers", "climate, infrastructure"),
    ("Open-weight models close the gap", "ai, research"),
    ("Central banks weigh digital cash", "finance, policy"),
    ("Drought shifts wheat futures", "agriculture, climate, markets"),
];

#[derive(Debug, Default)]
pub struct DemoStore {
    items: Vec<Item>,
    published: Vec<PublishBody>,
}

impl DemoStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, published: Vec::new() }
    }

    pub fn seeded() -> Self {
        Self::new(demo_items())
    }

    pub fn published(&self) -> &[PublishBody] {
        &self.published
    }

    fn page(&self, query: &PageQuery) -> PageResult {
        let limit = query.limit.max(1);
        let start = query.page.saturating_mul(limit).min(self.items.len());
        let end = start.saturating_add(limit).min(self.items.len());
        PageResult::new(self.items[start..end].to_vec(), end < self.items.len())
    }
}

pub type SharedDemoStore = Arc<Mutex<DemoStore>>;

pub fn demo_items() -> Vec<Item> {
    (1..=DEMO_ITEM_COUNT)
        .map(|id| {
            let index = (id - 1) as usize;
            let (title, tags) = TOPICS[index % TOPICS.len()];
            let mut item = Item::new(id)
                .with_title(format!("{title} ({id})"))
                .with_tags(tags)
                .with_link(format!("https://news.example.org/articles/{id}"))
                .with_summary(format!(
                    "{title}.\nAnalysts expect the story to develop over the coming weeks.\nKey \
                     figures are still being confirmed."
                ));
            item.source = SOURCES[index % SOURCES.len()].to_owned();
            item.time = format!(
                "2026-10-{:02} {:02}:{:02}",
                1 + index % 28,
                6 + index % 12,
                index * 7 % 60
            );
            item.score = 10.0 - (index as f64 * 0.37) % 9.0;
            item
        })
        .collect()
}

/// Keeps roughly the first half of the words, ending on a full stop.
pub fn shrink_text(summary: &str) -> String {
    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() <= 3 {
        return summary.trim().to_owned();
    }
    let mut short = words[..words.len().div_ceil(2)].join(" ");
    short = short.trim_end_matches(|ch: char| ch == ',' || ch == '.').to_owned();
    short.push('.');
    short
}

/// Appends one follow-up sentence per started unit of `expansion` above 1.0.
pub fn expand_text(summary: &str, expansion: f64) -> String {
    let extra = ((expansion - 1.0).max(0.0) * 2.0).ceil().max(1.0) as usize;
    let mut out = summary.trim_end().to_owned();
    for n in 0..extra {
        out.push('\n');
        out.push_str(match n % 2 {
            0 => "Further context: observers note the broader trend behind this development.",
            _ => "Follow-up reporting is expected once official figures are published.",
        });
    }
    out
}

/// Toy instruction handling: case changes are honoured, anything else is echoed as a note.
pub fn instruct_text(summary: &str, instruction: &str) -> String {
    let lowered = instruction.to_lowercase();
    if lowered.contains("upper") {
        summary.to_uppercase()
    } else if lowered.contains("lower") {
        summary.to_lowercase()
    } else {
        format!("{} [{}]", summary.trim_end(), instruction.trim())
    }
}

pub fn router(store: SharedDemoStore, endpoints: &Endpoints) -> Router {
    Router::new()
        .route(&endpoints.items, get(list_items))
        .route(&endpoints.publish, post(publish))
        .route(&endpoints.shrink, post(shrink))
        .route(&endpoints.expand, post(expand))
        .route(&endpoints.rewrite, post(rewrite))
        .with_state(store)
}

async fn list_items(
    State(store): State<SharedDemoStore>,
    Query(query): Query<PageQuery>,
) -> Json<PageResult> {
    Json(store.lock().await.page(&query))
}

async fn publish(
    State(store): State<SharedDemoStore>,
    Json(body): Json<PublishBody>,
) -> Json<PublishReply> {
    let success = !body.content.trim().is_empty();
    info!(item = %body.id, success, "demo publish");
    if success {
        store.lock().await.published.push(body);
    }
    Json(PublishReply { success })
}

async fn shrink(Json(body): Json<ShrinkBody>) -> Json<ShrinkReply> {
    Json(ShrinkReply { decrease_summary: shrink_text(&body.summary) })
}

async fn expand(Json(body): Json<ExpandBody>) -> Json<ExpandReply> {
    Json(ExpandReply { increased_summary: expand_text(&body.summary_text, body.expansion) })
}

async fn rewrite(Json(body): Json<InstructBody>) -> Json<InstructReply> {
    Json(InstructReply { edited_summary: instruct_text(&body.summary, &body.instruction) })
}

/// A running demo server. Dropping the handle does not stop it; call [`DemoServer::shutdown`].
pub struct DemoServer {
    addr: SocketAddr,
    store: SharedDemoStore,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl DemoServer {
    /// Binds an ephemeral loopback port and starts serving on the current runtime.
    pub async fn spawn(store: DemoStore, endpoints: &Endpoints) -> io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let addr = listener.local_addr()?;
        let store = Arc::new(Mutex::new(store));
        let app = router(store.clone(), endpoints);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(err) = serve.await {
                error!(error = %err, "demo backend stopped");
            }
        });
        info!(%addr, "demo backend listening");

        Ok(Self { addr, store, shutdown: Some(shutdown_tx), handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn store(&self) -> SharedDemoStore {
        self.store.clone()
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        let _ = self.handle.await;
    }
}
