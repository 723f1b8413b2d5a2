// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// One curated content record as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub title: String,
    /// Preformatted by the backend; displayed verbatim.
    #[serde(default)]
    pub time: String,
    /// Comma-joined free-text tags.
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub score: f64,
    /// Multi-line summary. Line breaks are significant.
    #[serde(default)]
    pub summary: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            source: String::new(),
            title: String::new(),
            time: String::new(),
            tags: String::new(),
            link: String::new(),
            score: 0.0,
            summary: String::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Score as rendered in the table: one decimal place.
    pub fn score_label(&self) -> String {
        format!("{:.1}", self.score)
    }

    /// Summary split into the explicit lines it is rendered as.
    pub fn summary_lines(&self) -> impl Iterator<Item = &str> {
        self.summary.split('\n')
    }
}

/// One fetched page: the ordered items plus whether a further page exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<Item>,
    pub has_more: bool,
}

impl PageResult {
    pub fn new(items: Vec<Item>, has_more: bool) -> Self {
        Self { items, has_more }
    }
}
