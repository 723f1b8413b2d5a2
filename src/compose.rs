// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Publish message composition.

use crate::model::{Item, ItemId};

const HASHTAG_MARKER: char = '#';

/// Builds the hashtag line for a comma-joined tag string.
///
/// Tokens are trimmed, empty tokens dropped, each survivor prefixed with `#`, and the result
/// joined with single spaces.
pub fn hashtag_line(tags: &str) -> String {
    let mut line = String::new();
    for token in tags.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if !line.is_empty() {
            line.push(' ');
        }
        line.push(HASHTAG_MARKER);
        line.push_str(token);
    }
    line
}

/// Composes the exact text sent to the publish endpoint.
///
/// Layout is `summary`, the hashtag line, and the link, separated by blank lines. Empty parts are
/// left out along with their separator.
pub fn compose_post(summary: &str, tags: &str, link: &str) -> String {
    let hashtags = hashtag_line(tags);
    let link = link.trim();

    let mut post = summary.trim_end().to_owned();
    for part in [hashtags.as_str(), link] {
        if part.is_empty() {
            continue;
        }
        if !post.is_empty() {
            post.push_str("\n\n");
        }
        post.push_str(part);
    }
    post
}

/// A publish request awaiting the operator's confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishDraft {
    pub item_id: ItemId,
    pub content: String,
}

impl PublishDraft {
    /// Draft for an item using `summary` instead of the item's committed summary.
    pub fn for_item(item: &Item, summary: &str) -> Self {
        Self { item_id: item.id, content: compose_post(summary, &item.tags, &item.link) }
    }
}
