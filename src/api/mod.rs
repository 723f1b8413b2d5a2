// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend contracts.
//!
//! The dashboard core never performs I/O itself; it emits requests that a [`Backend`] executes.
//! [`HttpBackend`] is the production implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{ItemId, PageResult};

mod http;
pub mod wire;

pub use http::HttpBackend;

/// Errors from a backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or undecodable body.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The publish endpoint answered `success: false`.
    #[error("publish was rejected by the backend")]
    Rejected,
}

/// One text transformation call against the working buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteCall {
    Shrink { id: ItemId, summary: String },
    Expand { summary: String, expansion: f64 },
    Instruct { id: ItemId, summary: String, instruction: String },
}

impl RewriteCall {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Shrink { .. } => "shrink",
            Self::Expand { .. } => "expand",
            Self::Instruct { .. } => "rewrite",
        }
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch_page(&self, page: usize, limit: usize) -> Result<PageResult, ApiError>;

    async fn publish(&self, id: ItemId, content: &str) -> Result<(), ApiError>;

    async fn shrink(&self, id: ItemId, summary: &str) -> Result<String, ApiError>;

    async fn expand(&self, summary: &str, expansion: f64) -> Result<String, ApiError>;

    async fn rewrite(
        &self,
        id: ItemId,
        summary: &str,
        instruction: &str,
    ) -> Result<String, ApiError>;
}

/// Routes a [`RewriteCall`] to the matching backend operation.
pub async fn run_rewrite(backend: &dyn Backend, call: &RewriteCall) -> Result<String, ApiError> {
    match call {
        RewriteCall::Shrink { id, summary } => backend.shrink(*id, summary).await,
        RewriteCall::Expand { summary, expansion } => backend.expand(summary, *expansion).await,
        RewriteCall::Instruct { id, summary, instruction } => {
            backend.rewrite(*id, summary, instruction).await
        }
    }
}
