// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::wire::{
    ExpandBody, ExpandReply, InstructBody, InstructReply, PageQuery, PublishBody, PublishReply,
    ShrinkBody, ShrinkReply,
};
use super::{ApiError, Backend};
use crate::config::{Config, Endpoints};
use crate::model::{ItemId, PageResult};

/// [`Backend`] speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>, endpoints: Endpoints) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, endpoints)
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        endpoints: Endpoints,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client, base_url, endpoints }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone(), config.endpoints.clone())
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        decode(path, response).await
    }
}

async fn decode<R: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<R, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status { endpoint: path.to_owned(), status: status.as_u16() });
    }
    Ok(response.json::<R>().await?)
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_page(&self, page: usize, limit: usize) -> Result<PageResult, ApiError> {
        let path = self.endpoints.items.as_str();
        let url = self.url(path);
        debug!(%url, page, limit, "GET");
        let response =
            self.client.get(&url).query(&PageQuery { limit, page }).send().await?;
        decode(path, response).await
    }

    async fn publish(&self, id: ItemId, content: &str) -> Result<(), ApiError> {
        let body = PublishBody { id, content: content.to_owned() };
        let reply: PublishReply = self.post_json(&self.endpoints.publish, &body).await?;
        if reply.success {
            Ok(())
        } else {
            Err(ApiError::Rejected)
        }
    }

    async fn shrink(&self, id: ItemId, summary: &str) -> Result<String, ApiError> {
        let body = ShrinkBody { id, summary: summary.to_owned() };
        let reply: ShrinkReply = self.post_json(&self.endpoints.shrink, &body).await?;
        Ok(reply.decrease_summary)
    }

    async fn expand(&self, summary: &str, expansion: f64) -> Result<String, ApiError> {
        let body = ExpandBody { summary_text: summary.to_owned(), expansion };
        let reply: ExpandReply = self.post_json(&self.endpoints.expand, &body).await?;
        Ok(reply.increased_summary)
    }

    async fn rewrite(
        &self,
        id: ItemId,
        summary: &str,
        instruction: &str,
    ) -> Result<String, ApiError> {
        let body = InstructBody {
            id,
            summary: summary.to_owned(),
            instruction: instruction.to_owned(),
        };
        let reply: InstructReply = self.post_json(&self.endpoints.rewrite, &body).await?;
        Ok(reply.edited_summary)
    }
}
