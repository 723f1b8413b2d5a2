// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! JSON bodies exchanged with the backend.
//!
//! Field names follow the backend verbatim, including its mixed casing.

use serde::{Deserialize, Serialize};

use crate::model::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub limit: usize,
    pub page: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishBody {
    pub id: ItemId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReply {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkBody {
    pub id: ItemId,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShrinkReply {
    #[serde(rename = "decreaseSummary")]
    pub decrease_summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandBody {
    pub summary_text: String,
    pub expansion: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandReply {
    #[serde(rename = "increasedSummary")]
    pub increased_summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructBody {
    pub id: ItemId,
    pub summary: String,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructReply {
    #[serde(rename = "editedSummary")]
    pub edited_summary: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ExpandBody, ExpandReply, InstructBody, PublishBody, ShrinkReply};
    use crate::model::ItemId;

    #[test]
    fn request_bodies_use_backend_field_names() {
        let publish = PublishBody { id: ItemId::new(7), content: "hi".to_owned() };
        assert_eq!(serde_json::to_value(&publish).unwrap(), json!({"id": 7, "content": "hi"}));

        let expand = ExpandBody { summary_text: "s".to_owned(), expansion: 1.5 };
        assert_eq!(
            serde_json::to_value(&expand).unwrap(),
            json!({"summary_text": "s", "expansion": 1.5})
        );

        let instruct = InstructBody {
            id: ItemId::new(2),
            summary: "s".to_owned(),
            instruction: "shorter".to_owned(),
        };
        assert_eq!(
            serde_json::to_value(&instruct).unwrap(),
            json!({"id": 2, "summary": "s", "instruction": "shorter"})
        );
    }

    #[test]
    fn replies_decode_camel_case_fields() {
        let shrink: ShrinkReply =
            serde_json::from_value(json!({"decreaseSummary": "short"})).unwrap();
        assert_eq!(shrink.decrease_summary, "short");

        let expand: ExpandReply =
            serde_json::from_value(json!({"increasedSummary": "long"})).unwrap();
        assert_eq!(expand.increased_summary, "long");
    }
}
