// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Items are owned by the backend and read into the dashboard one page at a time.

pub mod ids;
pub mod item;

pub use ids::{ItemId, SessionId};
pub use item::{Item, PageResult};
