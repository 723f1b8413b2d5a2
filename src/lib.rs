// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Curator-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Curator and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Curator: a terminal dashboard for reviewing, rewriting, and publishing generated summaries.
//!
//! The core ([`paginator`], [`editor`], [`dashboard`]) is sans-IO; [`runtime`] executes its
//! effects against an [`api::Backend`] and [`tui`] drives it from the terminal.

pub mod api;
pub mod compose;
pub mod config;
pub mod dashboard;
pub mod demo;
pub mod editor;
pub mod logging;
pub mod model;
pub mod paginator;
pub mod runtime;
pub mod selection;
pub mod tui;
