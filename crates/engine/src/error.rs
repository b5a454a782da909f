// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the refresh engine

use thiserror::Error;

/// Errors that can occur when starting a refresh run
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no stores selected for refresh")]
    NoTargets,
}
