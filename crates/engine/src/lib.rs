// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Document store refresh engine

mod error;
mod orchestrator;
mod poll;
pub mod progress;
pub mod report;

pub use error::EngineError;
pub use orchestrator::Orchestrator;
pub use poll::refresh_store;
pub use progress::{ProgressEvent, ProgressSink};
pub use report::RefreshReport;
