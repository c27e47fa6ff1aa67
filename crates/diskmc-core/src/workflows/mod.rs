//! # Workflows Module
//!
//! This module provides high-level entry points that orchestrate complete
//! simulation procedures on top of the [`crate::engine`] layer.
//!
//! ## Architecture
//!
//! - **Relaxation** ([`relax`]) - Run a fixed number of Monte Carlo trial
//!   moves with progress reporting and periodic diagnostics.
//! - **Compression** ([`compress`]) - Alternate relaxation bursts with box
//!   shrinking until a target surface fraction is reached.
//!
//! Workflows never print or draw; they report through
//! [`crate::engine::progress::ProgressReporter`] and `tracing`, leaving
//! presentation to the front end.

pub mod compress;
pub mod relax;
