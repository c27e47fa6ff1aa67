//! # Engine Module
//!
//! This module implements the stateful logic core of diskmc: the spatial
//! indexing and move-acceptance machinery that turns the stateless geometry of
//! [`crate::core`] into a running simulation.
//!
//! ## Architecture
//!
//! - **Spatial Index** ([`cell_index`], crate-internal) - Linked-cell list with
//!   O(N) rebuild and O(1)-amortized incremental two-cell repair
//! - **Step-Size Control** ([`step_size`], crate-internal) - Feedback
//!   controller steering the trial displacement toward a target acceptance
//!   ratio
//! - **Simulation** ([`simulation`]) - The Monte Carlo engine: trial moves,
//!   particle insertion, box resizing, diagnostics
//! - **Configuration** ([`config`]) - Validated parameters, builder, TOML
//!   loading
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//!   for front ends
//!
//! ## Concurrency Model
//!
//! Strictly single-threaded and synchronous. A step executes to completion
//! before any other operation may observe simulation state; the incremental
//! repair invariant of the cell index depends on no mutation interleaving with
//! a step.

pub(crate) mod cell_index;
pub mod config;
pub mod progress;
pub mod simulation;
pub(crate) mod step_size;
