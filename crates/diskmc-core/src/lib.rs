//! # diskmc Core Library
//!
//! A Monte Carlo engine for two-dimensional hard-disk systems under periodic
//! boundary conditions, built around O(1)-amortized neighbor queries and
//! incremental spatial-index repair.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless geometry (`PeriodicBox`,
//!   `CellGrid`) and the plain particle storage (`ParticleSet`). Everything here
//!   is a pure function of its inputs.
//!
//! - **[`engine`]: The Logic Core.** This stateful layer drives the simulation.
//!   It includes the linked-cell index (`CellIndex`) with incremental two-cell
//!   repair, the adaptive step-size controller, the `Simulation` itself, and the
//!   configuration and progress-reporting machinery.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level, user-facing
//!   layer. It ties the `engine` and `core` together into complete procedures,
//!   such as relaxing a configuration for a fixed number of steps or compressing
//!   a system toward a target surface fraction.

pub mod core;
pub mod engine;
pub mod workflows;
