//! # Core Module
//!
//! This module provides the fundamental building blocks for hard-disk Monte
//! Carlo simulation, serving as the stateless computational core of the library.
//!
//! ## Overview
//!
//! The core module implements the geometry and storage primitives that every
//! higher layer is built on. Nothing here holds simulation state: a
//! [`boundary::PeriodicBox`] and a [`grid::CellGrid`] are pure functions of
//! their dimensions, and a [`particles::ParticleSet`] is plain storage with no
//! behavior beyond append and access.
//!
//! ## Key Components
//!
//! - [`boundary`] - Periodic rectangular domain and minimum-image arithmetic
//! - [`grid`] - Discretization of the domain into a cell grid with periodic
//!   cell wrapping
//! - [`particles`] - Parallel position/radius storage indexed by particle id

pub mod boundary;
pub mod grid;
pub mod particles;
