use super::cell_index::CellIndex;
use super::config::SimulationConfig;
use super::step_size::StepSizeController;
use crate::core::boundary::PeriodicBox;
use crate::core::grid::Cell;
use crate::core::particles::ParticleSet;
use nalgebra::{Point2, Vector2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Trial placements attempted before an insertion gives up.
const INSERTION_RETRY_BUDGET: u32 = 10_000;
/// Uniform scale applied by [`Simulation::grow_box`].
const GROW_FACTOR: f64 = 1.01;
/// The box never shrinks by more than this per call.
const MAX_SHRINK_PER_CALL: f64 = 0.01;

/// Observable state of a simulation, for status reporting.
///
/// The core only computes the numbers; formatting and display belong to the
/// front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Diagnostics {
    pub number_particles: usize,
    pub box_width: f64,
    pub box_height: f64,
    /// Fraction of the box area covered by disks, `Σ π·rᵢ² / (width·height)`.
    pub surface_fraction: f64,
    /// Current trial displacement magnitude.
    pub displacement: f64,
    /// Acceptance ratio over the last completed control window.
    pub acceptance_ratio: f64,
}

/// A hard-disk Monte Carlo simulation.
///
/// Each [`advance`](Self::advance) call executes one complete trial move: pick
/// a particle uniformly, propose a displacement drawn from the step-size
/// controller, test the proposal against the candidates in the 3×3 cell
/// stencil of the target cell, and commit or discard. Acceptance is purely
/// geometric: all non-overlapping hard-disk configurations carry equal
/// weight, so the Metropolis rule degenerates to "accept iff no overlap".
///
/// The whole step runs to completion before anything else can observe the
/// state; external collaborators (renderers, input layers) read
/// [`particles`](Self::particles) and [`bounds`](Self::bounds) strictly
/// between steps. Incremental index repair relies on this: no other mutation
/// may interleave with a step.
pub struct Simulation {
    particles: ParticleSet,
    bounds: PeriodicBox,
    cutoff: f64,
    particle_radius: f64,
    index: CellIndex,
    controller: StepSizeController,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation with `number_particles` disks placed uniformly at
    /// random in the box.
    ///
    /// The initial configuration may contain overlaps; the dynamics anneal
    /// them away, since a move is only ever accepted into overlap-free
    /// surroundings.
    pub fn new(config: &SimulationConfig) -> Self {
        let mut rng = seeded_rng(config);
        let bounds = PeriodicBox::new(config.box_width, config.box_height);
        let mut particles = ParticleSet::with_capacity(config.number_particles);
        for _ in 0..config.number_particles {
            let position = random_position(&mut rng, &bounds);
            particles.push(position, config.particle_radius);
        }
        Self::assemble(config, bounds, particles, rng)
    }

    /// Creates a simulation from explicit coordinates, for reproducible
    /// setups; every disk gets the configured radius. The configured particle
    /// count is ignored in favor of `positions.len()`.
    pub fn from_positions(config: &SimulationConfig, positions: Vec<Point2<f64>>) -> Self {
        assert!(!positions.is_empty(), "a simulation needs at least one particle");
        let rng = seeded_rng(config);
        let bounds = PeriodicBox::new(config.box_width, config.box_height);
        let mut particles = ParticleSet::with_capacity(positions.len());
        for position in positions {
            particles.push(position, config.particle_radius);
        }
        Self::assemble(config, bounds, particles, rng)
    }

    fn assemble(
        config: &SimulationConfig,
        bounds: PeriodicBox,
        particles: ParticleSet,
        rng: StdRng,
    ) -> Self {
        if bounds.width() < 3.0 * config.cutoff || bounds.height() < 3.0 * config.cutoff {
            warn!(
                width = bounds.width(),
                height = bounds.height(),
                cutoff = config.cutoff,
                "box spans fewer than three cutoff lengths; cells are smaller than the cutoff and the 3x3 stencil may miss neighbors"
            );
        }
        let mut index = CellIndex::new(bounds, config.cutoff);
        index.rebuild(&particles);
        info!(
            particles = particles.len(),
            width = bounds.width(),
            height = bounds.height(),
            cutoff = config.cutoff,
            "simulation initialized"
        );
        Self {
            particles,
            bounds,
            cutoff: config.cutoff,
            particle_radius: config.particle_radius,
            index,
            controller: StepSizeController::new(config.control_window, config.target_acceptance),
            rng,
        }
    }

    /// Read-only view of the particles, for renderers and reporting.
    pub fn particles(&self) -> &ParticleSet {
        &self.particles
    }

    pub fn bounds(&self) -> &PeriodicBox {
        &self.bounds
    }

    /// Executes one trial move; returns whether it was accepted.
    pub fn advance(&mut self) -> bool {
        let i = self.rng.gen_range(0..self.particles.len());
        let current = self.bounds.wrap(self.particles.position(i));
        let old_cell = self.index.cell_of(current);

        let d = self.controller.displacement();
        let jump = Vector2::new(self.rng.gen_range(-d..=d), self.rng.gen_range(-d..=d));
        let proposed = current + jump;
        let new_cell = self.index.cell_of(proposed);

        let accepted = !self.overlaps_any(proposed, new_cell, Some(i));
        if accepted {
            self.particles.set_position(i, proposed);
            if new_cell != old_cell {
                self.index.repair(&self.particles, old_cell, new_cell);
            }
        }
        self.controller.register_outcome(accepted);
        accepted
    }

    /// Attempts to place one new disk at a uniformly random overlap-free
    /// position.
    ///
    /// Returns the new particle id, or `None` once the retry budget is
    /// exhausted. Exhaustion is a valid outcome of a crowded box, not an
    /// error; the particle set is left untouched.
    pub fn try_insert_particle(&mut self) -> Option<usize> {
        for _ in 0..INSERTION_RETRY_BUDGET {
            let candidate = random_position(&mut self.rng, &self.bounds);
            let cell = self.index.cell_of(candidate);
            if !self.overlaps_any(candidate, cell, None) {
                let id = self.particles.push(candidate, self.particle_radius);
                // Slot numbering is tied to the array length, so an append
                // always forces a full rebuild.
                self.index.rebuild(&self.particles);
                debug!(id, total = self.particles.len(), "particle inserted");
                return Some(id);
            }
        }
        debug!("insertion retry budget exhausted; no particle added");
        None
    }

    /// Grows the box (and every position) by a fixed 1% scale.
    pub fn grow_box(&mut self) {
        self.rescale(GROW_FACTOR);
    }

    /// Shrinks the box, gently when the step size is large.
    ///
    /// A large random walk right after a shrink would cascade into overlaps,
    /// so the shrink scales inversely with the current displacement, clamped
    /// to at most 1% per call.
    pub fn shrink_box(&mut self) {
        let shrink = MAX_SHRINK_PER_CALL.min(1.0 / (100.0 * self.controller.displacement()));
        self.rescale(1.0 - shrink);
    }

    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            number_particles: self.particles.len(),
            box_width: self.bounds.width(),
            box_height: self.bounds.height(),
            surface_fraction: self.particles.covered_area() / self.bounds.area(),
            displacement: self.controller.displacement(),
            acceptance_ratio: self.controller.acceptance_ratio(),
        }
    }

    /// True if a disk centered at `position` would overlap any existing
    /// particle other than `exclude`, under the minimum-image metric.
    fn overlaps_any(&self, position: Point2<f64>, cell: Cell, exclude: Option<usize>) -> bool {
        let cutoff_squared = self.cutoff * self.cutoff;
        self.index.neighbors(cell).any(|j| {
            exclude != Some(j) && {
                let separation = self.bounds.min_image(self.particles.position(j) - position);
                separation.norm_squared() < cutoff_squared
            }
        })
    }

    fn rescale(&mut self, factor: f64) {
        assert!(factor > 0.0, "rescale factor must be positive, got {factor}");
        self.particles.scale_positions(factor);
        self.bounds = self.bounds.scaled(factor);
        self.index = CellIndex::new(self.bounds, self.cutoff);
        self.index.rebuild(&self.particles);
        debug!(
            factor,
            width = self.bounds.width(),
            height = self.bounds.height(),
            "box rescaled"
        );
    }

    #[cfg(test)]
    fn index_is_consistent(&self) -> bool {
        self.index.is_consistent(&self.particles)
    }
}

fn seeded_rng(config: &SimulationConfig) -> StdRng {
    let seed = config.seed.unwrap_or_else(seed_from_clock);
    debug!(seed, "seeding random generator");
    StdRng::seed_from_u64(seed)
}

fn seed_from_clock() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64;
    0xbada55d00d ^ nanos
}

fn random_position(rng: &mut StdRng, bounds: &PeriodicBox) -> Point2<f64> {
    let half_width = bounds.width() * 0.5;
    let half_height = bounds.height() * 0.5;
    Point2::new(
        rng.gen_range(-half_width..half_width),
        rng.gen_range(-half_height..half_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    const TOLERANCE: f64 = 1e-9;

    fn config(seed: u64) -> SimulationConfig {
        SimulationConfig::builder().seed(seed).build().unwrap()
    }

    /// 14×14 square lattice with 1.1 spacing in the default 16×16 box; no pair
    /// closer than the 1.0 cutoff, including across the periodic boundary.
    fn lattice_positions() -> Vec<Point2<f64>> {
        let mut positions = Vec::new();
        for i in 0..14 {
            for j in 0..14 {
                positions.push(Point2::new(-7.15 + 1.1 * i as f64, -7.15 + 1.1 * j as f64));
            }
        }
        positions
    }

    fn assert_no_overlaps(sim: &Simulation) {
        let n = sim.particles().len();
        for (a, b) in (0..n).tuple_combinations() {
            let separation = sim
                .bounds()
                .min_image(sim.particles().position(b) - sim.particles().position(a));
            assert!(
                separation.norm_squared() >= sim.cutoff * sim.cutoff - TOLERANCE,
                "particles {a} and {b} overlap: separation {}",
                separation.norm()
            );
        }
    }

    #[test]
    fn construction_places_the_configured_number_of_particles() {
        let sim = Simulation::new(&config(1));
        assert_eq!(sim.particles().len(), 100);
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn a_free_particle_accepts_every_move() {
        let sim_config = config(42);
        let mut sim = Simulation::from_positions(&sim_config, vec![Point2::new(0.0, 0.0)]);
        for _ in 0..100 {
            assert!(sim.advance(), "a particle with no neighbors cannot collide");
        }
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn a_move_into_an_occupied_neighborhood_is_rejected() {
        let sim = Simulation::from_positions(
            &config(3),
            vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.0)],
        );
        // (0.4, 0) is 0.1 away from particle 1: rejected for particle 0.
        let proposed = Point2::new(0.4, 0.0);
        let cell = sim.index.cell_of(proposed);
        assert!(sim.overlaps_any(proposed, cell, Some(0)));
        // A distant spot is free.
        let distant = Point2::new(-5.0, 4.0);
        let cell = sim.index.cell_of(distant);
        assert!(!sim.overlaps_any(distant, cell, Some(0)));
    }

    #[test]
    fn overlap_test_is_symmetric() {
        let sim = Simulation::from_positions(
            &config(3),
            vec![Point2::new(0.0, 0.0), Point2::new(0.5, 0.0)],
        );
        let p0 = sim.particles().position(0);
        let p1 = sim.particles().position(1);
        let cell0 = sim.index.cell_of(p0);
        let cell1 = sim.index.cell_of(p1);
        assert_eq!(
            sim.overlaps_any(p0, cell0, Some(0)),
            sim.overlaps_any(p1, cell1, Some(1))
        );
    }

    #[test]
    fn neighbors_across_the_box_edge_collide() {
        // 0.2 apart through the boundary of a 16-wide box, 15.8 apart without it.
        let sim = Simulation::from_positions(
            &config(9),
            vec![Point2::new(7.9, 0.0), Point2::new(-7.9, 0.0)],
        );
        let p0 = sim.particles().position(0);
        let cell = sim.index.cell_of(p0);
        assert!(sim.overlaps_any(p0, cell, Some(0)));
    }

    #[test]
    fn rejected_moves_leave_every_position_unchanged() {
        let mut sim = Simulation::from_positions(&config(11), lattice_positions());
        let mut saw_rejection = false;
        for _ in 0..1000 {
            let before: Vec<_> = sim.particles().positions().to_vec();
            if !sim.advance() {
                saw_rejection = true;
                assert_eq!(before, sim.particles().positions());
                break;
            }
        }
        assert!(saw_rejection, "a dense lattice must reject some moves");
    }

    #[test]
    fn dynamics_preserve_the_no_overlap_invariant() {
        let mut sim = Simulation::from_positions(&config(13), lattice_positions());
        assert_no_overlaps(&sim);
        for _ in 0..5000 {
            sim.advance();
        }
        assert_no_overlaps(&sim);
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn index_stays_consistent_through_mixed_operations() {
        let sim_config = SimulationConfig::builder()
            .number_particles(50)
            .seed(7)
            .build()
            .unwrap();
        let mut sim = Simulation::new(&sim_config);
        for _ in 0..10 {
            for _ in 0..200 {
                sim.advance();
            }
            assert!(sim.index_is_consistent());
            sim.try_insert_particle();
            assert!(sim.index_is_consistent());
            sim.grow_box();
            assert!(sim.index_is_consistent());
            sim.shrink_box();
            assert!(sim.index_is_consistent());
        }
    }

    #[test]
    fn insertion_into_a_sparse_box_appends_one_disk() {
        let mut sim = Simulation::from_positions(&config(21), vec![Point2::new(0.0, 0.0)]);
        let id = sim.try_insert_particle();
        assert_eq!(id, Some(1));
        assert_eq!(sim.particles().len(), 2);
        assert_no_overlaps(&sim);
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn insertion_into_a_saturated_box_gives_up_silently() {
        // A unit lattice in a 4x4 box: every point of the box is within one
        // cutoff of some disk, so no trial placement can succeed.
        let sim_config = SimulationConfig::builder()
            .box_dimensions(4.0, 4.0)
            .seed(23)
            .build()
            .unwrap();
        let mut positions = Vec::new();
        for i in 0..4 {
            for j in 0..4 {
                positions.push(Point2::new(-1.5 + i as f64, -1.5 + j as f64));
            }
        }
        let mut sim = Simulation::from_positions(&sim_config, positions);
        assert_eq!(sim.try_insert_particle(), None);
        assert_eq!(sim.particles().len(), 16);
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn growing_the_box_preserves_both_invariants() {
        let mut sim = Simulation::from_positions(&config(31), lattice_positions());
        sim.grow_box();
        assert!((sim.bounds().width() - 16.0 * 1.01).abs() < TOLERANCE);
        assert!((sim.bounds().height() - 16.0 * 1.01).abs() < TOLERANCE);
        assert_no_overlaps(&sim);
        assert!(sim.index_is_consistent());
    }

    #[test]
    fn shrinking_is_clamped_to_one_percent() {
        let mut sim = Simulation::from_positions(&config(37), vec![Point2::new(0.0, 0.0)]);
        // Fresh controller: displacement 1.0, so the full 1% applies.
        sim.shrink_box();
        assert!((sim.bounds().width() - 16.0 * 0.99).abs() < TOLERANCE);
    }

    #[test]
    fn shrinking_is_gentler_when_the_step_size_is_large() {
        let sim_config = SimulationConfig::builder()
            .control_window(10)
            .seed(41)
            .build()
            .unwrap();
        let mut sim = Simulation::from_positions(&sim_config, vec![Point2::new(0.0, 0.0)]);
        // A lone particle accepts everything; enough windows cap the
        // displacement at 2.0.
        for _ in 0..2000 {
            sim.advance();
        }
        assert!((sim.diagnostics().displacement - 2.0).abs() < TOLERANCE);
        let width_before = sim.bounds().width();
        sim.shrink_box();
        // 1/(100*2.0) = 0.005, below the 1% clamp.
        assert!((sim.bounds().width() - width_before * 0.995).abs() < TOLERANCE);
    }

    #[test]
    fn diagnostics_report_the_surface_fraction() {
        let sim = Simulation::new(&config(43));
        let diagnostics = sim.diagnostics();
        let expected = 100.0 * std::f64::consts::PI * 0.25 / 256.0;
        assert_eq!(diagnostics.number_particles, 100);
        assert!((diagnostics.surface_fraction - expected).abs() < TOLERANCE);
        assert_eq!(diagnostics.displacement, 1.0);
        assert_eq!(diagnostics.acceptance_ratio, 0.0);
    }

    #[test]
    fn fixed_seeds_reproduce_trajectories_exactly() {
        let mut a = Simulation::new(&config(5));
        let mut b = Simulation::new(&config(5));
        for _ in 0..500 {
            assert_eq!(a.advance(), b.advance());
        }
        assert_eq!(a.particles().positions(), b.particles().positions());
    }
}
