use nalgebra::Point2;

/// The disks of a simulation, stored as parallel position and radius arrays.
///
/// Particles are identified by their index `0..len()`. The set is append-only:
/// insertion assigns the next id, and no deletion is supported, so ids are
/// stable for the lifetime of a simulation.
///
/// Positions are stored in real coordinate space, never pre-wrapped; periodic
/// wrapping is computed on demand by the callers that need it. This keeps the
/// stored trajectory continuous across box crossings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParticleSet {
    positions: Vec<Point2<f64>>,
    radii: Vec<f64>,
}

impl ParticleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
        }
    }

    /// Appends a disk and returns its id.
    pub fn push(&mut self, position: Point2<f64>, radius: f64) -> usize {
        debug_assert!(radius > 0.0);
        self.positions.push(position);
        self.radii.push(radius);
        self.positions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, id: usize) -> Point2<f64> {
        self.positions[id]
    }

    pub fn set_position(&mut self, id: usize, position: Point2<f64>) {
        self.positions[id] = position;
    }

    pub fn radius(&self, id: usize) -> f64 {
        self.radii[id]
    }

    /// Read-only view of all positions, for renderers and reporting.
    pub fn positions(&self) -> &[Point2<f64>] {
        &self.positions
    }

    /// Read-only view of all radii.
    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    /// Scales every position by `factor`, as part of a box resize.
    pub fn scale_positions(&mut self, factor: f64) {
        for p in &mut self.positions {
            p.x *= factor;
            p.y *= factor;
        }
    }

    /// Total disk area, `Σ π·rᵢ²`.
    pub fn covered_area(&self) -> f64 {
        self.radii
            .iter()
            .map(|r| std::f64::consts::PI * r * r)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_assigns_sequential_ids() {
        let mut particles = ParticleSet::new();
        assert_eq!(particles.push(Point2::new(0.0, 0.0), 0.5), 0);
        assert_eq!(particles.push(Point2::new(1.0, 1.0), 0.5), 1);
        assert_eq!(particles.len(), 2);
    }

    #[test]
    fn position_and_radius_arrays_stay_parallel() {
        let mut particles = ParticleSet::new();
        for i in 0..10 {
            particles.push(Point2::new(i as f64, -(i as f64)), 0.5);
        }
        assert_eq!(particles.positions().len(), particles.radii().len());
    }

    #[test]
    fn scale_positions_multiplies_both_components() {
        let mut particles = ParticleSet::new();
        particles.push(Point2::new(2.0, -3.0), 0.5);
        particles.scale_positions(1.5);
        assert_eq!(particles.position(0), Point2::new(3.0, -4.5));
    }

    #[test]
    fn covered_area_sums_disk_areas() {
        let mut particles = ParticleSet::new();
        particles.push(Point2::new(0.0, 0.0), 0.5);
        particles.push(Point2::new(1.0, 0.0), 0.5);
        let expected = 2.0 * std::f64::consts::PI * 0.25;
        assert!((particles.covered_area() - expected).abs() < 1e-12);
    }
}
