use obstacle::ObstacleSet;

pub mod kernel;
pub mod obstacle;
pub mod particle;
pub mod scene;
pub mod sph;

/// The seam between a scene and the solver stepping it.
pub trait Fluid {
    /// Advances the fluid by one fixed step against the given obstacles.
    ///
    /// Not re-entrant; obstacles may change between calls but not during one.
    fn step(&mut self, dt: f32, obstacles: &ObstacleSet);

    /// Contact radius of a particle against obstacle surfaces.
    fn particle_radius(&self) -> f32;
}
