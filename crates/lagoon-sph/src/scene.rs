use glam::Vec3;

use super::{
    obstacle::{Obstacle, ObstacleId, ObstacleSet},
    Fluid,
};

/// A fluid together with the obstacles it collides with.
///
/// The scene owns the obstacle set so that an external actor can reposition
/// obstacles between steps while the solver only ever sees a fixed set within
/// one step.
pub struct Scene<F> {
    /// The fluid for this scene.
    pub fluid: F,
    /// The obstacles in this scene.
    obstacles: ObstacleSet,
}

impl<F: Fluid> Scene<F> {
    #[inline(always)]
    pub fn new(fluid: F) -> Self {
        Self {
            fluid,
            obstacles: ObstacleSet::new(),
        }
    }

    /// Adds an obstacle to the set, returning its ID.
    pub fn add_obstacle<T: Into<Obstacle>>(&mut self, obstacle: T) -> ObstacleId {
        self.obstacles.add(obstacle)
    }

    /// Removes an obstacle from the set, given its ID.
    pub fn remove_obstacle(&mut self, id: ObstacleId) -> Option<Obstacle> {
        self.obstacles.remove(id)
    }

    /// Inserts an obstacle at the given ID, returning the old value if the ID
    /// was already occupied. This is how external repositioning lands in the
    /// scene between steps.
    pub fn insert_obstacle<T: Into<Obstacle>>(&mut self, id: ObstacleId, obstacle: T) -> Option<Obstacle> {
        self.obstacles.insert(id, obstacle)
    }

    #[inline(always)]
    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn step(&mut self, dt: f32) {
        self.fluid.step(dt, &self.obstacles);
    }
}

impl Scene<crate::sph::SphFluid> {
    /// Discards and re-spawns the particle collection. Obstacles persist.
    pub fn reset(&mut self, count: usize, min: Vec3, max: Vec3) {
        self.fluid.reset(count, min, max);
    }
}
