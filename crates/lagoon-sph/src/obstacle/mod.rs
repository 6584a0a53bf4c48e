use crate::particle::Particle;

pub mod cuboid;
pub mod sphere;

pub use cuboid::Cuboid;
pub use sphere::Sphere;

/// Contact radius of a particle against obstacle surfaces.
pub const PARTICLE_CONTACT_RADIUS: f32 = 0.05;

/// A static or externally movable solid the fluid collides with.
///
/// Obstacle kinds form a closed set, so collision response dispatches over a
/// tagged variant instead of a trait object.
#[derive(Debug, Clone, Copy)]
pub enum Obstacle {
    Sphere(Sphere),
    Cuboid(Cuboid),
}

impl Obstacle {
    /// Pushes a penetrating particle onto the obstacle surface and reflects
    /// the inward component of its velocity, damping the whole velocity.
    ///
    /// Leaves the particle untouched when it is not penetrating.
    pub fn resolve_collision(&self, particle: &mut Particle, damping: f32) {
        match self {
            Obstacle::Sphere(sphere) => sphere.resolve_collision(particle, damping),
            Obstacle::Cuboid(cuboid) => cuboid.resolve_collision(particle, damping),
        }
    }
}

impl From<Sphere> for Obstacle {
    fn from(sphere: Sphere) -> Self {
        Obstacle::Sphere(sphere)
    }
}

impl From<Cuboid> for Obstacle {
    fn from(cuboid: Cuboid) -> Self {
        Obstacle::Cuboid(cuboid)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ObstacleId(pub usize);

/// Insertion-ordered obstacle collection.
///
/// Collision resolution walks the set in insertion order, so a given scene
/// resolves deterministically. IDs stay stable across repositioning updates.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    obstacles: Vec<(ObstacleId, Obstacle)>,
    next_id: usize,
}

impl ObstacleSet {
    pub fn new() -> Self {
        ObstacleSet::default()
    }

    /// Adds an obstacle to the set, returning its ID.
    pub fn add<T: Into<Obstacle>>(&mut self, obstacle: T) -> ObstacleId {
        let id = ObstacleId(self.next_id);
        self.next_id += 1;

        self.obstacles.push((id, obstacle.into()));
        id
    }

    /// Replaces the obstacle at the given ID, returning the old value, or
    /// appends it when the ID is not present.
    pub fn insert<T: Into<Obstacle>>(&mut self, id: ObstacleId, obstacle: T) -> Option<Obstacle> {
        let obstacle = obstacle.into();

        match self.obstacles.iter_mut().find(|(i, _)| *i == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, obstacle)),
            None => {
                self.obstacles.push((id, obstacle));
                self.next_id = self.next_id.max(id.0 + 1);
                None
            }
        }
    }

    /// Removes an obstacle from the set, given its ID.
    pub fn remove(&mut self, id: ObstacleId) -> Option<Obstacle> {
        let idx = self.obstacles.iter().position(|(i, _)| *i == id)?;
        Some(self.obstacles.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter().map(|(_, o)| o)
    }
}
