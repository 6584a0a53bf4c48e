use glam::Vec3;

/// A single fluid sample point.
///
/// `density`, `pressure` and `force` are recomputed from scratch every step;
/// between steps they hold stale values from the previous step and must not be
/// read before the current step's estimation passes have run.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub force: Vec3,
    pub mass: f32,
    pub density: f32,
    pub pressure: f32,
}

impl Particle {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Particle {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            force: Vec3::ZERO,
            mass,
            density: 0.0,
            pressure: 0.0,
        }
    }

    #[inline(always)]
    pub fn apply_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Semi-implicit Euler: the position update uses the already-updated
    /// velocity.
    pub fn integrate(&mut self, dt: f32) {
        self.acceleration = self.force / self.mass;
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrate_updates_position_with_new_velocity() {
        let mut p = Particle::new(Vec3::ZERO, 2.0);
        p.apply_force(Vec3::new(4.0, 0.0, 0.0));
        p.integrate(0.5);

        // a = f/m = 2, v = 1, x = v * dt = 0.5
        assert_eq!(p.acceleration, Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(p.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn forces_accumulate() {
        let mut p = Particle::new(Vec3::ZERO, 1.0);
        p.apply_force(Vec3::X);
        p.apply_force(Vec3::Y);
        assert_eq!(p.force, Vec3::new(1.0, 1.0, 0.0));
    }
}
