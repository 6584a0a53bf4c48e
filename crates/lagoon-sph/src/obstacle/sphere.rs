use glam::Vec3;

use crate::particle::Particle;

use super::PARTICLE_CONTACT_RADIUS;

#[derive(Debug, Clone, Copy)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Sphere { center, radius }
    }

    /// Sets the position of the sphere. Should be called between time steps.
    pub fn set_position(&mut self, center: Vec3) {
        self.center = center;
    }

    pub fn resolve_collision(&self, particle: &mut Particle, damping: f32) {
        let offset = particle.position - self.center;
        let distance = offset.length();
        let contact = self.radius + PARTICLE_CONTACT_RADIUS;

        if distance >= contact {
            return;
        }

        // A particle sitting exactly on the center has no meaningful normal;
        // eject it upward.
        let normal = if distance > 1e-6 {
            offset / distance
        } else {
            Vec3::Y
        };

        particle.position = self.center + normal * contact;

        let v_normal = particle.velocity.dot(normal);
        if v_normal < 0.0 {
            particle.velocity = (particle.velocity - 2.0 * v_normal * normal) * damping;
        }
    }
}
