use glam::Vec3;

use crate::particle::Particle;

/// Axis-aligned box obstacle.
///
/// `min`/`max` are derived from the center and half extents and kept in sync
/// on repositioning.
#[derive(Debug, Clone, Copy)]
pub struct Cuboid {
    pub center: Vec3,
    pub half_extents: Vec3,
    min: Vec3,
    max: Vec3,
}

impl Cuboid {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Cuboid {
            center,
            half_extents,
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Sets the position of the box. Should be called between time steps.
    pub fn set_position(&mut self, center: Vec3) {
        self.center = center;
        self.min = center - self.half_extents;
        self.max = center + self.half_extents;
    }

    #[inline(always)]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    #[inline(always)]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn resolve_collision(&self, particle: &mut Particle, damping: f32) {
        let p = particle.position;

        let inside = p.x > self.min.x
            && p.x < self.max.x
            && p.y > self.min.y
            && p.y < self.max.y
            && p.z > self.min.z
            && p.z < self.max.z;

        if !inside {
            return;
        }

        // Distance to each face, in the fixed evaluation order
        // -x, +x, -y, +y, -z, +z. On a tie the earlier face wins; the order
        // itself is arbitrary but kept stable for determinism.
        let faces = [
            (p.x - self.min.x, -Vec3::X),
            (self.max.x - p.x, Vec3::X),
            (p.y - self.min.y, -Vec3::Y),
            (self.max.y - p.y, Vec3::Y),
            (p.z - self.min.z, -Vec3::Z),
            (self.max.z - p.z, Vec3::Z),
        ];

        let mut nearest = faces[0];
        for face in &faces[1..] {
            if face.0 < nearest.0 {
                nearest = *face;
            }
        }

        let (depth, normal) = nearest;
        particle.position += normal * depth;

        let v_normal = particle.velocity.dot(normal);
        if v_normal < 0.0 {
            particle.velocity = (particle.velocity - 2.0 * v_normal * normal) * damping;
        }
    }
}
