use glam::Vec3;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    kernel::Kernel,
    obstacle::{ObstacleSet, PARTICLE_CONTACT_RADIUS},
    particle::Particle,
    Fluid,
};

/// Solver configuration. Immutable once the fluid is constructed.
#[derive(Debug, Clone, Copy)]
pub struct SphConfig {
    /// Kernel support radius, in m.
    pub smoothing_radius: f32,
    /// Mass of every particle, in kg.
    pub particle_mass: f32,
    /// Density the equation of state relaxes toward, in kg/m³.
    pub rest_density: f32,
    /// Stiffness of the linear equation of state.
    pub gas_constant: f32,
    pub viscosity: f32,
    /// Fixed integration step, in s. Stability under this step is a tuning
    /// concern, not enforced by the solver.
    pub time_step: f32,
    pub gravity: Vec3,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    pub surface_tension: f32,
    /// Minimum color-field gradient magnitude at which surface tension
    /// applies. Keeps the noisy near-zero gradient in the bulk from producing
    /// spurious forces.
    pub surface_threshold: f32,
    /// Velocity damping factor applied on wall and obstacle contact.
    pub collision_damping: f32,
}

impl Default for SphConfig {
    fn default() -> Self {
        SphConfig {
            smoothing_radius: 0.16,
            particle_mass: 1.0,
            rest_density: 1000.0,
            gas_constant: 2000.0,
            viscosity: 0.018,
            time_step: 0.004,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            bounds_min: Vec3::splat(-1.0),
            bounds_max: Vec3::splat(1.0),
            surface_tension: 0.0728,
            surface_threshold: 7.065,
            collision_damping: 0.5,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("smoothing radius must be positive, got {0}")]
    NonPositiveSmoothingRadius(f32),
    #[error("particle mass must be positive, got {0}")]
    NonPositiveParticleMass(f32),
}

/// One entry of a particle's per-step neighbor list.
///
/// Neighbors are index-based references into the owning particle collection,
/// valid only for the step they were built in.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    pub index: usize,
    /// Distance to the neighbor, strictly less than the smoothing radius.
    pub distance: f32,
    /// Unit vector toward the neighbor; zero only for a coincident pair.
    pub direction: Vec3,
}

/// Brute-force SPH fluid.
///
/// A step runs five strictly ordered phases over the whole collection:
/// neighbor search, density/pressure estimation, force accumulation,
/// integration, collision resolution. Each phase completes for every particle
/// before the next begins, because later phases read fields the earlier
/// phases finalize for all particles.
#[derive(Debug, Clone)]
pub struct SphFluid {
    config: SphConfig,
    kernel: Kernel,
    particles: Vec<Particle>,
    /// Per-particle neighbor lists, rebuilt from scratch every step.
    neighbors: Vec<SmallVec<[Neighbor; 32]>>,
}

impl SphFluid {
    pub fn new(config: SphConfig) -> Result<Self, ConfigError> {
        if config.smoothing_radius <= 0.0 {
            return Err(ConfigError::NonPositiveSmoothingRadius(config.smoothing_radius));
        }
        if config.particle_mass <= 0.0 {
            return Err(ConfigError::NonPositiveParticleMass(config.particle_mass));
        }

        Ok(SphFluid {
            config,
            kernel: Kernel::new(config.smoothing_radius),
            particles: Vec::new(),
            neighbors: Vec::new(),
        })
    }

    #[inline(always)]
    pub fn config(&self) -> &SphConfig {
        &self.config
    }

    pub fn insert_particle(&mut self, position: Vec3) {
        self.particles.push(Particle::new(position, self.config.particle_mass));
        self.neighbors.push(SmallVec::new());
    }

    /// Fills the region `[min, max]` with up to `count` particles on a
    /// regular grid spaced at half the smoothing radius, x outermost and z
    /// innermost. Placement is deterministic; the region under-fills when the
    /// grid runs out of positions before `count` is reached.
    pub fn spawn_region(&mut self, count: usize, min: Vec3, max: Vec3) {
        let spacing = 0.5 * self.config.smoothing_radius;
        let steps = ((max - min) / spacing).floor().as_uvec3() + 1;

        let mut placed = 0;
        'fill: for i in 0..steps.x {
            for j in 0..steps.y {
                for k in 0..steps.z {
                    if placed == count {
                        break 'fill;
                    }

                    let offset = Vec3::new(i as f32, j as f32, k as f32) * spacing;
                    self.insert_particle(min + offset);
                    placed += 1;
                }
            }
        }
    }

    /// Discards the particle collection and refills the region. Must not be
    /// called while a step is in progress; obstacles are untouched.
    pub fn reset(&mut self, count: usize, min: Vec3, max: Vec3) {
        self.particles.clear();
        self.neighbors.clear();
        self.spawn_region(count, min, max);
    }

    #[inline(always)]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline(always)]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.position)
    }

    #[inline(always)]
    pub fn neighbors(&self, i: usize) -> &[Neighbor] {
        &self.neighbors[i]
    }

    /// Rebuilds every particle's neighbor list by scanning all other
    /// particles. O(n²); a pair counts as neighbors only strictly within the
    /// smoothing radius.
    pub fn find_neighbors(&mut self) {
        let h = self.config.smoothing_radius;

        for (i, list) in self.neighbors.iter_mut().enumerate() {
            list.clear();

            let position = self.particles[i].position;
            for (j, other) in self.particles.iter().enumerate() {
                if j == i {
                    continue;
                }

                let delta = other.position - position;
                let distance = delta.length();
                if distance < h {
                    let direction = if distance > 0.0 { delta / distance } else { Vec3::ZERO };
                    list.push(Neighbor { index: j, distance, direction });
                }
            }
        }
    }

    /// Estimates density by kernel-weighted summation over neighbors, then
    /// pressure from the linear equation of state.
    ///
    /// Density always includes the particle's own contribution, which keeps
    /// it strictly positive and the per-neighbor density divisions in the
    /// force pass finite. Pressure goes negative below rest density; the
    /// equation of state allows tension and no clamping is applied.
    pub fn compute_density_pressure(&mut self) {
        for i in 0..self.particles.len() {
            let mut density = self.particles[i].mass * self.kernel.poly6(0.0);

            for neighbor in &self.neighbors[i] {
                let mass = self.particles[neighbor.index].mass;
                density += mass * self.kernel.poly6(neighbor.distance);
            }

            let particle = &mut self.particles[i];
            particle.density = density;
            particle.pressure = self.config.gas_constant * (density - self.config.rest_density);
        }
    }

    /// Accumulates gravity, pressure, viscosity and surface tension forces.
    ///
    /// The pressure term averages the pair's pressures so the force between
    /// two particles is equal and opposite; an asymmetric form injects
    /// visible energy. Requires `compute_density_pressure` to have run for
    /// every particle this step.
    pub fn compute_forces(&mut self) {
        for i in 0..self.particles.len() {
            let particle = self.particles[i];
            let mut force = particle.mass * self.config.gravity;

            let mut surface_normal = Vec3::ZERO;
            let mut color_laplacian = 0.0;

            for neighbor in &self.neighbors[i] {
                let other = &self.particles[neighbor.index];

                let gradient = self.kernel.spiky_gradient(neighbor.distance, neighbor.direction);
                let laplacian = self.kernel.viscosity_laplacian(neighbor.distance);
                let volume = other.mass / other.density;

                force -= other.mass
                    * ((particle.pressure + other.pressure) / (2.0 * other.density))
                    * gradient;

                force += self.config.viscosity
                    * particle.mass
                    * volume
                    * laplacian
                    * (other.velocity - particle.velocity);

                surface_normal += gradient * volume;
                color_laplacian += volume * laplacian;
            }

            // Surface tension only where the color-field gradient marks a
            // free surface.
            if surface_normal.length() > self.config.surface_threshold {
                force -= self.config.surface_tension * color_laplacian * surface_normal.normalize();
            }

            let particle = &mut self.particles[i];
            particle.force = Vec3::ZERO;
            particle.apply_force(force);
        }
    }

    /// Advances every particle by one semi-implicit Euler step.
    pub fn integrate(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.integrate(dt);
        }
    }

    /// Clamps particles to the bounding box, reflecting and damping the
    /// offending velocity component per axis, then lets every obstacle
    /// resolve penetration in set order.
    pub fn resolve_collisions(&mut self, obstacles: &ObstacleSet) {
        let min = self.config.bounds_min;
        let max = self.config.bounds_max;
        let damping = self.config.collision_damping;

        for particle in &mut self.particles {
            if particle.position.x < min.x {
                particle.position.x = min.x;
                particle.velocity.x *= -damping;
            }
            if particle.position.x > max.x {
                particle.position.x = max.x;
                particle.velocity.x *= -damping;
            }

            if particle.position.y < min.y {
                particle.position.y = min.y;
                particle.velocity.y *= -damping;
            }
            if particle.position.y > max.y {
                particle.position.y = max.y;
                particle.velocity.y *= -damping;
            }

            if particle.position.z < min.z {
                particle.position.z = min.z;
                particle.velocity.z *= -damping;
            }
            if particle.position.z > max.z {
                particle.position.z = max.z;
                particle.velocity.z *= -damping;
            }

            for obstacle in obstacles.iter() {
                obstacle.resolve_collision(particle, damping);
            }
        }
    }
}

impl Fluid for SphFluid {
    fn step(&mut self, dt: f32, obstacles: &ObstacleSet) {
        self.find_neighbors();
        self.compute_density_pressure();
        self.compute_forces();
        self.integrate(dt);
        self.resolve_collisions(obstacles);
    }

    fn particle_radius(&self) -> f32 {
        PARTICLE_CONTACT_RADIUS
    }
}
