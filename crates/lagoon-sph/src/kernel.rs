use std::f32::consts::PI;

use glam::Vec3;

/// Below this separation the spiky gradient is treated as zero rather than
/// dividing by a near-zero distance.
const MIN_GRADIENT_DISTANCE: f32 = 1e-4;

/// The three smoothing kernels used by the solver, with their normalization
/// constants precomputed from the smoothing radius `h`.
///
/// Poly6 estimates density, the spiky gradient drives the pressure force and
/// the color-field surface normal, and the viscosity Laplacian drives the
/// viscosity force and the color-field Laplacian. All three have compact
/// support: they are zero for any separation of `h` or more.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    h: f32,
    /// 315 / (64π h⁹)
    poly6_norm: f32,
    /// -45 / (π h⁶)
    spiky_norm: f32,
    /// 45 / (π h⁶)
    viscosity_norm: f32,
}

impl Kernel {
    pub fn new(h: f32) -> Self {
        let h2 = h * h;
        let h3 = h2 * h;
        let h6 = h3 * h3;
        let h9 = h6 * h3;

        Kernel {
            h,
            poly6_norm: 315.0 / (64.0 * PI * h9),
            spiky_norm: -45.0 / (PI * h6),
            viscosity_norm: 45.0 / (PI * h6),
        }
    }

    #[inline(always)]
    pub fn smoothing_radius(&self) -> f32 {
        self.h
    }

    /// Poly6 kernel `C₆ (h² - r²)³`. Stable for field estimation but not for
    /// gradients, which blow up near the origin.
    pub fn poly6(&self, r: f32) -> f32 {
        if r > self.h {
            return 0.0;
        }

        let diff = self.h * self.h - r * r;
        self.poly6_norm * diff * diff * diff
    }

    /// Gradient of the spiky kernel, `dir * Cₛ (h - r)² / r`, where `dir` is
    /// the unit vector from the particle toward its neighbor.
    ///
    /// Returns zero outside the support and for separations under the
    /// near-zero guard, so a coincident pair contributes nothing instead of a
    /// non-finite value.
    pub fn spiky_gradient(&self, r: f32, dir: Vec3) -> Vec3 {
        if r > self.h || r < MIN_GRADIENT_DISTANCE {
            return Vec3::ZERO;
        }

        let diff = self.h - r;
        dir * (self.spiky_norm * diff * diff / r)
    }

    /// Laplacian of the viscosity kernel, `Cᵥ (h - r)`.
    pub fn viscosity_laplacian(&self, r: f32) -> f32 {
        if r > self.h {
            return 0.0;
        }

        self.viscosity_norm * (self.h - r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: f32 = 0.16;

    #[test]
    fn poly6_zero_beyond_support() {
        let kernel = Kernel::new(H);
        assert_eq!(kernel.poly6(H + 1e-6), 0.0);
        assert_eq!(kernel.poly6(10.0 * H), 0.0);
    }

    #[test]
    fn poly6_continuous_at_support_boundary() {
        let kernel = Kernel::new(H);
        assert_eq!(kernel.poly6(H), 0.0);
    }

    #[test]
    fn poly6_positive_inside_support() {
        let kernel = Kernel::new(H);
        for i in 0..20 {
            let r = i as f32 * 0.05 * H;
            assert!(kernel.poly6(r) > 0.0, "poly6 should be positive at r={r}");
        }
    }

    #[test]
    fn poly6_integrates_to_one() {
        // Riemann sum of the kernel over its support cube.
        let kernel = Kernel::new(H);
        let n = 80;
        let cell = 2.0 * H / n as f32;
        let dv = (cell * cell * cell) as f64;

        let mut integral = 0.0f64;
        for ix in 0..n {
            let x = -H + (ix as f32 + 0.5) * cell;
            for iy in 0..n {
                let y = -H + (iy as f32 + 0.5) * cell;
                for iz in 0..n {
                    let z = -H + (iz as f32 + 0.5) * cell;
                    let r = (x * x + y * y + z * z).sqrt();
                    integral += kernel.poly6(r) as f64 * dv;
                }
            }
        }

        assert!(
            (integral - 1.0).abs() < 0.02,
            "poly6 integral = {integral}, expected ~1.0"
        );
    }

    #[test]
    fn spiky_gradient_zero_beyond_support() {
        let kernel = Kernel::new(H);
        assert_eq!(kernel.spiky_gradient(H + 1e-6, Vec3::X), Vec3::ZERO);
    }

    #[test]
    fn spiky_gradient_zero_at_near_zero_distance() {
        let kernel = Kernel::new(H);
        let g = kernel.spiky_gradient(1e-5, Vec3::X);
        assert_eq!(g, Vec3::ZERO);
    }

    #[test]
    fn spiky_gradient_vanishes_toward_support_boundary() {
        let kernel = Kernel::new(H);
        let near_edge = kernel.spiky_gradient(0.999 * H, Vec3::X).length();
        let mid = kernel.spiky_gradient(0.5 * H, Vec3::X).length();
        assert!(near_edge < 1e-2 * mid, "gradient magnitude should fall off at the boundary");
    }

    #[test]
    fn spiky_gradient_points_against_direction() {
        // The normalization constant is negative, so the gradient opposes the
        // particle-to-neighbor direction.
        let kernel = Kernel::new(H);
        let g = kernel.spiky_gradient(0.5 * H, Vec3::X);
        assert!(g.x < 0.0);
        assert_eq!(g.y, 0.0);
        assert_eq!(g.z, 0.0);
    }

    #[test]
    fn viscosity_laplacian_zero_beyond_support() {
        let kernel = Kernel::new(H);
        assert_eq!(kernel.viscosity_laplacian(H + 1e-6), 0.0);
        assert_eq!(kernel.viscosity_laplacian(H), 0.0);
    }

    #[test]
    fn viscosity_laplacian_positive_inside_support() {
        let kernel = Kernel::new(H);
        assert!(kernel.viscosity_laplacian(0.5 * H) > 0.0);
    }
}
