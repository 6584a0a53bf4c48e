use std::io::Write;

use encode::{EncodingError, FluidFrameEncoder};
use glam::Vec3;
use lagoon_sph::sph::SphFluid;

pub mod as_bytes;
pub mod decode;
pub mod encode;

/// A fluid whose per-step state can be streamed to a frame dataset.
pub trait EncodeFluid {
    /// Bounding box of the simulation domain, recorded once in the dataset
    /// metadata.
    fn bounds(&self) -> (Vec3, Vec3);

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError>;
}

impl EncodeFluid for SphFluid {
    fn bounds(&self) -> (Vec3, Vec3) {
        (self.config().bounds_min, self.config().bounds_max)
    }

    fn encode_state<W: Write>(&self, encoder: &mut FluidFrameEncoder<W>) -> Result<(), EncodingError> {
        let n = self.particles().len();

        encoder.encode_section(n, self.iter_positions())?;
        encoder.encode_section(n, self.particles().iter().map(|p| p.velocity))?;

        Ok(())
    }
}
