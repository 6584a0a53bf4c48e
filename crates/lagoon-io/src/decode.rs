use std::{fs::File, io::{BufRead, BufReader}, mem::{self, MaybeUninit}, path::PathBuf};

use glam::Vec3;
use thiserror::Error;

pub struct FluidDataDecoder {
    /// The path to the directory in which the fluid data resides.
    path: PathBuf,
    num_frames: u64,
    current_frame: u64,
}

impl FluidDataDecoder {
    pub fn new(path: PathBuf) -> FluidDataDecoder {
        Self {
            path,
            num_frames: 0,
            current_frame: 0,
        }
    }

    fn read_value<const N: usize, T, R: BufRead>(reader: &mut R) -> Result<T, DecodingError> {
        let mut bytes = [0; N];
        reader.read_exact(&mut bytes)?;

        let mut to: MaybeUninit<T> = MaybeUninit::uninit();

        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), to.as_mut_ptr().cast::<u8>(), N);
            Ok(to.assume_init())
        }
    }

    fn read_values<T, R: BufRead>(reader: &mut R, count: usize) -> Result<Vec<T>, DecodingError> {
        let mut bytes = vec![0; mem::size_of::<T>() * count];
        reader.read_exact(&mut bytes)?;

        Ok(bytes.chunks_exact(mem::size_of::<T>()).map(|b| {
            let mut to: MaybeUninit<T> = MaybeUninit::uninit();

            unsafe {
                std::ptr::copy_nonoverlapping(b.as_ptr(), to.as_mut_ptr().cast::<u8>(), mem::size_of::<T>());
                to.assume_init()
            }
        }).collect())
    }

    fn frame_path(&self, frame: u64) -> PathBuf {
        let max_digits = (self.num_frames - 1).checked_ilog10().unwrap_or(0) + 1;
        let zeros = max_digits - (frame.checked_ilog10().unwrap_or(0) + 1);

        self.path.join(format!("{}{frame}.dat", "0".repeat(zeros as usize)))
    }

    pub fn decode_metadata(&mut self) -> Result<FluidMetadata, DecodingError> {
        let path = self.path.join("_meta");
        let mut reader = BufReader::new(File::open(path)?);

        let dim = Self::read_value::<1, u8, _>(&mut reader)?;
        if dim != 3 {
            return Err(DecodingError::UnsupportedDimension(dim));
        }

        let fps = Self::read_value::<4, u32, _>(&mut reader)?;
        let num_frames = Self::read_value::<8, u64, _>(&mut reader)?;
        let particle_radius = Self::read_value::<4, f32, _>(&mut reader)?;
        let bounds_min = Self::read_value::<12, Vec3, _>(&mut reader)?;
        let bounds_max = Self::read_value::<12, Vec3, _>(&mut reader)?;

        self.num_frames = num_frames;

        Ok(FluidMetadata {
            fps,
            num_frames,
            particle_radius,
            bounds_min,
            bounds_max,
        })
    }

    pub fn decode_frame(&mut self) -> Result<Option<FluidFrameData>, DecodingError> {
        if self.current_frame >= self.num_frames {
            return Ok(None)
        }

        let path = self.frame_path(self.current_frame);
        let mut reader = BufReader::new(File::open(path)?);

        let n_particles = Self::read_value::<8, u64, _>(&mut reader)? as usize;
        let positions = Self::read_values::<Vec3, _>(&mut reader, n_particles)?;

        let n_velocities = Self::read_value::<8, u64, _>(&mut reader)? as usize;
        let velocities = Self::read_values::<Vec3, _>(&mut reader, n_velocities)?;

        self.current_frame += 1;

        Ok(Some(FluidFrameData {
            positions,
            velocities,
        }))
    }

    pub fn reset(&mut self) {
        self.current_frame = 0;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FluidMetadata {
    pub fps: u32,
    pub num_frames: u64,
    pub particle_radius: f32,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

pub struct FluidFrameData {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
}

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("dataset is {0}-dimensional, expected 3")]
    UnsupportedDimension(u8),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
