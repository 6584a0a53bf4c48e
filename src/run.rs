use std::path::PathBuf;

use glam::Vec3;
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};

use lagoon_io::{decode::FluidDataDecoder, encode::FluidDataEncoder};
use lagoon_sph::{
    obstacle::Sphere,
    scene::Scene,
    sph::{SphConfig, SphFluid},
};

pub fn run(output: PathBuf, frames: u64, fps: u32, particles: usize, sweep: bool) {
    let config = SphConfig::default();
    let fluid = SphFluid::new(config).unwrap();

    let mut scene = Scene::new(fluid);
    scene.fluid.spawn_region(particles, Vec3::splat(-0.5), Vec3::splat(0.5));

    let mut encoder = FluidDataEncoder::new(output, frames, fps).unwrap();
    encoder.encode_metadata(&scene).unwrap();

    // The integration step is fixed; each frame advances enough steps to
    // cover one frame's worth of wall time.
    let dt = config.time_step;
    let steps_per_frame = ((1.0 / fps as f32) / dt).round().max(1.0) as usize;

    let mut sphere = Sphere::new(Vec3::new(0.0, -0.6, 0.0), 0.25);
    let sphere_id = sweep.then(|| scene.add_obstacle(sphere));

    let bar_template = "Running Simulation {spinner:.green} [{elapsed}] [{bar:50.white/white}] {pos}/{len} ({eta})";
    let style = ProgressStyle::with_template(bar_template).unwrap()
        .progress_chars("=> ").tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
    let progress = ProgressBar::new(frames).with_style(style);

    for frame in (0..frames).progress_with(progress) {
        let t = frame as f32 / frames as f32;

        // Obstacles only move between steps.
        if let Some(id) = sphere_id {
            let theta = t * std::f32::consts::TAU;
            sphere.set_position(Vec3::new(0.5 * theta.cos(), -0.6, 0.5 * theta.sin()));
            scene.insert_obstacle(id, sphere);
        }

        for _ in 0..steps_per_frame {
            scene.step(dt);
        }

        encoder.encode_frame(&scene).unwrap();
    }
}

pub fn info(data: PathBuf) {
    let mut decoder = FluidDataDecoder::new(data);
    let meta = decoder.decode_metadata().unwrap();

    println!("frames:          {}", meta.num_frames);
    println!("fps:             {}", meta.fps);
    println!("particle radius: {}", meta.particle_radius);
    println!("bounds min:      {}", meta.bounds_min);
    println!("bounds max:      {}", meta.bounds_max);

    if let Some(frame) = decoder.decode_frame().unwrap() {
        println!("particles:       {}", frame.positions.len());
    }
}
