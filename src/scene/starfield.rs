use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::StarfieldConfig;
use crate::render::surface::Color;

const PALETTE: [Color; 5] = [
    Color::rgb(255, 255, 255),
    Color::rgb(200, 215, 255),
    Color::rgb(255, 244, 214),
    Color::rgb(255, 210, 160),
    Color::rgb(170, 190, 255),
];

/// Decorative point in the background field. No identity, never looked up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStar {
    pub position: DVec3,
    pub color: Color,
}

/// Scatters `config.count` stars uniformly through a cube of half-size
/// `config.extent`. The same seed always yields the same field.
pub fn generate_starfield(config: &StarfieldConfig) -> Vec<BackgroundStar> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let extent = config.extent;
    (0..config.count)
        .map(|_| {
            let position = DVec3::new(
                rng.gen_range(-1.0..1.0) * extent,
                rng.gen_range(-1.0..1.0) * extent,
                rng.gen_range(-1.0..1.0) * extent,
            );
            let base = PALETTE[rng.gen_range(0..PALETTE.len())];
            let color = Color {
                a: rng.gen_range(60..=210),
                ..base
            };
            BackgroundStar { position, color }
        })
        .collect()
}
