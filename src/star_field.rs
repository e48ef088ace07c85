// Owns every live star and steps the whole field one frame at a time:
// cull stars that left the view, roll the dice on new spawns, then advance
// everything that's left (including the stars spawned this frame).

use crate::star::{LineSegment, Star};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::SQRT_2;
use thiserror::Error;
use vecmath;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("stars_per_second must be at least 1")]
    ZeroSpawnRate,
    #[error("distance_per_second must be positive and finite")]
    InvalidSpeed,
    #[error("framerate must be at least 1")]
    ZeroFramerate,
    #[error("min_distance must be positive and finite")]
    InvalidMinDistance,
    #[error("max_distance must be finite and greater than min_distance")]
    InvalidDistanceRange,
}

#[derive(Copy, Clone, Debug)]
pub struct StarFieldConfig {
    pub stars_per_second: u32,
    pub distance_per_second: f64,
    pub framerate: u32,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl StarFieldConfig {
    // Bad numbers here are the only way this module can fail; everything
    // downstream divides by framerate or min/max spans, so reject them up
    // front instead of producing NaN mid-simulation.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.stars_per_second == 0 {
            return Err(ConfigError::ZeroSpawnRate);
        }
        if !self.distance_per_second.is_finite() || self.distance_per_second <= 0.0 {
            return Err(ConfigError::InvalidSpeed);
        }
        if self.framerate == 0 {
            return Err(ConfigError::ZeroFramerate);
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(ConfigError::InvalidMinDistance);
        }
        if !self.max_distance.is_finite() || self.max_distance <= self.min_distance {
            return Err(ConfigError::InvalidDistanceRange);
        }
        Ok(())
    }
}

pub struct StarField {
    stars: Vec<Star>,
    rng: SmallRng,
    config: StarFieldConfig,
}

impl StarField {
    pub fn new(config: StarFieldConfig) -> Result<StarField, ConfigError> {
        config.validate()?;
        Ok(StarField {
            stars: Vec::new(),
            rng: SmallRng::from_entropy(),
            config,
        })
    }

    // Same field, but every spawn decision is reproducible
    pub fn with_seed(config: StarFieldConfig, seed: u64) -> Result<StarField, ConfigError> {
        config.validate()?;
        Ok(StarField {
            stars: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            config,
        })
    }

    pub fn update(&mut self) {
        self.despawn_stars();
        self.spawn_new_stars();
        self.move_stars();
    }

    fn despawn_stars(&mut self) {
        // Backward pass so swap_remove never skips over an unchecked star
        for i in (0..self.stars.len()).rev() {
            if is_out_of_view(&self.stars[i]) {
                self.stars.swap_remove(i);
            }
        }
    }

    fn spawn_new_stars(&mut self) {
        let stars_to_spawn_per_frame =
            self.config.stars_per_second as f64 / self.config.framerate as f64;

        if stars_to_spawn_per_frame >= 1.0 {
            // whole spawns only; the fractional remainder is dropped rather
            // than carried into the next frame
            for _ in 0..stars_to_spawn_per_frame as u32 {
                self.spawn_new_star();
            }
        } else if self.rng.gen::<f64>() < stars_to_spawn_per_frame {
            self.spawn_new_star();
        }
    }

    fn spawn_new_star(&mut self) {
        let coord = [self.rng.gen::<f64>() - 0.5, self.rng.gen::<f64>() - 0.5];
        let distance = self.rng.gen::<f64>()
            * (self.config.max_distance - self.config.min_distance)
            + self.config.min_distance;
        self.stars.push(Star::new(coord, distance));
    }

    fn move_stars(&mut self) {
        let distance_per_frame =
            self.config.distance_per_second / self.config.framerate as f64;
        for star in &mut self.stars {
            star.advance(distance_per_frame);
        }
    }

    // Pure read of the current frame: one streak per live star, rebuilt on
    // every call so the renderer can batch it straight into a vertex buffer
    pub fn line_segments(&self, screen_width: u32, screen_height: u32) -> Vec<LineSegment> {
        self.stars
            .iter()
            .map(|star| star.trail_segment(screen_width, screen_height))
            .collect()
    }
}

// Off screen once the world offset leaves the containment disc, or fully
// receded once the depth bottoms out at the clamp floor
fn is_out_of_view(star: &Star) -> bool {
    vecmath::vec2_len(star.new_coord) > SQRT_2 || star.new_distance <= Star::MIN_DISTANCE
}
