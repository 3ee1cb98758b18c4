//! Particle emission and lifecycle
//!
//! Particles are cosmetic only: nothing in the simulation reads them back.
//! Emission past [`MAX_PARTICLES`] is dropped.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Color, Particle};
use crate::consts::{MAX_PARTICLES, PARTICLE_FADE_SECS};

fn push(particles: &mut Vec<Particle>, particle: Particle) {
    if particles.len() < MAX_PARTICLES {
        particles.push(particle);
    }
}

/// Random spray of `count` particles around `at`
#[allow(clippy::too_many_arguments)]
fn spray(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    at: Vec2,
    color: Color,
    count: usize,
    speed: (f32, f32),
    lifetime: (f32, f32),
    scale: (f32, f32),
) {
    for _ in 0..count {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(speed.0..speed.1);
        push(
            particles,
            Particle {
                pos: at,
                color,
                scale: rng.random_range(scale.0..scale.1),
                opacity: 1.0,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                lifetime: rng.random_range(lifetime.0..lifetime.1),
                text: None,
            },
        );
    }
}

/// Small white sparks where a ball touched a wall, the paddle or a brick
pub fn impact(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2) {
    spray(particles, rng, at, Color::WHITE, 5, (40.0, 120.0), (0.2, 0.4), (0.3, 0.6));
}

/// Debris in the brick's color
pub fn brick_break(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, color: Color) {
    spray(particles, rng, at, color, 12, (60.0, 200.0), (0.4, 0.8), (0.5, 1.0));
}

/// Burst when a power-up is caught
pub fn explosion(particles: &mut Vec<Particle>, rng: &mut Pcg32, at: Vec2, color: Color) {
    spray(particles, rng, at, color, 20, (80.0, 260.0), (0.5, 1.0), (0.6, 1.2));
}

/// Floating score text that drifts upward
pub fn score_popup(particles: &mut Vec<Particle>, at: Vec2, text: String) {
    push(
        particles,
        Particle {
            pos: at,
            color: Color::GOLD,
            scale: 1.0,
            opacity: 1.0,
            vel: Vec2::new(0.0, -60.0),
            lifetime: 1.0,
            text: Some(text),
        },
    );
}

/// Evenly spaced radial ring for a cleared level
pub fn celebration(particles: &mut Vec<Particle>, at: Vec2) {
    const RAYS: usize = 36;
    for i in 0..RAYS {
        let t = i as f32 / RAYS as f32;
        let angle = t * std::f32::consts::TAU;
        push(
            particles,
            Particle {
                pos: at,
                color: Color::from_hsv(t, 0.8, 1.0),
                scale: 1.2,
                opacity: 1.0,
                vel: Vec2::new(angle.cos(), angle.sin()) * 220.0,
                lifetime: 1.5,
                text: None,
            },
        );
    }
}

/// Move, age and fade particles; drop the expired ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.lifetime -= dt;
        if particle.lifetime < PARTICLE_FADE_SECS {
            particle.opacity = (particle.lifetime / PARTICLE_FADE_SECS).max(0.0);
        }
    }
    particles.retain(|p| p.lifetime > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn particle(lifetime: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            color: Color::WHITE,
            scale: 1.0,
            opacity: 1.0,
            vel: Vec2::new(10.0, 0.0),
            lifetime,
            text: None,
        }
    }

    #[test]
    fn test_update_moves_and_fades() {
        let mut particles = vec![particle(1.0), particle(0.25)];
        update(&mut particles, 0.1);

        assert_eq!(particles.len(), 2);
        assert!((particles[0].pos.x - 1.0).abs() < 1e-5);
        assert_eq!(particles[0].opacity, 1.0);
        // 0.15s left of a 0.3s fade
        assert!((particles[1].opacity - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_update_drops_expired() {
        let mut particles = vec![particle(0.05), particle(2.0)];
        update(&mut particles, 0.05);
        assert_eq!(particles.len(), 1);
        assert!((particles[0].lifetime - 1.95).abs() < 1e-5);
    }

    #[test]
    fn test_emission_capped() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        for _ in 0..100 {
            explosion(&mut particles, &mut rng, Vec2::ZERO, Color::WHITE);
        }
        assert_eq!(particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_score_popup_carries_text() {
        let mut particles = Vec::new();
        score_popup(&mut particles, Vec2::ZERO, "+10".to_string());
        assert_eq!(particles[0].text.as_deref(), Some("+10"));
    }
}
