//! The particle swarm: creation, per-frame kinematics and drawing.

mod particle;

pub use particle::Particle;

use crate::config::FieldParams;
use crate::foundation::core::{Point, Size, center_of, polar};
use crate::foundation::math::Rng64;
use crate::render::surface::{DrawSurface, FontRole, TextDraw};
use crate::timeline::phase::{CONVERGE_END, ORBIT_END};

/// Particle swarm for one playback.
///
/// The particle list is built once and never reordered or shrunk; faded particles are skipped
/// at draw time.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    center: Point,
    params: FieldParams,
}

/// Outcome of one [`ParticleField::draw`] pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Particles handed to the surface successfully.
    pub drawn: usize,
    /// Particles the surface refused.
    pub failed: usize,
}

/// How many particles a token gets: short labels are tripled so density stays even.
pub fn particles_per_token(token: &str, short_token_len: usize) -> usize {
    if token.chars().count() < short_token_len {
        3
    } else {
        2
    }
}

impl ParticleField {
    /// Scatter particles for `vocabulary` on a ring around the center of `viewport`.
    pub fn new(
        viewport: Size,
        vocabulary: &[String],
        params: &FieldParams,
        rng: &mut Rng64,
    ) -> Self {
        let center = center_of(viewport);
        let spread = viewport.width.min(viewport.height) * params.ring_fraction;
        let slot = 360.0 / vocabulary.len().max(1) as f64;

        let mut particles = Vec::new();
        for (index, text) in vocabulary.iter().enumerate() {
            let count = particles_per_token(text, params.short_token_len);
            for i in 0..count {
                let angle = index as f64 * slot + i as f64 * 120.0 / count as f64;
                let radius = rng.next_f64_01() * spread + params.ring_margin;
                particles.push(Particle {
                    text: text.clone(),
                    position: polar(center, angle, radius),
                    target: center,
                    angle,
                    radius,
                    speed: rng.next_in(params.speed_range[0], params.speed_range[1]),
                    size: rng.next_in(params.size_range[0], params.size_range[1]),
                    opacity: rng.next_in(params.opacity_range[0], params.opacity_range[1]),
                    color: params.color,
                });
            }
        }

        tracing::debug!(
            particles = particles.len(),
            tokens = vocabulary.len(),
            "particle field initialized"
        );
        Self {
            particles,
            center,
            params: params.clone(),
        }
    }

    /// Particles in creation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Point every particle converges on.
    pub fn center(&self) -> Point {
        self.center
    }

    /// Whether the field still moves and draws at `progress`.
    pub fn is_active(progress: f64) -> bool {
        progress < CONVERGE_END
    }

    /// Advance one frame at `progress`.
    ///
    /// Below `ORBIT_END` particles orbit; up to `CONVERGE_END` they converge, shrink and fade;
    /// past that the field is frozen.
    pub fn update(&mut self, progress: f64) {
        if !Self::is_active(progress) {
            return;
        }
        if progress < ORBIT_END {
            for p in &mut self.particles {
                p.orbit(self.center, &self.params);
            }
        } else {
            let factor = (progress - ORBIT_END) / (CONVERGE_END - ORBIT_END);
            let blend = factor * self.params.damping;
            for p in &mut self.particles {
                p.converge(blend, &self.params);
            }
        }
    }

    /// Draw visible particles.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, progress: f64) -> DrawStats {
        let mut stats = DrawStats::default();
        if !Self::is_active(progress) {
            return stats;
        }
        for p in &self.particles {
            if !p.is_visible(self.params.visibility_epsilon) {
                continue;
            }
            let draw = TextDraw {
                text: &p.text,
                position: Point::new(p.position.x.floor(), p.position.y.floor()),
                size_px: p.size,
                alpha: p.opacity,
                color: p.color,
                role: FontRole::Particle,
                family: &self.params.font_family,
                bold: false,
                glow_px: self.params.glow_px,
            };
            match surface.fill_text(&draw) {
                Ok(()) => stats.drawn += 1,
                Err(e) => {
                    tracing::debug!(error = %e, text = %p.text, "particle draw failed");
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/field.rs"]
mod tests;
