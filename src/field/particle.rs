use crate::config::FieldParams;
use crate::foundation::core::{Point, Rgba8, polar};
use crate::foundation::math::lerp;

/// One drifting glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Label drawn.
    pub text: String,
    /// Current draw position.
    pub position: Point,
    /// Convergence point, fixed at creation.
    pub target: Point,
    /// Polar angle around the field center, in degrees.
    pub angle: f64,
    /// Polar radius around the field center.
    pub radius: f64,
    /// Angular increment per orbital frame (applied twice).
    pub speed: f64,
    /// Font size in pixels.
    pub size: f64,
    /// Alpha in `[0, 1]`.
    pub opacity: f64,
    /// Fill color.
    pub color: Rgba8,
}

impl Particle {
    /// Spin around `center` and tighten the orbit without crossing the floor.
    pub(crate) fn orbit(&mut self, center: Point, params: &FieldParams) {
        self.angle += self.speed * 2.0;
        if self.radius > params.radius_floor {
            self.radius = (self.radius - params.radius_step).max(params.radius_floor);
        }
        self.position = polar(center, self.angle, self.radius);
    }

    /// Pull toward the target by `blend`, shrinking and fading.
    pub(crate) fn converge(&mut self, blend: f64, params: &FieldParams) {
        let blend = blend.clamp(0.0, 1.0);
        self.position = Point::new(
            lerp(self.position.x, self.target.x, blend),
            lerp(self.position.y, self.target.y, blend),
        );
        self.size *= params.size_decay;
        self.opacity = (self.opacity - params.fade_step).max(0.0);
    }

    /// Whether the particle is still worth drawing.
    pub fn is_visible(&self, epsilon: f64) -> bool {
        self.opacity > epsilon
    }
}
