use eframe::egui::Vec2;

use crate::config::PhysicsConfig;

/// Position, velocity and the per-frame acceleration accumulator of one body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicsState {
    pub position: Vec2,
    pub velocity: Vec2,
    acceleration: Vec2,
}

impl PhysicsState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Accumulates `force`, keeping each axis within `[-force_max, force_max]`.
    pub fn apply_force(&mut self, force: Vec2, config: &PhysicsConfig) {
        let bound = config.force_max.abs();
        self.acceleration.x = (self.acceleration.x + force.x).clamp(-bound, bound);
        self.acceleration.y = (self.acceleration.y + force.y).clamp(-bound, bound);
    }

    /// Semi-implicit Euler step. The accumulator is consumed.
    pub fn integrate(&mut self, dt: f32, config: &PhysicsConfig) {
        self.velocity += self.acceleration * dt * config.speed;
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }

    pub fn damp(&mut self, factor: f32) {
        self.velocity *= factor;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn apply_force_clamps_each_axis() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::default();
        state.apply_force(vec2(1000.0, -2.5), &config);
        assert_eq!(state.acceleration(), vec2(4.0, -2.5));

        state.apply_force(vec2(-3.0, -10.0), &config);
        assert_eq!(state.acceleration(), vec2(1.0, -4.0));
    }

    #[test]
    fn integrate_uses_speed_and_resets_acceleration() {
        let config = PhysicsConfig::default();
        let mut state = PhysicsState::at(vec2(10.0, 0.0));
        state.apply_force(vec2(1.0, 0.5), &config);
        state.integrate(0.5, &config);

        assert_eq!(state.velocity, vec2(32.0, 16.0));
        assert_eq!(state.position, vec2(42.0, 16.0));
        assert_eq!(state.acceleration(), Vec2::ZERO);

        state.integrate(0.5, &config);
        assert_eq!(state.position, vec2(74.0, 32.0));
    }

    #[test]
    fn damp_scales_velocity() {
        let mut state = PhysicsState {
            velocity: vec2(8.0, -4.0),
            ..PhysicsState::default()
        };
        state.damp(0.5);
        assert_eq!(state.velocity, vec2(4.0, -2.0));
    }
}
