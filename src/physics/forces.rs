use eframe::egui::Vec2;

use crate::config::PhysicsConfig;
use crate::graph::NodePath;
use crate::util::stable_direction;

/// Read-only view of another node, as seen by the force model.
pub trait Body {
    fn path(&self) -> &NodePath;
    fn position(&self) -> Vec2;
    fn mass(&self) -> f32;
}

/// Linear spring pulling `body` toward `anchor`.
///
/// Coincident bodies are at rest: the spring exerts nothing.
pub fn spring_force(body: &impl Body, anchor: &impl Body, config: &PhysicsConfig) -> Vec2 {
    let delta = body.position() - anchor.position();
    let distance = delta.length();
    if distance < config.min_distance {
        return Vec2::ZERO;
    }

    let direction = delta / distance;
    direction * (config.spring * distance)
}

/// Inverse-square repulsion of `body` away from `other`, scaled by both masses.
pub fn charge_force(body: &impl Body, other: &impl Body, config: &PhysicsConfig) -> Vec2 {
    if body.path() == other.path() {
        return Vec2::ZERO;
    }

    let delta = body.position() - other.position();
    let distance = delta.length();
    let (direction, distance) = if distance >= config.min_distance {
        (delta / distance, distance)
    } else {
        (
            coincident_direction(body.path(), other.path()),
            config.min_distance.max(f32::MIN_POSITIVE),
        )
    };

    let strength = config.charge * (body.mass() * other.mass()) / (distance * distance);
    direction * strength
}

/// Separation direction for two bodies sharing a position. Depends only on the
/// unordered pair, and points opposite ways for the two members.
fn coincident_direction(own: &NodePath, other: &NodePath) -> Vec2 {
    let (low, high, sign) = if own < other {
        (own, other, 1.0)
    } else {
        (other, own, -1.0)
    };
    stable_direction(&format!("{low}\u{0}{high}")) * sign
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    struct Point {
        path: NodePath,
        position: Vec2,
        mass: f32,
    }

    impl Body for Point {
        fn path(&self) -> &NodePath {
            &self.path
        }

        fn position(&self) -> Vec2 {
            self.position
        }

        fn mass(&self) -> f32 {
            self.mass
        }
    }

    fn point(path: &str, x: f32, y: f32, mass: f32) -> Point {
        Point {
            path: NodePath::parse(path),
            position: vec2(x, y),
            mass,
        }
    }

    #[test]
    fn spring_pulls_toward_anchor_linearly() {
        let config = PhysicsConfig::default();
        let child = point("a", 0.0, 200.0, 1.0);
        let parent = point("", 0.0, 0.0, 1.0);

        let force = spring_force(&child, &parent, &config);
        assert!((force.y - -1.0).abs() < 1e-6);
        assert_eq!(force.x, 0.0);

        let farther = point("a", 0.0, 400.0, 1.0);
        let doubled = spring_force(&farther, &parent, &config);
        assert!((doubled.y - -2.0).abs() < 1e-6);
    }

    #[test]
    fn spring_is_silent_when_coincident() {
        let config = PhysicsConfig::default();
        let a = point("a", 3.0, 3.0, 1.0);
        let b = point("", 3.0, 3.0, 1.0);
        assert_eq!(spring_force(&a, &b, &config), Vec2::ZERO);
    }

    #[test]
    fn unit_masses_ten_apart_repel_with_a_thousand() {
        let config = PhysicsConfig::default();
        let a = point("a", 10.0, 0.0, 1.0);
        let b = point("b", 0.0, 0.0, 1.0);

        let force = charge_force(&a, &b, &config);
        assert!((force.x - 1000.0).abs() < 1e-2);
        assert!(force.y.abs() < 1e-6);
    }

    #[test]
    fn repulsion_is_symmetric_for_equal_masses() {
        let config = PhysicsConfig::default();
        let a = point("a", 12.0, -7.0, 3.0);
        let b = point("b", -4.0, 9.0, 3.0);

        let on_a = charge_force(&a, &b, &config);
        let on_b = charge_force(&b, &a, &config);
        assert!((on_a.length() - on_b.length()).abs() < 1e-3);
        assert!((on_a + on_b).length() < 1e-3);
    }

    #[test]
    fn massless_bodies_do_not_repel() {
        let config = PhysicsConfig::default();
        let a = point("a", 1.0, 0.0, 0.0);
        let b = point("b", 0.0, 0.0, 5.0);
        assert_eq!(charge_force(&a, &b, &config), Vec2::ZERO);
    }

    #[test]
    fn coincident_bodies_get_finite_opposite_pushes() {
        let config = PhysicsConfig::default();
        let a = point("a", 5.0, 5.0, 1.0);
        let b = point("b", 5.0, 5.0, 1.0);

        let on_a = charge_force(&a, &b, &config);
        let on_b = charge_force(&b, &a, &config);
        assert!(on_a.x.is_finite() && on_a.y.is_finite());
        assert!(on_a.length() > 0.0);
        assert!((on_a + on_b).length() <= on_a.length() * 1e-5);
    }

    #[test]
    fn a_body_does_not_repel_itself() {
        let config = PhysicsConfig::default();
        let a = point("a", 5.0, 5.0, 1.0);
        assert_eq!(charge_force(&a, &a, &config), Vec2::ZERO);
    }
}
