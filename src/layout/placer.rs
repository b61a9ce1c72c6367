use eframe::egui::{Vec2, vec2};

use super::onion::Blueprint;

/// Offset of the `slot`-th marker (0-based) on a ring holding `capacity` markers.
pub fn slot_offset(radius: f32, capacity: usize, slot: usize) -> Vec2 {
    let step_degrees = 360.0 / capacity as f32;
    let angle = (step_degrees * slot as f32).to_radians();
    vec2(radius * angle.cos(), radius * angle.sin())
}

/// Offsets for markers taken in order: the innermost ring fills first.
pub fn ring_offsets(blueprint: &Blueprint) -> impl Iterator<Item = Vec2> + '_ {
    blueprint
        .layers()
        .iter()
        .filter(|layer| layer.capacity > 0)
        .flat_map(|layer| {
            (0..layer.capacity).map(move |slot| slot_offset(layer.radius, layer.capacity, slot))
        })
}
