use std::f32::consts::PI;

use crate::config::LayoutConfig;

/// One concentric ring of markers around a folder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layer {
    pub radius: f32,
    pub capacity: usize,
}

impl Layer {
    /// Layers that hold nothing (including every non-positive radius) are never drawn.
    pub fn is_visible(&self) -> bool {
        self.capacity > 0 && self.radius > 0.0
    }
}

/// Ordered onion layers for a given file count, innermost first.
#[derive(Clone, Debug, PartialEq)]
pub struct Blueprint {
    layers: Vec<Layer>,
}

impl Blueprint {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn total_capacity(&self) -> usize {
        self.layers.iter().map(|layer| layer.capacity).sum()
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.is_visible())
    }
}

/// Distance along the circle between two neighbours when `occupancy` markers
/// share a ring of `radius`.
pub fn arc_length(radius: f32, occupancy: usize) -> f32 {
    PI * radius * (360.0 / occupancy as f32) / 180.0
}

/// Builds the onion blueprint for `count` markers.
///
/// Markers fill the innermost ring until one more would bring neighbours closer
/// than `min_arc`; then a ring one `radius_step` further out is opened. Each ring
/// is sized in closed form, so a plan costs one step per ring rather than one
/// per marker. The result depends on `count` alone.
pub fn plan_layers(count: usize, config: &LayoutConfig) -> Blueprint {
    let step = if config.radius_step > 0.0 {
        config.radius_step
    } else {
        LayoutConfig::default().radius_step
    };

    let mut layers = Vec::new();
    let mut radius = config.base_radius;
    let mut remaining = count;
    loop {
        let capacity = ring_fit(radius, config.min_arc).min(remaining);
        layers.push(Layer { radius, capacity });
        remaining -= capacity;
        if remaining == 0 {
            break;
        }
        radius += step;
    }

    Blueprint { layers }
}

/// Upper bound on markers per ring, whatever the configured `min_arc`.
const MAX_RING_FIT: usize = 1 << 20;

/// Largest occupancy whose arc on a ring of `radius` still reaches `min_arc`.
fn ring_fit(radius: f32, min_arc: f32) -> usize {
    if radius <= 0.0 {
        return 0;
    }
    if min_arc <= 0.0 {
        return usize::MAX;
    }

    let estimate = ((2.0 * PI * radius) / min_arc).floor();
    let mut fit = if estimate.is_finite() {
        (estimate as usize).min(MAX_RING_FIT)
    } else {
        MAX_RING_FIT
    };
    while fit > 0 && arc_length(radius, fit) < min_arc {
        fit -= 1;
    }
    while fit < MAX_RING_FIT && arc_length(radius, fit + 1) >= min_arc {
        fit += 1;
    }
    fit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(count: usize) -> Blueprint {
        plan_layers(count, &LayoutConfig::default())
    }

    #[test]
    fn empty_folder_has_one_empty_base_layer() {
        let blueprint = plan(0);
        assert_eq!(
            blueprint.layers(),
            &[Layer {
                radius: -15.0,
                capacity: 0
            }]
        );
        assert_eq!(blueprint.visible_layers().count(), 0);
    }

    #[test]
    fn three_files_share_the_first_usable_ring() {
        let blueprint = plan(3);
        let visible = blueprint.visible_layers().copied().collect::<Vec<_>>();
        assert_eq!(
            visible,
            vec![Layer {
                radius: 15.0,
                capacity: 3
            }]
        );
        assert_eq!(blueprint.total_capacity(), 3);
    }

    #[test]
    fn rings_grow_by_step_and_fill_to_their_limit() {
        let blueprint = plan(20);
        let rings = blueprint
            .layers()
            .iter()
            .map(|layer| (layer.radius, layer.capacity))
            .collect::<Vec<_>>();
        assert_eq!(
            rings,
            vec![(-15.0, 0), (0.0, 0), (15.0, 6), (30.0, 12), (45.0, 2)]
        );
    }

    #[test]
    fn arc_formula_matches_circumference_share() {
        let arc = arc_length(15.0, 6);
        assert!((arc - (2.0 * PI * 15.0 / 6.0)).abs() < 1e-4);
    }

    #[test]
    fn tiny_min_arc_caps_ring_occupancy() {
        assert_eq!(ring_fit(15.0, 1e-20), MAX_RING_FIT);
        assert_eq!(ring_fit(15.0, f32::MIN_POSITIVE), MAX_RING_FIT);

        let config = LayoutConfig {
            min_arc: 1e-20,
            ..LayoutConfig::default()
        };
        let blueprint = plan_layers(5, &config);
        assert_eq!(blueprint.total_capacity(), 5);
        assert_eq!(
            blueprint.visible_layers().copied().collect::<Vec<_>>(),
            vec![Layer {
                radius: 15.0,
                capacity: 5
            }]
        );
    }

    #[test]
    fn non_positive_step_falls_back_to_default() {
        let config = LayoutConfig {
            radius_step: 0.0,
            ..LayoutConfig::default()
        };
        let blueprint = plan_layers(4, &config);
        assert_eq!(blueprint.total_capacity(), 4);
    }
}
