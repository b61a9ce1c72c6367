use std::collections::hash_map::DefaultHasher;
use std::f32::consts::PI;
use std::hash::{Hash, Hasher};

use eframe::egui::{Vec2, vec2};

/// Two pseudo-random values in `[-1, 1]` that depend only on `key`.
pub fn stable_pair(key: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Unit vector whose angle depends only on `key`.
pub fn stable_direction(key: &str) -> Vec2 {
    let (turn, _) = stable_pair(key);
    let angle = turn * PI;
    vec2(angle.cos(), angle.sin())
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_deterministic_and_bounded() {
        let first = stable_pair("src/graph");
        assert_eq!(first, stable_pair("src/graph"));
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn stable_direction_is_unit_length() {
        let direction = stable_direction("docs");
        assert!((direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn plural_picks_form_by_count() {
        assert_eq!(plural(1, "file", "files"), "1 file");
        assert_eq!(plural(3, "file", "files"), "3 files");
    }
}
