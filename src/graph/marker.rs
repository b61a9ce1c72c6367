use eframe::egui::Vec2;

/// A file orbiting its folder node.
#[derive(Clone, Debug, PartialEq)]
pub struct FileMarker {
    name: String,
    modified: bool,
    age: f32,
    highlight: f32,
    offset: Vec2,
    position: Vec2,
}

impl FileMarker {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            modified: true,
            age: 0.0,
            highlight: 1.0,
            offset: Vec2::ZERO,
            position: Vec2::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Seconds since the marker was last added or modified.
    pub fn age(&self) -> f32 {
        self.age
    }

    /// 1.0 right after a change, fading to 0.0 once the highlight window has passed.
    pub fn highlight(&self) -> f32 {
        self.highlight
    }

    /// Offset from the owning folder's position.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// World position as of the last `update` of the owning folder.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn mark_modified(&mut self) {
        self.modified = true;
        self.age = 0.0;
        self.highlight = 1.0;
    }

    pub(crate) fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    pub(crate) fn advance(&mut self, dt: f32, highlight_secs: f32, origin: Vec2) {
        self.age += dt;
        if self.modified && self.age >= highlight_secs {
            self.modified = false;
        }
        self.highlight = if self.modified {
            (1.0 - self.age / highlight_secs).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.position = origin + self.offset;
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    #[test]
    fn new_markers_start_highlighted() {
        let marker = FileMarker::new("main.rs");
        assert!(marker.is_modified());
        assert_eq!(marker.highlight(), 1.0);
    }

    #[test]
    fn highlight_fades_then_clears_the_modified_flag() {
        let mut marker = FileMarker::new("main.rs");
        marker.advance(1.0, 2.0, Vec2::ZERO);
        assert!(marker.is_modified());
        assert!((marker.highlight() - 0.5).abs() < 1e-6);

        marker.advance(1.5, 2.0, Vec2::ZERO);
        assert!(!marker.is_modified());
        assert_eq!(marker.highlight(), 0.0);

        marker.mark_modified();
        assert!(marker.is_modified());
        assert_eq!(marker.age(), 0.0);
    }

    #[test]
    fn advance_places_marker_relative_to_origin() {
        let mut marker = FileMarker::new("lib.rs");
        marker.set_offset(vec2(15.0, 0.0));
        marker.advance(0.016, 2.0, vec2(100.0, -20.0));
        assert_eq!(marker.position(), vec2(115.0, -20.0));
    }
}
