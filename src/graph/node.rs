use std::collections::{BTreeMap, HashMap};

use eframe::egui::{Vec2, vec2};
use tracing::{debug, trace};

use super::marker::FileMarker;
use super::path::NodePath;
use crate::config::Config;
use crate::error::GraphError;
use crate::layout::{Blueprint, plan_layers, ring_offsets};
use crate::physics::{Body, PhysicsState, charge_force, spring_force};
use crate::util::stable_pair;

/// A folder: a physics body owning its sub-folders and its file markers.
#[derive(Clone, Debug)]
pub struct GraphNode {
    path: NodePath,
    config: Config,
    physics: PhysicsState,
    children: BTreeMap<String, GraphNode>,
    files: Vec<FileMarker>,
    file_index: HashMap<String, usize>,
    blueprint: Blueprint,
    killed: bool,
}

impl GraphNode {
    pub fn new_root(config: Config) -> Self {
        Self::spawn(NodePath::root(), Vec2::ZERO, config)
    }

    fn spawn(path: NodePath, position: Vec2, config: Config) -> Self {
        Self {
            blueprint: plan_layers(0, &config.layout),
            path,
            config,
            physics: PhysicsState::at(position),
            children: BTreeMap::new(),
            files: Vec::new(),
            file_index: HashMap::new(),
            killed: false,
        }
    }

    pub fn name(&self) -> &str {
        self.path.name().unwrap_or(".")
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Path of the owning folder; `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        self.path.parent()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn position(&self) -> Vec2 {
        self.physics.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.physics.velocity
    }

    pub fn acceleration(&self) -> Vec2 {
        self.physics.acceleration()
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.physics.position = position;
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Folders with more files weigh more; an empty folder is massless.
    pub fn mass(&self) -> f32 {
        self.config.physics.mass_per_file * self.files.len() as f32
    }

    /// Markers in insertion order.
    pub fn files(&self) -> &[FileMarker] {
        &self.files
    }

    pub fn file(&self, name: &str) -> Option<&FileMarker> {
        self.file_index.get(name).map(|&index| &self.files[index])
    }

    pub fn children(&self) -> impl Iterator<Item = &GraphNode> {
        self.children.values()
    }

    pub fn child(&self, name: &str) -> Option<&GraphNode> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut GraphNode> {
        self.children.get_mut(name)
    }

    /// The onion plan backing the current marker offsets.
    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// True when `other` is this folder's parent or one of its direct children.
    pub fn is_connected_to(&self, other: &impl Body) -> bool {
        other.path().is_parent_of(&self.path) || self.path.is_parent_of(other.path())
    }

    /// Returns the named sub-folder, creating it next to this folder if needed.
    ///
    /// A sub-folder that was killed but not yet reaped is replaced by a fresh one.
    pub fn add_child(&mut self, name: &str) -> &mut GraphNode {
        let path = self.path.child(name);
        let (jx, jy) = stable_pair(&path.to_string());
        let position = self.physics.position + vec2(jx, jy) * self.config.markers.spawn_jitter;
        let config = self.config;

        let child = self
            .children
            .entry(name.to_owned())
            .or_insert_with(|| GraphNode::spawn(path.clone(), position, config));
        if child.killed {
            *child = GraphNode::spawn(path, position, config);
        }
        trace!(folder = %child.path, "folder attached");
        child
    }

    pub fn remove_child(&mut self, name: &str) -> Option<GraphNode> {
        let removed = self.children.remove(name);
        if let Some(child) = &removed {
            debug!(folder = %child.path, "folder detached");
        }
        removed
    }

    /// Asks the parent to drop this folder on its next reap pass.
    pub fn kill(&mut self) {
        self.killed = true;
    }

    /// Detaches killed sub-folders anywhere below this folder. Returns how many
    /// subtrees were dropped.
    pub fn reap_killed(&mut self) -> usize {
        let before = self.children.len();
        self.children.retain(|_, child| !child.killed);
        let mut reaped = before - self.children.len();
        for child in self.children.values_mut() {
            reaped += child.reap_killed();
        }
        reaped
    }

    /// Tracks a new file. A name that is already tracked is returned untouched.
    pub fn add_file(&mut self, name: &str) -> &mut FileMarker {
        if let Some(&index) = self.file_index.get(name) {
            return &mut self.files[index];
        }

        let index = self.files.len();
        self.files.push(FileMarker::new(name));
        self.file_index.insert(name.to_owned(), index);
        self.relayout();
        trace!(folder = %self.path, file = name, files = self.files.len(), "file added");
        &mut self.files[index]
    }

    /// Stops tracking a file and hands its marker back, e.g. for a fade-out.
    pub fn remove_file(&mut self, name: &str) -> Option<FileMarker> {
        let Some(index) = self.file_index.remove(name) else {
            debug!(folder = %self.path, file = name, "cannot remove untracked file");
            return None;
        };

        let mut marker = self.files.remove(index);
        for (shifted, later) in self.files.iter().enumerate().skip(index) {
            self.file_index.insert(later.name().to_owned(), shifted);
        }
        marker.mark_modified();
        self.relayout();
        trace!(folder = %self.path, file = name, files = self.files.len(), "file removed");
        Some(marker)
    }

    pub fn modify_file(&mut self, name: &str) -> Result<&mut FileMarker, GraphError> {
        let Some(&index) = self.file_index.get(name) else {
            return Err(GraphError::FileNotFound {
                folder: self.path.clone(),
                file: name.to_owned(),
            });
        };

        let marker = &mut self.files[index];
        marker.mark_modified();
        Ok(marker)
    }

    /// Replaces the configuration of this subtree, re-planning markers when the
    /// ring geometry changed.
    pub fn set_config(&mut self, config: Config) {
        let layout_changed = self.config.layout != config.layout;
        self.config = config;
        if layout_changed {
            self.relayout();
        }
        for child in self.children.values_mut() {
            child.set_config(config);
        }
    }

    // Mass and layout both derive from `files.len()`; this keeps the plan in step.
    fn relayout(&mut self) {
        self.blueprint = plan_layers(self.files.len(), &self.config.layout);
        for (marker, offset) in self.files.iter_mut().zip(ring_offsets(&self.blueprint)) {
            marker.set_offset(offset);
        }
    }

    /// Advances marker highlights and refreshes marker world positions.
    /// The folder itself does not move here.
    pub fn update(&mut self, dt: f32) {
        let origin = self.physics.position;
        let highlight_secs = self.config.markers.highlight_secs;
        for marker in &mut self.files {
            marker.advance(dt, highlight_secs, origin);
        }
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.physics.apply_force(force, &self.config.physics);
    }

    pub fn integrate(&mut self, dt: f32) {
        self.physics.integrate(dt, &self.config.physics);
    }

    pub fn damp(&mut self, factor: f32) {
        self.physics.damp(factor);
    }

    pub fn attract(&mut self, other: &impl Body) {
        let force = spring_force(&*self, other, &self.config.physics);
        self.apply_force(force);
    }

    pub fn repel(&mut self, other: &impl Body) {
        let force = charge_force(&*self, other, &self.config.physics);
        self.apply_force(force);
    }

    /// Resolves a path relative to this folder.
    pub fn descendant(&self, path: &NodePath) -> Option<&GraphNode> {
        let mut node = self;
        for segment in path.segments() {
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    pub fn descendant_mut(&mut self, path: &NodePath) -> Option<&mut GraphNode> {
        let mut node = self;
        for segment in path.segments() {
            node = node.children.get_mut(segment)?;
        }
        Some(node)
    }

    /// Pre-order traversal; sub-folders are visited by name.
    pub fn walk<'a>(&'a self, visitor: &mut impl FnMut(&'a GraphNode)) {
        visitor(self);
        for child in self.children.values() {
            child.walk(visitor);
        }
    }

    pub fn walk_mut(&mut self, visitor: &mut impl FnMut(&mut GraphNode)) {
        visitor(self);
        for child in self.children.values_mut() {
            child.walk_mut(visitor);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(GraphNode::node_count).sum::<usize>()
    }

    pub fn total_file_count(&self) -> usize {
        self.files.len()
            + self
                .children
                .values()
                .map(GraphNode::total_file_count)
                .sum::<usize>()
    }
}

impl Body for GraphNode {
    fn path(&self) -> &NodePath {
        &self.path
    }

    fn position(&self) -> Vec2 {
        self.physics.position
    }

    fn mass(&self) -> f32 {
        GraphNode::mass(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> GraphNode {
        GraphNode::new_root(Config::default())
    }

    fn offsets(node: &GraphNode) -> Vec<Vec2> {
        node.files().iter().map(FileMarker::offset).collect()
    }

    #[test]
    fn empty_folder_is_massless_with_a_single_empty_layer() {
        let node = root();
        assert_eq!(node.mass(), 0.0);
        assert_eq!(node.file_count(), 0);
        assert_eq!(node.blueprint().layers().len(), 1);
        assert_eq!(node.blueprint().total_capacity(), 0);
    }

    #[test]
    fn mass_follows_file_count() {
        let mut node = root();
        let mut previous = node.mass();
        for index in 0..10 {
            node.add_file(&format!("file-{index}"));
            assert!(node.mass() >= previous);
            previous = node.mass();
        }
        assert_eq!(node.mass(), 10.0);
    }

    #[test]
    fn three_files_spread_evenly_on_one_ring() {
        let mut node = root();
        for name in ["a", "b", "c"] {
            node.add_file(name);
        }

        let angles = node
            .files()
            .iter()
            .map(|marker| marker.offset().y.atan2(marker.offset().x).to_degrees())
            .map(|angle| angle.rem_euclid(360.0).round())
            .collect::<Vec<_>>();
        assert_eq!(angles, vec![0.0, 120.0, 240.0]);
        for marker in node.files() {
            assert!((marker.offset().length() - 15.0).abs() < 1e-3);
        }
    }

    #[test]
    fn adding_an_existing_file_changes_nothing() {
        let mut node = root();
        node.add_file("a");
        node.add_file("b");
        node.update(10.0);
        let before = offsets(&node);

        let marker = node.add_file("a");
        assert!(!marker.is_modified());
        assert_eq!(node.file_count(), 2);
        assert_eq!(offsets(&node), before);
    }

    #[test]
    fn removal_relayouts_the_remaining_markers() {
        let mut node = root();
        for name in ["a", "b", "c", "d", "e"] {
            node.add_file(name);
        }

        let removed = node.remove_file("c").unwrap();
        assert_eq!(removed.name(), "c");
        assert!(removed.is_modified());

        let expected = ring_offsets(&plan_layers(4, &Config::default().layout)).collect::<Vec<_>>();
        assert_eq!(offsets(&node), expected);
        assert_eq!(
            node.files().iter().map(FileMarker::name).collect::<Vec<_>>(),
            vec!["a", "b", "d", "e"]
        );
        assert_eq!(node.file("e").map(FileMarker::name), Some("e"));
    }

    #[test]
    fn removing_an_unknown_file_is_reported_as_none() {
        let mut node = root();
        node.add_file("a");
        assert!(node.remove_file("missing").is_none());
        assert_eq!(node.file_count(), 1);
    }

    #[test]
    fn modify_requires_a_tracked_file() {
        let mut node = root();
        node.add_file("a");
        node.update(10.0);
        assert!(node.modify_file("a").unwrap().is_modified());

        let error = node.modify_file("b").unwrap_err();
        assert_eq!(
            error,
            GraphError::FileNotFound {
                folder: NodePath::root(),
                file: "b".to_owned()
            }
        );
    }

    #[test]
    fn update_moves_markers_with_their_folder() {
        let mut node = root();
        node.add_file("a");
        node.set_position(vec2(100.0, 50.0));
        node.update(0.016);
        let marker = &node.files()[0];
        assert_eq!(marker.position(), vec2(100.0, 50.0) + marker.offset());
    }

    #[test]
    fn children_are_unique_by_name_and_know_their_parent() {
        let mut node = root();
        node.add_child("src").add_file("lib.rs");
        let again = node.add_child("src");
        assert_eq!(again.file_count(), 1);
        assert_eq!(again.parent(), Some(NodePath::root()));
        assert_eq!(node.node_count(), 2);
    }

    #[test]
    fn connection_is_one_hop_only() {
        let mut root = root();
        root.add_child("src").add_child("graph");
        let src = root.child("src").unwrap();
        let graph = src.child("graph").unwrap();

        assert!(src.is_connected_to(&root));
        assert!(root.is_connected_to(src));
        assert!(src.is_connected_to(graph));
        assert!(!root.is_connected_to(graph));
        assert!(!graph.is_connected_to(&root));
    }

    #[test]
    fn killed_folders_are_dropped_on_reap() {
        let mut root = root();
        root.add_child("src").add_child("graph");
        root.add_child("docs");
        root.child_mut("src").unwrap().kill();

        assert_eq!(root.reap_killed(), 1);
        assert!(root.child("src").is_none());
        assert_eq!(root.node_count(), 2);
    }

    #[test]
    fn re_adding_a_killed_folder_starts_fresh() {
        let mut root = root();
        root.add_child("src").add_file("lib.rs");
        root.child_mut("src").unwrap().kill();

        let revived = root.add_child("src");
        assert!(!revived.is_killed());
        assert_eq!(revived.file_count(), 0);
    }

    #[test]
    fn remove_child_detaches_the_subtree() {
        let mut root = root();
        root.add_child("src").add_child("graph");
        let removed = root.remove_child("src").unwrap();
        assert_eq!(removed.node_count(), 2);
        assert!(root.remove_child("src").is_none());
    }

    #[test]
    fn layout_change_replans_markers() {
        let mut node = root();
        node.add_file("a");
        let mut config = Config::default();
        config.layout.base_radius = 30.0;
        node.set_config(config);
        assert!((node.files()[0].offset().length() - 30.0).abs() < 1e-3);
    }
}
