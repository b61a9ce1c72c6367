use std::collections::HashMap;

use eframe::egui::Vec2;
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::GraphError;
use crate::fs::FsEvent;
use crate::graph::{FileMarker, GraphNode, NodePath};
use crate::physics::Body;

/// Frame driver: owns the folder tree and steps it once per frame.
pub struct Simulation {
    root: GraphNode,
    config: Config,
}

/// Position and mass of a node frozen at the start of a frame.
#[derive(Clone, Debug)]
struct BodySnapshot {
    path: NodePath,
    position: Vec2,
    mass: f32,
}

impl BodySnapshot {
    fn of(node: &GraphNode) -> Self {
        Self {
            path: node.path().clone(),
            position: node.position(),
            mass: node.mass(),
        }
    }
}

impl Body for BodySnapshot {
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

impl Simulation {
    pub fn new(config: Config) -> Self {
        Self {
            root: GraphNode::new_root(config),
            config,
        }
    }

    pub fn root(&self) -> &GraphNode {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut GraphNode {
        &mut self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        if self.config == config {
            return;
        }
        self.config = config;
        self.root.set_config(config);
    }

    /// Applies one file-system change. A removed file's marker is handed back
    /// so the caller can animate it out.
    pub fn apply(&mut self, event: &FsEvent) -> Result<Option<FileMarker>, GraphError> {
        trace!(kind = event.kind(), path = %event.path().display(), "applying event");
        let path = NodePath::from_relative(event.path())?;

        match event {
            FsEvent::DirAdded(_) => {
                self.ensure_folder(&path);
                Ok(None)
            }
            FsEvent::DirRemoved(_) => {
                self.kill_folder(&path, event)?;
                Ok(None)
            }
            FsEvent::FileAdded(_) => {
                let (folder, file) = split_file(path, event)?;
                self.ensure_folder(&folder).add_file(&file);
                Ok(None)
            }
            FsEvent::FileModified(_) => {
                let (folder, file) = split_file(path, event)?;
                match self.root.descendant_mut(&folder) {
                    Some(node) => node.modify_file(&file).map(|_| None),
                    None => Err(GraphError::FileNotFound { folder, file }),
                }
            }
            FsEvent::FileRemoved(_) => {
                let (folder, file) = split_file(path, event)?;
                Ok(self.remove_file(&folder, &file))
            }
            FsEvent::PathRemoved(_) => {
                if !path.is_root() && self.root.descendant(&path).is_some() {
                    self.kill_folder(&path, event)?;
                    return Ok(None);
                }
                let (folder, file) = split_file(path, event)?;
                Ok(self.remove_file(&folder, &file))
            }
        }
    }

    fn ensure_folder(&mut self, path: &NodePath) -> &mut GraphNode {
        let mut node = &mut self.root;
        for segment in path.segments() {
            node = node.add_child(segment);
        }
        node
    }

    fn kill_folder(&mut self, path: &NodePath, event: &FsEvent) -> Result<(), GraphError> {
        if path.is_root() {
            return Err(GraphError::InvalidPath(event.path().to_path_buf()));
        }
        match self.root.descendant_mut(path) {
            Some(node) => node.kill(),
            None => debug!(folder = %path, "cannot remove untracked folder"),
        }
        Ok(())
    }

    fn remove_file(&mut self, folder: &NodePath, file: &str) -> Option<FileMarker> {
        let Some(node) = self.root.descendant_mut(folder) else {
            debug!(%folder, file, "cannot remove file from untracked folder");
            return None;
        };
        node.remove_file(file)
    }

    /// One frame: reap, forces, damping, integration, marker refresh.
    pub fn tick(&mut self, dt: f32) {
        let reaped = self.root.reap_killed();
        if reaped > 0 {
            debug!(reaped, "dropped removed folders");
        }

        let mut bodies = Vec::new();
        self.root.walk(&mut |node| bodies.push(BodySnapshot::of(node)));
        let index_by_path = bodies
            .iter()
            .enumerate()
            .map(|(index, body)| (body.path.clone(), index))
            .collect::<HashMap<_, _>>();

        self.root.walk_mut(&mut |node| {
            if let Some(parent) = node.parent().and_then(|path| index_by_path.get(&path)) {
                node.attract(&bodies[*parent]);
            }
            for body in &bodies {
                node.repel(body);
            }
        });

        let damping = self.config.physics.damping;
        self.root.walk_mut(&mut |node| node.damp(damping));
        self.root.walk_mut(&mut |node| node.integrate(dt));
        self.root.walk_mut(&mut |node| node.update(dt));
    }

    /// Folders whose path fuzzy-matches `query`, best match first.
    pub fn search(&self, query: &str) -> Vec<NodePath> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = Vec::new();
        self.root.walk(&mut |node| {
            if node.path().is_root() {
                return;
            }
            let text = node.path().to_string();
            let score = matcher
                .fuzzy_match(&text, query)
                .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()));
            if let Some(score) = score {
                scored.push((score, node.path().clone()));
            }
        });

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, path)| path).collect()
    }
}

fn split_file(path: NodePath, event: &FsEvent) -> Result<(NodePath, String), GraphError> {
    path.split_last()
        .ok_or_else(|| GraphError::InvalidPath(event.path().to_path_buf()))
}
