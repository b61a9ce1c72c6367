//! Force-directed folder graph with files orbiting their folders on onion rings.
//!
//! [`GraphNode`] is the core: a folder body that owns its sub-folders and file
//! markers. [`Simulation`] steps a tree of them once per frame, and the [`fs`]
//! module feeds it changes observed on disk.

pub mod config;
pub mod error;
pub mod fs;
pub mod graph;
pub mod layout;
pub mod physics;
pub mod simulation;
pub mod util;

pub use config::{Config, LayoutConfig, MarkerConfig, PhysicsConfig};
pub use error::GraphError;
pub use fs::FsEvent;
pub use graph::{FileMarker, GraphNode, NodePath};
pub use simulation::Simulation;
