mod marker;
mod node;
mod path;

pub use marker::FileMarker;
pub use node::GraphNode;
pub use path::NodePath;
