use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodePath;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("file `{file}` is not tracked under folder `{folder}`")]
    FileNotFound { folder: NodePath, file: String },

    #[error("path `{}` cannot be mapped onto the folder tree", .0.display())]
    InvalidPath(PathBuf),
}
