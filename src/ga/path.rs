//! Addressing nodes inside a Ga tree
//!
//! Nodes carry no parent links, so a parent is named by the chain of child
//! indices leading to it from the root. The empty path is the root itself.

use super::node::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GaPath(Vec<usize>);

impl GaPath {
    /// Path of the root node
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_indices(indices: impl Into<Vec<usize>>) -> Self {
        Self(indices.into())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Follow the path from `root`
    pub fn resolve<'a>(&self, root: &'a Node) -> Option<&'a Node> {
        self.0
            .iter()
            .try_fold(root, |node, &i| node.children.get(i))
    }

    /// Follow the path from `root`, mutably
    pub fn resolve_mut<'a>(&self, root: &'a mut Node) -> Option<&'a mut Node> {
        self.0
            .iter()
            .try_fold(root, |node, &i| node.children.get_mut(i))
    }

    /// Locate a node by the names along the way from `root`
    ///
    /// Each name is matched exactly against the children of the previous
    /// node. An empty slice locates the root.
    pub fn locate<S: AsRef<str>>(root: &Node, names: &[S]) -> Option<Self> {
        let mut node = root;
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            let index = node.position_of(name.as_ref())?;
            indices.push(index);
            node = &node.children[index];
        }
        Some(Self(indices))
    }
}

impl fmt::Display for GaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for i in &self.0 {
            write!(f, "/{}", i)?;
        }
        Ok(())
    }
}
