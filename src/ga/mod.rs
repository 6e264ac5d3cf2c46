//! Ga tree domain
//!
//! - `node`: the Ga node, its validated constructor and per-node edits
//! - `path`: addressing nodes by child indices from the root
//! - `observer`: the single change observer
//! - `tree_store`: the store owning the tree and its remote binding

mod node;
mod observer;
mod path;
mod tree_store;

pub use node::{Node, ROOT_NAME, build_node, remove_at};
pub use observer::{Observer, ObserverFn};
pub use path::GaPath;
pub use tree_store::TreeStore;
