use super::node::Node;
use super::observer::Observer;
use super::path::GaPath;
use crate::config::SettingsSource;
use crate::error::{RemoteError, TreeError};
use crate::remote::{BlobTransport, HttpTransport, RemoteBlob};
use log::{debug, info, warn};

/// Owner of the Ga tree
///
/// Holds the root, the change observer and the remote bin binding. Every
/// structural edit validates first and mutates only when all checks pass;
/// on success the observer is notified exactly once with the current root.
///
/// Persistence is explicit: edits never touch the remote bin by themselves.
#[derive(Debug)]
pub struct TreeStore<T = HttpTransport> {
    root: Node,
    observer: Observer,
    remote: RemoteBlob<T>,
}

impl TreeStore<HttpTransport> {
    /// Store with an empty tree, synchronized over HTTP with settings from the environment
    pub fn new() -> Self {
        Self::with_remote(RemoteBlob::http(SettingsSource::tree_env()))
    }
}

impl Default for TreeStore<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BlobTransport> TreeStore<T> {
    /// Store with an empty tree bound to `remote`
    pub fn with_remote(remote: RemoteBlob<T>) -> Self {
        Self {
            root: Node::root(),
            observer: Observer::default(),
            remote,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Register the change observer, replacing any previous one
    pub fn register_observer<F>(&mut self, callback: F)
    where
        F: FnMut(&Node) -> anyhow::Result<()> + Send + 'static,
    {
        self.observer.register(callback);
    }

    pub fn clear_observer(&mut self) {
        self.observer.clear();
    }

    /// Notify the observer with the current root
    pub fn notify(&mut self) {
        self.observer.notify(&self.root);
    }

    /// Locate a node by the chain of names leading to it from the root
    pub fn locate<S: AsRef<str>>(&self, names: &[S]) -> Option<GaPath> {
        GaPath::locate(&self.root, names)
    }

    /// Node at `path`, if any
    pub fn node(&self, path: &GaPath) -> Option<&Node> {
        path.resolve(&self.root)
    }

    fn parent_mut(&mut self, parent: &GaPath) -> Result<&mut Node, TreeError> {
        parent
            .resolve_mut(&mut self.root)
            .ok_or_else(|| TreeError::ParentNotFound(parent.clone()))
    }

    /// Create a child named `name` under the node at `parent`
    ///
    /// # Arguments
    /// * `name` - Name of the new node (trimmed; must be unique among its siblings)
    /// * `parent` - Path of the parent node
    /// * `index` - Position to insert before; `None` or out of range appends
    pub fn insert_at(
        &mut self,
        name: &str,
        parent: &GaPath,
        index: Option<usize>,
    ) -> Result<(), TreeError> {
        let position = self.parent_mut(parent)?.insert_child(name, index)?;
        debug!(
            "event=ga_inserted module=ga name={} parent={} index={}",
            name.trim(),
            parent,
            position
        );
        self.notify();
        Ok(())
    }

    /// Remove the child at `index` of the node at `parent`
    pub fn remove_at(&mut self, index: usize, parent: &GaPath) -> Result<(), TreeError> {
        let removed = self.parent_mut(parent)?.remove_child_at(index)?;
        debug!(
            "event=ga_removed module=ga name={} parent={} index={}",
            removed.name, parent, index
        );
        self.notify();
        Ok(())
    }

    /// Remove the first child of the node at `parent` named exactly `name`
    pub fn remove_named(&mut self, name: &str, parent: &GaPath) -> Result<(), TreeError> {
        self.parent_mut(parent)?.remove_child_named(name)?;
        debug!("event=ga_removed module=ga name={} parent={}", name, parent);
        self.notify();
        Ok(())
    }

    /// Replace the whole tree with the remote record
    ///
    /// Local edits are discarded, not merged. The observer fires once with
    /// the new root. Nothing changes on failure.
    pub async fn load_from_remote(&mut self) -> Result<(), RemoteError> {
        match self.remote.fetch::<Node>().await {
            Ok(root) => {
                info!(
                    "event=ga_loaded module=remote status=ok nodes={}",
                    root.count()
                );
                self.root = root;
                self.notify();
                Ok(())
            }
            Err(err) => {
                warn!("event=ga_load_failed module=remote status=error error={}", err);
                Err(err)
            }
        }
    }

    /// Replace the remote record with the whole local tree
    pub async fn save_to_remote(&self) -> Result<(), RemoteError> {
        match self.remote.replace(&self.root).await {
            Ok(()) => {
                info!(
                    "event=ga_saved module=remote status=ok nodes={}",
                    self.root.count()
                );
                Ok(())
            }
            Err(err) => {
                warn!("event=ga_save_failed module=remote status=error error={}", err);
                Err(err)
            }
        }
    }
}
