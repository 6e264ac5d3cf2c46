//! Change notification for the Ga tree
//!
//! A single optional callback is invoked after every committed structural
//! change. Its failures (returned errors as well as panics) are logged and
//! swallowed: by the time it runs the mutation is already done.

use super::node::Node;
use log::error;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Callback receiving the current tree root
pub type ObserverFn = Box<dyn FnMut(&Node) -> anyhow::Result<()> + Send>;

#[derive(Default)]
pub struct Observer {
    callback: Option<ObserverFn>,
}

impl Observer {
    /// Register `callback`, replacing any previous one
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(&Node) -> anyhow::Result<()> + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    pub fn clear(&mut self) {
        self.callback = None;
    }

    pub fn is_registered(&self) -> bool {
        self.callback.is_some()
    }

    /// Invoke the callback with `root`; no-op when none is registered
    pub fn notify(&mut self, root: &Node) {
        let Some(callback) = self.callback.as_mut() else {
            return;
        };

        match catch_unwind(AssertUnwindSafe(|| callback(root))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                error!("event=observer_failed module=ga status=error error={:#}", err);
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                error!("event=observer_panicked module=ga status=error error={}", message);
            }
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observer")
            .field("registered", &self.is_registered())
            .finish()
    }
}
