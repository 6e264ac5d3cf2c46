//! Ga Store Library
//!
//! This library keeps a hierarchical tree of goals ("Ga") and a weekly planner
//! table in memory, and mirrors each of them into a remote JSON bin.
//!
//! # Architecture
//!
//! - **Domain Layer**: `ga` (tree edits, observer) and `week` (week keys, day projection)
//! - **Persistence Layer**: `remote` - whole-state GET/PUT against a JSON bin
//! - **Configuration**: `config` - bin ids and credential from the environment or a TOML file
//!
//! Edits are synchronous and either fully apply or fully reject. Loading and
//! saving are explicit async calls; an edit never reaches the bin on its own.
//!
//! # Example
//!
//! ```no_run
//! use ga_store::{GaPath, TreeStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut store = TreeStore::new();
//!     store.register_observer(|root| {
//!         println!("{} now has {} sub-Ga", root.name, root.children.len());
//!         Ok(())
//!     });
//!     store.load_from_remote().await?;
//!     store.insert_at("Sprint1", &GaPath::root(), None)?;
//!     store.save_to_remote().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod formatting;
pub mod ga;
pub mod logging;
pub mod remote;
pub mod week;

// Re-export commonly used types
pub use config::{FileConfig, SettingsSource};
pub use error::{RemoteError, TreeError, ValidationError};
pub use ga::{GaPath, Node, ROOT_NAME, TreeStore, build_node};
pub use remote::{BlobTransport, HttpResponse, HttpTransport, RemoteBlob};
pub use week::{CalendarStore, DayEntry, DayMap, WeekTable};
