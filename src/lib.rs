//! # meshstore
//!
//! Core types for a node in a small peer-to-peer file-serving mesh. Each node
//! serves files out of its own directory and, on a miss, asks a fixed set of
//! neighbours for the file (one hop only), optionally caching what it fetched.
//!
//! This crate holds the pieces every other crate shares: the validated
//! [`FileName`], the [`LocalStore`], the per-source [`RetrievalOutcome`], and
//! the [`MeshError`] type. The fan-out logic lives in `meshstore-peer` and the
//! HTTP surface in `meshstore-http`.
//!
//! ```rust,no_run
//! use meshstore::{FileName, LocalStore, RetrievalOutcome};
//!
//! # async fn run() -> meshstore::Result<()> {
//! let store = LocalStore::open("./data")?;
//! let name = FileName::parse("x.txt")?;
//! match store.read(&name).await? {
//!     RetrievalOutcome::Found(bytes) => println!("{} bytes", bytes.len()),
//!     _ => println!("not here, ask the neighbours"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature flags
//!
//! | Feature | Dependencies | Use case |
//! |---------|-------------|----------|
//! | `axum-support` | axum | [`MeshError`] implements `IntoResponse` |

pub mod error;
pub mod store;
pub mod types;

pub use error::{MeshError, Result};
pub use store::LocalStore;
pub use types::{FileName, NodeIdentity, NodeInfo, RetrievalOutcome};
