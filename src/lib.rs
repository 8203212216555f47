//! externals - Synchronize external git repositories from a declarative manifest
//!
//! A JSON manifest (`externals.json`) lists, per external, a working-tree
//! path, a fetch URL, an optional push URL, and a desired revision. The
//! tool drives each external from "possibly absent" to "present, remote
//! configured, checked out at the declared revision" by shelling out to
//! the pre-installed `git` binary, and can re-emit the manifest with each
//! revision resolved to its concrete commit hash.
//!
//! # Architecture
//!
//! - **manifest**: loads/parses the JSON manifest and serializes it back
//! - **external**: one handle per external plus the sequential driver
//! - **error**: error taxonomy (config, remote mismatch, subprocess)
//! - **logging**: tracing setup (stderr; stdout stays machine-readable)
//!
//! The `gitcli` workspace crate holds the subprocess wrapper itself.

pub mod error;
pub mod external;
pub mod logging;
pub mod manifest;

// Re-exports
pub use error::{ExternalsError, Result};
