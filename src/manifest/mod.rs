//! Manifest handling for the externals configuration
//!
//! Loads and re-emits the JSON file describing which external
//! repositories to synchronize, where, and at which revision.
//!
//! # Example Manifest
//!
//! ```json
//! {
//!     "externals": [
//!         {
//!             "path": "deps/widget",
//!             "fetchurl": "https://example.com/widget.git",
//!             "pushurl": "git@example.com:widget.git",
//!             "revision": "v1.0"
//!         }
//!     ]
//! }
//! ```

mod store;

pub use store::{ExternalSpec, Manifest};
