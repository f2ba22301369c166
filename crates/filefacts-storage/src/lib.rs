//! Filefacts Storage Library
//!
//! File access abstraction for the worker. The [`FileAccess`] trait is implemented by
//! a local filesystem provider and by a remote provider that talks to a
//! range-addressable HTTP file store.
//!
//! # Locators
//!
//! Tasks carry absolute, local-style locators such as `/files/movies/a.mkv`. The local
//! provider opens them directly. The remote provider strips a configured prefix
//! (`/files` by default) and resolves the rest against its base URL, see
//! [`paths::remote_url`].

pub mod factory;
#[cfg(feature = "access-local")]
pub mod local;
pub mod paths;
#[cfg(feature = "access-remote")]
pub mod remote;
pub mod traits;

// Re-export commonly used types
pub use factory::create_file_access;
pub use filefacts_core::AccessBackend;
#[cfg(feature = "access-local")]
pub use local::LocalFileAccess;
#[cfg(feature = "access-remote")]
pub use remote::RemoteFileAccess;
pub use traits::{AccessError, AccessResult, FileAccess};
