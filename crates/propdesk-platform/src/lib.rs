//! Typed HTTP client for the backing platform.
//!
//! The platform hosts two services this repo cares about: token
//! verification (`/auth/v1`) and object storage (`/storage/v1`). Handles
//! are built once from process configuration and bound to their key for
//! the process lifetime; construction fails fast when a credential is
//! missing. The redeploy hook client lives here too since it shares the
//! outbound HTTP plumbing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod error;
pub mod hook;
pub mod storage;

pub use auth::{AuthClient, AuthUser};
pub use client::ClientConfig;
pub use error::{PlatformError, Result};
pub use hook::HookClient;
pub use storage::StorageClient;
