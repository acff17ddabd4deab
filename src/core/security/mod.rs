//! Local file access for upload tools.
//!
//! Tools that send a local file to Miro resolve the caller's path through
//! [`validate_path`], which applies the `MCP_ROOT_PATH` and
//! `MCP_ALLOW_SYMLINKS` settings.

mod upload_path;

pub use upload_path::{PathSecurityError, validate_path};
