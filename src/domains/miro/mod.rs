//! Miro REST API boundary.
//!
//! Tool handlers never talk HTTP directly: they build an [`ApiRequest`] and
//! hand it to a [`BoardApi`] implementation injected through the tool context.
//! [`MiroClient`] is the production implementation; tests use a recording mock.

mod client;
mod error;
mod request;

#[cfg(test)]
pub mod mock;

pub use client::{BoardApi, MiroClient};
pub use error::ApiError;
pub use request::{ApiRequest, FileUpload};
