//! Error types for catalog lookups

use thiserror::Error;

/// Errors while fetching static game data
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{kind} '{id}' not found in patch {version}")]
    NotFound {
        kind: &'static str,
        id: String,
        version: String,
    },

    #[error("version list is empty")]
    NoVersions,
}
