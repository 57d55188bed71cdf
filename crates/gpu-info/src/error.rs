//! Error types for device queries and report rendering
//!
//! Library code returns these typed errors; the binary wraps them in
//! `anyhow` at the boundary.

use thiserror::Error;

/// Errors raised by a [`DeviceQueryProvider`](crate::gpu::DeviceQueryProvider)
#[derive(Error, Debug)]
pub enum QueryError {
    /// A CUDA API call returned a non-success status
    #[error("CUDA call {call} failed with status {code}")]
    Cuda { call: &'static str, code: i32 },

    /// Device ordinal outside the visible range
    #[error("Invalid device ordinal {index} ({count} device(s) visible)")]
    InvalidDevice { index: u32, count: u32 },

    /// The binary was built without the `cuda` feature
    #[error("CUDA support was not compiled into this binary")]
    NotCompiled,
}

/// Errors raised while producing a device report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Device query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = QueryError> = std::result::Result<T, E>;
