use super::types::{ComputeCapability, RuntimeVersion};
use crate::error::{QueryError, Result};

/// Read-only view of the CUDA framework's device-query surface
///
/// Every method maps to one query against process-wide driver state.
/// Implementations query the framework on every call; no caching.
pub trait DeviceQueryProvider {
    /// Whether any CUDA-capable device can be used. Never fails.
    fn is_available(&self) -> bool;

    fn device_count(&self) -> Result<u32>;

    fn device_name(&self, index: u32) -> Result<String>;

    fn compute_capability(&self, index: u32) -> Result<ComputeCapability>;

    /// Total device memory in bytes
    fn total_memory(&self, index: u32) -> Result<u64>;

    fn multiprocessor_count(&self, index: u32) -> Result<u32>;

    /// Process-wide runtime version, identical for every device
    fn runtime_version(&self) -> Result<RuntimeVersion>;
}

impl<P: DeviceQueryProvider + ?Sized> DeviceQueryProvider for Box<P> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn device_count(&self) -> Result<u32> {
        (**self).device_count()
    }

    fn device_name(&self, index: u32) -> Result<String> {
        (**self).device_name(index)
    }

    fn compute_capability(&self, index: u32) -> Result<ComputeCapability> {
        (**self).compute_capability(index)
    }

    fn total_memory(&self, index: u32) -> Result<u64> {
        (**self).total_memory(index)
    }

    fn multiprocessor_count(&self, index: u32) -> Result<u32> {
        (**self).multiprocessor_count(index)
    }

    fn runtime_version(&self) -> Result<RuntimeVersion> {
        (**self).runtime_version()
    }
}

/// Provider used when the binary is built without the `cuda` feature
///
/// Reports no accelerator, like a CPU-only framework build.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCudaProvider;

impl NoCudaProvider {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceQueryProvider for NoCudaProvider {
    fn is_available(&self) -> bool {
        tracing::debug!("CUDA support not compiled in; reporting no devices");
        false
    }

    fn device_count(&self) -> Result<u32> {
        Ok(0)
    }

    fn device_name(&self, _index: u32) -> Result<String> {
        Err(QueryError::NotCompiled)
    }

    fn compute_capability(&self, _index: u32) -> Result<ComputeCapability> {
        Err(QueryError::NotCompiled)
    }

    fn total_memory(&self, _index: u32) -> Result<u64> {
        Err(QueryError::NotCompiled)
    }

    fn multiprocessor_count(&self, _index: u32) -> Result<u32> {
        Err(QueryError::NotCompiled)
    }

    fn runtime_version(&self) -> Result<RuntimeVersion> {
        Err(QueryError::NotCompiled)
    }
}
