//! CUDA device query layer
//!
//! The reporter only sees [`DeviceQueryProvider`]. Builds with the `cuda`
//! feature query the driver through [`cuda::CudaProvider`]; other builds get
//! [`NoCudaProvider`], which reports no accelerator.

pub mod provider;
pub mod types;

#[cfg(feature = "cuda")]
pub mod cuda;
#[cfg(feature = "cuda")]
pub mod cuda_ffi;

pub use provider::{DeviceQueryProvider, NoCudaProvider};
pub use types::{bytes_to_gib, ComputeCapability, DeviceInfo, RuntimeVersion};

#[cfg(feature = "cuda")]
pub use cuda::CudaProvider;

/// Provider for the framework compiled into this binary
pub fn default_provider() -> Box<dyn DeviceQueryProvider> {
    #[cfg(feature = "cuda")]
    {
        Box::new(CudaProvider::new())
    }

    #[cfg(not(feature = "cuda"))]
    {
        Box::new(NoCudaProvider::new())
    }
}

/// Check whether a CUDA-capable device can be used by this process
pub fn cuda_available() -> bool {
    default_provider().is_available()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(feature = "cuda"))]
    fn test_default_provider_without_cuda() {
        let provider = default_provider();
        assert!(!provider.is_available());
        assert!(!cuda_available());
    }

    #[test]
    fn test_default_provider_is_consistent() {
        // Holds with or without hardware
        let provider = default_provider();
        if provider.is_available() {
            assert!(provider.device_count().unwrap() > 0);
        }
    }
}
