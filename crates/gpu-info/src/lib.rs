pub mod cli;
pub mod error;
pub mod gpu;
pub mod report;

// Re-export commonly used items for convenience
pub use error::{QueryError, ReportError};
pub use gpu::{
    cuda_available, default_provider, ComputeCapability, DeviceInfo, DeviceQueryProvider,
    NoCudaProvider, RuntimeVersion,
};
pub use report::{DeviceReport, DeviceReporter, OutputFormat, NO_GPU_MESSAGE};

#[cfg(feature = "cuda")]
pub use gpu::CudaProvider;
