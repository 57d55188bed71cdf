//! Device queries backed by the CUDA driver and runtime libraries

use std::ffi::CStr;

use libc::{c_char, c_int, size_t};
use tracing::debug;

use super::cuda_ffi::{self, cu_check, CUdevice, CUdevice_attribute};
use super::provider::DeviceQueryProvider;
use super::types::{ComputeCapability, RuntimeVersion};
use crate::error::{QueryError, Result};

/// Queries the CUDA driver for every call
///
/// Visibility follows the driver, so `CUDA_VISIBLE_DEVICES` and friends
/// apply without this type reading them.
#[derive(Debug, Default, Clone, Copy)]
pub struct CudaProvider;

impl CudaProvider {
    pub fn new() -> Self {
        Self
    }

    fn init(&self) -> Result<()> {
        // cuInit is idempotent; repeated calls after success are no-ops
        cu_check!("cuInit", unsafe { cuda_ffi::cuInit(0) });
        Ok(())
    }

    fn device(&self, index: u32) -> Result<CUdevice> {
        let count = self.device_count()?;
        if index >= count {
            return Err(QueryError::InvalidDevice { index, count });
        }

        let mut device: CUdevice = 0;
        cu_check!("cuDeviceGet", unsafe {
            cuda_ffi::cuDeviceGet(&mut device, index as c_int)
        });
        Ok(device)
    }

    fn attribute(&self, index: u32, attribute: CUdevice_attribute) -> Result<u32> {
        let device = self.device(index)?;
        let mut value: c_int = 0;
        cu_check!("cuDeviceGetAttribute", unsafe {
            cuda_ffi::cuDeviceGetAttribute(&mut value, attribute, device)
        });
        debug!("GPU {} attribute {:?} = {}", index, attribute, value);
        Ok(value.max(0) as u32)
    }
}

impl DeviceQueryProvider for CudaProvider {
    fn is_available(&self) -> bool {
        match self.device_count() {
            Ok(count) => count > 0,
            Err(QueryError::Cuda { call, code }) if code == cuda_ffi::CUDA_ERROR_NO_DEVICE => {
                debug!("{} reported no CUDA device", call);
                false
            }
            Err(e) => {
                debug!("CUDA unavailable: {}", e);
                false
            }
        }
    }

    fn device_count(&self) -> Result<u32> {
        self.init()?;
        let mut count: c_int = 0;
        cu_check!("cuDeviceGetCount", unsafe {
            cuda_ffi::cuDeviceGetCount(&mut count)
        });
        debug!("cuDeviceGetCount: {} device(s)", count);
        Ok(count.max(0) as u32)
    }

    fn device_name(&self, index: u32) -> Result<String> {
        let device = self.device(index)?;
        let mut buffer = [0 as c_char; cuda_ffi::DEVICE_NAME_LEN];
        cu_check!("cuDeviceGetName", unsafe {
            cuda_ffi::cuDeviceGetName(buffer.as_mut_ptr(), buffer.len() as c_int, device)
        });
        // Names longer than the buffer are truncated without a terminator
        buffer[cuda_ffi::DEVICE_NAME_LEN - 1] = 0;
        let name = unsafe { CStr::from_ptr(buffer.as_ptr()) }
            .to_string_lossy()
            .into_owned();
        debug!("GPU {} name: {}", index, name);
        Ok(name)
    }

    fn compute_capability(&self, index: u32) -> Result<ComputeCapability> {
        let major = self.attribute(
            index,
            CUdevice_attribute::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR,
        )?;
        let minor = self.attribute(
            index,
            CUdevice_attribute::CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR,
        )?;
        Ok(ComputeCapability::new(major, minor))
    }

    fn total_memory(&self, index: u32) -> Result<u64> {
        let device = self.device(index)?;
        let mut bytes: size_t = 0;
        cu_check!("cuDeviceTotalMem_v2", unsafe {
            cuda_ffi::cuDeviceTotalMem_v2(&mut bytes, device)
        });
        debug!("GPU {} total memory: {} bytes", index, bytes);
        Ok(bytes as u64)
    }

    fn multiprocessor_count(&self, index: u32) -> Result<u32> {
        self.attribute(
            index,
            CUdevice_attribute::CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT,
        )
    }

    fn runtime_version(&self) -> Result<RuntimeVersion> {
        let mut version: c_int = 0;
        let result = unsafe { cuda_ffi::cudaRuntimeGetVersion(&mut version) };
        if result != cuda_ffi::cudaSuccess {
            return Err(QueryError::Cuda {
                call: "cudaRuntimeGetVersion",
                code: result,
            });
        }
        debug!("CUDA runtime version: {}", version);
        Ok(RuntimeVersion::from_encoded(version.max(0) as u32))
    }
}
