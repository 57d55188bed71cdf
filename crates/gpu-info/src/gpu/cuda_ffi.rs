//! CUDA driver and runtime API bindings for device queries
//!
//! Only the read-only query entry points are bound here. The driver API
//! (`libcuda`) supplies per-device attributes; the runtime API
//! (`libcudart`) supplies the linked runtime version.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_int, c_uint, size_t};

/// Driver API status code. Kept as a plain integer since the driver may
/// return codes newer than the ones named here.
pub type CUresult = c_int;

pub const CUDA_SUCCESS: CUresult = 0;
pub const CUDA_ERROR_NOT_INITIALIZED: CUresult = 3;
pub const CUDA_ERROR_NO_DEVICE: CUresult = 100;
pub const CUDA_ERROR_INVALID_DEVICE: CUresult = 101;

pub type CUdevice = c_int;

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub enum CUdevice_attribute {
    CU_DEVICE_ATTRIBUTE_MULTIPROCESSOR_COUNT = 16,
    CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MAJOR = 75,
    CU_DEVICE_ATTRIBUTE_COMPUTE_CAPABILITY_MINOR = 76,
}

pub type cudaError_t = c_int;

#[allow(non_upper_case_globals)]
pub const cudaSuccess: cudaError_t = 0;

/// Buffer length handed to `cuDeviceGetName`
pub const DEVICE_NAME_LEN: usize = 256;

#[link(name = "cuda")]
extern "C" {
    pub fn cuInit(flags: c_uint) -> CUresult;
    pub fn cuDeviceGetCount(count: *mut c_int) -> CUresult;
    pub fn cuDeviceGet(device: *mut CUdevice, ordinal: c_int) -> CUresult;
    pub fn cuDeviceGetName(name: *mut c_char, len: c_int, dev: CUdevice) -> CUresult;
    pub fn cuDeviceTotalMem_v2(bytes: *mut size_t, dev: CUdevice) -> CUresult;
    pub fn cuDeviceGetAttribute(
        pi: *mut c_int,
        attrib: CUdevice_attribute,
        dev: CUdevice,
    ) -> CUresult;
}

#[link(name = "cudart")]
extern "C" {
    pub fn cudaRuntimeGetVersion(runtimeVersion: *mut c_int) -> cudaError_t;
}

/// Return early with `QueryError::Cuda` unless a driver call succeeded
macro_rules! cu_check {
    ($name:literal, $call:expr) => {{
        let result = $call;
        if result != $crate::gpu::cuda_ffi::CUDA_SUCCESS {
            tracing::debug!("{} returned {}", $name, result);
            return Err($crate::error::QueryError::Cuda {
                call: $name,
                code: result,
            });
        }
    }};
}

pub(crate) use cu_check;
