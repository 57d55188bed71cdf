use serde::{Deserialize, Serialize};
use std::fmt;

const BYTES_PER_GIB: f64 = (1u64 << 30) as f64;

/// Snapshot of one CUDA device, built fresh from provider queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub index: u32,
    pub name: String,
    pub compute_capability: ComputeCapability,
    pub total_memory_bytes: u64,
    pub multiprocessor_count: u32,
    pub runtime_version: RuntimeVersion,
}

impl DeviceInfo {
    pub fn total_memory_gib(&self) -> f64 {
        bytes_to_gib(self.total_memory_bytes)
    }
}

/// Convert a byte count to gibibytes (2^30 bytes)
pub fn bytes_to_gib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GIB
}

/// SM feature tier of a device, e.g. `(8, 6)` for Ampere GA10x
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComputeCapability {
    pub major: u32,
    pub minor: u32,
}

impl ComputeCapability {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ComputeCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.major, self.minor)
    }
}

/// Version of the CUDA runtime linked into the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RuntimeVersion {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeVersion {
    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Decode CUDA's integer form `1000 * major + 10 * minor`
    pub fn from_encoded(version: u32) -> Self {
        Self {
            major: version / 1000,
            minor: (version % 1000) / 10,
        }
    }
}

impl fmt::Display for RuntimeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_capability_display() {
        assert_eq!(ComputeCapability::new(8, 6).to_string(), "(8, 6)");
        assert_eq!(ComputeCapability::new(10, 0).to_string(), "(10, 0)");
    }

    #[test]
    fn test_runtime_version_decoding() {
        assert_eq!(RuntimeVersion::from_encoded(12010), RuntimeVersion::new(12, 1));
        assert_eq!(RuntimeVersion::from_encoded(11080).to_string(), "11.8");
        assert_eq!(RuntimeVersion::from_encoded(12040).to_string(), "12.4");
        assert_eq!(RuntimeVersion::from_encoded(10020).to_string(), "10.2");
    }

    #[test]
    fn test_memory_conversion() {
        assert_eq!(bytes_to_gib(8 * (1 << 30)), 8.0);
        assert_eq!(bytes_to_gib(1 << 29), 0.5);
        assert_eq!(bytes_to_gib(0), 0.0);
    }

    #[test]
    fn test_device_info_memory_gib() {
        let device = DeviceInfo {
            index: 0,
            name: "NVIDIA A100-SXM4-80GB".to_string(),
            compute_capability: ComputeCapability::new(8, 0),
            total_memory_bytes: 85_899_345_920,
            multiprocessor_count: 108,
            runtime_version: RuntimeVersion::new(12, 1),
        };

        assert_eq!(device.total_memory_gib(), 80.0);
    }

    #[test]
    fn test_serialization() {
        let device = DeviceInfo {
            index: 1,
            name: "Test GPU".to_string(),
            compute_capability: ComputeCapability::new(9, 0),
            total_memory_bytes: 1024,
            multiprocessor_count: 132,
            runtime_version: RuntimeVersion::new(12, 4),
        };

        let json = serde_json::to_string(&device).unwrap();
        let deserialized: DeviceInfo = serde_json::from_str(&json).unwrap();

        assert_eq!(device, deserialized);
        assert!(json.contains("\"compute_capability\":{\"major\":9,\"minor\":0}"));
    }
}
