//! Device report rendering
//!
//! [`DeviceReporter`] walks the visible devices in ascending ordinal order
//! and writes a fixed set of fields for each. Text output is written line
//! by line as each query returns; JSON output is written once every query
//! has succeeded.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::{QueryError, ReportError};
use crate::gpu::{bytes_to_gib, DeviceInfo, DeviceQueryProvider};

/// Printed when no CUDA-capable device is usable
pub const NO_GPU_MESSAGE: &str = "No GPU available. CUDA is not detected.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("Invalid output format: {other}")),
        }
    }
}

/// Everything one invocation learned about the visible devices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceReport {
    pub cuda_available: bool,
    pub device_count: u32,
    pub devices: Vec<DeviceInfo>,
}

impl DeviceReport {
    pub fn unavailable() -> Self {
        Self {
            cuda_available: false,
            device_count: 0,
            devices: Vec::new(),
        }
    }
}

pub struct DeviceReporter<P> {
    provider: P,
}

impl<P: DeviceQueryProvider> DeviceReporter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Write the report in the requested format
    pub fn write<W: Write>(&self, format: OutputFormat, out: &mut W) -> Result<(), ReportError> {
        match format {
            OutputFormat::Text => self.report(out),
            OutputFormat::Json => self.report_json(out),
        }
    }

    /// Write the human-readable report
    pub fn report<W: Write>(&self, out: &mut W) -> Result<(), ReportError> {
        if !self.provider.is_available() {
            debug!("No CUDA device available");
            writeln!(out, "{NO_GPU_MESSAGE}")?;
            out.flush()?;
            return Ok(());
        }

        let count = self.provider.device_count()?;
        info!("Reporting {} CUDA device(s)", count);
        writeln!(out, "Number of GPUs available: {count}")?;

        for i in 0..count {
            writeln!(out, "\nGPU {i} Details:")?;
            writeln!(out, "  Name: {}", self.provider.device_name(i)?)?;
            writeln!(
                out,
                "  Compute Capability: {}",
                self.provider.compute_capability(i)?
            )?;
            writeln!(
                out,
                "  Total Memory: {:.2} GB",
                bytes_to_gib(self.provider.total_memory(i)?)
            )?;
            // Process-wide value, queried once per device
            writeln!(out, "  CUDA Version: {}", self.provider.runtime_version()?)?;
            writeln!(
                out,
                "  Device ID: {} Multiprocessors",
                self.provider.multiprocessor_count(i)?
            )?;
        }

        out.flush()?;
        Ok(())
    }

    /// Write the report as a pretty-printed JSON document
    pub fn report_json<W: Write>(&self, out: &mut W) -> Result<(), ReportError> {
        let report = self.collect()?;
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    /// Query every visible device, in ordinal order
    pub fn collect(&self) -> Result<DeviceReport, QueryError> {
        if !self.provider.is_available() {
            debug!("No CUDA device available");
            return Ok(DeviceReport::unavailable());
        }

        let device_count = self.provider.device_count()?;
        info!("Reporting {} CUDA device(s)", device_count);

        let devices = (0..device_count)
            .map(|i| self.query_device(i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DeviceReport {
            cuda_available: true,
            device_count,
            devices,
        })
    }

    /// Build one [`DeviceInfo`], issuing queries in the same order as the text report
    pub fn query_device(&self, index: u32) -> Result<DeviceInfo, QueryError> {
        let name = self.provider.device_name(index)?;
        let compute_capability = self.provider.compute_capability(index)?;
        let total_memory_bytes = self.provider.total_memory(index)?;
        let runtime_version = self.provider.runtime_version()?;
        let multiprocessor_count = self.provider.multiprocessor_count(index)?;

        Ok(DeviceInfo {
            index,
            name,
            compute_capability,
            total_memory_bytes,
            multiprocessor_count,
            runtime_version,
        })
    }
}
