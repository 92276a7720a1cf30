//! Startup device/browser telemetry.

mod client;
mod device;

pub use client::{TelemetryClient, TelemetryError};
pub use device::{browser, device_type, operating_system, DeviceInfo, DeviceType, ScreenMetrics};
