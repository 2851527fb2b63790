//! Physical device enumeration providers
//!
//! Production builds enumerate through SDL (feature `sdl`). A YAML device
//! list can stand in for SDL, which is how tests and `--devices` dry runs
//! work without hardware.

use super::device::PhysicalDevice;
use super::platform::PlatformQuery;
use crate::error::EnumerationError;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Produces the list of physical controllers present right now
pub trait DeviceEnumerator {
    fn enumerate(
        &self,
        platform: &dyn PlatformQuery,
    ) -> Result<Vec<PhysicalDevice>, EnumerationError>;
}

/// Fixed device list
#[derive(Debug, Default, Clone)]
pub struct StaticEnumerator {
    devices: Vec<PhysicalDevice>,
}

impl StaticEnumerator {
    pub fn new(devices: Vec<PhysicalDevice>) -> Self {
        Self { devices }
    }
}

impl DeviceEnumerator for StaticEnumerator {
    fn enumerate(
        &self,
        _platform: &dyn PlatformQuery,
    ) -> Result<Vec<PhysicalDevice>, EnumerationError> {
        Ok(self.devices.clone())
    }
}

/// Device list read from a YAML file at enumeration time
#[derive(Debug, Clone)]
pub struct DeviceListEnumerator {
    path: PathBuf,
}

impl DeviceListEnumerator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(path: &Path) -> Result<Vec<PhysicalDevice>, EnumerationError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| EnumerationError::DeviceListIo {
                path: path.to_path_buf(),
                source,
            })?;

        serde_yaml::from_str(&content).map_err(|source| EnumerationError::DeviceListParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DeviceEnumerator for DeviceListEnumerator {
    fn enumerate(
        &self,
        _platform: &dyn PlatformQuery,
    ) -> Result<Vec<PhysicalDevice>, EnumerationError> {
        let devices = Self::load(&self.path)?;
        info!(
            "Loaded {} device(s) from {}",
            devices.len(),
            self.path.display()
        );
        for device in &devices {
            debug!("  {} [{}] type {} at {}", device.name, device.guid, device.pad_type, device.path);
        }
        Ok(devices)
    }
}

/// Stand-in used when SDL support is compiled out
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableEnumerator;

impl DeviceEnumerator for UnavailableEnumerator {
    fn enumerate(
        &self,
        _platform: &dyn PlatformQuery,
    ) -> Result<Vec<PhysicalDevice>, EnumerationError> {
        Err(EnumerationError::Unavailable)
    }
}

/// Pick the enumerator for this build
///
/// # Arguments
/// * `device_list` - Optional YAML device list overriding live enumeration
pub fn default_enumerator(device_list: Option<&Path>) -> Box<dyn DeviceEnumerator> {
    if let Some(path) = device_list {
        return Box::new(DeviceListEnumerator::new(path));
    }

    #[cfg(feature = "sdl")]
    {
        Box::new(super::sdl::SdlEnumerator)
    }

    #[cfg(not(feature = "sdl"))]
    {
        Box::new(UnavailableEnumerator)
    }
}
