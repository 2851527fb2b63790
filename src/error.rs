//! Error taxonomy for device enumeration
//!
//! Everything else in the crate reports through `anyhow`; enumeration gets a
//! typed error because it is the one failure that aborts a launch outright.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("SDL game controller subsystem failed to initialize: {0}")]
    SubsystemInit(String),

    #[error("controller enumeration is unavailable (built without the `sdl` feature and no device list given)")]
    Unavailable,

    #[error("failed to read device list {path}")]
    DeviceListIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid device list {path}")]
    DeviceListParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
