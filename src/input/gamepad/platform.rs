//! Device-path correlation through the platform's device manager
//!
//! SDL and the front-end name the same pad differently (hidraw node vs evdev
//! node). Both resolve to a sysfs path whose common prefix ends right before
//! `/input/` or `/hidraw`; that prefix is the correlation key.

use anyhow::{bail, Context, Result};
use std::process::Command;

/// Resolves a device node to its correlation key
pub trait PlatformQuery {
    fn resolve_device_path(&self, node: &str) -> Result<String>;
}

/// `udevadm`-backed resolver
#[derive(Debug, Default, Clone, Copy)]
pub struct Udevadm;

impl PlatformQuery for Udevadm {
    fn resolve_device_path(&self, node: &str) -> Result<String> {
        let output = Command::new("udevadm")
            .args(["info", "--query=path"])
            .arg(format!("--name={}", node))
            .output()
            .with_context(|| format!("Failed to run udevadm for {}", node))?;

        if !output.status.success() {
            bail!(
                "udevadm failed for {}: {}",
                node,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(correlation_key(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Trim a sysfs path down to the part shared by all of a device's nodes
pub fn correlation_key(sysfs_path: &str) -> String {
    let path = sysfs_path.trim();
    let path = path.split("/input/").next().unwrap_or(path);
    let path = path.split("/hidraw").next().unwrap_or(path);
    path.to_string()
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::HashMap;

    /// Fixed node -> sysfs path table
    #[derive(Debug, Default)]
    pub struct MockPlatform {
        paths: HashMap<String, String>,
    }

    impl MockPlatform {
        pub fn with(mut self, node: &str, sysfs_path: &str) -> Self {
            self.paths.insert(node.to_string(), sysfs_path.to_string());
            self
        }
    }

    impl PlatformQuery for MockPlatform {
        fn resolve_device_path(&self, node: &str) -> Result<String> {
            match self.paths.get(node) {
                Some(path) => Ok(correlation_key(path)),
                None => bail!("no such device: {}", node),
            }
        }
    }
}
