//! Filesystem layout of a batocera-style userdata root.
//!
//! Everything the generator reads or writes lives under one root:
//!
//! - `system/switch/` holds the emulator AppImages
//! - `system/configs/{yuzu,Ryujinx}/` hold the emulator configuration
//! - `system/cache/` is handed to the emulators as `XDG_CACHE_HOME`
//! - `system/switch/configgen/debugcontrollers.txt` toggles verbose dumps
//!
//! On a batocera system the root is `/userdata`. Elsewhere it falls back to a
//! directory under the user's data dir so the tool can be tried safely.

use crate::config::Emulator;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Root used on batocera systems
const USERDATA: &str = "/userdata";

/// Directory name for the fallback root
const APP_NAME: &str = "switch-configgen";

#[derive(Debug, Clone)]
pub struct AppPaths {
    /// userdata root
    pub root: PathBuf,
}

impl AppPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Detect the userdata root
    ///
    /// An explicit root wins; otherwise `/userdata` when it exists, then
    /// `<data dir>/switch-configgen`.
    pub fn detect(explicit: Option<&Path>) -> Self {
        if let Some(root) = explicit {
            return Self::new(root);
        }

        let userdata = PathBuf::from(USERDATA);
        if userdata.is_dir() {
            return Self::new(userdata);
        }

        let fallback = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME);
        debug!("No {} found, using {}", USERDATA, fallback.display());
        Self::new(fallback)
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.root.join("system").join("configs")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("system").join("cache")
    }

    pub fn switch_dir(&self) -> PathBuf {
        self.root.join("system").join("switch")
    }

    pub fn appimage(&self, emulator: Emulator) -> PathBuf {
        self.switch_dir().join(emulator.appimage())
    }

    pub fn yuzu_config(&self) -> PathBuf {
        self.configs_dir().join("yuzu").join("qt-config.ini")
    }

    pub fn yuzu_backup(&self) -> PathBuf {
        self.configs_dir().join("yuzu").join("before-qt-config.ini")
    }

    pub fn ryujinx_config(&self) -> PathBuf {
        self.configs_dir().join("Ryujinx").join("Config.json")
    }

    pub fn ryujinx_backup(&self) -> PathBuf {
        self.configs_dir().join("Ryujinx").join("BeforeRyu.json")
    }

    pub fn debug_flag(&self) -> PathBuf {
        self.switch_dir()
            .join("configgen")
            .join("debugcontrollers.txt")
    }

    /// Whether verbose controller dumps are requested
    ///
    /// The flag file's first line must be non-empty and not `0`/`false`.
    pub fn debug_controllers_enabled(&self) -> bool {
        let Ok(content) = std::fs::read_to_string(self.debug_flag()) else {
            return false;
        };
        let first = content.lines().next().unwrap_or("").trim();
        !(first.is_empty() || first == "0" || first.eq_ignore_ascii_case("false"))
    }

    /// Create the parent directory of a config file
    pub fn ensure_parent(path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                debug!("Creating directory: {}", parent.display());
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layout_under_root() {
        let paths = AppPaths::new("/userdata");

        assert_eq!(
            paths.yuzu_config(),
            PathBuf::from("/userdata/system/configs/yuzu/qt-config.ini")
        );
        assert_eq!(
            paths.ryujinx_backup(),
            PathBuf::from("/userdata/system/configs/Ryujinx/BeforeRyu.json")
        );
        assert_eq!(
            paths.appimage(Emulator::RyujinxLdn),
            PathBuf::from("/userdata/system/switch/Ryujinx-LDN.AppImage")
        );
        assert_eq!(
            paths.debug_flag(),
            PathBuf::from("/userdata/system/switch/configgen/debugcontrollers.txt")
        );
    }

    #[test]
    fn test_explicit_root_wins() {
        let paths = AppPaths::detect(Some(Path::new("/tmp/root")));
        assert_eq!(paths.root, PathBuf::from("/tmp/root"));
    }

    #[test]
    fn test_debug_flag() {
        let dir = tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        assert!(!paths.debug_controllers_enabled());

        AppPaths::ensure_parent(&paths.debug_flag()).unwrap();
        std::fs::write(paths.debug_flag(), "\n").unwrap();
        assert!(!paths.debug_controllers_enabled());

        std::fs::write(paths.debug_flag(), "0\n").unwrap();
        assert!(!paths.debug_controllers_enabled());

        std::fs::write(paths.debug_flag(), "yes\n").unwrap();
        assert!(paths.debug_controllers_enabled());
    }
}
