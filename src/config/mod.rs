//! Launch request and typed switch options
//!
//! The front-end describes a launch as a YAML document: which emulator, which
//! ROM, a flat map of string options and the controllers assigned to each
//! player. Options are converted once into [`SwitchOptions`] so the rest of
//! the crate never looks up a string key.

use crate::input::gamepad::layout::FormFactor;
use crate::input::gamepad::logical::LogicalController;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Highest player number an override can address
pub const MAX_PLAYERS: usize = 9;

/// Emulator build to launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Emulator {
    Yuzu,
    YuzuEarlyAccess,
    Ryujinx,
    RyujinxAvalonia,
    RyujinxLdn,
}

impl Emulator {
    pub fn is_yuzu(self) -> bool {
        matches!(self, Emulator::Yuzu | Emulator::YuzuEarlyAccess)
    }

    /// AppImage file name under the switch directory
    pub fn appimage(self) -> &'static str {
        match self {
            Emulator::Yuzu => "yuzu.AppImage",
            Emulator::YuzuEarlyAccess => "yuzuEA.AppImage",
            Emulator::Ryujinx => "Ryujinx.AppImage",
            Emulator::RyujinxAvalonia => "Ryujinx-Avalonia.AppImage",
            Emulator::RyujinxLdn => "Ryujinx-LDN.AppImage",
        }
    }
}

/// One launch as requested by the front-end
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LaunchRequest {
    pub emulator: Emulator,
    pub rom: PathBuf,
    #[serde(default)]
    pub options: HashMap<String, String>,
    #[serde(default)]
    pub controllers: Vec<LogicalController>,
}

impl LaunchRequest {
    /// Load and validate a launch request
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read launch request: {}", path.display()))?;

        let request: LaunchRequest = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse launch request: {}", path.display()))?;

        request.validate()?;

        Ok(request)
    }

    /// Validate player numbering
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for controller in &self.controllers {
            if controller.player == 0 {
                anyhow::bail!("Player numbers start at 1 (controller '{}')", controller.real_name);
            }
            if !seen.insert(controller.player) {
                anyhow::bail!("Player {} is assigned more than once", controller.player);
            }
        }
        Ok(())
    }

    /// Controllers in player order
    pub fn players(&self) -> Vec<&LogicalController> {
        let mut players: Vec<&LogicalController> = self.controllers.iter().collect();
        players.sort_by_key(|c| c.player);
        players
    }

    pub fn switch_options(&self) -> SwitchOptions {
        SwitchOptions::from_map(&self.options)
    }
}

/// Controller-related options with their defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchOptions {
    pub yuzu_auto_controller_config: bool,
    pub yuzu_enable_rumble: bool,
    pub yuzu_controller_applet: bool,
    pub ryu_auto_controller_config: bool,
    pub ryu_enable_rumble: bool,
    /// Per-slot form factor overrides, keyed by 1-based slot number
    pub pad_overrides: BTreeMap<usize, FormFactor>,
    /// GUIDs bound from the front-end's own inputs instead of SDL binds
    pub frontend_guids: Vec<String>,
    /// GUIDs whose reported face layout is backwards
    pub reversed_guids: Vec<String>,
}

impl Default for SwitchOptions {
    fn default() -> Self {
        Self {
            yuzu_auto_controller_config: default_true(),
            yuzu_enable_rumble: default_true(),
            yuzu_controller_applet: false,
            ryu_auto_controller_config: default_true(),
            ryu_enable_rumble: default_true(),
            pad_overrides: BTreeMap::new(),
            frontend_guids: default_frontend_guids(),
            reversed_guids: default_reversed_guids(),
        }
    }
}

impl SwitchOptions {
    /// Build typed options from the front-end's flat string map
    ///
    /// Unknown or malformed values fall back to the default with a warning.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut options = Self::default();

        let flag = |key: &str, default: bool| -> bool {
            match map.get(key) {
                None => default,
                Some(value) => parse_flag(value).unwrap_or_else(|| {
                    warn!("⚠️  Ignoring invalid value '{}' for {}", value, key);
                    default
                }),
            }
        };

        options.yuzu_auto_controller_config =
            flag("yuzu_auto_controller_config", options.yuzu_auto_controller_config);
        options.yuzu_enable_rumble = flag("yuzu_enable_rumble", options.yuzu_enable_rumble);
        options.yuzu_controller_applet =
            flag("yuzu_controller_applet", options.yuzu_controller_applet);
        options.ryu_auto_controller_config =
            flag("ryu_auto_controller_config", options.ryu_auto_controller_config);
        options.ryu_enable_rumble = flag("ryu_enable_rumble", options.ryu_enable_rumble);

        for slot in 1..=MAX_PLAYERS {
            let key = format!("p{}_pad", slot);
            if let Some(value) = map.get(&key) {
                match value.parse::<FormFactor>() {
                    Ok(form) => {
                        options.pad_overrides.insert(slot, form);
                    }
                    Err(e) => warn!("⚠️  Ignoring {}: {}", key, e),
                }
            }
        }

        extend_guid_list(&mut options.frontend_guids, map.get("frontend_guids"));
        extend_guid_list(&mut options.reversed_guids, map.get("reversed_guids"));

        options
    }

    /// Override for a 1-based slot number
    pub fn pad_override(&self, slot: usize) -> Option<FormFactor> {
        self.pad_overrides.get(&slot).copied()
    }

    pub fn is_frontend_guid(&self, guid: &str) -> bool {
        self.frontend_guids.iter().any(|g| g == guid)
    }

    pub fn is_reversed_guid(&self, guid: &str) -> bool {
        self.reversed_guids.iter().any(|g| g == guid)
    }
}

/// Front-end boolean spelling: `1`/`0`, `true`/`false`
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn extend_guid_list(list: &mut Vec<String>, extra: Option<&String>) {
    let Some(extra) = extra else { return };
    for guid in extra.split(',').map(str::trim).filter(|g| !g.is_empty()) {
        if !list.iter().any(|g| g == guid) {
            list.push(guid.to_string());
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_frontend_guids() -> Vec<String> {
    vec![
        "050000005e0400008e02000030110000".to_string(),
        "030000005e0400008e02000014010000".to_string(),
        "0000000053696e64656e206c69676800".to_string(),
    ]
}
fn default_reversed_guids() -> Vec<String> {
    vec!["03000000c82d00000631000014010000".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_options_missing() {
        let options = SwitchOptions::from_map(&HashMap::new());
        assert_eq!(options, SwitchOptions::default());
        assert!(options.yuzu_auto_controller_config);
        assert!(options.yuzu_enable_rumble);
        assert!(!options.yuzu_controller_applet);
        assert!(options.is_frontend_guid("030000005e0400008e02000014010000"));
        assert!(options.is_reversed_guid("03000000c82d00000631000014010000"));
    }

    #[test]
    fn test_flags_parsed() {
        let options = SwitchOptions::from_map(&map(&[
            ("yuzu_auto_controller_config", "0"),
            ("yuzu_enable_rumble", "False"),
            ("yuzu_controller_applet", "1"),
            ("ryu_enable_rumble", "garbage"),
        ]));

        assert!(!options.yuzu_auto_controller_config);
        assert!(!options.yuzu_enable_rumble);
        assert!(options.yuzu_controller_applet);
        assert!(options.ryu_enable_rumble);
    }

    #[test]
    fn test_pad_overrides_accept_both_vocabularies() {
        let options = SwitchOptions::from_map(&map(&[
            ("p1_pad", "2"),
            ("p2_pad", "JoyconRight"),
            ("p3_pad", "Handheld"),
            ("p4_pad", "bogus"),
        ]));

        assert_eq!(options.pad_override(1), Some(FormFactor::JoyconLeft));
        assert_eq!(options.pad_override(2), Some(FormFactor::JoyconRight));
        assert_eq!(options.pad_override(3), Some(FormFactor::Handheld));
        assert_eq!(options.pad_override(4), None);
        assert_eq!(options.pad_override(9), None);
    }

    #[test]
    fn test_guid_lists_extended() {
        let options = SwitchOptions::from_map(&map(&[
            ("frontend_guids", "aaaa, bbbb,,030000005e0400008e02000014010000"),
            ("reversed_guids", "cccc"),
        ]));

        assert_eq!(options.frontend_guids.len(), 5);
        assert!(options.is_frontend_guid("bbbb"));
        assert!(options.is_reversed_guid("cccc"));
        assert!(options.is_reversed_guid("03000000c82d00000631000014010000"));
    }

    #[test]
    fn test_load_launch_request() {
        let yaml = r#"
emulator: yuzu-early-access
rom: /userdata/roms/switch/game.nsp
options:
  p1_pad: "0"
controllers:
  - player: 2
    guid: 030000005e0400008e02000014010000
    dev: /dev/input/event4
    realName: Xbox 360 Controller
  - player: 1
    guid: 050000007e0500000920000001800000
    device_path: /dev/input/event7
    real_name: Nintendo Switch Combined Joy-Cons
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let request = LaunchRequest::load(file.path()).unwrap();

        assert_eq!(request.emulator, Emulator::YuzuEarlyAccess);
        assert!(request.emulator.is_yuzu());
        assert_eq!(request.emulator.appimage(), "yuzuEA.AppImage");
        let players: Vec<u32> = request.players().iter().map(|c| c.player).collect();
        assert_eq!(players, vec![1, 2]);
        assert_eq!(
            request.switch_options().pad_override(1),
            Some(FormFactor::ProController)
        );
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let yaml = r#"
emulator: ryujinx
rom: game.nsp
controllers:
  - { player: 1, guid: a, real_name: A }
  - { player: 1, guid: b, real_name: B }
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let err = LaunchRequest::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_missing_request_file() {
        let err = LaunchRequest::load(Path::new("/nonexistent/request.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read launch request"));
    }
}
