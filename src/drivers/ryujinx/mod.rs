//! Ryujinx driver
//!
//! Edits `Config.json` in place: the controller-related keys are replaced,
//! every other key of an existing file is kept as is.

pub mod layout;
pub mod scheme;

use super::{base_command, with_common_env, Driver, GenerationContext};
use crate::config::SwitchOptions;
use crate::launch::LaunchCommand;
use crate::paths::AppPaths;
use anyhow::{bail, Context, Result};
use scheme::InputConfig;
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing::{debug, info, warn};

/// Player slots Ryujinx exposes (handheld is not auto-configured)
pub const RYUJINX_PLAYERS: usize = 8;

pub struct RyujinxDriver;

impl RyujinxDriver {
    fn load(path: &Path) -> Result<Map<String, Value>> {
        if !path.exists() {
            return Ok(Map::new());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let value: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        match value {
            Value::Object(map) => Ok(map),
            _ => bail!("{} is not a JSON object", path.display()),
        }
    }

    /// Keys owned by the generator regardless of auto-configuration
    fn write_globals(data: &mut Map<String, Value>) {
        data.insert("enable_keyboard".into(), Value::Bool(false));
        data.insert("enable_mouse".into(), Value::Bool(false));
        data.insert("keyboard_config".into(), json!([]));
        data.insert("controller_config".into(), json!([]));
        data.insert(
            "hotkeys".into(),
            json!({
                "toggle_vsync": "Tab",
                "screenshot": "F8",
                "show_ui": "F4",
                "pause": "F5",
                "toggle_mute": "F2",
                "res_scale_up": "Unbound",
                "res_scale_down": "Unbound",
            }),
        );
    }

    /// `input_config` entries for the planned slots
    ///
    /// Unmatched slots and slots whose GUID cannot be turned into a Ryujinx
    /// id get no entry, which Ryujinx reads as a disconnected player.
    pub fn input_config(ctx: &GenerationContext<'_>) -> Result<Vec<Value>> {
        let rumble = ctx.options.ryu_enable_rumble;
        let mut entries = Vec::new();

        for slot in ctx.slots {
            match InputConfig::for_slot(slot, rumble) {
                Ok(Some(record)) => {
                    if ctx.debug {
                        debug!("{} {} {}", record.player_index, record.controller_type, record.id);
                    }
                    entries.push(serde_json::to_value(&record)?);
                }
                Ok(None) => debug!("Player{}: no controller entry", slot.slot + 1),
                Err(e) => warn!("⚠️  Player{}: {:#}", slot.slot + 1, e),
            }
        }

        Ok(entries)
    }

    fn save(path: &Path, data: &Map<String, Value>) -> Result<()> {
        AppPaths::ensure_parent(path)?;
        let text = serde_json::to_string_pretty(data)?;
        std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl Driver for RyujinxDriver {
    fn name(&self) -> &str {
        "ryujinx"
    }

    fn max_players(&self) -> usize {
        RYUJINX_PLAYERS
    }

    fn auto_controller_config(&self, options: &SwitchOptions) -> bool {
        options.ryu_auto_controller_config
    }

    fn write_config(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let path = ctx.paths.ryujinx_config();
        let mut data = Self::load(&path)?;

        Self::write_globals(&mut data);

        if self.auto_controller_config(ctx.options) {
            let entries = Self::input_config(ctx)?;
            info!("🎮 Ryujinx: {} controller(s) configured", entries.len());
            data.insert("input_config".into(), Value::Array(entries));
        } else {
            info!("📋 Ryujinx: automatic controller configuration disabled");
        }

        Self::save(&ctx.paths.ryujinx_backup(), &data)?;
        Self::save(&path, &data)?;
        info!("✅ Wrote {}", path.display());
        Ok(())
    }

    fn command(&self, ctx: &GenerationContext<'_>) -> Result<LaunchCommand> {
        let mut cmd = base_command(ctx);
        // No Config.json yet: first start, let Ryujinx run its own setup
        if ctx.paths.ryujinx_config().exists() {
            cmd = cmd.arg(ctx.request.rom.to_string_lossy());
        }

        let cmd = cmd
            .env("XDG_CONFIG_HOME", ctx.paths.configs_dir().to_string_lossy())
            .env("XDG_CACHE_HOME", ctx.paths.cache_dir().to_string_lossy());
        Ok(with_common_env(cmd, ctx))
    }
}
