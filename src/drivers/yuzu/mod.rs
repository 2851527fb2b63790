//! yuzu driver
//!
//! Writes `qt-config.ini`: global rumble and controller-applet settings,
//! then one scheme per planned slot and keyboard fillers for the remaining
//! player slots.

pub mod binding;
pub mod engine;
pub mod layout;
pub mod scheme;

use super::{base_command, with_common_env, Driver, GenerationContext};
use crate::config::SwitchOptions;
use crate::ini::QtIni;
use crate::launch::LaunchCommand;
use anyhow::{Context, Result};
use scheme::{assign_ports, PlayerScheme, CONTROLS};
use tracing::{debug, info};

/// Player sections yuzu reads (8 players + handheld)
pub const YUZU_PLAYERS: usize = 9;

const LIBRARY_APPLET: &str = "LibraryApplet";

pub struct YuzuDriver;

impl YuzuDriver {
    /// Settings written regardless of the auto-configuration switch
    fn write_globals(ini: &mut QtIni, options: &SwitchOptions) {
        let rumble = options.yuzu_enable_rumble.to_string();
        ini.set(CONTROLS, "vibration_enabled", rumble.clone());
        ini.set(CONTROLS, "vibration_enabled\\default", rumble);

        let applet = options.yuzu_controller_applet.to_string();
        ini.set(LIBRARY_APPLET, "controller_applet_mode", applet.clone());
        ini.set(LIBRARY_APPLET, "controller_applet_mode\\default", applet);
    }

    /// Fill `ini` with the player sections for the planned slots
    ///
    /// # Returns
    /// Number of player sections written from planned slots
    pub fn write_players(ini: &mut QtIni, ctx: &GenerationContext<'_>) -> usize {
        let ports = assign_ports(ctx.slots);
        let vibration = ctx.options.yuzu_enable_rumble;

        for (slot, port) in ctx.slots.iter().zip(ports) {
            let scheme = PlayerScheme::for_slot(slot, port, vibration);
            if ctx.debug {
                for (button, binding) in &scheme.buttons {
                    debug!("player_{} {} = {}", scheme.player, button.key(), binding);
                }
                for (stick, binding) in &scheme.sticks {
                    debug!("player_{} {} = {}", scheme.player, stick.key(), binding);
                }
            }
            scheme.write(ini);
        }

        let first_free = ctx.slots.iter().map(|s| s.slot + 1).max().unwrap_or(0);
        for player in first_free..YUZU_PLAYERS {
            PlayerScheme::keyboard(player).write(ini);
        }

        ctx.slots.len()
    }
}

impl Driver for YuzuDriver {
    fn name(&self) -> &str {
        "yuzu"
    }

    fn max_players(&self) -> usize {
        YUZU_PLAYERS
    }

    fn auto_controller_config(&self, options: &SwitchOptions) -> bool {
        options.yuzu_auto_controller_config
    }

    fn write_config(&self, ctx: &GenerationContext<'_>) -> Result<()> {
        let path = ctx.paths.yuzu_config();

        if path.exists() {
            let backup = ctx.paths.yuzu_backup();
            std::fs::copy(&path, &backup)
                .with_context(|| format!("Failed to back up {}", path.display()))?;
            debug!("Backed up {} to {}", path.display(), backup.display());
        }

        let mut ini = QtIni::load(&path)?;
        Self::write_globals(&mut ini, ctx.options);

        if self.auto_controller_config(ctx.options) {
            let written = Self::write_players(&mut ini, ctx);
            info!("🎮 yuzu: {} player(s) configured", written);
        } else {
            info!("📋 yuzu: automatic controller configuration disabled");
        }

        ini.save(&path)?;
        info!("✅ Wrote {}", path.display());
        Ok(())
    }

    fn command(&self, ctx: &GenerationContext<'_>) -> Result<LaunchCommand> {
        let cmd = base_command(ctx)
            .arg("-f")
            .arg("-g")
            .arg(ctx.request.rom.to_string_lossy());
        Ok(with_common_env(cmd, ctx))
    }
}
