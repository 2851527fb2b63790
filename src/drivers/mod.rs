//! Emulator drivers (yuzu, Ryujinx)
//!
//! A driver owns one emulator's configuration file format and its command
//! line. The slot plan is computed once by the caller and handed to the
//! driver through a [`GenerationContext`].

pub mod ryujinx;
pub mod yuzu;

use crate::config::{Emulator, LaunchRequest, SwitchOptions};
use crate::input::gamepad::sdl_mapping::game_controller_config;
use crate::input::gamepad::PlannedSlot;
use crate::launch::LaunchCommand;
use crate::paths::AppPaths;
use anyhow::Result;

/// Everything a driver needs for one launch
pub struct GenerationContext<'a> {
    pub emulator: Emulator,
    pub paths: &'a AppPaths,
    pub request: &'a LaunchRequest,
    pub options: &'a SwitchOptions,
    /// Planned slots, already capped to the driver's `max_players`
    pub slots: &'a [PlannedSlot<'a>],
    /// Verbose per-slot mapping dumps
    pub debug: bool,
}

/// Driver trait - every emulator target implements this
pub trait Driver {
    /// Get the driver name (e.g., "yuzu", "ryujinx")
    fn name(&self) -> &str;

    /// Number of player slots the emulator exposes
    fn max_players(&self) -> usize;

    /// Whether per-player sections should be (re)written for this launch
    fn auto_controller_config(&self, options: &SwitchOptions) -> bool;

    /// Rewrite the emulator's configuration file
    fn write_config(&self, ctx: &GenerationContext<'_>) -> Result<()>;

    /// Build the emulator command line
    ///
    /// Built before `write_config` runs, so drivers see the pre-launch
    /// files when deciding on first-run arguments.
    fn command(&self, ctx: &GenerationContext<'_>) -> Result<LaunchCommand>;
}

/// Pick the driver for a target emulator
pub fn for_emulator(emulator: Emulator) -> Box<dyn Driver> {
    if emulator.is_yuzu() {
        Box::new(yuzu::YuzuDriver)
    } else {
        Box::new(ryujinx::RyujinxDriver)
    }
}

/// AppImage command with the environment shared by all targets
pub(crate) fn base_command(ctx: &GenerationContext<'_>) -> LaunchCommand {
    LaunchCommand::new(ctx.paths.appimage(ctx.emulator))
}

/// Environment every target gets, appended after driver-specific variables
pub(crate) fn with_common_env(cmd: LaunchCommand, ctx: &GenerationContext<'_>) -> LaunchCommand {
    cmd.env("QT_QPA_PLATFORM", "xcb").env(
        "SDL_GAMECONTROLLERCONFIG",
        game_controller_config(ctx.request.players()),
    )
}
