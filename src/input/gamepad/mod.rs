//! Controller resolution
//!
//! Turns the front-end's player list and the enumerated physical devices into
//! a per-slot plan the emulator drivers emit from.

pub mod device;
pub mod diagnostics;
pub mod layout;
pub mod logical;
pub mod platform;
pub mod provider;
#[cfg(feature = "sdl")]
pub mod sdl;
pub mod sdl_mapping;
pub mod slot;

use crate::config::SwitchOptions;
use tracing::info;

pub use device::{BindSource, PadButton, PadType, PhysicalDevice};
pub use layout::FormFactor;
pub use logical::LogicalController;
pub use platform::{PlatformQuery, Udevadm};
pub use provider::{default_enumerator, DeviceEnumerator};
pub use slot::{PlannedSlot, SlotSource};

/// Match players to devices and lay them out over emulator slots
///
/// # Arguments
/// * `players` - Front-end controllers in player order
/// * `devices` - Enumerated physical controllers
/// * `platform` - Device path resolver
/// * `options` - Overrides and quirk lists
/// * `max_slots` - Player slots the emulator has
///
/// # Returns
/// Planned slots in slot order
pub fn resolve_slots<'a>(
    players: &[&'a LogicalController],
    devices: &[PhysicalDevice],
    platform: &dyn PlatformQuery,
    options: &SwitchOptions,
    max_slots: usize,
) -> Vec<PlannedSlot<'a>> {
    let matcher = slot::DeviceMatcher::new(devices, platform, options);
    let slots = slot::assign_slots(players, &matcher, options, max_slots);
    info!(
        "Resolved {} player(s) onto {} slot(s)",
        players.len(),
        slots.len()
    );
    slots
}
