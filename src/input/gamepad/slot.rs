//! Player slot assignment
//!
//! Each front-end player is matched to a physical device, then expanded into
//! one or two emulator slots:
//! - Lone Joy-Con halves are skipped (the combined device covers them)
//! - Quirk GUIDs are bound from the front-end's own inputs
//! - Combined Joy-Cons split into a Left/Right pair on consecutive slots
//! - Players without a device still consume a slot

use super::device::PhysicalDevice;
use super::layout::{classify, FormFactor, Layout};
use super::logical::LogicalController;
use super::platform::PlatformQuery;
use crate::config::SwitchOptions;
use tracing::{debug, warn};

/// Result of looking up a player's physical device
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Player is not mapped at all
    Skipped,
    /// Physical device found (type code already adjusted for quirks)
    Device(PhysicalDevice),
    /// Bind from the front-end's inputs, keyed by the player's GUID
    Frontend,
    /// No device shares the player's correlation key
    Unmatched,
}

/// Matches front-end players against enumerated devices
pub struct DeviceMatcher<'a> {
    devices: &'a [PhysicalDevice],
    platform: &'a dyn PlatformQuery,
    options: &'a SwitchOptions,
}

impl<'a> DeviceMatcher<'a> {
    pub fn new(
        devices: &'a [PhysicalDevice],
        platform: &'a dyn PlatformQuery,
        options: &'a SwitchOptions,
    ) -> Self {
        Self {
            devices,
            platform,
            options,
        }
    }

    /// Find the physical device behind a front-end player
    pub fn match_controller(&self, controller: &LogicalController) -> MatchOutcome {
        if controller.is_joycon_half() {
            debug!("Player {}: lone Joy-Con half, skipped", controller.player);
            return MatchOutcome::Skipped;
        }

        if self.options.is_frontend_guid(&controller.guid) {
            debug!(
                "Player {}: {} bound from front-end inputs",
                controller.player, controller.guid
            );
            return MatchOutcome::Frontend;
        }

        let found = if controller.is_combined_joycons() {
            self.devices.iter().find(|d| d.is_combined_joycons())
        } else {
            match self.platform.resolve_device_path(&controller.device_path) {
                Ok(key) => self.devices.iter().find(|d| d.path == key),
                Err(e) => {
                    warn!(
                        "⚠️  Player {}: could not resolve {}: {:#}",
                        controller.player, controller.device_path, e
                    );
                    None
                }
            }
        };

        match found {
            Some(device) => {
                let mut device = device.clone();
                if self.options.is_reversed_guid(&controller.guid)
                    || self.options.is_reversed_guid(&device.guid)
                {
                    device.pad_type = device.pad_type.reversed();
                }
                MatchOutcome::Device(device)
            }
            None => MatchOutcome::Unmatched,
        }
    }
}

/// Where a slot's bindings come from
#[derive(Debug, Clone, PartialEq)]
pub enum SlotSource {
    Device(PhysicalDevice),
    Frontend,
    Unmatched,
}

/// One emulator player slot
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedSlot<'a> {
    /// 0-based emulator slot
    pub slot: usize,
    pub controller: &'a LogicalController,
    pub form_factor: FormFactor,
    pub source: SlotSource,
    /// Second half of a combined Joy-Con pair
    pub pair_second: bool,
}

impl PlannedSlot<'_> {
    /// GUID the emulator binds against
    pub fn guid(&self) -> &str {
        match &self.source {
            SlotSource::Device(device) => &device.guid,
            _ => &self.controller.guid,
        }
    }
}

/// Assign emulator slots to front-end players
///
/// # Arguments
/// * `players` - Front-end controllers in player order
/// * `matcher` - Device lookup
/// * `options` - Source of the per-slot form factor overrides
/// * `max_slots` - Number of player slots the emulator has
pub fn assign_slots<'a>(
    players: &[&'a LogicalController],
    matcher: &DeviceMatcher<'_>,
    options: &SwitchOptions,
    max_slots: usize,
) -> Vec<PlannedSlot<'a>> {
    let mut planned = Vec::new();
    let mut next_slot = 0;

    for controller in players.iter().copied() {
        if next_slot >= max_slots {
            warn!(
                "⚠️  No slot left for player {} ({})",
                controller.player, controller.real_name
            );
            break;
        }

        let override_form = options.pad_override(next_slot + 1);
        let (layout, source) = match matcher.match_controller(controller) {
            MatchOutcome::Skipped => continue,
            MatchOutcome::Device(device) => {
                (classify(device.pad_type, override_form), SlotSource::Device(device))
            }
            MatchOutcome::Frontend => (
                Layout::Single(override_form.unwrap_or(FormFactor::ProController)),
                SlotSource::Frontend,
            ),
            MatchOutcome::Unmatched => {
                warn!(
                    "⚠️  Player {} ({}): no matching device, using fallback mapping",
                    controller.player, controller.real_name
                );
                (
                    Layout::Single(override_form.unwrap_or(FormFactor::ProController)),
                    SlotSource::Unmatched,
                )
            }
        };

        for (offset, form_factor) in layout.slots().into_iter().enumerate() {
            let slot = next_slot + offset;
            if slot >= max_slots {
                warn!("⚠️  Joy-Con pair of player {} truncated at slot {}", controller.player, slot);
                break;
            }
            debug!("Slot {} <- player {} as {}", slot, controller.player, form_factor);
            planned.push(PlannedSlot {
                slot,
                controller,
                form_factor,
                source: source.clone(),
                pair_second: offset > 0,
            });
        }
        next_slot += layout.width();
    }

    planned
}

#[cfg(test)]
mod tests {
    use super::super::device::{PadType, StickAxes, JOYCONS_COMBINED_PATH};
    use super::super::logical::{COMBINED_JOYCONS_NAME, JOYCON_LEFT_HALF_GUID};
    use super::super::platform::mock::MockPlatform;
    use super::*;
    use std::collections::BTreeMap;

    fn device(index: u32, guid: &str, path: &str, pad_type: PadType) -> PhysicalDevice {
        PhysicalDevice {
            index,
            guid: guid.into(),
            path: path.into(),
            pad_type,
            name: format!("pad {}", index),
            buttons: BTreeMap::new(),
            left_trigger: None,
            right_trigger: None,
            sticks: StickAxes::default(),
        }
    }

    fn player(player: u32, guid: &str, node: &str, name: &str) -> LogicalController {
        LogicalController {
            player,
            guid: guid.into(),
            device_path: node.into(),
            real_name: name.into(),
            config_name: String::new(),
            index: player - 1,
            inputs: Default::default(),
        }
    }

    fn platform() -> MockPlatform {
        MockPlatform::default()
            .with("/dev/input/event3", "/devices/usb1/1-1/input/input3/event3")
            .with("/dev/input/event4", "/devices/usb1/1-2/input/input4/event4")
    }

    #[test]
    fn test_match_by_correlation_key() {
        let devices = vec![
            device(0, "g0", "/devices/usb1/1-1", PadType::PS4),
            device(1, "g1", "/devices/usb1/1-2", PadType::XBOX_360),
        ];
        let options = SwitchOptions::default();
        let platform = platform();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);

        let outcome = matcher.match_controller(&player(1, "g1", "/dev/input/event4", "Xbox"));
        assert_eq!(outcome, MatchOutcome::Device(devices[1].clone()));

        let outcome = matcher.match_controller(&player(1, "g9", "/dev/input/event9", "Gone"));
        assert_eq!(outcome, MatchOutcome::Unmatched);
    }

    #[test]
    fn test_reserved_halves_skipped() {
        let options = SwitchOptions::default();
        let platform = platform();
        let matcher = DeviceMatcher::new(&[], &platform, &options);

        let outcome =
            matcher.match_controller(&player(1, JOYCON_LEFT_HALF_GUID, "/dev/input/event3", "L"));
        assert_eq!(outcome, MatchOutcome::Skipped);
    }

    #[test]
    fn test_frontend_guid_bypasses_lookup() {
        let options = SwitchOptions::default();
        let platform = MockPlatform::default();
        let matcher = DeviceMatcher::new(&[], &platform, &options);

        let outcome = matcher.match_controller(&player(
            1,
            "030000005e0400008e02000014010000",
            "/dev/input/event3",
            "Xbox 360 Controller",
        ));
        assert_eq!(outcome, MatchOutcome::Frontend);
    }

    #[test]
    fn test_combined_joycons_matched_by_sentinel_path() {
        let devices = vec![
            device(0, "g0", "/devices/usb1/1-1", PadType::PS4),
            device(1, "gj", JOYCONS_COMBINED_PATH, PadType::JOYCON_PAIR),
        ];
        let options = SwitchOptions::default();
        let platform = MockPlatform::default();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);

        let outcome =
            matcher.match_controller(&player(1, "gj", "/dev/input/event7", COMBINED_JOYCONS_NAME));
        assert_eq!(outcome, MatchOutcome::Device(devices[1].clone()));
    }

    #[test]
    fn test_reversed_guid_flips_type() {
        let guid = "03000000c82d00000631000014010000";
        let devices = vec![device(0, guid, "/devices/usb1/1-1", PadType::UNKNOWN)];
        let options = SwitchOptions::default();
        let platform = platform();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);

        match matcher.match_controller(&player(1, guid, "/dev/input/event3", "8BitDo")) {
            MatchOutcome::Device(d) => assert_eq!(d.pad_type, PadType::XBOX_360),
            other => panic!("unexpected {:?}", other),
        }
        // The enumerated descriptor itself is untouched
        assert_eq!(devices[0].pad_type, PadType::UNKNOWN);
    }

    #[test]
    fn test_combined_pair_advances_two_slots() {
        let devices = vec![
            device(0, "gj", JOYCONS_COMBINED_PATH, PadType::JOYCON_PAIR),
            device(1, "g1", "/devices/usb1/1-2", PadType::XBOX_360),
        ];
        let options = SwitchOptions::default();
        let platform = platform();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);
        let p1 = player(1, "gj", "/dev/input/event7", COMBINED_JOYCONS_NAME);
        let p2 = player(2, "g1", "/dev/input/event4", "Xbox");

        let slots = assign_slots(&[&p1, &p2], &matcher, &options, 9);

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].form_factor, FormFactor::JoyconLeft);
        assert_eq!(slots[1].form_factor, FormFactor::JoyconRight);
        assert!(slots[1].pair_second);
        assert_eq!(slots[2].slot, 2);
        assert_eq!(slots[2].form_factor, FormFactor::ProController);
        assert_eq!(slots[2].guid(), "g1");
    }

    #[test]
    fn test_halves_plus_combined_entry() {
        let devices = vec![device(0, "gj", JOYCONS_COMBINED_PATH, PadType::JOYCON_PAIR)];
        let options = SwitchOptions::default();
        let platform = MockPlatform::default();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);
        let left = player(1, JOYCON_LEFT_HALF_GUID, "/dev/input/event5", "Joy-Con (L)");
        let right = player(
            2,
            "050000007e0500000720000001800000",
            "/dev/input/event6",
            "Joy-Con (R)",
        );
        let combined = player(3, "gj", "/dev/input/event7", COMBINED_JOYCONS_NAME);

        let slots = assign_slots(&[&left, &right, &combined], &matcher, &options, 9);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].slot, 0);
        assert_eq!(slots[0].controller.player, 3);
        assert_eq!(slots[1].slot, 1);
    }

    #[test]
    fn test_override_reads_current_slot() {
        let devices = vec![
            device(0, "gj", JOYCONS_COMBINED_PATH, PadType::JOYCON_PAIR),
            device(1, "g1", "/devices/usb1/1-2", PadType::XBOX_360),
        ];
        let options = SwitchOptions::from_map(
            &[("p3_pad".to_string(), "2".to_string())].into_iter().collect(),
        );
        let platform = platform();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);
        let p1 = player(1, "gj", "/dev/input/event7", COMBINED_JOYCONS_NAME);
        let p2 = player(2, "g1", "/dev/input/event4", "Xbox");

        let slots = assign_slots(&[&p1, &p2], &matcher, &options, 9);

        assert_eq!(slots[2].form_factor, FormFactor::JoyconLeft);
    }

    #[test]
    fn test_unmatched_player_consumes_slot() {
        let options = SwitchOptions::default();
        let platform = MockPlatform::default();
        let matcher = DeviceMatcher::new(&[], &platform, &options);
        let p1 = player(1, "g1", "/dev/input/event4", "Ghost");

        let slots = assign_slots(&[&p1], &matcher, &options, 9);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].source, SlotSource::Unmatched);
    }

    #[test]
    fn test_slots_capped() {
        let devices = vec![device(0, "gj", JOYCONS_COMBINED_PATH, PadType::JOYCON_PAIR)];
        let options = SwitchOptions::default();
        let platform = MockPlatform::default();
        let matcher = DeviceMatcher::new(&devices, &platform, &options);
        let p1 = player(1, "gj", "/dev/input/event7", COMBINED_JOYCONS_NAME);

        let slots = assign_slots(&[&p1], &matcher, &options, 1);

        assert_eq!(slots.len(), 1);
    }
}
