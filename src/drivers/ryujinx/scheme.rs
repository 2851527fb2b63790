//! `input_config` records for Ryujinx's `Config.json`

use super::layout::{
    input_id, is_nintendo_layout, left_entry, right_entry, stick_names, stick_source, JoyconStick,
    LeftJoyconButton, RightJoyconButton,
};
use crate::input::gamepad::layout::FormFactor;
use crate::input::gamepad::slot::{PlannedSlot, SlotSource};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use strum::IntoEnumIterator;
use uuid::Uuid;

pub const DEADZONE: f64 = 0.1;
pub const RANGE: f64 = 1.0;
pub const TRIGGER_THRESHOLD: f64 = 0.5;
pub const CONFIG_VERSION: u32 = 1;
pub const BACKEND: &str = "GamepadSDL2";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StickRecord {
    pub joystick: &'static str,
    pub rotate90_cw: bool,
    pub invert_stick_x: bool,
    pub invert_stick_y: bool,
    pub stick_button: &'static str,
}

impl StickRecord {
    fn new(form: FormFactor, stick: JoyconStick) -> Self {
        let (joystick, stick_button) = stick_names(stick_source(form, stick));
        Self {
            joystick,
            rotate90_cw: false,
            invert_stick_x: false,
            invert_stick_y: false,
            stick_button,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionRecord {
    pub motion_backend: &'static str,
    pub sensitivity: u32,
    pub gyro_deadzone: u32,
    pub enable_motion: bool,
}

impl Default for MotionRecord {
    fn default() -> Self {
        Self {
            motion_backend: "GamepadDriver",
            sensitivity: 100,
            gyro_deadzone: 1,
            enable_motion: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RumbleRecord {
    pub strong_rumble: u32,
    pub weak_rumble: u32,
    pub enable_rumble: bool,
}

/// One entry of `input_config`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputConfig {
    pub controller_type: &'static str,
    pub left_joycon_stick: StickRecord,
    pub right_joycon_stick: StickRecord,
    pub deadzone_left: f64,
    pub deadzone_right: f64,
    pub range_left: f64,
    pub range_right: f64,
    pub trigger_threshold: f64,
    pub motion: MotionRecord,
    pub rumble: RumbleRecord,
    pub left_joycon: IndexMap<&'static str, &'static str>,
    pub right_joycon: IndexMap<&'static str, &'static str>,
    pub version: u32,
    pub backend: &'static str,
    pub id: String,
    pub player_index: String,
}

/// Ryujinx gamepad id: `<sdl index>-<guid as a little-endian UUID>`
pub fn gamepad_id(index: u32, guid: &str) -> Result<String> {
    let parsed = Uuid::parse_str(guid).with_context(|| format!("Invalid controller GUID '{}'", guid))?;
    Ok(format!("{}-{}", index, Uuid::from_bytes(parsed.to_bytes_le())))
}

impl InputConfig {
    /// Record for a planned slot, `None` for unmatched slots
    ///
    /// # Arguments
    /// * `slot` - Planned slot
    /// * `rumble` - Rumble option
    pub fn for_slot(slot: &PlannedSlot<'_>, rumble: bool) -> Result<Option<Self>> {
        let (index, nintendo_layout) = match &slot.source {
            SlotSource::Device(device) => (device.index, is_nintendo_layout(device.pad_type)),
            SlotSource::Frontend => (slot.controller.index, false),
            SlotSource::Unmatched => return Ok(None),
        };
        let form = slot.form_factor;

        let left_joycon = LeftJoyconButton::iter()
            .map(|b| (b.key(), input_id(left_entry(form, b, nintendo_layout))))
            .collect();
        let right_joycon = RightJoyconButton::iter()
            .map(|b| (b.key(), input_id(right_entry(form, b, nintendo_layout))))
            .collect();

        Ok(Some(Self {
            controller_type: form.ryujinx_name(),
            left_joycon_stick: StickRecord::new(form, JoyconStick::Left),
            right_joycon_stick: StickRecord::new(form, JoyconStick::Right),
            deadzone_left: DEADZONE,
            deadzone_right: DEADZONE,
            range_left: RANGE,
            range_right: RANGE,
            trigger_threshold: TRIGGER_THRESHOLD,
            motion: MotionRecord::default(),
            rumble: RumbleRecord {
                strong_rumble: 1,
                weak_rumble: 1,
                enable_rumble: rumble,
            },
            left_joycon,
            right_joycon,
            version: CONFIG_VERSION,
            backend: BACKEND,
            id: gamepad_id(index, slot.guid())?,
            player_index: format!("Player{}", slot.slot + 1),
        }))
    }
}
