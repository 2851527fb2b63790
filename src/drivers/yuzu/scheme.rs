//! Per-player yuzu control schemes and their `[Controls]` encoding

use super::binding::{Binding, MotionBinding, StickBinding};
use super::engine::{BindingEngine, FrontendEngine, JoyconEngine, KeyboardEngine, SdlEngine};
use super::layout::{
    button_entry, is_nintendo_layout, stick_entry, YuzuButton, YuzuMotion, YuzuStick,
};
use crate::ini::QtIni;
use crate::input::gamepad::device::PadType;
use crate::input::gamepad::layout::FormFactor;
use crate::input::gamepad::slot::{PlannedSlot, SlotSource};
use strum::IntoEnumIterator;

pub const CONTROLS: &str = "Controls";

/// Complete key set of one yuzu player
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerScheme {
    /// 0-based yuzu player index
    pub player: usize,
    pub buttons: Vec<(YuzuButton, Binding)>,
    pub sticks: Vec<(YuzuStick, StickBinding)>,
    pub motions: Vec<(YuzuMotion, MotionBinding)>,
    pub connected: bool,
    pub type_code: u8,
    /// Whether `_type` is left for yuzu to treat as a default
    pub type_is_default: bool,
    pub vibration: bool,
    /// Keyboard filler: every `\default` flag is set
    pub filler: bool,
}

fn collect(
    engine: &dyn BindingEngine,
    form: FormFactor,
    nintendo_layout: bool,
) -> (
    Vec<(YuzuButton, Binding)>,
    Vec<(YuzuStick, StickBinding)>,
    Vec<(YuzuMotion, MotionBinding)>,
) {
    let buttons = YuzuButton::iter()
        .map(|b| (b, engine.button(b, button_entry(form, b, nintendo_layout))))
        .collect();
    let sticks = YuzuStick::iter()
        .map(|s| (s, engine.stick(s, stick_entry(form, s))))
        .collect();
    let motions = YuzuMotion::iter().map(|m| (m, engine.motion(m))).collect();
    (buttons, sticks, motions)
}

impl PlayerScheme {
    /// Scheme for a planned slot
    ///
    /// # Arguments
    /// * `slot` - Planned slot
    /// * `port` - yuzu port (count of earlier slots sharing the GUID)
    /// * `vibration` - Rumble option
    pub fn for_slot(slot: &PlannedSlot<'_>, port: usize, vibration: bool) -> Self {
        let form = slot.form_factor;
        let ((buttons, sticks, motions), type_is_default) = match &slot.source {
            SlotSource::Device(device) if device.pad_type == PadType::JOYCON_PAIR => {
                (collect(&JoyconEngine { form, port }, form, false), false)
            }
            SlotSource::Device(device) => {
                let engine = SdlEngine { device, port };
                (collect(&engine, form, is_nintendo_layout(device.pad_type)), true)
            }
            SlotSource::Frontend => {
                let engine = FrontendEngine {
                    controller: slot.controller,
                    form,
                    port,
                };
                (collect(&engine, form, false), true)
            }
            SlotSource::Unmatched => return Self::keyboard(slot.slot),
        };

        Self {
            player: slot.slot,
            buttons,
            sticks,
            motions,
            connected: true,
            type_code: form.yuzu_code(),
            type_is_default,
            vibration,
            filler: false,
        }
    }

    /// Disconnected keyboard scheme for slots without a pad
    pub fn keyboard(player: usize) -> Self {
        let (buttons, sticks, motions) = collect(&KeyboardEngine, FormFactor::ProController, false);
        Self {
            player,
            buttons,
            sticks,
            motions,
            connected: false,
            type_code: FormFactor::ProController.yuzu_code(),
            type_is_default: true,
            vibration: true,
            filler: true,
        }
    }

    pub fn button(&self, button: YuzuButton) -> Option<&Binding> {
        self.buttons.iter().find(|(b, _)| *b == button).map(|(_, v)| v)
    }

    pub fn stick(&self, stick: YuzuStick) -> Option<&StickBinding> {
        self.sticks.iter().find(|(s, _)| *s == stick).map(|(_, v)| v)
    }

    fn key(&self, name: &str) -> String {
        format!("player_{}_{}", self.player, name)
    }

    fn set_with_default(&self, ini: &mut QtIni, name: &str, value: String, default: bool) {
        let key = self.key(name);
        ini.set(CONTROLS, &format!("{}\\default", key), bool_str(default));
        ini.set(CONTROLS, &key, value);
    }

    /// Write every key of this player into `[Controls]`
    pub fn write(&self, ini: &mut QtIni) {
        let default = self.filler;

        for (button, binding) in &self.buttons {
            let value = quoted(binding.to_string(), *binding == Binding::Empty);
            self.set_with_default(ini, button.key(), value, default);
        }
        for (stick, binding) in &self.sticks {
            let value = quoted(binding.to_string(), *binding == StickBinding::Empty);
            self.set_with_default(ini, stick.key(), value, default);
        }
        for (motion, binding) in &self.motions {
            let value = quoted(binding.to_string(), *binding == MotionBinding::Empty);
            self.set_with_default(ini, motion.key(), value, default);
        }

        let connected_default = self.filler || self.player == 0;
        self.set_with_default(ini, "connected", bool_str(self.connected), connected_default);
        self.set_with_default(
            ini,
            "type",
            self.type_code.to_string(),
            self.type_is_default,
        );
        self.set_with_default(
            ini,
            "vibration_enabled",
            bool_str(self.vibration),
            self.vibration,
        );
    }
}

fn bool_str(value: bool) -> String {
    value.to_string()
}

fn quoted(value: String, empty: bool) -> String {
    if empty {
        value
    } else {
        format!("\"{}\"", value)
    }
}

/// Port of each planned slot
///
/// A slot's port counts the earlier slots bound to the same GUID; the second
/// half of a Joy-Con pair shares the first half's port.
pub fn assign_ports(slots: &[PlannedSlot<'_>]) -> Vec<usize> {
    let mut seen: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    let mut ports = Vec::with_capacity(slots.len());

    for slot in slots {
        if slot.pair_second {
            if let Some(previous) = ports.last().copied() {
                ports.push(previous);
                continue;
            }
        }
        let count = seen.entry(slot.guid()).or_insert(0);
        ports.push(*count);
        *count += 1;
    }

    ports
}
