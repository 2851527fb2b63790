//! Binding engines
//!
//! The layout tables say which logical button feeds each yuzu input; an
//! engine turns that into a concrete binding for one input backend:
//!
//! - [`SdlEngine`]: SDL bind sources of an enumerated device
//! - [`JoyconEngine`]: yuzu's own Joy-Con driver (fixed button masks)
//! - [`FrontendEngine`]: the front-end's recorded inputs
//! - [`KeyboardEngine`]: fixed keyboard scheme for slots without a pad

use super::binding::{Binding, KeyboardStick, MotionBinding, StickBinding};
use super::layout::{ButtonEntry, StickEntry, YuzuButton, YuzuMotion, YuzuStick};
use crate::input::gamepad::device::{
    BindSource, HatDirection, PadButton, PhysicalDevice, PhysicalStick,
};
use crate::input::gamepad::layout::FormFactor;
use crate::input::gamepad::logical::{InputKind, LogicalController, RawInput};

pub trait BindingEngine {
    fn button(&self, button: YuzuButton, entry: ButtonEntry) -> Binding;
    fn stick(&self, stick: YuzuStick, entry: StickEntry) -> StickBinding;
    fn motion(&self, motion: YuzuMotion) -> MotionBinding;
}

/// Bindings from an enumerated device's SDL bind sources
pub struct SdlEngine<'a> {
    pub device: &'a PhysicalDevice,
    pub port: usize,
}

impl BindingEngine for SdlEngine<'_> {
    fn button(&self, _button: YuzuButton, entry: ButtonEntry) -> Binding {
        let guid = self.device.guid.clone();
        let port = self.port;
        match self.device.bind(entry.source) {
            Some(BindSource::Button { index }) => Binding::SdlButton {
                button: index,
                guid,
                port,
            },
            Some(BindSource::Hat { hat, direction }) => Binding::SdlHat {
                hat,
                direction,
                guid,
                port,
            },
            Some(BindSource::Axis { index }) => Binding::SdlAxis {
                axis: index,
                guid,
                port,
            },
            None => Binding::Empty,
        }
    }

    fn stick(&self, _stick: YuzuStick, entry: StickEntry) -> StickBinding {
        let base = self.device.stick_axis(entry.source);
        StickBinding::Sdl {
            axes: entry.orientation.axes(base),
            guid: self.device.guid.clone(),
            port: self.port,
        }
    }

    fn motion(&self, _motion: YuzuMotion) -> MotionBinding {
        MotionBinding::Sdl {
            guid: self.device.guid.clone(),
            port: self.port,
        }
    }
}

/// Which Joy-Con a button lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// yuzu Joy-Con driver button mask
fn joycon_mask(button: YuzuButton) -> (Side, u32) {
    use YuzuButton as Y;
    match button {
        Y::ButtonDdown => (Side::Left, 1),
        Y::ButtonDup => (Side::Left, 2),
        Y::ButtonDright => (Side::Left, 4),
        Y::ButtonDleft => (Side::Left, 8),
        Y::ButtonSr => (Side::Left, 16),
        Y::ButtonSl => (Side::Left, 32),
        Y::ButtonL => (Side::Left, 64),
        Y::ButtonZl => (Side::Left, 128),
        Y::ButtonY => (Side::Right, 256),
        Y::ButtonX => (Side::Right, 512),
        Y::ButtonB => (Side::Right, 1024),
        Y::ButtonA => (Side::Right, 2048),
        Y::ButtonR => (Side::Right, 16384),
        Y::ButtonZr => (Side::Right, 32768),
        Y::ButtonMinus => (Side::Left, 65536),
        Y::ButtonPlus => (Side::Right, 131072),
        Y::ButtonRstick => (Side::Right, 262144),
        Y::ButtonLstick => (Side::Left, 524288),
        Y::ButtonHome => (Side::Right, 1048576),
        Y::ButtonScreenshot => (Side::Left, 2097152),
    }
}

/// Bindings through yuzu's native Joy-Con driver
pub struct JoyconEngine {
    pub form: FormFactor,
    pub port: usize,
}

impl JoyconEngine {
    /// Driver pad numbers read for the left-side and right-side controls
    fn pads(&self) -> (u8, u8) {
        match self.form {
            FormFactor::JoyconLeft => (1, 1),
            FormFactor::JoyconRight => (2, 2),
            FormFactor::DualJoycons | FormFactor::ProController | FormFactor::Handheld => (1, 2),
        }
    }

    fn pad(&self, side: Side) -> u8 {
        let (left, right) = self.pads();
        match side {
            Side::Left => left,
            Side::Right => right,
        }
    }
}

impl BindingEngine for JoyconEngine {
    fn button(&self, button: YuzuButton, entry: ButtonEntry) -> Binding {
        if matches!(button, YuzuButton::ButtonSl | YuzuButton::ButtonSr) {
            // The rails are covered when both halves are attached
            if self.form == FormFactor::DualJoycons || entry.source == PadButton::Unbound {
                return Binding::Empty;
            }
            // Rail buttons exist on both halves; the right half reports them higher up
            let (pad, mask) = match (self.form, button) {
                (FormFactor::JoyconRight, YuzuButton::ButtonSl) => (2, 8192),
                (FormFactor::JoyconRight, _) => (2, 4096),
                (_, YuzuButton::ButtonSl) => (1, 32),
                _ => (1, 16),
            };
            return Binding::Joycon {
                pad,
                button: mask,
                port: self.port,
            };
        }

        let (side, mask) = joycon_mask(button);
        Binding::Joycon {
            pad: self.pad(side),
            button: mask,
            port: self.port,
        }
    }

    fn stick(&self, stick: YuzuStick, _entry: StickEntry) -> StickBinding {
        let (pad, axis_x, axis_y) = match stick {
            YuzuStick::Lstick => (self.pad(Side::Left), 0, 1),
            YuzuStick::Rstick => (self.pad(Side::Right), 2, 3),
        };
        StickBinding::Joycon {
            pad,
            axis_x,
            axis_y,
            port: self.port,
        }
    }

    fn motion(&self, motion: YuzuMotion) -> MotionBinding {
        let (motion, pad) = match motion {
            YuzuMotion::Motionleft => (0, self.pad(Side::Left)),
            YuzuMotion::Motionright => (1, self.pad(Side::Right)),
        };
        MotionBinding::Joycon {
            motion,
            pad,
            port: self.port,
        }
    }
}

/// Front-end input name for an SDL logical button
///
/// Front-end names are positional: `a` is the east button, `b` south.
fn frontend_name(button: PadButton) -> Option<&'static str> {
    let name = match button {
        PadButton::A => "b",
        PadButton::B => "a",
        PadButton::X => "y",
        PadButton::Y => "x",
        PadButton::Back => "select",
        PadButton::Guide => "hotkey",
        PadButton::Start => "start",
        PadButton::LeftStick => "l3",
        PadButton::RightStick => "r3",
        PadButton::LeftShoulder => "pageup",
        PadButton::RightShoulder => "pagedown",
        PadButton::DpadUp => "up",
        PadButton::DpadDown => "down",
        PadButton::DpadLeft => "left",
        PadButton::DpadRight => "right",
        PadButton::LeftTrigger => "l2",
        PadButton::RightTrigger => "r2",
        PadButton::Unbound => return None,
    };
    Some(name)
}

/// Bindings from the front-end's recorded inputs, keyed by its GUID
pub struct FrontendEngine<'a> {
    pub controller: &'a LogicalController,
    pub form: FormFactor,
    pub port: usize,
}

impl FrontendEngine<'_> {
    fn guid(&self) -> String {
        self.controller.guid.clone()
    }

    fn binding(&self, input: &RawInput) -> Binding {
        let Ok(id) = u32::try_from(input.id) else {
            return Binding::Empty;
        };
        match input.kind {
            InputKind::Button => Binding::SdlButton {
                button: id,
                guid: self.guid(),
                port: self.port,
            },
            InputKind::Hat => match HatDirection::from_mask(input.value) {
                Some(direction) => Binding::SdlHat {
                    hat: id,
                    direction,
                    guid: self.guid(),
                    port: self.port,
                },
                None => Binding::Empty,
            },
            InputKind::Axis => Binding::SdlAxis {
                axis: id,
                guid: self.guid(),
                port: self.port,
            },
            InputKind::Key => Binding::Empty,
        }
    }

    fn axis_id(&self, name: &str) -> Option<u32> {
        let input = self.controller.input(name)?;
        if input.kind != InputKind::Axis {
            return None;
        }
        u32::try_from(input.id).ok()
    }
}

impl BindingEngine for FrontendEngine<'_> {
    fn button(&self, button: YuzuButton, entry: ButtonEntry) -> Binding {
        // Stick clicks keep their own names even on a lone Joy-Con
        let name = match button {
            YuzuButton::ButtonLstick => Some("l3"),
            YuzuButton::ButtonRstick => Some("r3"),
            _ => frontend_name(entry.source),
        };
        name.and_then(|name| self.controller.input(name))
            .map(|input| self.binding(input))
            .unwrap_or(Binding::Empty)
    }

    fn stick(&self, _stick: YuzuStick, entry: StickEntry) -> StickBinding {
        // A lone Joy-Con only ever reports its stick as the first joystick
        let source = match self.form {
            FormFactor::JoyconLeft | FormFactor::JoyconRight => PhysicalStick::Left,
            _ => entry.source,
        };
        let (x_name, y_name) = match source {
            PhysicalStick::Left => ("joystick1left", "joystick1up"),
            PhysicalStick::Right => ("joystick2left", "joystick2up"),
        };
        match (self.axis_id(x_name), self.axis_id(y_name)) {
            (Some(x), Some(y)) => StickBinding::Sdl {
                axes: entry.orientation.axes_from(x, y),
                guid: self.guid(),
                port: self.port,
            },
            _ => StickBinding::Empty,
        }
    }

    fn motion(&self, _motion: YuzuMotion) -> MotionBinding {
        MotionBinding::Sdl {
            guid: self.guid(),
            port: self.port,
        }
    }
}

/// Qt key code of each button in the keyboard scheme
fn key_code(button: YuzuButton) -> u32 {
    use YuzuButton as Y;
    match button {
        Y::ButtonA => 67,
        Y::ButtonB => 88,
        Y::ButtonX => 86,
        Y::ButtonY => 90,
        Y::ButtonLstick => 70,
        Y::ButtonRstick => 71,
        Y::ButtonL => 81,
        Y::ButtonR => 69,
        Y::ButtonZl => 82,
        Y::ButtonZr => 84,
        Y::ButtonPlus => 77,
        Y::ButtonMinus => 78,
        Y::ButtonDleft => 16777234,
        Y::ButtonDup => 16777235,
        Y::ButtonDright => 16777236,
        Y::ButtonDdown => 16777237,
        Y::ButtonSl => 81,
        Y::ButtonSr => 69,
        Y::ButtonHome => 0,
        Y::ButtonScreenshot => 0,
    }
}

/// yuzu's default keyboard scheme
pub struct KeyboardEngine;

impl BindingEngine for KeyboardEngine {
    fn button(&self, button: YuzuButton, _entry: ButtonEntry) -> Binding {
        Binding::Keyboard {
            code: key_code(button),
        }
    }

    fn stick(&self, stick: YuzuStick, _entry: StickEntry) -> StickBinding {
        match stick {
            YuzuStick::Lstick => StickBinding::Keyboard(KeyboardStick::Left),
            YuzuStick::Rstick => StickBinding::Keyboard(KeyboardStick::Right),
        }
    }

    fn motion(&self, _motion: YuzuMotion) -> MotionBinding {
        MotionBinding::Empty
    }
}
