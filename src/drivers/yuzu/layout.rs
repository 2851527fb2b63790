//! yuzu button and stick layouts per form factor
//!
//! Tables are written for Xbox-style pads (SDL `A` south). Pads whose type
//! code is in [`NINTENDO_LAYOUT_TYPES`] get A<->B and X<->Y swapped on top.

use crate::input::gamepad::device::{PadButton, PadType, PhysicalStick};
use crate::input::gamepad::layout::FormFactor;
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Type codes whose face buttons are laid out the Nintendo way for yuzu
pub const NINTENDO_LAYOUT_TYPES: &[PadType] = &[PadType::UNKNOWN];

pub fn is_nintendo_layout(pad_type: PadType) -> bool {
    NINTENDO_LAYOUT_TYPES.contains(&pad_type)
}

/// yuzu's canonical buttons, in the order yuzu itself writes them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum YuzuButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonLstick,
    ButtonRstick,
    ButtonL,
    ButtonR,
    ButtonZl,
    ButtonZr,
    ButtonPlus,
    ButtonMinus,
    ButtonDleft,
    ButtonDup,
    ButtonDright,
    ButtonDdown,
    ButtonSl,
    ButtonSr,
    ButtonHome,
    ButtonScreenshot,
}

impl YuzuButton {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// yuzu's two analog sticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum YuzuStick {
    Lstick,
    Rstick,
}

impl YuzuStick {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// yuzu's two motion inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum YuzuMotion {
    Motionleft,
    Motionright,
}

impl YuzuMotion {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// How a Joy-Con is held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    /// Left Joy-Con held sideways: X/Y swapped, both inverted
    SidewaysLeft,
    /// Right Joy-Con held sideways: X/Y swapped, X inverted only
    SidewaysRight,
}

/// Axis assignment of one stick binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickAxes {
    pub axis_x: u32,
    pub axis_y: u32,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Orientation {
    /// Axes for a physical stick whose X axis is `base`
    pub fn axes(self, base: u32) -> StickAxes {
        self.axes_from(base, base + 1)
    }

    /// Axes for a stick with independently known X and Y axes
    pub fn axes_from(self, x: u32, y: u32) -> StickAxes {
        match self {
            Orientation::Upright => StickAxes {
                axis_x: x,
                axis_y: y,
                invert_x: false,
                invert_y: false,
            },
            Orientation::SidewaysLeft => StickAxes {
                axis_x: y,
                axis_y: x,
                invert_x: true,
                invert_y: true,
            },
            Orientation::SidewaysRight => StickAxes {
                axis_x: y,
                axis_y: x,
                invert_x: true,
                invert_y: false,
            },
        }
    }
}

/// One button of a layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEntry {
    pub source: PadButton,
    /// Inert controls are still written so the key set stays complete
    pub active: bool,
}

/// One stick of a layout table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickEntry {
    pub source: PhysicalStick,
    pub orientation: Orientation,
    pub active: bool,
}

const fn on(source: PadButton) -> ButtonEntry {
    ButtonEntry {
        source,
        active: true,
    }
}

const fn off(source: PadButton) -> ButtonEntry {
    ButtonEntry {
        source,
        active: false,
    }
}

/// Xbox-style table entry for a form factor
pub fn default_entry(form: FormFactor, button: YuzuButton) -> ButtonEntry {
    use FormFactor as F;
    use PadButton as P;
    use YuzuButton as Y;

    match form {
        F::ProController | F::Handheld | F::DualJoycons => match button {
            Y::ButtonA => on(P::B),
            Y::ButtonB => on(P::A),
            Y::ButtonX => on(P::Y),
            Y::ButtonY => on(P::X),
            Y::ButtonLstick => on(P::LeftStick),
            Y::ButtonRstick => on(P::RightStick),
            Y::ButtonL => on(P::LeftShoulder),
            Y::ButtonR => on(P::RightShoulder),
            Y::ButtonZl => on(P::LeftTrigger),
            Y::ButtonZr => on(P::RightTrigger),
            Y::ButtonPlus => on(P::Start),
            Y::ButtonMinus => on(P::Back),
            Y::ButtonDleft => on(P::DpadLeft),
            Y::ButtonDup => on(P::DpadUp),
            Y::ButtonDright => on(P::DpadRight),
            Y::ButtonDdown => on(P::DpadDown),
            Y::ButtonSl => on(P::LeftShoulder),
            Y::ButtonSr => on(P::RightShoulder),
            Y::ButtonHome => on(P::Guide),
            Y::ButtonScreenshot => off(P::Unbound),
        },
        F::JoyconLeft => match button {
            Y::ButtonA => off(P::B),
            Y::ButtonB => off(P::A),
            Y::ButtonX => off(P::Y),
            Y::ButtonY => off(P::X),
            Y::ButtonLstick => on(P::LeftStick),
            Y::ButtonRstick => off(P::RightStick),
            Y::ButtonL => on(P::LeftShoulder),
            Y::ButtonR => off(P::RightShoulder),
            Y::ButtonZl => on(P::LeftTrigger),
            Y::ButtonZr => off(P::RightTrigger),
            Y::ButtonPlus => off(P::Start),
            Y::ButtonMinus => on(P::Back),
            // Sideways: the face buttons become the d-pad
            Y::ButtonDleft => on(P::A),
            Y::ButtonDup => on(P::X),
            Y::ButtonDright => on(P::Y),
            Y::ButtonDdown => on(P::B),
            Y::ButtonSl => on(P::LeftShoulder),
            Y::ButtonSr => on(P::RightShoulder),
            Y::ButtonHome => off(P::Guide),
            Y::ButtonScreenshot => on(P::Guide),
        },
        F::JoyconRight => match button {
            Y::ButtonA => on(P::A),
            Y::ButtonB => on(P::X),
            Y::ButtonX => on(P::B),
            Y::ButtonY => on(P::Y),
            Y::ButtonLstick => off(P::LeftStick),
            Y::ButtonRstick => on(P::LeftStick),
            Y::ButtonL => off(P::LeftShoulder),
            Y::ButtonR => on(P::RightShoulder),
            Y::ButtonZl => off(P::LeftTrigger),
            Y::ButtonZr => on(P::RightTrigger),
            Y::ButtonPlus => on(P::Start),
            Y::ButtonMinus => off(P::Back),
            Y::ButtonDleft => off(P::B),
            Y::ButtonDup => off(P::Y),
            Y::ButtonDright => off(P::X),
            Y::ButtonDdown => off(P::A),
            Y::ButtonSl => on(P::LeftShoulder),
            Y::ButtonSr => on(P::RightShoulder),
            Y::ButtonHome => on(P::Guide),
            Y::ButtonScreenshot => off(P::Unbound),
        },
    }
}

/// Table entry with the face swap applied for Nintendo-layout pads
pub fn button_entry(form: FormFactor, button: YuzuButton, nintendo_layout: bool) -> ButtonEntry {
    let entry = default_entry(form, button);
    if nintendo_layout {
        ButtonEntry {
            source: entry.source.face_swapped(),
            ..entry
        }
    } else {
        entry
    }
}

pub fn stick_entry(form: FormFactor, stick: YuzuStick) -> StickEntry {
    use FormFactor as F;
    use PhysicalStick as S;

    let (source, orientation, active) = match (form, stick) {
        (F::ProController | F::Handheld | F::DualJoycons, YuzuStick::Lstick) => {
            (S::Left, Orientation::Upright, true)
        }
        (F::ProController | F::Handheld | F::DualJoycons, YuzuStick::Rstick) => {
            (S::Right, Orientation::Upright, true)
        }
        (F::JoyconLeft, YuzuStick::Lstick) => (S::Left, Orientation::SidewaysLeft, true),
        (F::JoyconLeft, YuzuStick::Rstick) => (S::Right, Orientation::SidewaysLeft, false),
        (F::JoyconRight, YuzuStick::Lstick) => (S::Left, Orientation::SidewaysRight, false),
        (F::JoyconRight, YuzuStick::Rstick) => (S::Left, Orientation::SidewaysRight, true),
    };

    StickEntry {
        source,
        orientation,
        active,
    }
}
