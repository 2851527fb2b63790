//! Physical controller descriptors
//!
//! A [`PhysicalDevice`] is what enumeration produces for each game controller
//! SDL knows a mapping for. Descriptors are immutable once built; the matcher
//! hands out adjusted copies when a quirk needs a different type code.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Path SDL reports for its virtual combined Joy-Con device
pub const JOYCONS_COMBINED_PATH: &str = "nintendo_joycons_combined";

/// Sysfs prefix older SDL builds report for virtual devices
pub const VIRTUAL_DEVICES_PATH: &str = "/devices/virtual";

/// Product name fragments that get forced to the Xbox 360 type code
const XBOX_STYLE_NAMES: &[&str] = &["Steam", "Xin-Mo Xin-Mo Dual Arcade"];

/// SDL game controller type code (`SDL_GameControllerType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PadType(pub i32);

impl PadType {
    pub const UNKNOWN: PadType = PadType(0);
    pub const XBOX_360: PadType = PadType(1);
    pub const PS4: PadType = PadType(4);
    pub const SWITCH_PRO: PadType = PadType(5);
    pub const JOYCON_LEFT: PadType = PadType(11);
    pub const JOYCON_RIGHT: PadType = PadType(12);
    pub const JOYCON_PAIR: PadType = PadType(13);

    /// Type code after product-name overrides
    pub fn from_name(raw: PadType, name: &str) -> PadType {
        if XBOX_STYLE_NAMES.iter().any(|n| name.contains(n)) {
            PadType::XBOX_360
        } else {
            raw
        }
    }

    /// Flip used for controllers that report the opposite face layout
    pub fn reversed(self) -> PadType {
        if self == PadType::UNKNOWN {
            PadType::XBOX_360
        } else {
            PadType::UNKNOWN
        }
    }
}

impl fmt::Display for PadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SDL logical controller button, named by SDL's Xbox-style positions
///
/// `A` is the south face button, `B` east, `X` west and `Y` north.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumCount,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PadButton {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    LeftTrigger,
    RightTrigger,
    Unbound,
}

impl PadButton {
    /// Nintendo face layout: A<->B and X<->Y, everything else unchanged
    pub fn face_swapped(self) -> PadButton {
        match self {
            PadButton::A => PadButton::B,
            PadButton::B => PadButton::A,
            PadButton::X => PadButton::Y,
            PadButton::Y => PadButton::X,
            other => other,
        }
    }
}

/// Hat switch direction, encoded by SDL as a bit mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HatDirection {
    Up,
    Right,
    Down,
    Left,
}

impl HatDirection {
    /// Decode an SDL hat mask (1 up, 2 right, 4 down, 8 left)
    pub fn from_mask(mask: i32) -> Option<HatDirection> {
        match mask {
            1 => Some(HatDirection::Up),
            2 => Some(HatDirection::Right),
            4 => Some(HatDirection::Down),
            8 => Some(HatDirection::Left),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HatDirection::Up => "up",
            HatDirection::Right => "right",
            HatDirection::Down => "down",
            HatDirection::Left => "left",
        }
    }

    pub fn parse(s: &str) -> Option<HatDirection> {
        match s {
            "up" => Some(HatDirection::Up),
            "right" => Some(HatDirection::Right),
            "down" => Some(HatDirection::Down),
            "left" => Some(HatDirection::Left),
            _ => None,
        }
    }
}

/// Hardware primitive a logical button reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BindSource {
    Button { index: u32 },
    Hat { hat: u32, direction: HatDirection },
    Axis { index: u32 },
}

/// Trigger source: a discrete button or an analog axis, never both
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TriggerBind {
    Button { index: u32 },
    Axis { index: u32 },
}

impl From<TriggerBind> for BindSource {
    fn from(bind: TriggerBind) -> Self {
        match bind {
            TriggerBind::Button { index } => BindSource::Button { index },
            TriggerBind::Axis { index } => BindSource::Axis { index },
        }
    }
}

/// Base X axis of each stick; Y is always the next axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickAxes {
    #[serde(default)]
    pub left: u32,
    #[serde(default = "default_right_stick_axis")]
    pub right: u32,
}

impl Default for StickAxes {
    fn default() -> Self {
        Self {
            left: 0,
            right: default_right_stick_axis(),
        }
    }
}

/// Which physical stick a binding reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalStick {
    Left,
    Right,
}

/// One enumerated game controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicalDevice {
    /// SDL device index
    pub index: u32,
    /// Canonical GUID (see [`canonical_guid`])
    pub guid: String,
    /// Correlation key shared with the front-end's device node
    pub path: String,
    pub pad_type: PadType,
    pub name: String,
    /// Bind sources of the digital buttons; missing entries are unbound
    #[serde(default)]
    pub buttons: BTreeMap<PadButton, BindSource>,
    #[serde(default)]
    pub left_trigger: Option<TriggerBind>,
    #[serde(default)]
    pub right_trigger: Option<TriggerBind>,
    #[serde(default)]
    pub sticks: StickAxes,
}

impl PhysicalDevice {
    /// Bind source of a logical button, `None` when unbound
    pub fn bind(&self, button: PadButton) -> Option<BindSource> {
        match button {
            PadButton::LeftTrigger => self.left_trigger.map(BindSource::from),
            PadButton::RightTrigger => self.right_trigger.map(BindSource::from),
            PadButton::Unbound => None,
            other => self.buttons.get(&other).copied(),
        }
    }

    /// Base X axis of a physical stick
    pub fn stick_axis(&self, stick: PhysicalStick) -> u32 {
        match stick {
            PhysicalStick::Left => self.sticks.left,
            PhysicalStick::Right => self.sticks.right,
        }
    }

    pub fn is_combined_joycons(&self) -> bool {
        self.path == JOYCONS_COMBINED_PATH || self.path == VIRTUAL_DEVICES_PATH
    }
}

/// Zero characters 2..8 of an SDL GUID string
///
/// SDL encodes the bus type and a CRC of the name there; emulators key their
/// bindings on the GUID without them.
pub fn canonical_guid(raw: &str) -> String {
    raw.char_indices()
        .map(|(i, c)| if (2..8).contains(&i) { '0' } else { c })
        .collect()
}

fn default_right_stick_axis() -> u32 {
    2
}
