//! Form-factor classification
//!
//! Decides how many emulator player slots a physical device occupies and in
//! which grip configuration.

use super::device::PadType;
use std::fmt;
use std::str::FromStr;
use strum::{EnumIter, IntoStaticStr};

/// Physical grip configuration a slot is emulated as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum FormFactor {
    #[strum(serialize = "ProController")]
    ProController,
    #[strum(serialize = "JoyconPair")]
    DualJoycons,
    #[strum(serialize = "JoyconLeft")]
    JoyconLeft,
    #[strum(serialize = "JoyconRight")]
    JoyconRight,
    #[strum(serialize = "Handheld")]
    Handheld,
}

impl FormFactor {
    /// yuzu `player_N_type` code
    pub fn yuzu_code(self) -> u8 {
        match self {
            FormFactor::ProController => 0,
            FormFactor::DualJoycons => 1,
            FormFactor::JoyconLeft => 2,
            FormFactor::JoyconRight => 3,
            FormFactor::Handheld => 4,
        }
    }

    /// Ryujinx `controller_type` name
    pub fn ryujinx_name(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ryujinx_name())
    }
}

/// Error for unrecognized override values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormFactor(pub String);

impl fmt::Display for UnknownFormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown controller type '{}'", self.0)
    }
}

impl std::error::Error for UnknownFormFactor {}

impl FromStr for FormFactor {
    type Err = UnknownFormFactor;

    /// Accepts both the yuzu numeric codes and the Ryujinx names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "ProController" => Ok(FormFactor::ProController),
            "1" | "JoyconPair" => Ok(FormFactor::DualJoycons),
            "2" | "JoyconLeft" => Ok(FormFactor::JoyconLeft),
            "3" | "JoyconRight" => Ok(FormFactor::JoyconRight),
            "4" | "Handheld" => Ok(FormFactor::Handheld),
            other => Err(UnknownFormFactor(other.to_string())),
        }
    }
}

/// Slot footprint of one matched device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Single(FormFactor),
    /// Combined Joy-Cons split over two consecutive slots
    Pair { first: FormFactor, second: FormFactor },
}

impl Layout {
    /// Form factor of every slot this layout occupies, in slot order
    pub fn slots(self) -> Vec<FormFactor> {
        match self {
            Layout::Single(form) => vec![form],
            Layout::Pair { first, second } => vec![first, second],
        }
    }

    pub fn width(self) -> usize {
        match self {
            Layout::Single(_) => 1,
            Layout::Pair { .. } => 2,
        }
    }
}

/// Classify a device from its type code and the slot's override
///
/// A combined Joy-Con device (type 13) splits into a Left/Right pair unless
/// the user asked for a single grip. Everything else takes the override,
/// Pro Controller when there is none.
pub fn classify(pad_type: PadType, override_form: Option<FormFactor>) -> Layout {
    if pad_type == PadType::JOYCON_PAIR {
        return match override_form {
            Some(FormFactor::JoyconRight) => Layout::Pair {
                first: FormFactor::JoyconRight,
                second: FormFactor::JoyconLeft,
            },
            Some(FormFactor::DualJoycons | FormFactor::ProController | FormFactor::Handheld) => {
                Layout::Single(FormFactor::DualJoycons)
            }
            Some(FormFactor::JoyconLeft) | None => Layout::Pair {
                first: FormFactor::JoyconLeft,
                second: FormFactor::JoyconRight,
            },
        };
    }

    Layout::Single(override_form.unwrap_or(FormFactor::ProController))
}
