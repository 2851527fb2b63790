//! Front-end player assignments
//!
//! The front-end hands over one [`LogicalController`] per player it has a pad
//! for, together with the raw input samples it recorded when the user
//! configured that pad.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// GUID the front-end reports for a lone left Joy-Con
pub const JOYCON_LEFT_HALF_GUID: &str = "050000007e0500000620000001800000";

/// GUID the front-end reports for a lone right Joy-Con
pub const JOYCON_RIGHT_HALF_GUID: &str = "050000007e0500000720000001800000";

/// Display name SDL gives its virtual combined Joy-Con device
pub const COMBINED_JOYCONS_NAME: &str = "Nintendo Switch Combined Joy-Cons";

/// Kind of a recorded front-end input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Button,
    Hat,
    Axis,
    Key,
}

/// One input sample as recorded by the front-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInput {
    #[serde(rename = "type")]
    pub kind: InputKind,
    pub id: i32,
    #[serde(default)]
    pub value: i32,
}

/// One player slot as assigned by the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalController {
    /// 1-based player number
    pub player: u32,
    pub guid: String,
    /// Device node (`/dev/input/eventN`)
    #[serde(default, alias = "dev")]
    pub device_path: String,
    #[serde(alias = "realName")]
    pub real_name: String,
    #[serde(default, alias = "configName")]
    pub config_name: String,
    /// Joystick index the front-end saw the pad at
    #[serde(default)]
    pub index: u32,
    /// Front-end input name (`a`, `pageup`, `joystick1left`, ...) to sample
    #[serde(default)]
    pub inputs: IndexMap<String, RawInput>,
}

impl LogicalController {
    /// Lone Joy-Con halves are driven through the combined device instead
    pub fn is_joycon_half(&self) -> bool {
        self.guid == JOYCON_LEFT_HALF_GUID || self.guid == JOYCON_RIGHT_HALF_GUID
    }

    pub fn is_combined_joycons(&self) -> bool {
        self.real_name == COMBINED_JOYCONS_NAME
    }

    pub fn input(&self, name: &str) -> Option<&RawInput> {
        self.inputs.get(name)
    }
}
