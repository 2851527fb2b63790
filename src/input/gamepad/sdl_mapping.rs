//! `SDL_GAMECONTROLLERCONFIG` synthesis
//!
//! The emulators run their own SDL instance. Handing them a mapping line per
//! front-end controller makes SDL agree with the front-end about which
//! physical input is which logical button.

use super::logical::{InputKind, LogicalController, RawInput};

/// Front-end input name -> SDL mapping field
const SDL_FIELDS: &[(&str, &str)] = &[
    ("a", "b"),
    ("b", "a"),
    ("x", "y"),
    ("y", "x"),
    ("hotkey", "guide"),
    ("start", "start"),
    ("select", "back"),
    ("pageup", "leftshoulder"),
    ("pagedown", "rightshoulder"),
    ("l2", "lefttrigger"),
    ("r2", "righttrigger"),
    ("l3", "leftstick"),
    ("r3", "rightstick"),
    ("up", "dpup"),
    ("down", "dpdown"),
    ("left", "dpleft"),
    ("right", "dpright"),
    ("joystick1left", "leftx"),
    ("joystick1up", "lefty"),
    ("joystick2left", "rightx"),
    ("joystick2up", "righty"),
];

fn is_stick(name: &str) -> bool {
    name.starts_with("joystick")
}

fn field_value(name: &str, input: &RawInput) -> Option<String> {
    match input.kind {
        InputKind::Button => Some(format!("b{}", input.id)),
        InputKind::Hat => Some(format!("h{}.{}", input.id, input.value)),
        // Front-end records stick up/left; a positive sample means the axis is flipped
        InputKind::Axis if is_stick(name) && input.value > 0 => Some(format!("a{}~", input.id)),
        InputKind::Axis => Some(format!("a{}", input.id)),
        InputKind::Key => None,
    }
}

/// Mapping line for one controller
pub fn mapping_line(controller: &LogicalController) -> String {
    let mut line = format!("{},{},", controller.guid, controller.real_name.replace(',', " "));
    for (name, field) in SDL_FIELDS {
        if let Some(value) = controller.input(name).and_then(|i| field_value(name, i)) {
            line.push_str(field);
            line.push(':');
            line.push_str(&value);
            line.push(',');
        }
    }
    line.push_str("platform:Linux,");
    line
}

/// Full `SDL_GAMECONTROLLERCONFIG` value, one line per controller
pub fn game_controller_config<'a>(
    controllers: impl IntoIterator<Item = &'a LogicalController>,
) -> String {
    controllers
        .into_iter()
        .map(mapping_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> LogicalController {
        serde_yaml::from_str(
            r#"
player: 1
guid: 030000005e0400008e02000014010000
real_name: Xbox 360, wired
inputs:
  a: { type: button, id: 1, value: 1 }
  b: { type: button, id: 0, value: 1 }
  up: { type: hat, id: 0, value: 1 }
  l2: { type: axis, id: 2, value: 1 }
  joystick1up: { type: axis, id: 1, value: -1 }
  joystick1left: { type: axis, id: 0, value: 1 }
  f1: { type: key, id: 59, value: 1 }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_mapping_line() {
        assert_eq!(
            mapping_line(&controller()),
            "030000005e0400008e02000014010000,Xbox 360  wired,b:b1,a:b0,lefttrigger:a2,dpup:h0.1,leftx:a0~,lefty:a1,platform:Linux,"
        );
    }

    #[test]
    fn test_one_line_per_controller() {
        let first = controller();
        let mut second = controller();
        second.guid = "03000000c82d00000631000014010000".into();
        second.inputs.clear();

        let config = game_controller_config([&first, &second]);
        let lines: Vec<&str> = config.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "03000000c82d00000631000014010000,Xbox 360  wired,platform:Linux,");
    }
}
