//! Ryujinx `left_joycon` / `right_joycon` tables
//!
//! Tables are written for Xbox-style pads; Nintendo-layout pads get the
//! A/B, X/Y swap on top. Ryujinx rotates sideways Joy-Con sticks itself
//! from `controller_type`, so stick records only pick the source stick.

use crate::input::gamepad::device::{PadButton, PadType, PhysicalStick};
use crate::input::gamepad::layout::FormFactor;
use strum::{EnumCount, EnumIter, IntoStaticStr};

/// Ryujinx's own spelling of "no binding"
pub const UNBOUND: &str = "Unbound";

/// Whether a pad type uses the Nintendo face layout under Ryujinx
pub fn is_nintendo_layout(pad_type: PadType) -> bool {
    pad_type == PadType::UNKNOWN || pad_type == PadType::SWITCH_PRO || pad_type.0 >= 11
}

/// Keys of the `left_joycon` record, in Ryujinx order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum LeftJoyconButton {
    ButtonMinus,
    ButtonL,
    ButtonZl,
    ButtonSl,
    ButtonSr,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
}

/// Keys of the `right_joycon` record, in Ryujinx order
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumCount, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RightJoyconButton {
    ButtonPlus,
    ButtonR,
    ButtonZr,
    ButtonSl,
    ButtonSr,
    ButtonX,
    ButtonB,
    ButtonY,
    ButtonA,
}

impl LeftJoyconButton {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

impl RightJoyconButton {
    pub fn key(self) -> &'static str {
        self.into()
    }
}

/// Ryujinx `GamepadInputId` name of an SDL logical button
pub fn input_id(button: PadButton) -> &'static str {
    match button {
        PadButton::A => "A",
        PadButton::B => "B",
        PadButton::X => "X",
        PadButton::Y => "Y",
        PadButton::Back => "Minus",
        PadButton::Guide => "Guide",
        PadButton::Start => "Plus",
        PadButton::LeftStick => "LeftStick",
        PadButton::RightStick => "RightStick",
        PadButton::LeftShoulder => "LeftShoulder",
        PadButton::RightShoulder => "RightShoulder",
        PadButton::DpadUp => "DpadUp",
        PadButton::DpadDown => "DpadDown",
        PadButton::DpadLeft => "DpadLeft",
        PadButton::DpadRight => "DpadRight",
        PadButton::LeftTrigger => "LeftTrigger",
        PadButton::RightTrigger => "RightTrigger",
        PadButton::Unbound => UNBOUND,
    }
}

fn swap_if(button: PadButton, nintendo_layout: bool) -> PadButton {
    if nintendo_layout {
        button.face_swapped()
    } else {
        button
    }
}

pub fn left_default(form: FormFactor, button: LeftJoyconButton) -> PadButton {
    use LeftJoyconButton as L;
    use PadButton as P;

    match (form, button) {
        (_, L::ButtonMinus) => P::Back,
        (_, L::ButtonL) => P::LeftShoulder,
        (_, L::ButtonZl) => P::LeftTrigger,
        (FormFactor::JoyconLeft, L::ButtonSl) => P::LeftShoulder,
        (FormFactor::JoyconLeft, L::ButtonSr) => P::RightShoulder,
        (_, L::ButtonSl | L::ButtonSr) => P::Unbound,
        // Sideways: the face buttons become the d-pad
        (FormFactor::JoyconLeft, L::DpadUp) => P::Y,
        (FormFactor::JoyconLeft, L::DpadDown) => P::A,
        (FormFactor::JoyconLeft, L::DpadLeft) => P::X,
        (FormFactor::JoyconLeft, L::DpadRight) => P::B,
        (_, L::DpadUp) => P::DpadUp,
        (_, L::DpadDown) => P::DpadDown,
        (_, L::DpadLeft) => P::DpadLeft,
        (_, L::DpadRight) => P::DpadRight,
    }
}

pub fn right_default(form: FormFactor, button: RightJoyconButton) -> PadButton {
    use PadButton as P;
    use RightJoyconButton as R;

    match (form, button) {
        (_, R::ButtonPlus) => P::Start,
        (_, R::ButtonR) => P::RightShoulder,
        (_, R::ButtonZr) => P::RightTrigger,
        (FormFactor::JoyconRight, R::ButtonSl) => P::LeftShoulder,
        (FormFactor::JoyconRight, R::ButtonSr) => P::RightShoulder,
        (_, R::ButtonSl | R::ButtonSr) => P::Unbound,
        (FormFactor::JoyconRight, R::ButtonX) => P::B,
        (FormFactor::JoyconRight, R::ButtonB) => P::X,
        (FormFactor::JoyconRight, R::ButtonY) => P::Y,
        (FormFactor::JoyconRight, R::ButtonA) => P::A,
        (_, R::ButtonX) => P::Y,
        (_, R::ButtonB) => P::A,
        (_, R::ButtonY) => P::X,
        (_, R::ButtonA) => P::B,
    }
}

pub fn left_entry(form: FormFactor, button: LeftJoyconButton, nintendo_layout: bool) -> PadButton {
    swap_if(left_default(form, button), nintendo_layout)
}

pub fn right_entry(form: FormFactor, button: RightJoyconButton, nintendo_layout: bool) -> PadButton {
    swap_if(right_default(form, button), nintendo_layout)
}

/// Which Ryujinx stick record is being filled
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum JoyconStick {
    Left,
    Right,
}

/// Physical stick feeding a Ryujinx stick record, `None` when unbound
pub fn stick_source(form: FormFactor, stick: JoyconStick) -> Option<PhysicalStick> {
    match (form, stick) {
        (FormFactor::JoyconLeft, JoyconStick::Left) => Some(PhysicalStick::Left),
        (FormFactor::JoyconLeft, JoyconStick::Right) => None,
        (FormFactor::JoyconRight, JoyconStick::Left) => None,
        // A lone right Joy-Con reports its stick as the left one
        (FormFactor::JoyconRight, JoyconStick::Right) => Some(PhysicalStick::Left),
        (_, JoyconStick::Left) => Some(PhysicalStick::Left),
        (_, JoyconStick::Right) => Some(PhysicalStick::Right),
    }
}

/// `(joystick, stick_button)` names for a stick source
pub fn stick_names(source: Option<PhysicalStick>) -> (&'static str, &'static str) {
    match source {
        Some(PhysicalStick::Left) => ("Left", input_id(PadButton::LeftStick)),
        Some(PhysicalStick::Right) => ("Right", input_id(PadButton::RightStick)),
        None => (UNBOUND, UNBOUND),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_nintendo_set() {
        let nintendo: Vec<i32> = (0..=20)
            .filter(|code| is_nintendo_layout(PadType(*code)))
            .collect();
        let mut expected = vec![0, 5];
        expected.extend(11..=20);
        assert_eq!(nintendo, expected);
    }

    #[test]
    fn test_face_swap_every_form_factor_and_type() {
        use RightJoyconButton as R;

        for form in FormFactor::iter() {
            for code in 0..=20 {
                let nintendo = is_nintendo_layout(PadType(code));
                for button in [R::ButtonA, R::ButtonB, R::ButtonX, R::ButtonY] {
                    let default = right_default(form, button);
                    let emitted = right_entry(form, button, nintendo);
                    if nintendo {
                        assert_eq!(emitted, default.face_swapped(), "{:?} {:?} type {}", form, button, code);
                        assert_ne!(emitted, default);
                    } else {
                        assert_eq!(emitted, default);
                    }
                }
            }
        }
    }

    #[test]
    fn test_pro_controller_names() {
        use RightJoyconButton as R;

        let xbox: Vec<&str> = [R::ButtonX, R::ButtonB, R::ButtonY, R::ButtonA]
            .iter()
            .map(|b| input_id(right_entry(FormFactor::ProController, *b, false)))
            .collect();
        assert_eq!(xbox, vec!["Y", "A", "X", "B"]);

        let nintendo: Vec<&str> = [R::ButtonX, R::ButtonB, R::ButtonY, R::ButtonA]
            .iter()
            .map(|b| input_id(right_entry(FormFactor::ProController, *b, true)))
            .collect();
        assert_eq!(nintendo, vec!["X", "B", "Y", "A"]);
    }

    #[test]
    fn test_joycon_right_names() {
        use RightJoyconButton as R;

        let names = |nintendo| -> Vec<&'static str> {
            [R::ButtonX, R::ButtonB, R::ButtonY, R::ButtonA, R::ButtonSl, R::ButtonSr]
                .iter()
                .map(|b| input_id(right_entry(FormFactor::JoyconRight, *b, nintendo)))
                .collect()
        };
        assert_eq!(names(false), vec!["B", "X", "Y", "A", "LeftShoulder", "RightShoulder"]);
        assert_eq!(names(true), vec!["A", "Y", "X", "B", "LeftShoulder", "RightShoulder"]);
    }

    #[test]
    fn test_joycon_left_dpad_from_face_buttons() {
        let names: Vec<&str> = LeftJoyconButton::iter()
            .map(|b| input_id(left_entry(FormFactor::JoyconLeft, b, false)))
            .collect();
        assert_eq!(
            names,
            vec!["Minus", "LeftShoulder", "LeftTrigger", "LeftShoulder", "RightShoulder", "Y", "A", "X", "B"]
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(LeftJoyconButton::ButtonZl.key(), "button_zl");
        assert_eq!(LeftJoyconButton::DpadRight.key(), "dpad_right");
        assert_eq!(RightJoyconButton::ButtonPlus.key(), "button_plus");
    }

    #[test]
    fn test_sticks() {
        assert_eq!(
            stick_names(stick_source(FormFactor::JoyconRight, JoyconStick::Right)),
            ("Left", "LeftStick")
        );
        assert_eq!(
            stick_names(stick_source(FormFactor::JoyconLeft, JoyconStick::Right)),
            ("Unbound", "Unbound")
        );
        assert_eq!(
            stick_names(stick_source(FormFactor::Handheld, JoyconStick::Right)),
            ("Right", "RightStick")
        );
    }
}
