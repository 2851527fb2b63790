//! Controller input: enumeration, matching and slot layout

pub mod gamepad;
