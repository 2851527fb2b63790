//! switch-configgen
//!
//! Controller mapping and configuration generation for the yuzu and Ryujinx
//! Switch emulators. The binary reads a launch request from the front-end,
//! matches its controllers to the physical pads, rewrites the emulator's
//! config file and starts the emulator.

pub mod config;
pub mod drivers;
pub mod error;
pub mod ini;
pub mod input;
pub mod launch;
pub mod paths;
