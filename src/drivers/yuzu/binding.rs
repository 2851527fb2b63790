//! yuzu binding expressions
//!
//! yuzu stores every input as a comma-separated `key:value` parameter list
//! (`button:1,guid:...,port:0,engine:sdl`). These types render and parse
//! that format.

use super::layout::StickAxes;
use crate::input::gamepad::device::HatDirection;
use anyhow::{anyhow, bail, Result};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Value yuzu uses for an unbound input
pub const EMPTY: &str = "[empty]";

const STICK_OFFSET_X: &str = "-0.011750";
const STICK_OFFSET_Y: &str = "-0.027467";
const STICK_DEADZONE: &str = "0.150000";
const STICK_RANGE: &str = "0.950000";
const TRIGGER_THRESHOLD: &str = "0.500000";

const KEYBOARD_LSTICK: &str = "modifier_scale:0.500000,modifier:toggle$00$1code$016777248$1engine$0keyboard,right:toggle$00$1code$068$1engine$0keyboard,left:toggle$00$1code$065$1engine$0keyboard,down:toggle$00$1code$083$1engine$0keyboard,up:toggle$00$1code$087$1engine$0keyboard,engine:analog_from_button";
const KEYBOARD_RSTICK: &str = "modifier_scale:0.500000,modifier:toggle$00$1code$00$1engine$0keyboard,right:toggle$00$1code$076$1engine$0keyboard,left:toggle$00$1code$074$1engine$0keyboard,down:toggle$00$1code$075$1engine$0keyboard,up:toggle$00$1code$073$1engine$0keyboard,engine:analog_from_button";

/// GUID yuzu's Joy-Con driver reports for a pad number
fn joycon_guid(pad: u8) -> String {
    format!("0000000000000000000000000000000{}", pad)
}

fn sign(inverted: bool) -> char {
    if inverted {
        '-'
    } else {
        '+'
    }
}

/// `key:value,...` parameter list
fn params(s: &str) -> HashMap<&str, &str> {
    s.split(',').filter_map(|pair| pair.split_once(':')).collect()
}

fn field<'a>(params: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str> {
    params
        .get(key)
        .copied()
        .ok_or_else(|| anyhow!("missing '{}'", key))
}

fn number<T: FromStr>(params: &HashMap<&str, &str>, key: &str) -> Result<T> {
    let raw = field(params, key)?;
    raw.parse()
        .map_err(|_| anyhow!("invalid '{}' value '{}'", key, raw))
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Digital input binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Empty,
    SdlButton { button: u32, guid: String, port: usize },
    SdlHat { hat: u32, direction: HatDirection, guid: String, port: usize },
    /// Analog axis read as a button past the threshold
    SdlAxis { axis: u32, guid: String, port: usize },
    Joycon { pad: u8, button: u32, port: usize },
    Keyboard { code: u32 },
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Empty => f.write_str(EMPTY),
            Binding::SdlButton { button, guid, port } => {
                write!(f, "button:{},guid:{},port:{},engine:sdl", button, guid, port)
            }
            Binding::SdlHat { hat, direction, guid, port } => write!(
                f,
                "hat:{},direction:{},guid:{},port:{},engine:sdl",
                hat,
                direction.as_str(),
                guid,
                port
            ),
            Binding::SdlAxis { axis, guid, port } => write!(
                f,
                "engine:sdl,invert:+,port:{},guid:{},axis:{},threshold:{}",
                port, guid, axis, TRIGGER_THRESHOLD
            ),
            Binding::Joycon { pad, button, port } => write!(
                f,
                "pad:{},button:{},port:{},guid:{},engine:joycon",
                pad,
                button,
                port,
                joycon_guid(*pad)
            ),
            Binding::Keyboard { code } => write!(f, "toggle:0,code:{},engine:keyboard", code),
        }
    }
}

impl FromStr for Binding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = unquote(s);
        if s == EMPTY {
            return Ok(Binding::Empty);
        }

        let p = params(s);
        match field(&p, "engine")? {
            "sdl" => {
                let guid = field(&p, "guid")?.to_string();
                let port = number(&p, "port")?;
                if p.contains_key("hat") {
                    let direction = field(&p, "direction")?;
                    Ok(Binding::SdlHat {
                        hat: number(&p, "hat")?,
                        direction: HatDirection::parse(direction)
                            .ok_or_else(|| anyhow!("invalid direction '{}'", direction))?,
                        guid,
                        port,
                    })
                } else if p.contains_key("axis") {
                    Ok(Binding::SdlAxis {
                        axis: number(&p, "axis")?,
                        guid,
                        port,
                    })
                } else {
                    Ok(Binding::SdlButton {
                        button: number(&p, "button")?,
                        guid,
                        port,
                    })
                }
            }
            "joycon" => Ok(Binding::Joycon {
                pad: number(&p, "pad")?,
                button: number(&p, "button")?,
                port: number(&p, "port")?,
            }),
            "keyboard" => Ok(Binding::Keyboard {
                code: number(&p, "code")?,
            }),
            other => bail!("unsupported engine '{}'", other),
        }
    }
}

/// Keyboard-driven stick of the fallback scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardStick {
    /// WASD, shift as modifier
    Left,
    /// IJKL
    Right,
}

/// Analog stick binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StickBinding {
    Empty,
    Sdl { axes: StickAxes, guid: String, port: usize },
    Joycon { pad: u8, axis_x: u32, axis_y: u32, port: usize },
    Keyboard(KeyboardStick),
}

impl fmt::Display for StickBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StickBinding::Empty => f.write_str(EMPTY),
            StickBinding::Sdl { axes, guid, port } => write!(
                f,
                "engine:sdl,port:{},guid:{},axis_x:{},offset_x:{},axis_y:{},offset_y:{},invert_x:{},invert_y:{},deadzone:{},range:{}",
                port,
                guid,
                axes.axis_x,
                STICK_OFFSET_X,
                axes.axis_y,
                STICK_OFFSET_Y,
                sign(axes.invert_x),
                sign(axes.invert_y),
                STICK_DEADZONE,
                STICK_RANGE
            ),
            StickBinding::Joycon { pad, axis_x, axis_y, port } => write!(
                f,
                "axis_y:{},axis_x:{},pad:{},port:{},guid:{},engine:joycon",
                axis_y,
                axis_x,
                pad,
                port,
                joycon_guid(*pad)
            ),
            StickBinding::Keyboard(KeyboardStick::Left) => f.write_str(KEYBOARD_LSTICK),
            StickBinding::Keyboard(KeyboardStick::Right) => f.write_str(KEYBOARD_RSTICK),
        }
    }
}

impl FromStr for StickBinding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = unquote(s);
        match s {
            EMPTY => return Ok(StickBinding::Empty),
            KEYBOARD_LSTICK => return Ok(StickBinding::Keyboard(KeyboardStick::Left)),
            KEYBOARD_RSTICK => return Ok(StickBinding::Keyboard(KeyboardStick::Right)),
            _ => {}
        }

        let p = params(s);
        match field(&p, "engine")? {
            "sdl" => Ok(StickBinding::Sdl {
                axes: StickAxes {
                    axis_x: number(&p, "axis_x")?,
                    axis_y: number(&p, "axis_y")?,
                    invert_x: field(&p, "invert_x")? == "-",
                    invert_y: field(&p, "invert_y")? == "-",
                },
                guid: field(&p, "guid")?.to_string(),
                port: number(&p, "port")?,
            }),
            "joycon" => Ok(StickBinding::Joycon {
                pad: number(&p, "pad")?,
                axis_x: number(&p, "axis_x")?,
                axis_y: number(&p, "axis_y")?,
                port: number(&p, "port")?,
            }),
            other => bail!("unsupported stick engine '{}'", other),
        }
    }
}

/// Motion sensor binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MotionBinding {
    Empty,
    Sdl { guid: String, port: usize },
    Joycon { motion: u8, pad: u8, port: usize },
}

impl fmt::Display for MotionBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionBinding::Empty => f.write_str(EMPTY),
            MotionBinding::Sdl { guid, port } => {
                write!(f, "engine:sdl,motion:0,port:{},guid:{}", port, guid)
            }
            MotionBinding::Joycon { motion, pad, port } => write!(
                f,
                "motion:{},pad:{},port:{},guid:{},engine:joycon",
                motion,
                pad,
                port,
                joycon_guid(*pad)
            ),
        }
    }
}

impl FromStr for MotionBinding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = unquote(s);
        if s == EMPTY {
            return Ok(MotionBinding::Empty);
        }

        let p = params(s);
        match field(&p, "engine")? {
            "sdl" => Ok(MotionBinding::Sdl {
                guid: field(&p, "guid")?.to_string(),
                port: number(&p, "port")?,
            }),
            "joycon" => Ok(MotionBinding::Joycon {
                motion: number(&p, "motion")?,
                pad: number(&p, "pad")?,
                port: number(&p, "port")?,
            }),
            other => bail!("unsupported motion engine '{}'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUID: &str = "030000005e0400008e02000014010000";

    #[test]
    fn test_sdl_button_format() {
        let binding = Binding::SdlButton {
            button: 1,
            guid: GUID.into(),
            port: 0,
        };
        assert_eq!(
            binding.to_string(),
            "button:1,guid:030000005e0400008e02000014010000,port:0,engine:sdl"
        );
    }

    #[test]
    fn test_sdl_hat_format() {
        let binding = Binding::SdlHat {
            hat: 0,
            direction: HatDirection::Left,
            guid: GUID.into(),
            port: 1,
        };
        assert_eq!(
            binding.to_string(),
            "hat:0,direction:left,guid:030000005e0400008e02000014010000,port:1,engine:sdl"
        );
    }

    #[test]
    fn test_axis_trigger_format() {
        let binding = Binding::SdlAxis {
            axis: 5,
            guid: GUID.into(),
            port: 0,
        };
        assert_eq!(
            binding.to_string(),
            "engine:sdl,invert:+,port:0,guid:030000005e0400008e02000014010000,axis:5,threshold:0.500000"
        );
    }

    #[test]
    fn test_joycon_format() {
        let binding = Binding::Joycon {
            pad: 2,
            button: 2048,
            port: 0,
        };
        assert_eq!(
            binding.to_string(),
            "pad:2,button:2048,port:0,guid:00000000000000000000000000000002,engine:joycon"
        );
    }

    #[test]
    fn test_stick_format() {
        let binding = StickBinding::Sdl {
            axes: StickAxes {
                axis_x: 1,
                axis_y: 0,
                invert_x: true,
                invert_y: false,
            },
            guid: GUID.into(),
            port: 0,
        };
        assert_eq!(
            binding.to_string(),
            "engine:sdl,port:0,guid:030000005e0400008e02000014010000,axis_x:1,offset_x:-0.011750,axis_y:0,offset_y:-0.027467,invert_x:-,invert_y:+,deadzone:0.150000,range:0.950000"
        );
    }

    #[test]
    fn test_motion_format() {
        assert_eq!(
            MotionBinding::Sdl { guid: GUID.into(), port: 0 }.to_string(),
            "engine:sdl,motion:0,port:0,guid:030000005e0400008e02000014010000"
        );
        assert_eq!(
            MotionBinding::Joycon { motion: 1, pad: 2, port: 0 }.to_string(),
            "motion:1,pad:2,port:0,guid:00000000000000000000000000000002,engine:joycon"
        );
    }

    #[test]
    fn test_parse_quoted_values() {
        let parsed: Binding = "\"toggle:0,code:67,engine:keyboard\"".parse().unwrap();
        assert_eq!(parsed, Binding::Keyboard { code: 67 });

        let parsed: Binding = "[empty]".parse().unwrap();
        assert_eq!(parsed, Binding::Empty);

        let parsed: StickBinding = format!("\"{}\"", KEYBOARD_RSTICK).parse().unwrap();
        assert_eq!(parsed, StickBinding::Keyboard(KeyboardStick::Right));
    }

    #[test]
    fn test_parse_rejects_unknown_engine() {
        assert!("button:1,engine:mouse".parse::<Binding>().is_err());
        assert!("button:1,guid:x,port:0".parse::<Binding>().is_err());
        assert!("button:x,guid:g,port:0,engine:sdl".parse::<Binding>().is_err());
    }
}
