//! SDL2 game controller enumeration
//!
//! The SDL context lives only for the duration of [`SdlEnumerator::enumerate`]:
//! it is initialized on entry and torn down when the context drops, on every
//! return path. Each controller is opened, read and closed before moving on.

use super::device::{
    canonical_guid, BindSource, HatDirection, PadButton, PadType, PhysicalDevice, StickAxes,
    TriggerBind, JOYCONS_COMBINED_PATH,
};
use super::platform::PlatformQuery;
use super::provider::DeviceEnumerator;
use crate::error::EnumerationError;
use sdl2::sys;
use std::collections::BTreeMap;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use tracing::{debug, info, warn};

// Added in SDL 2.24, not every sdl2-sys release binds it.
extern "C" {
    fn SDL_JoystickPathForIndex(device_index: c_int) -> *const c_char;
}

const BUTTONS: &[(PadButton, sys::SDL_GameControllerButton)] = &[
    (PadButton::A, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_A),
    (PadButton::B, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_B),
    (PadButton::X, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_X),
    (PadButton::Y, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_Y),
    (PadButton::Back, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_BACK),
    (PadButton::Guide, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_GUIDE),
    (PadButton::Start, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_START),
    (PadButton::LeftStick, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_LEFTSTICK),
    (PadButton::RightStick, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_RIGHTSTICK),
    (PadButton::LeftShoulder, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_LEFTSHOULDER),
    (PadButton::RightShoulder, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_RIGHTSHOULDER),
    (PadButton::DpadUp, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_DPAD_UP),
    (PadButton::DpadDown, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_DPAD_DOWN),
    (PadButton::DpadLeft, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_DPAD_LEFT),
    (PadButton::DpadRight, sys::SDL_GameControllerButton::SDL_CONTROLLER_BUTTON_DPAD_RIGHT),
];

/// Live enumeration through SDL's game controller API
#[derive(Debug, Default, Clone, Copy)]
pub struct SdlEnumerator;

/// Open controller handle, closed on drop
struct OpenController(*mut sys::SDL_GameController);

impl OpenController {
    fn open(index: c_int) -> Option<Self> {
        let raw = unsafe { sys::SDL_GameControllerOpen(index) };
        if raw.is_null() {
            None
        } else {
            Some(Self(raw))
        }
    }

    fn button_bind(&self, button: sys::SDL_GameControllerButton) -> Option<BindSource> {
        let bind = unsafe { sys::SDL_GameControllerGetBindForButton(self.0, button) };
        to_bind_source(&bind)
    }

    fn axis_bind(&self, axis: sys::SDL_GameControllerAxis) -> Option<BindSource> {
        let bind = unsafe { sys::SDL_GameControllerGetBindForAxis(self.0, axis) };
        to_bind_source(&bind)
    }

    fn trigger(&self, axis: sys::SDL_GameControllerAxis) -> Option<TriggerBind> {
        match self.axis_bind(axis)? {
            BindSource::Axis { index } => Some(TriggerBind::Axis { index }),
            BindSource::Button { index } => Some(TriggerBind::Button { index }),
            BindSource::Hat { .. } => None,
        }
    }

    fn stick_base(&self, axis: sys::SDL_GameControllerAxis) -> Option<u32> {
        match self.axis_bind(axis)? {
            BindSource::Axis { index } => Some(index),
            _ => None,
        }
    }
}

impl Drop for OpenController {
    fn drop(&mut self) {
        unsafe { sys::SDL_GameControllerClose(self.0) };
    }
}

fn to_bind_source(bind: &sys::SDL_GameControllerButtonBind) -> Option<BindSource> {
    use sys::SDL_GameControllerBindType as BindType;

    // The active union member is selected by bindType.
    unsafe {
        match bind.bindType {
            BindType::SDL_CONTROLLER_BINDTYPE_BUTTON => Some(BindSource::Button {
                index: bind.value.button as u32,
            }),
            BindType::SDL_CONTROLLER_BINDTYPE_AXIS => Some(BindSource::Axis {
                index: bind.value.axis as u32,
            }),
            BindType::SDL_CONTROLLER_BINDTYPE_HAT => {
                let direction = HatDirection::from_mask(bind.value.hat.hat_mask)?;
                Some(BindSource::Hat {
                    hat: bind.value.hat.hat as u32,
                    direction,
                })
            }
            _ => None,
        }
    }
}

fn joystick_path(index: c_int) -> Option<String> {
    let raw = unsafe { SDL_JoystickPathForIndex(index) };
    if raw.is_null() {
        return None;
    }
    let path = unsafe { CStr::from_ptr(raw) };
    Some(path.to_string_lossy().into_owned())
}

impl SdlEnumerator {
    fn describe(
        index: u32,
        joystick: &sdl2::JoystickSubsystem,
        controllers: &sdl2::GameControllerSubsystem,
        platform: &dyn PlatformQuery,
    ) -> Option<PhysicalDevice> {
        let raw_guid = match joystick.device_guid(index) {
            Ok(guid) => guid.string(),
            Err(e) => {
                warn!("⚠️  No GUID for joystick {}: {}", index, e);
                return None;
            }
        };
        let name = controllers.name_for_index(index).unwrap_or_default();

        let raw_path = joystick_path(index as c_int).unwrap_or_default();
        let path = if raw_path == JOYCONS_COMBINED_PATH {
            raw_path
        } else {
            match platform.resolve_device_path(&raw_path) {
                Ok(key) => key,
                Err(e) => {
                    warn!("⚠️  Could not resolve {} ({}): {:#}", raw_path, name, e);
                    raw_path
                }
            }
        };

        let raw_type = unsafe { sys::SDL_GameControllerTypeForIndex(index as c_int) } as i32;
        let pad_type = PadType::from_name(PadType(raw_type), &name);

        let controller = match OpenController::open(index as c_int) {
            Some(controller) => controller,
            None => {
                warn!("⚠️  Could not open controller {} ({})", index, name);
                return None;
            }
        };

        let buttons: BTreeMap<PadButton, BindSource> = BUTTONS
            .iter()
            .filter_map(|(button, sdl_button)| {
                controller.button_bind(*sdl_button).map(|bind| (*button, bind))
            })
            .collect();

        use sys::SDL_GameControllerAxis as Axis;
        let defaults = StickAxes::default();
        let sticks = StickAxes {
            left: controller
                .stick_base(Axis::SDL_CONTROLLER_AXIS_LEFTX)
                .unwrap_or(defaults.left),
            right: controller
                .stick_base(Axis::SDL_CONTROLLER_AXIS_RIGHTX)
                .unwrap_or(defaults.right),
        };

        Some(PhysicalDevice {
            index,
            guid: canonical_guid(&raw_guid),
            path,
            pad_type,
            name,
            buttons,
            left_trigger: controller.trigger(Axis::SDL_CONTROLLER_AXIS_TRIGGERLEFT),
            right_trigger: controller.trigger(Axis::SDL_CONTROLLER_AXIS_TRIGGERRIGHT),
            sticks,
        })
    }
}

impl DeviceEnumerator for SdlEnumerator {
    fn enumerate(
        &self,
        platform: &dyn PlatformQuery,
    ) -> Result<Vec<PhysicalDevice>, EnumerationError> {
        sdl2::hint::set("SDL_JOYSTICK_ALLOW_BACKGROUND_EVENTS", "1");

        let sdl = sdl2::init().map_err(EnumerationError::SubsystemInit)?;
        let joystick = sdl.joystick().map_err(EnumerationError::SubsystemInit)?;
        let controllers = sdl
            .game_controller()
            .map_err(EnumerationError::SubsystemInit)?;
        let count = joystick
            .num_joysticks()
            .map_err(EnumerationError::SubsystemInit)?;

        let mut devices = Vec::new();
        for index in 0..count {
            if !controllers.is_game_controller(index) {
                debug!("Joystick {} has no game controller mapping, skipping", index);
                continue;
            }
            if let Some(device) = Self::describe(index, &joystick, &controllers, platform) {
                debug!(
                    "Found {} [{}] type {} at {}",
                    device.name, device.guid, device.pad_type, device.path
                );
                devices.push(device);
            }
        }

        info!("✅ Enumerated {} game controller(s)", devices.len());
        Ok(devices)
    }
}
