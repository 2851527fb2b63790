//! Controller diagnostics for troubleshooting mapping issues

use super::device::{BindSource, PadButton, PhysicalDevice};
use super::slot::{PlannedSlot, SlotSource};
use colored::*;
use strum::IntoEnumIterator;
use tracing::info;

fn describe_bind(bind: Option<BindSource>) -> String {
    match bind {
        Some(BindSource::Button { index }) => format!("b{}", index),
        Some(BindSource::Hat { hat, direction }) => format!("h{}.{}", hat, direction.as_str()),
        Some(BindSource::Axis { index }) => format!("a{}", index),
        None => "-".to_string(),
    }
}

/// Print every enumerated controller (`--list-devices`)
pub fn print_device_list(devices: &[PhysicalDevice]) {
    println!("\n{}", "=== Game Controllers ===".bold().cyan());

    if devices.is_empty() {
        println!("  {}", "No game controllers found".yellow());
        return;
    }

    for device in devices {
        println!(
            "\n  {} {}",
            format!("#{}", device.index).bright_white(),
            device.name.green()
        );
        println!("    GUID: {}", device.guid.cyan());
        println!("    Path: {}", device.path);
        println!("    Type: {}", device.pad_type.to_string().yellow());

        let binds: Vec<String> = PadButton::iter()
            .filter(|b| *b != PadButton::Unbound)
            .map(|b| {
                let name: &'static str = b.into();
                format!("{}={}", name, describe_bind(device.bind(b)))
            })
            .collect();
        println!("    Binds: {}", binds.join(" ").dimmed());
        println!(
            "    Sticks: left a{}/a{} right a{}/a{}",
            device.sticks.left,
            device.sticks.left + 1,
            device.sticks.right,
            device.sticks.right + 1
        );
    }
    println!();
}

/// Log enumerated controllers when debug logging is requested
pub fn log_devices(devices: &[PhysicalDevice]) {
    info!("=== {} physical controller(s) ===", devices.len());
    for device in devices {
        info!(
            "📋 #{} {} guid={} type={} path={}",
            device.index, device.name, device.guid, device.pad_type, device.path
        );
    }
}

/// Log the slot plan when debug logging is requested
pub fn log_slots(slots: &[PlannedSlot<'_>]) {
    info!("=== {} emulator slot(s) ===", slots.len());
    for slot in slots {
        let source = match &slot.source {
            SlotSource::Device(device) => format!("device #{} (type {})", device.index, device.pad_type),
            SlotSource::Frontend => "front-end inputs".to_string(),
            SlotSource::Unmatched => "unmatched".to_string(),
        };
        info!(
            "🎮 slot {} <- player {} '{}' as {} from {}",
            slot.slot + 1,
            slot.controller.player,
            slot.controller.real_name,
            slot.form_factor,
            source
        );
    }
}
