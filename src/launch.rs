//! Emulator process invocation

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use tracing::info;

/// argv + environment of one emulator launch
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Added on top of the inherited environment
    pub env: IndexMap<String, String>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: IndexMap::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Run the emulator and wait for it to exit
    pub fn spawn(&self) -> Result<ExitStatus> {
        info!("🚀 Launching {}", self);
        Command::new(&self.program)
            .args(&self.args)
            .envs(&self.env)
            .status()
            .with_context(|| format!("Failed to launch {}", self.program.display()))
    }
}

impl fmt::Display for LaunchCommand {
    /// Shell-like rendering; multi-line values are shown by length only
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            if value.contains('\n') {
                write!(f, "{}=<{} lines> ", key, value.lines().count())?;
            } else {
                write!(f, "{}={:?} ", key, value)?;
            }
        }
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {:?}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_display() {
        let cmd = LaunchCommand::new("/userdata/system/switch/yuzu.AppImage")
            .arg("-f")
            .arg("-g")
            .arg("/roms/game.nsp")
            .env("QT_QPA_PLATFORM", "xcb")
            .env("SDL_GAMECONTROLLERCONFIG", "a\nb");

        assert_eq!(cmd.args, vec!["-f", "-g", "/roms/game.nsp"]);
        assert_eq!(
            cmd.to_string(),
            "QT_QPA_PLATFORM=\"xcb\" SDL_GAMECONTROLLERCONFIG=<2 lines> /userdata/system/switch/yuzu.AppImage \"-f\" \"-g\" \"/roms/game.nsp\""
        );
    }

    #[test]
    fn test_spawn_missing_program_fails() {
        let err = LaunchCommand::new("/nonexistent/emulator.AppImage")
            .spawn()
            .unwrap_err();
        assert!(err.to_string().contains("Failed to launch"));
    }
}
