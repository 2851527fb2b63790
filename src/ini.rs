//! Order-preserving Qt INI document
//!
//! yuzu stores its settings through `QSettings` in INI format. Only the
//! controller keys are rewritten; every other section and key is written back
//! in its original order.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Section that holds keys appearing before any header
const GENERAL: &str = "General";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QtIni {
    sections: IndexMap<String, IndexMap<String, String>>,
}

impl QtIni {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse INI text; comments and blank lines are dropped
    pub fn parse(text: &str) -> Self {
        let mut ini = Self::new();
        let mut current = GENERAL.to_string();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = name.trim().to_string();
                ini.sections.entry(current.clone()).or_default();
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                ini.set(&current, key.trim(), value.trim());
            }
        }

        ini
    }

    /// Load a file, or an empty document when it does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("{} does not exist yet, starting empty", path.display());
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read INI file: {}", path.display()))?;
        Ok(Self::parse(&text))
    }

    /// Write the document, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_string())
            .with_context(|| format!("Failed to write INI file: {}", path.display()))
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Set a key, keeping its position when it already exists
    pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
    }

    #[cfg(test)]
    pub fn section(&self, name: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(name)
    }
}

impl fmt::Display for QtIni {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, keys)) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "[{}]", name)?;
            for (key, value) in keys {
                writeln!(f, "{}={}", key, value)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"[UI]
theme=default
Paths\gamedirs\size=1

[Controls]
player_0_button_a="button:1,guid:030000005e0400008e02000014010000,port:0,engine:sdl"
player_0_button_a\default=false
vibration_enabled=true

[Renderer]
backend=1
"#;

    #[test]
    fn test_parse_and_get() {
        let ini = QtIni::parse(SAMPLE);
        assert_eq!(ini.get("UI", "theme"), Some("default"));
        assert_eq!(ini.get("UI", "Paths\\gamedirs\\size"), Some("1"));
        assert_eq!(
            ini.get("Controls", "player_0_button_a"),
            Some("\"button:1,guid:030000005e0400008e02000014010000,port:0,engine:sdl\"")
        );
        assert_eq!(ini.get("Renderer", "missing"), None);
    }

    #[test]
    fn test_rewrite_preserves_unrelated_sections() {
        let mut ini = QtIni::parse(SAMPLE);
        ini.set("Controls", "vibration_enabled", "false");
        ini.set("LibraryApplet", "controller_applet_mode", "false");

        let text = ini.to_string();
        let reparsed = QtIni::parse(&text);

        assert!(text.starts_with("[UI]\ntheme=default\n"));
        assert_eq!(reparsed.get("Renderer", "backend"), Some("1"));
        assert_eq!(reparsed.get("Controls", "vibration_enabled"), Some("false"));
        assert_eq!(
            reparsed.section("Controls").unwrap().keys().last().map(String::as_str),
            Some("vibration_enabled")
        );
        assert!(reparsed.section("LibraryApplet").is_some());
    }

    #[test]
    fn test_keys_before_header_go_to_general() {
        let ini = QtIni::parse("; comment\nfoo=bar\n[A]\nx = 1\n");
        assert_eq!(ini.get("General", "foo"), Some("bar"));
        assert_eq!(ini.get("A", "x"), Some("1"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let ini = QtIni::load(&dir.path().join("nope.ini")).unwrap();
        assert_eq!(ini, QtIni::new());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("yuzu").join("qt-config.ini");
        let ini = QtIni::parse(SAMPLE);

        ini.save(&path).unwrap();
        let loaded = QtIni::load(&path).unwrap();

        assert_eq!(loaded.to_string(), ini.to_string());
    }

    proptest! {
        #[test]
        fn prop_text_round_trip(
            entries in prop::collection::vec(
                (
                    "[A-Z][A-Za-z0-9]{0,10}",
                    "[a-z][a-z0-9_\\\\]{0,16}",
                    "[a-zA-Z0-9:,\"$._-]{0,24}",
                ),
                0..40,
            )
        ) {
            let mut ini = QtIni::new();
            for (section, key, value) in &entries {
                ini.set(section, key, value.clone());
            }

            let text = ini.to_string();
            let reparsed = QtIni::parse(&text);

            prop_assert_eq!(reparsed.to_string(), text);
            for (section, key, _) in &entries {
                prop_assert_eq!(reparsed.get(section, key), ini.get(section, key));
            }
        }
    }
}
