/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Frontend {
    Screen,
    Console,
}

#[derive(Clone, Debug)]
pub struct ShellConfig {
    pub frontend: Frontend,
    pub screen: ScreenConfig,
    pub gamepad: GamepadConfig,
}

#[derive(Clone, Debug)]
pub struct ScreenConfig {
    pub frame_sleep_ms: u64,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub confirm: Vec<String>,
    pub cancel: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    screen: TomlScreen,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_frontend")]
    frontend: String,
}

#[derive(Deserialize, Debug)]
struct TomlScreen {
    #[serde(default = "default_frame_sleep")]
    frame_sleep_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_confirm")]
    confirm: Vec<String>,
    #[serde(default = "default_cancel")]
    cancel: Vec<String>,
}

// ── Defaults ──

fn default_frontend() -> String { "screen".into() }
fn default_frame_sleep() -> u64 { 16 } // ~60 fps

fn default_confirm() -> Vec<String> { vec!["A".into(), "Start".into()] }
fn default_cancel() -> Vec<String> { vec!["B".into(), "Select".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            frontend: default_frontend(),
        }
    }
}

impl Default for TomlScreen {
    fn default() -> Self {
        TomlScreen {
            frame_sleep_ms: default_frame_sleep(),
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            confirm: default_confirm(),
            cancel: default_cancel(),
        }
    }
}

// ── Loading ──

impl ShellConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        ShellConfig::from_toml(toml_cfg)
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        let frontend = match toml_cfg.general.frontend.to_lowercase().as_str() {
            "console" => Frontend::Console,
            "screen" => Frontend::Screen,
            other => {
                eprintln!("Warning: unknown frontend {other:?} in config.toml, using screen.");
                Frontend::Screen
            }
        };

        ShellConfig {
            frontend,
            screen: ScreenConfig {
                frame_sleep_ms: toml_cfg.screen.frame_sleep_ms,
            },
            gamepad: GamepadConfig {
                confirm: toml_cfg.gamepad.confirm,
                cancel: toml_cfg.gamepad.cancel,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg = ShellConfig::from_toml(toml::from_str("").unwrap());
        assert_eq!(cfg.frontend, Frontend::Screen);
        assert_eq!(cfg.screen.frame_sleep_ms, 16);
        assert_eq!(cfg.gamepad.confirm, vec!["A", "Start"]);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let text = "[general]\nfrontend = \"console\"\n";
        let cfg = ShellConfig::from_toml(toml::from_str(text).unwrap());
        assert_eq!(cfg.frontend, Frontend::Console);
        assert_eq!(cfg.screen.frame_sleep_ms, 16);
    }

    #[test]
    fn frontend_name_is_case_insensitive() {
        let text = "[general]\nfrontend = \"Console\"\n";
        let cfg = ShellConfig::from_toml(toml::from_str(text).unwrap());
        assert_eq!(cfg.frontend, Frontend::Console);
    }
}
