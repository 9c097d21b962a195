//! Configuration loaded from `mock-exam.toml`.
//!
//! ```toml
//! catalog_dir = "exams"
//! export_dir = "saved"
//! log_file = "mock-exam.log"
//! math = "unicode"
//!
//! [theme]
//! accent = "#10b981"
//! background_hue = 160
//! ```

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::math::MathMode;

pub const CONFIG_ENV: &str = "MOCK_EXAM_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "mock-exam.toml";
const DEFAULT_ACCENT: &str = "#6366f1";
const DEFAULT_BACKGROUND_HUE: u16 = 220;

/// Named themes: accent color and background hue.
const PRESETS: &[(&str, &str, u16)] = &[
    ("indigo", DEFAULT_ACCENT, DEFAULT_BACKGROUND_HUE),
    ("emerald", "#10b981", 160),
    ("rose", "#f43f5e", 340),
    ("amber", "#f59e0b", 40),
    ("ocean", "#06b6d4", 190),
];

// Background saturation and lightness; only the hue is configurable.
const BACKGROUND_SATURATION: f64 = 0.3;
const BACKGROUND_LIGHTNESS: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{0}' is not a color (use a name like 'green' or '#rrggbb')")]
    InvalidColor(String),

    #[error("background hue {0} is out of range (0-359)")]
    InvalidHue(u16),

    #[error("unknown theme preset '{0}' (available: {})", preset_names().join(", "))]
    UnknownPreset(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extra exams, one `*.md` file per catalog entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    /// Where imported documents are saved.
    pub export_dir: PathBuf,
    /// Log destination while the exam UI owns the terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub math: MathMode,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            export_dir: PathBuf::from("."),
            log_file: None,
            math: MathMode::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub accent: String,
    /// Hue in degrees of the dark screen background.
    pub background_hue: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: DEFAULT_ACCENT.to_string(),
            background_hue: DEFAULT_BACKGROUND_HUE,
        }
    }
}

pub fn preset_names() -> Vec<&'static str> {
    PRESETS.iter().map(|(name, _, _)| *name).collect()
}

impl Theme {
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        PRESETS
            .iter()
            .find(|(preset, _, _)| preset.eq_ignore_ascii_case(name))
            .map(|(_, accent, hue)| Self {
                accent: accent.to_string(),
                background_hue: *hue,
            })
            .ok_or_else(|| ConfigError::UnknownPreset(name.to_string()))
    }

    pub fn with_accent(self, accent: &str) -> Result<Self, ConfigError> {
        Color::from_str(accent).map_err(|_| ConfigError::InvalidColor(accent.to_string()))?;
        Ok(Self {
            accent: accent.to_string(),
            ..self
        })
    }

    pub fn with_background_hue(self, hue: u16) -> Result<Self, ConfigError> {
        if hue >= 360 {
            return Err(ConfigError::InvalidHue(hue));
        }
        Ok(Self {
            background_hue: hue,
            ..self
        })
    }

    /// Accent color, or the default when the configured value is unusable.
    pub fn accent_color(&self) -> Color {
        Color::from_str(&self.accent).unwrap_or_else(|_| {
            warn!(accent = %self.accent, "unknown accent color, using default");
            Color::from_str(DEFAULT_ACCENT).unwrap_or(Color::Blue)
        })
    }

    pub fn background_color(&self) -> Color {
        let (r, g, b) = hsl_to_rgb(
            f64::from(self.background_hue % 360),
            BACKGROUND_SATURATION,
            BACKGROUND_LIGHTNESS,
        );
        Color::Rgb(r, g, b)
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}

impl Config {
    /// Config file location: `explicit`, else `$MOCK_EXAM_CONFIG`, else
    /// `mock-exam.toml` in the working directory.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        Self::resolve_path_with(explicit, std::env::var_os(CONFIG_ENV))
    }

    fn resolve_path_with(explicit: Option<&Path>, from_env: Option<OsString>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| from_env.filter(|value| !value.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Reads `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock-exam.toml");
        fs::write(&path, "math = \"plain\"\n[theme]\naccent = \"magenta\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.math, MathMode::Plain);
        assert_eq!(config.theme.accent_color(), Color::Magenta);
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.catalog_dir.is_none());
    }

    #[test]
    fn save_then_load_keeps_theme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock-exam.toml");
        let config = Config {
            theme: Theme::default()
                .with_accent("#ff8800")
                .unwrap()
                .with_background_hue(75)
                .unwrap(),
            ..Config::default()
        };

        config.save(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("accent = \"#ff8800\""));
        assert!(text.contains("background_hue = 75"));

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.theme.background_color(), config.theme.background_color());
    }

    #[test]
    fn hue_without_accent_keeps_default_accent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock-exam.toml");
        fs::write(&path, "[theme]\nbackground_hue = 340\n").unwrap();

        let theme = Config::load(&path).unwrap().theme;
        assert_eq!(theme.accent, DEFAULT_ACCENT);
        assert_eq!(theme.background_hue, 340);
    }

    #[test]
    fn default_theme_is_indigo() {
        let theme = Theme::default();
        assert_eq!(theme.accent, "#6366f1");
        assert_eq!(theme.background_hue, 220);
        assert_eq!(Theme::preset("indigo").unwrap(), theme);
        assert_eq!(theme.accent_color(), Color::Rgb(0x63, 0x66, 0xf1));
    }

    #[test]
    fn presets_resolve_by_name() {
        let rose = Theme::preset("Rose").unwrap();
        assert_eq!(rose.accent, "#f43f5e");
        assert_eq!(rose.background_hue, 340);
        for name in preset_names() {
            let theme = Theme::preset(name).unwrap();
            assert_ne!(theme.accent_color(), Color::Reset);
            assert!(theme.background_hue < 360);
        }
        assert!(matches!(
            Theme::preset("sepia"),
            Err(ConfigError::UnknownPreset(name)) if name == "sepia"
        ));
    }

    #[test]
    fn background_is_a_dark_tint_of_the_hue() {
        let red = Theme::default().with_background_hue(0).unwrap();
        assert_eq!(red.background_color(), Color::Rgb(33, 18, 18));
        let green = Theme::default().with_background_hue(120).unwrap();
        assert_eq!(green.background_color(), Color::Rgb(18, 33, 18));
        assert!(matches!(
            Theme::default().with_background_hue(360),
            Err(ConfigError::InvalidHue(360))
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mock-exam.toml");
        fs::write(&path, "math = 3").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn rejects_unknown_colors() {
        assert!(matches!(
            Theme::default().with_accent("not-a-color"),
            Err(ConfigError::InvalidColor(_))
        ));
        let theme = Theme {
            accent: "nope".to_string(),
            ..Theme::default()
        };
        assert_eq!(theme.accent_color(), Theme::default().accent_color());
    }

    #[test]
    fn explicit_path_wins() {
        let path = Config::resolve_path_with(
            Some(Path::new("custom.toml")),
            Some(OsString::from("from-env.toml")),
        );
        assert_eq!(path, PathBuf::from("custom.toml"));
    }

    #[test]
    fn env_var_beats_default_file() {
        let path = Config::resolve_path_with(None, Some(OsString::from("/etc/exam.toml")));
        assert_eq!(path, PathBuf::from("/etc/exam.toml"));

        let blank = Config::resolve_path_with(None, Some(OsString::new()));
        assert_eq!(blank, PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            Config::resolve_path_with(None, None),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }
}
