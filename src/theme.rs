use serde::{Deserialize, Serialize};

use crate::chart::DEFAULT_PALETTE;

const LIGHT_BACKGROUND: &str = "#ffffff";
const LIGHT_TEXT: &str = "#24292f";
const LIGHT_MUTED: &str = "#57606a";
const LIGHT_LEADER: &str = "#8c959f";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default = "default_text")]
    pub text_color: String,
    #[serde(default = "default_muted")]
    pub muted_text_color: String,
    #[serde(default = "default_leader")]
    pub leader_color: String,
    /// Segment fill colors, indexed by the deterministic color-key hash
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_background() -> String {
    LIGHT_BACKGROUND.to_string()
}
fn default_text() -> String {
    LIGHT_TEXT.to_string()
}
fn default_muted() -> String {
    LIGHT_MUTED.to_string()
}
fn default_leader() -> String {
    LIGHT_LEADER.to_string()
}
fn default_palette() -> Vec<String> {
    DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background_color: default_background(),
            text_color: default_text(),
            muted_text_color: default_muted(),
            leader_color: default_leader(),
            palette: default_palette(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlacrittyColors {
    primary: AlacrittyPrimary,
    normal: AlacrittyNormal,
}

#[derive(Debug, Deserialize)]
struct AlacrittyPrimary {
    background: String,
    foreground: String,
}

#[derive(Debug, Deserialize)]
struct AlacrittyNormal {
    red: String,
    green: String,
    yellow: String,
    blue: String,
    magenta: String,
    cyan: String,
    white: String,
}

#[derive(Debug, Deserialize)]
struct AlacrittyTheme {
    colors: AlacrittyColors,
}

impl Theme {
    pub fn from_alacritty_yaml(content: &str) -> Result<Self, String> {
        let alacritty: AlacrittyTheme = serde_yaml::from_str(content)
            .map_err(|e| format!("Failed to parse Alacritty YAML: {}", e))?;

        Ok(Self::from_alacritty_theme(alacritty))
    }

    pub fn from_alacritty_toml(content: &str) -> Result<Self, String> {
        let alacritty: AlacrittyTheme = toml::from_str(content)
            .map_err(|e| format!("Failed to parse Alacritty TOML: {}", e))?;

        Ok(Self::from_alacritty_theme(alacritty))
    }

    fn from_alacritty_theme(alacritty: AlacrittyTheme) -> Self {
        let colors = alacritty.colors;
        // The six accent colors become the segment palette; white doubles as
        // the muted/leader tone, which reads as light gray on dark themes.
        Theme {
            background_color: colors.primary.background,
            text_color: colors.primary.foreground,
            muted_text_color: colors.normal.white.clone(),
            leader_color: colors.normal.white,
            palette: vec![
                colors.normal.blue,
                colors.normal.cyan,
                colors.normal.green,
                colors.normal.magenta,
                colors.normal.red,
                colors.normal.yellow,
            ],
        }
    }
}
