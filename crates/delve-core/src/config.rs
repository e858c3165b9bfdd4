//! Overlay and automation settings.
//!
//! The host owns persistence and the settings UI; the core only reads a
//! [`Config`] value. It is shared behind an `RwLock` so the host can swap
//! settings while the workers run.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Packed ABGR colour as used by immediate-mode draw lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const RED: Color = Color(0xFF00_00FF);
    pub const GREEN: Color = Color(0xFF00_FF00);
    pub const ORANGE: Color = Color(0xFF00_A5FF);
    pub const YELLOW: Color = Color(0xFF00_FFFF);
    pub const BRONZE: Color = Color(0xFF33_7FCD);
    pub const SILVER: Color = Color(0xFFC0_C0C0);
    pub const GOLD: Color = Color(0xFF00_D7FF);
    pub const PURPLE: Color = Color(0xFFF0_20A0);
    pub const CYAN: Color = Color(0xFFFF_FF00);

    pub fn alpha(&self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same colour with alpha scaled by `opacity` (0.0 - 1.0)
    pub fn with_opacity(&self, opacity: f32) -> Color {
        let alpha = (f32::from(self.alpha()) * opacity.clamp(0.0, 1.0)).round() as u32;
        Color((self.0 & 0x00FF_FFFF) | (alpha << 24))
    }
}

/// Per-type overlay colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspColors {
    pub player: Color,
    pub enemy: Color,
    pub mimic: Color,
    pub friendly_enemy: Color,
    pub bronze_chest: Color,
    pub silver_chest: Color,
    pub gold_chest: Color,
    pub accursed_hoard: Color,
    pub mimic_chest: Color,
    pub trap: Color,
    pub return_point: Color,
    pub passage: Color,
    pub name: Color,
}

impl Default for EspColors {
    fn default() -> Self {
        Self {
            player: Color::WHITE,
            enemy: Color::RED,
            mimic: Color::PURPLE,
            friendly_enemy: Color::GREEN,
            bronze_chest: Color::BRONZE,
            silver_chest: Color::SILVER,
            gold_chest: Color::GOLD,
            accursed_hoard: Color::YELLOW,
            mimic_chest: Color::PURPLE,
            trap: Color::ORANGE,
            return_point: Color::CYAN,
            passage: Color::GREEN,
            name: Color::WHITE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Overlay
    pub enable_esp: bool,
    pub auto_open_on_enter: bool,
    pub show_player_dot: bool,
    pub show_mob_views: bool,
    pub show_patrol_arrow: bool,
    pub highlight_coffers: bool,
    pub highlight_passage: bool,
    pub show_coffer_interaction_range: bool,

    // Labels and highlights per category
    pub show_bronze_coffers: bool,
    pub show_silver_coffers: bool,
    pub show_gold_coffers: bool,
    pub show_hoards: bool,
    pub show_mimic_coffer: bool,
    pub show_traps: bool,
    pub show_return: bool,
    pub show_passage: bool,

    // Automatic chest opening
    pub open_chests: bool,
    pub open_unsafe_chests: bool,
    pub open_bronze_coffers: bool,
    pub open_silver_coffers: bool,
    pub open_gold_coffers: bool,
    pub open_hoards: bool,

    /// JSON file with per-mob aggro data
    pub mob_info_path: Option<PathBuf>,

    pub normal_aggro_color: Color,
    pub sound_aggro_color: Color,
    pub colors: EspColors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable_esp: true,
            auto_open_on_enter: true,
            show_player_dot: true,
            show_mob_views: true,
            show_patrol_arrow: true,
            highlight_coffers: true,
            highlight_passage: true,
            show_coffer_interaction_range: true,
            show_bronze_coffers: true,
            show_silver_coffers: true,
            show_gold_coffers: true,
            show_hoards: true,
            show_mimic_coffer: true,
            show_traps: true,
            show_return: true,
            show_passage: true,
            open_chests: false,
            open_unsafe_chests: false,
            open_bronze_coffers: true,
            open_silver_coffers: true,
            open_gold_coffers: true,
            open_hoards: true,
            mob_info_path: None,
            normal_aggro_color: Color(0xFF00_00FF),
            sound_aggro_color: Color(0xFFFF_00FF),
            colors: EspColors::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn into_shared(self) -> SharedConfig {
        Arc::new(RwLock::new(self))
    }
}

pub type SharedConfig = Arc<RwLock<Config>>;

/// Copy of the current settings; a poisoned lock still yields the last value.
pub fn current(config: &SharedConfig) -> Config {
    config
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
