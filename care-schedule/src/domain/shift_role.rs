use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::time::ClockTime;

// =====================
// Language
// =====================

/// Display language for shift labels. Never influences which role is assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sv,
    En,
    Ar,
    Es,
}

impl Language {
    /// Unknown codes fall back to Swedish
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Language::En,
            "ar" => Language::Ar,
            "es" => Language::Es,
            _ => Language::Sv,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Sv => "sv",
            Language::En => "en",
            Language::Ar => "ar",
            Language::Es => "es",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Language::Ar)
    }

    fn pick(&self, sv: &'static str, en: &'static str, ar: &'static str, es: &'static str) -> &'static str {
        match self {
            Language::Sv => sv,
            Language::En => en,
            Language::Ar => ar,
            Language::Es => es,
        }
    }
}

// =====================
// Shift roles
// =====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Day,
    Eve,
    Night,
    Off,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftRole {
    Off,
    MorningRed,
    MorningBlue,
    EveningRed,
    EveningBlue,
    NightRed,
    NightBlue,
    AdminDay,
    DevAlpha,
    DevBeta,
    DevGamma,
    DevDelta,
}

impl ShiftRole {
    pub const ALL: [ShiftRole; 12] = [
        ShiftRole::Off,
        ShiftRole::MorningRed,
        ShiftRole::MorningBlue,
        ShiftRole::EveningRed,
        ShiftRole::EveningBlue,
        ShiftRole::NightRed,
        ShiftRole::NightBlue,
        ShiftRole::AdminDay,
        ShiftRole::DevAlpha,
        ShiftRole::DevBeta,
        ShiftRole::DevGamma,
        ShiftRole::DevDelta,
    ];

    /// Rotation used by every ordinary care unit
    pub const CARE_ROTATION: [ShiftRole; 6] = [
        ShiftRole::MorningRed,
        ShiftRole::MorningBlue,
        ShiftRole::EveningRed,
        ShiftRole::EveningBlue,
        ShiftRole::NightRed,
        ShiftRole::NightBlue,
    ];

    /// Rotation used by the development unit
    pub const DEVELOPMENT_ROTATION: [ShiftRole; 4] = [
        ShiftRole::DevAlpha,
        ShiftRole::DevBeta,
        ShiftRole::DevGamma,
        ShiftRole::DevDelta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftRole::Off => "off",
            ShiftRole::MorningRed => "morning_red",
            ShiftRole::MorningBlue => "morning_blue",
            ShiftRole::EveningRed => "evening_red",
            ShiftRole::EveningBlue => "evening_blue",
            ShiftRole::NightRed => "night_red",
            ShiftRole::NightBlue => "night_blue",
            ShiftRole::AdminDay => "admin_day",
            ShiftRole::DevAlpha => "dev_alpha",
            ShiftRole::DevBeta => "dev_beta",
            ShiftRole::DevGamma => "dev_gamma",
            ShiftRole::DevDelta => "dev_delta",
        }
    }

    pub fn shift_type(&self) -> ShiftType {
        match self {
            ShiftRole::Off => ShiftType::Off,
            ShiftRole::EveningRed | ShiftRole::EveningBlue => ShiftType::Eve,
            ShiftRole::NightRed | ShiftRole::NightBlue => ShiftType::Night,
            ShiftRole::MorningRed
            | ShiftRole::MorningBlue
            | ShiftRole::AdminDay
            | ShiftRole::DevAlpha
            | ShiftRole::DevBeta
            | ShiftRole::DevGamma
            | ShiftRole::DevDelta => ShiftType::Day,
        }
    }

    /// Working hours as `"HH:MM - HH:MM"`, empty for `off`
    pub fn time_text(&self) -> &'static str {
        match self {
            ShiftRole::Off => "",
            ShiftRole::MorningRed | ShiftRole::MorningBlue => "07:00 - 16:00",
            ShiftRole::EveningRed => "13:30 - 21:00",
            ShiftRole::EveningBlue => "13:00 - 21:00",
            ShiftRole::NightRed | ShiftRole::NightBlue => "21:00 - 07:00",
            ShiftRole::AdminDay
            | ShiftRole::DevAlpha
            | ShiftRole::DevBeta
            | ShiftRole::DevGamma
            | ShiftRole::DevDelta => "08:00 - 17:00",
        }
    }

    pub fn label(&self, lang: Language) -> &'static str {
        match self {
            ShiftRole::Off => lang.pick("Ledig", "Off", "عطلة", "Libre"),
            ShiftRole::MorningRed => lang.pick("Dag (Röd)", "Day (Red)", "نهار (أحمر)", "Día (Rojo)"),
            ShiftRole::MorningBlue => lang.pick("Dag (Blå)", "Day (Blue)", "نهار (أزرق)", "Día (Azul)"),
            ShiftRole::EveningRed => {
                lang.pick("Kväll (Röd)", "Evening (Red)", "مساء (أحمر)", "Tarde (Rojo)")
            }
            ShiftRole::EveningBlue => {
                lang.pick("Kväll (Blå)", "Evening (Blue)", "مساء (أزرق)", "Tarde (Azul)")
            }
            ShiftRole::NightRed => lang.pick("Natt (Röd)", "Night (Red)", "ليل (أحمر)", "Noche (Rojo)"),
            ShiftRole::NightBlue => lang.pick("Natt (Blå)", "Night (Blue)", "ليل (أزرق)", "Noche (Azul)"),
            ShiftRole::AdminDay => "Admin",
            ShiftRole::DevAlpha => lang.pick("Utveckling A", "Development A", "تطوير أ", "Desarrollo A"),
            ShiftRole::DevBeta => lang.pick("Utveckling B", "Development B", "تطوير ب", "Desarrollo B"),
            ShiftRole::DevGamma => lang.pick("Utveckling C", "Development C", "تطوير ج", "Desarrollo C"),
            ShiftRole::DevDelta => lang.pick("Utveckling D", "Development D", "تطوير د", "Desarrollo D"),
        }
    }

    pub fn window(&self) -> Option<ShiftWindow> {
        ShiftWindow::parse(self.time_text())
    }

    pub fn info(&self, lang: Language) -> ShiftInfo {
        ShiftInfo {
            id: *self,
            shift_type: self.shift_type(),
            label: self.label(lang),
            time: self.time_text(),
        }
    }
}

impl fmt::Display for ShiftRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown shift role: {0:?}")]
pub struct UnknownShiftRole(pub String);

impl FromStr for ShiftRole {
    type Err = UnknownShiftRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftRole::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownShiftRole(s.to_string()))
    }
}

// =====================
// Time window
// =====================

/// Start/end of a shift. `end < start` means the shift crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ShiftWindow {
    /// Parses `"HH:MM - HH:MM"`. Empty or malformed text yields `None`,
    /// which callers treat as "no time constraint".
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.split_once(" - ")?;
        Some(Self {
            start: ClockTime::parse(start).ok()?,
            end: ClockTime::parse(end).ok()?,
        })
    }

    pub fn is_overnight(&self) -> bool {
        self.end < self.start
    }
}

impl fmt::Display for ShiftWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Resolved descriptor of a role for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftInfo {
    pub id: ShiftRole,
    #[serde(rename = "type")]
    pub shift_type: ShiftType,
    pub label: &'static str,
    pub time: &'static str,
}

impl ShiftInfo {
    pub fn is_off(&self) -> bool {
        self.shift_type == ShiftType::Off
    }

    pub fn window(&self) -> Option<ShiftWindow> {
        ShiftWindow::parse(self.time)
    }
}
