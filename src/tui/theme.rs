// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Matchtally-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Matchtally and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{env, error::Error, fmt};

use ratatui::style::{Color, Modifier, Style};

use crate::model::{Outcome, ThemePreference};

const PALETTE_ENV: &str = "MATCHTALLY_TUI_PALETTE";

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme {
    palette: Option<TuiPalette>,
}

impl TuiTheme {
    /// Picks colors for `preference`; a palette in the environment wins over both presets.
    pub(crate) fn resolve(preference: ThemePreference) -> Result<Self, ThemeError> {
        if let Some(palette) = palette_override_from_env()? {
            return Ok(Self {
                palette: Some(palette),
            });
        }
        Ok(Self::for_preference(preference))
    }

    pub(crate) fn for_preference(preference: ThemePreference) -> Self {
        let palette = match preference {
            ThemePreference::Auto => None,
            ThemePreference::Dark => Some(TuiPalette::dark()),
            ThemePreference::Light => Some(TuiPalette::light()),
        };
        Self { palette }
    }

    pub(crate) fn base_style(&self) -> Style {
        match &self.palette {
            Some(palette) => Style::default().fg(palette.fg).bg(palette.bg),
            None => Style::default(),
        }
    }

    fn ansi_color(&self, color: Ansi16) -> Color {
        match &self.palette {
            Some(palette) => palette.ansi_color(color.idx()),
            None => color.into(),
        }
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(self.ansi_color(Ansi16::BrightGreen))
        } else {
            self.base_style()
        }
    }

    /// The keyboard cursor.
    pub(crate) fn focus_style(&self) -> Style {
        self.base_style()
            .add_modifier(Modifier::REVERSED | Modifier::BOLD)
    }

    /// Items that are part of the current selection.
    pub(crate) fn active_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::Yellow))
            .add_modifier(Modifier::BOLD)
    }

    pub(crate) fn unavailable_style(&self) -> Style {
        self.base_style()
            .fg(self.ansi_color(Ansi16::BrightBlack))
            .add_modifier(Modifier::DIM)
    }

    pub(crate) fn muted_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::BrightBlack))
    }

    pub(crate) fn outcome_style(&self, outcome: Outcome) -> Style {
        let color = match outcome {
            Outcome::Win => Ansi16::Green,
            Outcome::Loss => Ansi16::Red,
            Outcome::Draw => Ansi16::Blue,
        };
        self.base_style().fg(self.ansi_color(color))
    }

    pub(crate) fn toast_style(&self) -> Style {
        self.base_style().fg(self.ansi_color(Ansi16::Cyan))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct TuiPalette {
    fg: Color,
    bg: Color,
    ansi: [Color; 16],
}

impl TuiPalette {
    const CSV_LEN: usize = 18;

    fn dark() -> Self {
        Self {
            fg: Color::Gray,
            bg: Color::Black,
            ansi: Ansi16::ALL.map(Color::from),
        }
    }

    fn light() -> Self {
        let mut ansi = Ansi16::ALL.map(Color::from);
        ansi[Ansi16::Yellow.idx()] = Color::Rgb(0x9a, 0x6a, 0x00);
        ansi[Ansi16::BrightBlack.idx()] = Color::Rgb(0x80, 0x80, 0x80);
        ansi[Ansi16::BrightGreen.idx()] = Color::Rgb(0x1a, 0x7f, 0x37);
        Self {
            fg: Color::Black,
            bg: Color::White,
            ansi,
        }
    }

    fn parse_csv(value: &str) -> Result<Self, String> {
        let parts: Vec<&str> = value.split(',').map(|part| part.trim()).collect();
        if parts.len() != Self::CSV_LEN {
            return Err(format!(
                "expected {} comma-separated colors (fg,bg, then the 16 ansi colors), got {}",
                Self::CSV_LEN,
                parts.len()
            ));
        }

        let fg = parse_palette_color(parts[0])?;
        let bg = parse_palette_color(parts[1])?;

        let mut ansi = [Color::Reset; 16];
        for (idx, part) in parts.iter().skip(2).enumerate() {
            ansi[idx] = parse_palette_color(part)?;
        }

        Ok(Self { fg, bg, ansi })
    }

    fn ansi_color(&self, idx: usize) -> Color {
        self.ansi[idx]
    }
}

fn palette_override_from_env() -> Result<Option<TuiPalette>, ThemeError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(ThemeError::InvalidEnv {
                name: PALETTE_ENV.to_owned(),
                value: "<non-unicode>".to_owned(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    TuiPalette::parse_csv(trimmed)
        .map(Some)
        .map_err(|error| ThemeError::InvalidEnv {
            name: PALETTE_ENV.to_owned(),
            value: format!("{trimmed} ({error})"),
        })
}

fn parse_palette_color(value: &str) -> Result<Color, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("empty color".to_owned());
    }

    let hex = trimmed
        .strip_prefix('#')
        .or_else(|| trimmed.strip_prefix("0x"))
        .unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color: {trimmed} (expected #RRGGBB)"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex color: {trimmed}"))?;
    Ok(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ansi16 {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Ansi16 {
    const ALL: [Ansi16; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::BrightBlack,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    const fn idx(self) -> usize {
        self as usize
    }
}

impl From<Ansi16> for Color {
    fn from(value: Ansi16) -> Self {
        match value {
            Ansi16::Black => Color::Black,
            Ansi16::Red => Color::Red,
            Ansi16::Green => Color::Green,
            Ansi16::Yellow => Color::Yellow,
            Ansi16::Blue => Color::Blue,
            Ansi16::Magenta => Color::Magenta,
            Ansi16::Cyan => Color::Cyan,
            Ansi16::White => Color::Gray,
            Ansi16::BrightBlack => Color::DarkGray,
            Ansi16::BrightRed => Color::LightRed,
            Ansi16::BrightGreen => Color::LightGreen,
            Ansi16::BrightYellow => Color::LightYellow,
            Ansi16::BrightBlue => Color::LightBlue,
            Ansi16::BrightMagenta => Color::LightMagenta,
            Ansi16::BrightCyan => Color::LightCyan,
            Ansi16::BrightWhite => Color::White,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ThemeError {
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for ThemeError {}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::{TuiPalette, TuiTheme};
    use crate::model::ThemePreference;

    #[test]
    fn palette_override_parses_valid_csv() {
        let palette = TuiPalette::parse_csv(
            "#111111,#222222,#000000,#ff0000,#00ff00,#ffff00,#0000ff,#ff00ff,#00ffff,#ffffff,#1a1a1a,#ff1111,#11ff11,#ffff11,#1111ff,#ff11ff,#11ffff,#fefefe",
        )
        .expect("palette");

        assert_eq!(palette.fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(palette.bg, Color::Rgb(0x22, 0x22, 0x22));
        assert_eq!(palette.ansi_color(1), Color::Rgb(0xff, 0, 0));
        assert_eq!(palette.ansi_color(15), Color::Rgb(0xfe, 0xfe, 0xfe));
    }

    #[test]
    fn palette_override_rejects_invalid_csv() {
        let err = TuiPalette::parse_csv("nope").unwrap_err();
        assert!(err.contains("expected"));
        let err = TuiPalette::parse_csv(&["#zzzzzz"; 18].join(",")).unwrap_err();
        assert!(err.contains("invalid hex color"));
    }

    #[test]
    fn presets_follow_preference() {
        assert_eq!(TuiTheme::for_preference(ThemePreference::Auto).base_style().bg, None);
        assert_eq!(
            TuiTheme::for_preference(ThemePreference::Light).base_style().bg,
            Some(Color::White)
        );
        assert_eq!(
            TuiTheme::for_preference(ThemePreference::Dark).base_style().bg,
            Some(Color::Black)
        );
    }
}
