//! Light and dark palettes.

use ratatui::style::{Color, Modifier, Style};

use crate::Theme;
use crate::core::state::NoticeLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub title_bg: Color,
    pub title_fg: Color,
    pub accent: Color,
    pub highlight: Color,
    pub muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

const LIGHT: Palette = Palette {
    bg: Color::Rgb(0xf4, 0xf6, 0xf7),
    fg: Color::Rgb(0x2c, 0x3e, 0x50),
    title_bg: Color::Rgb(0x2c, 0x3e, 0x50),
    title_fg: Color::White,
    accent: Color::Rgb(0x8e, 0x44, 0xad),
    highlight: Color::Rgb(0x34, 0x98, 0xdb),
    muted: Color::Rgb(0x7f, 0x8c, 0x8d),
    success: Color::Rgb(0x27, 0xae, 0x60),
    warning: Color::Rgb(0xf3, 0x9c, 0x12),
    error: Color::Rgb(0xc0, 0x39, 0x2b),
};

const DARK: Palette = Palette {
    bg: Color::Rgb(0x1f, 0x29, 0x33),
    fg: Color::White,
    title_bg: Color::Rgb(0x0b, 0x12, 0x20),
    title_fg: Color::Rgb(0xf1, 0xc4, 0x0f),
    accent: Color::Rgb(0x8e, 0x44, 0xad),
    highlight: Color::Rgb(0x9b, 0x59, 0xb6),
    muted: Color::Rgb(0x95, 0xa5, 0xa6),
    success: Color::Rgb(0x2e, 0xcc, 0x71),
    warning: Color::Rgb(0xf1, 0xc4, 0x0f),
    error: Color::Rgb(0xe7, 0x4c, 0x3c),
};

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.title_fg)
            .bg(self.title_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected row in a list.
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.highlight)
        } else {
            Style::default().fg(self.muted)
        }
    }

    pub fn level(&self, level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => self.highlight,
            NoticeLevel::Success => self.success,
            NoticeLevel::Warning => self.warning,
            NoticeLevel::Error => self.error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.bg, dark.bg);
        assert_eq!(light.accent, dark.accent);
    }

    #[test]
    fn test_level_colors() {
        let p = Palette::for_theme(Theme::Light);
        assert_eq!(p.level(NoticeLevel::Error), p.error);
        assert_eq!(p.level(NoticeLevel::Success), p.success);
    }
}
