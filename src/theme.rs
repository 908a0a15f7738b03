use ratatui::style::{Color, Modifier, Style};

/// Identifier for one of the four built-in palettes. The set is closed;
/// persisted values outside it fall back to the default at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeId {
    #[default]
    Blossom,
    Starry,
    Sunset,
    Winter,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Blossom,
        ThemeId::Starry,
        ThemeId::Sunset,
        ThemeId::Winter,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeId::Blossom => "blossom",
            ThemeId::Starry => "starry",
            ThemeId::Sunset => "sunset",
            ThemeId::Winter => "winter",
        }
    }

    pub fn parse(value: &str) -> Option<ThemeId> {
        match value {
            "blossom" => Some(ThemeId::Blossom),
            "starry" => Some(ThemeId::Starry),
            "sunset" => Some(ThemeId::Sunset),
            "winter" => Some(ThemeId::Winter),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeId::Blossom => "🌸 Romantic Blossom",
            ThemeId::Starry => "🌌 Starry Love",
            ThemeId::Sunset => "🌅 Sunset Romance",
            ThemeId::Winter => "❄️ Cozy Winter Love",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeId::Blossom => Palette {
                bg: Color::Rgb(255, 230, 240),
                panel: Color::Rgb(255, 240, 245),
                border: Color::Rgb(240, 185, 208),
                text: Color::Rgb(70, 32, 48),
                muted: Color::Rgb(172, 112, 138),
                accent: Color::Rgb(255, 77, 136),
                highlight: Color::Rgb(214, 51, 108),
                success: Color::Rgb(46, 150, 96),
                error: Color::Rgb(210, 56, 76),
                on_accent: Color::Rgb(255, 245, 250),
            },
            ThemeId::Starry => Palette {
                bg: Color::Rgb(15, 32, 39),
                panel: Color::Rgb(32, 58, 67),
                border: Color::Rgb(44, 83, 100),
                text: Color::Rgb(222, 230, 242),
                muted: Color::Rgb(140, 162, 180),
                accent: Color::Rgb(162, 155, 254),
                highlight: Color::Rgb(255, 214, 130),
                success: Color::Rgb(126, 216, 148),
                error: Color::Rgb(255, 122, 122),
                on_accent: Color::Rgb(18, 24, 40),
            },
            ThemeId::Sunset => Palette {
                bg: Color::Rgb(255, 154, 158),
                panel: Color::Rgb(250, 208, 196),
                border: Color::Rgb(250, 211, 144),
                text: Color::Rgb(84, 38, 38),
                muted: Color::Rgb(164, 96, 90),
                accent: Color::Rgb(255, 111, 97),
                highlight: Color::Rgb(200, 72, 58),
                success: Color::Rgb(58, 140, 88),
                error: Color::Rgb(178, 44, 54),
                on_accent: Color::Rgb(255, 246, 240),
            },
            ThemeId::Winter => Palette {
                bg: Color::Rgb(223, 233, 243),
                panel: Color::Rgb(255, 255, 255),
                border: Color::Rgb(196, 212, 228),
                text: Color::Rgb(30, 44, 58),
                muted: Color::Rgb(104, 126, 148),
                accent: Color::Rgb(0, 188, 212),
                highlight: Color::Rgb(0, 140, 160),
                success: Color::Rgb(40, 148, 94),
                error: Color::Rgb(206, 62, 80),
                on_accent: Color::Rgb(8, 36, 44),
            },
        }
    }
}

/// Immutable display attributes for a theme. Static configuration, derived
/// from the original gradient stops and accent colors.
#[derive(Clone, Copy)]
pub struct Palette {
    pub bg: Color,
    pub panel: Color,
    pub border: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub highlight: Color,
    pub success: Color,
    pub error: Color,
    pub on_accent: Color,
}

impl Palette {
    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.panel).fg(self.text)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.accent)
            .fg(self.on_accent)
            .add_modifier(Modifier::BOLD)
    }
}
