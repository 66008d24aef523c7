use ratatui::style::{Color, Modifier, Style};

use crate::settings::VisualTheme;

/// Colors for one visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub correct: Color,
    pub incorrect: Color,
    pub warning: Color,
    pub muted: Color,
    pub sparks: [Color; 7],
}

impl Palette {
    pub fn for_theme(theme: VisualTheme) -> Self {
        match theme {
            VisualTheme::Default => Self {
                accent: Color::Magenta,
                correct: Color::Green,
                incorrect: Color::Red,
                warning: Color::Yellow,
                muted: Color::Gray,
                sparks: [
                    Color::Yellow,
                    Color::Magenta,
                    Color::Cyan,
                    Color::Green,
                    Color::Red,
                    Color::Blue,
                    Color::LightYellow,
                ],
            },
            VisualTheme::Sunset => Self {
                accent: Color::Rgb(255, 127, 80),
                correct: Color::Rgb(255, 200, 87),
                incorrect: Color::Rgb(214, 40, 57),
                warning: Color::Rgb(255, 165, 0),
                muted: Color::Rgb(170, 130, 120),
                sparks: [
                    Color::Rgb(255, 127, 80),
                    Color::Rgb(255, 200, 87),
                    Color::Rgb(247, 37, 133),
                    Color::Rgb(255, 165, 0),
                    Color::Rgb(214, 40, 57),
                    Color::Rgb(181, 23, 158),
                    Color::LightYellow,
                ],
            },
            VisualTheme::Ocean => Self {
                accent: Color::Cyan,
                correct: Color::Rgb(72, 202, 228),
                incorrect: Color::Rgb(255, 107, 107),
                warning: Color::LightYellow,
                muted: Color::Rgb(120, 150, 170),
                sparks: [
                    Color::Cyan,
                    Color::LightCyan,
                    Color::Blue,
                    Color::LightBlue,
                    Color::Rgb(0, 119, 182),
                    Color::Rgb(144, 224, 239),
                    Color::White,
                ],
            },
            VisualTheme::Forest => Self {
                accent: Color::Green,
                correct: Color::LightGreen,
                incorrect: Color::Rgb(188, 71, 73),
                warning: Color::Rgb(221, 161, 94),
                muted: Color::Rgb(130, 150, 120),
                sparks: [
                    Color::Green,
                    Color::LightGreen,
                    Color::Rgb(221, 161, 94),
                    Color::Rgb(96, 108, 56),
                    Color::Yellow,
                    Color::Rgb(188, 108, 37),
                    Color::LightYellow,
                ],
            },
        }
    }

    pub fn bold(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        self.bold().fg(self.accent)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.muted).add_modifier(Modifier::DIM)
    }

    pub fn legend(&self) -> Style {
        Style::default().add_modifier(Modifier::ITALIC)
    }

    pub fn good(&self) -> Style {
        self.bold().fg(self.correct)
    }

    pub fn bad(&self) -> Style {
        self.bold().fg(self.incorrect)
    }

    pub fn selected(&self) -> Style {
        self.bold().fg(self.accent).add_modifier(Modifier::REVERSED)
    }
}
