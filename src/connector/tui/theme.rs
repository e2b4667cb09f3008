use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    pub fn accent() -> Color {
        Color::Cyan
    }

    pub fn normal() -> Style {
        Style::default()
    }

    pub fn dim() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::accent()).add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn code() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn link() -> Style {
        Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }
}
