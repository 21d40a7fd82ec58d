use ratatui::style::{Color, Modifier, Style};

// Color palette - warm audio-deck theme
pub const BG_PRIMARY: Color = Color::Rgb(18, 16, 28);
pub const BG_SECONDARY: Color = Color::Rgb(30, 27, 45);
pub const ACCENT_PRIMARY: Color = Color::Rgb(120, 200, 255); // Blue
pub const ACCENT_SECONDARY: Color = Color::Rgb(255, 170, 80); // Amber
pub const TEXT_PRIMARY: Color = Color::Rgb(235, 232, 245);
pub const TEXT_SECONDARY: Color = Color::Rgb(160, 155, 180);
pub const TEXT_MUTED: Color = Color::Rgb(105, 100, 125);
pub const SUCCESS: Color = Color::Rgb(120, 255, 160);
pub const ERROR: Color = Color::Rgb(255, 110, 110);

// Styles
pub fn title_style() -> Style {
    Style::default()
        .fg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn subtitle_style() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn highlight_style() -> Style {
    Style::default()
        .fg(BG_PRIMARY)
        .bg(ACCENT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_style() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn key_style() -> Style {
    Style::default()
        .fg(ACCENT_SECONDARY)
        .add_modifier(Modifier::BOLD)
}

pub fn success_style() -> Style {
    Style::default().fg(SUCCESS)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn border_style() -> Style {
    Style::default().fg(ACCENT_PRIMARY)
}

pub fn progress_style() -> Style {
    Style::default().fg(ACCENT_PRIMARY).bg(BG_SECONDARY)
}
