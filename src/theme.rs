use ratatui::style::{Color, Modifier, Style};

// Centralized colors for the terminal renderer. Everything the renderer
// paints asks here, so a palette change is a one-file edit.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);
pub const THUMB_RGB: (u8, u8, u8) = (170, 170, 170);
pub const TRACK_RGB: (u8, u8, u8) = (30, 30, 30);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Stage / panels
pub fn stage_bg() -> Color {
    Color::Black
}
pub fn panel_bg() -> Color {
    Color::Reset
}
pub fn label_fg() -> Color {
    Color::Gray
}

// Frame chrome
pub fn title_style(active: bool) -> Style {
    if active {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
pub fn frame_border() -> Color {
    Color::DarkGray
}
/// Border color while the pointer sits on (or drags) a resize zone.
pub fn frame_border_hot() -> Color {
    accent()
}

// Text input
pub fn input_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}
pub fn selection_style() -> Style {
    Style::default().bg(Color::Blue).fg(Color::White)
}
pub fn caret_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

// Controls
pub fn control_style(enabled: bool) -> Style {
    if enabled {
        Style::default().bg(Color::Gray).fg(Color::Black)
    } else {
        Style::default().bg(Color::DarkGray).fg(Color::Gray)
    }
}
pub fn control_selected_style() -> Style {
    Style::default().bg(accent()).fg(Color::Black)
}

// Scrollbar
pub fn track() -> Color {
    rgb_to_color(TRACK_RGB)
}

/// Thumb color at `alpha`, blended over the track since cells have no
/// transparency.
pub fn thumb(alpha: f32) -> Color {
    let a = alpha.clamp(0.0, 1.0);
    let mix = |fg: u8, bg: u8| (f32::from(bg) + (f32::from(fg) - f32::from(bg)) * a).round() as u8;
    Color::Rgb(
        mix(THUMB_RGB.0, TRACK_RGB.0),
        mix(THUMB_RGB.1, TRACK_RGB.1),
        mix(THUMB_RGB.2, TRACK_RGB.2),
    )
}

// Tooltip
pub fn tooltip_style() -> Style {
    Style::default().bg(Color::Yellow).fg(Color::Black)
}

pub fn focus_rect() -> Color {
    Color::Cyan
}
