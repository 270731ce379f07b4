//! StreamFlix theme for FlixTUI
//!
//! Color palette and style helpers for the TUI: red on near-black.

use ratatui::style::{Color, Modifier, Style};

/// StreamFlix color palette
pub struct Theme;

impl Theme {
    // ═══════════════════════════════════════════════════════════════════════
    // CORE PALETTE
    // ═══════════════════════════════════════════════════════════════════════

    /// Background: #141414
    pub const BACKGROUND: Color = Color::Rgb(0x14, 0x14, 0x14);

    /// Primary: #e50914 (StreamFlix red)
    pub const PRIMARY: Color = Color::Rgb(0xe5, 0x09, 0x14);

    /// Secondary: #b3b3b3 (metadata gray)
    pub const SECONDARY: Color = Color::Rgb(0xb3, 0xb3, 0xb3);

    /// Accent: #46d369 (match green)
    pub const ACCENT: Color = Color::Rgb(0x46, 0xd3, 0x69);

    /// Highlight: #ffffff
    pub const HIGHLIGHT: Color = Color::Rgb(0xff, 0xff, 0xff);

    /// Text: #e5e5e5
    pub const TEXT: Color = Color::Rgb(0xe5, 0xe5, 0xe5);

    /// Dim: #808080
    pub const DIM: Color = Color::Rgb(0x80, 0x80, 0x80);

    /// Success: #46d369
    pub const SUCCESS: Color = Color::Rgb(0x46, 0xd3, 0x69);

    /// Warning: #ffd700 (gold)
    pub const WARNING: Color = Color::Rgb(0xff, 0xd7, 0x00);

    /// Error: #ff4d4d
    pub const ERROR: Color = Color::Rgb(0xff, 0x4d, 0x4d);

    // ═══════════════════════════════════════════════════════════════════════
    // DERIVED COLORS
    // ═══════════════════════════════════════════════════════════════════════

    /// Card and panel background
    pub const BACKGROUND_LIGHT: Color = Color::Rgb(0x22, 0x1f, 0x1f);

    /// Hovered card
    pub const BACKGROUND_HOVER: Color = Color::Rgb(0x2f, 0x2f, 0x2f);

    pub const BORDER: Color = Color::Rgb(0x56, 0x4d, 0x4d);

    pub const BORDER_FOCUSED: Color = Self::PRIMARY;

    // ═══════════════════════════════════════════════════════════════════════
    // STYLE HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND)
    }

    /// White on red, bold
    pub fn highlighted() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .bg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn dimmed() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default()
            .fg(Self::SUCCESS)
            .add_modifier(Modifier::BOLD)
    }

    pub fn warning() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Title/header style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Logo wordmark
    pub fn logo() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn secondary() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    pub fn accent() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(Self::BORDER_FOCUSED)
            .add_modifier(Modifier::BOLD)
    }

    /// Watched portion of a progress bar
    pub fn progress_bar() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .bg(Self::BACKGROUND_LIGHT)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMPONENT STYLES
    // ═══════════════════════════════════════════════════════════════════════

    pub fn list_item() -> Style {
        Style::default().fg(Self::TEXT)
    }

    pub fn list_item_selected() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .bg(Self::BACKGROUND_HOVER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Keybinding description style
    pub fn keybind_desc() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT).bg(Self::BACKGROUND_LIGHT)
    }

    /// Loading/spinner indicator
    pub fn loading() -> Style {
        Style::default()
            .fg(Self::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Vote average: green when well rated, gold in the middle, dim otherwise
    pub fn rating(vote_average: f32) -> Style {
        if vote_average >= 7.0 {
            Style::default().fg(Self::SUCCESS)
        } else if vote_average >= 5.0 {
            Style::default().fg(Self::WARNING)
        } else {
            Style::default().fg(Self::DIM)
        }
    }

    /// MOVIE / TV badge
    pub fn badge() -> Style {
        Style::default()
            .fg(Self::BACKGROUND)
            .bg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Kids profile marker
    pub fn kids() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Year/date metadata
    pub fn year() -> Style {
        Style::default().fg(Self::SECONDARY)
    }

    /// Genre tags
    pub fn genre() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn duration() -> Style {
        Style::default().fg(Self::DIM)
    }

    /// Avatar swatch in a profile's color
    pub fn avatar(hex: &str) -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .bg(parse_hex_color(hex).unwrap_or(Self::PRIMARY))
            .add_modifier(Modifier::BOLD)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// COLOR UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Parse `#RRGGBB` into an RGB color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Calculate relative luminance for a color (used in contrast ratio)
/// Formula: https://www.w3.org/TR/WCAG20/#relativeluminancedef
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel_luminance(c: u8) -> f64 {
        let c = c as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel_luminance(r) + 0.7152 * channel_luminance(g) + 0.0722 * channel_luminance(b)
}

/// Calculate contrast ratio between two colors
/// Returns a value between 1 (same color) and 21 (black/white)
/// WCAG AA requires >= 4.5:1 for normal text, >= 3:1 for large text
pub fn contrast_ratio(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> f64 {
    let l1 = relative_luminance(fg.0, fg.1, fg.2);
    let l2 = relative_luminance(bg.0, bg.1, bg.2);

    let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };

    (lighter + 0.05) / (darker + 0.05)
}

/// Check if a foreground/background pair meets WCAG AA for normal text
pub fn meets_wcag_aa(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 4.5
}

/// Check if a foreground/background pair meets WCAG AA for large text
pub fn meets_wcag_aa_large(fg: (u8, u8, u8), bg: (u8, u8, u8)) -> bool {
    contrast_ratio(fg, bg) >= 3.0
}

/// Extract RGB tuple from ratatui Color (only works for Rgb variant)
pub fn color_to_rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb(color: Color) -> (u8, u8, u8) {
        color_to_rgb(color).expect("Theme colors should all be RGB")
    }

    #[test]
    fn test_palette_values() {
        assert_eq!(rgb(Theme::BACKGROUND), (0x14, 0x14, 0x14));
        assert_eq!(rgb(Theme::PRIMARY), (0xe5, 0x09, 0x14));
        assert_eq!(rgb(Theme::TEXT), (0xe5, 0xe5, 0xe5));
        assert_eq!(rgb(Theme::ACCENT), (0x46, 0xd3, 0x69));
        assert_eq!(Theme::BORDER_FOCUSED, Theme::PRIMARY);
    }

    #[test]
    fn test_text_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        let ratio = contrast_ratio(rgb(Theme::TEXT), bg);
        assert!(
            meets_wcag_aa(rgb(Theme::TEXT), bg),
            "Text on background should meet WCAG AA (got {:.2}:1)",
            ratio
        );
        assert!(meets_wcag_aa(rgb(Theme::DIM), bg));
    }

    #[test]
    fn test_primary_contrast_against_background() {
        let bg = rgb(Theme::BACKGROUND);
        let ratio = contrast_ratio(rgb(Theme::PRIMARY), bg);
        assert!(
            meets_wcag_aa_large(rgb(Theme::PRIMARY), bg),
            "Primary on background should meet WCAG AA for large text (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_highlighted_contrast() {
        // White on the red selection bar
        let ratio = contrast_ratio(rgb(Theme::HIGHLIGHT), rgb(Theme::PRIMARY));
        assert!(
            meets_wcag_aa(rgb(Theme::HIGHLIGHT), rgb(Theme::PRIMARY)),
            "Highlighted text should be readable (got {:.2}:1)",
            ratio
        );
    }

    #[test]
    fn test_error_contrast() {
        let bg = rgb(Theme::BACKGROUND);
        assert!(meets_wcag_aa(rgb(Theme::ERROR), bg));
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#E50914"), Some(Color::Rgb(0xe5, 0x09, 0x14)));
        assert_eq!(parse_hex_color("#46d369"), Some(Color::Rgb(0x46, 0xd3, 0x69)));
        assert_eq!(parse_hex_color("E50914"), None);
        assert_eq!(parse_hex_color("#E5091"), None);
        assert_eq!(parse_hex_color("#GG0914"), None);
    }

    #[test]
    fn test_avatar_falls_back_to_primary() {
        assert_eq!(Theme::avatar("nope").bg, Some(Theme::PRIMARY));
        assert_eq!(Theme::avatar("#0071EB").bg, Some(Color::Rgb(0x00, 0x71, 0xeb)));
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(Theme::rating(8.1).fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::rating(6.0).fg, Some(Theme::WARNING));
        assert_eq!(Theme::rating(2.0).fg, Some(Theme::DIM));
    }

    #[test]
    fn test_relative_luminance_bounds() {
        assert!(relative_luminance(0, 0, 0).abs() < 0.001);
        assert!((relative_luminance(255, 255, 255) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_contrast_ratio_black_white() {
        let ratio = contrast_ratio((0, 0, 0), (255, 255, 255));
        assert!((ratio - 21.0).abs() < 0.1);
    }

    #[test]
    fn test_contrast_ratio_same_color() {
        let ratio = contrast_ratio((100, 100, 100), (100, 100, 100));
        assert!((ratio - 1.0).abs() < 0.001);
    }
}
