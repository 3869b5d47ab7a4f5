use crossterm::style::Color;

/// Design tokens for the appbuild terminal UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and badges must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;

    /// Foreground used on top of a badge background
    pub const ON_BADGE: Color = Color::Black;

    /// Sweep of the running-stage bar, dark to bright
    pub const GRADIENT: [Color; 4] = [
        Color::DarkBlue,
        Color::Blue,
        Color::DarkCyan,
        Color::Cyan,
    ];
}

pub mod icons {
    pub const WARNING: &str = "⚠";
    pub const BAR_FILLED: &str = "━";
    pub const BAR_EMPTY: &str = "─";
}

pub mod icons_ascii {
    pub const WARNING: &str = "[WARN]";
    pub const BAR_FILLED: &str = "=";
    pub const BAR_EMPTY: &str = "-";
}

pub mod badges {
    pub const OK: &str = " OK ";
    pub const FAIL: &str = " FAIL ";
}
