use crossterm::style::Stylize;

use crate::ui::theme;

const DEFAULT_WIDTH: usize = 16;

/// Indeterminate bar: a gradient highlight sweeping left to right while a
/// stage runs.
#[derive(Debug, Clone)]
pub struct Pulse {
    width: usize,
    current: usize,
    message: String,
}

impl Pulse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            width: DEFAULT_WIDTH,
            current: 0,
            message: message.into(),
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(theme::colors::GRADIENT.len());
        self
    }

    pub fn tick(&mut self) {
        self.current = (self.current + 1) % self.width;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (filled, empty) = if supports_unicode {
            (theme::icons::BAR_FILLED, theme::icons::BAR_EMPTY)
        } else {
            (theme::icons_ascii::BAR_FILLED, theme::icons_ascii::BAR_EMPTY)
        };
        let gradient = &theme::colors::GRADIENT;

        let mut bar = String::new();
        for cell in 0..self.width {
            // distance behind the head of the sweep, wrapping around
            let behind = (self.current + self.width - cell) % self.width;
            let lit = behind < gradient.len();
            let glyph = if lit { filled } else { empty };

            if !supports_color {
                bar.push_str(glyph);
            } else if lit {
                let shade = gradient[gradient.len() - 1 - behind];
                bar.push_str(&format!("{}", glyph.with(shade)));
            } else {
                bar.push_str(&format!("{}", glyph.with(theme::colors::DIM)));
            }
        }

        format!("{} {}", bar, self.message)
    }
}
