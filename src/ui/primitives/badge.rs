use crossterm::style::Stylize;

use crate::ui::theme;

/// Inverse-video status marker at the end of a stage line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Fail,
}

impl Badge {
    pub fn from_success(success: bool) -> Self {
        if success {
            Badge::Ok
        } else {
            Badge::Fail
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Badge::Ok => theme::badges::OK,
            Badge::Fail => theme::badges::FAIL,
        }
    }

    pub fn render(&self, supports_color: bool) -> String {
        let text = self.text();
        if !supports_color {
            return text.to_string();
        }
        let background = match self {
            Badge::Ok => theme::colors::SUCCESS,
            Badge::Fail => theme::colors::ERROR,
        };
        format!("{}", text.with(theme::colors::ON_BADGE).on(background).bold())
    }
}
