use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use appbuild::presentation::{Cli, ColorWhen};

/// Output decisions made once per invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: bool,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(cli: &Cli) -> Self {
        Self::from_caps(
            cli.json,
            cli.verbose,
            cli.color,
            cli.no_animation,
            detect_capabilities(),
        )
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: bool,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        caps: TerminalCapabilities,
    ) -> Self {
        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => caps.supports_color && !caps.is_ci,
        };

        let animation = !(json || cli_no_animation || caps.is_ci) && caps.is_tty;

        Self {
            json,
            verbose,
            caps,
            color: color && !json,
            unicode: caps.supports_unicode,
            animation,
        }
    }
}
