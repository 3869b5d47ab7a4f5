use appbuild::StageResult;

use crate::ui::primitives::badge::Badge;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Final line of a stage: `<header>\t OK ` or `<header>\t FAIL \t<message>`.
///
/// The failure message is only shown when `verbose`.
pub fn render_stage_line(
    header: &str,
    result: &StageResult,
    verbose: bool,
    supports_color: bool,
) -> String {
    let badge = Badge::from_success(result.is_success()).render(supports_color);
    match result.failure_ref() {
        Some(failure) if verbose => format!(
            "{}\t{}\t{}",
            header,
            badge,
            ColoredText::error(failure.message.as_str()).render(supports_color)
        ),
        _ => format!("{}\t{}", header, badge),
    }
}

pub fn render_warning(message: &str, supports_color: bool, supports_unicode: bool) -> String {
    format!(
        "{} {}",
        Icon::Warning.colored(supports_color, supports_unicode),
        ColoredText::warning(message).render(supports_color)
    )
}
