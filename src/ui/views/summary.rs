use appbuild::application::BuildSummary;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::badge::Badge;
use crate::ui::primitives::text::ColoredText;

/// Closing block of a run:
///
/// ```text
/// Summary  14:03:27
/// Total 2
/// App api     OK
/// App worker  FAIL
/// ```
///
/// Returned without a trailing newline.
pub fn render_summary(summary: &BuildSummary, supports_color: bool) -> String {
    let mut lines = Vec::new();

    let title = ColoredText::info("Summary").bold().render(supports_color);
    lines.push(match summary.finished_at() {
        Some(time) => format!("{}  {}", title, ColoredText::dim(time).render(supports_color)),
        None => title,
    });
    lines.push(format!("Total {}", summary.total()));

    let name_width = summary
        .entries()
        .iter()
        .map(|entry| entry.app.width())
        .max()
        .unwrap_or(0);

    for entry in summary.entries() {
        let badge = Badge::from_success(entry.success);
        let status = if supports_color {
            badge.render(true)
        } else {
            badge.text().trim().to_string()
        };
        let pad = " ".repeat(name_width - entry.app.width());
        lines.push(format!("App {}{}  {}", entry.app, pad, status));

        if let Some(message) = &entry.message {
            lines.push(format!(
                "    {}",
                ColoredText::dim(message.as_str()).render(supports_color)
            ));
        }
    }

    lines.join("\n")
}
