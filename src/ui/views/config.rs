use appbuild::config::ConfigWarning;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Unknown-key warnings for the project file, one block per key
pub fn render_config_warnings(
    warnings: &[ConfigWarning],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    for w in warnings {
        let location = match w.line {
            Some(line) => format!("{}:{}", w.file.display(), line),
            None => w.file.display().to_string(),
        };
        out.push_str(&format!(
            "{} Unknown config key '{}' in {}\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            w.key,
            location
        ));

        if let Some(suggestion) = &w.suggestion {
            out.push_str(&format!(
                "   {}\n",
                ColoredText::dim(format!("Did you mean '{}'?", suggestion)).render(supports_color)
            ));
        }
    }
    out
}
