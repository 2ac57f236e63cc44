//! Visual theme and styling.

use console::Style;

/// Terminal theme for offboarding output.
#[derive(Debug, Clone)]
pub struct OffboardTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
    /// Style for follow-up hints (cyan dim).
    pub hint: Style,
    /// Style for blocked status (orange).
    pub blocked: Style,
}

impl Default for OffboardTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl OffboardTheme {
    /// Create the default colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            border: Style::new().dim(),
            hint: Style::new().cyan().dim(),
            blocked: Style::new().color256(208),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            border: Style::new(),
            hint: Style::new(),
            blocked: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format an informational message (icon + text in dim).
    pub fn format_info(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("▸"), self.highlight.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() || !console::colors_enabled() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = OffboardTheme::plain();
        let msg = theme.format_success("Sign-in disabled");
        assert_eq!(msg, "✓ Sign-in disabled");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = OffboardTheme::plain();
        let msg = theme.format_warning("Mailbox on hold");
        assert!(msg.starts_with("⚠"));
        assert!(msg.contains("Mailbox on hold"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = OffboardTheme::plain();
        let msg = theme.format_error("User not found");
        assert!(msg.contains("✗"));
        assert!(msg.contains("User not found"));
    }

    #[test]
    fn theme_formats_info() {
        let theme = OffboardTheme::plain();
        assert_eq!(theme.format_info("No mailbox"), "○ No mailbox");
    }

    #[test]
    fn theme_formats_header() {
        let theme = OffboardTheme::plain();
        let msg = theme.format_header("Offboarding jdoe@contoso.com");
        assert!(msg.contains("jdoe@contoso.com"));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = OffboardTheme::default();
        let new = OffboardTheme::new();
        assert_eq!(default.format_success("x"), new.format_success("x"));
    }
}
