//! Output verbosity.

/// Output verbosity mode.
///
/// Status lines, errors and hints are shown in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including the effective connection settings.
    Verbose,
    /// Show step status and summary.
    #[default]
    Normal,
    /// Show step status and hints only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows headers and the summary.
    pub fn shows_decoration(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}
