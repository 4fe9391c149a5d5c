//! Row styling configuration.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Colors are disabled when the `NO_COLOR` environment variable is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from the environment.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Explicitly enabled or disabled colors.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== RowStyles =====

/// Styles for the list chrome and rows.
///
/// Selection always uses reverse video so it stays visible without colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyles {
    /// Title line.
    pub title: Style,
    /// Static header row.
    pub header: Style,
    /// Time column.
    pub time: Style,
    /// Event column.
    pub event: Style,
    /// Skeleton placeholder cells.
    pub placeholder: Style,
    /// Added on top of a selected row.
    pub selected: Style,
    /// Status bar.
    pub status: Style,
    /// Status bar failure message.
    pub error: Style,
}

impl RowStyles {
    /// Styles for the given color configuration.
    pub fn with_color_config(config: ColorConfig) -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let selected = Style::default().add_modifier(Modifier::REVERSED);

        if config.colors_enabled() {
            Self {
                title: bold.fg(Color::Cyan),
                header: bold.fg(Color::White),
                time: Style::default().fg(Color::Blue),
                event: Style::default(),
                placeholder: Style::default().fg(Color::DarkGray),
                selected,
                status: Style::default().fg(Color::Gray),
                error: Style::default().fg(Color::Red),
            }
        } else {
            Self {
                title: bold,
                header: bold,
                time: Style::default(),
                event: Style::default(),
                placeholder: Style::default(),
                selected,
                status: Style::default(),
                error: Style::default(),
            }
        }
    }
}

impl Default for RowStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env())
    }
}
