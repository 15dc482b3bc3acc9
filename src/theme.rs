//! Theme: the color names each visual state is drawn with.
//!
//! Values are opaque to the widgets; a host maps them to whatever its
//! terminal supports. The defaults follow the design-system tokens the
//! components were specified against (`border-blue-500`, `border-success`...).

use crate::date::VisualState;
use crate::render::CellStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub default: String,
    pub active: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    /// Foreground for popup text.
    pub popup_fg: String,
    /// Background of the popup panel.
    pub popup_bg: String,
    /// Background for the selected day, month or year.
    pub selected_bg: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            default: "gray-300".into(),
            active: "blue-500".into(),
            success: "success".into(),
            warning: "warning".into(),
            error: "error".into(),
            popup_fg: "gray-900".into(),
            popup_bg: "white".into(),
            selected_bg: "blue-500".into(),
        }
    }
}

impl Theme {
    /// Color name for a field in `state`.
    pub fn state_color(&self, state: VisualState) -> &str {
        match state {
            VisualState::Default => &self.default,
            VisualState::Active => &self.active,
            VisualState::Success => &self.success,
            VisualState::Warning => &self.warning,
            VisualState::Error => &self.error,
        }
    }

    /// Cell style for a field's frame in `state`.
    pub fn field_style(&self, state: VisualState) -> CellStyle {
        CellStyle::fg(self.state_color(state))
    }

    /// Cell style for ordinary popup content.
    pub fn popup_style(&self) -> CellStyle {
        CellStyle::fg(&self.popup_fg).with_bg(&self.popup_bg)
    }

    /// Cell style for the highlighted entry in a popup.
    pub fn selected_style(&self) -> CellStyle {
        CellStyle::fg(&self.popup_bg).with_bg(&self.selected_bg).bold()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_colors_follow_tokens() {
        let theme = Theme::default();
        assert_eq!(theme.state_color(VisualState::Error), "error");
        assert_eq!(theme.state_color(VisualState::Active), "blue-500");
        assert_eq!(theme.state_color(VisualState::Success), "success");
        assert_eq!(theme.state_color(VisualState::Warning), "warning");
        assert_eq!(theme.state_color(VisualState::Default), "gray-300");
    }

    #[test]
    fn selected_style_inverts_popup_colors() {
        let theme = Theme::default();
        let style = theme.selected_style();
        assert_eq!(style.fg.as_deref(), Some("white"));
        assert_eq!(style.bg.as_deref(), Some("blue-500"));
        assert!(style.bold);
    }
}
