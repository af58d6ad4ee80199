//! Tags the dashboard uses to pick how an element or dialog is rendered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic state of a button, badge or notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleType {
    #[default]
    Normal,
    Info,
    Success,
    Danger,
    Warning,
}

impl StyleType {
    /// The style token used by the stylesheet, e.g. `danger`.
    pub fn token(self) -> &'static str {
        match self {
            StyleType::Normal => "normal",
            StyleType::Info => "info",
            StyleType::Success => "success",
            StyleType::Danger => "danger",
            StyleType::Warning => "warning",
        }
    }

    /// CSS class applied to styled elements: `style-<token>`.
    pub fn css_class(self) -> String {
        format!("style-{}", self.token())
    }
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Which kind of modal dialog to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogType {
    /// Wraps a form and offers a submit action.
    Form,
    /// Asks the user to confirm or cancel an action.
    Confirmation,
    /// Arbitrary content with only a close button.
    #[default]
    Blank,
}

impl DialogType {
    pub fn has_submit(self) -> bool {
        matches!(self, DialogType::Form)
    }

    pub fn has_confirm(self) -> bool {
        matches!(self, DialogType::Confirmation)
    }

    /// Style of the primary action button.
    pub fn primary_style(self) -> StyleType {
        match self {
            DialogType::Form => StyleType::Success,
            DialogType::Confirmation => StyleType::Danger,
            DialogType::Blank => StyleType::Normal,
        }
    }
}
