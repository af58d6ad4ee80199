pub mod dialog;
pub mod form;
pub mod styled_button;
pub mod toast;
