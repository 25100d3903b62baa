//! Reusable UI components

mod button;
mod dialog;

pub use button::{render_action_button, BUTTON_HEIGHT, BUTTON_WIDTH};
pub use dialog::{render_confirm_dialog, render_error_dialog};
