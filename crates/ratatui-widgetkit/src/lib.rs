//! Console widget toolkit pieces for ratatui.
//!
//! This facade re-exports [`ratatui_widgetkit_core`]; see its docs for the individual modules.
pub use ratatui_widgetkit_core::attributes;
pub use ratatui_widgetkit_core::canvas;
pub use ratatui_widgetkit_core::textbox;
pub use ratatui_widgetkit_core::theme;

pub use ratatui_widgetkit_core::attributes::AttributeError;
pub use ratatui_widgetkit_core::textbox::TextBox;
pub use ratatui_widgetkit_core::textbox::TextBoxOptions;
pub use ratatui_widgetkit_core::theme::Theme;
pub use ratatui_widgetkit_core::theme::ThemeSlot;
