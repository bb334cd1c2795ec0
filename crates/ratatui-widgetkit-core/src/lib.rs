//! `ratatui-widgetkit-core` holds the non-trivial pieces of a console widget toolkit built on
//! ratatui.
//!
//! ## Design goals
//!
//! - Event-loop agnostic: the host drives time (ticks) and rendering.
//! - No async runtime, no threads: everything runs on the caller's thread.
//! - Themes are declared once as library defaults and customized per window or widget with
//!   overrides that can only name attributes the defaults know about.
//!
//! Useful entry points:
//! - [`attributes::LayeredAttributeStore`]: defaults shadowed by sparse overrides.
//! - [`theme::Theme`]: style lookup for widgets, layered over [`theme::library_defaults`].
//! - [`textbox::TextBox`]: animated typewriter text box with word wrap and scrolling.
//! - [`canvas::Canvas`]: the character-cell surface widgets draw onto.
pub mod attributes;
pub mod theme;

pub mod canvas;

pub mod textbox;
