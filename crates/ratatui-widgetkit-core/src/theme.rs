use std::sync::Arc;
use std::sync::OnceLock;

use ratatui::style::Style;

use crate::attributes::AttributeError;
use crate::attributes::AttributeStore;
use crate::attributes::LayeredAttributeStore;

/// Every style attribute a widget can ask its theme for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThemeSlot {
    Window,
    Border,
    Title,
    TextPrimary,
    TextMuted,
    Accent,
    Danger,
    Button,
    ButtonFocused,
    Checkbox,
    ListItem,
    ListSelected,
    Entry,
    EntryFocused,
    SliderTrack,
    SliderThumb,
    Menu,
    MenuSelected,
    TextBox,
    Disabled,
}

impl ThemeSlot {
    pub const ALL: [ThemeSlot; 20] = [
        ThemeSlot::Window,
        ThemeSlot::Border,
        ThemeSlot::Title,
        ThemeSlot::TextPrimary,
        ThemeSlot::TextMuted,
        ThemeSlot::Accent,
        ThemeSlot::Danger,
        ThemeSlot::Button,
        ThemeSlot::ButtonFocused,
        ThemeSlot::Checkbox,
        ThemeSlot::ListItem,
        ThemeSlot::ListSelected,
        ThemeSlot::Entry,
        ThemeSlot::EntryFocused,
        ThemeSlot::SliderTrack,
        ThemeSlot::SliderThumb,
        ThemeSlot::Menu,
        ThemeSlot::MenuSelected,
        ThemeSlot::TextBox,
        ThemeSlot::Disabled,
    ];
}

pub type ThemeDefaults = AttributeStore<ThemeSlot, Style>;

fn library_style(slot: ThemeSlot) -> Style {
    use ratatui::style::Stylize;

    match slot {
        ThemeSlot::Window => Style::default(),
        ThemeSlot::Border => Style::default().dark_gray(),
        ThemeSlot::Title => Style::default().bold(),
        ThemeSlot::TextPrimary => Style::default(),
        ThemeSlot::TextMuted => Style::default().dark_gray(),
        ThemeSlot::Accent => Style::default().cyan(),
        ThemeSlot::Danger => Style::default().red(),
        ThemeSlot::Button => Style::default().black().on_gray(),
        ThemeSlot::ButtonFocused => Style::default().black().on_cyan(),
        ThemeSlot::Checkbox => Style::default().cyan(),
        ThemeSlot::ListItem => Style::default(),
        ThemeSlot::ListSelected => Style::default().black().on_cyan(),
        ThemeSlot::Entry => Style::default().on_dark_gray(),
        ThemeSlot::EntryFocused => Style::default().white().on_blue(),
        ThemeSlot::SliderTrack => Style::default().dark_gray(),
        ThemeSlot::SliderThumb => Style::default().cyan(),
        ThemeSlot::Menu => Style::default().black().on_gray(),
        ThemeSlot::MenuSelected => Style::default().white().on_blue(),
        ThemeSlot::TextBox => Style::default().green(),
        ThemeSlot::Disabled => Style::default().dark_gray().italic(),
    }
}

/// The library-wide default table. Built once and shared by every [`Theme::new`].
pub fn library_defaults() -> Arc<ThemeDefaults> {
    static DEFAULTS: OnceLock<Arc<ThemeDefaults>> = OnceLock::new();
    DEFAULTS
        .get_or_init(|| {
            let store: ThemeDefaults = ThemeSlot::ALL
                .iter()
                .map(|&slot| (slot, library_style(slot)))
                .collect();
            Arc::new(store)
        })
        .clone()
}

/// A window or widget theme: a shared default table with per-instance overrides.
///
/// A widget usually starts from a [`Theme::snapshot`] of its window's theme and overrides only
/// the handful of slots it customizes.
#[derive(Clone, Debug)]
pub struct Theme {
    attrs: LayeredAttributeStore<ThemeSlot, Style>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

impl Theme {
    pub fn new() -> Self {
        Self {
            attrs: LayeredAttributeStore::new(library_defaults()),
        }
    }

    /// Uses a custom default table. Every [`ThemeSlot`] must be present, which is what lets
    /// [`Theme::style`] be infallible.
    pub fn with_defaults(defaults: Arc<ThemeDefaults>) -> Result<Self, AttributeError> {
        if let Some(missing) = ThemeSlot::ALL
            .iter()
            .find(|slot| !defaults.contains_key(slot))
        {
            return Err(AttributeError::InvalidConfiguration(format!(
                "theme defaults are missing {missing:?}"
            )));
        }
        Ok(Self {
            attrs: LayeredAttributeStore::new(defaults),
        })
    }

    /// A theme whose defaults are this theme's values as of now, with no overrides of its own.
    ///
    /// The result is detached: later changes to `self` do not carry over to it.
    pub fn snapshot(&self) -> Self {
        Self {
            attrs: LayeredAttributeStore::new(Arc::new(self.attrs.resolve())),
        }
    }

    pub fn style(&self, slot: ThemeSlot) -> Style {
        self.attrs.get(&slot).copied().unwrap_or_default()
    }

    pub fn set(&mut self, slot: ThemeSlot, style: Style) -> Result<(), AttributeError> {
        self.attrs.set_override(slot, style)
    }

    pub fn with(mut self, slot: ThemeSlot, style: Style) -> Result<Self, AttributeError> {
        self.set(slot, style)?;
        Ok(self)
    }

    pub fn reset(&mut self, slot: ThemeSlot) -> bool {
        self.attrs.clear_override(&slot)
    }

    pub fn reset_all(&mut self) {
        self.attrs.clear_all_overrides();
    }

    pub fn is_overridden(&self, slot: ThemeSlot) -> bool {
        self.attrs.has_override(&slot)
    }

    pub fn attributes(&self) -> &LayeredAttributeStore<ThemeSlot, Style> {
        &self.attrs
    }
}
