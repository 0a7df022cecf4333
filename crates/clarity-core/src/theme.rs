//! Named colour palettes and the reactive store holding the active one.
//!
//! Palettes are static; only the selection changes. [`ThemeStore`] is a
//! cheap-to-clone handle over a `tokio::sync::watch` channel, so views read
//! the active palette synchronously and subscribe to changes without a
//! global. [`ThemeContext`] is the value views receive: it is either mounted
//! with a store or not, and resolving through an unmounted context is a
//! wiring bug that panics.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;

/// One of the five semantic colour slots a palette fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
}

impl ColorRole {
    pub const ALL: [ColorRole; 5] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Background,
        ColorRole::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Background => "background",
            ColorRole::Text => "text",
        }
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::UnknownRole(s.to_string()))
    }
}

/// A named set of colour tokens, one per [`ColorRole`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

pub const DEFAULT_PALETTE: &str = "default";

static PALETTES: [Palette; 4] = [
    Palette {
        name: DEFAULT_PALETTE,
        primary: "blue-600",
        secondary: "indigo-500",
        accent: "purple-500",
        background: "gray-50",
        text: "gray-800",
    },
    Palette {
        name: "therapist1",
        primary: "emerald-600",
        secondary: "teal-500",
        accent: "cyan-500",
        background: "gray-50",
        text: "gray-800",
    },
    Palette {
        name: "therapist2",
        primary: "violet-600",
        secondary: "purple-500",
        accent: "fuchsia-500",
        background: "gray-50",
        text: "gray-800",
    },
    Palette {
        name: "therapist3",
        primary: "amber-600",
        secondary: "orange-500",
        accent: "yellow-500",
        background: "gray-50",
        text: "gray-800",
    },
];

impl Palette {
    pub fn all() -> &'static [Palette] {
        &PALETTES
    }

    pub fn by_name(name: &str) -> Option<&'static Palette> {
        PALETTES.iter().find(|palette| palette.name == name)
    }

    pub fn default_palette() -> &'static Palette {
        &PALETTES[0]
    }

    pub fn token(&self, role: ColorRole) -> &'static str {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Background => self.background,
            ColorRole::Text => self.text,
        }
    }
}

/// Process-wide active palette selection with change notification.
///
/// Clones share the same selection and subscribers.
#[derive(Clone)]
pub struct ThemeStore {
    sender: Arc<watch::Sender<&'static Palette>>,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeStore")
            .field("active", &self.active_name())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl ThemeStore {
    /// Mount a store with the default palette active.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Palette::default_palette());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Select a palette by name.
    ///
    /// Unknown names are ignored so an unrecognised provider profile never
    /// breaks rendering. Re-selecting the active palette does not notify.
    pub fn set_active_palette(&self, name: &str) {
        let Some(palette) = Palette::by_name(name) else {
            debug!(palette = name, "ignoring unknown palette");
            return;
        };

        let changed = self.sender.send_if_modified(|active| {
            if active.name == palette.name {
                return false;
            }
            *active = palette;
            true
        });

        if changed {
            debug!(palette = name, "active palette changed");
        }
    }

    pub fn active_palette(&self) -> &'static Palette {
        *self.sender.borrow()
    }

    pub fn active_name(&self) -> &'static str {
        self.active_palette().name
    }

    /// Token for `role` in the active palette.
    pub fn resolve(&self, role: ColorRole) -> &'static str {
        self.active_palette().token(role)
    }

    pub fn subscribe(&self) -> ThemeSubscription {
        ThemeSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// Observer handle returned by [`ThemeStore::subscribe`].
pub struct ThemeSubscription {
    receiver: watch::Receiver<&'static Palette>,
}

impl ThemeSubscription {
    pub fn current(&self) -> &'static Palette {
        *self.receiver.borrow()
    }

    /// Whether the selection changed since this handle last observed it.
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next selection change. Returns `None` once every
    /// [`ThemeStore`] handle has been dropped.
    pub async fn changed(&mut self) -> Option<&'static Palette> {
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }
}

/// Theme handle passed down to views.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    store: Option<ThemeStore>,
}

impl ThemeContext {
    pub fn mount(store: ThemeStore) -> Self {
        Self { store: Some(store) }
    }

    pub fn is_mounted(&self) -> bool {
        self.store.is_some()
    }

    /// The mounted store.
    ///
    /// # Panics
    ///
    /// Panics when no store has been mounted. That only happens when a view
    /// is wired without a theme provider.
    pub fn theme(&self) -> &ThemeStore {
        match &self.store {
            Some(store) => store,
            None => panic!("theme used outside of a mounted ThemeStore"),
        }
    }

    pub fn resolve(&self, role: ColorRole) -> &'static str {
        self.theme().resolve(role)
    }
}
