//! Live settings shared between the UI and the renderer.
//!
//! A [`Setting`] is a cheap, cloneable handle to one value. The UI writes it, the renderer reads it
//! at the start of every frame. Both run on the same thread, so the cell is `Rc`-based.

use std::{cell::RefCell, fmt, rc::Rc};

/// Cloneable handle to a single shared value.
pub struct Setting<T> {
    cell: Rc<RefCell<T>>,
}

impl<T> Clone for Setting<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Setting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Setting").field(&*self.cell.borrow()).finish()
    }
}

impl<T: Default> Default for Setting<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Setting<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Rc::new(RefCell::new(value)),
        }
    }

    pub fn set(&self, value: T) {
        *self.cell.borrow_mut() = value;
    }

    /// Replace the value with `f(old)`.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.cell.borrow());
        self.set(next);
    }

    /// True when both handles point at the same value.
    pub fn shares_with(&self, other: &Setting<T>) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T: Clone> Setting<T> {
    pub fn get(&self) -> T {
        self.cell.borrow().clone()
    }
}

/// Action produced by a binding; invoking it pushes a value into a setting.
pub type SettingAction = Box<dyn Fn()>;

/// One-way binding that stores `value` whenever the returned action runs.
///
/// Nothing flows back: changing the setting elsewhere does not affect the action.
pub fn bind_value<T: Clone + 'static>(setting: &Setting<T>, value: T) -> SettingAction {
    let setting = setting.clone();
    Box::new(move || setting.set(value.clone()))
}

/// One-way binding that flips a boolean setting.
pub fn bind_toggle(setting: &Setting<bool>) -> SettingAction {
    let setting = setting.clone();
    Box::new(move || setting.update(|v| !v))
}

/// Map mode selecting which content the tile source produces.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    #[default]
    Overworld,
    Nether,
    End,
}

impl Dimension {
    /// The void dimension has no ground; its background is a tiled placeholder texture.
    pub fn is_void(self) -> bool {
        matches!(self, Self::End)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Overworld => "overworld",
            Self::Nether => "nether",
            Self::End => "end",
        }
    }
}

impl std::str::FromStr for Dimension {
    type Err = crate::TilescopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overworld" => Ok(Self::Overworld),
            "nether" => Ok(Self::Nether),
            "end" => Ok(Self::End),
            other => Err(crate::TilescopeError::validation(format!(
                "unknown dimension '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
