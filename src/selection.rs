//! Toggle state for the feedback form.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::options::OptionKey;

/// On/off flag for every [`OptionKey`], iterated in report order.
///
/// Every key is always present; a fresh state has all of them off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionState {
    flags: [bool; OptionKey::COUNT],
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State where exactly `keys` are on. Repeated keys stay on.
    pub fn from_selected<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = OptionKey>,
    {
        let mut state = Self::new();
        for k in keys {
            state.set(k, true);
        }
        state
    }

    /// Flip `key`. No other key is touched.
    pub fn toggle(&mut self, key: OptionKey) {
        let flag = &mut self.flags[key.index()];
        *flag = !*flag;
    }

    pub fn set(&mut self, key: OptionKey, value: bool) {
        self.flags[key.index()] = value;
    }

    pub fn is_selected(&self, key: OptionKey) -> bool {
        self.flags[key.index()]
    }

    /// Turn every option off.
    pub fn clear(&mut self) {
        self.flags = [false; OptionKey::COUNT];
    }

    /// `(key, flag)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, bool)> + '_ {
        OptionKey::ALL.iter().map(|&k| (k, self.is_selected(k)))
    }

    /// Keys that are on, in report order.
    pub fn selected(&self) -> impl Iterator<Item = OptionKey> + '_ {
        self.iter().filter(|&(_, on)| on).map(|(k, _)| k)
    }

    pub fn selected_count(&self) -> usize {
        self.flags.iter().filter(|&&on| on).count()
    }
}

/// Serializes as `{"redBean": false, "fineBean": true, ...}` in report order.
impl Serialize for SelectionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(OptionKey::COUNT))?;
        for (k, on) in self.iter() {
            map.serialize_entry(k.key(), &on)?;
        }
        map.end()
    }
}
