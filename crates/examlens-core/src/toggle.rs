//! Column-header sort toggling.
//!
//! Clicking the same key twice flips the direction; clicking a new key starts
//! ascending. This is caller-side state; the pipeline in [`crate::filter`]
//! only ever sees the resulting [`SortSpec`].

use crate::filter::{SortDirection, SortKey, SortSpec};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortToggle {
    current: SortSpec,
}

impl SortToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a click on `key` and return the sort to apply.
    pub fn click(&mut self, key: SortKey) -> SortSpec {
        self.current = if key != SortKey::None && key == self.current.key {
            SortSpec::new(key, self.current.direction.flipped())
        } else {
            SortSpec::new(key, SortDirection::Asc)
        };
        self.current
    }

    pub fn current(&self) -> SortSpec {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = SortSpec::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_flips_direction() {
        let mut toggle = SortToggle::new();
        assert_eq!(toggle.click(SortKey::Score).direction, SortDirection::Asc);
        assert_eq!(toggle.click(SortKey::Score).direction, SortDirection::Desc);
        assert_eq!(toggle.click(SortKey::Score).direction, SortDirection::Asc);
    }

    #[test]
    fn new_key_starts_ascending() {
        let mut toggle = SortToggle::new();
        toggle.click(SortKey::Score);
        toggle.click(SortKey::Score);
        let spec = toggle.click(SortKey::Exam);
        assert_eq!(spec, SortSpec::new(SortKey::Exam, SortDirection::Asc));
        assert_eq!(toggle.current(), spec);
    }

    #[test]
    fn reset_returns_to_unsorted() {
        let mut toggle = SortToggle::new();
        toggle.click(SortKey::Exam);
        toggle.reset();
        assert_eq!(toggle.current(), SortSpec::default());
        assert_eq!(toggle.click(SortKey::None).direction, SortDirection::Asc);
    }
}
