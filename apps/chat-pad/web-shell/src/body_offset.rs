/// What to do with the body's inline `margin-right` when the panel goes away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarginRestore {
    Set(String),
    Remove,
}

/// Tracks the body's inline `margin-right` from before the first mount.
///
/// The host can drop the panel and have it remounted while the offset is still
/// applied, so only the first `reserve` after a `release` records the value.
#[derive(Debug, Default)]
pub struct BodyOffset {
    original: Option<String>,
}

impl BodyOffset {
    /// Records `current` as the pre-mount margin unless one is already held.
    /// Returns whether this call captured it.
    pub fn reserve(&mut self, current: &str) -> bool {
        if self.original.is_some() {
            return false;
        }
        self.original = Some(current.to_string());
        true
    }

    /// Hands back the recorded margin. `None` when nothing was reserved.
    pub fn release(&mut self) -> Option<MarginRestore> {
        let original = self.original.take()?;
        if original.trim().is_empty() {
            Some(MarginRestore::Remove)
        } else {
            Some(MarginRestore::Set(original))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_then_unmount_restores_original_margin() {
        let mut offset = BodyOffset::default();
        assert!(offset.reserve("12px"));

        assert_eq!(offset.release(), Some(MarginRestore::Set("12px".to_string())));
        assert_eq!(offset.release(), None);
    }

    #[test]
    fn remount_keeps_the_first_recorded_margin() {
        let mut offset = BodyOffset::default();
        assert!(offset.reserve("12px"));
        // After the first mount the body already carries the panel width.
        assert!(!offset.reserve("420px"));

        assert_eq!(offset.release(), Some(MarginRestore::Set("12px".to_string())));
    }

    #[test]
    fn empty_original_margin_is_removed() {
        let mut offset = BodyOffset::default();
        offset.reserve("");
        assert_eq!(offset.release(), Some(MarginRestore::Remove));

        offset.reserve("  ");
        assert_eq!(offset.release(), Some(MarginRestore::Remove));
    }

    #[test]
    fn release_without_reserve_leaves_margin_alone() {
        let mut offset = BodyOffset::default();
        assert_eq!(offset.release(), None);

        offset.reserve("8px");
        offset.release();
        assert_eq!(offset.release(), None);
    }

    #[test]
    fn a_new_cycle_records_the_current_margin_again() {
        let mut offset = BodyOffset::default();
        offset.reserve("12px");
        offset.release();

        assert!(offset.reserve("4px"));
        assert_eq!(offset.release(), Some(MarginRestore::Set("4px".to_string())));
    }
}
