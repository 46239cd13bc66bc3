#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutPlatform {
    Mac,
    Other,
}

impl ShortcutPlatform {
    /// Classifies a `navigator.platform` string.
    #[must_use]
    pub fn from_navigator_platform(platform: &str) -> Self {
        if platform.to_ascii_uppercase().contains("MAC") {
            Self::Mac
        } else {
            Self::Other
        }
    }
}

/// Modifier and key state of one keydown event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

/// Cmd+S on macOS, Ctrl+S everywhere else. Any extra modifier is left to the host.
#[must_use]
pub fn is_save_shortcut(platform: ShortcutPlatform, chord: &KeyChord) -> bool {
    if chord.key != "s" || chord.shift || chord.alt {
        return false;
    }
    match platform {
        ShortcutPlatform::Mac => chord.meta && !chord.ctrl,
        ShortcutPlatform::Other => chord.ctrl && !chord.meta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(key: &str, ctrl: bool, meta: bool) -> KeyChord {
        KeyChord {
            key: key.to_string(),
            ctrl,
            meta,
            shift: false,
            alt: false,
        }
    }

    #[test]
    fn mac_platform_strings_are_detected() {
        assert_eq!(
            ShortcutPlatform::from_navigator_platform("MacIntel"),
            ShortcutPlatform::Mac
        );
        assert_eq!(
            ShortcutPlatform::from_navigator_platform("Win32"),
            ShortcutPlatform::Other
        );
        assert_eq!(
            ShortcutPlatform::from_navigator_platform("Linux x86_64"),
            ShortcutPlatform::Other
        );
    }

    #[test]
    fn mac_saves_on_meta_only() {
        assert!(is_save_shortcut(ShortcutPlatform::Mac, &chord("s", false, true)));
        assert!(!is_save_shortcut(ShortcutPlatform::Mac, &chord("s", true, false)));
    }

    #[test]
    fn other_platforms_save_on_ctrl_only() {
        assert!(is_save_shortcut(ShortcutPlatform::Other, &chord("s", true, false)));
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &chord("s", false, true)));
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &chord("s", true, true)));
    }

    #[test]
    fn shift_and_alt_chords_stay_with_the_host() {
        let save_as_mac = KeyChord {
            shift: true,
            ..chord("S", false, true)
        };
        assert!(!is_save_shortcut(ShortcutPlatform::Mac, &save_as_mac));

        let save_as_other = KeyChord {
            shift: true,
            ..chord("S", true, false)
        };
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &save_as_other));

        let shift_lowercase = KeyChord {
            shift: true,
            ..chord("s", true, false)
        };
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &shift_lowercase));

        let alt_mac = KeyChord {
            alt: true,
            ..chord("s", false, true)
        };
        assert!(!is_save_shortcut(ShortcutPlatform::Mac, &alt_mac));

        let alt_other = KeyChord {
            alt: true,
            ..chord("s", true, false)
        };
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &alt_other));

        assert!(!is_save_shortcut(ShortcutPlatform::Mac, &chord("s", true, true)));
    }

    #[test]
    fn other_keys_never_match() {
        assert!(!is_save_shortcut(ShortcutPlatform::Other, &chord("d", true, false)));
        assert!(!is_save_shortcut(ShortcutPlatform::Mac, &chord("Enter", false, true)));
    }
}
