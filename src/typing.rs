use crate::config::TypingSettings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingTick {
    pub text: String,
    pub delay_ms: u32,
}

/// Typewriter that types each role, holds it, deletes it, then moves on to
/// the next role, wrapping at the end of the list.
#[derive(Clone, Debug)]
pub struct Typewriter {
    roles: Vec<Vec<char>>,
    role_index: usize,
    char_index: usize,
    deleting: bool,
    settings: TypingSettings,
}

impl Typewriter {
    /// Returns `None` when no role has any characters.
    pub fn new<S: AsRef<str>>(roles: &[S], settings: TypingSettings) -> Option<Self> {
        let roles: Vec<Vec<char>> = roles
            .iter()
            .map(|role| role.as_ref().chars().collect::<Vec<_>>())
            .filter(|role| !role.is_empty())
            .collect();

        if roles.is_empty() {
            return None;
        }

        Some(Self {
            roles,
            role_index: 0,
            char_index: 0,
            deleting: false,
            settings,
        })
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Advances by one keystroke and returns what to display and how long to
    /// wait before the next call.
    pub fn tick(&mut self) -> TypingTick {
        let role_len = self.roles[self.role_index].len();

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.settings.delete_delay_ms
        } else {
            self.char_index = (self.char_index + 1).min(role_len);
            self.settings.type_delay_ms
        };
        let text: String = self.roles[self.role_index][..self.char_index].iter().collect();

        if !self.deleting && self.char_index == role_len {
            self.deleting = true;
            delay_ms = self.settings.full_pause_ms;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
            delay_ms = self.settings.empty_pause_ms;
        }

        TypingTick { text, delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typewriter(roles: &[&str]) -> Typewriter {
        Typewriter::new(roles, TypingSettings::default()).expect("non-empty roles")
    }

    #[test]
    fn empty_roles_disable_the_effect() {
        assert!(Typewriter::new::<&str>(&[], TypingSettings::default()).is_none());
        assert!(Typewriter::new(&["", ""], TypingSettings::default()).is_none());
    }

    #[test]
    fn full_cycle_shows_growing_then_shrinking_prefixes() {
        let mut writer = typewriter(&["abc", "de"]);

        let shown: Vec<String> = (0..6).map(|_| writer.tick().text).collect();

        assert_eq!(shown, vec!["a", "ab", "abc", "ab", "a", ""]);
        assert_eq!(writer.role_index(), 1);
        assert!(!writer.is_deleting());
    }

    #[test]
    fn delays_follow_keystroke_and_pause_cadence() {
        let mut writer = typewriter(&["ab"]);

        let delays: Vec<u32> = (0..4).map(|_| writer.tick().delay_ms).collect();

        assert_eq!(delays, vec![75, 2_200, 35, 350]);
    }

    #[test]
    fn roles_wrap_around_forever() {
        let mut writer = typewriter(&["x", "y"]);

        let shown: Vec<String> = (0..8).map(|_| writer.tick().text).collect();

        assert_eq!(shown, vec!["x", "", "y", "", "x", "", "y", ""]);
    }

    #[test]
    fn multibyte_roles_are_sliced_by_character() {
        let mut writer = typewriter(&["Визионер"]);

        let first = writer.tick().text;
        let second = writer.tick().text;

        assert_eq!(first, "В");
        assert_eq!(second, "Ви");
    }

    #[test]
    fn every_default_role_returns_to_empty() {
        let roles = crate::config::DEFAULT_ROLES;
        let mut writer = typewriter(&roles);

        for role in roles {
            let len = role.chars().count();
            let shown: Vec<String> = (0..2 * len).map(|_| writer.tick().text).collect();
            let expected: Vec<String> = (1..=len)
                .chain((0..len).rev())
                .map(|n| role.chars().take(n).collect())
                .collect();
            assert_eq!(shown, expected);
        }
        assert_eq!(writer.role_index(), 0);
    }
}
