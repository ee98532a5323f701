pub const SCROLLED_CLASS: &str = "scrolled";
pub const VISIBLE_CLASS: &str = "visible";
pub const ACTIVE_CLASS: &str = "active";
pub const ACTIVE_LINK_CLASS: &str = "active-link";

/// Scrolled flag of the navbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavbarState {
    scrolled: bool,
}

impl NavbarState {
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Recomputes the flag for a scroll offset; returns `true` when it flipped.
    pub fn update(&mut self, scroll_y: f64, threshold: f64) -> bool {
        let scrolled = scroll_y > threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}

/// Reveal state of one element. Once visible it stays visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealLatch {
    revealed: bool,
}

impl RevealLatch {
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Returns `true` only for the first intersecting observation.
    pub fn observe(&mut self, intersecting: bool) -> bool {
        if self.revealed || !intersecting {
            return false;
        }
        self.revealed = true;
        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Section whose vertical extent contains `scroll_y + offset`. Sections are
/// checked in document order and the last match wins.
pub fn active_section(scroll_y: f64, offset: f64, sections: &[SectionBounds]) -> Option<&str> {
    let probe = scroll_y + offset;
    sections
        .iter()
        .filter(|section| probe >= section.top && probe < section.top + section.height)
        .last()
        .map(|section| section.id.as_str())
}

pub fn section_href(id: &str) -> String {
    format!("#{id}")
}

/// How a click on a link should be handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor<'a> {
    /// Not a same-page link; the browser handles it.
    External,
    /// A bare `#`: the jump is suppressed and nothing else happens.
    Bare,
    /// Smooth-scroll to the element with this id, if it exists.
    Section(&'a str),
}

impl<'a> Anchor<'a> {
    pub fn classify(href: &'a str) -> Self {
        match href.strip_prefix('#') {
            None => Self::External,
            Some("") => Self::Bare,
            Some(id) => Self::Section(id),
        }
    }

    pub fn intercepts(self) -> bool {
        !matches!(self, Self::External)
    }
}

/// Mobile navigation panel. While open, page scrolling is locked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    /// Value for the body's `overflow` style.
    pub fn body_overflow(self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds {
                id: "home".to_string(),
                top: 0.0,
                height: 800.0,
            },
            SectionBounds {
                id: "about".to_string(),
                top: 800.0,
                height: 600.0,
            },
            SectionBounds {
                id: "contact".to_string(),
                top: 1400.0,
                height: 400.0,
            },
        ]
    }

    #[test]
    fn navbar_flips_once_when_crossing_threshold() {
        let mut navbar = NavbarState::default();

        assert!(!navbar.update(0.0, 50.0));
        assert!(!navbar.is_scrolled());
        assert!(navbar.update(60.0, 50.0));
        assert!(navbar.is_scrolled());
        assert!(!navbar.update(70.0, 50.0));
        assert!(navbar.update(10.0, 50.0));
        assert!(!navbar.is_scrolled());
    }

    #[test]
    fn navbar_threshold_is_exclusive() {
        let mut navbar = NavbarState::default();

        navbar.update(50.0, 50.0);
        assert!(!navbar.is_scrolled());
        navbar.update(50.5, 50.0);
        assert!(navbar.is_scrolled());
    }

    #[test]
    fn reveal_fires_at_most_once_and_only_when_intersecting() {
        let mut latch = RevealLatch::default();

        assert!(!latch.observe(false));
        assert!(!latch.is_revealed());
        assert!(latch.observe(true));
        assert!(!latch.observe(true));
        assert!(!latch.observe(false));
        assert!(latch.is_revealed());
    }

    #[test]
    fn active_section_uses_offset_probe() {
        let sections = sections();

        assert_eq!(active_section(0.0, 120.0, &sections), Some("home"));
        assert_eq!(active_section(679.0, 120.0, &sections), Some("home"));
        assert_eq!(active_section(680.0, 120.0, &sections), Some("about"));
        assert_eq!(active_section(1300.0, 120.0, &sections), Some("contact"));
        assert_eq!(active_section(5000.0, 120.0, &sections), None);
    }

    #[test]
    fn anchors_are_classified_by_href() {
        assert_eq!(Anchor::classify("#about"), Anchor::Section("about"));
        assert_eq!(Anchor::classify("#"), Anchor::Bare);
        assert_eq!(Anchor::classify("https://example.com"), Anchor::External);
        assert!(Anchor::classify("#").intercepts());
        assert!(!Anchor::classify("/resume.pdf").intercepts());
        assert_eq!(section_href("about"), "#about");
    }

    #[test]
    fn menu_locks_scrolling_while_open() {
        let menu = MenuState::default();
        assert_eq!(menu.body_overflow(), "");

        let open = menu.toggled();
        assert!(open.is_open());
        assert_eq!(open.body_overflow(), "hidden");

        assert_eq!(open.toggled(), MenuState::closed());
        assert_eq!(MenuState::closed().body_overflow(), "");
    }
}
