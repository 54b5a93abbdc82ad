// File: crates/figkit-core/src/context.rs
// Summary: Active style state read by figure creation; global or scoped activation of a profile.
// Notes:
// - State is per thread. Figures capture a copy when created, so later
//   style changes never alter an existing figure.

use std::cell::RefCell;

use crate::style::StyleProfile;

/// Figure size used before any profile sets one, in inches.
pub const DEFAULT_FIGURE_SIZE: (f64, f64) = (6.4, 4.8);
/// DPI used before any profile sets one.
pub const DEFAULT_DPI: u32 = 100;

/// Everything figure creation reads from the active style.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    pub figure_size: (f64, f64),
    pub dpi: u32,
    pub profile: StyleProfile,
}

impl Default for Style {
    fn default() -> Self {
        Self { figure_size: DEFAULT_FIGURE_SIZE, dpi: DEFAULT_DPI, profile: StyleProfile::default() }
    }
}

impl Style {
    /// Overlay `profile`; figure size and DPI change only when the profile sets them.
    pub fn apply(&mut self, profile: &StyleProfile) {
        if let Some(size) = profile.figure_size {
            self.figure_size = size;
        }
        if let Some(dpi) = profile.dpi {
            self.dpi = dpi;
        }
        self.profile = profile.clone();
    }
}

thread_local! {
    static ACTIVE: RefCell<Style> = RefCell::new(Style::default());
}

/// Snapshot of the active style.
pub fn current_style() -> Style {
    ACTIVE.with(|s| s.borrow().clone())
}

/// Apply `profile` until changed again.
pub fn use_style(profile: &StyleProfile) {
    ACTIVE.with(|s| s.borrow_mut().apply(profile));
    log::debug!("activated style (font.size = {})", profile.font.size);
}

/// Restore library defaults.
pub fn reset_style() {
    ACTIVE.with(|s| *s.borrow_mut() = Style::default());
}

/// Restores the style that was active before [`style_context`] on drop.
#[must_use = "the style is restored as soon as the guard is dropped"]
pub struct StyleGuard {
    previous: Option<Style>,
}

impl Drop for StyleGuard {
    fn drop(&mut self) {
        if let Some(prev) = self.previous.take() {
            ACTIVE.with(|s| *s.borrow_mut() = prev);
        }
    }
}

/// Apply `profile` for the lifetime of the returned guard.
pub fn style_context(profile: &StyleProfile) -> StyleGuard {
    let previous = current_style();
    use_style(profile);
    StyleGuard { previous: Some(previous) }
}

/// Run `f` with `profile` active; the previous style is restored even if `f` panics.
pub fn with_style<R>(profile: &StyleProfile, f: impl FnOnce() -> R) -> R {
    let _guard = style_context(profile);
    f()
}
