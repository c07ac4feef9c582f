//! Decides whether a window is a manageable application window.
//!
//! The raw top-level window list contains message-only windows, tool
//! palettes, cloaked UWP frames and other surfaces the user never sees.
//! The filter approximates "would appear in the application switcher".

use crate::style::{ExtendedStyle, Style};
use crate::window::{WindowHandle, WindowSystem};

/// Upper bound on the last-active-popup walk.
const MAX_POPUP_WALK: usize = 64;

/// Returns whether `handle` is a manageable application window.
///
/// Pure function of the current window state: no side effects, safe to
/// call from any thread. A window that cannot be queried is not
/// manageable.
pub fn is_manageable<S: WindowSystem + ?Sized>(system: &S, handle: WindowHandle) -> bool {
    if handle.is_null() || !system.is_visible(handle) {
        return false;
    }

    let Some(ex_style) = system.extended_style(handle) else {
        return false;
    };
    if ex_style.contains(ExtendedStyle::NOACTIVATE) {
        return false;
    }

    let Some(style) = system.style(handle) else {
        return false;
    };
    if style.contains(Style::CHILD) {
        return false;
    }

    // An unreadable cloak attribute means DWM has nothing to say about
    // the window, not that it is hidden.
    if system.is_cloaked(handle).unwrap_or(false) {
        return false;
    }

    is_alt_tab_window(system, handle, ex_style)
}

/// The switcher heuristic: unowned, not a tool window, and either marked
/// as an app window or the last active visible popup of its owner chain.
///
/// See "Which windows appear in the Alt+Tab list?" (The Old New Thing,
/// 2007-10-08).
fn is_alt_tab_window<S: WindowSystem + ?Sized>(
    system: &S,
    handle: WindowHandle,
    ex_style: ExtendedStyle,
) -> bool {
    if ex_style.contains(ExtendedStyle::TOOLWINDOW) || system.owner_of(handle).is_some() {
        return false;
    }
    if ex_style.contains(ExtendedStyle::APPWINDOW) {
        return true;
    }

    let Some(mut candidate) = system.root_owner_of(handle) else {
        return false;
    };

    for _ in 0..MAX_POPUP_WALK {
        let Some(popup) = system.last_active_popup_of(candidate) else {
            return false;
        };
        if popup == candidate || system.is_visible(popup) {
            return popup == handle;
        }
        candidate = popup;
    }

    tracing::debug!("popup walk for {handle} did not converge");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeSystem, FakeWindow};

    #[test]
    fn plain_app_window_is_manageable() {
        // Arrange
        let system = FakeSystem::new();
        let h = system.add(0x10, FakeWindow::app("Notepad"));

        // Act / Assert
        assert!(is_manageable(&system, h));
    }

    #[test]
    fn invisible_window_is_rejected() {
        let system = FakeSystem::new();
        let h = system.add(0x10, FakeWindow::hidden("Hidden"));

        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn no_activate_window_is_rejected() {
        // Arrange
        let system = FakeSystem::new();
        let h = system.add(
            0x10,
            FakeWindow {
                ex_style: ExtendedStyle::NOACTIVATE | ExtendedStyle::APPWINDOW,
                ..FakeWindow::app("Overlay")
            },
        );

        // Act / Assert
        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn child_window_is_rejected() {
        let system = FakeSystem::new();
        let h = system.add(
            0x10,
            FakeWindow {
                style: Style::VISIBLE | Style::CHILD,
                ..FakeWindow::app("Child")
            },
        );

        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn cloaked_window_is_rejected() {
        let system = FakeSystem::new();
        let h = system.add(
            0x10,
            FakeWindow {
                cloaked: Some(true),
                ..FakeWindow::app("Other desktop")
            },
        );

        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn unreadable_cloak_attribute_counts_as_uncloaked() {
        let system = FakeSystem::new();
        let h = system.add(
            0x10,
            FakeWindow {
                cloaked: None,
                ..FakeWindow::app("Legacy")
            },
        );

        assert!(is_manageable(&system, h));
    }

    #[test]
    fn tool_window_is_rejected_even_with_app_window_style() {
        let system = FakeSystem::new();
        let h = system.add(
            0x10,
            FakeWindow {
                ex_style: ExtendedStyle::TOOLWINDOW | ExtendedStyle::APPWINDOW,
                ..FakeWindow::app("Palette")
            },
        );

        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn owned_window_is_rejected() {
        // Arrange
        let system = FakeSystem::new();
        let owner = system.add(0x10, FakeWindow::app("Main"));
        let dialog = system.add(
            0x20,
            FakeWindow {
                owner: Some(owner),
                root_owner: Some(owner),
                ..FakeWindow::app("Find")
            },
        );

        // Act / Assert
        assert!(!is_manageable(&system, dialog));
        assert!(is_manageable(&system, owner));
    }

    #[test]
    fn app_window_style_accepts_without_popup_walk() {
        // Arrange: the popup walk alone would reject this window.
        let system = FakeSystem::new();
        let popup = system.add(0x20, FakeWindow::app("Popup"));
        let h = system.add(
            0x10,
            FakeWindow {
                ex_style: ExtendedStyle::APPWINDOW,
                last_active_popup: Some(popup),
                ..FakeWindow::app("Launcher")
            },
        );

        // Act / Assert
        assert!(is_manageable(&system, h));
    }

    #[test]
    fn window_with_visible_active_popup_is_rejected() {
        // Arrange: a visible popup stands in for its root owner.
        let system = FakeSystem::new();
        let popup = system.add(0x20, FakeWindow::app("Popup"));
        let h = system.add(
            0x10,
            FakeWindow {
                last_active_popup: Some(popup),
                ..FakeWindow::app("Root")
            },
        );

        // Act / Assert
        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn walk_skips_hidden_popups_back_to_the_window() {
        // Arrange: root -> hidden popup -> back to root.
        let system = FakeSystem::new();
        let h = WindowHandle::from_raw(0x10);
        let popup = system.add(
            0x20,
            FakeWindow {
                last_active_popup: Some(h),
                ..FakeWindow::hidden("Hidden popup")
            },
        );
        system.add(
            0x10,
            FakeWindow {
                last_active_popup: Some(popup),
                ..FakeWindow::app("Root")
            },
        );

        // Act / Assert
        assert!(is_manageable(&system, h));
    }

    #[test]
    fn non_converging_popup_walk_is_rejected() {
        // Arrange: two hidden popups pointing at each other.
        let system = FakeSystem::new();
        let a = WindowHandle::from_raw(0x20);
        let b = WindowHandle::from_raw(0x30);
        system.add(
            0x20,
            FakeWindow {
                last_active_popup: Some(b),
                ..FakeWindow::hidden("A")
            },
        );
        system.add(
            0x30,
            FakeWindow {
                last_active_popup: Some(a),
                ..FakeWindow::hidden("B")
            },
        );
        let h = system.add(
            0x10,
            FakeWindow {
                last_active_popup: Some(a),
                ..FakeWindow::app("Root")
            },
        );

        // Act / Assert
        assert!(!is_manageable(&system, h));
    }

    #[test]
    fn unknown_or_null_handle_is_rejected() {
        let system = FakeSystem::new();

        assert!(!is_manageable(&system, WindowHandle::from_raw(0xDEAD)));
        assert!(!is_manageable(&system, WindowHandle::NULL));
    }

    #[test]
    fn repeated_calls_agree() {
        // Arrange
        let system = FakeSystem::new();
        let h = system.add(0x10, FakeWindow::app("Notepad"));

        // Act
        let results: Vec<bool> = (0..5).map(|_| is_manageable(&system, h)).collect();
        let from_thread = std::thread::scope(|s| s.spawn(|| is_manageable(&system, h)).join());

        // Assert
        assert!(results.iter().all(|&r| r));
        assert!(from_thread.unwrap());
    }
}
