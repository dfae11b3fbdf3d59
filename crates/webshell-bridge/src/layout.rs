// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bottom bar layout per login state.
//
// Projectors compute the layout here and only apply it natively, so the
// rules stay the same on every platform.

/// Bottom bar button height in density-independent pixels.
pub const BUTTON_HEIGHT_DP: u32 = 48;

/// Horizontal sizing of a button inside the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ButtonWidth {
    /// Share the bar with the other visible buttons.
    Weighted(f32),
    /// Take the whole bar.
    FullWidth,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonLayout {
    pub visible: bool,
    pub width: ButtonWidth,
    pub height_dp: u32,
}

impl ButtonLayout {
    fn shown(width: ButtonWidth) -> Self {
        Self {
            visible: true,
            width,
            height_dp: BUTTON_HEIGHT_DP,
        }
    }

    fn hidden() -> Self {
        Self {
            visible: false,
            width: ButtonWidth::Weighted(1.0),
            height_dp: BUTTON_HEIGHT_DP,
        }
    }
}

/// Back, menu and my-page buttons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BottomBarLayout {
    pub back: ButtonLayout,
    pub menu: ButtonLayout,
    pub my_page: ButtonLayout,
}

impl BottomBarLayout {
    /// Logged in: three equal buttons. Logged out: back only, full width.
    pub fn for_login_state(logged_in: bool) -> Self {
        if logged_in {
            let equal = ButtonLayout::shown(ButtonWidth::Weighted(1.0));
            Self {
                back: equal,
                menu: equal,
                my_page: equal,
            }
        } else {
            Self {
                back: ButtonLayout::shown(ButtonWidth::FullWidth),
                menu: ButtonLayout::hidden(),
                my_page: ButtonLayout::hidden(),
            }
        }
    }
}

/// Convert dp to physical pixels, rounding to nearest.
pub fn dp_to_px(dp: u32, density: f32) -> i32 {
    (dp as f32 * density).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_in_shows_three_equal_buttons() {
        let layout = BottomBarLayout::for_login_state(true);
        for button in [layout.back, layout.menu, layout.my_page] {
            assert!(button.visible);
            assert_eq!(button.width, ButtonWidth::Weighted(1.0));
            assert_eq!(button.height_dp, 48);
        }
    }

    #[test]
    fn logged_out_shows_full_width_back_only() {
        let layout = BottomBarLayout::for_login_state(false);
        assert!(layout.back.visible);
        assert_eq!(layout.back.width, ButtonWidth::FullWidth);
        assert!(!layout.menu.visible);
        assert!(!layout.my_page.visible);
    }

    #[test]
    fn dp_conversion_rounds() {
        assert_eq!(dp_to_px(48, 1.0), 48);
        assert_eq!(dp_to_px(48, 2.625), 126);
        assert_eq!(dp_to_px(48, 1.33), 64);
    }
}
