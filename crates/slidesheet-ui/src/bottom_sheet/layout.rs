use super::config::MAX_HEIGHT_FRACTION;

/// Replace NaN and infinities with zero.
pub(crate) fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp a measured length to a finite, non-negative value.
pub(crate) fn sanitize_length(value: f32) -> f32 {
    finite_or_zero(value).max(0.0)
}

/// How the sheet's content is laid out for the current measurements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    pub viewport_height: f32,
    pub max_height: f32,
    pub content_height: f32,
    /// Content sits in a scroll container.
    pub scrolls: bool,
    /// Height of the spacer appended below the content for the keyboard.
    pub keyboard_spacer: f32,
}

impl SheetLayout {
    pub fn compute(
        viewport_height: f32,
        content_height: f32,
        scrollable: bool,
        keyboard_spacer: f32,
    ) -> Self {
        let viewport_height = sanitize_length(viewport_height);
        let content_height = sanitize_length(content_height);
        let max_height = viewport_height * MAX_HEIGHT_FRACTION;
        Self {
            viewport_height,
            max_height,
            content_height,
            scrolls: scrollable || content_height > max_height,
            keyboard_spacer: sanitize_length(keyboard_spacer),
        }
    }

    /// Height the sheet occupies on screen.
    pub fn visible_height(&self) -> f32 {
        (self.content_height + self.keyboard_spacer).min(self.max_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_taller_than_max_scrolls() {
        let layout = SheetLayout::compute(1000.0, 950.0, false, 0.0);
        assert_eq!(layout.max_height, 900.0);
        assert!(layout.scrolls);
        assert_eq!(layout.visible_height(), 900.0);
    }

    #[test]
    fn short_content_does_not_scroll_unless_asked() {
        assert!(!SheetLayout::compute(1000.0, 300.0, false, 0.0).scrolls);
        assert!(SheetLayout::compute(1000.0, 300.0, true, 0.0).scrolls);
    }

    #[test]
    fn keyboard_spacer_adds_to_visible_height() {
        let layout = SheetLayout::compute(1000.0, 300.0, false, 250.0);
        assert_eq!(layout.visible_height(), 550.0);
    }

    #[test]
    fn bad_measurements_are_sanitised() {
        let layout = SheetLayout::compute(f32::NAN, -20.0, false, f32::INFINITY);
        assert_eq!(layout.viewport_height, 0.0);
        assert_eq!(layout.content_height, 0.0);
        assert_eq!(layout.keyboard_spacer, 0.0);
    }
}
