// Accessibility helpers

/// Media query that reports the user's reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Id of the polite live region used for governor announcements.
pub const STATUS_REGION_ID: &str = "perf-status";

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Includes focus ring styles, the `.sr-only` helper, and a global rule that
/// neutralises CSS transitions when the user asks for reduced motion.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #00D9C0;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} @media (prefers-reduced-motion: reduce){*{animation-duration:0.01ms!important;transition-duration:0.01ms!important}}"
}

/// Update the live region status for screen readers
///
/// Writes into the `#perf-status` element if present, so quality changes are
/// announced without stealing focus.
pub fn set_status(msg: &str) {
    if let Some(node) = crate::dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Toggle a class on the root element reflecting the active quality tier.
///
/// Stylesheets key off `quality-low`, `quality-medium` and `quality-high`.
pub fn set_quality_class(tier: vitrine_perf::QualityTier) {
    let Some(html) = crate::dom::document().and_then(|doc| doc.document_element()) else {
        return;
    };
    let list = html.class_list();
    for candidate in vitrine_perf::QualityTier::ALL {
        let _ = list.remove_1(&quality_class(candidate));
    }
    let _ = list.add_1(&quality_class(tier));
}

/// Class name applied to the root element for `tier`.
#[must_use]
pub fn quality_class(tier: vitrine_perf::QualityTier) -> String {
    format!("quality-{}", tier.label())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_perf::QualityTier;

    #[test]
    fn css_covers_reduced_motion() {
        assert!(visible_focus_css().contains("prefers-reduced-motion"));
        assert!(visible_focus_css().contains(".sr-only"));
    }

    #[test]
    fn quality_class_is_lowercase() {
        assert_eq!(quality_class(QualityTier::High), "quality-high");
        assert_eq!(quality_class(QualityTier::Low), "quality-low");
    }

    #[test]
    fn dom_helpers_are_noops_off_browser() {
        set_status("quality reduced");
        set_quality_class(QualityTier::Medium);
    }
}
