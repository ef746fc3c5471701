#![forbid(unsafe_code)]

//! Same-page anchor links.

/// Where a clicked link should smooth-scroll to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget<'a> {
    /// Leave the click to the browser.
    Ignore,
    /// Scroll to the element matching this selector, if any.
    Selector(&'a str),
}

/// Classify an `href` attribute value.
///
/// Only fragment links are intercepted, and the bare `#` placeholder is not.
#[must_use]
pub fn anchor_target(href: &str) -> AnchorTarget<'_> {
    match href.strip_prefix('#') {
        Some("") | None => AnchorTarget::Ignore,
        Some(_) => AnchorTarget::Selector(href),
    }
}
