/// Every piece of template vocabulary still visible in rendered markup
pub fn reserved_markup(markup: &str) -> Vec<String> {
    const MARKERS: [&str; 6] = [
        "tal:",
        "metal:",
        "xmlns:tal",
        "xmlns:metal",
        "http://xml.zope.org/namespaces/tal",
        "http://xml.zope.org/namespaces/metal",
    ];
    MARKERS
        .iter()
        .filter(|marker| markup.contains(*marker))
        .map(|marker| marker.to_string())
        .collect()
}

/// Assert that no tal/metal attribute, element or declaration survived rendering
#[macro_export]
macro_rules! assert_no_reserved_markup {
    ($markup:expr) => {{
        let found = $crate::common::markup_assertions::reserved_markup(&$markup);
        assert!(
            found.is_empty(),
            "Rendered markup still contains {:?}:\n{}",
            found,
            $markup
        );
    }};
}
