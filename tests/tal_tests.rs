mod common;

use common::fixtures::catalog_model;
use common::{TestResult, render, render_html};
use serde_json::json;
use zpt::{RenderError, ZptError};

// ============================================================================
// Conditions and content
// ============================================================================

#[test]
fn test_false_condition_removes_element_and_descendants() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<p tal:condition="false">x</p><p tal:content="string:hi">y</p>"#,
        json!({}),
    )?;

    assert_eq!(out, "<p>hi</p>");
    Ok(())
}

#[test]
fn test_empty_string_is_true() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<div><p tal:condition="here/empty">shown</p><p tal:condition="here/zero">hidden</p><p tal:condition="not:here/list">hidden</p></div>"#,
        json!({"empty": "", "zero": 0, "list": [1]}),
    )?;

    assert_eq!(out, "<div><p>shown</p></div>");
    Ok(())
}

#[test]
fn test_content_is_escaped_unless_structure() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<div><p tal:content="here/html"/><p tal:content="structure here/html"/><p tal:content="structure:here/html"/></div>"#,
        json!({"html": "<b>bold</b> &amp; more"}),
    )?;

    assert_eq!(
        out,
        "<div><p>&lt;b&gt;bold&lt;/b&gt; &amp;amp; more</p><p><b>bold</b> &amp; more</p><p><b>bold</b> &amp; more</p></div>"
    );
    Ok(())
}

// ============================================================================
// Definitions
// ============================================================================

#[test]
fn test_later_definitions_see_earlier_ones() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(r#"<p tal:define="a 1; b a" tal:content="b"/>"#, json!({}))?;

    assert_eq!(out, "<p>1</p>");
    Ok(())
}

#[test]
fn test_escaped_semicolon_in_definition() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<p tal:define="style string:color: red;; margin: 0" tal:attributes="style style"/>"#,
        json!({}),
    )?;

    assert_eq!(out, r#"<p style="color: red; margin: 0"/>"#);
    Ok(())
}

#[test]
fn test_global_definitions_are_not_retroactive() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<div><i tal:content="g | nothing">x</i><b tal:define="global g string:set"/><i tal:content="g"/></div>"#,
        json!({}),
    )?;

    assert_eq!(out, "<div><i/><b/><i>set</i></div>");
    Ok(())
}

#[test]
fn test_malformed_definition_is_rejected() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = render(r#"<p tal:define="lonely"/>"#, json!({})).unwrap_err();

    assert!(matches!(
        err,
        ZptError::Render(RenderError::InvalidAttribute { .. })
    ));
    Ok(())
}

// ============================================================================
// Repetition
// ============================================================================

#[test]
fn test_repeat_exposes_positions() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        concat!(
            r#"<ul><li tal:repeat="i here/items" "#,
            r#"tal:content="string:${repeat/i/index} ${repeat/i/number} ${repeat/i/start} ${repeat/i/end} ${repeat/i/length}"/></ul>"#
        ),
        json!({"items": ["a", "b", "c"]}),
    )?;

    assert_eq!(
        out,
        concat!(
            "<ul><li>0 1 true false 3</li>",
            "<li>1 2 false false 3</li>",
            "<li>2 3 false true 3</li></ul>"
        )
    );
    Ok(())
}

#[test]
fn test_repeat_letters_and_numerals() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<ol><li tal:repeat="i here/items" tal:content="string:${repeat/i/letter}${repeat/i/Letter} ${repeat/i/roman}${repeat/i/Roman}"/></ol>"#,
        json!({"items": [1, 2, 3, 4]}),
    )?;

    assert_eq!(
        out,
        "<ol><li>aA iI</li><li>bB iiII</li><li>cC iiiIII</li><li>dD ivIV</li></ol>"
    );
    Ok(())
}

#[test]
fn test_nested_repeats_with_odd_even_classes() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let template = concat!(
        r#"<div><section tal:repeat="category here/categories"><tal:block tal:condition="category/products">"#,
        r#"<h2 tal:content="category/name">name</h2>"#,
        r#"<p tal:repeat="product category/products" tal:attributes="class string:row-${repeat/product/number}" "#,
        r#"tal:content="string:${category/name}: ${product/name} costs ${product/price}"/>"#,
        r#"</tal:block></section></div>"#,
    );
    let out = render(template, catalog_model())?;

    assert_eq!(
        out,
        concat!(
            "<div>",
            "<section><h2>Tools</h2>",
            r#"<p class="row-1">Tools: Hammer costs 12</p><p class="row-2">Tools: Saw costs 20</p></section>"#,
            "<section/>",
            "<section><h2>Garden</h2>",
            r#"<p class="row-1">Garden: Rake costs 9</p></section>"#,
            "</div>"
        )
    );
    Ok(())
}

#[test]
fn test_repeat_over_scalar_fails() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = render(r#"<ul><li tal:repeat="i here/site"/></ul>"#, catalog_model()).unwrap_err();

    match err {
        ZptError::Render(render_error) => assert_eq!(render_error.kind(), "NotIterable"),
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}

// ============================================================================
// Attributes, omit-tag, replace
// ============================================================================

#[test]
fn test_attributes_and_omit_tag() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        concat!(
            r#"<div><a href="x" tal:attributes="href string:/items/${here/id}; title here/title | nothing">link</a>"#,
            r#"<span tal:omit-tag="here/id">text</span><tal:block tal:content="here/id"/></div>"#
        ),
        json!({"id": 7}),
    )?;

    assert_eq!(out, r#"<div><a href="/items/7">link</a>text7</div>"#);
    Ok(())
}

#[test]
fn test_replace_drops_the_tag() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<p>Hello <span tal:replace="here/name">name</span>!</p>"#,
        json!({"name": "World"}),
    )?;

    assert_eq!(out, "<p>Hello World!</p>");
    Ok(())
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_on_error_catches_failures_in_subtree() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        r#"<div><section tal:on-error="string:Failed: ${error/type}"><p tal:content="here/nope"/></section><p>after</p></div>"#,
        json!({}),
    )?;

    assert_eq!(
        out,
        "<div><section>Failed: ExpressionEvaluationFailure</section><p>after</p></div>"
    );
    Ok(())
}

#[test]
fn test_uncaught_failure_is_fatal() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = render(r#"<div><p tal:content="here/nope"/></div>"#, json!({})).unwrap_err();

    assert!(err.to_string().contains("here/nope"), "{}", err);
    Ok(())
}

#[test]
fn test_unknown_prefix_is_fatal() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let err = render(r#"<p tal:content="python:1 + 1"/>"#, json!({})).unwrap_err();

    match err {
        ZptError::Render(render_error) => {
            assert_eq!(render_error.kind(), "UnknownEvaluatorPrefix")
        }
        other => panic!("unexpected error: {}", other),
    }
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_reserved_markup_is_purged() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render(
        concat!(
            r#"<html xmlns="http://www.w3.org/1999/xhtml" xmlns:tal="http://xml.zope.org/namespaces/tal" lang="en">"#,
            r#"<body tal:define="x string:1" class="main"><tal:block tal:condition="true"><p tal:content="x" tal:omit-tag="false" id="p">p</p></tal:block></body></html>"#
        ),
        json!({}),
    )?;

    assert_no_reserved_markup!(out);
    assert_eq!(
        out,
        r#"<html xmlns="http://www.w3.org/1999/xhtml" lang="en"><body class="main"><p id="p">1</p></body></html>"#
    );
    Ok(())
}

#[test]
fn test_html_output_mode() -> TestResult {
    let _ = env_logger::builder().is_test(true).try_init();

    let out = render_html(
        r#"<!DOCTYPE html>
<html><body><img src="a.png" tal:attributes="alt here/alt"/><div tal:content="nothing">x</div></body></html>"#,
        json!({"alt": "A"}),
    )?;

    assert_eq!(
        out,
        "<!DOCTYPE html>\n<html><body><img src=\"a.png\" alt=\"A\"><div></div></body></html>"
    );
    Ok(())
}
