use serde_json::{Value, json};

/// A layout document defining a `page` macro with `title` and `body` slots
pub fn page_layout() -> &'static str {
    concat!(
        r#"<html metal:define-macro="page">"#,
        r#"<head><title metal:define-slot="title">Untitled</title></head>"#,
        r#"<body><h1 tal:content="here/site">site</h1><div metal:define-slot="body">No content</div></body>"#,
        r#"</html>"#,
    )
}

/// A product catalog model with nested lists
pub fn catalog_model() -> Value {
    json!({
        "site": "Catalog",
        "categories": [
            {"name": "Tools", "products": [{"name": "Hammer", "price": 12}, {"name": "Saw", "price": 20}]},
            {"name": "Paint", "products": []},
            {"name": "Garden", "products": [{"name": "Rake", "price": 9}]}
        ]
    })
}
