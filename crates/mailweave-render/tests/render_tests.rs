//! Renderer integration tests
//!
//! Rendered templates are fed back through the substitution engine to check
//! that both sides agree on markers and placeholder paths.

use mailweave_core::{validate_template, DataContext, DialectKind, TemplateProcessor};
use mailweave_render::{RawElement, TemplateRenderer};
use serde_json::{json, Value};

fn elements(value: Value) -> Vec<RawElement> {
    serde_json::from_value(value).expect("valid editor document")
}

fn ctx(value: Value) -> DataContext {
    serde_json::from_value(value).expect("context must be a JSON object")
}

fn order_context() -> DataContext {
    ctx(json!({
        "order": { "number": "ORD-42", "total": "30 TL" },
        "order_items": [
            { "name": "Kalem", "price": "10 TL", "quantity": 1, "image_url": "https://cdn.example.com/kalem.png" },
            { "name": "Defter", "price": "20 TL", "quantity": 2, "image_url": "https://cdn.example.com/defter.png" }
        ]
    }))
}

fn order_document(display_mode: &str) -> Vec<RawElement> {
    elements(json!([
        { "id": "h", "type": "heading", "props": { "content": "Sipariş [[order.number]]" } },
        { "id": "p", "type": "product_row", "props": { "displayMode": display_mode } },
        { "id": "t", "type": "text", "props": { "content": "Toplam: [[order.total]]" } }
    ]))
}

fn render_and_process(dialect: DialectKind, display_mode: &str, context: &DataContext) -> String {
    let renderer = TemplateRenderer::with_dialect(dialect).unwrap();
    let template = renderer.render_raw(&order_document(display_mode), "Sipariş Onayı");
    assert!(!template.contains("Template Preview"), "{}", template);

    TemplateProcessor::with_dialect(dialect)
        .unwrap()
        .process(&template, context)
}

#[test]
fn test_table_rows_round_trip_in_both_dialects() {
    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let html = render_and_process(dialect, "table", &order_context());

        assert!(html.contains(">Kalem</p>"), "{}: {}", dialect, html);
        assert!(html.contains(">Defter</p>"), "{}: {}", dialect, html);
        assert!(html.contains("https://cdn.example.com/defter.png"));
        assert!(html.contains("Sipariş ORD-42"));
        assert!(html.contains("Toplam: 30 TL"));
        assert_eq!(html.matches("<th ").count(), 4, "header written once");
        assert!(!html.contains("[[item."));
        assert!(!html.contains("REPEAT_"));
        assert!(!html.contains("data-repeat"));
    }
}

#[test]
fn test_card_rows_round_trip_in_both_dialects() {
    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let html = render_and_process(dialect, "card", &order_context());
        assert_eq!(html.matches("margin-bottom:8px").count(), 2, "{}", dialect);
        assert!(html.contains(">10 TL</p>"));
        assert!(html.contains(">20 TL</p>"));
    }
}

#[test]
fn test_empty_items_remove_the_product_block() {
    let context = ctx(json!({ "order": { "number": "ORD-1", "total": "0 TL" }, "order_items": [] }));
    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let html = render_and_process(dialect, "table", &context);
        assert!(!html.contains("<th "), "{}", dialect);
        assert!(!html.contains("<section"));
        assert!(html.contains("Toplam: 0 TL"));
    }
}

#[test]
fn test_custom_alias_and_outer_paths() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([{
        "id": "p",
        "type": "product_row",
        "props": {
            "repeatKey": "cart.lines",
            "repeatItemAlias": "line",
            "displayMode": "table",
            "showHeader": false,
            "columns": [
                { "id": "a", "variableKey": "item.name" },
                { "id": "b", "variableKey": "sku" },
                { "id": "c", "variableKey": "line.price" },
                { "id": "d", "variableKey": "order.currency" }
            ]
        }
    }]));

    let template = renderer.render_raw(&document, "Sepet");
    assert!(template.contains("<!-- REPEAT_START:cart.lines:line -->"));
    assert!(template.contains("[[line.name]]"));
    assert!(template.contains("[[line.sku]]"));
    assert!(template.contains("[[line.price]]"));
    assert!(template.contains("[[order.currency]]"));

    let context = ctx(json!({
        "order": { "currency": "TRY" },
        "cart": { "lines": [{ "name": "Silgi", "sku": "S-1", "price": "5" }] }
    }));
    let html = TemplateProcessor::new().unwrap().process(&template, &context);
    assert!(html.contains(">Silgi</p>"));
    assert!(html.contains(">S-1</p>"));
    assert!(html.contains(">5</p>"));
    assert!(html.contains(">TRY</p>"));
}

#[test]
fn test_rendered_templates_validate_clean() {
    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let renderer = TemplateRenderer::with_dialect(dialect).unwrap();
        for mode in ["table", "card"] {
            let template = renderer.render_raw(&order_document(mode), "Sipariş");
            let report = validate_template(&template, renderer.dialect());
            assert!(report.is_valid(), "{} {}: {:?}", dialect, mode, report);
            assert!(report.warnings.is_empty(), "{} {}: {:?}", dialect, mode, report);
        }
    }
}

#[test]
fn test_invalid_element_falls_back() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([
        { "id": "h", "type": "heading", "props": { "as": "h9", "content": "Başlık" } }
    ]));

    let html = renderer.render_raw(&document, "Bülten");
    assert!(html.contains("Template Preview"));
    assert!(html.contains("<title>Bülten</title>"));
    assert!(!html.contains("Başlık"));
}

#[test]
fn test_unwritable_repeat_key_falls_back() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([
        { "id": "p", "type": "product_row", "props": { "repeatKey": "order items --> x" } }
    ]));

    let html = renderer.render_raw(&document, "Sipariş");
    assert!(html.contains("Template Preview"));
    assert!(!html.contains("REPEAT_START"));
}

#[test]
fn test_unknown_element_fragment() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([
        { "id": "c", "type": "countdown", "props": { "until": "2026-12-31" } },
        { "id": "l", "type": "link", "props": { "text": "Mağaza", "href": "[[shop.url]]" } }
    ]));

    let html = renderer.render_raw(&document, "Kampanya");
    assert!(html.contains("<!-- unsupported element: countdown -->"));
    assert!(html.contains("href=\"[[shop.url]]\""));
    assert!(!html.contains("Template Preview"));
}

#[test]
fn test_spacing_shorthand_wins() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([
        { "id": "a", "type": "text", "props": { "content": "a", "margin": "5px", "marginTop": 20 } },
        { "id": "b", "type": "text", "props": { "content": "b", "marginTop": 20, "paddingLeft": 8 } }
    ]));

    let html = renderer.render_raw(&document, "Boşluk");
    assert!(html.contains("margin:5px;"));
    assert!(html.contains("margin:20px 0px 0px 0px;padding:0px 0px 0px 8px;"));
}

#[test]
fn test_template_name_is_escaped() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let html = renderer.render_raw(&[], "<script>alert(1)</script>");
    assert!(!html.contains("<script>"));
    assert!(html.contains("<title>&lt;script&gt;"));

    let html = renderer.render_raw(&[], "  ");
    assert!(html.contains("<title>Email Template</title>"));
}

#[test]
fn test_cleared_editor_fields_render_the_document() {
    let document = elements(json!([
        { "id": "h", "type": "heading", "props": { "content": "Sipariş [[order.number]]", "color": null } },
        { "id": "p", "type": "product_row", "props": {
            "repeatKey": "",
            "repeatItemAlias": "",
            "isRepeatable": false,
            "displayMode": "table",
            "headerFontSize": "",
            "columns": [
                { "id": "img", "type": "image", "variableKey": "item.image_url", "imgWidth": "", "imgHeight": "" },
                { "id": "name", "type": "text", "variableKey": "item.name", "fontSize": "", "label": "" },
                { "id": "price", "type": "price", "variableKey": "item.price", "color": null, "textAlign": null }
            ]
        }}
    ]));

    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let renderer = TemplateRenderer::with_dialect(dialect).unwrap();
        let template = renderer.render_raw(&document, "Sipariş");
        assert!(!template.contains("Template Preview"), "{}: {}", dialect, template);
        assert!(template.contains("width=\"60\" height=\"60\""));
        assert!(template.contains(">Kolon</th>"));

        let html = TemplateProcessor::with_dialect(dialect)
            .unwrap()
            .process(&template, &order_context());
        assert!(html.contains(">Kalem</p>"), "{}: {}", dialect, html);
        assert!(html.contains(">Defter</p>"));
        assert!(html.contains("Sipariş ORD-42"));
        assert!(!html.contains("[[item."));
    }
}

#[test]
fn test_cleared_card_sizes_keep_editor_defaults() {
    let renderer = TemplateRenderer::with_dialect(DialectKind::Comment).unwrap();
    let document = elements(json!([
        { "id": "p", "type": "product_row", "props": {
            "displayMode": "card",
            "cardImgWidth": 0,
            "cardImgHeight": "",
            "cardBorderRadius": null,
            "cardTitleVariableKey": ""
        }}
    ]));

    let template = renderer.render_raw(&document, "Sipariş");
    assert!(!template.contains("Template Preview"));
    assert!(template.contains("width=\"80\" height=\"80\""));
    assert!(template.contains("border-radius:8px"));
    assert!(template.contains("[[item.name]]"));
}
