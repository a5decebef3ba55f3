//! End-to-end tests for template processing
//!
//! Exercises the public entry points with order-confirmation style templates
//! in both marker dialects.

use mailweave_core::{
    expand_repeats, process_template, resolve, substitute_placeholders, validate_template,
    DataContext, DialectKind, RegionStatus, TemplateProcessor,
};
use serde_json::{json, Value};

fn ctx(value: Value) -> DataContext {
    serde_json::from_value(value).expect("context must be a JSON object")
}

fn order_items(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "name": name, "price": format!("{} TL", (i + 1) * 10) }))
            .collect(),
    )
}

const COMMENT_TEMPLATE: &str = concat!(
    "<h1>Sipariş [[order.number]]</h1>",
    "<!-- REPEAT_START:order_items:item -->",
    "<table><thead><tr><th>Ürün</th><th>Fiyat</th></tr></thead><tbody>",
    "<!-- REPEAT_ROW_START -->",
    "<tr class=\"row\"><td>[[item.name]]</td><td>[[item.price]]</td></tr>",
    "<!-- REPEAT_ROW_END -->",
    "</tbody></table>",
    "<!-- REPEAT_END:order_items -->",
    "<p>Toplam: [[order.total]]</p>",
);

const ATTRIBUTE_TEMPLATE: &str = concat!(
    "<h1>Sipariş [[order.number]]</h1>",
    "<section style=\"padding:0\" data-repeat-start=\"order_items\" data-repeat-item=\"item\">",
    "<table><tbody>",
    "<tr class=\"row\" data-repeat-row=\"true\"><td>[[item.name]]</td><td>[[item.price]]</td></tr>",
    "</tbody></table>",
    "</section>",
    "<p>Toplam: [[order.total]]</p>",
);

#[test]
fn test_total_placeholder() {
    let context = ctx(json!({ "order": { "total": "209,69 TL" } }));
    assert_eq!(
        process_template("Toplam: [[order.total]]", &context),
        "Toplam: 209,69 TL"
    );
}

#[test]
fn test_empty_array_removes_region() {
    let context = ctx(json!({
        "order": { "number": "ORD-1", "total": "0 TL" },
        "order_items": []
    }));
    assert_eq!(
        process_template(COMMENT_TEMPLATE, &context),
        "<h1>Sipariş ORD-1</h1><p>Toplam: 0 TL</p>"
    );
}

#[test]
fn test_two_rows_in_order() {
    let context = ctx(json!({
        "order_items": [
            { "name": "A", "price": "10 TL" },
            { "name": "B", "price": "20 TL" }
        ]
    }));
    let template = "<!-- REPEAT_START:order_items:item --><!-- REPEAT_ROW_START -->\
        <div>[[item.name]] - [[item.price]]</div>\
        <!-- REPEAT_ROW_END --><!-- REPEAT_END:order_items -->";

    assert_eq!(
        process_template(template, &context),
        "<div>A - 10 TL</div><div>B - 20 TL</div>"
    );
}

#[test]
fn test_missing_customer_keeps_placeholder() {
    let context = ctx(json!({ "order": { "total": "1 TL" } }));
    assert_eq!(
        process_template("<p>Tel: [[customer.phone]]</p>", &context),
        "<p>Tel: [[customer.phone]]</p>"
    );
}

#[test]
fn test_region_without_row_template_repeats_content() {
    let context = ctx(json!({ "order_items": order_items(&["A", "B", "C"]) }));
    let template = "<ul><!-- REPEAT_START:order_items:item --><li>[[item.name]]</li><!-- REPEAT_END:order_items --></ul>";
    assert_eq!(
        process_template(template, &context),
        "<ul><li>A</li><li>B</li><li>C</li></ul>"
    );
}

#[test]
fn test_resolution_returns_exact_nested_values() {
    let data = json!({
        "order": { "shipping": { "carrier": "Yurtiçi Kargo", "eta": { "days": 2 } } }
    });
    assert_eq!(
        resolve(&data, "order.shipping.carrier"),
        Some(&json!("Yurtiçi Kargo"))
    );
    assert_eq!(resolve(&data, "order.shipping.eta"), Some(&json!({ "days": 2 })));
    assert_eq!(resolve(&data, "order.shipping.eta.hours"), None);
    assert_eq!(resolve(&data, "order.billing.carrier"), None);
}

#[test]
fn test_substitution_is_idempotent() {
    let context = ctx(json!({ "a": "1", "b": { "c": 2 } }));
    let text = "[[a]] [[b.c]] [[missing]] [[b]]";
    let once = substitute_placeholders(text, &context);
    let twice = substitute_placeholders(&once, &context);
    assert_eq!(once, "1 2 [[missing]] [[b]]");
    assert_eq!(once, twice);
}

#[test]
fn test_row_count_matches_array_length() {
    for dialect in [DialectKind::Comment, DialectKind::Attribute] {
        let processor = TemplateProcessor::with_dialect(dialect).unwrap();
        let template = match dialect {
            DialectKind::Comment => COMMENT_TEMPLATE,
            DialectKind::Attribute => ATTRIBUTE_TEMPLATE,
        };

        for n in [0usize, 1, 4] {
            let names: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let context = ctx(json!({ "order_items": order_items(&names) }));

            let html = processor.process(template, &context);
            assert_eq!(html.matches("class=\"row\"").count(), n, "{} rows, {}", n, dialect);
        }
    }
}

#[test]
fn test_item_fields_shadow_outer_context() {
    let context = ctx(json!({
        "name": "outer",
        "item": { "name": "outer item" },
        "order_items": [{ "name": "inner" }]
    }));
    let template = "<!-- REPEAT_START:order_items:item -->[[item.name]]<!-- REPEAT_END:order_items -->";
    assert_eq!(process_template(template, &context), "inner");
}

#[test]
fn test_unresolved_item_field_is_frozen_for_one_pass_only() {
    let context = ctx(json!({
        "item": { "sku": "OUTER" },
        "order_items": [{ "name": "Kalem" }]
    }));
    let template = "<!-- REPEAT_START:order_items:item -->[[item.name]]/[[item.sku]]<!-- REPEAT_END:order_items -->";

    let once = process_template(template, &context);
    assert_eq!(once, "Kalem/[[item.sku]]");

    // The output carries no region markers, so a second pass reads the
    // kept placeholder as an ordinary outer-context path.
    assert_eq!(process_template(&once, &context), "Kalem/OUTER");
}

#[test]
fn test_rows_keep_source_order() {
    let context = ctx(json!({ "order_items": order_items(&["z", "a", "m", "b"]) }));
    let template = "<!-- REPEAT_START:order_items:item -->[[item.name]],<!-- REPEAT_END:order_items -->";
    assert_eq!(process_template(template, &context), "z,a,m,b,");
}

#[test]
fn test_both_dialects_produce_the_same_rows() {
    let context = ctx(json!({
        "order": { "number": "ORD-9", "total": "30 TL" },
        "order_items": order_items(&["Kalem", "Defter"])
    }));

    let comment = TemplateProcessor::with_dialect(DialectKind::Comment)
        .unwrap()
        .process(COMMENT_TEMPLATE, &context);
    let attribute = TemplateProcessor::with_dialect(DialectKind::Attribute)
        .unwrap()
        .process(ATTRIBUTE_TEMPLATE, &context);

    let row = "<tr class=\"row\"><td>Kalem</td><td>10 TL</td></tr><tr class=\"row\"><td>Defter</td><td>20 TL</td></tr>";
    assert!(comment.contains(row), "{}", comment);
    assert!(attribute.contains(row), "{}", attribute);
    assert!(attribute.starts_with("<h1>Sipariş ORD-9</h1><section style=\"padding:0\">"));
    assert!(!attribute.contains("data-repeat"));
    assert!(comment.ends_with("<p>Toplam: 30 TL</p>"));
}

#[test]
fn test_second_pass_does_not_reexpand() {
    let context = ctx(json!({
        "order": { "number": "ORD-2", "total": "10 TL" },
        "order_items": order_items(&["A"])
    }));
    let once = process_template(COMMENT_TEMPLATE, &context);
    assert!(!once.contains("REPEAT_"));
    assert_eq!(process_template(&once, &context), once);
}

#[test]
fn test_expand_repeats_alone() {
    let context = ctx(json!({ "order_items": order_items(&["A"]) }));
    let html = expand_repeats(COMMENT_TEMPLATE, &context);
    assert!(html.contains("[[order.number]]"));
    assert!(html.contains("<td>A</td><td>10 TL</td>"));
}

#[test]
fn test_report_and_validation_agree_on_unbalanced_markers() {
    let template = "<!-- REPEAT_START:order_items:item -->[[item.name]]";
    let processor = TemplateProcessor::new().unwrap();
    let context = ctx(json!({ "order_items": order_items(&["A"]) }));

    let (html, report) = processor.process_with_report(template, &context);
    assert_eq!(html, template);
    assert_eq!(report.regions[0].status, RegionStatus::Unterminated);

    let validation = validate_template(template, processor.dialect());
    assert!(!validation.is_valid());
}

#[test]
fn test_processor_shared_across_threads() {
    let processor = std::sync::Arc::new(TemplateProcessor::new().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let processor = processor.clone();
            std::thread::spawn(move || {
                let context = ctx(json!({ "n": i }));
                processor.process("[[n]]", &context)
            })
        })
        .collect();

    let mut outputs: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    outputs.sort();
    assert_eq!(outputs, vec!["0", "1", "2", "3"]);
}
