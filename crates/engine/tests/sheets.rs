//! Integration tests for style sheet loading, style map import and disposal.

mod support;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use css_engine::dom::Document;
use css_engine::{
    CssDocument, CssEngine, CssError, EngineOptions, LoadError, PropertyRegistry, Rule,
    StyleSheetLoader, Value, props,
};
use support::{counting_registry, engine, rgb, sheet};
use url::Url;

fn url(text: &str) -> Url {
    Url::parse(text).unwrap()
}

/// A loader serving fixed texts and remembering what was requested.
fn loader(files: &[(&str, &str)]) -> (Box<dyn StyleSheetLoader>, Arc<Mutex<Vec<String>>>) {
    let files: HashMap<String, String> = files
        .iter()
        .map(|(uri, text)| (uri.to_string(), text.to_string()))
        .collect();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    let loader: Box<dyn StyleSheetLoader> = Box::new(move |uri: &Url| -> Result<String, LoadError> {
        seen.lock().unwrap().push(uri.to_string());
        files
            .get(uri.as_str())
            .cloned()
            .ok_or_else(|| format!("404 Not Found: {}", uri).into())
    });
    (loader, requests)
}

// ============================================================================
// @import
// ============================================================================

#[test]
fn test_imports_are_loaded_and_gated_by_media() {
    let mut engine: CssEngine = CssEngine::new(
        PropertyRegistry::standard(),
        EngineOptions::new().media("screen").unwrap(),
    );
    let (loader, requests) = loader(&[
        ("http://example.com/css/base.css", "rect { color: #f00; width: 3px }"),
        ("http://example.com/css/print.css", "rect { height: 5px }"),
    ]);
    engine.set_style_sheet_loader(Some(loader));

    let main = engine
        .parse_style_sheet(
            "@import url(base.css); @import 'print.css' print; rect { width: 4px }",
            Some(&url("http://example.com/css/main.css")),
            "",
        )
        .unwrap();
    assert_eq!(
        *requests.lock().unwrap(),
        vec![
            "http://example.com/css/base.css".to_string(),
            "http://example.com/css/print.css".to_string(),
        ]
    );

    let mut doc = Document::new();
    let svg = doc.create_root("svg");
    doc.append_style_sheet(svg, main);
    let rect = doc.append_element(svg, "rect");

    let computed = |doc: &mut Document, index| engine.computed_style(doc, rect, None, index).unwrap();
    assert_eq!(computed(&mut doc, props::COLOR), rgb(255, 0, 0));
    // The importing sheet's own rules come later and win.
    assert_eq!(computed(&mut doc, props::WIDTH), Value::px(4.0));
    assert_eq!(computed(&mut doc, props::HEIGHT), Value::ident("auto"));
}

#[test]
fn test_cyclic_imports_stop() {
    let mut engine = engine();
    let (loader, requests) = loader(&[
        ("http://example.com/a.css", "@import url(b.css); rect { color: #f00 }"),
        ("http://example.com/b.css", "@import url(a.css); rect { width: 2px }"),
    ]);
    engine.set_style_sheet_loader(Some(loader));

    let a = engine
        .parse_style_sheet(
            "@import url(b.css); rect { color: #f00 }",
            Some(&url("http://example.com/a.css")),
            "",
        )
        .unwrap();
    assert_eq!(requests.lock().unwrap().len(), 1);

    let Rule::Import(b) = &a.rules()[0] else {
        panic!("expected an import, got {:?}", a.rules()[0]);
    };
    let Rule::Import(back) = &b.rules[0] else {
        panic!("expected an import, got {:?}", b.rules[0]);
    };
    assert_eq!(back.uri.as_str(), "http://example.com/a.css");
    assert!(back.rules.is_empty());

    let mut doc = Document::new();
    let svg = doc.create_root("svg");
    doc.append_style_sheet(svg, a);
    let rect = doc.append_element(svg, "rect");
    assert_eq!(engine.computed_style(&mut doc, rect, None, props::WIDTH).unwrap(), Value::px(2.0));
}

#[test]
fn test_failed_import_is_an_error() {
    let mut engine = engine();
    let (loader, _) = loader(&[]);
    engine.set_style_sheet_loader(Some(loader));

    let err = engine
        .parse_style_sheet(
            "@import url(missing.css);",
            Some(&url("http://example.com/index.css")),
            "",
        )
        .unwrap_err();
    match err {
        CssError::Load { uri, message } => {
            assert_eq!(uri, "http://example.com/missing.css");
            assert!(message.contains("404"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_imports_without_loader_stay_empty() {
    let engine = engine();
    let parsed = engine
        .parse_style_sheet(
            "@import url(base.css); rect { color: #f00 }",
            Some(&url("http://example.com/index.css")),
            "",
        )
        .unwrap();
    match &parsed.rules()[0] {
        Rule::Import(import) => assert!(import.rules.is_empty()),
        other => panic!("expected an import, got {:?}", other),
    }
}

// ============================================================================
// Sheet errors
// ============================================================================

#[test]
fn test_syntax_error_names_the_sheet() {
    let engine = engine();
    let err = engine
        .parse_style_sheet("rect { color: #f00", Some(&url("http://example.com/broken.css")), "")
        .unwrap_err();
    match err {
        CssError::StyleSheet { uri, .. } => assert_eq!(uri, "http://example.com/broken.css"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_unknown_property_in_sheet() {
    let engine = engine();
    assert!(matches!(
        engine.parse_style_sheet("rect { colour: red }", None, ""),
        Err(CssError::UnknownProperty(name)) if name == "colour"
    ));
}

#[test]
fn test_invalid_value_in_sheet() {
    let engine = engine();
    assert!(matches!(
        engine.parse_style_sheet("rect { opacity: bold }", None, ""),
        Err(CssError::InvalidValue { .. })
    ));
}

#[test]
fn test_sheet_media_and_metadata() {
    let engine = engine();
    let parsed = engine
        .parse_style_sheet("", Some(&url("http://example.com/p.css")), "print, screen")
        .unwrap();
    assert_eq!(parsed.media().len(), 2);
    assert_eq!(parsed.uri().map(Url::as_str), Some("http://example.com/p.css"));
    assert!(parsed.rules().is_empty());
    assert!(!parsed.is_alternate());

    assert!(matches!(
        engine.parse_style_sheet("", None, "print {"),
        Err(CssError::Media { .. })
    ));
}

// ============================================================================
// Importing style maps
// ============================================================================

fn with_before() -> CssEngine {
    CssEngine::new(
        PropertyRegistry::standard(),
        EngineOptions::new().pseudo_elements(["before"]),
    )
}

#[test]
fn test_imported_maps_are_fixed() {
    let source_engine = with_before();
    let mut source = Document::new();
    let src_svg = source.create_root("svg");
    source.append_style_sheet(
        src_svg,
        sheet(&source_engine, "rect { color: #f00 } rect::before { color: #00f }"),
    );
    let src_rect = source.append_element(src_svg, "rect");
    source.set_attribute(src_rect, "style", "width: 7px");

    let engine = with_before();
    let mut doc = Document::new();
    let svg = doc.create_root("svg");
    let rect = doc.append_element(svg, "rect");

    engine
        .import_cascaded_style_maps(&source_engine, &source, src_svg, &mut doc, svg)
        .unwrap();

    for node in [svg, rect] {
        assert!(doc.style_map(node, None).unwrap().is_fixed());
        assert!(doc.style_map(node, Some("before")).unwrap().is_fixed());
    }
    // The source document is left alone.
    assert!(source.style_map(src_rect, None).is_none());

    assert_eq!(engine.computed_style(&mut doc, rect, None, props::COLOR).unwrap(), rgb(255, 0, 0));
    assert_eq!(
        engine.computed_style(&mut doc, rect, Some("before"), props::COLOR).unwrap(),
        rgb(0, 0, 255)
    );
    assert_eq!(engine.computed_style(&mut doc, rect, None, props::WIDTH).unwrap(), Value::px(7.0));

    // Inline edits of the destination do not reach fixed maps.
    let change = doc.set_attribute(rect, "style", "color: #0f0");
    engine.handle_attr_modified(&mut doc, rect, &change).unwrap();
    assert_eq!(engine.computed_style(&mut doc, rect, None, props::COLOR).unwrap(), rgb(255, 0, 0));
}

#[test]
fn test_import_pairs_elements_around_sheet_nodes() {
    let source_engine = engine();
    let mut source = Document::new();
    let src_svg = source.create_root("svg");
    source.append_style_sheet(
        src_svg,
        sheet(&source_engine, "rect { width: 1px } circle { width: 2px }"),
    );
    source.append_element(src_svg, "rect");
    source.append_element(src_svg, "circle");

    let engine = engine();
    let mut doc = Document::new();
    let svg = doc.create_root("svg");
    let rect = doc.append_element(svg, "rect");
    let local = doc.append_style_sheet(svg, sheet(&engine, ""));
    let circle = doc.append_element(svg, "circle");

    engine
        .import_cascaded_style_maps(&source_engine, &source, src_svg, &mut doc, svg)
        .unwrap();

    assert!(doc.style_map(local, None).is_none());
    assert!(doc.style_map(rect, None).unwrap().is_fixed());
    assert!(doc.style_map(circle, None).unwrap().is_fixed());
    assert_eq!(engine.computed_style(&mut doc, rect, None, props::WIDTH).unwrap(), Value::px(1.0));
    assert_eq!(engine.computed_style(&mut doc, circle, None, props::WIDTH).unwrap(), Value::px(2.0));
}

#[test]
fn test_import_requires_matching_registries() {
    let (registry, _) = counting_registry();
    let source_engine: CssEngine = CssEngine::new(registry, EngineOptions::new());
    let mut source = Document::new();
    let src_svg = source.create_root("svg");

    let engine = engine();
    let mut doc = Document::new();
    let svg = doc.create_root("svg");

    assert!(matches!(
        engine.import_cascaded_style_maps(&source_engine, &source, src_svg, &mut doc, svg),
        Err(CssError::InvalidState(_))
    ));
    assert!(doc.style_map(svg, None).is_none());
}

// ============================================================================
// Disposal
// ============================================================================

#[test]
fn test_dispose_clears_every_map() {
    let engine = with_before();
    let mut doc = Document::new();
    let svg = doc.create_root("svg");
    let text = doc.append_element(svg, "text");
    let host = doc.append_element(svg, "use");
    let instance = doc.import_root(host, "g");

    engine.computed_style(&mut doc, text, None, props::COLOR).unwrap();
    engine.computed_style(&mut doc, text, Some("before"), props::COLOR).unwrap();
    engine.computed_style(&mut doc, instance, None, props::COLOR).unwrap();
    assert!(doc.style_map(host, None).is_some());

    engine.dispose(&mut doc);

    for node in [svg, text, host, instance] {
        assert!(doc.style_map(node, None).is_none());
    }
    assert!(doc.style_map(text, Some("before")).is_none());
}
