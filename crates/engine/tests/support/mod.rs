//! Helpers shared by the engine integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use css_engine::managers::color::ColorManager;
use css_engine::managers::font::FontSizeManager;
use css_engine::managers::length::LengthManager;
use css_engine::managers::line_height::LineHeightManager;
use css_engine::{
    Computed, CssEngine, EngineOptions, NodeId, ParseContext, PropertyRegistry, Result,
    StyleAccess, StyleChangeEvent, StyleSheet, Value, ValueManager,
};
use css_syntax::{LexicalValue, RgbaColor};

pub fn engine() -> CssEngine {
    CssEngine::new(PropertyRegistry::standard(), EngineOptions::default())
}

pub fn sheet(engine: &CssEngine, text: &str) -> StyleSheet {
    engine.parse_style_sheet(text, None, "").unwrap()
}

pub fn rgb(r: u8, g: u8, b: u8) -> Value {
    Value::Color(RgbaColor::rgb(r, g, b))
}

/// Records every notification it receives.
#[derive(Clone, Default)]
pub struct Recorder {
    events: Arc<Mutex<Vec<StyleChangeEvent<NodeId>>>>,
}

impl Recorder {
    pub fn attach(engine: &CssEngine) -> Self {
        let recorder = Recorder::default();
        let events = Arc::clone(&recorder.events);
        engine.on_change(move |event| {
            events.lock().unwrap().push(event.clone());
            Ok(())
        });
        recorder
    }

    pub fn events(&self) -> Vec<StyleChangeEvent<NodeId>> {
        self.events.lock().unwrap().clone()
    }

    /// The properties reported for `node`, if it was reported.
    pub fn properties_of(&self, node: NodeId) -> Option<Vec<usize>> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.node == node)
            .map(|e| e.properties.to_vec())
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

/// Wraps a value manager and counts its `compute_value` calls.
pub struct CountingManager {
    inner: Box<dyn ValueManager>,
    calls: Arc<AtomicUsize>,
}

impl ValueManager for CountingManager {
    fn property_name(&self) -> &str {
        self.inner.property_name()
    }

    fn is_inherited(&self) -> bool {
        self.inner.is_inherited()
    }

    fn default_value(&self) -> Value {
        self.inner.default_value()
    }

    fn create_value(&self, value: &LexicalValue, ctx: &ParseContext<'_>) -> Result<Value> {
        self.inner.create_value(value, ctx)
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compute_value(access, value)
    }
}

pub const COUNTED_COLOR: usize = 0;
pub const COUNTED_FONT_SIZE: usize = 1;
pub const COUNTED_LINE_HEIGHT: usize = 2;
pub const COUNTED_WIDTH: usize = 3;

/// A four-property registry whose managers share one call counter.
pub fn counting_registry() -> (Arc<PropertyRegistry>, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let wrap = |inner: Box<dyn ValueManager>| -> Box<dyn ValueManager> {
        Box::new(CountingManager {
            inner,
            calls: Arc::clone(&calls),
        })
    };
    let registry = PropertyRegistry::new(
        vec![
            wrap(Box::new(ColorManager)),
            wrap(Box::new(FontSizeManager)),
            wrap(Box::new(LineHeightManager)),
            wrap(Box::new(LengthManager::size("width"))),
        ],
        Vec::new(),
    );
    (Arc::new(registry), calls)
}

pub fn calls(counter: &AtomicUsize) -> usize {
    counter.load(Ordering::SeqCst)
}
