//! Computed values.
//!
//! A slot is computed at most once: the result is written back into the
//! style map with the `COMPUTED` flag and served from there until the
//! propagator clears it. Computing may recurse into other slots of the same
//! map (through [`StyleAccess::computed`]) and into the parent's map, which
//! are memoized the same way.

use std::fmt;

use crate::document::CssDocument;
use crate::engine::CssEngine;
use crate::error::{CssError, Result};
use crate::managers::{Dependencies, StyleAccess};
use crate::registry::PropertyRegistry;
use crate::style_map::{SlotFlags, StyleMap};
use crate::value::Value;

impl<N> CssEngine<N>
where
    N: Copy + Eq + fmt::Debug,
{
    /// The style map attached to `(node, pseudo)`, cascading and attaching
    /// it first if the node has none.
    pub fn style_map<'d, D>(&self, doc: &'d mut D, node: N, pseudo: Option<&str>) -> Result<&'d StyleMap>
    where
        D: CssDocument<Node = N>,
    {
        self.ensure_style_map(doc, node, pseudo)?;
        doc.style_map(node, pseudo)
            .ok_or_else(|| missing_style_map(node, pseudo))
    }

    /// The computed value of one property of `(node, pseudo)`.
    ///
    /// # Errors
    ///
    /// Fails when the property index is out of range, when cascading the
    /// node or one of its ancestors fails, and when a property's value
    /// depends on itself.
    pub fn computed_style<D>(&self, doc: &mut D, node: N, pseudo: Option<&str>, index: usize) -> Result<Value>
    where
        D: CssDocument<Node = N>,
    {
        self.resolve(doc, node, pseudo, index, &mut Vec::new())
    }

    fn ensure_style_map<D>(&self, doc: &mut D, node: N, pseudo: Option<&str>) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        if doc.style_map(node, pseudo).is_none() {
            let map = self.cascaded_style_map(doc, node, pseudo)?;
            doc.set_style_map(node, pseudo, Some(map));
        }
        Ok(())
    }

    /// `in_progress` holds the indices being computed on this same
    /// `(node, pseudo)`, outermost first.
    fn resolve<D>(
        &self,
        doc: &mut D,
        node: N,
        pseudo: Option<&str>,
        index: usize,
        in_progress: &mut Vec<usize>,
    ) -> Result<Value>
    where
        D: CssDocument<Node = N>,
    {
        if index >= self.registry.len() {
            return Err(CssError::InvalidState(format!(
                "property index {} out of range ({} properties)",
                index,
                self.registry.len()
            )));
        }
        self.ensure_style_map(doc, node, pseudo)?;

        let map = doc
            .style_map(node, pseudo)
            .ok_or_else(|| missing_style_map(node, pseudo))?;
        let cascaded = map.value(index).cloned();
        if map.is_computed(index) {
            return cascaded
                .map(|v| v.computed().clone())
                .ok_or_else(|| CssError::InvalidState(format!("computed slot {} has no value", index)));
        }

        if in_progress.contains(&index) {
            return Err(CssError::InvalidState(format!(
                "{} depends on itself",
                self.registry.property_name(index)
            )));
        }
        in_progress.push(index);
        let outcome = self.compute_slot(doc, node, pseudo, index, cascaded.clone(), in_progress);
        in_progress.pop();
        let (result, relative) = outcome?;

        let map = doc
            .style_map_mut(node, pseudo)
            .ok_or_else(|| missing_style_map(node, pseudo))?;
        let mut flags = map.flags(index).difference(SlotFlags::RELATIVE) | relative;
        match cascaded {
            None => {
                map.set_value(index, Some(result.clone()));
                flags |= SlotFlags::NULL_CASCADED;
            }
            Some(cascaded) if cascaded != result => {
                map.set_value(index, Some(Value::wrap_computed(cascaded, result.clone())));
            }
            Some(_) => {}
        }
        map.set_flags(index, flags | SlotFlags::COMPUTED);

        log::trace!(
            "COMPUTE: {:?} pseudo={:?} {}={} ({:?})",
            node,
            pseudo,
            self.registry.property_name(index),
            result,
            relative
        );
        Ok(result)
    }

    /// Derives the computed value of an uncomputed slot, with the relative
    /// flags describing what it was derived from.
    fn compute_slot<D>(
        &self,
        doc: &mut D,
        node: N,
        pseudo: Option<&str>,
        index: usize,
        cascaded: Option<Value>,
        in_progress: &mut Vec<usize>,
    ) -> Result<(Value, SlotFlags)>
    where
        D: CssDocument<Node = N>,
    {
        let manager = self.registry.manager(index);
        let inherits = match &cascaded {
            None => manager.is_inherited(),
            Some(value) => value.is_inherit(),
        };
        if inherits {
            if let Some(parent) = doc.stylable_parent(node) {
                let value = self.resolve(doc, parent, None, index, &mut Vec::new())?;
                return Ok((value, SlotFlags::PARENT_RELATIVE));
            }
        }

        let value = match cascaded {
            Some(value) if !value.is_inherit() => value,
            _ => manager.default_value(),
        };
        let mut scope = ComputeScope {
            engine: self,
            doc,
            node,
            pseudo,
            in_progress,
        };
        let computed = manager.compute_value(&mut scope, value)?;
        Ok((computed.value, relative_flags(computed.dependencies)))
    }
}

fn relative_flags(dependencies: Dependencies) -> SlotFlags {
    let mut flags = SlotFlags::empty();
    flags.set(SlotFlags::PARENT_RELATIVE, dependencies.contains(Dependencies::PARENT));
    flags.set(SlotFlags::FONT_SIZE_RELATIVE, dependencies.contains(Dependencies::FONT_SIZE));
    flags.set(SlotFlags::LINE_HEIGHT_RELATIVE, dependencies.contains(Dependencies::LINE_HEIGHT));
    flags.set(SlotFlags::COLOR_RELATIVE, dependencies.contains(Dependencies::COLOR));
    flags
}

fn missing_style_map<N: fmt::Debug>(node: N, pseudo: Option<&str>) -> CssError {
    CssError::InvalidState(format!("no style map attached to {:?} pseudo={:?}", node, pseudo))
}

/// What a value manager sees while one slot is being computed.
struct ComputeScope<'a, N, D> {
    engine: &'a CssEngine<N>,
    doc: &'a mut D,
    node: N,
    pseudo: Option<&'a str>,
    in_progress: &'a mut Vec<usize>,
}

impl<N, D> StyleAccess for ComputeScope<'_, N, D>
where
    N: Copy + Eq + fmt::Debug,
    D: CssDocument<Node = N>,
{
    fn pseudo_element(&self) -> Option<&str> {
        self.pseudo
    }

    fn registry(&self) -> &PropertyRegistry {
        &self.engine.registry
    }

    fn computed(&mut self, index: usize) -> Result<Value> {
        self.engine
            .resolve(self.doc, self.node, self.pseudo, index, self.in_progress)
    }

    fn parent_computed(&mut self, index: usize) -> Result<Option<Value>> {
        match self.doc.stylable_parent(self.node) {
            Some(parent) => self
                .engine
                .resolve(self.doc, parent, None, index, &mut Vec::new())
                .map(Some),
            None => Ok(None),
        }
    }
}
