//! Incremental updates after attribute changes.
//!
//! Only elements that already carry a style map are updated; an element that
//! was never styled has nothing to invalidate. An inline style change is
//! patched into the map in place when it only adds or replaces declarations.
//! When it drops a declaration the whole map is detached instead, since the
//! value underneath was never recorded, and the next lookup recascades.
//!
//! Every element whose computed values changed is reported once to the
//! listeners, then the change is pushed down to the descendants whose values
//! were inherited from it. The walk stops below an element where nothing was
//! invalidated.

use std::fmt;

use smallvec::SmallVec;

use crate::document::{AttrChange, AttrMutation, CssDocument};
use crate::engine::CssEngine;
use crate::error::{CssError, Result};
use crate::managers::ParseContext;
use crate::style_map::{Origin, SlotFlags, StyleMap};

type PropertyList = SmallVec<[usize; 8]>;

impl<N> CssEngine<N>
where
    N: Copy + Eq + fmt::Debug,
{
    /// Reacts to an attribute change on `node`.
    ///
    /// Changes of the inline style attribute update the node's style map and
    /// invalidate dependent values in its subtree. Changes of presentational
    /// hint attributes are not handled and only logged.
    pub fn handle_attr_modified<D>(&self, doc: &mut D, node: N, mutation: &AttrMutation) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        if !doc.is_stylable(node) {
            return Ok(());
        }
        let Some(map) = doc.style_map(node, None) else {
            log::trace!("INVALIDATE: {:?} has no style map", node);
            return Ok(());
        };
        let fixed = map.is_fixed();

        if let Some((namespace, local_name)) = &self.options.style_attribute {
            if mutation.is_attribute(namespace.as_deref(), local_name) {
                if fixed {
                    log::debug!("INVALIDATE: {:?} has an imported style map, ignoring", node);
                    return Ok(());
                }
                return self.inline_style_updated(doc, node, mutation);
            }
        }

        if let Some(namespace) = &self.options.hints_namespace {
            if mutation.namespace.as_deref() == namespace.as_deref()
                && self.registry.index_of(&mutation.local_name).is_some()
            {
                log::warn!(
                    "presentational hint {:?} modified on {:?}: not supported",
                    mutation.local_name,
                    node
                );
            }
        }
        Ok(())
    }

    fn inline_style_updated<D>(&self, doc: &mut D, node: N, mutation: &AttrMutation) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        let declaration = match mutation.change {
            AttrChange::Addition | AttrChange::Modification if !mutation.new_value.is_empty() => {
                let base = self.base_uri(doc, node);
                let ctx = ParseContext::new(base.as_ref());
                Some(self.compile_inline_style(&mutation.local_name, &mutation.new_value, &ctx)?)
            }
            _ => None,
        };

        let len = self.registry.len();
        let map = doc
            .style_map_mut(node, None)
            .ok_or_else(|| CssError::InvalidState(format!("{:?} lost its style map", node)))?;

        let mut written = vec![false; len];
        let mut updated = vec![false; len];
        for entry in declaration.iter().flat_map(|d| d.iter()) {
            if let Some(was_computed) =
                map.put_updated_property(entry.index, entry.value.clone(), entry.important)
            {
                written[entry.index] = true;
                updated[entry.index] |= was_computed;
            }
        }

        // Declarations of the previous text that are gone.
        let mut removed = false;
        if !mutation.prev_value.is_empty() {
            for index in 0..len {
                if map.value(index).is_some()
                    && map.origin(index) == Origin::InlineAuthor
                    && !written[index]
                {
                    removed = true;
                    if map.is_computed(index) {
                        updated[index] = true;
                    }
                }
            }
        }

        self.invalidate_relative(map, &mut updated, !removed);
        if removed {
            log::debug!("INVALIDATE: {:?} inline declarations removed, recascading", node);
            doc.set_style_map(node, None, None);
        }

        let properties = updated_indices(&updated);
        if properties.is_empty() {
            return Ok(());
        }
        self.fire_properties_changed(node, &properties)?;
        self.propagate_to_children(doc, node, &properties)
    }

    /// Clears the values of `node` inherited through `properties` and
    /// continues with what changed there.
    fn propagate_changes<D>(&self, doc: &mut D, node: N, properties: &[usize]) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        let mut changed: Option<PropertyList> = None;
        if doc.is_stylable(node) {
            if let Some(map) = doc.style_map_mut(node, None) {
                let mut updated = vec![false; self.registry.len()];
                for &index in properties {
                    if index < updated.len() && map.is_computed(index) && map.is_parent_relative(index) {
                        updated[index] = true;
                        map.clear_computed(index);
                    }
                }
                self.invalidate_relative(map, &mut updated, true);

                let local = updated_indices(&updated);
                if local.is_empty() {
                    log::debug!("INVALIDATE: nothing inherited at {:?}, pruning", node);
                    return Ok(());
                }
                self.fire_properties_changed(node, &local)?;
                changed = Some(local);
            }
        }

        let properties = changed.as_deref().unwrap_or(properties);
        self.propagate_to_children(doc, node, properties)
    }

    fn propagate_to_children<D>(&self, doc: &mut D, node: N, properties: &[usize]) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        for child in doc.children(node) {
            self.propagate_changes(doc, child, properties)?;
            if let Some(imported) = doc.imported_child(child) {
                self.propagate_changes(doc, imported, properties)?;
            }
        }
        Ok(())
    }

    /// Adds to `updated` the computed slots that depend on an updated
    /// font-size, line-height or color of the same element. One level only:
    /// a slot added here does not pull in its own dependents.
    fn invalidate_relative(&self, map: &mut StyleMap, updated: &mut [bool], clear: bool) {
        let driver = |index: Option<usize>| index.is_some_and(|i| updated.get(i).copied().unwrap_or(false));
        let mut stale = SlotFlags::empty();
        stale.set(SlotFlags::FONT_SIZE_RELATIVE, driver(self.registry.font_size_index()));
        stale.set(SlotFlags::LINE_HEIGHT_RELATIVE, driver(self.registry.line_height_index()));
        stale.set(SlotFlags::COLOR_RELATIVE, driver(self.registry.color_index()));
        if stale.is_empty() {
            return;
        }

        for (index, flag) in updated.iter_mut().enumerate() {
            if *flag || !map.is_computed(index) || !map.flags(index).intersects(stale) {
                continue;
            }
            *flag = true;
            if clear {
                map.clear_computed(index);
            }
        }
    }
}

fn updated_indices(updated: &[bool]) -> PropertyList {
    updated
        .iter()
        .enumerate()
        .filter_map(|(index, &flag)| flag.then_some(index))
        .collect()
}
