//! Per-element style maps.
//!
//! A [`StyleMap`] holds one slot per registered property. A slot is either
//! cascaded-only (`COMPUTED` clear, value present or absent) or computed
//! (`COMPUTED` set, value holding the final value, possibly wrapped in
//! [`Value::Computed`] so the cascaded value can be restored).

use bitflags::bitflags;

use crate::value::Value;

/// Where a cascaded value came from, lowest priority first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Origin {
    #[default]
    UserAgent,
    User,
    /// Presentational attributes such as `fill="red"`.
    NonCss,
    Author,
    InlineAuthor,
}

bitflags! {
    /// State bits of a style map slot.
    ///
    /// # Example
    ///
    /// ```
    /// use css_engine::SlotFlags;
    ///
    /// let flags = SlotFlags::COMPUTED | SlotFlags::FONT_SIZE_RELATIVE;
    /// assert!(flags.intersects(SlotFlags::RELATIVE));
    /// assert!(!flags.contains(SlotFlags::PARENT_RELATIVE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct SlotFlags: u8 {
        /// The slot holds its final value.
        const COMPUTED             = 0b0000_0001;
        /// There was no cascaded value; the stored value was synthesized.
        const NULL_CASCADED        = 0b0000_0010;
        /// The declaration was `!important`.
        const IMPORTANT            = 0b0000_0100;
        /// The computed value came from the parent's computed value.
        const PARENT_RELATIVE      = 0b0000_1000;
        /// The computed value depends on this element's font-size.
        const FONT_SIZE_RELATIVE   = 0b0001_0000;
        /// The computed value depends on this element's line-height.
        const LINE_HEIGHT_RELATIVE = 0b0010_0000;
        /// The computed value depends on this element's color.
        const COLOR_RELATIVE       = 0b0100_0000;

        const RELATIVE = Self::PARENT_RELATIVE.bits()
            | Self::FONT_SIZE_RELATIVE.bits()
            | Self::LINE_HEIGHT_RELATIVE.bits()
            | Self::COLOR_RELATIVE.bits();
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
struct Slot {
    value: Option<Value>,
    origin: Origin,
    flags: SlotFlags,
}

/// Resolved values of one element or pseudo-element.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleMap {
    slots: Vec<Slot>,
    fixed: bool,
}

impl StyleMap {
    /// Creates a map with `len` empty slots.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::default(); len],
            fixed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// True for maps copied from another document's engine.
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.slots.get(index).and_then(|s| s.value.as_ref())
    }

    pub fn set_value(&mut self, index: usize, value: Option<Value>) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.value = value;
        }
    }

    pub fn origin(&self, index: usize) -> Origin {
        self.slots.get(index).map(|s| s.origin).unwrap_or_default()
    }

    pub fn set_origin(&mut self, index: usize, origin: Origin) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.origin = origin;
        }
    }

    pub fn flags(&self, index: usize) -> SlotFlags {
        self.slots.get(index).map(|s| s.flags).unwrap_or_default()
    }

    /// Replaces every state bit of the slot.
    pub fn set_flags(&mut self, index: usize, flags: SlotFlags) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.flags = flags;
        }
    }

    fn set_flag(&mut self, index: usize, flag: SlotFlags, on: bool) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.flags.set(flag, on);
        }
    }

    pub fn is_important(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::IMPORTANT)
    }

    pub fn set_important(&mut self, index: usize, important: bool) {
        self.set_flag(index, SlotFlags::IMPORTANT, important);
    }

    pub fn is_computed(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::COMPUTED)
    }

    pub fn set_computed(&mut self, index: usize, computed: bool) {
        self.set_flag(index, SlotFlags::COMPUTED, computed);
    }

    pub fn is_null_cascaded(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::NULL_CASCADED)
    }

    pub fn set_null_cascaded(&mut self, index: usize, on: bool) {
        self.set_flag(index, SlotFlags::NULL_CASCADED, on);
    }

    pub fn is_parent_relative(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::PARENT_RELATIVE)
    }

    pub fn set_parent_relative(&mut self, index: usize, on: bool) {
        self.set_flag(index, SlotFlags::PARENT_RELATIVE, on);
    }

    pub fn is_font_size_relative(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::FONT_SIZE_RELATIVE)
    }

    pub fn set_font_size_relative(&mut self, index: usize, on: bool) {
        self.set_flag(index, SlotFlags::FONT_SIZE_RELATIVE, on);
    }

    pub fn is_line_height_relative(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::LINE_HEIGHT_RELATIVE)
    }

    pub fn set_line_height_relative(&mut self, index: usize, on: bool) {
        self.set_flag(index, SlotFlags::LINE_HEIGHT_RELATIVE, on);
    }

    pub fn is_color_relative(&self, index: usize) -> bool {
        self.flags(index).contains(SlotFlags::COLOR_RELATIVE)
    }

    pub fn set_color_relative(&mut self, index: usize, on: bool) {
        self.set_flag(index, SlotFlags::COLOR_RELATIVE, on);
    }

    /// Writes a cascaded value unconditionally, keeping the state bits.
    pub fn put(&mut self, index: usize, value: Value, important: bool, origin: Origin) {
        self.set_value(index, Some(value));
        self.set_important(index, important);
        self.set_origin(index, origin);
    }

    /// Writes a cascaded value unless the slot holds a user `!important`
    /// value. Another user `!important` value may still replace it.
    ///
    /// Returns whether the value was written.
    pub fn put_author_property(
        &mut self,
        index: usize,
        value: Value,
        important: bool,
        origin: Origin,
    ) -> bool {
        let sticky = self.value(index).is_some()
            && self.origin(index) == Origin::User
            && self.is_important(index);
        if sticky && !(important && origin == Origin::User) {
            return false;
        }
        self.put(index, value, important, origin);
        true
    }

    /// Writes an inline-style value during an incremental update.
    ///
    /// The write is skipped when the slot holds a user `!important` value, or
    /// an `!important` value and the new one is not. A written slot loses all
    /// of its state bits except `IMPORTANT`. Returns whether the value was
    /// written and whether the slot was computed before the write.
    pub fn put_updated_property(
        &mut self,
        index: usize,
        value: Value,
        important: bool,
    ) -> Option<bool> {
        let existing_important = self.is_important(index);
        if important && existing_important && self.origin(index) == Origin::User {
            return None;
        }
        if existing_important && !important {
            return None;
        }
        let was_computed = self.is_computed(index);
        self.set_flags(index, SlotFlags::empty());
        self.put(index, value, important, Origin::InlineAuthor);
        Some(was_computed)
    }

    /// Drops the computed value of a slot, restoring its cascaded state.
    pub fn clear_computed(&mut self, index: usize) {
        if self.is_null_cascaded(index) {
            self.set_value(index, None);
        } else if let Some(slot) = self.slots.get_mut(index) {
            slot.value = slot.value.take().map(Value::into_cascaded);
        }
        self.set_computed(index, false);
    }
}
