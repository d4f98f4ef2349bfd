//! Cyclic picker over a fixed, non-empty sequence.
//!
//! The cursor is advanced *before* the lookup, so the first call yields
//! the element at index 1 and index 0 only comes around after a wrap.
//! Existing status histories were produced with this ordering.

use crate::types::ConfigError;

#[derive(Debug, Clone)]
pub struct CyclicPicker<T> {
    items: Vec<T>,
    cursor: usize,
}

impl<T> CyclicPicker<T> {
    /// Build a picker; `name` identifies the sequence in the error.
    pub fn new(name: &str, items: Vec<T>) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptySequence(name.to_string()));
        }
        Ok(Self { items, cursor: 0 })
    }

    /// Step the cursor (wrapping) and return the item it now points at.
    pub fn advance(&mut self) -> &T {
        self.cursor += 1;
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }
        &self.items[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; construction rejects empty sequences.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
