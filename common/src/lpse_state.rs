//! The query state a page builds up before navigating: one optional slot per
//! LPSE code, addressed by the offset the backend assigned to that code.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexSet;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::panl_response::PanlConfiguration;


#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LpseStateError {
    #[error("no LPSE offset is configured for code '{0}'")]
    UnknownCode(String),
}

/// `code -> offset` table of one field-set. Loaded once, never changed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LpseLookup {
    offsets: BTreeMap<String, usize>,
    len: usize,
}

impl LpseLookup {
    pub fn new(offsets: BTreeMap<String, usize>) -> Self {
        let len = offsets.values().max().map_or(0, |max| max + 1);
        Self { offsets, len }
    }

    pub fn from_configuration(config: &PanlConfiguration) -> Self {
        let mut lookup = Self::new(config.lpse_lookup.clone());
        lookup.len = lookup.len.max(config.lpse_order.len());
        lookup
    }

    pub fn offset(&self, code: &str) -> Option<usize> {
        self.offsets.get(code).copied()
    }

    /// Number of slots a state over this table holds.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A populated slot. The selections keep insertion order, which is the order
/// the values appear in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotValue {
    code: String,
    selections: IndexSet<String>,
}

impl SlotValue {
    fn single(code: &str, value: &str) -> Self {
        Self { code: code.to_string(), selections: IndexSet::from([value.to_string()]) }
    }

    fn empty(code: &str) -> Self {
        Self { code: code.to_string(), selections: IndexSet::new() }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn selections(&self) -> impl Iterator<Item = &str> {
        self.selections.iter().map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.selections.contains(value)
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// Never holds an empty slot: dropping the last selection empties the slot
/// itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LpseState {
    lookup: Arc<LpseLookup>,
    slots: Vec<Option<SlotValue>>,
}

impl LpseState {
    pub fn new(lookup: Arc<LpseLookup>) -> Self {
        let slots = vec![None; lookup.len()];
        Self { lookup, slots }
    }

    pub fn from_configuration(config: &PanlConfiguration) -> Self {
        Self::new(Arc::new(LpseLookup::from_configuration(config)))
    }

    pub fn lookup(&self) -> &LpseLookup {
        &self.lookup
    }

    /// Replaces the slot of a single-valued code. `None` or an empty value
    /// clears it.
    pub fn set_single(&mut self, code: &str, value: Option<&str>) -> Result<(), LpseStateError> {
        let offset = self.offset_of(code)?;
        self.slots[offset] = match value {
            Some(value) if !value.is_empty() => Some(SlotValue::single(code, value)),
            _ => None,
        };
        debug!("lpse slot {} ({}) set to {:?}", offset, code, value);
        Ok(())
    }

    /// Adds `value` to, or removes it from, the slot of a multivalued code.
    pub fn toggle_multi(&mut self, code: &str, value: &str, included: bool) -> Result<(), LpseStateError> {
        let offset = self.offset_of(code)?;
        if value.is_empty() {
            return Ok(());
        }

        let slot = &mut self.slots[offset];
        if included {
            slot.get_or_insert_with(|| SlotValue::empty(code))
                .selections
                .insert(value.to_string());
        } else {
            let now_empty = match slot.as_mut() {
                Some(existing) => {
                    existing.selections.shift_remove(value);
                    existing.selections.is_empty()
                }
                None => false,
            };
            if now_empty {
                *slot = None;
            }
        }
        debug!("lpse slot {} ({}) toggled {} -> {}", offset, code, value, included);
        Ok(())
    }

    pub fn clear(&mut self, code: &str) -> Result<(), LpseStateError> {
        self.set_single(code, None)
    }

    pub fn slot(&self, code: &str) -> Option<&SlotValue> {
        let offset = self.lookup.offset(code)?;
        self.slots.get(offset)?.as_ref()
    }

    /// Populated slots in ascending offset order.
    pub fn populated(&self) -> impl Iterator<Item = (usize, &SlotValue)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(offset, slot)| slot.as_ref().map(|slot| (offset, slot)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn offset_of(&self, code: &str) -> Result<usize, LpseStateError> {
        self.lookup
            .offset(code)
            .filter(|offset| *offset < self.slots.len())
            .ok_or_else(|| LpseStateError::UnknownCode(code.to_string()))
    }
}
