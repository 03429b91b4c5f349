//! Inventory -- the fixed set of items the player carries.
//!
//! Items are only ever granted, never removed, and slots are not
//! deduplicated: granting an item already held uses up another slot.

use dialquest_data::ItemId;
use log::info;

use crate::error::EngineError;

/// Number of item slots the player has.
pub const INVENTORY_SIZE: usize = 4;

const EMPTY_SLOT: ItemId = 0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inventory {
    slots: [ItemId; INVENTORY_SIZE],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `item` in the first free slot.
    ///
    /// # Errors
    /// - [`EngineError::InvalidItem`] for item id 0.
    /// - [`EngineError::InventoryFull`] if every slot is occupied.
    pub fn add(&mut self, item: ItemId) -> Result<(), EngineError> {
        if item == EMPTY_SLOT {
            return Err(EngineError::InvalidItem);
        }
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| **slot == EMPTY_SLOT)
            .ok_or(EngineError::InventoryFull { item })?;
        *slot = item;
        info!("item {item} added to inventory");
        Ok(())
    }

    pub fn contains(&self, item: ItemId) -> bool {
        item != EMPTY_SLOT && self.slots.contains(&item)
    }

    /// Held items in slot order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.slots.iter().copied().filter(|id| *id != EMPTY_SLOT)
    }

    pub fn len(&self) -> usize {
        self.items().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.len() == INVENTORY_SIZE
    }
}
