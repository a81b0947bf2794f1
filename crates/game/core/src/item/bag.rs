//! Fixed-capacity item bag with stable slot indices.
//!
//! Slot indices are identities: nothing here ever shifts items to close gaps.
//! Callers that want a gap-free list read the compact view, which is rebuilt
//! lazily from the slot array after any mutation.

use std::cell::{Cell, Ref, RefCell};

use super::{BagItem, Consumable};
use crate::config::RulesConfig;
use crate::error::{ErrorSeverity, GameError};

/// Errors returned by bag operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BagError {
    #[error("bag is full ({capacity} slots)")]
    Full { capacity: usize },

    #[error("cannot store an empty stack")]
    EmptyItem,

    #[error("slot {index} is out of range (capacity {capacity})")]
    SlotOutOfRange { index: usize, capacity: usize },

    #[error("item {index} is out of range ({len} items)")]
    CompactIndexOutOfRange { index: usize, len: usize },

    #[error("item is not in the bag")]
    NotFound,

    #[error("slot {slot} is empty")]
    EmptySlot { slot: usize },

    #[error("slot {slot} does not hold a consumable")]
    NotConsumable { slot: usize },

    #[error("{supplied} items do not fit in {capacity} slots")]
    TooManyItems { supplied: usize, capacity: usize },

    #[error("bag is already at its limit of {limit} slots")]
    UpgradeLimit { limit: usize },
}

impl GameError for BagError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full { .. } | Self::UpgradeLimit { .. } => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "BAG_FULL",
            Self::EmptyItem => "BAG_EMPTY_ITEM",
            Self::SlotOutOfRange { .. } => "BAG_SLOT_OUT_OF_RANGE",
            Self::CompactIndexOutOfRange { .. } => "BAG_INDEX_OUT_OF_RANGE",
            Self::NotFound => "BAG_NOT_FOUND",
            Self::EmptySlot { .. } => "BAG_EMPTY_SLOT",
            Self::NotConsumable { .. } => "BAG_NOT_CONSUMABLE",
            Self::TooManyItems { .. } => "BAG_TOO_MANY_ITEMS",
            Self::UpgradeLimit { .. } => "BAG_UPGRADE_LIMIT",
        }
    }
}

/// Where an added item ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BagInsert {
    /// Fully merged into existing stacks; `slot` is the last stack touched.
    Stacked { slot: usize },
    /// Stored in a previously empty slot (possibly after partial merging).
    Placed { slot: usize },
}

impl BagInsert {
    pub const fn slot(self) -> usize {
        match self {
            Self::Stacked { slot } | Self::Placed { slot } => slot,
        }
    }
}

/// Result of [`ItemBag::swap_slots`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Both indices were the same.
    Unchanged,
    /// Slot contents exchanged positions.
    Swapped,
    /// Units moved from the first slot's stack into the second's.
    Absorbed { moved: u16, source_emptied: bool },
}

/// Fixed-length slot array of optional items.
///
/// # Invariants
///
/// - `len()` equals the number of occupied slots
/// - the compact view lists occupied slot indices in ascending order
/// - `capacity() <= limit()`
///
/// # Example
/// ```
/// # use rpg_core::{Consumable, ConsumableEffect, ItemBag};
/// let mut bag = ItemBag::new(3);
/// bag.try_add(Consumable::new("Potion", ConsumableEffect::Heal(30), 5)).unwrap();
/// bag.try_add(Consumable::new("Potion", ConsumableEffect::Heal(30), 5)).unwrap();
/// assert_eq!(bag.len(), 1);
/// assert_eq!(bag.slot(0).unwrap().quantity(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ItemBag {
    slots: Vec<Option<BagItem>>,
    count: usize,
    limit: usize,
    compact: RefCell<Vec<usize>>,
    compact_dirty: Cell<bool>,
}

impl ItemBag {
    /// Creates a bag that cannot be upgraded past `capacity`.
    pub fn new(capacity: usize) -> Self {
        Self::with_limit(capacity, capacity)
    }

    /// Creates a bag of `capacity` slots that upgrades may grow up to `limit`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity > limit`.
    pub fn with_limit(capacity: usize, limit: usize) -> Self {
        assert!(
            capacity <= limit,
            "bag capacity {capacity} exceeds its limit {limit}"
        );
        Self {
            slots: vec![None; capacity],
            count: 0,
            limit,
            compact: RefCell::new(Vec::with_capacity(capacity)),
            compact_dirty: Cell::new(true),
        }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self::with_limit(config.default_bag_capacity, config.max_bag_capacity)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.slots.len()
    }

    pub fn free_slots(&self) -> usize {
        self.slots.len() - self.count
    }

    /// Item stored at slot `index`, if any.
    pub fn slot(&self, index: usize) -> Option<&BagItem> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Like [`slot`](Self::slot), but says why nothing is there.
    pub fn get(&self, index: usize) -> Result<&BagItem, BagError> {
        self.check_slot(index)?;
        self.slots[index]
            .as_ref()
            .ok_or(BagError::EmptySlot { slot: index })
    }

    /// Raw slot array, gaps included.
    pub fn slots(&self) -> &[Option<BagItem>] {
        &self.slots
    }

    /// Occupied items in slot order.
    pub fn items(&self) -> impl Iterator<Item = &BagItem> + '_ {
        self.slots.iter().flatten()
    }

    /// Occupied slot indices in ascending order.
    ///
    /// Rebuilt from the slot array the first time it is read after a mutation.
    pub fn compact_slots(&self) -> Ref<'_, [usize]> {
        if self.compact_dirty.get() {
            let mut view = self.compact.borrow_mut();
            view.clear();
            view.extend(
                self.slots
                    .iter()
                    .enumerate()
                    .filter_map(|(index, slot)| slot.as_ref().map(|_| index)),
            );
            self.compact_dirty.set(false);
        }
        Ref::map(self.compact.borrow(), Vec::as_slice)
    }

    /// The `index`-th occupied item (0-based, slot order).
    pub fn get_compact(&self, index: usize) -> Option<&BagItem> {
        let slot = *self.compact_slots().get(index)?;
        self.slot(slot)
    }

    /// Total units of the named consumable across all stacks.
    pub fn count_of(&self, name: &str) -> u32 {
        self.items()
            .filter_map(BagItem::as_consumable)
            .filter(|c| c.name() == name)
            .map(|c| u32::from(c.count()))
            .sum()
    }

    /// Adds an item, merging consumables into existing stacks first.
    ///
    /// A full bag rejects every item, stackable or not. Otherwise consumables
    /// fill matching stacks in slot order and any remainder takes the first
    /// empty slot.
    pub fn try_add(&mut self, item: impl Into<BagItem>) -> Result<BagInsert, BagError> {
        let mut item = item.into();
        if item.quantity() == 0 {
            return Err(BagError::EmptyItem);
        }
        if self.is_full() {
            return Err(BagError::Full {
                capacity: self.capacity(),
            });
        }

        if let BagItem::Consumable(incoming) = &mut item {
            if let Some(slot) = Self::merge_into_stacks(&mut self.slots, incoming) {
                self.invalidate();
                if incoming.is_empty() {
                    tracing::debug!("stacked {} into slot {}", incoming.name(), slot);
                    return Ok(BagInsert::Stacked { slot });
                }
            }
        }

        let slot = self.first_empty().ok_or(BagError::Full {
            capacity: self.capacity(),
        })?;
        tracing::debug!("placed {} in slot {}", item.name(), slot);
        self.slots[slot] = Some(item);
        self.count += 1;
        self.invalidate();
        Ok(BagInsert::Placed { slot })
    }

    /// Removes the first slot holding `item` and returns its index.
    pub fn remove(&mut self, item: &BagItem) -> Result<usize, BagError> {
        let slot = self
            .slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|held| held.is_same_item(item)))
            .ok_or(BagError::NotFound)?;
        self.slots[slot] = None;
        self.count -= 1;
        self.invalidate();
        tracing::debug!("removed {} from slot {}", item.name(), slot);
        Ok(slot)
    }

    /// Empties slot `index` and returns what it held.
    pub fn take(&mut self, index: usize) -> Result<BagItem, BagError> {
        self.check_slot(index)?;
        let item = self.slots[index]
            .take()
            .ok_or(BagError::EmptySlot { slot: index })?;
        self.count -= 1;
        self.invalidate();
        Ok(item)
    }

    /// Takes one unit from the consumable stack in slot `index`.
    ///
    /// Returns the units left; the slot is cleared when it reaches zero.
    pub fn consume_from_stack(&mut self, index: usize) -> Result<u16, BagError> {
        self.check_slot(index)?;
        let slot = &mut self.slots[index];
        let consumable = match slot {
            None => return Err(BagError::EmptySlot { slot: index }),
            Some(BagItem::Gear(_)) => return Err(BagError::NotConsumable { slot: index }),
            Some(BagItem::Consumable(consumable)) => consumable,
        };

        let remaining = consumable.take_one();
        if remaining == 0 {
            *slot = None;
            self.count -= 1;
        }
        self.invalidate();
        Ok(remaining)
    }

    /// Removes the `index`-th occupied item (compact order).
    pub fn remove_at(&mut self, index: usize) -> Result<BagItem, BagError> {
        let slot = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .nth(index)
            .map(|(slot, _)| slot)
            .ok_or(BagError::CompactIndexOutOfRange {
                index,
                len: self.count,
            })?;
        self.take(slot)
    }

    /// Swaps two slots, or merges them when both hold the same consumable.
    ///
    /// When slot `b`'s stack has room for a stack of the same type in slot `a`,
    /// units move from `a` to `b` instead and `a` is cleared if it empties.
    /// Otherwise the two slots exchange contents, empty slots included.
    pub fn swap_slots(&mut self, a: usize, b: usize) -> Result<SwapOutcome, BagError> {
        if a == b {
            return Ok(SwapOutcome::Unchanged);
        }
        self.check_slot(a).inspect_err(|_| tracing::warn!("swap rejected: slot {a} out of range"))?;
        self.check_slot(b).inspect_err(|_| tracing::warn!("swap rejected: slot {b} out of range"))?;

        let (source, target) = pair_mut(&mut self.slots, a, b);
        let absorbed = match (source.as_mut(), target.as_mut()) {
            (Some(BagItem::Consumable(src)), Some(BagItem::Consumable(dst)))
                if dst.is_same_stack(src) && dst.free_space() > 0 =>
            {
                let moved = dst.absorb_from(src);
                Some((moved, src.is_empty()))
            }
            _ => None,
        };

        let outcome = match absorbed {
            Some((moved, source_emptied)) => {
                if source_emptied {
                    *source = None;
                    self.count -= 1;
                }
                tracing::debug!("absorbed {moved} units from slot {a} into slot {b}");
                SwapOutcome::Absorbed {
                    moved,
                    source_emptied,
                }
            }
            None => {
                self.slots.swap(a, b);
                tracing::debug!("swapped slots {a} and {b}");
                SwapOutcome::Swapped
            }
        };
        self.invalidate();
        Ok(outcome)
    }

    /// Overwrites slot `index`, returning the previous contents.
    ///
    /// A drained consumable stack is rejected, as in [`try_add`](Self::try_add).
    pub fn set_slot_item(
        &mut self,
        index: usize,
        item: Option<BagItem>,
    ) -> Result<Option<BagItem>, BagError> {
        self.check_slot(index)?;
        if is_drained(&item) {
            return Err(BagError::EmptyItem);
        }
        let previous = std::mem::replace(&mut self.slots[index], item);
        self.recount();
        Ok(previous)
    }

    /// Replaces every slot from an ordered list; slots past the list are cleared.
    ///
    /// Fails without touching the bag when the list is longer than the capacity
    /// or holds a drained consumable stack.
    pub fn set_items_in_order(
        &mut self,
        items: impl IntoIterator<Item = Option<BagItem>>,
    ) -> Result<(), BagError> {
        let items: Vec<Option<BagItem>> = items.into_iter().collect();
        if items.len() > self.capacity() {
            return Err(BagError::TooManyItems {
                supplied: items.len(),
                capacity: self.capacity(),
            });
        }
        if items.iter().any(is_drained) {
            return Err(BagError::EmptyItem);
        }

        let mut items = items.into_iter();
        for slot in self.slots.iter_mut() {
            *slot = items.next().flatten();
        }
        self.recount();
        Ok(())
    }

    /// Like [`set_items_in_order`](Self::set_items_in_order), reading the first
    /// `len` entries of a reusable buffer. Taken entries are left empty.
    pub fn set_items_from_buffer(
        &mut self,
        buffer: &mut [Option<BagItem>],
        len: usize,
    ) -> Result<(), BagError> {
        let len = len.min(buffer.len());
        if len > self.capacity() {
            return Err(BagError::TooManyItems {
                supplied: len,
                capacity: self.capacity(),
            });
        }
        if buffer[..len].iter().any(is_drained) {
            return Err(BagError::EmptyItem);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = if index < len { buffer[index].take() } else { None };
        }
        self.recount();
        Ok(())
    }

    /// Grows the bag by up to `extra` slots without passing its limit.
    ///
    /// Returns the new capacity. Fails only when the bag is already at its limit.
    pub fn try_upgrade(&mut self, extra: usize) -> Result<usize, BagError> {
        if self.capacity() >= self.limit {
            return Err(BagError::UpgradeLimit { limit: self.limit });
        }
        let new_capacity = (self.capacity() + extra).min(self.limit);
        self.slots.resize(new_capacity, None);
        self.invalidate();
        tracing::debug!("bag upgraded to {} slots", new_capacity);
        Ok(new_capacity)
    }

    fn merge_into_stacks(
        slots: &mut [Option<BagItem>],
        incoming: &mut Consumable,
    ) -> Option<usize> {
        let mut last = None;
        for (index, slot) in slots.iter_mut().enumerate() {
            if incoming.is_empty() {
                break;
            }
            if let Some(BagItem::Consumable(existing)) = slot {
                if existing.absorb_from(incoming) > 0 {
                    last = Some(index);
                }
            }
        }
        last
    }

    fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    fn check_slot(&self, index: usize) -> Result<(), BagError> {
        if index >= self.capacity() {
            return Err(BagError::SlotOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    fn recount(&mut self) {
        self.count = self.slots.iter().filter(|slot| slot.is_some()).count();
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.compact_dirty.set(true);
    }
}

fn is_drained(item: &Option<BagItem>) -> bool {
    item.as_ref().is_some_and(|item| item.quantity() == 0)
}

fn pair_mut<T>(slots: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slots.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slots.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::equipment::{Gear, GearKind};
    use crate::item::ConsumableEffect;

    fn gear(name: &str) -> BagItem {
        BagItem::Gear(Gear::builder(name, GearKind::Accessory).shared())
    }

    fn potion(count: u16) -> Consumable {
        Consumable::new("Potion", ConsumableEffect::Heal(30), 5).with_count(count)
    }

    fn occupied(bag: &ItemBag) -> Vec<Option<String>> {
        bag.slots()
            .iter()
            .map(|slot| slot.as_ref().map(|item| item.name().to_string()))
            .collect()
    }

    #[test]
    fn fourth_item_rejected_at_capacity_three() {
        let mut bag = ItemBag::new(3);
        for name in ["A", "B", "C"] {
            assert!(bag.try_add(gear(name)).is_ok());
        }
        assert_eq!(
            bag.try_add(gear("D")),
            Err(BagError::Full { capacity: 3 })
        );
        assert_eq!(bag.len(), 3);
        assert!(bag.is_full());
    }

    #[test]
    fn consumable_increments_existing_stack() {
        let mut bag = ItemBag::new(4);
        bag.try_add(potion(2)).unwrap();
        assert_eq!(bag.try_add(potion(1)), Ok(BagInsert::Stacked { slot: 0 }));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.slot(0).unwrap().quantity(), 3);
    }

    #[test]
    fn overflowing_stack_spills_into_empty_slot() {
        let mut bag = ItemBag::new(4);
        bag.try_add(gear("Ring")).unwrap();
        bag.try_add(potion(4)).unwrap();
        assert_eq!(bag.try_add(potion(3)), Ok(BagInsert::Placed { slot: 2 }));
        assert_eq!(bag.slot(1).unwrap().quantity(), 5);
        assert_eq!(bag.slot(2).unwrap().quantity(), 2);
        assert_eq!(bag.count_of("Potion"), 7);
    }

    #[test]
    fn full_bag_rejects_even_stackable_items() {
        let mut bag = ItemBag::new(1);
        bag.try_add(potion(1)).unwrap();
        assert!(bag.try_add(potion(1)).is_err());
        assert_eq!(bag.slot(0).unwrap().quantity(), 1);
    }

    #[test]
    fn remove_matches_exact_gear_reference() {
        let mut bag = ItemBag::new(3);
        let sword = Gear::builder("Sword", GearKind::Sword).shared();
        let copy = Arc::new((*sword).clone());
        bag.try_add(BagItem::Gear(copy.clone())).unwrap();
        bag.try_add(BagItem::Gear(sword.clone())).unwrap();

        assert_eq!(bag.remove(&BagItem::Gear(sword.clone())), Ok(1));
        assert_eq!(bag.remove(&BagItem::Gear(sword)), Err(BagError::NotFound));
        assert_eq!(bag.len(), 1);
        assert!(bag.slot(0).is_some());
    }

    #[test]
    fn consume_from_stack_clears_slot_at_zero() {
        let mut bag = ItemBag::new(2);
        bag.try_add(potion(2)).unwrap();
        assert_eq!(bag.consume_from_stack(0), Ok(1));
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.consume_from_stack(0), Ok(0));
        assert_eq!(bag.len(), 0);
        assert!(bag.slot(0).is_none());
        assert_eq!(bag.consume_from_stack(0), Err(BagError::EmptySlot { slot: 0 }));
    }

    #[test]
    fn consume_from_stack_rejects_bad_slots() {
        let mut bag = ItemBag::new(2);
        bag.try_add(gear("Ring")).unwrap();
        assert_eq!(
            bag.consume_from_stack(0),
            Err(BagError::NotConsumable { slot: 0 })
        );
        assert_eq!(
            bag.consume_from_stack(5),
            Err(BagError::SlotOutOfRange {
                index: 5,
                capacity: 2
            })
        );
    }

    #[test]
    fn remove_at_uses_compact_order() {
        let mut bag = ItemBag::new(3);
        bag.set_items_in_order([Some(gear("A")), None, Some(gear("B"))])
            .unwrap();

        let removed = bag.remove_at(1).unwrap();
        assert_eq!(removed.name(), "B");
        assert_eq!(occupied(&bag), vec![Some("A".to_string()), None, None]);
        assert_eq!(
            bag.remove_at(1),
            Err(BagError::CompactIndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn swap_exchanges_with_empty_slot() {
        let mut bag = ItemBag::new(3);
        bag.try_add(gear("A")).unwrap();
        assert_eq!(bag.swap_slots(0, 2), Ok(SwapOutcome::Swapped));
        assert_eq!(occupied(&bag), vec![None, None, Some("A".to_string())]);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn swap_same_index_is_noop() {
        let mut bag = ItemBag::new(2);
        bag.try_add(gear("A")).unwrap();
        assert_eq!(bag.swap_slots(0, 0), Ok(SwapOutcome::Unchanged));
        assert!(bag.swap_slots(0, 2).is_err());
    }

    #[test]
    fn swap_absorbs_matching_stacks() {
        let mut bag = ItemBag::new(3);
        bag.set_items_in_order([Some(BagItem::from(potion(2))), Some(BagItem::from(potion(2)))])
            .unwrap();

        assert_eq!(
            bag.swap_slots(0, 1),
            Ok(SwapOutcome::Absorbed {
                moved: 2,
                source_emptied: true
            })
        );
        assert!(bag.slot(0).is_none());
        assert_eq!(bag.slot(1).unwrap().quantity(), 4);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn swap_partially_absorbs() {
        let mut bag = ItemBag::new(2);
        bag.set_items_in_order([Some(BagItem::from(potion(4))), Some(BagItem::from(potion(3)))])
            .unwrap();

        assert_eq!(
            bag.swap_slots(0, 1),
            Ok(SwapOutcome::Absorbed {
                moved: 2,
                source_emptied: false
            })
        );
        assert_eq!(bag.slot(0).unwrap().quantity(), 2);
        assert_eq!(bag.slot(1).unwrap().quantity(), 5);
        assert_eq!(bag.len(), 2);
    }

    #[test]
    fn swap_full_target_stack_swaps_positions() {
        let mut bag = ItemBag::new(2);
        bag.set_items_in_order([Some(BagItem::from(potion(1))), Some(BagItem::from(potion(5)))])
            .unwrap();
        assert_eq!(bag.swap_slots(0, 1), Ok(SwapOutcome::Swapped));
        assert_eq!(bag.slot(0).unwrap().quantity(), 5);
        assert_eq!(bag.slot(1).unwrap().quantity(), 1);
    }

    #[test]
    fn compact_view_tracks_mutations() {
        let mut bag = ItemBag::new(4);
        bag.set_items_in_order([None, Some(gear("A")), None, Some(gear("B"))])
            .unwrap();
        assert_eq!(&*bag.compact_slots(), &[1, 3]);
        assert_eq!(bag.get_compact(1).unwrap().name(), "B");

        bag.swap_slots(1, 0).unwrap();
        assert_eq!(&*bag.compact_slots(), &[0, 3]);
        assert!(bag.get_compact(2).is_none());
    }

    #[test]
    fn set_items_clears_tail_and_recounts() {
        let mut bag = ItemBag::new(3);
        for name in ["A", "B", "C"] {
            bag.try_add(gear(name)).unwrap();
        }
        bag.set_items_in_order([Some(gear("Z"))]).unwrap();
        assert_eq!(occupied(&bag), vec![Some("Z".to_string()), None, None]);
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn set_items_rejects_overflow_without_mutation() {
        let mut bag = ItemBag::new(1);
        bag.try_add(gear("A")).unwrap();
        let err = bag
            .set_items_in_order([Some(gear("B")), Some(gear("C"))])
            .unwrap_err();
        assert_eq!(
            err,
            BagError::TooManyItems {
                supplied: 2,
                capacity: 1
            }
        );
        assert_eq!(bag.slot(0).unwrap().name(), "A");
    }

    #[test]
    fn set_items_from_buffer_reads_prefix() {
        let mut bag = ItemBag::new(3);
        for name in ["A", "B", "C"] {
            bag.try_add(gear(name)).unwrap();
        }
        let mut buffer = vec![None, Some(gear("X")), Some(gear("Unused")), None];
        bag.set_items_from_buffer(&mut buffer, 2).unwrap();

        assert_eq!(occupied(&bag), vec![None, Some("X".to_string()), None]);
        assert_eq!(bag.len(), 1);
        assert!(buffer[1].is_none());
        assert!(buffer[2].is_some());
    }

    fn drained_potion() -> BagItem {
        let mut target = potion(4);
        let mut source = potion(1);
        target.absorb_from(&mut source);
        assert!(source.is_empty());
        BagItem::from(source)
    }

    #[test]
    fn bulk_setters_reject_drained_stacks() {
        let mut bag = ItemBag::new(3);
        bag.try_add(gear("A")).unwrap();

        assert_eq!(
            bag.set_slot_item(1, Some(drained_potion())),
            Err(BagError::EmptyItem)
        );
        assert_eq!(
            bag.set_items_in_order([None, Some(drained_potion())]),
            Err(BagError::EmptyItem)
        );
        let mut buffer = vec![Some(gear("B")), Some(drained_potion())];
        assert_eq!(
            bag.set_items_from_buffer(&mut buffer, 2),
            Err(BagError::EmptyItem)
        );
        assert!(buffer[0].is_some());

        assert_eq!(occupied(&bag), vec![Some("A".to_string()), None, None]);
        assert_eq!(bag.len(), 1);
        assert_eq!(bag.try_add(drained_potion()), Err(BagError::EmptyItem));
    }

    #[test]
    fn set_slot_item_recounts() {
        let mut bag = ItemBag::new(2);
        assert_eq!(bag.set_slot_item(1, Some(gear("A"))), Ok(None));
        assert_eq!(bag.len(), 1);
        let previous = bag.set_slot_item(1, None).unwrap();
        assert_eq!(previous.unwrap().name(), "A");
        assert!(bag.is_empty());
    }

    #[test]
    fn upgrade_grows_up_to_limit() {
        let mut bag = ItemBag::with_limit(2, 5);
        bag.try_add(gear("A")).unwrap();
        assert_eq!(bag.try_upgrade(2), Ok(4));
        assert_eq!(bag.try_upgrade(2), Ok(5));
        assert_eq!(bag.try_upgrade(2), Err(BagError::UpgradeLimit { limit: 5 }));
        assert_eq!(bag.capacity(), 5);
        assert_eq!(bag.slot(0).unwrap().name(), "A");
    }

    #[test]
    #[should_panic(expected = "exceeds its limit")]
    fn capacity_above_limit_fails_fast() {
        let _ = ItemBag::with_limit(10, 5);
    }
}
