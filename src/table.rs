//! Open-addressing station table.
//!
//! Stations live in an append-only arena; the slot array holds arena
//! indices. The slot count is always a power of two so the home slot is
//! `hash & (slots - 1)`, and occupancy is kept at or below half the slot
//! count so linear probing always reaches an empty slot.

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::fixed::Tenths;
use crate::hash::fnv1a;
use crate::station::Station;
use crate::summary::Summary;

pub const DEFAULT_SLOTS: usize = 1 << 18;

/// Stable handle to a station. Survives resizes and merges into the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(u32);

impl EntryId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Outcome of [`StationTable::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Found(EntryId),
    /// The key is absent; pass this slot to [`StationTable::insert`].
    Vacant(usize),
}

#[derive(Debug)]
pub struct StationTable<'a> {
    slots: Vec<Option<EntryId>>,
    entries: Vec<Station<'a>>,
    growths: u32,
}

impl<'a> StationTable<'a> {
    pub fn new() -> Self {
        Self::with_slots(DEFAULT_SLOTS)
    }

    /// `slots` is rounded up to a power of two, minimum 2.
    pub fn with_slots(slots: usize) -> Self {
        let slots = slots.max(2).next_power_of_two();
        Self {
            slots: vec![None; slots],
            entries: Vec::new(),
            growths: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of times the slot array has doubled.
    pub fn growths(&self) -> u32 {
        self.growths
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station<'a>> {
        self.entries.iter()
    }

    #[inline]
    pub fn lookup(&self, hash: u32, key: &[u8]) -> Lookup {
        let mask = self.slots.len() - 1;
        let mut index = hash as usize & mask;
        loop {
            match self.slots[index] {
                None => return Lookup::Vacant(index),
                Some(id) if self.entries[id.index()].key() == key => return Lookup::Found(id),
                Some(_) => index = (index + 1) & mask,
            }
        }
    }

    /// Places `station` in `slot`, which must come from a `Vacant` lookup
    /// made since the last mutation. Inserting a key twice is a caller bug.
    pub fn insert(&mut self, slot: usize, station: Station<'a>) -> EntryId {
        debug_assert!(self.slots[slot].is_none());
        let id = EntryId(self.entries.len() as u32);
        self.entries.push(station);
        self.slots[slot] = Some(id);
        if self.entries.len() > self.slots.len() / 2 {
            self.grow();
        }
        id
    }

    /// Doubles the slot array and rehashes every station by its stored hash.
    fn grow(&mut self) {
        let slots = self.slots.len() * 2;
        let mask = slots - 1;
        let mut fresh = vec![None; slots];
        for (i, station) in self.entries.iter().enumerate() {
            let mut index = station.hash() as usize & mask;
            while fresh[index].is_some() {
                index = (index + 1) & mask;
            }
            fresh[index] = Some(EntryId(i as u32));
        }
        self.slots = fresh;
        self.growths += 1;
        debug!(slots, stations = self.entries.len(), "station table grew");
    }

    /// Adds one measurement, creating the station on first sight of `key`.
    #[inline]
    pub fn record(&mut self, key: &'a [u8], hash: u32, value: Tenths) -> EntryId {
        match self.lookup(hash, key) {
            Lookup::Found(id) => {
                self[id].add_measurement(value);
                id
            }
            Lookup::Vacant(slot) => self.insert(slot, Station::new(key, hash, value)),
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&Station<'a>> {
        match self.lookup(fnv1a(key), key) {
            Lookup::Found(id) => Some(&self.entries[id.index()]),
            Lookup::Vacant(_) => None,
        }
    }

    /// Moves every station of `other` into `self`, combining shared keys.
    pub fn merge(&mut self, other: StationTable<'a>) {
        for station in other.entries {
            match self.lookup(station.hash(), station.key()) {
                Lookup::Found(id) => self[id].absorb(&station),
                Lookup::Vacant(slot) => {
                    self.insert(slot, station);
                }
            }
        }
    }

    /// Ends aggregation: sorts the stations by key.
    pub fn into_summary(self) -> Summary<'a> {
        Summary::from_stations(self.entries)
    }
}

impl Default for StationTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Index<EntryId> for StationTable<'a> {
    type Output = Station<'a>;

    fn index(&self, id: EntryId) -> &Self::Output {
        &self.entries[id.index()]
    }
}

impl IndexMut<EntryId> for StationTable<'_> {
    fn index_mut(&mut self, id: EntryId) -> &mut Self::Output {
        &mut self.entries[id.index()]
    }
}
