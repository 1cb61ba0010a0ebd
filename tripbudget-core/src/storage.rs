//! Persisted slots and an in-memory backend.
use crate::KeyValueStorage;
use crate::error::StorageError;
use crate::model::{ItineraryItem, TripDetails};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Slot holding the serialized [`TripDetails`].
pub const TRIP_DETAILS_KEY: &str = "tripDetails";

/// Slot holding the itinerary for a destination.
#[must_use]
pub fn itinerary_key(destination: &str) -> String {
    format!("itineraryItems_{destination}")
}

/// Read the trip record, `None` when the slot is empty.
///
/// # Errors
///
/// Returns an error if the backend fails or the slot does not hold a trip.
pub fn load_trip<S>(storage: &S) -> Result<Option<TripDetails>, StorageError>
where
    S: KeyValueStorage + ?Sized,
{
    storage
        .get_item(TRIP_DETAILS_KEY)?
        .map(|json| TripDetails::from_json(&json))
        .transpose()
        .map_err(StorageError::from)
}

/// Write the trip record.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn save_trip<S>(storage: &S, trip: &TripDetails) -> Result<(), StorageError>
where
    S: KeyValueStorage + ?Sized,
{
    storage.set_item(TRIP_DETAILS_KEY, &serde_json::to_string(trip)?)
}

/// Read a destination's itinerary; an empty slot is an empty list.
///
/// # Errors
///
/// Returns an error if the backend fails or the slot does not hold a list of items.
pub fn load_items<S>(storage: &S, destination: &str) -> Result<Vec<ItineraryItem>, StorageError>
where
    S: KeyValueStorage + ?Sized,
{
    match storage.get_item(&itinerary_key(destination))? {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(Vec::new()),
    }
}

/// Rewrite a destination's itinerary wholesale.
///
/// # Errors
///
/// Returns an error if serialization or the backend write fails.
pub fn save_items<S>(
    storage: &S,
    destination: &str,
    items: &[ItineraryItem],
) -> Result<(), StorageError>
where
    S: KeyValueStorage + ?Sized,
{
    storage.set_item(&itinerary_key(destination), &serde_json::to_string(items)?)
}

/// Shared in-memory slots. Clones see the same data, like two reads of `localStorage`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents of a slot.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}
