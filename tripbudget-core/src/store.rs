//! Itinerary store: an ordered list persisted wholesale after every mutation.
use crate::KeyValueStorage;
use crate::catalog::CityData;
use crate::error::{StorageError, StoreError};
use crate::form::ItemForm;
use crate::model::{ItineraryItem, TripDetails};
use crate::seed::sample_itinerary;
use crate::storage::{load_items, save_items};

/// A user action against the itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItineraryCommand {
    Add(ItemForm),
    Remove(i64),
}

/// What a command changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItineraryChange {
    Added(i64),
    Removed(i64),
    Unchanged,
}

/// Items for one destination plus the storage they are saved to.
///
/// Stored order is insertion order; use [`ItineraryStore::sorted_items`] for display.
#[derive(Debug, Clone)]
pub struct ItineraryStore<S> {
    storage: S,
    destination: String,
    items: Vec<ItineraryItem>,
}

impl<S: KeyValueStorage> ItineraryStore<S> {
    /// Load the destination's slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot cannot be read or parsed.
    pub fn open(storage: S, destination: &str) -> Result<Self, StorageError> {
        let items = load_items(&storage, destination)?;
        Ok(Self::from_items(storage, destination, items))
    }

    /// Wrap already-loaded items without touching storage.
    #[must_use]
    pub fn from_items(storage: S, destination: &str, items: Vec<ItineraryItem>) -> Self {
        Self {
            storage,
            destination: destination.to_string(),
            items,
        }
    }

    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    #[must_use]
    pub fn items(&self) -> &[ItineraryItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Items by date ascending; same-day items keep insertion order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&ItineraryItem> {
        let mut sorted: Vec<&ItineraryItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| item.date);
        sorted
    }

    #[must_use]
    pub fn total_spent(&self) -> i64 {
        self.items.iter().map(|item| item.cost).sum()
    }

    /// Validate the form and append a new item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Rejected`] for invalid input and [`StoreError::Storage`]
    /// if the write fails. The list is unchanged in both cases.
    pub fn add(&mut self, form: &ItemForm, stamp: i64) -> Result<&ItineraryItem, StoreError> {
        let new_item = form.validate().inspect_err(|rejected| {
            log::warn!("add rejected: {rejected}");
        })?;
        let id = self.next_id(stamp);
        self.items.push(ItineraryItem {
            id,
            place: new_item.place,
            date: new_item.date,
            cost: new_item.cost,
            notes: new_item.notes,
        });
        if let Err(err) = self.persist() {
            self.items.pop();
            return Err(err.into());
        }
        log::debug!("added item {id} to {}", self.destination);
        let index = self.items.len() - 1;
        Ok(&self.items[index])
    }

    /// Drop the item with `id`. Returns `false`, without writing, if no item has it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the item is restored.
    pub fn remove(&mut self, id: i64) -> Result<bool, StorageError> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            log::debug!("remove ignored, no item {id}");
            return Ok(false);
        };
        let removed = self.items.remove(index);
        if let Err(err) = self.persist() {
            self.items.insert(index, removed);
            return Err(err);
        }
        log::debug!("removed item {id} from {}", self.destination);
        Ok(true)
    }

    /// Fill an empty store with the sample plan. Populated stores are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the store stays empty.
    pub fn seed(
        &mut self,
        trip: &TripDetails,
        city: Option<&CityData>,
        stamp: i64,
    ) -> Result<usize, StorageError> {
        if !self.items.is_empty() {
            return Ok(0);
        }
        let Some(city) = city.filter(|city| city.has_places()) else {
            return Ok(0);
        };
        let seeded = sample_itinerary(trip, city, stamp);
        if seeded.is_empty() {
            return Ok(0);
        }
        self.items = seeded;
        if let Err(err) = self.persist() {
            self.items.clear();
            return Err(err);
        }
        log::info!(
            "seeded {} suggested items for {}",
            self.items.len(),
            self.destination
        );
        Ok(self.items.len())
    }

    /// Apply a user command.
    ///
    /// # Errors
    ///
    /// See [`ItineraryStore::add`] and [`ItineraryStore::remove`].
    pub fn apply(
        &mut self,
        command: &ItineraryCommand,
        stamp: i64,
    ) -> Result<ItineraryChange, StoreError> {
        match command {
            ItineraryCommand::Add(form) => {
                let id = self.add(form, stamp)?.id;
                Ok(ItineraryChange::Added(id))
            }
            ItineraryCommand::Remove(id) => Ok(if self.remove(*id)? {
                ItineraryChange::Removed(*id)
            } else {
                ItineraryChange::Unchanged
            }),
        }
    }

    fn next_id(&self, stamp: i64) -> i64 {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(stamp, |max| stamp.max(max.saturating_add(1)))
    }

    fn persist(&self) -> Result<(), StorageError> {
        save_items(&self.storage, &self.destination, &self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Place;
    use crate::error::ItemRejected;
    use crate::storage::{MemoryStorage, itinerary_key};
    use chrono::NaiveDate;

    fn form(place: &str, date: &str, cost: &str) -> ItemForm {
        ItemForm {
            place: place.into(),
            date: date.into(),
            cost: cost.into(),
            notes: String::new(),
        }
    }

    fn trip() -> TripDetails {
        TripDetails {
            destination: "Goa".into(),
            budget: 10_000.0,
            start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            duration: 3,
        }
    }

    fn city() -> CityData {
        CityData {
            places: vec![Place {
                name: "Fort Aguada".into(),
                kind: "Fort".into(),
                description: String::new(),
                estimated_cost: Some(500.0),
            }],
        }
    }

    /// Storage whose writes always fail.
    #[derive(Debug, Clone, Default)]
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }

        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn add_persists_full_list() {
        let storage = MemoryStorage::new();
        let mut store = ItineraryStore::open(storage.clone(), "Goa").unwrap();
        store.add(&form("Beach", "2026-12-21", "300"), 10).unwrap();
        store.add(&form("Fort", "2026-12-20", "200"), 11).unwrap();

        let reloaded = ItineraryStore::open(storage, "Goa").unwrap();
        assert_eq!(reloaded.items(), store.items());
        assert_eq!(reloaded.total_spent(), 500);
    }

    #[test]
    fn invalid_add_leaves_list_and_slot_untouched() {
        let storage = MemoryStorage::new();
        let mut store = ItineraryStore::open(storage.clone(), "Goa").unwrap();
        let err = store.add(&form("", "2026-12-21", "300"), 1).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(ItemRejected::MissingPlace)));
        let err = store.add(&form("Beach", "2026-12-21", "lots"), 1).unwrap_err();
        assert!(matches!(err, StoreError::Rejected(ItemRejected::InvalidCost)));
        assert!(store.is_empty());
        assert!(storage.raw(&itinerary_key("Goa")).is_none());
    }

    #[test]
    fn ids_stay_unique_with_repeated_stamps() {
        let mut store = ItineraryStore::open(MemoryStorage::new(), "Goa").unwrap();
        let a = store.add(&form("A", "2026-12-21", "1"), 100).unwrap().id;
        let b = store.add(&form("B", "2026-12-21", "1"), 100).unwrap().id;
        let c = store.add(&form("C", "2026-12-21", "1"), 50).unwrap().id;
        assert_eq!((a, b, c), (100, 101, 102));
    }

    #[test]
    fn remove_missing_id_is_a_no_op() {
        let storage = MemoryStorage::new();
        let mut store = ItineraryStore::open(storage.clone(), "Goa").unwrap();
        store.add(&form("A", "2026-12-21", "1"), 1).unwrap();
        let before = storage.raw(&itinerary_key("Goa"));
        assert!(!store.remove(999).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(storage.raw(&itinerary_key("Goa")), before);
        assert!(store.remove(1).unwrap());
        assert!(store.is_empty());
        assert_eq!(storage.raw(&itinerary_key("Goa")).as_deref(), Some("[]"));
    }

    #[test]
    fn sorted_items_orders_by_date_but_storage_keeps_insertion() {
        let mut store = ItineraryStore::open(MemoryStorage::new(), "Goa").unwrap();
        store.add(&form("Late", "2026-12-22", "1"), 1).unwrap();
        store.add(&form("Early", "2026-12-20", "1"), 2).unwrap();
        store.add(&form("Late too", "2026-12-22", "1"), 3).unwrap();
        let sorted: Vec<_> = store.sorted_items().iter().map(|i| i.place.as_str()).collect();
        assert_eq!(sorted, vec!["Early", "Late", "Late too"]);
        assert_eq!(store.items()[0].place, "Late");
    }

    #[test]
    fn seed_only_fills_empty_store() {
        let storage = MemoryStorage::new();
        let mut store = ItineraryStore::open(storage.clone(), "Goa").unwrap();
        assert_eq!(store.seed(&trip(), Some(&city()), 77).unwrap(), 1);
        assert_eq!(store.items()[0].id, 77);
        assert!(storage.raw(&itinerary_key("Goa")).is_some());
        assert_eq!(store.seed(&trip(), Some(&city()), 99).unwrap(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn seed_without_city_does_nothing() {
        let mut store = ItineraryStore::open(MemoryStorage::new(), "Goa").unwrap();
        assert_eq!(store.seed(&trip(), None, 1).unwrap(), 0);
        assert_eq!(store.seed(&trip(), Some(&CityData::default()), 1).unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn apply_reports_changes() {
        let mut store = ItineraryStore::open(MemoryStorage::new(), "Goa").unwrap();
        let change = store
            .apply(&ItineraryCommand::Add(form("A", "2026-12-21", "10")), 5)
            .unwrap();
        assert_eq!(change, ItineraryChange::Added(5));
        assert_eq!(
            store.apply(&ItineraryCommand::Remove(6), 0).unwrap(),
            ItineraryChange::Unchanged
        );
        assert_eq!(
            store.apply(&ItineraryCommand::Remove(5), 0).unwrap(),
            ItineraryChange::Removed(5)
        );
    }

    #[test]
    fn failed_writes_roll_back() {
        let mut store = ItineraryStore::from_items(
            ReadOnlyStorage,
            "Goa",
            vec![ItineraryItem {
                id: 1,
                place: "A".into(),
                date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
                cost: 10,
                notes: String::new(),
            }],
        );
        assert!(matches!(
            store.add(&form("B", "2026-12-21", "1"), 2),
            Err(StoreError::Storage(_))
        ));
        assert!(store.remove(1).is_err());
        assert_eq!(store.len(), 1);

        let mut empty = ItineraryStore::from_items(ReadOnlyStorage, "Goa", Vec::new());
        assert!(empty.seed(&trip(), Some(&city()), 1).is_err());
        assert!(empty.is_empty());
    }
}
