//! A loaded trip: details, catalog entry and itinerary store.
use crate::KeyValueStorage;
use crate::catalog::{Catalog, CityData, Place};
use crate::error::{PlannerError, StorageError, StoreError};
use crate::form::ItemForm;
use crate::model::{ItineraryItem, TripDetails};
use crate::storage::{load_items, load_trip};
use crate::store::{ItineraryChange, ItineraryCommand, ItineraryStore};
use crate::summary::{BudgetSummary, DayProgress};
use chrono::NaiveDate;

/// Everything the page needs after startup.
#[derive(Debug, Clone)]
pub struct PlannerSession<S> {
    trip: TripDetails,
    city: Option<CityData>,
    store: ItineraryStore<S>,
    seeded: usize,
}

/// Run startup against an already-loaded catalog.
///
/// Reads the trip, looks up its destination, loads the itinerary and seeds it
/// if it is empty. An unreadable trip record counts as no trip. An unreadable
/// itinerary shows as empty but is not seeded, so its slot is left untouched
/// until the user changes something.
///
/// # Errors
///
/// Returns [`PlannerError::NoTrip`] when no usable trip is stored, or a storage
/// error if the backend itself fails.
pub fn bootstrap<S: KeyValueStorage>(
    storage: S,
    catalog: &Catalog,
    stamp: i64,
) -> Result<PlannerSession<S>, PlannerError> {
    let trip = match load_trip(&storage) {
        Ok(Some(trip)) => trip,
        Ok(None) => return Err(PlannerError::NoTrip),
        Err(StorageError::Serialization(err)) => {
            log::warn!("stored trip is unreadable: {err}");
            return Err(PlannerError::NoTrip);
        }
        Err(err) => return Err(err.into()),
    };

    let city = catalog.lookup(&trip.destination).cloned();
    if city.is_none() {
        log::info!("no catalog entry for {}", trip.destination);
    }

    let (items, readable) = match load_items(&storage, &trip.destination) {
        Ok(items) => (items, true),
        Err(StorageError::Serialization(err)) => {
            log::warn!("stored itinerary for {} is unreadable: {err}", trip.destination);
            (Vec::new(), false)
        }
        Err(err) => return Err(err.into()),
    };

    let mut store = ItineraryStore::from_items(storage, &trip.destination, items);
    let seeded = if readable {
        store.seed(&trip, city.as_ref(), stamp)?
    } else {
        0
    };

    Ok(PlannerSession {
        trip,
        city,
        store,
        seeded,
    })
}

impl<S: KeyValueStorage> PlannerSession<S> {
    #[must_use]
    pub const fn trip(&self) -> &TripDetails {
        &self.trip
    }

    #[must_use]
    pub const fn city(&self) -> Option<&CityData> {
        self.city.as_ref()
    }

    #[must_use]
    pub const fn store(&self) -> &ItineraryStore<S> {
        &self.store
    }

    /// How many items startup seeded; zero for a populated itinerary.
    #[must_use]
    pub const fn seeded_count(&self) -> usize {
        self.seeded
    }

    #[must_use]
    pub fn title(&self) -> String {
        format!("Your Trip to {}", self.trip.destination)
    }

    /// Suggestion cards for the destination, empty when the catalog has none.
    #[must_use]
    pub fn suggestions(&self) -> &[Place] {
        self.city
            .as_ref()
            .map(|city| city.places.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn sorted_items(&self) -> Vec<&ItineraryItem> {
        self.store.sorted_items()
    }

    #[must_use]
    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary::compute(&self.trip, self.store.items())
    }

    #[must_use]
    pub fn day_progress(&self, today: NaiveDate) -> DayProgress {
        DayProgress::compute(&self.trip, today)
    }

    /// Apply a user command and persist.
    ///
    /// # Errors
    ///
    /// Returns the store's rejection or storage failure.
    pub fn apply(
        &mut self,
        command: &ItineraryCommand,
        stamp: i64,
    ) -> Result<ItineraryChange, StoreError> {
        self.store.apply(command, stamp)
    }

    /// Shorthand for [`ItineraryCommand::Add`].
    ///
    /// # Errors
    ///
    /// Returns the store's rejection or storage failure.
    pub fn add(&mut self, form: &ItemForm, stamp: i64) -> Result<ItineraryChange, StoreError> {
        self.apply(&ItineraryCommand::Add(form.clone()), stamp)
    }

    /// Shorthand for [`ItineraryCommand::Remove`].
    ///
    /// # Errors
    ///
    /// Returns the store's storage failure.
    pub fn remove(&mut self, id: i64) -> Result<ItineraryChange, StoreError> {
        self.apply(&ItineraryCommand::Remove(id), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, TRIP_DETAILS_KEY, itinerary_key, save_trip};

    const CATALOG: &str = r#"{
        "goa": {"places": [
            {"name": "Fort Aguada", "type": "Fort", "description": "Old fort", "estimatedCost": 500}
        ]}
    }"#;

    fn trip() -> TripDetails {
        TripDetails {
            destination: "Goa".into(),
            budget: 10_000.0,
            start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            duration: 3,
        }
    }

    fn storage_with_trip() -> MemoryStorage {
        let storage = MemoryStorage::new();
        save_trip(&storage, &trip()).unwrap();
        storage
    }

    #[test]
    fn missing_trip_is_reported() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let err = bootstrap(MemoryStorage::new(), &catalog, 0).unwrap_err();
        assert!(matches!(err, PlannerError::NoTrip));
    }

    #[test]
    fn unreadable_trip_counts_as_missing() {
        let storage = MemoryStorage::new();
        storage.set_item(TRIP_DETAILS_KEY, "null-ish").unwrap();
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert!(matches!(
            bootstrap(storage, &catalog, 0),
            Err(PlannerError::NoTrip)
        ));
    }

    #[test]
    fn first_load_seeds_from_case_insensitive_match() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let session = bootstrap(storage_with_trip(), &catalog, 1_000).unwrap();
        assert_eq!(session.title(), "Your Trip to Goa");
        assert_eq!(session.seeded_count(), 1);
        assert_eq!(session.suggestions().len(), 1);
        let item = &session.store().items()[0];
        assert_eq!(item.place, "Fort Aguada");
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2026, 12, 20).unwrap());
        assert_eq!(session.summary().spent, 500);
    }

    #[test]
    fn reload_of_populated_itinerary_does_not_seed() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let storage = storage_with_trip();
        let mut first = bootstrap(storage.clone(), &catalog, 1_000).unwrap();
        first
            .add(
                &ItemForm {
                    place: "Spice farm".into(),
                    date: "2026-12-21".into(),
                    cost: "800".into(),
                    notes: String::new(),
                },
                2_000,
            )
            .unwrap();

        let second = bootstrap(storage, &catalog, 3_000).unwrap();
        assert_eq!(second.seeded_count(), 0);
        assert_eq!(second.store().len(), 2);
        assert_eq!(second.summary().spent, 1_300);
    }

    #[test]
    fn unknown_destination_has_no_suggestions() {
        let catalog = Catalog::default();
        let session = bootstrap(storage_with_trip(), &catalog, 0).unwrap();
        assert!(session.suggestions().is_empty());
        assert_eq!(session.seeded_count(), 0);
        assert!(session.store().is_empty());
    }

    #[test]
    fn unreadable_itinerary_is_not_seeded_over() {
        let storage = storage_with_trip();
        let raw = r#"[{"id":1,"place":"My hotel","date":"2026-12-20","cost":4000.5,"notes":""}]"#;
        storage.set_item(&itinerary_key("Goa"), raw).unwrap();
        let catalog = Catalog::from_json(CATALOG).unwrap();

        let session = bootstrap(storage.clone(), &catalog, 0).unwrap();
        assert_eq!(session.seeded_count(), 0);
        assert!(session.store().is_empty());
        assert_eq!(storage.raw(&itinerary_key("Goa")).as_deref(), Some(raw));

        let again = bootstrap(storage.clone(), &catalog, 5).unwrap();
        assert_eq!(again.seeded_count(), 0);
        assert_eq!(storage.raw(&itinerary_key("Goa")).as_deref(), Some(raw));
    }
}
