//! Tripbudget Engine
//!
//! Platform-agnostic core of the Tripbudget trip-budgeting widget: trip and
//! itinerary records, the destination catalog, the persisted itinerary store,
//! sample-plan seeding, and the derived budget and day summaries.
//! This crate has no UI or browser dependencies.

pub mod catalog;
pub mod error;
pub mod format;
pub mod form;
pub mod model;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod summary;

pub use catalog::{Catalog, CityData, Place};
pub use error::{
    ADD_ITEM_WARNING, CATALOG_UNAVAILABLE_MESSAGE, CatalogError, ItemRejected, NO_TRIP_MESSAGE,
    PlannerError, StorageError, StoreError,
};
pub use format::{fmt_cost, fmt_currency, fmt_long_date};
pub use form::{FormField, ItemForm, NewItem};
pub use model::{ItineraryItem, TripDetails};
pub use seed::{SUGGESTED_NOTE, sample_itinerary};
pub use session::{PlannerSession, bootstrap};
pub use storage::{MemoryStorage, TRIP_DETAILS_KEY, itinerary_key};
pub use store::{ItineraryChange, ItineraryCommand, ItineraryStore};
pub use summary::{BudgetSummary, DayProgress};

/// Source of the destination catalog.
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    /// Load the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    fn load_catalog(&self) -> Result<Catalog, CatalogError>;
}

impl CatalogSource for Catalog {
    fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Ok(self.clone())
    }
}

/// String slots keyed by name, in the shape of browser `localStorage`.
/// Platform-specific implementations should provide this
pub trait KeyValueStorage {
    /// Read a slot, `None` when it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Clear a slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the removal.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Entry point pairing a catalog source with a storage backend.
pub struct TripPlanner<C, S>
where
    C: CatalogSource,
    S: KeyValueStorage,
{
    catalog_source: C,
    storage: S,
}

impl<C, S> TripPlanner<C, S>
where
    C: CatalogSource,
    S: KeyValueStorage + Clone,
{
    pub const fn new(catalog_source: C, storage: S) -> Self {
        Self {
            catalog_source,
            storage,
        }
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Store the trip record the page will load.
    ///
    /// # Errors
    ///
    /// Returns an error if the trip cannot be saved.
    pub fn book_trip(&self, trip: &TripDetails) -> Result<(), StorageError> {
        storage::save_trip(&self.storage, trip)
    }

    /// Load the catalog, then run [`bootstrap`].
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::CatalogUnavailable`] before touching storage if the
    /// catalog fails, otherwise whatever [`bootstrap`] returns.
    pub fn open_session(&self, stamp: i64) -> Result<PlannerSession<S>, PlannerError> {
        let catalog = self.catalog_source.load_catalog().inspect_err(|err| {
            log::error!("Could not fetch city data: {err}");
        })?;
        bootstrap(self.storage.clone(), &catalog, stamp)
    }
}
