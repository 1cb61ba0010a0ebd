//! Error types shared by the planner crates.

/// Shown when the add-item form is missing a place, a date or a numeric cost.
pub const ADD_ITEM_WARNING: &str = "Please fill in the place, date, and cost.";
/// Shown when the catalog cannot be fetched or parsed.
pub const CATALOG_UNAVAILABLE_MESSAGE: &str =
    "Error: Could not load city information. Please try again later.";
/// Shown before redirecting to the landing page when no trip is stored.
pub const NO_TRIP_MESSAGE: &str = "No trip data found! Redirecting to homepage.";

/// Failures reading or writing a persisted slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Backend(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures producing the destination catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("Network error: {0}")]
    Network(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Catalog file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an add-item form was refused. The stored list is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ItemRejected {
    #[error("place is required")]
    MissingPlace,
    #[error("date is required")]
    MissingDate,
    #[error("date is not a calendar date")]
    InvalidDate,
    #[error("cost is not a number")]
    InvalidCost,
}

impl ItemRejected {
    /// Warning presented to the user; identical for every rejection.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        ADD_ITEM_WARNING
    }
}

/// Failures applying a command to the itinerary store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("item rejected: {0}")]
    Rejected(#[from] ItemRejected),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Terminal startup failures.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("no trip data found")]
    NoTrip,
    #[error("city information unavailable: {0}")]
    CatalogUnavailable(#[from] CatalogError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PlannerError {
    /// Alert text for the failure.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NoTrip => NO_TRIP_MESSAGE,
            Self::CatalogUnavailable(_) => CATALOG_UNAVAILABLE_MESSAGE,
            Self::Storage(_) => "Error: Could not read your saved trip. Please try again later.",
        }
    }
}
