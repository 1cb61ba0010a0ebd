//! Trip and itinerary records as they are persisted.
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// The fixed parameters of a booked trip. Read once per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub destination: String,
    pub budget: f64,
    #[serde(with = "iso_date")]
    pub start_date: NaiveDate,
    pub duration: u32,
}

impl TripDetails {
    /// Parse a trip record from its persisted JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a trip.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Even split of the budget across the trip, `None` for a zero-day trip.
    #[must_use]
    pub fn budget_per_day(&self) -> Option<f64> {
        (self.duration > 0).then(|| self.budget / f64::from(self.duration))
    }

    /// Calendar date of the 1-based trip day.
    #[must_use]
    pub fn day_date(&self, day: u32) -> Option<NaiveDate> {
        self.start_date
            .checked_add_days(Days::new(u64::from(day.saturating_sub(1))))
    }
}

/// One planned, dated expenditure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: i64,
    pub place: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub cost: i64,
    #[serde(default)]
    pub notes: String,
}

/// `YYYY-MM-DD` dates. Full timestamps are accepted on input and truncated to their date.
pub(crate) mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date '{raw}'")))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        let date_part = trimmed.get(..10).unwrap_or(trimmed);
        NaiveDate::parse_from_str(date_part, FORMAT).ok()
    }
}
