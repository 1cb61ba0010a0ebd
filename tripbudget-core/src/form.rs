//! The add-item form and its presence checks.
use crate::catalog::Place;
use crate::error::ItemRejected;
use crate::model::iso_date;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static INT_PREFIX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").ok());

/// Raw text of the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemForm {
    pub place: String,
    pub date: String,
    pub cost: String,
    pub notes: String,
}

/// A validated form, ready to become an itinerary item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub place: String,
    pub date: NaiveDate,
    pub cost: i64,
    pub notes: String,
}

/// Which form field an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Place,
    Date,
    Cost,
    Notes,
}

impl ItemForm {
    /// Check place, date and cost.
    ///
    /// # Errors
    ///
    /// Returns the first failed check, in place, date, cost order.
    pub fn validate(&self) -> Result<NewItem, ItemRejected> {
        let place = self.place.trim();
        if place.is_empty() {
            return Err(ItemRejected::MissingPlace);
        }
        if self.date.trim().is_empty() {
            return Err(ItemRejected::MissingDate);
        }
        let date = iso_date::parse(&self.date).ok_or(ItemRejected::InvalidDate)?;
        let cost = parse_int_prefix(&self.cost).ok_or(ItemRejected::InvalidCost)?;
        Ok(NewItem {
            place: place.to_string(),
            date,
            cost,
            notes: self.notes.clone(),
        })
    }

    /// Fill place and cost from a suggestion; date and notes are kept.
    pub fn prefill(&mut self, place: &Place) {
        self.place.clone_from(&place.name);
        self.cost = place.cost_text();
    }

    pub fn set(&mut self, field: FormField, value: String) {
        match field {
            FormField::Place => self.place = value,
            FormField::Date => self.date = value,
            FormField::Cost => self.cost = value,
            FormField::Notes => self.notes = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Leading-integer parse: `"1200.5"` and `"1200 rupees"` both give 1200.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let re = INT_PREFIX.as_ref()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}
