//! Greedy sample plan for an empty itinerary.
use crate::catalog::CityData;
use crate::model::{ItineraryItem, TripDetails};

/// Note attached to every seeded item.
pub const SUGGESTED_NOTE: &str = "Suggested activity.";

/// A place is affordable when it costs less than this share of the per-day budget.
const AFFORDABLE_SHARE: f64 = 0.4;

/// Build a sample plan from the catalog's places in listed order.
///
/// Only affordable places are considered; a place without an estimate never is.
/// Each is scheduled on the current day
/// if the running allowance covers it. The day advances, and the allowance
/// resets, after every second affordable place is processed, whether or not
/// either was scheduled. Stops when the trip runs out of days.
///
/// Ids are `stamp + i` where `i` is the position in the affordable list.
/// Item costs keep the whole-unit part of the estimate.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sample_itinerary(trip: &TripDetails, city: &CityData, stamp: i64) -> Vec<ItineraryItem> {
    let Some(budget_per_day) = trip.budget_per_day() else {
        return Vec::new();
    };
    let threshold = budget_per_day * AFFORDABLE_SHARE;

    let mut items = Vec::new();
    let mut allowance = budget_per_day;
    let mut day = 1_u32;

    let affordable = city.places.iter().filter_map(|place| {
        place
            .estimated_cost
            .filter(|cost| *cost < threshold)
            .map(|cost| (place, cost))
    });

    for (i, (place, cost)) in affordable.enumerate() {
        if day > trip.duration {
            break;
        }
        if allowance >= cost {
            let Some(date) = trip.day_date(day) else {
                break;
            };
            items.push(ItineraryItem {
                id: stamp.saturating_add(i64::try_from(i).unwrap_or(i64::MAX)),
                place: place.name.clone(),
                date,
                cost: cost.trunc() as i64,
                notes: SUGGESTED_NOTE.to_string(),
            });
            allowance -= cost;
        }
        if i % 2 != 0 {
            day += 1;
            allowance = budget_per_day;
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Place;
    use chrono::NaiveDate;

    fn trip(budget: f64, duration: u32) -> TripDetails {
        TripDetails {
            destination: "Goa".into(),
            budget,
            start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            duration,
        }
    }

    fn place(name: &str, cost: i32) -> Place {
        Place {
            name: name.into(),
            kind: "Sight".into(),
            description: String::new(),
            estimated_cost: Some(f64::from(cost)),
        }
    }

    fn city(places: Vec<Place>) -> CityData {
        CityData { places }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 12, 19 + day).unwrap()
    }

    #[test]
    fn single_affordable_place_lands_on_day_one() {
        let items = sample_itinerary(&trip(10_000.0, 3), &city(vec![place("Fort", 500)]), 1_000);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1_000);
        assert_eq!(items[0].date, date(1));
        assert_eq!(items[0].cost, 500);
        assert_eq!(items[0].notes, SUGGESTED_NOTE);
    }

    #[test]
    fn expensive_places_are_skipped_before_pacing() {
        // per day 1000, threshold 400
        let places = vec![
            place("A", 100),
            place("Pricey", 400),
            place("B", 100),
            place("C", 100),
        ];
        let items = sample_itinerary(&trip(3_000.0, 3), &city(places), 0);
        let plan: Vec<_> = items.iter().map(|i| (i.place.as_str(), i.date, i.id)).collect();
        assert_eq!(
            plan,
            vec![("A", date(1), 0), ("B", date(1), 1), ("C", date(2), 2)]
        );
    }

    #[test]
    fn day_advances_after_every_second_place() {
        // per day 1000, threshold 400
        let places = vec![
            place("A", 350),
            place("B", 350),
            place("C", 350),
            place("D", 350),
            place("E", 350),
        ];
        let items = sample_itinerary(&trip(2_000.0, 2), &city(places), 0);
        let names: Vec<_> = items.iter().map(|i| (i.place.as_str(), i.date)).collect();
        assert_eq!(
            names,
            vec![("A", date(1)), ("B", date(1)), ("C", date(2)), ("D", date(2))]
        );
    }

    #[test]
    fn pair_of_places_shares_one_day() {
        let places = vec![place("A", 390), place("B", 390)];
        let items = sample_itinerary(&trip(1_000.0, 1), &city(places), 0);
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|i| i.date == date(1)));
        assert_eq!(items.iter().map(|i| i.cost).sum::<i64>(), 780);
    }

    #[test]
    fn stops_when_days_run_out() {
        let places = (0..10).map(|n| place(&format!("P{n}"), 10)).collect();
        let items = sample_itinerary(&trip(1_000.0, 2), &city(places), 0);
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.date <= date(2)));
    }

    #[test]
    fn zero_day_trip_seeds_nothing() {
        assert!(sample_itinerary(&trip(1_000.0, 0), &city(vec![place("A", 1)]), 0).is_empty());
    }

    #[test]
    fn nothing_affordable_seeds_nothing() {
        let items = sample_itinerary(&trip(100.0, 1), &city(vec![place("A", 40)]), 0);
        assert!(items.is_empty());
    }

    #[test]
    fn unlisted_places_are_never_affordable() {
        let mut free_tour = place("Walking tour", 0);
        free_tour.estimated_cost = None;
        let places = vec![free_tour, place("A", 100)];
        let items = sample_itinerary(&trip(3_000.0, 3), &city(places), 0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].place, "A");
        assert_eq!(items[0].id, 0);
    }

    #[test]
    fn fractional_estimate_seeds_whole_cost() {
        let mut cafe = place("Cafe", 0);
        cafe.estimated_cost = Some(99.5);
        let items = sample_itinerary(&trip(3_000.0, 3), &city(vec![cafe]), 0);
        assert_eq!(items[0].cost, 99);
    }
}
