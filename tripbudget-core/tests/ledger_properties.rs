use chrono::NaiveDate;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tripbudget_core::{
    BudgetSummary, DayProgress, ItemForm, ItineraryChange, ItineraryCommand, ItineraryStore,
    MemoryStorage, StoreError, TripDetails, itinerary_key,
};

fn trip(duration: u32) -> TripDetails {
    TripDetails {
        destination: "Goa".into(),
        budget: 25_000.0,
        start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
        duration,
    }
}

fn random_form(rng: &mut ChaCha8Rng, valid: bool) -> ItemForm {
    let day = rng.gen_range(20..=28);
    let mut form = ItemForm {
        place: format!("Stop {}", rng.gen_range(0..1_000)),
        date: format!("2026-12-{day}"),
        cost: rng.gen_range(0..5_000).to_string(),
        notes: String::new(),
    };
    if !valid {
        match rng.gen_range(0..3) {
            0 => form.place.clear(),
            1 => form.date.clear(),
            _ => form.cost = "n/a".into(),
        }
    }
    form
}

#[test]
fn spent_always_equals_sum_of_remaining_items() {
    for seed in [1_u64, 7, 1337, 90_210] {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let storage = MemoryStorage::new();
        let mut store = ItineraryStore::open(storage.clone(), "Goa").unwrap();
        let trip = trip(5);

        for step in 0..200_i64 {
            let before = store.items().to_vec();
            let slot_before = storage.raw(&itinerary_key("Goa"));
            let roll = rng.gen_range(0..10);
            let command = if roll < 5 {
                ItineraryCommand::Add(random_form(&mut rng, true))
            } else if roll < 7 {
                ItineraryCommand::Add(random_form(&mut rng, false))
            } else if roll < 9 && !before.is_empty() {
                let idx = rng.gen_range(0..before.len());
                ItineraryCommand::Remove(before[idx].id)
            } else {
                ItineraryCommand::Remove(-1 - step)
            };

            match store.apply(&command, 1_700_000_000_000 + step) {
                Ok(ItineraryChange::Added(_)) => assert_eq!(store.len(), before.len() + 1),
                Ok(ItineraryChange::Removed(_)) => assert_eq!(store.len(), before.len() - 1),
                Ok(ItineraryChange::Unchanged) => {
                    assert_eq!(store.items(), before.as_slice());
                    assert_eq!(storage.raw(&itinerary_key("Goa")), slot_before);
                }
                Err(StoreError::Rejected(_)) => {
                    assert_eq!(store.items(), before.as_slice());
                    assert_eq!(storage.raw(&itinerary_key("Goa")), slot_before);
                }
                Err(err) => panic!("memory storage should not fail: {err}"),
            }

            let expected: i64 = store.items().iter().map(|item| item.cost).sum();
            assert_eq!(BudgetSummary::compute(&trip, store.items()).spent, expected);

            let reloaded = ItineraryStore::open(storage.clone(), "Goa").unwrap();
            assert_eq!(reloaded.items(), store.items());
        }
    }
}

#[test]
fn ids_are_unique_across_a_session() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut store = ItineraryStore::open(MemoryStorage::new(), "Goa").unwrap();
    for _ in 0..100 {
        let form = random_form(&mut rng, true);
        store.add(&form, 5).unwrap();
    }
    let mut ids: Vec<i64> = store.items().iter().map(|item| item.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn day_progress_is_clamped_for_any_today() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for duration in 1..=14 {
        let trip = trip(duration);
        for _ in 0..50 {
            let offset = rng.gen_range(-400_i64..400);
            let today = trip.start_date + chrono::Duration::days(offset);
            let progress = DayProgress::compute(&trip, today);
            assert!((1..=duration).contains(&progress.elapsed), "{progress:?}");
        }
    }
}
