//! Seeded random command sequences against a file-backed itinerary.
use anyhow::{Result, bail, ensure};
use chrono::Duration;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tripbudget_core::storage::load_items;
use tripbudget_core::{
    ItemForm, ItineraryChange, ItineraryCommand, KeyValueStorage, StoreError, TripDetails,
    itinerary_key,
};

use super::planner::{STAMP, open_session, trip_for_seed};
use crate::logic::LogicCtx;

const STEPS: i64 = 60;

fn random_form(rng: &mut ChaCha8Rng, trip: &TripDetails, valid: bool) -> ItemForm {
    let offset = rng.gen_range(0..i64::from(trip.duration.max(1)));
    let mut form = ItemForm {
        place: format!("Stop {}", rng.gen_range(0..1_000)),
        date: (trip.start_date + Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string(),
        cost: rng.gen_range(0..8_000).to_string(),
        notes: String::new(),
    };
    if !valid {
        match rng.gen_range(0..4) {
            0 => form.place = " ".into(),
            1 => form.date.clear(),
            2 => form.date = "31/12/2026".into(),
            _ => form.cost = "n/a".into(),
        }
    }
    form
}

fn next_command(
    rng: &mut ChaCha8Rng,
    trip: &TripDetails,
    ids: &[i64],
    step: i64,
) -> ItineraryCommand {
    match rng.gen_range(0..10) {
        0..=4 => ItineraryCommand::Add(random_form(rng, trip, true)),
        5 | 6 => ItineraryCommand::Add(random_form(rng, trip, false)),
        7 | 8 if !ids.is_empty() => ItineraryCommand::Remove(ids[rng.gen_range(0..ids.len())]),
        _ => ItineraryCommand::Remove(-1 - step),
    }
}

/// After every command: spent equals the item total, rejected or no-op commands
/// leave list and slot untouched, and storage matches memory.
pub fn random_ledger_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("ledger");
    let key = itinerary_key(&trip.destination);
    let mut session = open_session(ctx, &storage, &trip)?;
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed);

    for step in 0..STEPS {
        let before = session.store().items().to_vec();
        let slot_before = storage.get_item(&key)?;
        let ids: Vec<i64> = before.iter().map(|item| item.id).collect();
        let command = next_command(&mut rng, &trip, &ids, step);

        match session.apply(&command, STAMP + step) {
            Ok(ItineraryChange::Added(id)) => {
                ensure!(session.store().len() == before.len() + 1, "step {step}: add lost");
                ensure!(!ids.contains(&id), "step {step}: reused id {id}");
            }
            Ok(ItineraryChange::Removed(id)) => {
                ensure!(session.store().len() + 1 == before.len(), "step {step}: remove lost");
                ensure!(
                    session.store().items().iter().all(|item| item.id != id),
                    "step {step}: {id} still listed"
                );
            }
            Ok(ItineraryChange::Unchanged) | Err(StoreError::Rejected(_)) => {
                ensure!(
                    session.store().items() == before.as_slice(),
                    "step {step}: {command:?} mutated the list"
                );
                ensure!(
                    storage.get_item(&key)? == slot_before,
                    "step {step}: {command:?} rewrote storage"
                );
            }
            Err(err) => bail!("step {step}: storage failed: {err}"),
        }

        let total: i64 = session.store().items().iter().map(|item| item.cost).sum();
        let spent = session.summary().spent;
        ensure!(spent == total, "step {step}: spent {spent} != total {total}");
        #[allow(clippy::cast_precision_loss)]
        let remaining = trip.budget - total as f64;
        ensure!(
            (session.summary().remaining - remaining).abs() < 1e-6,
            "step {step}: remaining drifted"
        );
        let persisted = load_items(&storage, &trip.destination)?;
        ensure!(
            persisted == session.store().items(),
            "step {step}: storage drifted from memory"
        );
    }
    Ok(())
}
