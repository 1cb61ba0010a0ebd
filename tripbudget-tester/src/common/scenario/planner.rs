//! Deterministic checks of the planner flow against file-backed storage.
use anyhow::{Context, Result, ensure};
use chrono::{Duration, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use tripbudget_core::storage::load_items;
use tripbudget_core::{
    ADD_ITEM_WARNING, CATALOG_UNAVAILABLE_MESSAGE, Catalog, DayProgress, ItemForm,
    ItineraryChange, KeyValueStorage, NO_TRIP_MESSAGE, PlannerError, PlannerSession,
    SUGGESTED_NOTE, StoreError, TripDetails, TripPlanner, itinerary_key, sample_itinerary,
};

use crate::logic::{FileCatalog, FileStorage, LogicCtx};

/// Id stamp used for every session a check opens.
pub const STAMP: i64 = 1_790_000_000_000;

/// A trip derived from `seed`: destination from the catalog, budget, length and start date.
pub fn trip_for_seed(catalog: &Catalog, seed: u64) -> Result<TripDetails> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let destinations: Vec<&str> = catalog.destinations().collect();
    let destination = if destinations.is_empty() {
        "Nowhere".to_string()
    } else {
        destinations[rng.gen_range(0..destinations.len())].to_string()
    };
    let first_start = NaiveDate::from_ymd_opt(2026, 10, 1).context("base start date")?;
    Ok(TripDetails {
        destination,
        budget: f64::from(rng.gen_range(5_u32..=60) * 1_000),
        start_date: first_start + Duration::days(rng.gen_range(0..90)),
        duration: rng.gen_range(1..=7),
    })
}

/// Book `trip` into `storage` and run startup against the context's catalog.
pub fn open_session(
    ctx: &LogicCtx<'_>,
    storage: &FileStorage,
    trip: &TripDetails,
) -> Result<PlannerSession<FileStorage>> {
    let planner = TripPlanner::new(ctx.catalog.clone(), storage.clone());
    planner.book_trip(trip).context("booking trip")?;
    planner.open_session(STAMP).context("opening session")
}

fn reopen(ctx: &LogicCtx<'_>, storage: &FileStorage) -> Result<PlannerSession<FileStorage>> {
    let fresh = FileStorage::new(storage.path());
    TripPlanner::new(ctx.catalog.clone(), fresh)
        .open_session(STAMP)
        .context("reopening session")
}

fn expected_seed(ctx: &LogicCtx<'_>, trip: &TripDetails) -> Vec<tripbudget_core::ItineraryItem> {
    ctx.catalog
        .lookup(&trip.destination)
        .map(|city| sample_itinerary(trip, city, STAMP))
        .unwrap_or_default()
}

fn form_for(trip: &TripDetails, place: &str, day_offset: i64, cost: i64) -> ItemForm {
    let date = trip.start_date + Duration::days(day_offset);
    ItemForm {
        place: place.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        cost: cost.to_string(),
        notes: String::new(),
    }
}

fn spent_matches_items(session: &PlannerSession<FileStorage>) -> Result<()> {
    let sum: i64 = session.store().items().iter().map(|item| item.cost).sum();
    let spent = session.summary().spent;
    ensure!(spent == sum, "spent {spent} differs from item total {sum}");
    Ok(())
}

fn slot(storage: &FileStorage, trip: &TripDetails) -> Result<Option<String>> {
    Ok(storage.get_item(&itinerary_key(&trip.destination))?)
}

pub fn seeding_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("seeding");
    let session = open_session(ctx, &storage, &trip)?;
    let expected = expected_seed(ctx, &trip);

    ensure!(
        session.store().items() == expected.as_slice(),
        "seeded {} items, expected {}",
        session.store().len(),
        expected.len()
    );
    ensure!(session.seeded_count() == expected.len(), "seeded count mismatch");
    let persisted = load_items(&storage, &trip.destination)?;
    ensure!(persisted == expected, "seeded plan was not persisted");

    let per_day = trip.budget_per_day().unwrap_or(0.0);
    let mut per_date: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for item in &expected {
        ensure!(item.notes == SUGGESTED_NOTE, "seeded note {:?}", item.notes);
        #[allow(clippy::cast_precision_loss)]
        let cost = item.cost as f64;
        ensure!(cost < per_day * 0.4, "{} is not affordable", item.place);
        let offset = (item.date - trip.start_date).num_days();
        ensure!(
            (0..i64::from(trip.duration)).contains(&offset),
            "{} scheduled outside the trip",
            item.place
        );
        *per_date.entry(item.date).or_default() += 1;
    }
    ensure!(
        per_date.values().all(|&count| count <= 2),
        "more than two seeded items on one day"
    );
    spent_matches_items(&session)
}

pub fn add_remove_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("add-remove");
    let mut session = open_session(ctx, &storage, &trip)?;
    let mut rng = ChaCha8Rng::seed_from_u64(ctx.seed ^ 0x5eed);

    let mut added = Vec::new();
    for n in 0..3_i64 {
        let before = session.summary().spent;
        let cost = rng.gen_range(0..5_000);
        let offset = rng.gen_range(0..i64::from(trip.duration.max(1)));
        let change = session.add(&form_for(&trip, &format!("Stop {n}"), offset, cost), STAMP + n)?;
        let ItineraryChange::Added(id) = change else {
            anyhow::bail!("add reported {change:?}");
        };
        ensure!(session.summary().spent == before + cost, "spent did not grow by {cost}");
        added.push((id, cost));
    }

    let (middle, middle_cost) = added[1];
    let before = session.summary().spent;
    ensure!(
        session.remove(middle)? == ItineraryChange::Removed(middle),
        "remove of {middle} did not report removal"
    );
    ensure!(
        session.summary().spent == before - middle_cost,
        "spent did not shrink by {middle_cost}"
    );

    let raw_before = slot(&storage, &trip)?;
    ensure!(
        session.remove(middle)? == ItineraryChange::Unchanged,
        "second remove of {middle} changed the itinerary"
    );
    ensure!(slot(&storage, &trip)? == raw_before, "no-op remove rewrote storage");

    let mut ids: Vec<i64> = session.store().items().iter().map(|item| item.id).collect();
    ids.sort_unstable();
    ids.dedup();
    ensure!(ids.len() == session.store().len(), "duplicate item ids");

    let persisted = load_items(&storage, &trip.destination)?;
    ensure!(persisted == session.store().items(), "storage drifted from memory");
    spent_matches_items(&session)
}

pub fn invalid_input_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("invalid-input");
    let mut session = open_session(ctx, &storage, &trip)?;

    let valid = form_for(&trip, "Museum", 0, 300);
    let rejected = [
        ItemForm {
            place: "   ".into(),
            ..valid.clone()
        },
        ItemForm {
            date: String::new(),
            ..valid.clone()
        },
        ItemForm {
            date: "someday".into(),
            ..valid.clone()
        },
        ItemForm {
            cost: String::new(),
            ..valid.clone()
        },
        ItemForm {
            cost: "free".into(),
            ..valid.clone()
        },
    ];

    for form in &rejected {
        let items_before = session.store().items().to_vec();
        let raw_before = slot(&storage, &trip)?;
        match session.add(form, STAMP) {
            Err(StoreError::Rejected(reason)) => ensure!(
                reason.user_message() == ADD_ITEM_WARNING,
                "unexpected warning for {form:?}"
            ),
            other => anyhow::bail!("{form:?} was not rejected: {other:?}"),
        }
        ensure!(session.store().items() == items_before.as_slice(), "rejected add mutated list");
        ensure!(slot(&storage, &trip)? == raw_before, "rejected add wrote storage");
    }

    for (raw, cost) in [("1200 rupees", 1200), ("99.9", 99), (" 42", 42)] {
        let form = ItemForm {
            cost: raw.into(),
            ..valid.clone()
        };
        session.add(&form, STAMP)?;
        let last = session.store().items().last().context("item just added")?;
        ensure!(last.cost == cost, "{raw:?} parsed as {}, expected {cost}", last.cost);
    }
    spent_matches_items(&session)
}

pub fn day_progress_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let duration = trip.duration;
    let cases = [
        (-5, 1),
        (0, 1),
        (i64::from(duration) - 1, duration),
        (i64::from(duration) + 3, duration),
    ];
    for (offset, elapsed) in cases {
        let today = trip.start_date + Duration::days(offset);
        let progress = DayProgress::compute(&trip, today);
        ensure!(
            progress.elapsed == elapsed,
            "offset {offset}: day {} of {duration}, expected {elapsed}",
            progress.elapsed
        );
        ensure!(
            progress.label() == format!("Day {elapsed} of {duration}"),
            "label {}",
            progress.label()
        );
        ensure!(
            (0.0..=100.0).contains(&progress.percent),
            "percent {} out of range",
            progress.percent
        );
    }
    Ok(())
}

pub fn reload_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("reload");
    let mut session = open_session(ctx, &storage, &trip)?;
    session.add(&form_for(&trip, "Dinner", 0, 800), STAMP)?;
    let items = session.store().items().to_vec();

    let reopened = reopen(ctx, &storage)?;
    ensure!(reopened.seeded_count() == 0, "populated itinerary was reseeded");
    ensure!(reopened.store().items() == items.as_slice(), "reload lost items");

    let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
    for id in ids {
        session.remove(id)?;
    }
    ensure!(session.store().is_empty(), "itinerary not emptied");

    let reseeded = reopen(ctx, &storage)?;
    let expected = expected_seed(ctx, &trip);
    ensure!(
        reseeded.store().items() == expected.as_slice(),
        "emptied itinerary reloaded with {} items, expected {}",
        reseeded.store().len(),
        expected.len()
    );

    let unreadable = r#"[{"id":1,"place":"Hotel","date":"2026-10-01","cost":1.5,"notes":""}]"#;
    storage.set_item(&itinerary_key(&trip.destination), unreadable)?;
    let guarded = reopen(ctx, &storage)?;
    ensure!(
        guarded.seeded_count() == 0 && guarded.store().is_empty(),
        "unreadable itinerary was seeded over"
    );
    ensure!(
        slot(&storage, &trip)?.as_deref() == Some(unreadable),
        "unreadable itinerary slot was rewritten on load"
    );
    Ok(())
}

pub fn catalog_failure_check(ctx: &LogicCtx<'_>) -> Result<()> {
    let trip = trip_for_seed(ctx.catalog, ctx.seed)?;
    let storage = ctx.storage("catalog-failure");
    let planner = TripPlanner::new(
        FileCatalog::new(ctx.workdir.join("missing-catalog.json")),
        storage.clone(),
    );
    planner.book_trip(&trip)?;
    match planner.open_session(STAMP) {
        Err(err @ PlannerError::CatalogUnavailable(_)) => ensure!(
            err.user_message() == CATALOG_UNAVAILABLE_MESSAGE,
            "unexpected alert {:?}",
            err.user_message()
        ),
        Err(err) => anyhow::bail!("expected catalog failure, got {err}"),
        Ok(_) => anyhow::bail!("session opened without a catalog"),
    }
    ensure!(slot(&storage, &trip)?.is_none(), "catalog failure touched the itinerary");

    let unbooked = ctx.storage("no-trip");
    match TripPlanner::new(ctx.catalog.clone(), unbooked).open_session(STAMP) {
        Err(err @ PlannerError::NoTrip) => ensure!(
            err.user_message() == NO_TRIP_MESSAGE,
            "unexpected alert {:?}",
            err.user_message()
        ),
        Err(err) => anyhow::bail!("expected missing trip, got {err}"),
        Ok(_) => anyhow::bail!("session opened without a trip"),
    }
    Ok(())
}
