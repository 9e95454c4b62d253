//! Shared fixtures and load generation for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use album_tracker::{Album, AlbumId, Card, CardId, CompletionTracker, Event, UserId};
use crossbeam::channel::unbounded;
use parking_lot::Mutex;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The eight-card "Animals" album used throughout the scenarios.
pub fn animals() -> Album {
    Album::new(
        AlbumId::new(1),
        "Animals",
        vec![
            Card::new(CardId::new(1), "Eagle"),
            Card::new(CardId::new(2), "Cormorant"),
            Card::new(CardId::new(3), "Sparrow"),
            Card::new(CardId::new(4), "Raven"),
            Card::new(CardId::new(5), "Salmon"),
            Card::new(CardId::new(6), "Mullet"),
            Card::new(CardId::new(7), "Bream"),
            Card::new(CardId::new(8), "Marline"),
        ],
    )
    .unwrap()
}

/// Subscribe an observer that stores every event it receives.
pub fn record_events(tracker: &CompletionTracker) -> Arc<Mutex<Vec<Event>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    tracker.subscribe(move |event: &Event| sink.lock().push(*event));
    events
}

/// Subscribe an observer that only counts events.
pub fn count_events(tracker: &CompletionTracker) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    tracker.subscribe(move |_: &Event| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    count
}

/// Every (user, card) pair for the whole album, shuffled deterministically.
pub fn full_album_jobs(users: u64, album: &Album, seed: u64) -> Vec<(UserId, CardId)> {
    let mut jobs: Vec<_> = UserId::range(users)
        .flat_map(|user| album.card_ids().map(move |card| (user, card)))
        .collect();
    jobs.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    jobs
}

/// Run `jobs` on `workers` threads pulling from a shared queue.
///
/// All workers wait on a start gate so that assignments overlap as much
/// as possible. Returns once every job has been applied.
pub fn assign_concurrently(tracker: &CompletionTracker, jobs: Vec<(UserId, CardId)>, workers: usize) {
    let (tx, rx) = unbounded();
    for job in jobs {
        tx.send(job).unwrap();
    }
    drop(tx);

    let gate = Barrier::new(workers);
    thread::scope(|scope| {
        for _ in 0..workers {
            let rx = rx.clone();
            let gate = &gate;
            scope.spawn(move || {
                gate.wait();
                for (user, card) in rx.iter() {
                    tracker.assign_card(user, card);
                }
            });
        }
    });
}
