//! Shared holder of the current [`DashboardState`].

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use oracle_environment::Place;
use parking_lot::Mutex;

use crate::cycle::AnalysisCycle;
use crate::state::DashboardState;

/// Cheap to clone; clones share the same state and cycle.
///
/// Overlapping refreshes are not serialized. Each one replaces the whole record
/// when it resolves, so the refresh that finishes last wins.
#[derive(Clone)]
pub struct Session {
    state: Arc<Mutex<DashboardState>>,
    cycle: Arc<AnalysisCycle>,
}

impl Session {
    pub fn new(cycle: AnalysisCycle, place: Place) -> Self {
        Self {
            state: Arc::new(Mutex::new(DashboardState::new(place))),
            cycle: Arc::new(cycle),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.lock().clone()
    }

    /// Apply a transition to the stored record and return the result.
    pub fn update<F>(&self, f: F) -> DashboardState
    where
        F: FnOnce(DashboardState) -> DashboardState,
    {
        let mut guard = self.state.lock();
        let next = f(guard.clone());
        *guard = next.clone();
        next
    }

    pub fn set_place(&self, place: Place) -> DashboardState {
        self.update(|s| s.with_place(place))
    }

    /// Run a cycle for the current place using today's local date.
    pub async fn refresh(&self) -> DashboardState {
        self.refresh_on(Local::now().date_naive()).await
    }

    pub async fn refresh_on(&self, today: NaiveDate) -> DashboardState {
        self.refresh_with(today, |_| {}).await
    }

    /// Run a cycle, reporting each intermediate record to `on_change`.
    ///
    /// `on_change` sees the loading record first, then the record with fresh
    /// environment readings once they arrive. The final record is returned.
    pub async fn refresh_with<F>(&self, today: NaiveDate, mut on_change: F) -> DashboardState
    where
        F: FnMut(&DashboardState),
    {
        let loading = self.update(DashboardState::begin_fetch);
        on_change(&loading);
        let place = loading.place().clone();

        let outcome = self
            .cycle
            .run_observed(&place, today, |snapshot, background| {
                let state =
                    self.update(|s| s.with_snapshot(snapshot.clone(), background.map(str::to_string)));
                on_change(&state);
            })
            .await;

        self.update(|s| s.complete(outcome))
    }
}
