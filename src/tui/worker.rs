//! Background workers for the TUI: dataset fetches and location detection.
//!
//! All state mutation stays on the UI thread; workers only send events over
//! an mpsc channel that the event loop drains. Each dataset fetch carries a
//! token issued by [`StaleGuard`], so a late response for an old selection
//! can never overwrite a newer selection's data (last-write-wins).

use std::sync::mpsc::Sender;
use std::thread;

use crate::data::api::{PerfClient, PerformancePayload};
use crate::data::geo::{GeoClient, LocationFix};
use crate::error::AppError;

/// Events delivered from workers to the UI thread.
pub enum WorkerEvent {
    Dataset {
        token: u64,
        outcome: Result<PerformancePayload, AppError>,
    },
    Location(LocationUpdate),
}

/// Outcome of the one-shot location detection.
pub struct LocationUpdate {
    pub status: String,
    pub place: Option<String>,
}

/// Monotonically increasing request tokens; only the latest one is current.
#[derive(Debug, Default)]
pub struct StaleGuard {
    latest: u64,
}

impl StaleGuard {
    /// Issue the token for a new request, invalidating all earlier ones.
    pub fn issue(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest
    }
}

/// Fetch performance records on a background thread.
pub fn spawn_fetch(tx: Sender<WorkerEvent>, client: PerfClient, token: u64, state: Option<String>) {
    thread::spawn(move || {
        let outcome = client.fetch_performance(state.as_deref());
        let _ = tx.send(WorkerEvent::Dataset { token, outcome });
    });
}

/// Detect the configured location and reverse-geocode it, once per session.
pub fn spawn_locate(tx: Sender<WorkerEvent>) {
    thread::spawn(move || {
        let Some(fix) = LocationFix::from_env() else {
            let _ = tx.send(WorkerEvent::Location(LocationUpdate {
                status: "Location not configured (set MGNREGA_LAT / MGNREGA_LON).".to_string(),
                place: None,
            }));
            return;
        };

        let update = match GeoClient::from_env().and_then(|geo| geo.reverse(fix)) {
            Ok(Some(place)) => LocationUpdate {
                status: format!("Detected place: {place}"),
                place: Some(place),
            },
            Ok(None) => LocationUpdate {
                status: "Could not determine district name.".to_string(),
                place: None,
            },
            Err(err) => LocationUpdate {
                status: format!("Reverse geocode failed: {err}"),
                place: None,
            },
        };
        let _ = tx.send(WorkerEvent::Location(update));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_and_only_latest_is_current() {
        let mut guard = StaleGuard::default();
        let first = guard.issue();
        let second = guard.issue();
        assert!(second > first);
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }

    #[test]
    fn late_response_for_old_selection_is_discarded() {
        // Selection changes to X, then to Y before X's fetch resolves.
        let mut guard = StaleGuard::default();
        let token_x = guard.issue();
        let token_y = guard.issue();

        let mut displayed = None;

        // Y's response arrives first and is applied.
        if guard.is_current(token_y) {
            displayed = Some("dataset-y");
        }
        // X's response arrives late and must be dropped.
        if guard.is_current(token_x) {
            displayed = Some("dataset-x");
        }

        assert_eq!(displayed, Some("dataset-y"));
    }
}
