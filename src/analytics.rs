//! In-process, bounded event store for pipeline outcomes.
//!
//! Events live in memory only. The oldest event is evicted once the capacity is reached.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

pub const DEFAULT_CAPACITY: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RequestStarted,
    ModelCallSuccess,
    ModelCallFailure,
    ParseSuccess,
    ParseFailure,
    ValidationSuccess,
    ValidationFailure,
    InsufficientRecipes,
    BackfillGenerated,
    FallbackUsed,
    Completed,
    Error,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::RequestStarted => "request_started",
            EventKind::ModelCallSuccess => "model_call_success",
            EventKind::ModelCallFailure => "model_call_failure",
            EventKind::ParseSuccess => "parse_success",
            EventKind::ParseFailure => "parse_failure",
            EventKind::ValidationSuccess => "validation_success",
            EventKind::ValidationFailure => "validation_failure",
            EventKind::InsufficientRecipes => "insufficient_recipes",
            EventKind::BackfillGenerated => "backfill_generated",
            EventKind::FallbackUsed => "fallback_used",
            EventKind::Completed => "completed",
            EventKind::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub detail: Value,
    pub session_id: String,
}

fn new_session_id() -> String {
    format!("session-{}", Uuid::new_v4().simple())
}

/// Aggregate view over the stored events.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_requests: usize,
    pub model_successes: usize,
    pub model_failures: usize,
    pub parse_failures: usize,
    pub validation_failures: usize,
    pub fallback_used: usize,
    pub success_rate: String,
    pub fallback_rate: String,
    pub last_24_hour_events: BTreeMap<EventKind, usize>,
    pub all_time_events: usize,
}

fn percentage(count: usize, total: usize) -> String {
    if total == 0 {
        "0%".to_string()
    } else {
        format!("{:.2}%", count as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug)]
pub struct EventTracker {
    capacity: usize,
    events: Mutex<VecDeque<AnalyticsEvent>>,
}

impl Default for EventTracker {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventTracker {
    /// A zero capacity is bumped to one so the latest event is always retained.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            events: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // A poisoned lock only means another recorder panicked mid-push; the deque is still usable.
    fn lock(&self) -> MutexGuard<'_, VecDeque<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record(&self, kind: EventKind, detail: Value) {
        self.record_at(Utc::now(), kind, detail);
    }

    pub fn record_at(&self, timestamp: DateTime<Utc>, kind: EventKind, detail: Value) {
        let event = AnalyticsEvent {
            timestamp,
            kind,
            detail,
            session_id: new_session_id(),
        };
        tracing::info!(
            event = %event.kind,
            session_id = %event.session_id,
            detail = %event.detail,
            "analytics event"
        );

        let mut events = self.lock();
        while events.len() >= self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Snapshot of the stored events, oldest first.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().iter().cloned().collect()
    }

    pub fn reset(&self) {
        self.lock().clear();
    }

    pub fn summarize(&self) -> AnalyticsSummary {
        self.summarize_at(Utc::now())
    }

    /// Counts and rates cover the 24 hours before `now`; `all_time_events` covers the whole store.
    pub fn summarize_at(&self, now: DateTime<Utc>) -> AnalyticsSummary {
        let events = self.lock();
        let since = now - Duration::hours(24);
        let mut last_24_hour_events = BTreeMap::new();
        for event in events.iter().filter(|e| e.timestamp > since) {
            *last_24_hour_events.entry(event.kind).or_insert(0) += 1;
        }
        let count = |kind: EventKind| last_24_hour_events.get(&kind).copied().unwrap_or(0);

        let total_requests = count(EventKind::RequestStarted);
        let model_successes = count(EventKind::ModelCallSuccess);
        let fallback_used = count(EventKind::FallbackUsed);

        AnalyticsSummary {
            total_requests,
            model_successes,
            model_failures: count(EventKind::ModelCallFailure),
            parse_failures: count(EventKind::ParseFailure),
            validation_failures: count(EventKind::ValidationFailure),
            fallback_used,
            success_rate: percentage(model_successes, total_requests),
            fallback_rate: percentage(fallback_used, total_requests),
            last_24_hour_events,
            all_time_events: events.len(),
        }
    }
}
