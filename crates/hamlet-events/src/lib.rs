//! Notification bus for the Hamlet economy core.
//!
//! Every observable change in the economy -- resource mutations, job
//! assignments, goal completions, building unlocks -- is published as an
//! [`EconomyEvent`] on the [`EventBus`]. Delivery is synchronous and
//! in-line with the mutating call: by the time a ledger or allocator
//! operation returns, every registered [`EventSink`] has already seen
//! the event.
//!
//! The bus additionally keeps a FIFO queue of published events so that
//! the session composition root can feed resource changes back into the
//! goal engine in the same call, without the engine holding a reference
//! to the bus's subscriber list. Events re-published during that replay
//! land at the back of the queue, preserving causal order.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use hamlet_types::{BuildingId, BuildingTypeId, GoalId, JobType, ResourceId, VillagerId};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A change notification emitted by the economy core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EconomyEvent {
    /// A resource amount was written. Published on every `set`, including
    /// writes where the delta is zero -- downstream UI relies on the
    /// refresh signal.
    ResourceChanged {
        /// The resource that was written.
        resource: ResourceId,
        /// New amount minus previous amount. May be zero or negative.
        delta: Decimal,
        /// The amount now stored in the ledger.
        total: Decimal,
    },

    /// A villager took up work at a building.
    JobAssigned {
        /// The villager that was assigned.
        villager: VillagerId,
        /// The building instance joined.
        building: BuildingId,
        /// The trade practiced there.
        job: JobType,
    },

    /// A villager left their job.
    JobUnassigned {
        /// The villager that was unassigned.
        villager: VillagerId,
    },

    /// A goal transitioned from pending to completed.
    GoalCompleted {
        /// The goal that completed.
        goal: GoalId,
    },

    /// A building kind became constructible for the first time.
    BuildingUnlocked {
        /// The newly unlocked building kind.
        building: BuildingTypeId,
    },
}

// ---------------------------------------------------------------------------
// Sinks and bus
// ---------------------------------------------------------------------------

/// A subscriber notified of every published event.
///
/// Implementations are external collaborators (HUD, achievement panel,
/// test recorders). Sinks must not call back into the economy; they
/// receive a shared reference and the core is single-threaded.
pub trait EventSink {
    /// Called synchronously for each published event, in publish order.
    fn on_event(&mut self, event: &EconomyEvent);
}

/// The publish/subscribe bus.
///
/// Owned by the economy session. Components receive `&mut EventBus` for
/// the duration of a mutating call and publish through it.
#[derive(Default)]
pub struct EventBus {
    /// Registered subscribers, notified in registration order.
    sinks: Vec<Box<dyn EventSink + Send>>,
    /// Events awaiting replay into the goal engine, oldest first.
    pending: VecDeque<EconomyEvent>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub const fn new() -> Self {
        Self {
            sinks: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    /// Register a subscriber. Subscribers cannot be removed; the set of
    /// collaborators is fixed at session construction.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink + Send>) {
        self.sinks.push(sink);
    }

    /// Return the number of registered subscribers.
    pub const fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Publish an event: notify every sink now, then queue the event for
    /// replay by the session.
    pub fn publish(&mut self, event: EconomyEvent) {
        for sink in &mut self.sinks {
            sink.on_event(&event);
        }
        self.pending.push_back(event);
    }

    /// Pop the oldest queued event, if any.
    pub fn pop_pending(&mut self) -> Option<EconomyEvent> {
        self.pending.pop_front()
    }

    /// Whether events remain queued for replay.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &self.sinks.len())
            .field("pending", &self.pending)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Sink that appends every event to a shared log.
    struct Recorder {
        log: Arc<Mutex<Vec<EconomyEvent>>>,
    }

    impl EventSink for Recorder {
        fn on_event(&mut self, event: &EconomyEvent) {
            if let Ok(mut log) = self.log.lock() {
                log.push(event.clone());
            }
        }
    }

    fn recorder() -> (Box<Recorder>, Arc<Mutex<Vec<EconomyEvent>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        (Box::new(Recorder { log: Arc::clone(&log) }), log)
    }

    #[test]
    fn publish_notifies_all_sinks_in_order() {
        let mut bus = EventBus::new();
        let (sink_a, log_a) = recorder();
        let (sink_b, log_b) = recorder();
        bus.subscribe(sink_a);
        bus.subscribe(sink_b);
        assert_eq!(bus.sink_count(), 2);

        let event = EconomyEvent::JobUnassigned {
            villager: VillagerId::new("v1"),
        };
        bus.publish(event.clone());

        assert_eq!(log_a.lock().unwrap().as_slice(), &[event.clone()]);
        assert_eq!(log_b.lock().unwrap().as_slice(), &[event]);
    }

    #[test]
    fn pending_queue_is_fifo() {
        let mut bus = EventBus::new();
        bus.publish(EconomyEvent::GoalCompleted {
            goal: GoalId::new("first"),
        });
        bus.publish(EconomyEvent::GoalCompleted {
            goal: GoalId::new("second"),
        });

        assert!(bus.has_pending());
        let first = bus.pop_pending().unwrap();
        assert_eq!(
            first,
            EconomyEvent::GoalCompleted {
                goal: GoalId::new("first")
            }
        );
        let second = bus.pop_pending().unwrap();
        assert_eq!(
            second,
            EconomyEvent::GoalCompleted {
                goal: GoalId::new("second")
            }
        );
        assert!(!bus.has_pending());
        assert!(bus.pop_pending().is_none());
    }

    #[test]
    fn event_serializes_tagged() {
        let event = EconomyEvent::BuildingUnlocked {
            building: BuildingTypeId::new("lumber_hut"),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            "{\"type\":\"building_unlocked\",\"building\":\"lumber_hut\"}"
        );
    }
}
