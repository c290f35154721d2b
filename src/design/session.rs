// SPDX-License-Identifier: GPL-3.0-only

//! Shared design session for async front ends.
//!
//! Layout regeneration and edits run under one lock, so an edit either sees
//! the old key set or the fully replaced one, never a half-built set. Events
//! queued by a mutation are forwarded to subscribers before the lock is
//! released, so every subscriber observes changes in mutation order.

use std::sync::Arc;

use futures::channel::mpsc;
use tokio::sync::Mutex;

use crate::design::{DesignEvent, DesignState};
use crate::keyboard::KeyboardLayout;

struct Inner {
    state: DesignState,
    subscribers: Vec<mpsc::UnboundedSender<DesignEvent>>,
}

impl Inner {
    /// Forwards queued events, dropping subscribers whose receiver is gone.
    fn publish(&mut self) {
        let events = self.state.take_events();
        if events.is_empty() {
            return;
        }

        self.subscribers
            .retain(|tx| events.iter().all(|event| tx.unbounded_send(event.clone()).is_ok()));
        tracing::debug!(
            "Published {} events to {} subscribers",
            events.len(),
            self.subscribers.len()
        );
    }
}

/// Cloneable handle to a [`DesignState`] shared between tasks.
#[derive(Clone)]
pub struct SharedDesign {
    inner: Arc<Mutex<Inner>>,
}

impl SharedDesign {
    pub fn new(state: DesignState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                subscribers: Vec::new(),
            })),
        }
    }

    /// Registers a subscriber for every future change event.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<DesignEvent> {
        let (tx, rx) = mpsc::unbounded();
        self.inner.lock().await.subscribers.push(tx);
        rx
    }

    /// Regenerates the key set for `layout`.
    pub async fn select_layout(&self, layout: KeyboardLayout) {
        self.edit(|state| state.select_layout(layout)).await;
    }

    /// Runs a mutation with exclusive access to the state.
    pub async fn edit<R>(&self, f: impl FnOnce(&mut DesignState) -> R) -> R {
        let mut inner = self.inner.lock().await;
        let result = f(&mut inner.state);
        inner.publish();
        result
    }

    /// Runs a read-only closure against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&DesignState) -> R) -> R {
        let inner = self.inner.lock().await;
        f(&inner.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{KeyType, KeycapUpdate};
    use futures::StreamExt;

    fn session(layout: KeyboardLayout) -> SharedDesign {
        let mut state = DesignState::new();
        state.select_layout(layout);
        state.take_events();
        SharedDesign::new(state)
    }

    /// Test 1: Subscribers receive events in mutation order
    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let design = session(KeyboardLayout::SixtyOne);
        let mut rx = design.subscribe().await;

        design.edit(|s| s.toggle_selection("key-1", false)).await;
        design.select_layout(KeyboardLayout::FullSize).await;

        assert_eq!(rx.next().await, Some(DesignEvent::SelectionChanged));
        assert_eq!(
            rx.next().await,
            Some(DesignEvent::LayoutReplaced(KeyboardLayout::FullSize))
        );
    }

    /// Test 2: Dropped subscribers are pruned
    #[tokio::test]
    async fn test_dropped_subscriber_is_pruned() {
        let design = session(KeyboardLayout::SixtyOne);
        let rx = design.subscribe().await;
        drop(rx);

        design.edit(|s| s.toggle_view_3d()).await;
        let count = design.inner.lock().await.subscribers.len();
        assert_eq!(count, 0, "Closed channels should be removed on publish");
    }

    /// Test 3: Concurrent edits and regenerations never see a stale key set
    ///
    /// Each editing task resolves the letter ids and applies the edit in the
    /// same critical section, so every edit lands on a complete key set.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_edits_serialize_with_regeneration() {
        let design = session(KeyboardLayout::SixtyOne);
        let mut tasks = Vec::new();

        for i in 0..16 {
            let design = design.clone();
            tasks.push(tokio::spawn(async move {
                if i % 4 == 0 {
                    let layout = KeyboardLayout::ALL[i % 3];
                    design.select_layout(layout).await;
                } else {
                    let changed = design
                        .edit(|s| {
                            s.apply_to_type(KeyType::Letter, &KeycapUpdate::new().with_main_color("#0A0A0A"))
                        })
                        .await;
                    assert_eq!(changed, 26, "Every layout has exactly 26 letter keys");
                }
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }

        let (count, layout) = design.read(|s| (s.keycaps().len(), s.layout())).await;
        let expected = match layout {
            KeyboardLayout::SixtyOne => 61,
            KeyboardLayout::EightySeven => 87,
            KeyboardLayout::FullSize => 104,
        };
        assert_eq!(count, expected);
    }
}
