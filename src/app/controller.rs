//! Load orchestration and the epoch-tagged state machine.
//!
//! [`LoadController`] drives reset and load-more operations against the
//! [`PageCache`](crate::source::PageCache) and [`ListStore`], owns the
//! loading state machine, and publishes an observable [`ListSnapshot`] for
//! presentation.
//!
//! # Concurrency
//!
//! Methods take `&self` and are async: network fetches suspend the caller
//! without blocking anything else, so a slow `load_more()` can be outlived by
//! a fresh `reset()`. Internal state lives behind a `std::sync::Mutex` that
//! is never held across an await point.
//!
//! There is no true abort of an in-flight request. Every outgoing fetch
//! carries the epoch active at issue time; when it settles, the completion
//! handler compares that tag against the current epoch and discards the
//! result silently on a mismatch. The most recent `reset()` therefore always
//! wins over any earlier, still-pending fetch.
//!
//! No timeouts are applied here; a request that never settles leaves the
//! state machine in `Loading`/`LoadingMore`, and timeout policy belongs to
//! the data source collaborator.

use crate::app::list::ListStore;
use crate::app::state::{ListSnapshot, LoadPhase};
use crate::source::{DataSource, PageCache};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// State guarded by the controller's lock.
///
/// The phase, the list, and the epoch only ever change together, which keeps
/// every published snapshot self-consistent.
struct EngineState {
    phase: LoadPhase,
    list: ListStore,
    epoch: u64,
}

impl EngineState {
    fn snapshot(&self) -> ListSnapshot {
        ListSnapshot {
            phase: self.phase.clone(),
            items: self.list.items().to_vec(),
            cursor: self.list.cursor(),
        }
    }
}

/// Orchestrates incremental loading of the remote collection.
///
/// Created once per view and reused across resets. Callers that need to
/// issue operations concurrently (a pending `load_more()` superseded by a
/// `reset()`) share the controller behind an `Arc` and spawn the calls.
pub struct LoadController<S> {
    state: Mutex<EngineState>,
    cache: PageCache<S>,
    page_size: usize,
    updates: watch::Sender<ListSnapshot>,
}

impl<S: DataSource> LoadController<S> {
    /// Creates a controller over `source` fetching pages of `page_size`.
    ///
    /// The controller starts in [`LoadPhase::Idle`] with an empty list;
    /// nothing is fetched until [`reset`](Self::reset) is called.
    #[must_use]
    pub fn new(source: S, page_size: usize) -> Self {
        let (updates, _) = watch::channel(ListSnapshot::initial());
        Self {
            state: Mutex::new(EngineState {
                phase: LoadPhase::Idle,
                list: ListStore::new(),
                epoch: 0,
            }),
            cache: PageCache::new(source),
            page_size,
            updates,
        }
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        // A panic while holding the lock poisons it; the state itself is
        // still consistent because every mutation is a single assignment.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &EngineState) {
        self.updates.send_replace(state.snapshot());
    }

    /// Returns the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> ListSnapshot {
        self.lock().snapshot()
    }

    /// Subscribes to snapshot updates.
    ///
    /// A new snapshot is published on every state machine transition. The
    /// receiver always observes the latest value, so slow consumers skip
    /// intermediate states rather than lag behind.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot> {
        self.updates.subscribe()
    }

    /// Discards everything and loads the first page of a fresh epoch.
    ///
    /// Accepted from any state. Increments the epoch (superseding whatever
    /// fetch may still be pending), clears the page cache, empties the list,
    /// and fetches page 0. On failure the state machine moves to
    /// [`LoadPhase::Error`] with an empty list; retrying requires another
    /// explicit `reset()`.
    pub async fn reset(&self) {
        let epoch = {
            let mut state = self.lock();
            state.epoch += 1;
            state.list.reset();
            state.phase = LoadPhase::Loading;
            self.publish(&state);
            tracing::debug!(epoch = state.epoch, "reset: loading first page");
            state.epoch
        };

        self.cache.clear();
        let fetched = self.cache.get_or_fetch(0, self.page_size).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            tracing::debug!(
                issued_epoch = epoch,
                current_epoch = state.epoch,
                "discarding stale reset completion"
            );
            return;
        }

        match fetched {
            Ok(page) => {
                state.list.append(page, self.page_size);
                state.phase = LoadPhase::Ready;
            }
            Err(e) => {
                tracing::debug!(error = %e, "reset fetch failed");
                state.list.reset();
                state.phase = LoadPhase::Error {
                    message: e.to_string(),
                };
            }
        }
        self.publish(&state);
    }

    /// Fetches the next page and appends it to the cumulative list.
    ///
    /// A no-op (not an error) unless the cursor reports more data and the
    /// machine is in `Ready`, or in `Error` with items still loaded, which
    /// is the retry path after a non-destructive load-more failure. On
    /// failure the accumulated items are preserved and the cursor is left
    /// untouched, so the caller may retry.
    pub async fn load_more(&self) {
        let (epoch, skip) = {
            let mut state = self.lock();
            let cursor = state.list.cursor();
            let can_extend = match state.phase {
                LoadPhase::Ready => true,
                LoadPhase::Error { .. } => !state.list.items().is_empty(),
                LoadPhase::Idle | LoadPhase::Loading | LoadPhase::LoadingMore => false,
            };
            if !can_extend || !cursor.has_more {
                tracing::debug!(phase = ?state.phase, has_more = cursor.has_more, "load_more ignored");
                return;
            }
            state.phase = LoadPhase::LoadingMore;
            self.publish(&state);
            tracing::debug!(epoch = state.epoch, skip = cursor.skip, "loading next page");
            (state.epoch, cursor.skip)
        };

        let fetched = self.cache.get_or_fetch(skip, self.page_size).await;

        let mut state = self.lock();
        if state.epoch != epoch {
            tracing::debug!(
                issued_epoch = epoch,
                current_epoch = state.epoch,
                "discarding stale load_more completion"
            );
            return;
        }

        match fetched {
            Ok(page) => {
                state.list.append(page, self.page_size);
                state.phase = LoadPhase::Ready;
            }
            Err(e) => {
                tracing::debug!(error = %e, "load_more fetch failed, keeping loaded items");
                state.phase = LoadPhase::Error {
                    message: e.to_string(),
                };
            }
        }
        self.publish(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::LoadController;
    use crate::app::state::LoadPhase;
    use crate::domain::{Item, LocalistError, Result};
    use crate::source::DataSource;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use tokio::sync::Notify;

    /// One scripted response per expected fetch, consumed in call order.
    enum Script {
        Page(Vec<Item>),
        Fail(String),
        /// Signals `started`, then waits for `release` before answering.
        Gated {
            started: Arc<Notify>,
            release: Arc<Notify>,
            page: Vec<Item>,
        },
    }

    struct ScriptedSource {
        scripts: Mutex<VecDeque<Script>>,
    }

    impl ScriptedSource {
        fn new(scripts: Vec<Script>) -> Self {
            Self {
                scripts: Mutex::new(scripts.into_iter().collect()),
            }
        }
    }

    #[async_trait]
    impl DataSource for ScriptedSource {
        async fn fetch_page(&self, _offset: usize, _limit: usize) -> Result<Vec<Item>> {
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .expect("unexpected fetch");
            match script {
                Script::Page(page) => Ok(page),
                Script::Fail(message) => Err(LocalistError::Network(message)),
                Script::Gated {
                    started,
                    release,
                    page,
                } => {
                    started.notify_one();
                    release.notified().await;
                    Ok(page)
                }
            }
        }
    }

    fn page(prefix: &str, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let id = format!("{prefix}{i}");
                Item::new(&id, &id, "Shop", "1 Main St", "desc")
            })
            .collect()
    }

    #[tokio::test]
    async fn reset_loads_first_page() {
        let source = ScriptedSource::new(vec![Script::Page(page("a", 10))]);
        let controller = LoadController::new(source, 10);

        assert_eq!(controller.snapshot().phase, LoadPhase::Idle);
        controller.reset().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.items.len(), 10);
        assert!(snapshot.has_more());
        assert_eq!(snapshot.cursor.skip, 10);
    }

    #[tokio::test]
    async fn short_second_page_exhausts_collection() {
        let source = ScriptedSource::new(vec![
            Script::Page(page("a", 10)),
            Script::Page(page("b", 3)),
        ]);
        let controller = LoadController::new(source, 10);

        controller.reset().await;
        controller.load_more().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.items.len(), 13);
        assert_eq!(snapshot.cursor.skip, 13);
        assert!(!snapshot.has_more());

        // Exhausted: a further load_more must not touch the source (the
        // script queue is empty, so a fetch would panic the test).
        controller.load_more().await;
        assert_eq!(controller.snapshot().items.len(), 13);
    }

    #[tokio::test]
    async fn reset_failure_clears_list_and_reports_error() {
        let source = ScriptedSource::new(vec![
            Script::Fail("x".to_string()),
            Script::Page(page("a", 3)),
        ]);
        let controller = LoadController::new(source, 10);

        controller.reset().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.error(), Some("Network error: x"));
        assert!(snapshot.items.is_empty());

        // Retry via explicit reset clears the error and repopulates.
        controller.reset().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.items.len(), 3);
        assert!(!snapshot.has_more());
    }

    #[tokio::test]
    async fn load_more_failure_preserves_accumulated_items() {
        let source = ScriptedSource::new(vec![
            Script::Page(page("a", 10)),
            Script::Fail("flaky".to_string()),
            Script::Page(page("b", 10)),
        ]);
        let controller = LoadController::new(source, 10);

        controller.reset().await;
        controller.load_more().await;

        let snapshot = controller.snapshot();
        assert!(snapshot.error().is_some());
        assert_eq!(snapshot.items.len(), 10);
        assert!(snapshot.has_more());

        // hasMore is unchanged, so the retry path fetches the same offset.
        controller.load_more().await;
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.items.len(), 20);
    }

    #[tokio::test]
    async fn load_more_before_reset_is_a_no_op() {
        let source = ScriptedSource::new(vec![]);
        let controller = LoadController::new(source, 10);
        controller.load_more().await;
        assert_eq!(controller.snapshot().phase, LoadPhase::Idle);
    }

    #[tokio::test]
    async fn load_more_after_failed_reset_is_a_no_op() {
        let source = ScriptedSource::new(vec![Script::Fail("x".to_string())]);
        let controller = LoadController::new(source, 10);
        controller.reset().await;
        // Empty list in Error phase: retry only via reset, never load_more.
        controller.load_more().await;
        assert!(controller.snapshot().error().is_some());
    }

    #[tokio::test]
    async fn reset_supersedes_pending_load_more() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());

        let source = ScriptedSource::new(vec![
            Script::Page(page("a", 10)),
            Script::Gated {
                started: Arc::clone(&started),
                release: Arc::clone(&release),
                page: page("stale", 10),
            },
            Script::Page(page("fresh", 3)),
        ]);
        let controller = Arc::new(LoadController::new(source, 10));

        controller.reset().await;

        let pending = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move { controller.load_more().await })
        };

        // Wait until the load_more fetch is genuinely in flight, then reset.
        started.notified().await;
        controller.reset().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.phase, LoadPhase::Ready);
        assert_eq!(snapshot.items.len(), 3);
        assert_eq!(snapshot.items[0].id, "fresh0");

        // Let the stale fetch settle; its completion must change nothing.
        release.notify_one();
        pending.await.unwrap();

        let after = controller.snapshot();
        assert_eq!(after, snapshot);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let source = ScriptedSource::new(vec![Script::Page(page("a", 2))]);
        let controller = LoadController::new(source, 10);
        let mut updates = controller.subscribe();

        controller.reset().await;

        updates.changed().await.unwrap();
        let latest = updates.borrow_and_update().clone();
        assert_eq!(latest.phase, LoadPhase::Ready);
        assert_eq!(latest.items.len(), 2);
    }
}
