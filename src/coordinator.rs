use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::{
    AssetRef, AssetResolver, BatchId, BatchResult, PhotoUploadClient, ProfileId, UploadOutcome,
};

/// Shared state for one batch. Each asset owns the slot at its submission
/// index, so slot writes never contend; the atomic counter is the only
/// datum raced over, and taking the oneshot sender decides the single
/// winner of the completion signal.
struct BatchState {
    total: usize,
    completed: AtomicUsize,
    slots: Mutex<Vec<Option<UploadOutcome>>>,
    done_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl BatchState {
    fn new(total: usize, done_tx: oneshot::Sender<()>) -> Self {
        Self {
            total,
            completed: AtomicUsize::new(0),
            slots: Mutex::new(vec![None; total]),
            done_tx: Mutex::new(Some(done_tx)),
        }
    }

    /// Record the terminal outcome for one asset. Returns true iff this
    /// completion was the one that closed the batch. More completions than
    /// submitted assets is a programming defect and panics.
    fn record(&self, index: usize, outcome: UploadOutcome) -> bool {
        {
            let mut slots = self.slots.lock();
            let slot = &mut slots[index];
            assert!(slot.is_none(), "duplicate outcome for asset {index}");
            *slot = Some(outcome);
        }

        let done = self.completed.fetch_add(1, Ordering::AcqRel) + 1;
        assert!(
            done <= self.total,
            "observed {done} completions for {} submitted assets",
            self.total
        );

        if done == self.total {
            if let Some(tx) = self.done_tx.lock().take() {
                let _ = tx.send(());
                return true;
            }
        }
        false
    }

    /// Derive the final report with a single scan of the slots. Only valid
    /// after the completion signal has fired.
    fn collect(&self) -> BatchResult {
        let slots = self.slots.lock();
        let outcomes: Vec<UploadOutcome> = slots
            .iter()
            .map(|slot| {
                slot.clone()
                    .expect("asset missing its outcome after the completion signal")
            })
            .collect();
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        BatchResult {
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        }
    }
}

/// Fans out one independent upload per asset against a single profile and
/// joins on all of their terminal outcomes. One failure never cancels a
/// sibling, nothing is retried, and the aggregate completion fires exactly
/// once.
pub struct BatchUploadCoordinator {
    resolver: Arc<dyn AssetResolver>,
    client: Arc<dyn PhotoUploadClient>,
}

impl BatchUploadCoordinator {
    pub fn new<R, C>(resolver: R, client: C) -> Self
    where
        R: AssetResolver + 'static,
        C: PhotoUploadClient + 'static,
    {
        Self {
            resolver: Arc::new(resolver),
            client: Arc::new(client),
        }
    }

    /// Create from already-shared collaborators
    pub fn from_arcs(resolver: Arc<dyn AssetResolver>, client: Arc<dyn PhotoUploadClient>) -> Self {
        Self { resolver, client }
    }

    /// Run every asset to a terminal outcome and return the consolidated
    /// report, ordered by submission index. An empty batch completes
    /// immediately without touching the resolver or the client.
    pub async fn run_batch(&self, profile_id: ProfileId, assets: Vec<AssetRef>) -> BatchResult {
        let batch_id = BatchId::new();

        if assets.is_empty() {
            debug!(batch = %batch_id, profile = %profile_id, "empty batch, completing immediately");
            return BatchResult::empty();
        }

        let total = assets.len();
        debug!(batch = %batch_id, profile = %profile_id, total, "starting photo batch");

        let (done_tx, done_rx) = oneshot::channel();
        let state = Arc::new(BatchState::new(total, done_tx));

        for (index, asset) in assets.into_iter().enumerate() {
            let state = Arc::clone(&state);
            let resolver = Arc::clone(&self.resolver);
            let client = Arc::clone(&self.client);
            let batch_id = batch_id.clone();

            // Detached on purpose: a dropped caller must not cancel
            // in-flight uploads mid-batch.
            tokio::spawn(async move {
                let outcome =
                    upload_one(resolver.as_ref(), client.as_ref(), profile_id, &asset).await;
                if state.record(index, outcome) {
                    debug!(batch = %batch_id, "last outcome recorded, batch complete");
                }
            });
        }

        done_rx
            .await
            .expect("batch tasks dropped without recording every outcome");

        let result = state.collect();
        debug!(
            batch = %batch_id,
            succeeded = result.succeeded,
            failed = result.failed,
            "photo batch finished"
        );
        result
    }
}

/// Resolve and upload a single asset, folding every failure into data.
/// A resolution failure never reaches the upload client.
async fn upload_one(
    resolver: &dyn AssetResolver,
    client: &dyn PhotoUploadClient,
    profile_id: ProfileId,
    asset: &AssetRef,
) -> UploadOutcome {
    let payload = match resolver.resolve(asset).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(path = %asset.path.display(), error = %e, "asset resolution failed");
            return UploadOutcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    match client.upload_photo(profile_id, payload).await {
        Ok(location) => UploadOutcome::Succeeded { location },
        Err(e) => {
            warn!(path = %asset.path.display(), error = %e, "photo upload failed");
            UploadOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;

    fn outcome(i: usize) -> UploadOutcome {
        UploadOutcome::Succeeded {
            location: format!("uploads/{i}.jpg"),
        }
    }

    #[test]
    fn record_reports_last_completion_exactly_once() {
        let (tx, mut rx) = oneshot::channel();
        let state = BatchState::new(3, tx);

        assert!(!state.record(1, outcome(1)));
        assert!(!state.record(0, outcome(0)));
        assert!(state.record(2, outcome(2)));
        assert!(rx.try_recv().is_ok());

        let result = state.collect();
        assert_eq!(result.succeeded, 3);
        assert_eq!(result.failed, 0);
    }

    #[test]
    fn collect_preserves_submission_order() {
        let (tx, _rx) = oneshot::channel();
        let state = BatchState::new(3, tx);

        state.record(2, outcome(2));
        state.record(0, outcome(0));
        state.record(
            1,
            UploadOutcome::Failed {
                reason: "boom".into(),
            },
        );

        let result = state.collect();
        assert_eq!(result.outcomes[0], outcome(0));
        assert_eq!(
            result.outcomes[1],
            UploadOutcome::Failed {
                reason: "boom".into()
            }
        );
        assert_eq!(result.outcomes[2], outcome(2));
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 1);
    }

    #[test]
    #[should_panic(expected = "duplicate outcome")]
    fn duplicate_outcome_is_a_defect() {
        let (tx, _rx) = oneshot::channel();
        let state = BatchState::new(2, tx);
        state.record(0, outcome(0));
        state.record(0, outcome(0));
    }

    /// Stress the counter with genuinely parallel completions: across many
    /// randomized runs, exactly one thread may ever observe "last".
    #[test]
    fn concurrent_completions_signal_exactly_once() {
        const COMPLETIONS: usize = 100;
        const RUNS: usize = 50;

        for _ in 0..RUNS {
            let (tx, mut rx) = oneshot::channel();
            let state = Arc::new(BatchState::new(COMPLETIONS, tx));
            let winners = Arc::new(AtomicUsize::new(0));
            let barrier = Arc::new(Barrier::new(COMPLETIONS));

            let handles: Vec<_> = (0..COMPLETIONS)
                .map(|i| {
                    let state = Arc::clone(&state);
                    let winners = Arc::clone(&winners);
                    let barrier = Arc::clone(&barrier);
                    std::thread::spawn(move || {
                        barrier.wait();
                        if state.record(i, outcome(i)) {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(winners.load(Ordering::SeqCst), 1);
            assert!(rx.try_recv().is_ok());

            let result = state.collect();
            assert_eq!(result.succeeded + result.failed, COMPLETIONS);
        }
    }
}
