use tokio::sync::{watch, Mutex};

/// Outcome of an in-flight session refresh, broadcast to every waiter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshStatus {
    Pending,
    Succeeded,
    Failed(String),
}

/// Role handed to a caller that hit an expired session.
///
/// The first arrival becomes the owner and must drive the refresh call to
/// completion, then settle the gate. Everyone else just awaits the
/// broadcast outcome.
pub enum RefreshTicket {
    Owner(watch::Sender<RefreshStatus>),
    Waiter(watch::Receiver<RefreshStatus>),
}

/// Coordinates session refreshes so at most one is in flight at a time.
///
/// A single-assignment broadcast replaces per-request retry queues: the
/// slot holds the receiver for the current cycle, and the check-and-set
/// happens under one lock so two refreshes can never start back to back.
#[derive(Default)]
pub struct RefreshGate {
    slot: Mutex<Option<watch::Receiver<RefreshStatus>>>,
}

impl RefreshGate {
    /// Join the current refresh cycle, starting one if none is in flight.
    pub async fn join(&self) -> RefreshTicket {
        let mut slot = self.slot.lock().await;
        if let Some(rx) = slot.as_ref() {
            RefreshTicket::Waiter(rx.clone())
        } else {
            let (tx, rx) = watch::channel(RefreshStatus::Pending);
            *slot = Some(rx);
            RefreshTicket::Owner(tx)
        }
    }

    /// Settle the cycle: free the slot for the next 401, then broadcast.
    ///
    /// The slot must be cleared before the send so a request failing after
    /// this cycle starts a fresh one instead of observing a stale outcome.
    pub async fn settle(&self, tx: watch::Sender<RefreshStatus>, status: RefreshStatus) {
        let mut slot = self.slot.lock().await;
        *slot = None;
        drop(slot);
        let _ = tx.send(status);
    }

    /// Await the broadcast outcome of the cycle this receiver belongs to.
    ///
    /// A dropped sender (owner panicked mid-refresh) counts as a failure.
    pub async fn wait(mut rx: watch::Receiver<RefreshStatus>) -> RefreshStatus {
        match rx.wait_for(|s| *s != RefreshStatus::Pending).await {
            Ok(status) => status.clone(),
            Err(_) => RefreshStatus::Failed("refresh abandoned".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_arrival_owns_the_cycle() {
        let gate = RefreshGate::default();

        let first = gate.join().await;
        let tx = match first {
            RefreshTicket::Owner(tx) => tx,
            RefreshTicket::Waiter(_) => panic!("first arrival should own the refresh"),
        };

        let second = gate.join().await;
        let rx = match second {
            RefreshTicket::Waiter(rx) => rx,
            RefreshTicket::Owner(_) => panic!("second arrival must not start another refresh"),
        };

        gate.settle(tx, RefreshStatus::Succeeded).await;
        assert_eq!(RefreshGate::wait(rx).await, RefreshStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_settled_gate_starts_a_new_cycle() {
        let gate = RefreshGate::default();

        let tx = match gate.join().await {
            RefreshTicket::Owner(tx) => tx,
            RefreshTicket::Waiter(_) => panic!("expected owner"),
        };
        gate.settle(tx, RefreshStatus::Failed("boom".to_string())).await;

        // The failed cycle is over; the next 401 owns a fresh one.
        assert!(matches!(gate.join().await, RefreshTicket::Owner(_)));
    }

    #[tokio::test]
    async fn test_waiters_see_failure() {
        let gate = RefreshGate::default();

        let tx = match gate.join().await {
            RefreshTicket::Owner(tx) => tx,
            RefreshTicket::Waiter(_) => panic!("expected owner"),
        };
        let rx = match gate.join().await {
            RefreshTicket::Waiter(rx) => rx,
            RefreshTicket::Owner(_) => panic!("expected waiter"),
        };

        let waiter = tokio::spawn(RefreshGate::wait(rx));
        gate.settle(tx, RefreshStatus::Failed("expired".to_string())).await;

        assert_eq!(
            waiter.await.unwrap(),
            RefreshStatus::Failed("expired".to_string())
        );
    }

    #[tokio::test]
    async fn test_dropped_owner_counts_as_failure() {
        let gate = RefreshGate::default();

        let tx = match gate.join().await {
            RefreshTicket::Owner(tx) => tx,
            RefreshTicket::Waiter(_) => panic!("expected owner"),
        };
        let rx = match gate.join().await {
            RefreshTicket::Waiter(rx) => rx,
            RefreshTicket::Owner(_) => panic!("expected waiter"),
        };

        drop(tx);
        assert!(matches!(
            RefreshGate::wait(rx).await,
            RefreshStatus::Failed(_)
        ));
    }
}
