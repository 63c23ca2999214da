//! Observable container state shared by all stores

use tokio::sync::watch;
use tracing::debug;

use super::OpError;

/// Snapshot of one container: its data plus loading and error flags
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub data: T,
    pub is_loading: bool,
    pub error: Option<OpError>,
}

impl<T> StoreState<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            is_loading: false,
            error: None,
        }
    }
}

/// Watch-backed cell holding a container's `StoreState`.
///
/// Mutations happen only through `InFlight` guards (or `update` for
/// operations that never touch the network), so every change is
/// published to subscribers.
pub struct StateCell<T> {
    name: &'static str,
    tx: watch::Sender<StoreState<T>>,
}

impl<T: Clone> StateCell<T> {
    pub fn new(name: &'static str, data: T) -> Self {
        let (tx, _rx) = watch::channel(StoreState::new(data));
        Self { name, tx }
    }

    pub fn snapshot(&self) -> StoreState<T> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StoreState<T>> {
        self.tx.subscribe()
    }

    /// Waits until no operation is in flight and returns that state
    pub async fn settled(&self) -> StoreState<T> {
        let mut rx = self.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let settled = match rx.wait_for(|state| !state.is_loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Marks the container busy and clears the previous error.
    ///
    /// Returns `None` when another operation is already in flight.
    pub fn begin(&self) -> Option<InFlight<'_, T>> {
        let started = self.tx.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            state.is_loading = true;
            state.error = None;
            true
        });

        if !started {
            debug!(store = self.name, "operation rejected, another is in flight");
            return None;
        }

        Some(InFlight {
            cell: self,
            settled: false,
        })
    }

    /// Mutates data outside the in-flight protocol
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(|state| f(&mut state.data));
    }
}

/// Guard for one in-flight operation.
///
/// Dropping it unsettled (for example when the future is cancelled)
/// clears the loading flag and leaves data and error untouched.
pub struct InFlight<'a, T> {
    cell: &'a StateCell<T>,
    settled: bool,
}

impl<T> InFlight<'_, T> {
    /// Applies `f` to the data and clears the loading flag
    pub fn succeed(mut self, f: impl FnOnce(&mut T)) {
        self.settled = true;
        self.cell.tx.send_modify(|state| {
            f(&mut state.data);
            state.is_loading = false;
        });
    }

    /// Records `error` and clears the loading flag; data is untouched
    pub fn fail(mut self, error: OpError) -> OpError {
        self.settled = true;
        self.cell.tx.send_modify(|state| {
            state.error = Some(error);
            state.is_loading = false;
        });
        error
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.cell.tx.send_modify(|state| state.is_loading = false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_clears_error_and_rejects_overlap() {
        let cell = StateCell::new("test", Vec::<u32>::new());
        let guard = cell.begin().unwrap();
        let _ = guard.fail(OpError::FetchUsers);
        assert_eq!(cell.snapshot().error, Some(OpError::FetchUsers));

        let guard = cell.begin().unwrap();
        let snapshot = cell.snapshot();
        assert!(snapshot.is_loading);
        assert_eq!(snapshot.error, None);

        assert!(cell.begin().is_none());
        guard.succeed(|data| data.push(1));

        let snapshot = cell.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.data, vec![1]);
    }

    #[test]
    fn failure_keeps_data() {
        let cell = StateCell::new("test", vec![1, 2, 3]);
        let err = cell.begin().unwrap().fail(OpError::FetchProducts);
        assert_eq!(err, OpError::FetchProducts);
        assert_eq!(cell.snapshot().data, vec![1, 2, 3]);
    }

    #[test]
    fn dropped_guard_clears_loading_only() {
        let cell = StateCell::new("test", vec![7]);
        {
            let _guard = cell.begin().unwrap();
            assert!(cell.snapshot().is_loading);
        }
        let snapshot = cell.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.error, None);
        assert_eq!(snapshot.data, vec![7]);
    }

    #[tokio::test]
    async fn settled_waits_for_the_guard() {
        let cell = std::sync::Arc::new(StateCell::new("test", 0u32));
        let guard = cell.begin().unwrap();

        let waiter = {
            let cell = cell.clone();
            tokio::spawn(async move { cell.settled().await })
        };

        tokio::task::yield_now().await;
        guard.succeed(|n| *n = 5);

        let state = waiter.await.unwrap();
        assert_eq!(state.data, 5);
        assert!(!state.is_loading);
    }
}
