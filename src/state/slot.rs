//! Observable slots and the shared operation engine.

use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use super::mvi::Reducer;
use super::scope::TaskScope;
use super::view_state::{Lifecycle, LifecycleReducer, Payload, ViewState};

#[derive(Default)]
struct Flight {
    /// Bumped by every start and reset; a completion only lands if its
    /// epoch is still current.
    epoch: u64,
    in_flight: bool,
}

/// One observable `ViewState` for one operation family.
pub struct Slot<T: Payload> {
    tx: watch::Sender<ViewState<T>>,
    flight: Mutex<Flight>,
}

impl<T: Payload> Default for Slot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> Slot<T> {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ViewState::Idle);
        Self {
            tx,
            flight: Mutex::new(Flight::default()),
        }
    }

    /// Last published state.
    pub fn get(&self) -> ViewState<T> {
        self.tx.borrow().clone()
    }

    /// Receiver that sees every subsequent publication.
    pub fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.tx.subscribe()
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight.lock().in_flight
    }

    /// Publish `Idle`. A call still in flight settles silently.
    pub fn reset(&self) {
        let mut flight = self.flight.lock();
        flight.epoch += 1;
        flight.in_flight = false;
        self.dispatch(Lifecycle::Reset);
    }

    /// Apply `f` to the payload if the slot currently holds `Success`.
    pub fn update_success(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_if_modified(|state| match state {
            ViewState::Success(value) => {
                let before = value.clone();
                f(value);
                *value != before
            }
            _ => false,
        });
    }

    /// Mark a call as started and publish `Loading`.
    ///
    /// Returns `None` if a call is already in flight.
    fn begin(&self) -> Option<u64> {
        let mut flight = self.flight.lock();
        if flight.in_flight {
            return None;
        }
        flight.epoch += 1;
        flight.in_flight = true;
        self.dispatch(Lifecycle::Start);
        Some(flight.epoch)
    }

    /// Settle the call started at `epoch`.
    ///
    /// `land` runs only when the epoch is still current, with the flight
    /// lock held, so a concurrent `reset` either precedes it or sees its
    /// effects.
    fn finish<U>(
        &self,
        epoch: u64,
        result: Result<U, String>,
        land: impl FnOnce(U) -> Result<T, String>,
    ) {
        let mut flight = self.flight.lock();
        if flight.epoch != epoch {
            tracing::debug!(epoch, current = flight.epoch, "Dropping stale result");
            return;
        }
        flight.in_flight = false;
        self.dispatch(Lifecycle::Complete(result.and_then(land)));
    }

    fn dispatch(&self, intent: Lifecycle<T>) {
        self.tx.send_if_modified(|state| {
            let next = LifecycleReducer::reduce(state.clone(), intent);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
    }
}

/// Handle to an invocation, started or joined.
pub struct Invocation<T: Payload> {
    rx: watch::Receiver<ViewState<T>>,
    coalesced: bool,
}

impl<T: Payload> Invocation<T> {
    /// True when this invocation joined a call that was already in flight.
    pub fn is_coalesced(&self) -> bool {
        self.coalesced
    }

    /// Wait until the slot leaves `Loading` and return that state.
    pub async fn settled(mut self) -> ViewState<T> {
        let settled = match self.rx.wait_for(|state| !state.is_loading()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.rx.borrow().clone())
    }
}

/// Run `call` against `slot`.
///
/// Publishes `Loading` before returning, spawns the call on `scope`, and
/// publishes exactly one terminal state when it completes. If the slot is
/// already in flight nothing is spawned; the returned handle follows the
/// pending call instead.
pub fn run_operation<T, F>(slot: &Arc<Slot<T>>, scope: &TaskScope, call: F) -> Invocation<T>
where
    T: Payload,
    F: Future<Output = Result<T, String>> + Send + 'static,
{
    run_operation_with(slot, scope, call, Ok)
}

/// Like [`run_operation`], with `land` turning the call's value into the
/// published payload.
///
/// `land` is where side effects belong (cache updates, token writes). It
/// runs only if the call is still current when it completes; after a
/// `reset` it is skipped together with the result.
pub fn run_operation_with<T, U, F, L>(
    slot: &Arc<Slot<T>>,
    scope: &TaskScope,
    call: F,
    land: L,
) -> Invocation<T>
where
    T: Payload,
    U: Send + 'static,
    F: Future<Output = Result<U, String>> + Send + 'static,
    L: FnOnce(U) -> Result<T, String> + Send + 'static,
{
    let rx = slot.subscribe();
    let Some(epoch) = slot.begin() else {
        tracing::debug!("Operation already in flight, joining it");
        return Invocation { rx, coalesced: true };
    };

    let guard = scopeguard::guard(Arc::clone(slot), move |slot| {
        slot.finish(epoch, Err("Operation cancelled".to_string()), Ok::<T, String>);
    });
    scope.spawn(async move {
        let result = call.await;
        let slot = scopeguard::ScopeGuard::into_inner(guard);
        slot.finish(epoch, result, land);
    });

    Invocation {
        rx,
        coalesced: false,
    }
}

/// Slot for list-producing families.
///
/// Alongside the `ViewState`, keeps the last successfully loaded list so
/// observers can keep showing it while a refresh is loading.
pub struct ListSlot<T: Payload> {
    state: Arc<Slot<Vec<T>>>,
    items: Arc<watch::Sender<Vec<T>>>,
}

impl<T: Payload> Clone for ListSlot<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Payload> Default for ListSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Payload> ListSlot<T> {
    pub fn new() -> Self {
        let (items, _rx) = watch::channel(Vec::new());
        Self {
            state: Arc::new(Slot::new()),
            items: Arc::new(items),
        }
    }

    pub fn state(&self) -> &Arc<Slot<Vec<T>>> {
        &self.state
    }

    /// Last known good list.
    pub fn items(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn subscribe_items(&self) -> watch::Receiver<Vec<T>> {
        self.items.subscribe()
    }

    /// Drop entries locally from both the cached list and a `Success` payload.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) {
        self.items.send_if_modified(|items| {
            let before = items.len();
            items.retain(|item| keep(item));
            items.len() != before
        });
        self.state.update_success(|items| items.retain(|item| keep(item)));
    }

    /// Swap the first entry matching `matches` for `item`, in the cache
    /// and in a `Success` payload.
    pub fn replace_where(&self, matches: impl Fn(&T) -> bool, item: T) {
        self.items
            .send_if_modified(|items| replace_first(items, &matches, &item));
        self.state.update_success(|items| {
            replace_first(items, &matches, &item);
        });
    }

    /// Like [`run_operation`]; a successful list is also cached, unless the
    /// call was reset before it completed.
    pub fn run<F>(&self, scope: &TaskScope, call: F) -> Invocation<Vec<T>>
    where
        F: Future<Output = Result<Vec<T>, String>> + Send + 'static,
    {
        let items = Arc::clone(&self.items);
        run_operation_with(&self.state, scope, call, move |list: Vec<T>| {
            items.send_replace(list.clone());
            Ok(list)
        })
    }

    pub fn reset(&self) {
        self.state.reset();
    }
}

fn replace_first<T: Payload>(items: &mut [T], matches: &impl Fn(&T) -> bool, item: &T) -> bool {
    match items.iter_mut().find(|existing| matches(existing)) {
        Some(existing) if existing != item => {
            *existing = item.clone();
            true
        }
        _ => false,
    }
}
