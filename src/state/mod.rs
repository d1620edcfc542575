//! Request-lifecycle state shared by every feature container.
//!
//! A [`Slot`] holds one [`ViewState`] per operation family and publishes
//! it through a `tokio::sync::watch` channel. [`run_operation`] is the
//! single engine that drives a slot through
//! `Idle/previous → Loading → Success | Error`.

mod mvi;
mod scope;
mod slot;
mod view_state;

pub use mvi::{Intent, Reducer, UiState};
pub use scope::TaskScope;
pub use slot::{run_operation, run_operation_with, Invocation, ListSlot, Slot};
pub use view_state::{Lifecycle, LifecycleReducer, Payload, ViewState};
