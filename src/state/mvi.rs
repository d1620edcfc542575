//! Model-View-Intent primitives behind the request lifecycle.
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ observers
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```

/// Marker trait for state objects published to observers.
///
/// States should be:
/// - Immutable (Clone to create new states)
/// - Self-contained (all data needed to render)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + Sync + 'static {}

/// Marker trait for intents (caller actions or async completions).
pub trait Intent: Send + 'static {}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> State
pub trait Reducer {
    type State: UiState;
    type Intent: Intent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State;
}
