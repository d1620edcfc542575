use std::marker::PhantomData;

use super::mvi::{Intent, Reducer, UiState};

/// Anything a slot can carry as its success payload.
pub trait Payload: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> Payload for T {}

/// Status of one logical operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Never invoked, or reset.
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T: Payload> UiState for ViewState<T> {}

impl<T> ViewState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Success or Error.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Lifecycle events of a slot.
#[derive(Debug, Clone)]
pub enum Lifecycle<T> {
    /// An invocation started.
    Start,
    /// The in-flight call finished.
    Complete(Result<T, String>),
    /// The observer dismissed the result.
    Reset,
}

impl<T: Payload> Intent for Lifecycle<T> {}

/// Idle/previous → Loading → {Success | Error}.
pub struct LifecycleReducer<T>(PhantomData<T>);

impl<T: Payload> Reducer for LifecycleReducer<T> {
    type State = ViewState<T>;
    type Intent = Lifecycle<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            Lifecycle::Start => ViewState::Loading,
            Lifecycle::Complete(result) => match state {
                // Only a pending call may settle; a second completion is dropped.
                ViewState::Loading => match result {
                    Ok(value) => ViewState::Success(value),
                    Err(message) => ViewState::Error(message),
                },
                other => other,
            },
            Lifecycle::Reset => ViewState::Idle,
        }
    }
}
