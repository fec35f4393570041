//! Base trait for intents.

/// Marker trait for transition requests.
///
/// Intents describe what happened (a fetch started, a page arrived, a like
/// was accepted); reducers decide what that means for the state.
pub trait Intent: Send + 'static {}
