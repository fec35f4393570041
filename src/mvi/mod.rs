//! Model-View-Intent primitives.
//!
//! ```text
//! operation ──→ Intent ──→ Reducer ──→ State ──→ Broadcaster ──→ Observers
//! ```
//!
//! - **State**: snapshot of everything an observer needs to render
//! - **Intent**: a transition request (load started, page loaded, ...)
//! - **Reducer**: pure function that produces the next state

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
