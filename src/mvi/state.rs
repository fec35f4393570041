//! Base trait for view state.

/// Marker trait for state snapshots.
///
/// States are cloned out to observers, compared to detect changes, and
/// start from `Default`.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
