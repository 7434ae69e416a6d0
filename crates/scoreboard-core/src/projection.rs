//! Projection abstraction.

use crate::event::ScoreEvent;

/// A store that folds score events into its own aggregates.
///
/// Implementations own their state and must make each `record` indivisible
/// with respect to their own readers.
pub trait ScoreProjection: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Folds one validated event into the store. Always succeeds.
    fn record(&self, event: &ScoreEvent);
}
