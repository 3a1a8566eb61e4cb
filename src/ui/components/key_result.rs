/// Outcome of offering a key event to a component.
///
/// Views try their components in order and stop at the first one that does
/// not answer `NotHandled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult<T> {
  /// Consumed, nothing for the parent to do
  Handled,
  /// Consumed, with an event for the parent
  Event(T),
  /// Not consumed
  NotHandled,
}
