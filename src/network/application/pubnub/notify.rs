use super::{OperationKind, Outcome};

/// Observer told about every finished operation.
///
/// [`Registry`](super::Registry) calls [`on_complete`](Notify::on_complete)
/// exactly once per operation of a claimed context: from the
/// [`poll`](super::Registry::poll) or [`cancel`](super::Registry::cancel)
/// that ended it, or from the next poll if the context was advanced or
/// cancelled directly. The context is already
/// readable from the callback's caller at that point, but not from inside
/// the callback, so implementations usually just record the slot.
///
/// `()` ignores every notification and closures `FnMut(usize, OperationKind, Outcome)`
/// are observers too.
pub trait Notify {
    /// Operation `kind` on context `slot` ended with `outcome`.
    fn on_complete(&mut self, slot: usize, kind: OperationKind, outcome: Outcome);
}

impl Notify for () {
    fn on_complete(&mut self, _slot: usize, _kind: OperationKind, _outcome: Outcome) {}
}

impl<F> Notify for F
where
    F: FnMut(usize, OperationKind, Outcome),
{
    fn on_complete(&mut self, slot: usize, kind: OperationKind, outcome: Outcome) {
        self(slot, kind, outcome)
    }
}
