use super::{
    Config, Context, DEFAULT_CONTEXTS, DEFAULT_RX_CAPACITY, DEFAULT_TX_CAPACITY, Error, Notify,
};
use crate::network::{Clock, Connect, Connection, Resolve};

/// A fixed table of `N` contexts sharing one scheduler.
///
/// Slots are claimed with [`claim`](Self::claim) and handed back with
/// [`release`](Self::release). [`poll`](Self::poll) advances every claimed
/// context once and reports finished operations to the observer `O`.
///
/// Every operation of a claimed context is reported exactly once, including
/// ones ended by calling [`Context::advance`] or [`Context::cancel`] directly
/// through [`get_mut`](Self::get_mut); those are reported by the next
/// [`poll`](Self::poll).
#[derive(Debug)]
pub struct Registry<
    C,
    O = (),
    const N: usize = DEFAULT_CONTEXTS,
    const TX: usize = DEFAULT_TX_CAPACITY,
    const RX: usize = DEFAULT_RX_CAPACITY,
> {
    slots: [Option<Context<C, TX, RX>>; N],
    observer: O,
}

impl<C, O, const N: usize, const TX: usize, const RX: usize> Registry<C, O, N, TX, RX>
where
    C: Connection,
    O: Notify,
{
    /// Creates a registry with every slot free.
    pub fn new(observer: O) -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            observer,
        }
    }

    /// Takes the lowest free slot and initializes it from `config`.
    pub fn claim(&mut self, config: &Config<'_>) -> Result<usize, Error> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(Error::RegistryFull)?;
        self.slots[slot] = Some(Context::new(config)?.with_slot(slot));
        debug!("context {} claimed", slot);
        Ok(slot)
    }

    /// Frees `slot`, cancelling its operation first if one is in flight.
    ///
    /// A completion not reported yet is reported before the slot is freed.
    pub fn release(&mut self, slot: usize) -> Result<(), Error> {
        self.cancel(slot)?;
        self.slots[slot] = None;
        debug!("context {} released", slot);
        Ok(())
    }

    /// The context in `slot`.
    pub fn get(&self, slot: usize) -> Result<&Context<C, TX, RX>, Error> {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .ok_or(Error::InvalidContext)
    }

    /// The context in `slot`, mutably.
    pub fn get_mut(&mut self, slot: usize) -> Result<&mut Context<C, TX, RX>, Error> {
        self.slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or(Error::InvalidContext)
    }

    /// Cancels the operation in flight on `slot`.
    ///
    /// Returns whether anything was cancelled. The cancellation, or an
    /// earlier completion not reported yet, goes to the observer.
    pub fn cancel(&mut self, slot: usize) -> Result<bool, Error> {
        let context = self
            .slots
            .get_mut(slot)
            .and_then(Option::as_mut)
            .ok_or(Error::InvalidContext)?;
        let cancelled = context.cancel();
        Self::report(&mut self.observer, slot, context);
        Ok(cancelled)
    }

    /// Advances every claimed context by one step.
    ///
    /// Returns the number of completions reported during this call.
    pub fn poll<K, R, T>(&mut self, connector: &mut K, resolver: &mut R, clock: &T) -> usize
    where
        K: Connect<Connection = C>,
        R: Resolve,
        T: Clock,
    {
        let now = clock.now();
        let mut finished = 0;
        for (slot, context) in self.slots.iter_mut().enumerate() {
            let Some(context) = context else { continue };
            // Operations ended outside the registry since the last poll.
            finished += usize::from(Self::report(&mut self.observer, slot, context));
            context.advance(connector, resolver, now);
            finished += usize::from(Self::report(&mut self.observer, slot, context));
        }
        finished
    }

    fn report(observer: &mut O, slot: usize, context: &mut Context<C, TX, RX>) -> bool {
        match context.take_completion() {
            Some((kind, outcome)) => {
                observer.on_complete(slot, kind, outcome);
                true
            }
            None => false,
        }
    }

    /// Number of claimed slots.
    pub fn claimed(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}
