use super::Time;
use std::collections::BinaryHeap;
use std::cmp::Ordering;

#[derive(Debug, Fail)]
#[fail(display = "event scheduled at {} while the clock is at {}", time, now)]
pub struct CausalityError {
    pub now: Time,
    pub time: Time,
}

#[derive(Debug)]
pub struct QueuedEvent<E> {
    pub time: Time,
    pub id: usize,
    pub event: E,
}

impl<E> PartialEq for QueuedEvent<E> {
    fn eq(&self, other: &QueuedEvent<E>) -> bool {
        self.time == other.time && self.id == other.id
    }
}

impl<E> Eq for QueuedEvent<E> {}

impl<E> Ord for QueuedEvent<E> {
    fn cmp(&self, other: &QueuedEvent<E>) -> Ordering {
        // Note that the order is flipped on purpose -- to turn
        // the (maximum) BinaryHeap into a minimum heap.
        other.time.cmp(&self.time).
            then_with(|| other.id.cmp(&self.id))
    }
}

impl<E> PartialOrd for QueuedEvent<E> {
    fn partial_cmp(&self, other: &QueuedEvent<E>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Time-ordered event queue. Events with equal time pop in the order
/// they were pushed.
#[derive(Debug)]
pub struct Scheduler<E> {
    pub time: Time,
    queue: BinaryHeap<QueuedEvent<E>>,
    id_counter: usize,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Scheduler {
            time: Time::min_value(),
            queue: BinaryHeap::new(),
            id_counter: 0,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, time: Time, event: E) -> Result<(), CausalityError> {
        if time < self.time {
            return Err(CausalityError { now: self.time, time });
        }
        let qe = QueuedEvent {
            time: time,
            id: self.id_counter,
            event: event,
        };
        self.id_counter += 1;
        self.queue.push(qe);
        Ok(())
    }

    /// Removes the earliest event and advances the clock to its time.
    pub fn pop_min(&mut self) -> Option<(Time, E)> {
        let qe = self.queue.pop()?;
        self.time = qe.time;
        Some((qe.time, qe.event))
    }

    pub fn peek_time(&self) -> Option<Time> {
        self.queue.peek().map(|qe| qe.time)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// Pending events in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = &E> {
        self.queue.iter().map(|qe| &qe.event)
    }
}
