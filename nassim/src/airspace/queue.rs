use std::cmp::Reverse;
use std::collections::BinaryHeap;
use crate::eventsim::Time;
use super::flight::{Flight, FlightField, FlightId};

/// Flights waiting at a node, served in order of one of their time fields.
/// Flights with equal measure are served in arrival order.
#[derive(Debug)]
pub struct FlightQueue {
    measure: FlightField,
    heap: BinaryHeap<Reverse<(Time, usize, FlightId)>>,
    seq: usize,
}

impl FlightQueue {
    pub fn new(measure: FlightField) -> FlightQueue {
        FlightQueue { measure, heap: BinaryHeap::new(), seq: 0 }
    }

    pub fn measure(&self) -> FlightField {
        self.measure
    }

    /// The measure is read once, on entry.
    pub fn push(&mut self, flight: &Flight) {
        let key = flight.get(self.measure);
        self.heap.push(Reverse((key, self.seq, flight.id)));
        self.seq += 1;
    }

    pub fn pop_min(&mut self) -> Option<FlightId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    pub fn peek_min(&self) -> Option<FlightId> {
        self.heap.peek().map(|&Reverse((_, _, id))| id)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
