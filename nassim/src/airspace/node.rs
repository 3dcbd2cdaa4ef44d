use std::fmt;
use std::str::FromStr;
use crate::eventsim::Time;
use crate::input::nas::Nas;
use super::flight::{Flight, FlightField, FlightId};
use super::queue::FlightQueue;
use super::terminal::Terminal;
use super::taxiway::Taxiway;
use super::runway::Runway;
use super::fix::Fix;
use super::SimError;

pub type NodeId = usize;

/// Phase of a flight leg, also used as the command carried by events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Departure,
    Arrival,
}

impl FromStr for Direction {
    type Err = SimError;
    fn from_str(s: &str) -> Result<Direction, SimError> {
        match s.to_ascii_uppercase().as_str() {
            "DEP" => Ok(Direction::Departure),
            "ARR" => Ok(Direction::Arrival),
            _ => Err(SimError::InvalidCommand(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Direction::Departure => write!(f, "DEP"),
            Direction::Arrival => write!(f, "ARR"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Terminal,
    Taxiway,
    Runway,
    Fix,
}

/// A queue with a next-available slot and a hold flag. The hold flag is set
/// while exactly one release event for this queue is pending.
#[derive(Debug)]
pub struct HoldQueue {
    queue: FlightQueue,
    next_time: Time,
    last_time: Option<Time>,
    hold: bool,
    served: usize,
    max_len: usize,
}

impl HoldQueue {
    pub fn new(measure: FlightField) -> HoldQueue {
        HoldQueue {
            queue: FlightQueue::new(measure),
            next_time: Time::min_value(),
            last_time: None,
            hold: false,
            served: 0,
            max_len: 0,
        }
    }

    pub fn measure(&self) -> FlightField { self.queue.measure() }
    pub fn next_time(&self) -> Time { self.next_time }
    pub fn last_time(&self) -> Option<Time> { self.last_time }
    pub fn is_held(&self) -> bool { self.hold }
    pub fn len(&self) -> usize { self.queue.len() }
    pub fn is_empty(&self) -> bool { self.queue.is_empty() }
    pub fn served(&self) -> usize { self.served }
    pub fn max_len(&self) -> usize { self.max_len }

    pub fn push(&mut self, flight: &Flight) {
        self.queue.push(flight);
        self.max_len = self.max_len.max(self.queue.len());
    }

    /// The release event for this queue has fired.
    pub fn release(&mut self) {
        self.hold = false;
    }

    /// Pops the first flight if the slot at `t` is open.
    pub fn take_ready(&mut self, t: Time) -> Option<FlightId> {
        if t >= self.next_time { self.queue.pop_min() } else { None }
    }

    pub fn mark_served(&mut self, t: Time, next_time: Time) {
        self.last_time = Some(t);
        self.next_time = next_time;
        self.served += 1;
    }

    /// If flights are still waiting and no release is pending, arms the hold
    /// and returns the time the release should fire.
    pub fn arm_release(&mut self) -> Option<Time> {
        if !self.queue.is_empty() && !self.hold {
            self.hold = true;
            Some(self.next_time)
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

/// Writes the outcome of serving `flight` at `t`: the delay against the
/// time it was queued for, and the new actual time.
pub fn record_service(flight: &mut Flight, target: FlightField, actual: FlightField,
                      delay: FlightField, t: Time) -> Time {
    let wanted = flight.opt(target).unwrap_or(t);
    flight.set(delay, t - wanted);
    flight.set(actual, t);
    t - wanted
}

#[derive(Debug)]
pub enum Node {
    Terminal(Terminal),
    Taxiway(Taxiway),
    Runway(Runway),
    Fix(Fix),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match *self {
            Node::Terminal(_) => NodeKind::Terminal,
            Node::Taxiway(_) => NodeKind::Taxiway,
            Node::Runway(_) => NodeKind::Runway,
            Node::Fix(_) => NodeKind::Fix,
        }
    }

    /// The queue serving `dir`, for the node kinds that have one.
    pub fn queue(&self, dir: Direction) -> Option<&HoldQueue> {
        match *self {
            Node::Runway(ref r) => Some(r.queue(dir)),
            Node::Fix(ref f) if f.direction == dir => Some(&f.queue),
            _ => None,
        }
    }

    pub fn queue_mut(&mut self, dir: Direction) -> Option<&mut HoldQueue> {
        match *self {
            Node::Runway(ref mut r) => Some(r.queue_mut(dir)),
            Node::Fix(ref mut f) if f.direction == dir => Some(&mut f.queue),
            _ => None,
        }
    }

    /// Next available slot after an operation in direction `dir` at `t`.
    pub fn slot_after(&self, t: Time, dir: Direction) -> Option<Time> {
        match *self {
            Node::Runway(ref r) => Some(r.next_time(t, dir)),
            Node::Fix(ref f) => Some(f.next_time(t)),
            _ => None,
        }
    }

    pub fn describe(&self, nas: &Nas) -> String {
        match *self {
            Node::Terminal(ref x) => format!("terminal {}", nas.airports.name(x.airport)),
            Node::Taxiway(ref x) => format!("taxiway {}", nas.airports.name(x.airport)),
            Node::Runway(ref x) => format!("runway {}", nas.airports.name(x.airport)),
            Node::Fix(ref x) => match x.direction {
                Direction::Departure => format!("departure fix {}", nas.departure_fixes.name(x.index)),
                Direction::Arrival => format!("arrival fix {}", nas.arrival_fixes.name(x.index)),
            },
        }
    }
}
