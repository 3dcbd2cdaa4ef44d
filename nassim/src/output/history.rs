use std::fmt::Write;
use crate::airspace::event::{Event, EventKind};
use crate::airspace::flight::FlightId;
use crate::airspace::node::{Direction, NodeId};
use crate::airspace::Airspace;
use crate::eventsim::Time;

/// A flight-carrying event as it was processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub time: Time,
    pub flight: FlightId,
    pub node: NodeId,
    pub kind: EventKind,
    pub command: Direction,
}

#[derive(Debug, Default)]
pub struct History {
    pub transitions: Vec<Transition>,
    pub releases: usize,
}

impl History {
    pub fn record(&mut self, time: Time, ev: &Event) {
        match ev.flight {
            Some(flight) => self.transitions.push(Transition {
                time, flight, node: ev.node, kind: ev.kind, command: ev.command,
            }),
            None => self.releases += 1,
        }
    }

    pub fn of_flight(&self, flight: FlightId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.flight == flight)
    }
}

/// Print one node visit per line on the format
/// `itinerary.leg time command node`.
pub fn visits(airspace: &Airspace, h: &History) -> Result<String, failure::Error> {
    let mut s = String::new();
    for t in &h.transitions {
        let f = &airspace.flights[t.flight];
        let node = airspace.node(t.node).map(|n| n.describe(&airspace.nas))
            .unwrap_or_else(|| "?".to_string());
        writeln!(s, "{}.{} {} {} {}", f.itinerary, f.leg, t.time, t.command, node)?;
    }
    Ok(s)
}
