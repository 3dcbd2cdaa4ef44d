//! Events move flights from node to node.
//!
//! Terminal and taxiway events act at once. Runway and fix events go
//! through the node's queue: the flight waits until the queue's next slot
//! opens, and a single release event (an event without a flight) is kept
//! pending while anyone is waiting.

use log::{debug, trace};
use crate::eventsim::{Process, Time};
use super::flight::{Flight, FlightField, FlightId};
use super::node::{Direction, HoldQueue, Node, NodeId, NodeKind};
use super::terminal;
use super::{Airspace, Scheduler, SimError};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Terminal,
    Taxiway,
    Runway,
    Fix,
}

impl EventKind {
    pub fn for_node(kind: NodeKind) -> EventKind {
        match kind {
            NodeKind::Terminal => EventKind::Terminal,
            NodeKind::Taxiway => EventKind::Taxiway,
            NodeKind::Runway => EventKind::Runway,
            NodeKind::Fix => EventKind::Fix,
        }
    }

    pub fn node_kind(self) -> NodeKind {
        match self {
            EventKind::Terminal => NodeKind::Terminal,
            EventKind::Taxiway => NodeKind::Taxiway,
            EventKind::Runway => NodeKind::Runway,
            EventKind::Fix => NodeKind::Fix,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub node: NodeId,
    pub flight: Option<FlightId>,
    pub command: Direction,
    pub time: Time,
}

impl Event {
    pub fn new(kind: EventKind, node: NodeId, flight: Option<FlightId>, command: Direction, time: Time) -> Event {
        Event { kind, node, flight, command, time }
    }

    /// An event that only re-checks the queue of `node` in direction `command`.
    pub fn release(kind: EventKind, node: NodeId, command: Direction, time: Time) -> Event {
        Event::new(kind, node, None, command, time)
    }

    /// Like `new`, with the command given as `DEP` or `ARR`.
    pub fn with_command(kind: EventKind, node: NodeId, flight: Option<FlightId>, command: &str, time: Time)
                        -> Result<Event, SimError> {
        Ok(Event::new(kind, node, flight, command.parse()?, time))
    }

    pub fn is_release(&self) -> bool {
        self.flight.is_none()
    }
}

/// The node kind and command that follow a node in a route, or `None` at
/// the end of a leg.
pub fn successor(kind: EventKind, command: Direction) -> Option<(NodeKind, Direction)> {
    use self::Direction::*;
    match (kind, command) {
        (EventKind::Terminal, Departure) => Some((NodeKind::Taxiway, Departure)),
        (EventKind::Taxiway, Departure) => Some((NodeKind::Runway, Departure)),
        (EventKind::Runway, Departure) => Some((NodeKind::Fix, Departure)),
        (EventKind::Fix, Departure) => Some((NodeKind::Fix, Arrival)),
        (EventKind::Fix, Arrival) => Some((NodeKind::Runway, Arrival)),
        (EventKind::Runway, Arrival) => Some((NodeKind::Taxiway, Arrival)),
        (EventKind::Taxiway, Arrival) => Some((NodeKind::Terminal, Arrival)),
        (EventKind::Terminal, Arrival) => None,
    }
}

/// Takes the flight's next route node, which must be a `expected` node
/// serving `command`, and builds the event for it.
fn next_event(flight: &mut Flight, nodes: &[Node], expected: NodeKind, command: Direction, time: Time)
              -> Result<Event, SimError> {
    let after = flight.route.last_node();
    let next = flight.route.next_node()
        .ok_or(SimError::RouteExhausted { flight: flight.id, after })?;
    let node = nodes.get(next).ok_or(SimError::UnknownNode(next))?;
    let matches = node.kind() == expected && match *node {
        Node::Fix(ref fix) => fix.direction == command,
        _ => true,
    };
    if !matches {
        return Err(SimError::UnexpectedNode {
            flight: flight.id,
            expected,
            direction: command,
            found: node.kind(),
            node: next,
        });
    }
    Ok(Event::new(EventKind::for_node(expected), next, Some(flight.id), command, time))
}

/// The departure event that starts a leg at its gate.
pub fn first_event(flight: &mut Flight, nodes: &[Node], time: Time) -> Result<Event, SimError> {
    next_event(flight, nodes, NodeKind::Terminal, Direction::Departure, time)
}

fn onward(kind: EventKind, command: Direction, flight: &mut Flight, nodes: &[Node], time: Time)
          -> Result<Option<Event>, SimError> {
    match successor(kind, command) {
        Some((expected, dir)) => next_event(flight, nodes, expected, dir, time).map(Some),
        None => Ok(None),
    }
}

fn schedule(scheduler: &mut Scheduler, ev: Event) -> Result<(), SimError> {
    trace!("schedule {:?}", ev);
    scheduler.push(ev.time, ev)?;
    Ok(())
}

fn queue_of(nodes: &mut [Node], node: NodeId, direction: Direction) -> Result<&mut HoldQueue, SimError> {
    nodes[node].queue_mut(direction).ok_or(SimError::NoQueue { node, direction })
}

impl Process<Airspace> for Event {
    type Error = SimError;

    fn process(self, time: Time, world: &mut Airspace, scheduler: &mut Scheduler) -> Result<(), SimError> {
        debug_assert_eq!(time, self.time);
        let found = world.nodes.get(self.node).ok_or(SimError::UnknownNode(self.node))?.kind();
        if found != self.kind.node_kind() {
            return Err(SimError::WrongEventKind { event: self.kind, found, node: self.node });
        }
        match self.kind {
            EventKind::Terminal => self.at_terminal(world, scheduler),
            EventKind::Taxiway => self.at_taxiway(world, scheduler),
            EventKind::Runway | EventKind::Fix => self.at_queue(world, scheduler),
        }
    }
}

impl Event {
    fn flight_id(&self) -> Result<FlightId, SimError> {
        self.flight.ok_or(SimError::MissingFlight(self.kind, self.node))
    }

    fn at_terminal(self, world: &mut Airspace, scheduler: &mut Scheduler) -> Result<(), SimError> {
        let fid = self.flight_id()?;
        let Airspace { ref nodes, ref mut flights, ref nas } = *world;
        let terminal = match nodes[self.node] {
            Node::Terminal(ref t) => t,
            _ => unreachable!(),
        };
        match self.command {
            Direction::Departure => {
                let flight = &mut flights[fid];
                let out = terminal.depart(flight, self.time);
                debug!("t={} flight {}/{} out at {} from {}", self.time, flight.itinerary, flight.leg,
                       out, nas.airports.name(terminal.airport));
                if let Some(ev) = onward(self.kind, self.command, flight, nodes, out)? {
                    schedule(scheduler, ev)?;
                }
            }
            Direction::Arrival => {
                terminal.arrive(&mut flights[fid], self.time);
                debug!("t={} flight {}/{} in at {}", self.time, flights[fid].itinerary, flights[fid].leg,
                       nas.airports.name(terminal.airport));
                if let Some(next) = flights[fid].next_leg {
                    let next_leg = flights.get_mut(next)
                        .ok_or(SimError::UnknownReference(fid, "next leg", next))?;
                    let min_out = terminal::min_out_after(self.time, next_leg);
                    next_leg.set(FlightField::MinOutTime, min_out);
                    schedule(scheduler, first_event(next_leg, nodes, self.time)?)?;
                }
            }
        }
        Ok(())
    }

    fn at_taxiway(self, world: &mut Airspace, scheduler: &mut Scheduler) -> Result<(), SimError> {
        let fid = self.flight_id()?;
        let Airspace { ref nodes, ref mut flights, .. } = *world;
        let taxiway = match nodes[self.node] {
            Node::Taxiway(ref t) => t,
            _ => unreachable!(),
        };
        let flight = &mut flights[fid];
        let done = match self.command {
            Direction::Departure => taxiway.taxi_out(flight, self.time),
            Direction::Arrival => taxiway.taxi_in(flight, self.time),
        };
        if let Some(ev) = onward(self.kind, self.command, flight, nodes, done)? {
            schedule(scheduler, ev)?;
        }
        Ok(())
    }

    /// Shared by runways and fixes.
    fn at_queue(self, world: &mut Airspace, scheduler: &mut Scheduler) -> Result<(), SimError> {
        let Airspace { ref mut nodes, ref mut flights, ref nas } = *world;
        let dir = self.command;

        let served = {
            let queue = queue_of(nodes, self.node, dir)?;
            match self.flight {
                Some(fid) => queue.push(&flights[fid]),
                None => queue.release(),
            }
            queue.take_ready(self.time)
        };

        if let Some(fid) = served {
            let flight = &mut flights[fid];
            let node = &nodes[self.node];
            let slot = node.slot_after(self.time, dir).unwrap_or(self.time);
            let reached = match *node {
                Node::Runway(ref runway) => runway.serve(dir, flight, self.time),
                Node::Fix(ref fix) => fix.serve(flight, self.time),
                _ => unreachable!(),
            };
            debug!("t={} {} {} flight {}/{}, next slot {}", self.time, node.describe(nas), dir,
                   flight.itinerary, flight.leg, slot);
            queue_of(nodes, self.node, dir)?.mark_served(self.time, slot);
            if let Some(ev) = onward(self.kind, dir, flight, nodes, reached)? {
                schedule(scheduler, ev)?;
            }
        }

        if let Some(at) = queue_of(nodes, self.node, dir)?.arm_release() {
            schedule(scheduler, Event::release(self.kind, self.node, dir, at))?;
        }
        Ok(())
    }
}
