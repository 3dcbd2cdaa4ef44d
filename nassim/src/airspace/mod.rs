//! Airspace simulation: flights moving through terminals, taxiways,
//! runways and fixes.

pub mod flight;
pub mod route;
pub mod queue;
pub mod node;
pub mod terminal;
pub mod taxiway;
pub mod runway;
pub mod pareto;
pub mod fix;
pub mod event;
pub mod network;

use crate::eventsim::{self, CausalityError};
use crate::input::nas::Nas;
use self::event::{Event, EventKind};
use self::flight::{Flight, FlightField, FlightId};
use self::node::{Direction, Node, NodeId, NodeKind};

pub use self::network::BuildOptions;

pub type Sim = eventsim::Simulation<Airspace, Event>;
pub type Scheduler = eventsim::Scheduler<Event>;

#[derive(Debug, Fail)]
pub enum SimError {
    #[fail(display = "flight {} expected a {:?} node ({}) next, found {:?} node {}",
           flight, expected, direction, found, node)]
    UnexpectedNode {
        flight: FlightId,
        expected: NodeKind,
        direction: Direction,
        found: NodeKind,
        node: NodeId,
    },
    #[fail(display = "flight {} has no route node left after {:?}", flight, after)]
    RouteExhausted { flight: FlightId, after: Option<NodeId> },
    #[fail(display = "{:?} event delivered to {:?} node {}", event, found, node)]
    WrongEventKind { event: EventKind, found: NodeKind, node: NodeId },
    #[fail(display = "node {} has no {} queue", node, direction)]
    NoQueue { node: NodeId, direction: Direction },
    #[fail(display = "{:?} event at node {} carries no flight", _0, _1)]
    MissingFlight(EventKind, NodeId),
    #[fail(display = "no node {}", _0)]
    UnknownNode(NodeId),
    #[fail(display = "invalid command {:?}, expected DEP or ARR", _0)]
    InvalidCommand(String),
    #[fail(display = "flight {} refers to unknown {} {}", _0, _1, _2)]
    UnknownReference(FlightId, &'static str, usize),
    #[fail(display = "{}", _0)]
    Causality(#[cause] CausalityError),
}

impl From<CausalityError> for SimError {
    fn from(e: CausalityError) -> SimError {
        SimError::Causality(e)
    }
}

/// The simulated world: reference data, every node, and every flight.
/// Nodes and flights are referred to by their index.
#[derive(Debug)]
pub struct Airspace {
    pub nas: Nas,
    pub nodes: Vec<Node>,
    pub flights: Vec<Flight>,
}

impl Airspace {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn flight(&self, id: FlightId) -> Option<&Flight> {
        self.flights.get(id)
    }

    /// Schedules the first departure of every itinerary. Later legs start
    /// when the previous leg reaches its gate. Returns the number seeded.
    pub fn seed(&mut self, scheduler: &mut Scheduler) -> Result<usize, SimError> {
        let mut seeded = 0;
        let Airspace { ref nodes, ref mut flights, .. } = *self;
        for flight in flights.iter_mut().filter(|f| f.prev_leg.is_none()) {
            let out = flight.opt(FlightField::SchedOut).unwrap_or(0);
            let ev = event::first_event(flight, nodes, out)?;
            scheduler.push(ev.time, ev)?;
            seeded += 1;
        }
        Ok(seeded)
    }
}
