//! Builds the node network and the flights' routes from a scenario.

use std::collections::HashMap;
use log::{debug, info};
use smallvec::smallvec;
use crate::eventsim::Time;
use crate::input::scenario::{FlightSpec, RunwayMode, RunwaySpec, Scenario};
use super::flight::{Flight, FlightTimes};
use super::fix::Fix;
use super::node::{Direction, Node, NodeId};
use super::route::Route;
use super::runway::{Acceptance, ComputedRates, DemandEstimate, Runway};
use super::taxiway::Taxiway;
use super::terminal::Terminal;
use super::{Airspace, SimError};

pub const DEFAULT_FIX_SPACING: Time = 60;

#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    /// Used for runways whose scenario entry names no mode.
    pub runway_mode: RunwayMode,
    /// Used for fixes declared without a spacing.
    pub fix_spacing: Time,
}

impl Default for BuildOptions {
    fn default() -> BuildOptions {
        BuildOptions { runway_mode: RunwayMode::Historical, fix_spacing: DEFAULT_FIX_SPACING }
    }
}

#[derive(Debug, Clone, Copy)]
struct AirportNodes {
    terminal: NodeId,
    taxiway: NodeId,
    runway: NodeId,
}

/// Runway times expected from the schedule, before any queueing.
fn estimated_runway_times(flights: &[FlightSpec], airport: usize) -> DemandEstimate {
    let departures = flights.iter()
        .filter(|f| f.dep_airport == airport)
        .map(|f| f.sched_out + f.taxi_out.unwrap_or(0))
        .collect();
    let arrivals = flights.iter()
        .filter(|f| f.arr_airport == airport)
        .filter_map(|f| match (f.sched_in, f.airborne) {
            (Some(sched_in), _) => Some(sched_in - f.taxi_in.unwrap_or(0)),
            (None, Some(airborne)) => Some(f.sched_out + f.taxi_out.unwrap_or(0) + airborne),
            (None, None) => None,
        })
        .collect();
    DemandEstimate::new(departures, arrivals)
}

fn acceptance(spec: Option<&RunwaySpec>, default_mode: RunwayMode, demand: DemandEstimate) -> Acceptance {
    let spec = match spec {
        Some(s) => s,
        None => return match default_mode {
            RunwayMode::Historical => Acceptance::unlimited(),
            RunwayMode::Computed => Acceptance::Computed(ComputedRates::default()),
        },
    };
    match spec.mode.unwrap_or(default_mode) {
        RunwayMode::Historical => Acceptance::Historical(spec.rates.clone()),
        RunwayMode::Computed => {
            let mut conditions = spec.conditions.clone();
            conditions.sort_by_key(|&(t, _)| t);
            Acceptance::Computed(ComputedRates {
                conditions: if conditions.is_empty() { None } else { Some(conditions) },
                curves: if spec.curves.is_empty() { None } else { Some(spec.curves.clone()) },
                demand: Some(demand),
            })
        }
    }
}

fn flight_from_spec(id: usize, spec: &FlightSpec, route: Route) -> Flight {
    Flight {
        id,
        itinerary: spec.itinerary,
        leg: spec.leg,
        schedule_id: spec.schedule_id,
        carrier: spec.carrier,
        equipment: spec.equipment,
        dep_airport: spec.dep_airport,
        arr_airport: spec.arr_airport,
        dep_fix: spec.dep_fix,
        arr_fix: spec.arr_fix,
        times: FlightTimes {
            sched_out: Some(spec.sched_out),
            sched_in: spec.sched_in,
            airborne: spec.airborne,
            taxi_out: spec.taxi_out,
            taxi_in: spec.taxi_in,
            pushback: spec.pushback,
            turnaround: spec.turnaround,
            ..FlightTimes::default()
        },
        route,
        prev_leg: None,
        next_leg: None,
    }
}

/// Chains the legs of each itinerary in leg order.
fn link_itineraries(flights: &mut [Flight]) {
    let mut itineraries: HashMap<i64, Vec<(i64, usize)>> = HashMap::new();
    for f in flights.iter() {
        itineraries.entry(f.itinerary).or_insert_with(Vec::new).push((f.leg, f.id));
    }
    for (_, mut legs) in itineraries {
        legs.sort();
        for w in legs.windows(2) {
            let ((_, a), (_, b)) = (w[0], w[1]);
            flights[a].next_leg = Some(b);
            flights[b].prev_leg = Some(a);
        }
    }
}

impl Airspace {
    pub fn build(scenario: Scenario, options: BuildOptions) -> Result<Airspace, SimError> {
        let Scenario { nas, flights: specs, fix_spacing, runways } = scenario;
        let mut nodes = Vec::new();

        let mut airports = Vec::with_capacity(nas.airports.len());
        for (airport, _) in nas.airports.iter() {
            let demand = estimated_runway_times(&specs, airport);
            let terminal = nodes.len();
            nodes.push(Node::Terminal(Terminal::new(airport)));
            nodes.push(Node::Taxiway(Taxiway::new(airport)));
            nodes.push(Node::Runway(Runway::new(airport,
                acceptance(runways.get(&airport), options.runway_mode, demand))));
            airports.push(AirportNodes { terminal, taxiway: terminal + 1, runway: terminal + 2 });
        }

        let mut fixes = HashMap::new();
        for &(direction, table) in &[(Direction::Departure, &nas.departure_fixes),
                                     (Direction::Arrival, &nas.arrival_fixes)] {
            for (index, _) in table.iter() {
                let spacing = fix_spacing.get(&(direction, index)).cloned().unwrap_or(options.fix_spacing);
                fixes.insert((direction, index), nodes.len());
                nodes.push(Node::Fix(Fix::new(direction, index, spacing)));
            }
        }

        let mut flights = Vec::with_capacity(specs.len());
        for (id, spec) in specs.iter().enumerate() {
            let dep = *airports.get(spec.dep_airport)
                .ok_or(SimError::UnknownReference(id, "airport", spec.dep_airport))?;
            let arr = *airports.get(spec.arr_airport)
                .ok_or(SimError::UnknownReference(id, "airport", spec.arr_airport))?;
            let dep_fix = *fixes.get(&(Direction::Departure, spec.dep_fix))
                .ok_or(SimError::UnknownReference(id, "departure fix", spec.dep_fix))?;
            let arr_fix = *fixes.get(&(Direction::Arrival, spec.arr_fix))
                .ok_or(SimError::UnknownReference(id, "arrival fix", spec.arr_fix))?;
            let route = Route::new(smallvec![
                dep.terminal, dep.taxiway, dep.runway, dep_fix,
                arr_fix, arr.runway, arr.taxiway, arr.terminal,
            ]);
            flights.push(flight_from_spec(id, spec, route));
        }
        link_itineraries(&mut flights);

        info!("built airspace: {} airports, {} fixes, {} nodes, {} flights",
              airports.len(), fixes.len(), nodes.len(), flights.len());
        for (id, node) in nodes.iter().enumerate() {
            debug!("node {}: {}", id, node.describe(&nas));
        }
        Ok(Airspace { nas, nodes, flights })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::nas::Nas;

    fn nas() -> Nas {
        let mut nas = Nas::default();
        nas.airports.intern("KATL");
        nas.airports.intern("KJFK");
        nas.departure_fixes.intern("WOMAC");
        nas.arrival_fixes.intern("ERLIN");
        nas
    }

    fn spec(itinerary: i64, leg: i64, from: usize, to: usize, out: Time) -> FlightSpec {
        FlightSpec {
            itinerary, leg, dep_airport: from, arr_airport: to,
            sched_out: out, sched_in: Some(out + 7200), taxi_out: Some(600), taxi_in: Some(300),
            ..FlightSpec::default()
        }
    }

    #[test]
    fn routes_and_itinerary_links() {
        let scenario = Scenario {
            nas: nas(),
            flights: vec![spec(7, 2, 1, 0, 20000), spec(7, 1, 0, 1, 3600), spec(8, 1, 0, 1, 4000)],
            ..Scenario::default()
        };
        let a = Airspace::build(scenario, BuildOptions::default()).unwrap();
        assert_eq!(a.nodes.len(), 8);
        // KATL terminal, taxiway, runway; fixes after the airports
        assert_eq!(a.flights[1].route.nodes(), &[0, 1, 2, 6, 7, 5, 4, 3]);
        assert_eq!(a.flights[0].route.nodes(), &[3, 4, 5, 6, 7, 2, 1, 0]);
        assert_eq!(a.flights[1].next_leg, Some(0));
        assert_eq!(a.flights[0].prev_leg, Some(1));
        assert_eq!(a.flights[2].prev_leg, None);
        assert_eq!(a.flights[2].next_leg, None);
    }

    #[test]
    fn unknown_references_are_rejected() {
        let mut bad = spec(1, 1, 0, 1, 0);
        bad.arr_fix = 4;
        let scenario = Scenario { nas: nas(), flights: vec![bad], ..Scenario::default() };
        match Airspace::build(scenario, BuildOptions::default()) {
            Err(SimError::UnknownReference(0, "arrival fix", 4)) => {}
            other => panic!("unexpected {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn demand_estimate_uses_schedule() {
        let flights = vec![spec(1, 1, 0, 1, 1000), spec(2, 1, 1, 0, 0)];
        let d = estimated_runway_times(&flights, 0);
        // departure off at 1600; arrival on at 7200 - 300
        assert_eq!(d.count(1600), (1, 0));
        assert_eq!(d.count(6900), (0, 1));
    }
}
