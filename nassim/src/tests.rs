use crate::*;
use crate::airspace::flight::FlightField;
use crate::airspace::flight::FlightField::*;
use crate::airspace::node::{Direction, NodeKind};
use crate::airspace::BuildOptions;
use crate::eventsim::Time;

fn airspace(scenario: &str) -> Airspace {
    let scenario = get_scenario_string(scenario).unwrap();
    Airspace::build(scenario, BuildOptions::default()).unwrap()
}

fn field(a: &Airspace, f: FlightField) -> Vec<Time> {
    a.flights.iter().map(|x| x.get(f)).collect()
}

const SPACED_FIX: &str = "
    airport A
    airport B
    fix DEP F1 spacing=240
    fix ARR F2 spacing=0
    flight itin=1 leg=1 from=A to=B depfix=F1 arrfix=F2 out=310 airborne=1000
    flight itin=2 leg=1 from=A to=B depfix=F1 arrfix=F2 out=520 airborne=1000
    flight itin=3 leg=1 from=A to=B depfix=F1 arrfix=F2 out=412 airborne=1000
";

const HISTORICAL_RUNWAY: &str = "
    airport A
    airport B
    fix DEP D spacing=0
    fix ARR R spacing=0
    rates A start=0 dep=2,0,4 arr=
    flight itin=1 leg=1 from=A to=B depfix=D arrfix=R out=0 airborne=600
    flight itin=2 leg=1 from=A to=B depfix=D arrfix=R out=10 airborne=600
    flight itin=3 leg=1 from=A to=B depfix=D arrfix=R out=20 airborne=600
";

#[test]
fn fix_serializes_crossings() {
    let (a, history) = simulate(airspace(SPACED_FIX)).unwrap();
    assert_eq!(field(&a, ActOff), vec![310, 790, 550]);
    assert_eq!(field(&a, DepFixDelay), vec![0, 270, 138]);
    assert_eq!(field(&a, ActIn), vec![1310, 1790, 1550]);
    assert_eq!(history.releases, 2);
}

#[test]
fn every_route_node_is_visited_once() {
    let (a, history) = simulate(airspace(SPACED_FIX)).unwrap();
    assert_eq!(history.transitions.len(), 3 * 8);
    for f in &a.flights {
        let visits: Vec<_> = history.of_flight(f.id).collect();
        assert_eq!(visits.len(), f.route.len());
        assert_eq!(visits.iter().map(|t| t.node).collect::<Vec<_>>(), f.route.nodes());
        assert_eq!(Some(visits[visits.len() - 1].node), f.route.last_node());
        assert_eq!(f.route.remaining(), 0);
    }
}

#[test]
fn processed_times_never_decrease() {
    let (_, history) = simulate(airspace(HISTORICAL_RUNWAY)).unwrap();
    let times: Vec<_> = history.transitions.iter().map(|t| t.time).collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn one_pending_release_per_queue() {
    let (mut sim, _) = start_simulation(airspace(HISTORICAL_RUNWAY)).unwrap();
    let mut steps = 0;
    while sim.step().unwrap() {
        steps += 1;
        for (id, node) in sim.world.nodes.iter().enumerate() {
            for &dir in &[Direction::Departure, Direction::Arrival] {
                if let Some(q) = node.queue(dir) {
                    let pending = sim.scheduler.pending()
                        .filter(|ev| ev.is_release() && ev.node == id && ev.command == dir)
                        .count();
                    assert!(pending <= 1);
                    assert_eq!(pending == 1, q.is_held());
                }
            }
        }
    }
    assert_eq!(steps, sim.processed());
    assert!(sim.world.nodes.iter().all(|n| n.queue(Direction::Departure).map(|q| q.is_empty()).unwrap_or(true)));
}

#[test]
fn historical_rates_space_departures() {
    let (a, _) = simulate(airspace(HISTORICAL_RUNWAY)).unwrap();
    assert_eq!(field(&a, ActOff), vec![0, 450, 900]);
    assert_eq!(field(&a, DepRunwayDelay), vec![0, 440, 880]);
    assert_eq!(field(&a, ActIn), vec![600, 1050, 1500]);
}

#[test]
fn computed_rates_follow_demand() {
    let (a, _) = simulate(airspace("
        airport A
        airport B
        weather VMC
        fix DEP D spacing=0
        fix ARR R spacing=0
        runway A mode=computed
        pareto A VMC 0:60 30:50 50:30 60:0
        condition A 0 VMC
        flight itin=1 leg=1 from=A to=B depfix=D arrfix=R out=0 airborne=600
        flight itin=2 leg=1 from=A to=B depfix=D arrfix=R out=0 airborne=600
        flight itin=3 leg=1 from=A to=B depfix=D arrfix=R out=0 airborne=600
    ")).unwrap();
    // all three leave in the first epoch: 60 an epoch, then the midpoint rate of 40
    assert_eq!(field(&a, ActOff), vec![0, 15, 37]);
}

#[test]
fn next_leg_waits_for_turnaround() {
    let (a, history) = simulate(airspace("
        airport A
        airport B
        fix DEP D1
        fix ARR R1
        flight itin=9 leg=2 from=B to=A depfix=D1 arrfix=R1 out=3000 airborne=1000 taxiout=100 pushback=300 turnaround=1800
        flight itin=9 leg=1 from=A to=B depfix=D1 arrfix=R1 out=0 airborne=3000 taxiout=100 taxiin=200
    ")).unwrap();
    let (second, first) = (&a.flights[0], &a.flights[1]);
    assert_eq!(first.get(ActIn), 3300);
    assert_eq!(second.get(MinOutTime), 5100);
    assert_eq!(second.get(ActOut), 5100);
    assert_eq!(second.get(ActOff), 5200);
    assert_eq!(second.get(ActIn), 6200);
    assert_eq!(history.of_flight(0).next().map(|t| t.time), Some(3300));
}

#[test]
fn early_arrival_keeps_schedule() {
    let (a, _) = simulate(airspace("
        airport A
        airport B
        fix DEP D1
        fix ARR R1
        flight itin=4 leg=1 from=A to=B depfix=D1 arrfix=R1 out=0 airborne=1000
        flight itin=4 leg=2 from=B to=A depfix=D1 arrfix=R1 out=5000 airborne=1000 turnaround=1800 pushback=300
    ")).unwrap();
    assert_eq!(a.flights[1].get(MinOutTime), 2800);
    assert_eq!(a.flights[1].get(ActOut), 5000);
}

#[test]
fn wrong_route_node_aborts_the_run() {
    use smallvec::smallvec;
    use crate::airspace::route::Route;
    use crate::airspace::SimError;

    let mut a = airspace(SPACED_FIX);
    // terminal straight to runway
    a.flights[0].route = Route::new(smallvec![0, 2, 6, 7, 5, 4, 3]);
    match simulate(a) {
        Err(SimError::UnexpectedNode { flight: 0, expected: NodeKind::Taxiway, found: NodeKind::Runway, node: 2, .. }) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }

    let mut a = airspace(SPACED_FIX);
    a.flights[1].route = Route::new(smallvec![0, 1]);
    match simulate(a) {
        Err(SimError::RouteExhausted { flight: 1, after: Some(1) }) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn reports_name_everything() {
    let (a, history) = simulate(airspace(SPACED_FIX)).unwrap();
    let report = output::report::report(&a).unwrap();
    assert!(report.starts_with("# Flights (3)"));
    assert!(report.contains("departure fix F1"));
    let visits = output::history::visits(&a, &history).unwrap();
    assert_eq!(visits.lines().count(), 24);
    assert_eq!(visits.lines().next(), Some("1.1 310 DEP terminal A"));

    let mut json = Vec::new();
    output::json::json_flights(&a, &mut json).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
    assert_eq!(value[1]["off"], 790);
    assert_eq!(value[1]["from"], "A");
    assert_eq!(value[1]["in"], 1790);
    assert!(value[1]["carrier"].is_null());
}
