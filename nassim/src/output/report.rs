//! Plain text summary of a finished run.

use std::fmt::Write;
use crate::airspace::flight::{Flight, FlightField};
use crate::airspace::node::{Direction, Node};
use crate::airspace::Airspace;

fn time(f: &Flight, field: FlightField) -> String {
    f.opt(field).map(|t| t.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn flight_line(airspace: &Airspace, f: &Flight) -> String {
    use crate::airspace::flight::FlightField::*;
    let nas = &airspace.nas;
    let delay = |field| f.duration(field);
    format!("{:>6} {:>2} {:<5} -> {:<5} out {:>6} off {:>6} on {:>6} in {:>6}  delay rwy {}/{} fix {}/{}",
            f.itinerary, f.leg,
            nas.airports.name(f.dep_airport), nas.airports.name(f.arr_airport),
            time(f, ActOut), time(f, ActOff), time(f, ActOn), time(f, ActIn),
            delay(DepRunwayDelay), delay(ArrRunwayDelay), delay(DepFixDelay), delay(ArrFixDelay))
}

pub fn report(airspace: &Airspace) -> Result<String, failure::Error> {
    let mut s = String::new();
    writeln!(s, "# Flights ({})", airspace.flights.len())?;
    for f in &airspace.flights {
        writeln!(s, "{}", flight_line(airspace, f))?;
    }
    writeln!(s, "# Queues")?;
    for node in &airspace.nodes {
        for &dir in &[Direction::Departure, Direction::Arrival] {
            if let Some(q) = node.queue(dir) {
                if let Node::Fix(_) = *node {
                    writeln!(s, "{:<24} served {:>5} max queue {:>3}", node.describe(&airspace.nas), q.served(), q.max_len())?;
                } else {
                    writeln!(s, "{:<24} {} served {:>5} max queue {:>3}", node.describe(&airspace.nas), dir, q.served(), q.max_len())?;
                }
            }
        }
    }
    Ok(s)
}
