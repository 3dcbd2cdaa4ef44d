use std::io;
use serde::Serialize;
use crate::airspace::flight::{Flight, FlightField};
use crate::airspace::Airspace;
use crate::eventsim::Time;

#[derive(Debug, Serialize)]
pub struct FlightRecord<'a> {
    pub itinerary: i64,
    pub leg: i64,
    pub schedule_id: i64,
    pub carrier: Option<&'a str>,
    pub equipment: Option<&'a str>,
    pub from: &'a str,
    pub to: &'a str,
    pub sched_out: Option<Time>,
    pub sched_in: Option<Time>,
    pub out: Option<Time>,
    pub off: Option<Time>,
    pub on: Option<Time>,
    #[serde(rename = "in")]
    pub in_: Option<Time>,
    pub dep_runway_delay: Option<Time>,
    pub dep_fix_delay: Option<Time>,
    pub arr_fix_delay: Option<Time>,
    pub arr_runway_delay: Option<Time>,
}

impl<'a> FlightRecord<'a> {
    pub fn new(airspace: &'a Airspace, f: &Flight) -> FlightRecord<'a> {
        use crate::airspace::flight::FlightField::*;
        let nas = &airspace.nas;
        let t = |field: FlightField| f.opt(field);
        FlightRecord {
            itinerary: f.itinerary,
            leg: f.leg,
            schedule_id: f.schedule_id,
            carrier: f.carrier.map(|c| nas.carriers.name(c)),
            equipment: f.equipment.map(|e| nas.equipment.name(e)),
            from: nas.airports.name(f.dep_airport),
            to: nas.airports.name(f.arr_airport),
            sched_out: t(SchedOut),
            sched_in: t(SchedIn),
            out: t(ActOut),
            off: t(ActOff),
            on: t(ActOn),
            in_: t(ActIn),
            dep_runway_delay: t(DepRunwayDelay),
            dep_fix_delay: t(DepFixDelay),
            arr_fix_delay: t(ArrFixDelay),
            arr_runway_delay: t(ArrRunwayDelay),
        }
    }
}

pub fn flight_records(airspace: &Airspace) -> Vec<FlightRecord> {
    airspace.flights.iter().map(|f| FlightRecord::new(airspace, f)).collect()
}

pub fn json_flights<W: io::Write>(airspace: &Airspace, f: &mut W) -> Result<(), failure::Error> {
    serde_json::to_writer_pretty(f, &flight_records(airspace))?;
    Ok(())
}
