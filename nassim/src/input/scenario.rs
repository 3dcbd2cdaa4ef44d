use std::collections::HashMap;
use std::str::FromStr;
use crate::airspace::node::Direction;
use crate::airspace::pareto::ParetoCurve;
use crate::airspace::runway::{HistoricalRates, WeatherId};
use crate::eventsim::Time;
use super::nas::Nas;
use super::ParseError;

/// How a runway decides its acceptance rates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunwayMode {
    Historical,
    Computed,
}

impl FromStr for RunwayMode {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<RunwayMode, ParseError> {
        match s {
            "historical" => Ok(RunwayMode::Historical),
            "computed" => Ok(RunwayMode::Computed),
            _ => Err(ParseError::Invalid(0, format!("unknown runway mode {:?}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlightSpec {
    pub itinerary: i64,
    pub leg: i64,
    pub schedule_id: i64,
    pub carrier: Option<usize>,
    pub equipment: Option<usize>,
    pub dep_airport: usize,
    pub arr_airport: usize,
    pub dep_fix: usize,
    pub arr_fix: usize,
    pub sched_out: Time,
    pub sched_in: Option<Time>,
    pub airborne: Option<Time>,
    pub taxi_out: Option<Time>,
    pub taxi_in: Option<Time>,
    pub pushback: Option<Time>,
    pub turnaround: Option<Time>,
}

/// Capacity data for the runway of one airport.
#[derive(Debug, Clone, Default)]
pub struct RunwaySpec {
    pub mode: Option<RunwayMode>,
    pub rates: Option<HistoricalRates>,
    pub curves: HashMap<WeatherId, ParetoCurve>,
    pub conditions: Vec<(Time, WeatherId)>,
}

/// Everything needed to build an airspace.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub nas: Nas,
    pub flights: Vec<FlightSpec>,
    /// Minimum spacing of fixes that declare one.
    pub fix_spacing: HashMap<(Direction, usize), Time>,
    /// Keyed by airport index.
    pub runways: HashMap<usize, RunwaySpec>,
}
