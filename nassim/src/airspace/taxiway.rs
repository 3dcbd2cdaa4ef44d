use crate::eventsim::Time;
use super::flight::{Flight, FlightField};

/// Taxi between gate and runway. Each flight takes its own taxi duration.
#[derive(Debug)]
pub struct Taxiway {
    pub airport: usize,
}

impl Taxiway {
    pub fn new(airport: usize) -> Taxiway {
        Taxiway { airport }
    }

    /// Returns the time the flight reaches the runway.
    pub fn taxi_out(&self, flight: &mut Flight, now: Time) -> Time {
        let off = now + flight.duration(FlightField::TaxiOutTime);
        flight.set(FlightField::CalcOff, off);
        off
    }

    /// Returns the time the flight reaches the gate.
    pub fn taxi_in(&self, flight: &mut Flight, now: Time) -> Time {
        let gate = now + flight.duration(FlightField::TaxiInTime);
        flight.set(FlightField::CalcIn, gate);
        gate
    }
}
