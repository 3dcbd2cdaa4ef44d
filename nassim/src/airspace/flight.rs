use crate::eventsim::Time;
use super::route::Route;

pub type FlightId = usize;

/// Value reported for a time field that has not been set.
pub const UNSET: Time = -1;

macro_rules! flight_times {
    ($($variant:ident => $field:ident),* $(,)*) => {
        /// Time fields of a flight, addressable by name so that queues can be
        /// ordered on any of them.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum FlightField {
            $($variant),*
        }

        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct FlightTimes {
            $(pub $field: Option<Time>),*
        }

        impl FlightTimes {
            pub fn get(&self, field: FlightField) -> Option<Time> {
                match field {
                    $(FlightField::$variant => self.$field),*
                }
            }

            fn slot(&mut self, field: FlightField) -> &mut Option<Time> {
                match field {
                    $(FlightField::$variant => &mut self.$field),*
                }
            }
        }
    }
}

flight_times! {
    SchedOut => sched_out,
    SchedIn => sched_in,
    CalcOut => calc_out,
    ActOut => act_out,
    CalcOff => calc_off,
    ActOff => act_off,
    CalcOn => calc_on,
    ActOn => act_on,
    CalcIn => calc_in,
    ActIn => act_in,
    AirborneTime => airborne,
    DepRunwayDelay => dep_runway_delay,
    DepFixDelay => dep_fix_delay,
    ArrFixDelay => arr_fix_delay,
    ArrRunwayDelay => arr_runway_delay,
    TurnaroundTime => turnaround,
    PushbackTime => pushback,
    TaxiOutTime => taxi_out,
    TaxiInTime => taxi_in,
    MinOutTime => min_out,
}

/// One scheduled leg.
#[derive(Debug, Clone)]
pub struct Flight {
    pub id: FlightId,
    pub itinerary: i64,
    pub leg: i64,
    pub schedule_id: i64,
    pub carrier: Option<usize>,
    pub equipment: Option<usize>,
    pub dep_airport: usize,
    pub arr_airport: usize,
    pub dep_fix: usize,
    pub arr_fix: usize,
    pub times: FlightTimes,
    pub route: Route,
    pub prev_leg: Option<FlightId>,
    pub next_leg: Option<FlightId>,
}

impl Flight {
    /// Returns the field value, or `UNSET`.
    pub fn get(&self, field: FlightField) -> Time {
        self.times.get(field).unwrap_or(UNSET)
    }

    /// Sets the field. Passing `UNSET` clears it.
    pub fn set(&mut self, field: FlightField, value: Time) {
        *self.times.slot(field) = if value == UNSET { None } else { Some(value) };
    }

    pub fn opt(&self, field: FlightField) -> Option<Time> {
        self.times.get(field)
    }

    /// A duration field, with unset durations counted as zero.
    pub fn duration(&self, field: FlightField) -> Time {
        self.opt(field).unwrap_or(0)
    }
}

#[cfg(test)]
pub fn test_flight(id: FlightId) -> Flight {
    Flight {
        id: id,
        itinerary: id as i64,
        leg: 1,
        schedule_id: id as i64,
        carrier: None,
        equipment: None,
        dep_airport: 0,
        arr_airport: 1,
        dep_fix: 0,
        arr_fix: 0,
        times: FlightTimes::default(),
        route: Route::default(),
        prev_leg: None,
        next_leg: None,
    }
}
