use crate::eventsim::Time;
use super::flight::{Flight, FlightField};
use super::node::{record_service, Direction, HoldQueue};

/// Boundary between airport and en-route airspace. Successive crossings are
/// kept at least `min_spacing` apart.
#[derive(Debug)]
pub struct Fix {
    pub direction: Direction,
    pub index: usize,
    pub min_spacing: Time,
    pub queue: HoldQueue,
}

impl Fix {
    pub fn new(direction: Direction, index: usize, min_spacing: Time) -> Fix {
        let measure = match direction {
            Direction::Departure => FlightField::ActOff,
            Direction::Arrival => FlightField::CalcOn,
        };
        Fix { direction, index, min_spacing, queue: HoldQueue::new(measure) }
    }

    pub fn next_time(&self, t: Time) -> Time {
        t + self.min_spacing
    }

    /// Lets `flight` cross at `t`. Returns the time it reaches the next node.
    ///
    /// Departures held at the fix leave the ground later, so the crossing
    /// time becomes the actual off time. The flight then reaches its arrival
    /// fix after its airborne time.
    pub fn serve(&self, flight: &mut Flight, t: Time) -> Time {
        match self.direction {
            Direction::Departure => {
                record_service(flight, FlightField::ActOff, FlightField::ActOff, FlightField::DepFixDelay, t);
                let on = t + flight.duration(FlightField::AirborneTime);
                flight.set(FlightField::CalcOn, on);
                on
            }
            Direction::Arrival => {
                record_service(flight, FlightField::CalcOn, FlightField::ActOn, FlightField::ArrFixDelay, t);
                t
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airspace::flight::test_flight;

    #[test]
    fn departure_crossing_sets_off_and_on() {
        let fix = Fix::new(Direction::Departure, 0, 240);
        let mut f = test_flight(0);
        f.set(FlightField::ActOff, 412);
        f.set(FlightField::AirborneTime, 3000);
        assert_eq!(fix.serve(&mut f, 550), 3550);
        assert_eq!(f.times.act_off, Some(550));
        assert_eq!(f.times.dep_fix_delay, Some(138));
        assert_eq!(f.times.calc_on, Some(3550));
        assert_eq!(fix.next_time(550), 790);
    }

    #[test]
    fn arrival_crossing_sets_on() {
        let fix = Fix::new(Direction::Arrival, 3, 90);
        let mut f = test_flight(0);
        f.set(FlightField::CalcOn, 7000);
        assert_eq!(fix.serve(&mut f, 7030), 7030);
        assert_eq!(f.times.act_on, Some(7030));
        assert_eq!(f.times.arr_fix_delay, Some(30));
        assert_eq!(fix.queue.measure(), FlightField::CalcOn);
    }
}
