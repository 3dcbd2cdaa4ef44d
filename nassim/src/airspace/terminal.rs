use crate::eventsim::Time;
use super::flight::{Flight, FlightField};

/// Gate area of an airport. Capacity is unlimited, so flights never wait
/// here for each other.
#[derive(Debug)]
pub struct Terminal {
    pub airport: usize,
}

impl Terminal {
    pub fn new(airport: usize) -> Terminal {
        Terminal { airport }
    }

    /// Pushes a departure leg back from the gate. Returns the out time.
    pub fn depart(&self, flight: &mut Flight, now: Time) -> Time {
        let out = out_time(flight, now);
        flight.set(FlightField::CalcOut, out);
        flight.set(FlightField::ActOut, out);
        out
    }

    /// Parks an arriving leg at the gate.
    pub fn arrive(&self, flight: &mut Flight, now: Time) {
        flight.set(FlightField::ActIn, now);
    }
}

/// Scheduled out time, unless the aircraft came in too late for it. In that
/// case the later of scheduled out plus pushback and the minimum out time.
pub fn out_time(flight: &Flight, now: Time) -> Time {
    let sched = flight.opt(FlightField::SchedOut).unwrap_or(now);
    let out = match flight.opt(FlightField::MinOutTime) {
        Some(min_out) if min_out > sched => {
            (sched + flight.duration(FlightField::PushbackTime)).max(min_out)
        }
        _ => sched,
    };
    out.max(now)
}

/// Earliest out time of `next` when its aircraft was in at `arrived_in`.
pub fn min_out_after(arrived_in: Time, next: &Flight) -> Time {
    arrived_in + next.duration(FlightField::TurnaroundTime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airspace::flight::test_flight;

    fn leg(sched_out: Time, pushback: Time, min_out: Option<Time>) -> Flight {
        let mut f = test_flight(0);
        f.set(FlightField::SchedOut, sched_out);
        f.set(FlightField::PushbackTime, pushback);
        if let Some(m) = min_out { f.set(FlightField::MinOutTime, m); }
        f
    }

    #[test]
    fn on_time_aircraft_leaves_on_schedule() {
        assert_eq!(out_time(&leg(3600, 300, None), 3600), 3600);
        assert_eq!(out_time(&leg(3600, 300, Some(3000)), 3000), 3600);
    }

    #[test]
    fn late_aircraft_is_pushed_back() {
        // min out barely past schedule: pushback dominates
        assert_eq!(out_time(&leg(3600, 300, Some(3700)), 3000), 3900);
        // min out far past schedule
        assert_eq!(out_time(&leg(3600, 300, Some(5000)), 3000), 5000);
    }

    #[test]
    fn depart_and_arrive_record_times() {
        let t = Terminal::new(0);
        let mut f = leg(1000, 0, None);
        assert_eq!(t.depart(&mut f, 1000), 1000);
        assert_eq!(f.times.act_out, Some(1000));
        t.arrive(&mut f, 9000);
        assert_eq!(f.times.act_in, Some(9000));

        let mut next = leg(9500, 0, None);
        next.set(FlightField::TurnaroundTime, 2400);
        assert_eq!(min_out_after(9000, &next), 11400);
    }
}
