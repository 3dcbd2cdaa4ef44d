//! Runway throughput.
//!
//! A runway serves departures and arrivals from two separate queues. After
//! each operation the next slot in that direction opens one acceptance
//! interval later. The interval comes from the runway's acceptance rate for
//! the 15 minute epoch the operation falls in. Rates are taken from
//! historical records, or computed from a capacity curve and the demand
//! expected over the coming epoch.

use std::collections::HashMap;
use log::trace;
use crate::eventsim::Time;
use super::flight::{Flight, FlightField};
use super::node::{record_service, Direction, HoldQueue};
use super::pareto::ParetoCurve;

/// Length of a rate epoch.
pub const EPOCH: Time = 900;
/// Interval used when no capacity is left for the rest of the known data.
pub const ONE_WEEK: Time = 7 * 24 * 3600;

pub type WeatherId = usize;

/// Flights per epoch, per direction, starting at `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRates {
    pub start: Time,
    pub departures: Vec<u32>,
    pub arrivals: Vec<u32>,
}

impl HistoricalRates {
    fn epoch_start(&self, epoch: usize) -> Time {
        self.start + epoch as Time * EPOCH
    }

    /// Next slot after an operation at `t`.
    ///
    /// Zero-rate epochs are skipped up to the next epoch with a rate. Past
    /// the end of the table there is no limit, and a table with nothing but
    /// zeros left pushes the slot a week out.
    pub fn next_time(&self, t: Time, dir: Direction) -> Time {
        let rates = match dir {
            Direction::Departure => &self.departures,
            Direction::Arrival => &self.arrivals,
        };
        let epoch = if t < self.start { 0 } else { ((t - self.start) / EPOCH) as usize };
        if epoch >= rates.len() {
            return t;
        }
        if rates[epoch] > 0 {
            return t + EPOCH / rates[epoch] as Time;
        }
        for (e, &rate) in rates.iter().enumerate().skip(epoch + 1) {
            if rate > 0 {
                return self.epoch_start(e) + EPOCH / rate as Time;
            }
        }
        t + ONE_WEEK
    }
}

/// Estimated runway times of every flight expected at an airport, sorted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemandEstimate {
    departures: Vec<Time>,
    arrivals: Vec<Time>,
}

impl DemandEstimate {
    pub fn new(mut departures: Vec<Time>, mut arrivals: Vec<Time>) -> DemandEstimate {
        departures.sort();
        arrivals.sort();
        DemandEstimate { departures, arrivals }
    }

    /// Departures and arrivals expected in `[t, t + EPOCH)`.
    pub fn count(&self, t: Time) -> (usize, usize) {
        fn within(times: &[Time], t: Time) -> usize {
            times.partition_point(|&x| x < t + EPOCH) - times.partition_point(|&x| x < t)
        }
        (within(&self.departures, t), within(&self.arrivals, t))
    }
}

/// Inputs for computing rates from capacity curves. Any missing input
/// leaves the runway unconstrained.
#[derive(Debug, Clone, Default)]
pub struct ComputedRates {
    /// Weather changes, sorted by time.
    pub conditions: Option<Vec<(Time, WeatherId)>>,
    pub curves: Option<HashMap<WeatherId, ParetoCurve>>,
    pub demand: Option<DemandEstimate>,
}

impl ComputedRates {
    /// The weather at `t`: the last change at or before `t`. Before the first
    /// change the first known condition applies.
    pub fn condition_at(&self, t: Time) -> Option<WeatherId> {
        let conditions = self.conditions.as_ref()?;
        let idx = conditions.partition_point(|&(time, _)| time <= t);
        let (_, c) = *conditions.get(idx.saturating_sub(1))?;
        Some(c)
    }

    pub fn next_time(&self, t: Time, dir: Direction) -> Time {
        let (condition, curves, demand) = match (self.condition_at(t), &self.curves, &self.demand) {
            (Some(c), &Some(ref curves), &Some(ref demand)) => (c, curves, demand),
            _ => return t,
        };
        let curve = match curves.get(&condition) {
            Some(c) => c,
            None => return t,
        };
        let (deps, arrs) = demand.count(t);
        let rates = curve.optimal_rates(deps, arrs);
        trace!("demand {}/{} in weather {} -> rates {:.2}/{:.2}", deps, arrs, condition,
               rates.departures, rates.arrivals);
        let rate = match dir {
            Direction::Departure => rates.departures,
            Direction::Arrival => rates.arrivals,
        };
        t + interval(rate)
    }
}

/// Seconds between operations at `rate` operations per epoch.
fn interval(rate: f64) -> Time {
    if rate <= 0.0 {
        ONE_WEEK
    } else {
        ((EPOCH as f64 / rate).floor() as Time).min(ONE_WEEK)
    }
}

#[derive(Debug, Clone)]
pub enum Acceptance {
    Historical(Option<HistoricalRates>),
    Computed(ComputedRates),
}

impl Acceptance {
    pub fn unlimited() -> Acceptance {
        Acceptance::Historical(None)
    }
}

#[derive(Debug)]
pub struct Runway {
    pub airport: usize,
    pub acceptance: Acceptance,
    departures: HoldQueue,
    arrivals: HoldQueue,
}

impl Runway {
    pub fn new(airport: usize, acceptance: Acceptance) -> Runway {
        Runway {
            airport,
            acceptance,
            departures: HoldQueue::new(FlightField::CalcOff),
            arrivals: HoldQueue::new(FlightField::ActOn),
        }
    }

    pub fn queue(&self, dir: Direction) -> &HoldQueue {
        match dir {
            Direction::Departure => &self.departures,
            Direction::Arrival => &self.arrivals,
        }
    }

    pub fn queue_mut(&mut self, dir: Direction) -> &mut HoldQueue {
        match dir {
            Direction::Departure => &mut self.departures,
            Direction::Arrival => &mut self.arrivals,
        }
    }

    /// Next slot in `dir` after an operation at `t`.
    pub fn next_time(&self, t: Time, dir: Direction) -> Time {
        match self.acceptance {
            Acceptance::Historical(None) => t,
            Acceptance::Historical(Some(ref rates)) => rates.next_time(t, dir),
            Acceptance::Computed(ref rates) => rates.next_time(t, dir),
        }
    }

    /// Takes off or lands `flight` at `t`. Returns the time it reaches the
    /// next node.
    pub fn serve(&self, dir: Direction, flight: &mut Flight, t: Time) -> Time {
        match dir {
            Direction::Departure => record_service(flight, FlightField::CalcOff, FlightField::ActOff,
                                                   FlightField::DepRunwayDelay, t),
            Direction::Arrival => record_service(flight, FlightField::ActOn, FlightField::ActOn,
                                                 FlightField::ArrRunwayDelay, t),
        };
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::pareto::ParetoPoint;
    use crate::airspace::flight::test_flight;
    use maplit::hashmap;

    fn historical(dep: Vec<u32>, arr: Vec<u32>) -> HistoricalRates {
        HistoricalRates { start: 3600, departures: dep, arrivals: arr }
    }

    #[test]
    fn historical_rate_in_current_epoch() {
        let r = historical(vec![10, 4], vec![30]);
        assert_eq!(r.next_time(3600, Direction::Departure), 3690);
        assert_eq!(r.next_time(4600, Direction::Departure), 4825);
        assert_eq!(r.next_time(3700, Direction::Arrival), 3730);
        // 900 / 7 rounds down
        let r = historical(vec![7], vec![]);
        assert_eq!(r.next_time(3600, Direction::Departure), 3728);
    }

    #[test]
    fn historical_rollover_to_next_nonzero_epoch() {
        let r = historical(vec![0, 6], vec![0, 0, 0, 3]);
        let e = 3600;
        assert_eq!(r.next_time(e, Direction::Departure), e + 900 + 150);
        assert_eq!(r.next_time(e + 100, Direction::Departure), e + 900 + 150);
        assert_eq!(r.next_time(e, Direction::Arrival), e + 3 * 900 + 300);
    }

    #[test]
    fn historical_exhausted_and_missing_data() {
        let r = historical(vec![5, 0, 0], vec![]);
        // only zero rates left: one week
        assert_eq!(r.next_time(3600 + 900, Direction::Departure), 3600 + 900 + ONE_WEEK);
        // past the end of the table: unlimited
        assert_eq!(r.next_time(3600 + 2700, Direction::Departure), 3600 + 2700);
        assert_eq!(r.next_time(3600, Direction::Arrival), 3600);
        // before the table starts the first epoch applies
        assert_eq!(r.next_time(0, Direction::Departure), 180);

        let rw = Runway::new(0, Acceptance::unlimited());
        assert_eq!(rw.next_time(1234, Direction::Arrival), 1234);
    }

    fn computed() -> ComputedRates {
        let vmc = ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 60.0), ParetoPoint::new(30.0, 45.0), ParetoPoint::new(60.0, 0.0),
        ]).unwrap();
        let imc = ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 30.0), ParetoPoint::new(15.0, 15.0), ParetoPoint::new(30.0, 0.0),
        ]).unwrap();
        ComputedRates {
            conditions: Some(vec![(0, 0), (3600, 1)]),
            curves: Some(hashmap!{ 0 => vmc, 1 => imc }),
            demand: Some(DemandEstimate::new(vec![100, 200, 1000, 3700], vec![150, 500, 950, 3800])),
        }
    }

    #[test]
    fn weather_lookup() {
        let c = computed();
        assert_eq!(c.condition_at(-50), Some(0));
        assert_eq!(c.condition_at(0), Some(0));
        assert_eq!(c.condition_at(3599), Some(0));
        assert_eq!(c.condition_at(3600), Some(1));
        assert_eq!(c.condition_at(100000), Some(1));
    }

    #[test]
    fn demand_window_is_half_open() {
        let d = DemandEstimate::new(vec![900, 0, 899, 450], vec![1800]);
        assert_eq!(d.count(0), (3, 0));
        assert_eq!(d.count(900), (1, 0));
        assert_eq!(d.count(901), (0, 1));
    }

    #[test]
    fn computed_rates_follow_weather_and_demand() {
        let c = computed();
        // [100, 1000): 2 departures, 3 arrivals in VMC; the ray runs
        // through the (30, 45) knot
        assert_eq!(c.next_time(100, Direction::Departure), 130);
        assert_eq!(c.next_time(100, Direction::Arrival), 120);
        // [200, 1100): 2 and 2; ratio 1 meets (30, 45)-(60, 0) at (36, 36)
        assert_eq!(c.next_time(200, Direction::Departure), 225);
        // [3600, 4500): 1 departure, 1 arrival, IMC knot (15, 15)
        assert_eq!(c.next_time(3600, Direction::Departure), 3660);
        // [5000, 5900): no demand, IMC midpoint (15, 15)
        assert_eq!(c.next_time(5000, Direction::Arrival), 5060);
    }

    #[test]
    fn zero_computed_rate_closes_direction_for_a_week() {
        let c = computed();
        // [3750, 4650) has one arrival and no departures: the IMC
        // zero-departure endpoint (0, 30)
        assert_eq!(c.next_time(3750, Direction::Departure), 3750 + ONE_WEEK);
        assert_eq!(c.next_time(3750, Direction::Arrival), 3780);
    }

    #[test]
    fn missing_computed_inputs_are_unlimited() {
        let mut c = computed();
        c.demand = None;
        assert_eq!(c.next_time(100, Direction::Departure), 100);
        let mut c = computed();
        c.curves = Some(HashMap::new());
        assert_eq!(c.next_time(100, Direction::Departure), 100);
        let mut c = computed();
        c.conditions = Some(vec![]);
        assert_eq!(c.next_time(100, Direction::Arrival), 100);
    }

    #[test]
    fn serve_records_delay() {
        let rw = Runway::new(0, Acceptance::unlimited());
        let mut f = test_flight(0);
        f.set(FlightField::CalcOff, 1000);
        rw.serve(Direction::Departure, &mut f, 1090);
        assert_eq!(f.times.act_off, Some(1090));
        assert_eq!(f.times.dep_runway_delay, Some(90));
        f.set(FlightField::ActOn, 5000);
        rw.serve(Direction::Arrival, &mut f, 5000);
        assert_eq!(f.times.arr_runway_delay, Some(0));
        assert_eq!(rw.queue(Direction::Arrival).measure(), FlightField::ActOn);
    }
}
