//! Joint departure/arrival capacity of a runway under one weather condition.
//!
//! A curve is a list of (departure rate, arrival rate) knots per quarter
//! hour. The arrival rate falls as the departure rate rises, the first knot
//! has no departures and the last knot has no arrivals. Demand is a ray from
//! the origin with slope arrivals/departures; the operating point is where
//! that ray meets the curve.

use ordered_float::OrderedFloat;
use smallvec::SmallVec;

const EPS: f64 = 1e-9;

#[derive(Debug, Fail)]
pub enum CurveError {
    #[fail(display = "a capacity curve needs at least two points, got {}", _0)]
    TooFewPoints(usize),
    #[fail(display = "capacity curve must start with zero departures and end with zero arrivals")]
    OpenEnds,
    #[fail(display = "capacity curve arrival rate rises between {:?} and {:?}", _0, _1)]
    NotDecreasing(ParetoPoint, ParetoPoint),
    #[fail(display = "negative rate in capacity curve: {:?}", _0)]
    Negative(ParetoPoint),
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParetoPoint {
    pub departures: f64,
    pub arrivals: f64,
}

impl ParetoPoint {
    pub fn new(departures: f64, arrivals: f64) -> ParetoPoint {
        ParetoPoint { departures, arrivals }
    }

    fn slope(&self) -> f64 {
        if self.departures.abs() < EPS { std::f64::INFINITY } else { self.arrivals / self.departures }
    }

    fn total(&self) -> OrderedFloat<f64> {
        OrderedFloat(self.departures + self.arrivals)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParetoCurve {
    points: SmallVec<[ParetoPoint; 8]>,
}

impl ParetoCurve {
    /// Knots may be given in any order; they are sorted by departure rate.
    pub fn new<I: IntoIterator<Item = ParetoPoint>>(points: I) -> Result<ParetoCurve, CurveError> {
        let mut points: SmallVec<[ParetoPoint; 8]> = points.into_iter().collect();
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints(points.len()));
        }
        if let Some(p) = points.iter().find(|p| p.departures < 0.0 || p.arrivals < 0.0) {
            return Err(CurveError::Negative(*p));
        }
        points.sort_by_key(|p| (OrderedFloat(p.departures), OrderedFloat(-p.arrivals)));
        let (first, last) = (points[0], points[points.len() - 1]);
        if first.departures.abs() > EPS || last.arrivals.abs() > EPS {
            return Err(CurveError::OpenEnds);
        }
        for w in points.windows(2) {
            if w[1].arrivals > w[0].arrivals + EPS {
                return Err(CurveError::NotDecreasing(w[0], w[1]));
            }
        }
        Ok(ParetoCurve { points })
    }

    pub fn points(&self) -> &[ParetoPoint] {
        &self.points
    }

    /// The knot with no departures.
    pub fn max_arrivals(&self) -> ParetoPoint {
        self.points[0]
    }

    /// The knot with no arrivals.
    pub fn max_departures(&self) -> ParetoPoint {
        self.points[self.points.len() - 1]
    }

    /// The middle knot, or the mean of the two middle knots.
    pub fn midpoint(&self) -> ParetoPoint {
        let n = self.points.len();
        if n % 2 == 1 {
            self.points[n / 2]
        } else {
            let (a, b) = (self.points[n / 2 - 1], self.points[n / 2]);
            ParetoPoint::new((a.departures + b.departures) / 2.0, (a.arrivals + b.arrivals) / 2.0)
        }
    }

    /// Operating rates per quarter hour for the given demand counts.
    pub fn optimal_rates(&self, departures: usize, arrivals: usize) -> ParetoPoint {
        match (departures, arrivals) {
            (0, 0) => self.midpoint(),
            (0, _) => self.max_arrivals(),
            (_, 0) => self.max_departures(),
            (d, a) => {
                let ratio = a as f64 / d as f64;
                for w in self.points.windows(2) {
                    if w[0].slope() >= ratio && ratio >= w[1].slope() {
                        return intersect(w[0], w[1], ratio);
                    }
                }
                // The first slope is infinite and the last is zero, so some
                // segment always brackets a positive finite ratio.
                self.max_departures()
            }
        }
    }
}

/// Where the ray `arrivals = ratio * departures` crosses segment `a`–`b`.
/// Flat segments return the endpoint with the larger total rate.
fn intersect(a: ParetoPoint, b: ParetoPoint, ratio: f64) -> ParetoPoint {
    let dd = b.departures - a.departures;
    let da = b.arrivals - a.arrivals;
    if dd.abs() < EPS || da.abs() < EPS {
        return if b.total() > a.total() { b } else { a };
    }
    let denom = da - ratio * dd;
    if denom.abs() < EPS {
        return if b.total() > a.total() { b } else { a };
    }
    let u = ((ratio * a.departures - a.arrivals) / denom).max(0.0).min(1.0);
    ParetoPoint::new(a.departures + u * dd, a.arrivals + u * da)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> ParetoCurve {
        ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 60.0),
            ParetoPoint::new(30.0, 50.0),
            ParetoPoint::new(50.0, 30.0),
            ParetoPoint::new(60.0, 0.0),
        ]).unwrap()
    }

    #[test]
    fn endpoint_cases() {
        let c = curve();
        assert_eq!(c.optimal_rates(0, 80), ParetoPoint::new(0.0, 60.0));
        assert_eq!(c.optimal_rates(80, 0), ParetoPoint::new(60.0, 0.0));
        assert_eq!(c.optimal_rates(0, 0), ParetoPoint::new(40.0, 40.0));
    }

    #[test]
    fn odd_curve_midpoint_is_middle_knot() {
        let c = ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 40.0),
            ParetoPoint::new(20.0, 20.0),
            ParetoPoint::new(40.0, 0.0),
        ]).unwrap();
        assert_eq!(c.midpoint(), ParetoPoint::new(20.0, 20.0));
    }

    #[test]
    fn balanced_demand_interpolates() {
        let p = curve().optimal_rates(40, 40);
        assert!((p.departures - 40.0).abs() < 1e-9);
        assert!((p.arrivals - 40.0).abs() < 1e-9);
    }

    #[test]
    fn ray_through_a_knot_returns_the_knot() {
        // 50/30 is exactly the slope of the (30, 50) knot
        let p = curve().optimal_rates(3, 5);
        assert!((p.departures - 30.0).abs() < 1e-9);
        assert!((p.arrivals - 50.0).abs() < 1e-9);
    }

    #[test]
    fn departure_heavy_demand() {
        // ratio 0.25 lies between the (50, 30) and (60, 0) knots
        let p = curve().optimal_rates(40, 10);
        assert!(p.departures > 50.0 && p.departures < 60.0);
        assert!((p.arrivals - 0.25 * p.departures).abs() < 1e-9);
    }

    #[test]
    fn flat_segments_pick_the_larger_endpoint() {
        let c = ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 40.0),
            ParetoPoint::new(20.0, 40.0),
            ParetoPoint::new(40.0, 20.0),
            ParetoPoint::new(40.0, 0.0),
        ]).unwrap();
        // ratio 3 falls on the horizontal top segment
        assert_eq!(c.optimal_rates(10, 30), ParetoPoint::new(20.0, 40.0));
        // ratio 0.1 falls on the vertical right segment
        assert_eq!(c.optimal_rates(100, 10), ParetoPoint::new(40.0, 20.0));
    }

    #[test]
    fn unsorted_points_are_accepted() {
        let c = ParetoCurve::new(vec![
            ParetoPoint::new(60.0, 0.0),
            ParetoPoint::new(0.0, 60.0),
            ParetoPoint::new(30.0, 50.0),
        ]).unwrap();
        assert_eq!(c.max_arrivals(), ParetoPoint::new(0.0, 60.0));
        assert_eq!(c.max_departures(), ParetoPoint::new(60.0, 0.0));
    }

    #[test]
    fn rejects_malformed_curves() {
        assert!(ParetoCurve::new(vec![ParetoPoint::new(0.0, 10.0)]).is_err());
        assert!(ParetoCurve::new(vec![
            ParetoPoint::new(5.0, 10.0), ParetoPoint::new(10.0, 0.0)]).is_err());
        assert!(ParetoCurve::new(vec![
            ParetoPoint::new(0.0, 10.0), ParetoPoint::new(5.0, 20.0),
            ParetoPoint::new(10.0, 0.0)]).is_err());
    }
}
