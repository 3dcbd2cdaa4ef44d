use std::str::FromStr;
use regex::{Captures, Regex};
use crate::airspace::node::Direction;
use crate::airspace::pareto::{ParetoCurve, ParetoPoint};
use crate::airspace::runway::HistoricalRates;
use crate::eventsim::Time;
use super::nas::NameTable;
use super::scenario::{FlightSpec, RunwayMode, RunwaySpec, Scenario};
use super::ParseError;

fn regex(re: &str) -> Result<Regex, ParseError> {
    Regex::new(re).map_err(|e| ParseError::RegexError(format!("{:?}", e)))
}

fn number<T: FromStr>(line: usize, s: &str) -> Result<T, ParseError> {
    s.parse::<T>().map_err(|_e| ParseError::NumberError(line, s.to_string()))
}

fn lookup(line: usize, table: &NameTable, what: &'static str, name: &str) -> Result<usize, ParseError> {
    table.get(name).ok_or_else(|| ParseError::UnknownName(line, what, name.to_string()))
}

fn rate_list(line: usize, s: &str) -> Result<Vec<u32>, ParseError> {
    s.split(',').filter(|r| !r.is_empty()).map(|r| number(line, r)).collect()
}

struct Patterns {
    comment: Regex,
    name: Regex,
    fix: Regex,
    flight: Regex,
    pair: Regex,
    runway: Regex,
    rates: Regex,
    pareto: Regex,
    knot: Regex,
    condition: Regex,
}

impl Patterns {
    fn new() -> Result<Patterns, ParseError> {
        Ok(Patterns {
            comment: regex(r"^\s*(#.*)?$")?,
            name: regex(r"^\s*(airport|carrier|equipment|weather)\s+(\S+)\s*$")?,
            fix: regex(r"(?x) ^ \s* fix \s+ (?P<dir>\w+) \s+ (?P<name>\S+)
                        (?: \s+ spacing \s* = \s* (?P<spacing>\d+) )? \s* $")?,
            flight: regex(r"^\s*flight((?:\s+\w+=\S+)*)\s*$")?,
            pair: regex(r"(\w+)=(\S+)")?,
            runway: regex(r"^\s*runway\s+(\S+)\s+mode\s*=\s*(\w+)\s*$")?,
            rates: regex(r"(?x) ^ \s* rates \s+ (?P<airport>\S+) \s+
                          start \s* = \s* (?P<start>-?\d+) \s+
                          dep \s* = \s* (?P<dep>[\d,]*) \s+
                          arr \s* = \s* (?P<arr>[\d,]*) \s* $")?,
            pareto: regex(r"^\s*pareto\s+(\S+)\s+(\S+)((?:\s+[\d\.]+:[\d\.]+)+)\s*$")?,
            knot: regex(r"([\d\.]+):([\d\.]+)")?,
            condition: regex(r"^\s*condition\s+(\S+)\s+(-?\d+)\s+(\S+)\s*$")?,
        })
    }
}

fn parse_flight(line: usize, pairs: &str, p: &Patterns, scenario: &Scenario) -> Result<FlightSpec, ParseError> {
    let nas = &scenario.nas;
    let mut flight = FlightSpec::default();
    let (mut from, mut to, mut depfix, mut arrfix, mut out) = (None, None, None, None, None);
    for kv in p.pair.captures_iter(pairs) {
        let (key, value) = (&kv[1], &kv[2]);
        match key {
            "itin" => flight.itinerary = number(line, value)?,
            "leg" => flight.leg = number(line, value)?,
            "id" => flight.schedule_id = number(line, value)?,
            "carrier" => flight.carrier = Some(lookup(line, &nas.carriers, "carrier", value)?),
            "equipment" => flight.equipment = Some(lookup(line, &nas.equipment, "equipment", value)?),
            "from" => from = Some(lookup(line, &nas.airports, "airport", value)?),
            "to" => to = Some(lookup(line, &nas.airports, "airport", value)?),
            "depfix" => depfix = Some(lookup(line, &nas.departure_fixes, "departure fix", value)?),
            "arrfix" => arrfix = Some(lookup(line, &nas.arrival_fixes, "arrival fix", value)?),
            "out" => out = Some(number::<Time>(line, value)?),
            "in" => flight.sched_in = Some(number(line, value)?),
            "airborne" => flight.airborne = Some(number(line, value)?),
            "taxiout" => flight.taxi_out = Some(number(line, value)?),
            "taxiin" => flight.taxi_in = Some(number(line, value)?),
            "pushback" => flight.pushback = Some(number(line, value)?),
            "turnaround" => flight.turnaround = Some(number(line, value)?),
            _ => return Err(ParseError::Invalid(line, format!("unknown flight key {:?}", key))),
        }
    }
    flight.dep_airport = from.ok_or(ParseError::MissingField(line, "from"))?;
    flight.arr_airport = to.ok_or(ParseError::MissingField(line, "to"))?;
    flight.dep_fix = depfix.ok_or(ParseError::MissingField(line, "depfix"))?;
    flight.arr_fix = arrfix.ok_or(ParseError::MissingField(line, "arrfix"))?;
    flight.sched_out = out.ok_or(ParseError::MissingField(line, "out"))?;
    Ok(flight)
}

fn parse_curve(line: usize, knots: &str, p: &Patterns) -> Result<ParetoCurve, ParseError> {
    let mut points = Vec::new();
    for k in p.knot.captures_iter(knots) {
        points.push(ParetoPoint::new(number(line, &k[1])?, number(line, &k[2])?));
    }
    ParetoCurve::new(points).map_err(|e| ParseError::Invalid(line, e.to_string()))
}

fn runway<'a>(scenario: &'a mut Scenario, line: usize, airport: &str) -> Result<&'a mut RunwaySpec, ParseError> {
    let idx = lookup(line, &scenario.nas.airports, "airport", airport)?;
    Ok(scenario.runways.entry(idx).or_insert_with(RunwaySpec::default))
}

/// Parses the scenario format. Names must be declared before use.
///
/// * airport KATL
/// * carrier DAL
/// * equipment B738
/// * weather VMC
/// * fix DEP WOMAC spacing=120
/// * flight itin=1 leg=1 from=KATL to=KJFK depfix=WOMAC arrfix=ERLIN out=3600 in=10800 taxiout=600
/// * runway KATL mode=computed
/// * rates KATL start=0 dep=10,12,0,8 arr=10,10,10,10
/// * pareto KATL VMC 0:60 30:50 50:30 60:0
/// * condition KATL 3600 VMC
///
pub fn parse_scenario(input: &str) -> Result<Scenario, ParseError> {
    let p = Patterns::new()?;
    let mut scenario = Scenario::default();
    for (i, text) in input.lines().enumerate() {
        let line = i + 1;
        if p.comment.is_match(text) {
            continue;
        }
        if let Some(groups) = p.name.captures(text) {
            let nas = &mut scenario.nas;
            let table = match &groups[1] {
                "airport" => &mut nas.airports,
                "carrier" => &mut nas.carriers,
                "equipment" => &mut nas.equipment,
                _ => &mut nas.weather,
            };
            table.intern(&groups[2]);
            continue;
        }
        if let Some(groups) = p.fix.captures(text) {
            let dir = Direction::from_str(&groups["dir"])
                .map_err(|e| ParseError::Invalid(line, e.to_string()))?;
            let table = match dir {
                Direction::Departure => &mut scenario.nas.departure_fixes,
                Direction::Arrival => &mut scenario.nas.arrival_fixes,
            };
            let idx = table.intern(&groups["name"]);
            if let Some(spacing) = groups.name("spacing") {
                scenario.fix_spacing.insert((dir, idx), number(line, spacing.as_str())?);
            }
            continue;
        }
        if let Some(groups) = p.flight.captures(text) {
            let flight = parse_flight(line, &groups[1], &p, &scenario)?;
            scenario.flights.push(flight);
            continue;
        }
        if let Some(groups) = p.runway.captures(text) {
            let mode = RunwayMode::from_str(&groups[2])
                .map_err(|_| ParseError::Invalid(line, format!("unknown runway mode {:?}", &groups[2])))?;
            runway(&mut scenario, line, &groups[1])?.mode = Some(mode);
            continue;
        }
        if let Some(groups) = p.rates.captures(text) {
            let rates = rates_from(line, &groups)?;
            runway(&mut scenario, line, &groups["airport"])?.rates = Some(rates);
            continue;
        }
        if let Some(groups) = p.pareto.captures(text) {
            let weather = lookup(line, &scenario.nas.weather, "weather", &groups[2])?;
            let curve = parse_curve(line, &groups[3], &p)?;
            runway(&mut scenario, line, &groups[1])?.curves.insert(weather, curve);
            continue;
        }
        if let Some(groups) = p.condition.captures(text) {
            let weather = lookup(line, &scenario.nas.weather, "weather", &groups[3])?;
            let time = number(line, &groups[2])?;
            runway(&mut scenario, line, &groups[1])?.conditions.push((time, weather));
            continue;
        }
        return Err(ParseError::Unrecognized(line, text.to_string()));
    }
    Ok(scenario)
}

fn rates_from(line: usize, groups: &Captures) -> Result<HistoricalRates, ParseError> {
    Ok(HistoricalRates {
        start: number(line, &groups["start"])?,
        departures: rate_list(line, &groups["dep"])?,
        arrivals: rate_list(line, &groups["arr"])?,
    })
}
