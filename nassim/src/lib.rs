#[macro_use] extern crate failure_derive;

pub mod eventsim;
pub mod airspace;
pub mod input;
pub mod output;

#[cfg(test)]
mod tests;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use log::info;
use airspace::event::Event;
use airspace::{Airspace, Sim, SimError};
use input::properties::{Config, Properties};
use input::scenario::Scenario;
use output::history::History;

/// A simulation of `airspace` with every itinerary seeded and an observer
/// recording processed events into the returned history.
pub fn start_simulation(mut airspace: Airspace) -> Result<(Sim, Rc<RefCell<History>>), SimError> {
    let mut scheduler = eventsim::Scheduler::new();
    let seeded = airspace.seed(&mut scheduler)?;
    info!("seeded {} itineraries of {} flights", seeded, airspace.flights.len());

    let history = Rc::new(RefCell::new(History::default()));
    let log = history.clone();
    let mut sim = eventsim::Simulation::new_with_scheduler(airspace, scheduler);
    sim.set_observer(Box::new(move |t: eventsim::Time, ev: &Event| log.borrow_mut().record(t, ev)));
    Ok((sim, history))
}

/// Runs every flight to completion.
pub fn simulate(airspace: Airspace) -> Result<(Airspace, History), SimError> {
    let (mut sim, history) = start_simulation(airspace)?;
    let events = sim.run()?;
    info!("processed {} events, last at t={}", events, sim.time());
    let history = history.replace(History::default());
    Ok((sim.into_world(), history))
}

pub type AppResult<T> = Result<T, failure::Error>;

pub fn read_file(f: &Path) -> AppResult<String> {
    use std::fs::File;
    use std::io::prelude::*;
    use std::io::BufReader;

    let file = File::open(f)?;
    let mut file = BufReader::new(&file);
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn get_config(f: &Path) -> AppResult<Config> {
    let contents = read_file(f)?;
    let props = Properties::parse(&contents)?;
    let base = f.parent().unwrap_or_else(|| Path::new(""));
    Ok(Config::from_properties(&props, base)?)
}

pub fn get_scenario(f: &Path) -> AppResult<Scenario> {
    let contents = read_file(f)?;
    get_scenario_string(&contents)
}

pub fn get_scenario_string(s: &str) -> AppResult<Scenario> {
    Ok(input::scenario_parser::parse_scenario(s)?)
}

/// Loads the scenario named by `config` and builds its airspace.
pub fn get_airspace(config: &Config) -> AppResult<Airspace> {
    let scenario = get_scenario(&config.scenario)?;
    Ok(Airspace::build(scenario, config.build_options())?)
}
