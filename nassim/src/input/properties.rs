//! Run configuration read from a `key = value` properties file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use regex::Regex;
use crate::airspace::network::{BuildOptions, DEFAULT_FIX_SPACING};
use crate::eventsim::Time;
use super::scenario::RunwayMode;
use super::ParseError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    values: HashMap<String, (usize, String)>,
}

impl Properties {
    /// Later definitions of a key replace earlier ones.
    pub fn parse(input: &str) -> Result<Properties, ParseError> {
        let skip_re = Regex::new(r"^\s*(#.*)?$")
            .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;
        let pair_re = Regex::new(r"^\s*([\w\.]+)\s*=\s*(.*?)\s*$")
            .map_err(|e| ParseError::RegexError(format!("{:?}", e)))?;
        let mut values = HashMap::new();
        for (i, line) in input.lines().enumerate() {
            if skip_re.is_match(line) {
                continue;
            }
            if let Some(groups) = pair_re.captures(line) {
                values.insert(groups[1].to_string(), (i + 1, groups[2].to_string()));
                continue;
            }
            return Err(ParseError::Unrecognized(i + 1, line.to_string()));
        }
        Ok(Properties { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|(_, v)| v.as_str())
    }

    fn line(&self, key: &str) -> usize {
        self.values.get(key).map(|&(l, _)| l).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub scenario: PathBuf,
    pub runway_mode: Option<RunwayMode>,
    pub fix_spacing: Time,
    pub report: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub visits: Option<PathBuf>,
}

impl Config {
    /// Relative paths are taken relative to `base`.
    pub fn from_properties(props: &Properties, base: &Path) -> Result<Config, ParseError> {
        let path = |key: &str| props.get(key).map(|p| base.join(p));
        let scenario = path("scenario").ok_or(ParseError::MissingField(0, "scenario"))?;
        let runway_mode = match props.get("runway.mode") {
            Some(m) => Some(RunwayMode::from_str(m)
                .map_err(|_| ParseError::Invalid(props.line("runway.mode"), format!("unknown runway mode {:?}", m)))?),
            None => None,
        };
        let fix_spacing = match props.get("fix.spacing") {
            Some(s) => s.parse::<Time>()
                .map_err(|_| ParseError::NumberError(props.line("fix.spacing"), s.to_string()))?,
            None => DEFAULT_FIX_SPACING,
        };
        Ok(Config {
            scenario,
            runway_mode,
            fix_spacing,
            report: path("output.report"),
            json: path("output.json"),
            visits: path("output.visits"),
        })
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            runway_mode: self.runway_mode.unwrap_or(RunwayMode::Historical),
            fix_spacing: self.fix_spacing,
        }
    }
}
