use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use log::info;
use structopt::StructOpt;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use nassim::*;

/// nassim -- airspace traffic flow simulation
#[derive(StructOpt, Debug)]
#[structopt(name = "nassim")]
struct Opt {
    /// Verbose mode (-v, -vv)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Run configuration in properties format
    #[structopt(parse(from_os_str))]
    properties: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(opt: &Opt) -> AppResult<()> {
    let config = get_config(&opt.properties)?;
    info!("configuration: {:?}", config);
    let airspace = get_airspace(&config)?;
    let (airspace, history) = simulate(airspace)?;
    info!("{} flight transitions, {} releases", history.transitions.len(), history.releases);

    let report = output::report::report(&airspace)?;
    match config.report {
        Some(ref path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(&file);
            write!(writer, "{}", report)?;
        }
        None => print!("{}", report),
    }

    if let Some(ref json) = config.json {
        let file = File::create(json)?;
        let mut writer = BufWriter::new(&file);
        output::json::json_flights(&airspace, &mut writer)?;
        writer.flush()?;
    }

    if let Some(ref visits) = config.visits {
        let file = File::create(visits)?;
        let mut writer = BufWriter::new(&file);
        write!(writer, "{}", output::history::visits(&airspace, &history)?)?;
    }
    Ok(())
}

pub fn main() {
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    match run(&opt) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error:\n{}", e);
            std::process::exit(1);
        }
    }
}
