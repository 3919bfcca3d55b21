use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use scoresheet::sailwave::version::VersionGate;
use scoresheet::{
    RosterSource, SailwaveSource, SheetError, XmlFileSource, collect_roster, write_sheets,
};

#[derive(Parser, Debug)]
#[command(name = "scoresheet")]
#[command(about = "Generate AYC scoring sheets from Sailwave data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate sheets from a Sailwave XML export
    Xml {
        /// Sailwave XML file (File/Save as XML... in Sailwave)
        #[arg(long)]
        xml: PathBuf,

        /// Regatta name printed on every sheet
        #[arg(long)]
        name: String,

        /// Directory the per-fleet HTML files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Generate sheets live from a running Sailwave instance (Windows)
    Live {
        /// Sailwave .blw file
        #[arg(long)]
        file: PathBuf,

        /// Regatta name printed on every sheet
        #[arg(long)]
        name: String,

        /// Attach to a Sailwave that already has the file open
        #[arg(long)]
        running: bool,

        /// How long to wait for the competitor reply
        #[arg(long, default_value_t = 9)]
        timeout_secs: u64,

        /// Directory the per-fleet HTML files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), SheetError> {
    let (mut source, name, out_dir): (Box<dyn RosterSource>, String, PathBuf) = match cli.command {
        Command::Xml { xml, name, out_dir } => (Box::new(XmlFileSource::new(xml)), name, out_dir),
        Command::Live { file, name, running, timeout_secs, out_dir } => {
            let source = SailwaveSource::new(
                file,
                running,
                Duration::from_secs(timeout_secs),
                version_gate(),
            );
            (Box::new(source), name, out_dir)
        }
    };

    let roster = collect_roster(source.as_mut())?;
    for path in write_sheets(roster, &name, &out_dir)? {
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
        println!("Wrote {}", file_name.unwrap_or_else(|| path.display().to_string()));
    }
    Ok(())
}

#[cfg(windows)]
fn version_gate() -> VersionGate {
    scoresheet::sailwave::version::registry_gate()
}

/// Off Windows there is no registry to probe; the live source reports the
/// unsupported platform itself.
#[cfg(not(windows))]
fn version_gate() -> VersionGate {
    Box::new(|| Ok(()))
}
