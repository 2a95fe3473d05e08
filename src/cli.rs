// src/cli.rs
use std::{path::PathBuf, thread};

use clap::{ArgAction, ArgGroup, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::{info, warn};

use crate::config::consts::{DEFAULT_BASE_URL, DEFAULT_LOG_FILE};
use crate::config::options::{AppOptions, ExportFormat, ExportOptions, NetOptions, ScrapeOptions};
use crate::core::net::{HttpClient, Site};
use crate::progress::Progress;
use crate::{file, log, scrape};

/// Saves students' results and ranks (by seat numbers and by school).
///
/// Examples:
///   natiga -f html --seats 20001 20002 20003 -o class
///   natiga -f excel sqlite --schools <link-to-school> -o school
#[derive(Parser, Debug)]
#[command(name = "natiga", version, about, long_about, after_help = "(C) 2018 -- Amr Ayman")]
#[command(group(ArgGroup::new("input").required(true).multiple(true).args(["seats", "schools"])))]
pub struct Args {
    /// Student seat numbers
    #[arg(long, num_args = 1.., value_name = "SEAT")]
    pub seats: Vec<u64>,

    /// Links to schools
    #[arg(long, num_args = 1.., value_name = "LINK")]
    pub schools: Vec<String>,

    /// Output filename, without extension
    #[arg(short, long, value_name = "BASE")]
    pub outfile: PathBuf,

    /// Output file formats; several allowed, e.g. -f html excel [default: html]
    #[arg(short = 'f', value_enum, num_args = 1.., value_name = "FORMAT")]
    pub formats: Vec<ExportFormat>,

    /// Results site root
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// More logging (-v, -vv, -vvv)
    #[arg(short, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log to a file instead of stderr
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILE)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        AppOptions {
            scrape: ScrapeOptions::new(self.seats.clone(), self.schools.clone()),
            export: ExportOptions::new(self.outfile.as_os_str(), self.formats.clone()),
            net: NetOptions { base_url: self.base_url.clone(), ..NetOptions::default() },
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    log::init(args.verbose, args.log_file.as_deref()).map_err(|e| eyre!("cannot start logging: {e}"))?;
    watch_interrupt().wrap_err("cannot install interrupt handler")?;

    let opts = args.to_options();
    let site = Site::new(&opts.net.base_url)?;
    let client = HttpClient::new(&opts.net).wrap_err("cannot build HTTP client")?;

    let mut progress = ConsoleProgress::default();
    let collection = scrape::collect(&opts.scrape, &site, &client, Some(&mut progress));

    // Per-input failures are reported once, here.
    for e in &collection.errors {
        eprintln!("{e}");
    }

    file::export_dataset(&opts.export, &collection.results, |path| {
        println!("Written to {}!", path.display());
    })?;
    Ok(())
}

/// Ctrl-C ends the process at once: notice on stderr, exit status 1.
/// In-flight requests are abandoned and nothing is flushed.
fn watch_interrupt() -> std::io::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    thread::spawn(move || {
        rt.block_on(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nInterrupted. Exiting ..");
                std::process::exit(1);
            }
        })
    });
    Ok(())
}

#[derive(Default)]
struct ConsoleProgress {
    total: usize,
    done: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!(inputs = total, "collecting");
    }
    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }
    fn item_done(&mut self, label: &str) {
        self.done += 1;
        info!("[{}/{}] {label}", self.done, self.total);
    }
    fn item_failed(&mut self, label: &str) {
        self.done += 1;
        warn!("[{}/{}] {label} failed", self.done, self.total);
    }
}
