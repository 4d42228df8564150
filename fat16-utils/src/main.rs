mod boot;
mod cat;
pub(crate) mod filepath;
mod get;
mod list;
mod stat;
mod zip;

use std::io;

use clap::Parser;
use fat16::error::{Error, OperationError};
use fat16::Volume;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Volume(#[from] Error<io::Error>),
    #[error("{0}")]
    Operation(#[from] OperationError),
    #[error("Unable to write output: {0}")]
    Output(io::Error),
}

#[derive(Debug, clap::Args)]
struct List {
    /// Specify path to list, default to root directory
    #[clap(default_value = "/")]
    path: String,
    /// Include `.` and `..`
    #[clap(short, long)]
    all: bool,
}

#[derive(Debug, clap::Args)]
struct Cat {
    /// Specify path to concatenate
    path: String,
    /// Print a hex dump instead of raw bytes
    #[clap(long)]
    hex: bool,
}

#[derive(Debug, clap::Args)]
struct Get {
    /// Specify path to copy out of the image
    path: String,
    /// Destination file on the host
    destination: String,
}

#[derive(Debug, clap::Args)]
struct Zip {
    /// First file, its lines go first
    first: String,
    /// Second file
    second: String,
    /// Destination file on the host
    destination: String,
}

#[derive(Debug, clap::Args)]
struct Stat {
    /// Specify path to describe
    path: String,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// List file and directory in specified path
    #[clap(name = "ls")]
    List(List),
    /// Concatenate file and print on the standard output
    Cat(Cat),
    /// Copy a file out of the image
    Get(Get),
    /// Interleave lines of two files into a host file
    Zip(Zip),
    /// Show attributes, dates and cluster chain of an entry
    Stat(Stat),
    /// Show boot sector fields
    Boot,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long)]
    quiet: bool,
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,
    /// Disk image formatted with FAT16
    #[clap(short, long)]
    image: String,
    #[clap(subcommand)]
    action: Action,
}

fn main() {
    let args = Args::parse();
    let level = match (args.quiet, args.verbosity) {
        (true, _) => log::LevelFilter::Off,
        (_, 0) => log::LevelFilter::Info,
        (_, 1) => log::LevelFilter::Debug,
        (_, _) => log::LevelFilter::Trace,
    };
    log::set_max_level(level);
    env_logger::builder().filter(None, level).target(env_logger::Target::Stderr).init();

    let volume = match Volume::open(&args.image) {
        Ok(volume) => volume,
        Err(error) => {
            eprintln!("Unable to load {}: {}", args.image, error);
            std::process::exit(1);
        }
    };

    let result = match args.action {
        Action::List(args) => list::list(&volume, &args.path, args.all),
        Action::Cat(args) => cat::cat(&volume, &args.path, args.hex),
        Action::Get(args) => get::get(&volume, &args.path, &args.destination),
        Action::Zip(args) => zip::zip(&volume, &args.first, &args.second, &args.destination),
        Action::Stat(args) => stat::stat(&volume, &args.path),
        Action::Boot => {
            boot::boot(&volume);
            Ok(())
        }
    };
    volume.close();
    if let Some(error) = result.err() {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
