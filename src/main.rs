use std::fs;
use std::path::PathBuf;

use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

use percolation::replay;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "percolation",
    about = "Replays a sequence of site openings on an n-by-n grid"
)]
struct Opt {
    /// File with the grid size followed by `row col` pairs
    #[structopt(name = "FILE", parse(from_os_str))]
    input: PathBuf,

    /// Log every percolation event
    #[structopt(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> percolation::Result<()> {
    let opt = Opt::from_args();
    init_logging(opt.verbose);

    let input = fs::read(&opt.input)?;

    let replay = replay::parse(&input)?;
    let outcome = replay.run()?;

    println!("# open sites: {}", outcome.opened);
    println!("# percolates: {}", outcome.percolates);
    if let Some(step) = outcome.percolated_after {
        println!("# percolated after opening: {}", step);
    }

    Ok(())
}
