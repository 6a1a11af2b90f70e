use clap::Args;
use deadline_core::dates::now_timestamp;
use deadline_core::{Config, Snapshot};

use super::print_frame;

#[derive(Args)]
pub struct StatusArgs {
    /// Print a JSON object instead of the label
    #[arg(long)]
    json: bool,
    /// Evaluate at this Unix timestamp instead of now
    #[arg(long, allow_hyphen_values = true)]
    at: Option<i64>,
}

pub fn run(args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let now = args.at.unwrap_or_else(now_timestamp);
    let frame = Snapshot::from(&config).frame(now);
    print_frame(&frame, args.json)?;
    Ok(())
}
