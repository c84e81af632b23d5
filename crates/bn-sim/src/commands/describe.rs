use std::error::Error;
use std::path::PathBuf;

use bn_graph::load_network;
use clap::Args;

#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Network description (`.yaml`/`.yml` or JSON).
    #[arg(long)]
    pub network: PathBuf,
}

pub fn run(args: &DescribeArgs) -> Result<(), Box<dyn Error>> {
    let network = load_network(&args.network)?;
    print!("{network}");
    Ok(())
}
