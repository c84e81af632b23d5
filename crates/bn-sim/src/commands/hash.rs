use std::error::Error;
use std::path::PathBuf;

use bn_graph::{canonical_hash, load_network};
use clap::Args;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Network description (`.yaml`/`.yml` or JSON).
    #[arg(long)]
    pub network: PathBuf,
}

pub fn run(args: &HashArgs) -> Result<(), Box<dyn Error>> {
    let network = load_network(&args.network)?;
    println!("{}", canonical_hash(&network));
    Ok(())
}
