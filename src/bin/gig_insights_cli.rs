use std::process;

use clap::Parser;
use gig_insights::{cli::Cli, init};

fn main() {
    init();
    let cli = Cli::parse();

    match gig_insights::cli::run(&cli) {
        Ok(output) => println!("{output}"),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
