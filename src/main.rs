use clap::Parser;
use slr::cli::{self, args::Options};

fn main() {
    let options = Options::parse();

    if let Err(e) = cli::run(&options) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
