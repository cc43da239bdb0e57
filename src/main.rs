use clap::Parser;
use settlr::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
