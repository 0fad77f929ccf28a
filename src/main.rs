use clap::Parser;
use pftrack::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
