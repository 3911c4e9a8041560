use clap::Parser;
use factorlab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
