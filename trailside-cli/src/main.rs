//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    trailside_cli::init_logging();
    if let Err(err) = trailside_cli::run() {
        eprintln!("trailside: {err}");
        std::process::exit(1);
    }
}
