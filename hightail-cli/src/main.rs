//! Entry point for the Hightail command-line interface.
#![forbid(unsafe_code)]

#[expect(
    clippy::print_stderr,
    reason = "fatal errors go to stderr before the process exits"
)]
fn main() {
    env_logger::init();
    if let Err(err) = hightail_cli::run() {
        eprintln!("hightail: {err}");
        std::process::exit(1);
    }
}
