use std::process::ExitCode;

fn main() -> ExitCode {
    jsonmend::cli::run()
}
