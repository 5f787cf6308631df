use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(quality_gate::run())
}
