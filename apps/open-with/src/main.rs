use std::process::ExitCode;

fn main() -> ExitCode {
    open_with_lib::app::run()
}
