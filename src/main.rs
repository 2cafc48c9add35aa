#[cfg(target_os = "windows")]
mod windows_main;

use std::process::ExitCode;

fn main() -> ExitCode {
    #[cfg(target_os = "windows")]
    {
        windows_main::run()
    }

    #[cfg(not(target_os = "windows"))]
    {
        let err = norsk_lookup::AppError::UnsupportedPlatform("norsk-lookup");
        eprintln!("Error: {err}");
        ExitCode::FAILURE
    }
}
