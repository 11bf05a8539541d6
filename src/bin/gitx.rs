use gitx::config::Settings;
use gitx::ui::ConsoleUi;

/// Entry point for the `gitx` binary.
///
/// Reads settings from the environment, installs the tracing subscriber, and
/// exits with the code returned by the CLI. Any error exits with status 1.
fn main() {
    let settings = Settings::from_env();
    gitx::init_tracing(&settings.log_filter);

    match gitx::cli::entry(std::env::args_os(), &settings, &mut ConsoleUi) {
        Ok(code) => std::process::exit(code),
        Err(_) => std::process::exit(1),
    }
}
