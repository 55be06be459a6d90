use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use page2pdf::config::SessionConfig;
use page2pdf::{banner, input, pipeline};

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so they never corrupt the spinner line.
    // Chromium sends CDP events newer than the library knows; keep that noise down.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn")
            .add_directive("chromiumoxide::conn=error".parse().expect("valid directive"))
            .add_directive("chromiumoxide::handler=error".parse().expect("valid directive"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    banner::print();

    let request = match input::prompt_request().await {
        Ok(request) => request,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(err.exit_code());
        }
    };

    // Single exit decision point: every stage reports through `Result`, the
    // spinner has already narrated failures, and the code is chosen here.
    match pipeline::export_page(&request, SessionConfig::default()).await {
        Ok(_path) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(err.exit_code()),
    }
}
