use std::path::{Path, PathBuf};

use tracing::warn;

use crate::browser::PdfBrowser;
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::input::PdfRequest;
use crate::spinner::Spinner;

/// Run the full export: launch, open a tab, navigate, print to PDF.
/// The file lands in the current working directory as `<filename>.pdf`.
pub async fn export_page(request: &PdfRequest, config: SessionConfig) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    export_page_to(request, config, &cwd).await
}

/// Like [`export_page`], with the output directory made explicit.
///
/// The browser handle is closed on every exit path. After a stage failure
/// the close result is only logged so it never masks the stage error.
pub async fn export_page_to(
    request: &PdfRequest,
    config: SessionConfig,
    dir: &Path,
) -> Result<PathBuf> {
    let spinner = Spinner::start("Launching browser...");
    let browser = match PdfBrowser::launch(&config).await {
        Ok(browser) => {
            spinner.success("Browser opened");
            browser
        }
        Err(err) => {
            spinner.fail("Failed to open browser. Try again.");
            return Err(err);
        }
    };

    match drive(&browser, request, dir).await {
        Ok(path) => {
            browser.close().await?;
            Ok(path)
        }
        Err(err) => {
            if let Err(close_err) = browser.close().await {
                warn!("browser shutdown after failed stage also failed: {close_err}");
            }
            Err(err)
        }
    }
}

/// The stages that need a live browser, in strict order. A later stage
/// never runs after an earlier one fails.
async fn drive(browser: &PdfBrowser, request: &PdfRequest, dir: &Path) -> Result<PathBuf> {
    let spinner = Spinner::start("Opening tab...");
    let page = match browser.new_page().await {
        Ok(page) => {
            spinner.success("New tab opened");
            page
        }
        Err(err) => {
            spinner.fail("Failed to open a new tab. Try again.");
            return Err(err);
        }
    };

    let spinner = Spinner::start("Opening URL...");
    match page.goto_idle(&request.url).await {
        Ok(()) => spinner.success("URL loaded"),
        Err(err) => {
            spinner.fail("Failed to open the URL. Try again.");
            return Err(err);
        }
    }

    let path = dir.join(format!("{}.pdf", request.filename));
    let spinner = Spinner::start("Converting page to PDF and saving to disk...");
    match page.export_pdf(&path).await {
        Ok(()) => {
            spinner.success(&format!("PDF saved at {}", path.display()));
            Ok(path)
        }
        Err(err) => {
            spinner.fail(&export_failure_line(&err));
            Err(err)
        }
    }
}

/// The export stage already names itself in the spinner line, so only the
/// underlying detail of an export error is appended, not its full display.
fn export_failure_line(err: &Error) -> String {
    let detail = match err {
        Error::Export(detail) => detail.clone(),
        other => other.to_string(),
    };
    format!("Failed to convert and save the PDF. Try again. {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionBuilder;
    use crate::error::Error;

    #[tokio::test]
    async fn launch_failure_stops_the_pipeline_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let request = PdfRequest {
            url: "https://example.com".into(),
            filename: "report".into(),
        };
        let config = SessionBuilder::new()
            .chrome_path("/definitely/not/a/chromium")
            .build();

        let result = export_page_to(&request, config, dir.path()).await;

        assert!(matches!(result, Err(Error::Launch(_))), "{result:?}");
        assert!(!dir.path().join("report.pdf").exists());
    }

    #[test]
    fn export_failure_line_does_not_repeat_the_stage_name() {
        let err = Error::Export("failed to write /tmp/report.pdf: permission denied".into());
        let line = export_failure_line(&err);
        assert!(line.contains("permission denied"), "{line}");
        assert!(!line.contains("PDF export failed"), "{line}");
    }
}
