use std::time::Duration;

use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;
use tracing::debug;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::page::Page;

/// Chrome flags that improve startup and load time without affecting
/// rendering output.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// One Chromium process, owned for the duration of an export run.
///
/// The handle must be released with [`PdfBrowser::close`] on every exit
/// path; dropping it without closing leaves an orphaned Chromium process.
pub struct PdfBrowser {
    browser: CrBrowser,
    navigation_timeout: Duration,
    handler_task: tokio::task::JoinHandle<()>,
}

impl PdfBrowser {
    /// Launch a Chromium instance with the given session configuration.
    pub async fn launch(config: &SessionConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cr_config = builder.build().map_err(Error::Launch)?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        // The handler drives all CDP traffic; it must run for as long as the
        // browser handle is alive.
        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        debug!(headless = config.headless, "chromium launched");

        Ok(Self {
            browser,
            navigation_timeout: config.navigation_timeout,
            handler_task,
        })
    }

    /// Open a blank tab. Navigation happens separately via [`Page::goto_idle`].
    pub async fn new_page(&self) -> Result<Page> {
        let cr_page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::PageOpen(e.to_string()))?;
        Ok(Page::new(cr_page, self.navigation_timeout))
    }

    /// Shut the browser down and wait for the Chromium process to exit.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| Error::Shutdown(e.to_string()))?;
        self.browser
            .wait()
            .await
            .map_err(|e| Error::Shutdown(e.to_string()))?;
        self.handler_task.abort();
        debug!("chromium shut down");
        Ok(())
    }
}
