use std::path::Path;
use std::time::Duration;

use chromiumoxide::cdp::browser_protocol::network::LoaderId;
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, NavigateParams, PrintToPdfParams, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::page::Page as CrPage;
use futures::StreamExt;
use tracing::debug;

use crate::error::{Error, Result};

/// A4 paper size in inches, the unit `Page.printToPDF` expects.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;

/// Lifecycle event Chromium emits once no network connections have been
/// active for a trailing ~500ms window.
const NETWORK_IDLE_EVENT: &str = "networkIdle";

/// One browser tab, wrapped with the operations an export run needs.
pub struct Page {
    inner: CrPage,
    navigation_timeout: Duration,
}

impl Page {
    pub(crate) fn new(inner: CrPage, navigation_timeout: Duration) -> Self {
        Self {
            inner,
            navigation_timeout,
        }
    }

    /// Navigate to `url` and wait until the network goes idle, bounded by
    /// the configured navigation timeout.
    pub async fn goto_idle(&self, url: &str) -> Result<()> {
        // Subscribe before enabling lifecycle events so none are missed.
        let mut lifecycle = self
            .inner
            .event_listener::<EventLifecycleEvent>()
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        self.inner
            .execute(SetLifecycleEventsEnabledParams::new(true))
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        // Navigate through the raw command so the response hands back the
        // loader id. The blank tab emits a networkIdle of its own and
        // enabling lifecycle events replays current state, so idleness is
        // keyed to this navigation's loader.
        let nav = self
            .inner
            .execute(NavigateParams::new(url))
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;

        if let Some(error_text) = nav.result.error_text.as_deref().filter(|t| !t.is_empty()) {
            return Err(Error::Navigation(format!("{error_text} ({url})")));
        }
        let loader_id = nav.result.loader_id;

        debug!(url, "navigation committed, waiting for network idle");

        let idle_wait = async {
            while let Some(event) = lifecycle.next().await {
                if idle_event_matches(&event.name, &event.loader_id, loader_id.as_ref()) {
                    return Ok(());
                }
            }
            Err(Error::Navigation(
                "lifecycle event stream ended before network idle".to_string(),
            ))
        };

        tokio::time::timeout(self.navigation_timeout, idle_wait)
            .await
            .map_err(|_| {
                Error::Navigation(format!(
                    "timed out after {:?} waiting for network idle on {url}",
                    self.navigation_timeout
                ))
            })?
    }

    /// Print the current page to `path` as an A4 PDF with background
    /// graphics, overwriting any existing file.
    pub async fn export_pdf(&self, path: &Path) -> Result<()> {
        let bytes = self
            .inner
            .pdf(a4_print_params())
            .await
            .map_err(|e| Error::Export(e.to_string()))?;

        tokio::fs::write(path, &bytes)
            .await
            .map_err(|e| Error::Export(format!("failed to write {}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = bytes.len(), "pdf written");
        Ok(())
    }
}

/// True only for a networkIdle event belonging to the tracked navigation.
/// A buffered idle event from the previous document must not resolve the
/// wait while the target page is still loading.
fn idle_event_matches(
    name: &str,
    event_loader: &LoaderId,
    target_loader: Option<&LoaderId>,
) -> bool {
    if name != NETWORK_IDLE_EVENT {
        return false;
    }
    match target_loader {
        Some(id) => event_loader == id,
        None => true,
    }
}

fn a4_print_params() -> PrintToPdfParams {
    PrintToPdfParams::builder()
        .print_background(true)
        .paper_width(A4_WIDTH_IN)
        .paper_height(A4_HEIGHT_IN)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_params_request_a4_with_backgrounds() {
        let params = a4_print_params();
        assert_eq!(params.print_background, Some(true));
        assert_eq!(params.paper_width, Some(A4_WIDTH_IN));
        assert_eq!(params.paper_height, Some(A4_HEIGHT_IN));
    }

    #[test]
    fn print_params_leave_other_fields_unset() {
        let params = a4_print_params();
        assert!(params.landscape.is_none());
        assert!(params.page_ranges.is_none());
        assert!(params.scale.is_none());
    }

    #[test]
    fn idle_wait_accepts_only_the_tracked_loader() {
        let blank = LoaderId::new("blank-document-loader");
        let target = LoaderId::new("navigation-loader");

        assert!(!idle_event_matches(
            NETWORK_IDLE_EVENT,
            &blank,
            Some(&target)
        ));
        assert!(idle_event_matches(
            NETWORK_IDLE_EVENT,
            &target,
            Some(&target)
        ));
    }

    #[test]
    fn idle_wait_ignores_other_lifecycle_events() {
        let target = LoaderId::new("navigation-loader");
        for name in ["load", "DOMContentLoaded", "networkAlmostIdle", "init"] {
            assert!(!idle_event_matches(name, &target, Some(&target)), "{name}");
        }
    }

    #[test]
    fn idle_wait_without_loader_falls_back_to_name_match() {
        let any = LoaderId::new("whatever");
        assert!(idle_event_matches(NETWORK_IDLE_EVENT, &any, None));
        assert!(!idle_event_matches("load", &any, None));
    }
}
