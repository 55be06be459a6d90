use std::time::Duration;

/// Default bound on navigation plus the network-idle wait.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one browser session.
pub struct SessionConfig {
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Explicit Chromium executable; autodetected when `None`.
    pub chrome_path: Option<String>,
    /// How long `goto_idle` waits for the page to load and go network-idle.
    pub navigation_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }
}

pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            config: SessionConfig::default(),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn navigation_timeout(mut self, timeout: Duration) -> Self {
        self.config.navigation_timeout = timeout;
        self
    }

    pub fn build(self) -> SessionConfig {
        self.config
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
