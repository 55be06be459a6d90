use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use tokio::task::JoinHandle;

const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const TICK: Duration = Duration::from_millis(80);

/// Clear the current line and return the cursor to column one.
const CLEAR_LINE: &str = "\r\x1b[2K";

/// A single-line progress indicator for one pipeline stage.
///
/// Animates while pending and is finalized in place with a success or
/// failure glyph. When stdout is not a terminal the label and the final
/// line print plainly, with no animation or color.
pub struct Spinner {
    animated: bool,
    ticker: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        let animated = io::stdout().is_terminal();
        if !animated {
            println!("{label}");
            return Self {
                animated,
                ticker: None,
            };
        }

        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            let mut frame = 0usize;
            loop {
                interval.tick().await;
                print!("{CLEAR_LINE}{} {label}", FRAMES[frame % FRAMES.len()]);
                let _ = io::stdout().flush();
                frame += 1;
            }
        });

        Self {
            animated,
            ticker: Some(ticker),
        }
    }

    /// Replace the spinner with a green check and `text`.
    pub fn success(self, text: &str) {
        self.finish("\x1b[32m✔\x1b[0m", "✔", text);
    }

    /// Replace the spinner with a red cross and `text`.
    pub fn fail(self, text: &str) {
        self.finish("\x1b[31m✖\x1b[0m", "✖", text);
    }

    fn finish(self, glyph_color: &str, glyph_plain: &str, text: &str) {
        if let Some(ticker) = self.ticker {
            ticker.abort();
        }
        if self.animated {
            println!("{CLEAR_LINE}{glyph_color} {text}");
        } else {
            println!("{glyph_plain} {text}");
        }
    }
}
