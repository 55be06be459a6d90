pub mod banner;
pub mod browser;
pub mod config;
pub mod error;
pub mod input;
pub mod page;
pub mod pipeline;
pub mod spinner;

pub use browser::PdfBrowser;
pub use config::{SessionBuilder, SessionConfig};
pub use error::{Error, Result};
pub use input::PdfRequest;
pub use page::Page;
