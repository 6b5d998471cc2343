pub mod config;
pub mod controller;
pub mod document;
pub mod error;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod scroll;

pub use config::{AppConfig, EasingType, NavConfig, RevealConfig, ScrollConfig};
pub use controller::{EventOutcome, PageEvent, ScrollUiController};
pub use document::Document;
pub use error::{Error, Result};
pub use nav::{ClickOutcome, NavHandler, ScrollTarget};
pub use page::{ElementId, StaticPage};
pub use reveal::{RevealHandler, RevealReport};
pub use scroll::ScrollAnimator;
