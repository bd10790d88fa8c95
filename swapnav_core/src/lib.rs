//! Platform-independent core of the in-place page navigation controller.
//!
//! A click on an internal link becomes a fetch of the target page, the
//! interesting fragment of that page is swapped into the content container,
//! and a history entry is pushed so back/forward keep working. The
//! controller also owns the collapsible sidebar.
//!
//! Nothing here depends on a browser. The `swapnav` crate implements
//! [`Browser`] and [`ElementHandle`] on top of `web-sys`.

mod config;
mod error;
mod event;
mod extract;
mod host;
mod navigator;
mod sidebar;

pub use config::{HighlighterHook, NavConfig};
pub use error::{NavError, NavResult};
pub use event::{AnchorClick, ClickEvent, HistoryEntry, Intercept, LoadOutcome, NavigateOutcome};
pub use extract::{Extraction, ExtractionStrategy, Extractor, SelectorStrategy, StrippedBodyStrategy};
pub use host::{Browser, ElementHandle, LayoutHandles, PageDocument};
pub use navigator::Navigator;

pub use swapnav_utils::{content_url, is_internal_href, normalize_path};
