//! Content extraction.
//!
//! A fetched page contains the whole site chrome. The [`Extractor`] runs an
//! ordered list of strategies over the parsed page and keeps the first
//! fragment one of them produces. New page templates get a new strategy
//! appended instead of another branch in the loader.
#![allow(missing_docs)]

use std::fmt;

use crate::config::NavConfig;
use crate::host::PageDocument;

pub trait ExtractionStrategy {
    fn name(&self) -> &str;
    fn extract(&self, page: &dyn PageDocument) -> Option<String>;
}

/// Inner markup of the first element matching a selector group.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    name: String,
    selectors: String,
}

impl SelectorStrategy {
    pub fn new(name: impl Into<String>, selectors: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selectors: selectors.into(),
        }
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self, page: &dyn PageDocument) -> Option<String> {
        if self.selectors.trim().is_empty() {
            return None;
        }
        page.select_inner_html(&self.selectors)
    }
}

/// The whole body with shared chrome (sidebar, nav) cut out.
#[derive(Debug, Clone)]
pub struct StrippedBodyStrategy {
    strip: String,
}

impl StrippedBodyStrategy {
    pub fn new(strip: impl Into<String>) -> Self {
        Self {
            strip: strip.into(),
        }
    }
}

impl ExtractionStrategy for StrippedBodyStrategy {
    fn name(&self) -> &str {
        "stripped-body"
    }

    fn extract(&self, page: &dyn PageDocument) -> Option<String> {
        page.body_inner_html_without(&self.strip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub fragment: String,
    /// Name of the strategy that matched, `None` when the raw text was used
    pub strategy: Option<String>,
}

pub struct Extractor {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl Extractor {
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Content regions, then legacy column layouts, then the stripped body.
    pub fn from_config(config: &NavConfig) -> Self {
        Self::new()
            .with_strategy(SelectorStrategy::new("content-region", &config.primary_selectors))
            .with_strategy(SelectorStrategy::new("legacy-layout", &config.legacy_selectors))
            .with_strategy(StrippedBodyStrategy::new(&config.strip_selectors))
    }

    pub fn with_strategy<S: ExtractionStrategy + 'static>(mut self, strategy: S) -> Self {
        self.push(strategy);
        self
    }

    pub fn push<S: ExtractionStrategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Box::new(strategy));
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// First strategy to produce a fragment wins. If none does, the raw
    /// response text is used unmodified.
    pub fn extract(&self, page: &dyn PageDocument, raw: &str) -> Extraction {
        for strategy in &self.strategies {
            if let Some(fragment) = strategy.extract(page) {
                return Extraction {
                    fragment,
                    strategy: Some(strategy.name().to_owned()),
                };
            }
        }

        Extraction {
            fragment: raw.to_owned(),
            strategy: None,
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("Extractor").field("strategies", &names).finish()
    }
}
