use std::cell::{Cell, RefCell};
use std::fmt;

use log::{debug, error, warn};
use swapnav_utils::{Sequence, content_url, is_internal_href, normalize_path, same_page};

use crate::config::NavConfig;
use crate::error::NavError;
use crate::event::{ClickEvent, HistoryEntry, Intercept, LoadOutcome, NavigateOutcome};
use crate::extract::Extractor;
use crate::host::{Browser, ElementHandle, LayoutHandles, PageDocument};

const LOADING_CLASS: &str = "loading";
const ACTIVE_CLASS: &str = "active";

/// The navigation controller.
///
/// Owns the current path and sidebar flag, and drives the injected layout
/// handles through link interception, content loading, history replay and
/// sidebar toggling. All methods take `&self` so one instance can be shared
/// by every event listener on the page.
pub struct Navigator<B: Browser> {
    pub(crate) browser: B,
    pub(crate) handles: LayoutHandles<B::Element>,
    pub(crate) config: NavConfig,
    extractor: Extractor,
    current_path: RefCell<String>,
    pub(crate) sidebar_hidden: Cell<bool>,
    loads: Sequence,
}

impl<B: Browser> Navigator<B> {
    /// Build a controller showing the browser's current path.
    pub fn new(browser: B, handles: LayoutHandles<B::Element>, config: NavConfig) -> Self {
        let extractor = Extractor::from_config(&config);
        let current_path = browser.pathname();

        Self {
            browser,
            handles,
            config,
            extractor,
            current_path: RefCell::new(current_path),
            sidebar_hidden: Cell::new(false),
            loads: Sequence::new(),
        }
    }

    /// Replace the default extraction chain.
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Record the initial history state and highlight the current link.
    pub fn start(&self) {
        self.update_active_links();

        let entry = HistoryEntry::new(self.current_path());
        if let Err(e) = self.browser.replace_history(&entry) {
            warn!("Could not record initial history state: {e}");
        }
    }

    /// Normalized path of the page on display.
    pub fn current_path(&self) -> String {
        self.current_path.borrow().clone()
    }

    /// Configuration in use.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Host the controller drives.
    pub fn browser(&self) -> &B {
        &self.browser
    }

    /// Layout elements found at start.
    pub fn handles(&self) -> &LayoutHandles<B::Element> {
        &self.handles
    }

    /// Classify a document click. Closing the mobile menu happens here as a
    /// side effect; the caller prevents the default action on
    /// [`Intercept::Navigate`] and then runs [`Navigator::navigate`].
    pub fn handle_click(&self, click: &ClickEvent) -> Intercept {
        if click.on_overlay {
            self.close_mobile_menu();
        }

        if click.in_sidebar_toggle {
            return Intercept::Pass;
        }

        let Some(anchor) = &click.anchor else {
            return Intercept::Pass;
        };

        if anchor.in_sidebar && self.is_mobile() {
            self.close_mobile_menu();
        }

        match anchor.href.as_deref() {
            Some(href) if is_internal_href(href) => Intercept::Navigate(href.to_owned()),
            _ => Intercept::Pass,
        }
    }

    /// Load `href` in place and record it in history.
    ///
    /// Falls back to a full page load of the original `href` when the
    /// in-place load fails.
    pub async fn navigate(&self, href: &str) -> NavigateOutcome {
        let path = normalize_path(href);

        if path == self.current_path() {
            debug!("Already on {path}");
            return NavigateOutcome::Unchanged;
        }

        let result = match self.load_content(&path, true).await {
            Ok(LoadOutcome::Loaded) => self
                .browser
                .push_history(&HistoryEntry::new(path.as_str()))
                .map(|()| LoadOutcome::Loaded),
            other => other,
        };

        match result {
            Ok(LoadOutcome::Loaded) => {
                *self.current_path.borrow_mut() = path;
                self.update_active_links();
                self.browser.scroll_to_top();
                NavigateOutcome::Loaded
            }
            Ok(LoadOutcome::Superseded) => {
                debug!("Navigation to {path} was superseded");
                NavigateOutcome::Superseded
            }
            Err(e) => {
                error!("Navigation failed: {e}");
                self.browser.assign_location(href);
                NavigateOutcome::FellBack
            }
        }
    }

    /// Replay a back/forward history entry. States without a path are
    /// ignored. The displayed path is recorded as current, but no history
    /// entry is pushed and the active link is left alone.
    pub async fn replay(&self, state: Option<HistoryEntry>) -> Result<Option<LoadOutcome>, NavError> {
        let Some(entry) = state else {
            return Ok(None);
        };

        let outcome = self.load_content(&entry.path, false).await?;
        if outcome == LoadOutcome::Loaded {
            *self.current_path.borrow_mut() = entry.path;
        }

        Ok(Some(outcome))
    }

    /// Fetch `path`, extract its content fragment and swap it into the
    /// content container.
    ///
    /// Every call takes a ticket. A load whose ticket is no longer the
    /// latest when its fetch or transition finishes writes nothing and
    /// reports [`LoadOutcome::Superseded`].
    pub async fn load_content(&self, path: &str, show_loading: bool) -> Result<LoadOutcome, NavError> {
        let ticket = self.loads.next();

        if show_loading {
            self.show_loading();
        }

        let result = self.fetch_and_swap(path, ticket).await;

        if !self.loads.is_current(ticket) {
            if let Err(e) = &result {
                debug!("Ignoring failure of superseded load of {path}: {e}");
            }
            return Ok(LoadOutcome::Superseded);
        }

        self.hide_loading();

        if let Err(e) = &result {
            error!("Failed to load content for {path}: {e}");
            if let Some(content) = &self.handles.content {
                content.set_style("opacity", "1");
            }
        }

        result
    }

    async fn fetch_and_swap(&self, path: &str, ticket: usize) -> Result<LoadOutcome, NavError> {
        let url = content_url(path);
        debug!("Fetching {url}");

        let html = self.browser.fetch_text(&url).await?;
        if !self.loads.is_current(ticket) {
            return Ok(LoadOutcome::Superseded);
        }

        let (fragment, title) = match self.browser.parse_page(&html) {
            Ok(page) => {
                let extraction = self.extractor.extract(&page, &html);
                match &extraction.strategy {
                    Some(name) => debug!("Extracted content of {path} with {name}"),
                    None => debug!("No content region in {path}, using raw response"),
                }
                (extraction.fragment, page.title())
            }
            Err(e) => {
                warn!("Could not parse {url}, using raw response: {e}");
                (html, None)
            }
        };

        if !self.swap_content(&fragment, ticket).await? {
            return Ok(LoadOutcome::Superseded);
        }

        if let Some(title) = title {
            self.browser.set_title(&title);
        }

        self.run_content_hooks();

        Ok(LoadOutcome::Loaded)
    }

    /// Fade out, wait, replace the markup, fade in. Returns false when the
    /// load was superseded during the wait.
    async fn swap_content(&self, fragment: &str, ticket: usize) -> Result<bool, NavError> {
        let Some(content) = &self.handles.content else {
            return Err(NavError::Dom(format!(
                "content container #{} not found",
                self.config.content_container_id
            )));
        };

        content.set_style("opacity", "0");
        self.browser.sleep(self.config.transition_delay_ms).await;

        if !self.loads.is_current(ticket) {
            return Ok(false);
        }

        content.set_inner_html(fragment);
        content.set_style("opacity", "1");

        Ok(true)
    }

    fn run_content_hooks(&self) {
        if let Some(hook) = &self.config.highlighter {
            if !self.browser.call_global(&hook.object, &hook.method) {
                debug!("{}.{} not available", hook.object, hook.method);
            }
        }

        self.browser.dispatch_event(&self.config.content_loaded_event);
    }

    fn show_loading(&self) {
        if let Some(indicator) = &self.handles.loading_indicator {
            indicator.set_style("display", "flex");
        }
        if let Some(content) = &self.handles.content {
            content.add_class(LOADING_CLASS);
        }
    }

    fn hide_loading(&self) {
        if let Some(indicator) = &self.handles.loading_indicator {
            indicator.set_style("display", "none");
        }
        if let Some(content) = &self.handles.content {
            content.remove_class(LOADING_CLASS);
        }
    }

    /// Clear every nav link, then mark the first one pointing at the
    /// current path.
    pub fn update_active_links(&self) {
        let links = self.browser.query_all(&self.config.nav_link_selector);
        for link in &links {
            link.remove_class(ACTIVE_CLASS);
        }

        let current_path = self.current_path();
        let current_link = links.iter().find(|link| {
            link.attribute("href")
                .is_some_and(|href| same_page(&href, &current_path))
        });

        if let Some(link) = current_link {
            link.add_class(ACTIVE_CLASS);
        }
    }
}

impl<B: Browser> fmt::Debug for Navigator<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("current_path", &self.current_path.borrow())
            .field("sidebar_hidden", &self.sidebar_hidden.get())
            .field("extractor", &self.extractor)
            .field("config", &self.config)
            .finish()
    }
}
