//! Background data loading for `EcosystemApp`.
//!
//! All API calls block, so each runs on a spawned thread and reports back
//! over an mpsc channel; the UI thread polls with `try_recv` once per
//! frame. Drill-down results carry their request generation so the
//! selection controller can discard anything superseded.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use eframe::egui;

use techmesh::selection::FetchRequest;

use super::EcosystemApp;

/// Pause after the last keystroke before a search request goes out.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Queries shorter than this never hit the API.
const SEARCH_MIN_CHARS: usize = 2;
const SEARCH_PAGE_SIZE: u32 = 10;

impl EcosystemApp {
    /// Kick off the initial topic load.
    pub fn load_topics(&mut self, ctx: &egui::Context) {
        if self.loading_topics {
            return;
        }
        self.loading_topics = true;
        self.topics_error = None;

        let (tx, rx) = mpsc::channel();
        self.topics_rx = Some(rx);

        let api = Arc::clone(&self.api);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = api.fetch_topics();
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Run a drill-down fetch requested by the selection controller.
    /// A newer dispatch replaces the receiver; if the old thread still
    /// resolves, its generation no longer matches and the result is
    /// dropped by the controller.
    pub fn dispatch_products(&mut self, ctx: &egui::Context, request: FetchRequest) {
        let (tx, rx) = mpsc::channel();
        self.products_rx = Some(rx);

        let api = Arc::clone(&self.api);
        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = api.products_by_topic(&request.filter, request.page_size);
            let _ = tx.send((request.generation, result));
            ctx.request_repaint();
        });
    }

    /// Drain any finished background work. Called once per frame.
    pub fn poll_fetches(&mut self) {
        if let Some(rx) = &self.topics_rx {
            if let Ok(result) = rx.try_recv() {
                self.topics_rx = None;
                self.loading_topics = false;
                match result {
                    Ok(topics) => {
                        log::info!("loaded {} topics", topics.len());
                        self.topic_order = topics.keys().cloned().collect();
                        self.topics = topics;
                        self.scene.rebuild(self.topic_order.len());
                    }
                    Err(err) => {
                        log::warn!("topic load failed: {err}");
                        self.topics_error = Some(err.to_string());
                    }
                }
            }
        }

        if let Some(rx) = &self.products_rx {
            if let Ok((generation, result)) = rx.try_recv() {
                self.products_rx = None;
                self.selection.apply_products(generation, result);
            }
        }

        if let Some(rx) = &self.search.rx {
            if let Ok(result) = rx.try_recv() {
                self.search.rx = None;
                self.search.loading = false;
                match result {
                    Ok(results) => {
                        self.search.open =
                            !results.topics.is_empty() || !results.products.is_empty();
                        self.search.results = Some(results);
                    }
                    Err(err) => {
                        log::warn!("search failed: {err}");
                        self.search.results = None;
                        self.search.open = false;
                    }
                }
            }
        }
    }

    /// Note a search-box edit; the fetch happens after the debounce.
    pub fn on_search_edited(&mut self) {
        if self.search.query.chars().count() < SEARCH_MIN_CHARS {
            self.search.results = None;
            self.search.open = false;
            self.search.dirty = false;
            return;
        }
        self.search.last_edit = Some(std::time::Instant::now());
        self.search.dirty = true;
    }

    /// Dispatch the pending search once the debounce window has passed.
    pub fn tick_search(&mut self, ctx: &egui::Context) {
        let expired = self
            .search
            .last_edit
            .is_some_and(|at| at.elapsed() >= SEARCH_DEBOUNCE);
        if !(self.search.dirty && expired) {
            return;
        }
        self.search.dirty = false;
        self.search.loading = true;

        let (tx, rx) = mpsc::channel();
        self.search.rx = Some(rx);

        let api = Arc::clone(&self.api);
        let ctx = ctx.clone();
        let query = self.search.query.clone();
        std::thread::spawn(move || {
            let result = api.search_global(&query, SEARCH_PAGE_SIZE);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    pub fn close_search(&mut self) {
        self.search.query.clear();
        self.search.results = None;
        self.search.open = false;
        self.search.dirty = false;
    }
}
