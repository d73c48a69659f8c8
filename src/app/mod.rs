//! `EcosystemApp` — the top-level egui application state.
//!
//! This module declares the `EcosystemApp` struct; its methods are split
//! across the sibling sub-modules:
//!
//! - `navigation` — background fetches, result polling, debounced search
//! - `content`    — starfield + floating-label scene, topic/product windows
//! - `hud`        — title, search bar, hovered-entity panel, stats line

pub mod content;
pub mod hud;
pub mod navigation;

use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};
use std::time::Instant;

use eframe::egui;

use techmesh::catalog::{Product, Topic};
use techmesh::net::api::{ApiClient, ApiError, SearchResults};
use techmesh::scene::camera::PointerNdc;
use techmesh::scene::{SceneConfig, SceneState};
use techmesh::selection::SelectionController;

/// Debounced global-search state.
#[derive(Default)]
pub struct SearchState {
    pub query: String,
    pub results: Option<SearchResults>,
    pub rx: Option<mpsc::Receiver<Result<SearchResults, ApiError>>>,
    pub last_edit: Option<Instant>,
    pub dirty: bool,
    pub loading: bool,
    pub open: bool,
}

pub struct EcosystemApp {
    pub api: Arc<ApiClient>,

    // Current topic batch and its stable display order.
    pub topics: BTreeMap<String, Topic>,
    pub topic_order: Vec<String>,
    pub loading_topics: bool,
    pub topics_error: Option<String>,
    pub topics_rx: Option<mpsc::Receiver<Result<BTreeMap<String, Topic>, ApiError>>>,

    // Drill-down fetch results, tagged with their request generation.
    pub products_rx: Option<mpsc::Receiver<(u64, Result<Vec<Product>, ApiError>)>>,

    pub scene: SceneState,
    pub selection: SelectionController,
    pub pointer: PointerNdc,
    pub search: SearchState,

    bootstrapped: bool,
}

impl EcosystemApp {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api: Arc::new(api),
            topics: BTreeMap::new(),
            topic_order: Vec::new(),
            loading_topics: false,
            topics_error: None,
            topics_rx: None,
            products_rx: None,
            scene: SceneState::new(SceneConfig::default()),
            selection: SelectionController::default(),
            pointer: PointerNdc::default(),
            search: SearchState::default(),
            bootstrapped: false,
        }
    }

    /// Topic at a scene index, per the stable display order.
    pub fn topic_at(&self, index: usize) -> Option<&Topic> {
        self.topic_order
            .get(index)
            .and_then(|id| self.topics.get(id))
    }

    /// Scene index of an entity id, if it is a displayed topic.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.topic_order.iter().position(|t| t == id)
    }
}

impl eframe::App for EcosystemApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.bootstrapped {
            self.bootstrapped = true;
            self.load_topics(ctx);
        }

        self.poll_fetches();
        self.tick_search(ctx);

        self.draw_scene(ctx);
        self.draw_hud(ctx);
        self.draw_selection_windows(ctx);

        for event in self.selection.drain_events() {
            log::debug!("selection event: {event:?}");
        }

        // The scene animates continuously.
        ctx.request_repaint();
    }
}
