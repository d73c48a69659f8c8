//! Hover and selection state for the scene, plus drill-down mediation.
//!
//! The controller owns the interaction state and the drill-down result
//! slot, but performs no I/O itself: operations that need data return a
//! `FetchRequest` for the host to dispatch on a background thread, and
//! the host feeds the answer back through `apply_products`. Each request
//! carries a generation number; a response whose generation no longer
//! matches is stale and is discarded, so a superseded fetch can never
//! overwrite a newer one.

use crate::catalog::{Entity, Product, Topic, TopicFilter};
use crate::catalog::format::{format_field_name, format_text};
use crate::net::api::ApiError;

const DEFAULT_PAGE_SIZE: u32 = 50;

/// Notification to external collaborators (HUD, overlays). Drained by
/// the host once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    HoverChanged(Option<Entity>),
    SelectionChanged(Option<Entity>),
    DrillDown { parent: Entity, value: String },
}

/// A drill-down fetch the host must run against the API.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub generation: u64,
    pub filter: TopicFilter,
    pub page_size: u32,
}

/// Hover + selection, independent and both optional; at most one of each.
pub struct SelectionController {
    hovered: Option<Entity>,
    selected: Option<Entity>,
    products: Vec<Product>,
    loading: bool,
    error: bool,
    generation: u64,
    page_size: u32,
    events: Vec<SelectionEvent>,
}

impl Default for SelectionController {
    fn default() -> Self {
        Self {
            hovered: None,
            selected: None,
            products: Vec::new(),
            loading: false,
            error: false,
            generation: 0,
            page_size: DEFAULT_PAGE_SIZE,
            events: Vec::new(),
        }
    }
}

impl SelectionController {
    // ── State accessors ──

    pub fn hovered(&self) -> Option<&Entity> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<&Entity> {
        self.selected.as_ref()
    }

    /// Current drill-down result list (empty while loading or on error).
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> bool {
        self.error
    }

    /// Take all notifications accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Operations ──

    /// Set (or clear) the hovered entity. Emits only on change; no other
    /// side effects — hovering never fetches.
    pub fn hover(&mut self, entity: Option<Entity>) {
        let changed = match (&self.hovered, &entity) {
            (Some(a), Some(b)) => a.id() != b.id(),
            (None, None) => false,
            _ => true,
        };
        if changed {
            self.hovered = entity.clone();
            self.events.push(SelectionEvent::HoverChanged(entity));
        }
    }

    /// Select an entity. Hover is left untouched — the two are
    /// orthogonal. Selecting a topic with drill-down values starts a
    /// scoped product fetch; selecting a product uses its summary as-is.
    pub fn select(&mut self, entity: Entity) -> Option<FetchRequest> {
        self.selected = Some(entity.clone());
        self.events
            .push(SelectionEvent::SelectionChanged(Some(entity.clone())));

        match entity {
            Entity::Topic(topic) if !topic.values.is_empty() => {
                Some(self.begin_fetch(TopicFilter::by_topic(&topic.id)))
            }
            Entity::Topic(_) => {
                // Nothing to drill into; clear any previous result list.
                self.reset_results();
                None
            }
            Entity::Product(_) => None,
        }
    }

    /// Narrow the current topic to one discrete value. The previous
    /// result list is cleared immediately so no stale rows flash while
    /// the new fetch is in flight.
    pub fn select_subvalue(&mut self, topic: &Topic, value: &str) -> FetchRequest {
        self.events.push(SelectionEvent::DrillDown {
            parent: Entity::Topic(topic.clone()),
            value: value.to_string(),
        });
        self.begin_fetch(TopicFilter::by_value(&topic.id, value))
    }

    /// Follow a cross-reference from a product's relationship list:
    /// closes the product view by selecting a topic-like view synthesized
    /// from the relation, then fetches the same way a sub-value does.
    pub fn select_related_badge(&mut self, target: &str, relation_type: &str) -> FetchRequest {
        let mut topic = Topic::named(
            relation_type,
            &format!("{}: {}", format_field_name(relation_type), format_text(target)),
        );
        topic.icon = Some("🔗".to_string());
        topic.values = vec![target.to_string()];

        self.selected = Some(Entity::Topic(topic.clone()));
        self.events
            .push(SelectionEvent::SelectionChanged(self.selected.clone()));
        self.begin_fetch(TopicFilter::by_value(relation_type, target))
    }

    /// Back to idle: no selection, no hover. Bumps the generation so any
    /// in-flight fetch resolves as stale instead of reviving a closed
    /// view.
    pub fn clear(&mut self) {
        if self.selected.is_some() {
            self.selected = None;
            self.events.push(SelectionEvent::SelectionChanged(None));
        }
        if self.hovered.is_some() {
            self.hovered = None;
            self.events.push(SelectionEvent::HoverChanged(None));
        }
        self.generation = self.generation.wrapping_add(1);
        self.reset_results();
    }

    /// Feed a fetch result back. Results from a superseded generation
    /// are discarded; errors become a flag, never a panic or a poisoned
    /// controller.
    pub fn apply_products(&mut self, generation: u64, result: Result<Vec<Product>, ApiError>) {
        if generation != self.generation {
            log::debug!(
                "discarding stale fetch result (generation {generation}, current {})",
                self.generation
            );
            return;
        }
        self.loading = false;
        match result {
            Ok(products) => {
                self.error = false;
                self.products = products;
            }
            Err(err) => {
                log::warn!("product fetch failed: {err}");
                self.error = true;
                self.products.clear();
            }
        }
    }

    fn begin_fetch(&mut self, filter: TopicFilter) -> FetchRequest {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.error = false;
        self.products.clear();
        FetchRequest {
            generation: self.generation,
            filter,
            page_size: self.page_size,
        }
    }

    fn reset_results(&mut self) {
        self.loading = false;
        self.error = false;
        self.products.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic_with_values(id: &str, values: &[&str]) -> Topic {
        let mut topic = Topic::named(id, id);
        topic.values = values.iter().map(|v| v.to_string()).collect();
        topic
    }

    fn products(skus: &[&str]) -> Vec<Product> {
        skus.iter().map(|sku| Product::new(sku, sku)).collect()
    }

    #[test]
    fn hover_emits_only_on_change() {
        let mut ctrl = SelectionController::default();
        let topic = Entity::Topic(Topic::named("hemera", "Hemera"));
        ctrl.hover(Some(topic.clone()));
        ctrl.hover(Some(topic.clone()));
        ctrl.hover(None);
        ctrl.hover(None);
        let events = ctrl.drain_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], SelectionEvent::HoverChanged(Some(_))));
        assert!(matches!(events[1], SelectionEvent::HoverChanged(None)));
    }

    #[test]
    fn hover_and_selection_are_independent() {
        let mut ctrl = SelectionController::default();
        let a = Entity::Topic(Topic::named("a", "A"));
        let b = Entity::Topic(Topic::named("b", "B"));
        ctrl.hover(Some(a.clone()));
        ctrl.select(b.clone());
        assert_eq!(ctrl.hovered().unwrap().id(), "a");
        assert_eq!(ctrl.selected().unwrap().id(), "b");
    }

    #[test]
    fn selecting_topic_with_values_starts_loading() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("protocolos", &["a", "b"]);
        let req = ctrl.select(Entity::Topic(topic)).expect("fetch expected");
        assert!(ctrl.loading());
        assert!(!ctrl.error());
        assert!(ctrl.products().is_empty());
        assert_eq!(req.filter, TopicFilter::by_topic("protocolos"));

        ctrl.apply_products(req.generation, Ok(products(&["P1", "P2", "P3"])));
        assert!(!ctrl.loading());
        let skus: Vec<_> = ctrl.products().iter().map(|p| p.sku.as_str()).collect();
        assert_eq!(skus, vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn selecting_topic_without_values_fetches_nothing() {
        let mut ctrl = SelectionController::default();
        assert!(ctrl.select(Entity::Topic(Topic::named("mobii", "MOBii"))).is_none());
        assert!(!ctrl.loading());
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("protocolos", &["x", "y"]);
        ctrl.select(Entity::Topic(topic.clone()));

        let req_x = ctrl.select_subvalue(&topic, "x");
        let req_y = ctrl.select_subvalue(&topic, "y");
        assert!(ctrl.loading());

        // "x" resolves after "y" superseded it: must never be applied.
        ctrl.apply_products(req_x.generation, Ok(products(&["STALE"])));
        assert!(ctrl.loading());
        assert!(ctrl.products().is_empty());

        ctrl.apply_products(req_y.generation, Ok(products(&["FRESH"])));
        assert!(!ctrl.loading());
        assert_eq!(ctrl.products()[0].sku, "FRESH");
    }

    #[test]
    fn subvalue_clears_previous_results_immediately() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("protocolos", &["x", "y"]);
        let req = ctrl.select(Entity::Topic(topic.clone())).unwrap();
        ctrl.apply_products(req.generation, Ok(products(&["OLD"])));
        assert_eq!(ctrl.products().len(), 1);

        ctrl.select_subvalue(&topic, "x");
        assert!(ctrl.products().is_empty());
        assert!(ctrl.loading());
    }

    #[test]
    fn fetch_failure_sets_error_flag_only() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("mdcs", &["iris"]);
        let req = ctrl.select(Entity::Topic(topic)).unwrap();
        ctrl.apply_products(req.generation, Err(ApiError::Status(500)));
        assert!(!ctrl.loading());
        assert!(ctrl.error());
        assert!(ctrl.products().is_empty());
        // controller state itself is intact
        assert!(ctrl.selected().is_some());
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("nics", &["n1"]);
        let req = ctrl.select(Entity::Topic(topic)).unwrap();
        ctrl.apply_products(req.generation, Ok(Vec::new()));
        assert!(!ctrl.loading());
        assert!(!ctrl.error());
        assert!(ctrl.products().is_empty());
    }

    #[test]
    fn related_badge_synthesizes_topic_view() {
        let mut ctrl = SelectionController::default();
        ctrl.select(Entity::Product(Product::new("P1", "Meter")));
        let req = ctrl.select_related_badge("dlms", "protocolos");

        let selected = ctrl.selected().unwrap();
        match selected {
            Entity::Topic(topic) => {
                assert_eq!(topic.id, "protocolos");
                assert_eq!(topic.values, vec!["dlms"]);
                assert_eq!(topic.name, "Protocolos: Dlms");
            }
            Entity::Product(_) => panic!("badge must open a topic-like view"),
        }
        assert_eq!(req.filter, TopicFilter::by_value("protocolos", "dlms"));
        assert!(ctrl.loading());
    }

    #[test]
    fn clear_invalidates_in_flight_fetch() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("hemera", &["ci"]);
        let req = ctrl.select(Entity::Topic(topic)).unwrap();
        ctrl.clear();
        assert!(ctrl.selected().is_none());
        assert!(!ctrl.loading());

        // Late resolution of the closed view: dropped.
        ctrl.apply_products(req.generation, Ok(products(&["LATE"])));
        assert!(ctrl.products().is_empty());
    }

    #[test]
    fn drill_down_emits_event() {
        let mut ctrl = SelectionController::default();
        let topic = topic_with_values("protocolos", &["abnt"]);
        ctrl.select(Entity::Topic(topic.clone()));
        ctrl.select_subvalue(&topic, "abnt");
        let events = ctrl.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SelectionEvent::DrillDown { value, .. } if value == "abnt"
        )));
        assert!(ctrl.drain_events().is_empty());
    }
}
