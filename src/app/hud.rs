//! HUD overlays floating above the scene: title block, debounced search
//! bar with its results dropdown, hovered-entity info, and a stats line.

use egui::{vec2, Align2, Color32, RichText};

use techmesh::catalog::{Entity, Topic};

use super::EcosystemApp;

const ACCENT: Color32 = Color32::from_rgb(0, 174, 79);
const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(8, 20, 36, 220);

enum SearchPick {
    Topic(Topic),
    Product(techmesh::catalog::Product),
}

impl EcosystemApp {
    pub fn draw_hud(&mut self, ctx: &egui::Context) {
        self.draw_title(ctx);
        self.draw_search(ctx);
        self.draw_hover_info(ctx);
        self.draw_status_line(ctx);
    }

    fn draw_title(&self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("title"))
            .anchor(Align2::CENTER_TOP, vec2(0.0, 24.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Tech Mesh").size(40.0).strong().color(ACCENT));
                    ui.label(
                        RichText::new("Interactive product ecosystem")
                            .size(14.0)
                            .color(Color32::from_white_alpha(190)),
                    );
                });
            });
    }

    fn draw_search(&mut self, ctx: &egui::Context) {
        let mut pick: Option<SearchPick> = None;

        egui::Area::new(egui::Id::new("search"))
            .anchor(Align2::CENTER_TOP, vec2(0.0, 110.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).fill(PANEL_BG).show(ui, |ui| {
                    ui.set_width(420.0);
                    ui.horizontal(|ui| {
                        ui.label("🔍");
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.search.query)
                                .hint_text("Search products, protocols, attributes…")
                                .desired_width(340.0),
                        );
                        if response.changed() {
                            self.on_search_edited();
                        }
                        if self.search.loading {
                            ui.add(egui::Spinner::new());
                        } else if !self.search.query.is_empty() && ui.button("✕").clicked() {
                            self.close_search();
                        }
                    });

                    if self.search.open {
                        if let Some(results) = &self.search.results {
                            ui.separator();
                            if !results.topics.is_empty() {
                                ui.weak("TOPICS");
                                for topic in &results.topics {
                                    let mut label = topic.name.clone();
                                    if let Some(value) = &topic.matched_value {
                                        label.push_str(&format!("  ·  {value}"));
                                    }
                                    if ui.selectable_label(false, label).clicked() {
                                        pick = Some(SearchPick::Topic(topic.clone()));
                                    }
                                }
                            }
                            if !results.products.is_empty() {
                                ui.weak("PRODUCTS");
                                for product in &results.products {
                                    let label =
                                        format!("{} — {}", product.sku, product.title);
                                    if ui.selectable_label(false, label).clicked() {
                                        pick = Some(SearchPick::Product(product.clone()));
                                    }
                                }
                            }
                        }
                    }
                });
            });

        match pick {
            Some(SearchPick::Topic(topic)) => {
                if let Some(request) = self.selection.select(Entity::Topic(topic)) {
                    self.dispatch_products(ctx, request);
                }
                self.close_search();
            }
            Some(SearchPick::Product(product)) => {
                self.selection.select(Entity::Product(product));
                self.close_search();
            }
            None => {}
        }
    }

    fn draw_hover_info(&self, ctx: &egui::Context) {
        let Some(entity) = self.selection.hovered() else {
            return;
        };
        egui::Area::new(egui::Id::new("hover-info"))
            .anchor(Align2::LEFT_BOTTOM, vec2(24.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).fill(PANEL_BG).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if let Some(icon) = entity.icon() {
                            ui.label(RichText::new(icon).size(28.0));
                        }
                        ui.vertical(|ui| {
                            ui.label(RichText::new(entity.label()).strong());
                            if let Some(count) = entity.count() {
                                ui.weak(format!("{count} items"));
                            }
                        });
                    });
                });
            });
    }

    fn draw_status_line(&self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("status-line"))
            .anchor(Align2::RIGHT_TOP, vec2(-16.0, 16.0))
            .show(ctx, |ui| {
                if self.loading_topics {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.weak("Loading ecosystem…");
                    });
                } else if let Some(error) = &self.topics_error {
                    ui.colored_label(Color32::from_rgb(255, 107, 107), error);
                } else {
                    ui.weak(format!("{} topics", self.topic_order.len()));
                }
            });
    }
}
