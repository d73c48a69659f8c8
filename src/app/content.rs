//! Main viewport rendering: starfield backdrop, floating topic labels
//! with hover/click hit-testing, and the drill-down windows (topic
//! values + product list, product detail with relationship badges).

use egui::{pos2, vec2, Align2, Color32, FontId, Rect, Rounding, Sense, Stroke};

use techmesh::catalog::format::{capitalize, format_field_name, format_value};
use techmesh::catalog::{Entity, Product, ProductStatus, Topic};
use techmesh::scene::camera::PointerNdc;
use techmesh::scene::{palette, Viewport};

use super::EcosystemApp;

const BACKGROUND: Color32 = Color32::from_rgb(0, 16, 33);
const LABEL_WIDTH: f32 = 170.0;
const LABEL_HEIGHT: f32 = 56.0;

fn tint(color: [f32; 4], alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        (color[0] * 255.0) as u8,
        (color[1] * 255.0) as u8,
        (color[2] * 255.0) as u8,
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

fn status_color(status: ProductStatus) -> Color32 {
    match status {
        ProductStatus::Active => Color32::from_rgb(0, 174, 79),
        ProductStatus::Inactive => Color32::GRAY,
        ProductStatus::Discontinued => Color32::from_rgb(255, 107, 107),
        ProductStatus::Unknown => Color32::DARK_GRAY,
    }
}

impl EcosystemApp {
    /// Advance the scene one frame and paint it.
    pub fn draw_scene(&mut self, ctx: &egui::Context) {
        let t = ctx.input(|i| i.time) as f32;
        let screen = ctx.screen_rect();

        if let Some(pos) = ctx.input(|i| i.pointer.hover_pos()) {
            self.pointer = PointerNdc {
                x: pos.x / screen.width() * 2.0 - 1.0,
                y: pos.y / screen.height() * 2.0 - 1.0,
            };
        }

        let hovered_idx = self
            .selection
            .hovered()
            .and_then(|e| self.index_of(e.id()));
        let selected_idx = self
            .selection
            .selected()
            .and_then(|e| self.index_of(e.id()));

        self.scene.tick(t, self.pointer, hovered_idx, selected_idx);
        let viewport = Viewport {
            width: screen.width(),
            height: screen.height(),
        };
        let nodes = self.scene.compose(viewport, hovered_idx, selected_idx);

        let mut hover_hit: Option<(usize, f32)> = None;
        let mut click_hit: Option<(usize, f32)> = None;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let painter = ui.painter();

                // Starfield behind everything.
                let parallax = self.scene.config.parallax;
                for star in &self.scene.starfield.stars {
                    let (dx, dy) = star.parallax_offset(self.pointer, &parallax);
                    painter.circle_filled(
                        pos2(star.x * screen.width() + dx, star.y * screen.height() + dy),
                        star.radius,
                        Color32::from_white_alpha((star.current_opacity() * 255.0) as u8),
                    );
                }

                // Floating topic labels.
                for node in &nodes {
                    if !node.screen.visible {
                        continue;
                    }
                    let Some(topic) = self.topic_at(node.index) else {
                        continue;
                    };
                    let color = palette::topic_color(topic);
                    let size = vec2(LABEL_WIDTH * node.scale, LABEL_HEIGHT * node.scale);
                    let rect =
                        Rect::from_center_size(pos2(node.screen.x, node.screen.y), size);

                    // Glow halo, pulsing.
                    painter.rect_stroke(
                        rect.expand(4.0),
                        Rounding::same(14.0),
                        Stroke::new(3.0, tint(color, node.glow)),
                    );
                    painter.rect_filled(rect, Rounding::same(12.0), tint(color, 0.12));
                    let border_alpha = if node.hovered || node.selected { 0.5 } else { 0.2 };
                    painter.rect_stroke(
                        rect,
                        Rounding::same(12.0),
                        Stroke::new(2.0, tint(color, border_alpha)),
                    );

                    let text_color = if node.hovered {
                        Color32::WHITE
                    } else {
                        tint(color, 1.0)
                    };
                    if let Some(icon) = &topic.icon {
                        painter.text(
                            pos2(rect.left() + 22.0 * node.scale, rect.center().y),
                            Align2::CENTER_CENTER,
                            icon,
                            FontId::proportional(20.0 * node.scale),
                            Color32::WHITE,
                        );
                    }
                    painter.text(
                        pos2(rect.center().x + 12.0 * node.scale, rect.center().y - 8.0),
                        Align2::CENTER_CENTER,
                        capitalize(&topic.name),
                        FontId::proportional(16.0 * node.scale),
                        text_color,
                    );
                    if let Some(count) = topic.count.filter(|&c| c > 0) {
                        painter.text(
                            pos2(rect.center().x + 12.0 * node.scale, rect.center().y + 12.0),
                            Align2::CENTER_CENTER,
                            format!("{count} items"),
                            FontId::proportional(11.0 * node.scale),
                            Color32::from_white_alpha(200),
                        );
                    }

                    // Hit-testing; the nearest (largest-scale) label wins
                    // when labels overlap.
                    let response =
                        ui.interact(rect, ui.id().with(("topic", node.index)), Sense::click());
                    if response.hovered()
                        && hover_hit.map_or(true, |(_, s)| node.screen.scale > s)
                    {
                        hover_hit = Some((node.index, node.screen.scale));
                    }
                    if response.clicked()
                        && click_hit.map_or(true, |(_, s)| node.screen.scale > s)
                    {
                        click_hit = Some((node.index, node.screen.scale));
                    }
                }
            });

        let hovered_entity = hover_hit
            .and_then(|(i, _)| self.topic_at(i))
            .cloned()
            .map(Entity::Topic);
        self.selection.hover(hovered_entity);

        if let Some((index, _)) = click_hit {
            if let Some(topic) = self.topic_at(index).cloned() {
                if let Some(request) = self.selection.select(Entity::Topic(topic)) {
                    self.dispatch_products(ctx, request);
                }
            }
        }
    }

    /// Topic drill-down window or product detail window, depending on
    /// what is selected.
    pub fn draw_selection_windows(&mut self, ctx: &egui::Context) {
        match self.selection.selected().cloned() {
            Some(Entity::Topic(topic)) => self.draw_topic_window(ctx, &topic),
            Some(Entity::Product(product)) => self.draw_product_window(ctx, &product),
            None => {}
        }
    }

    fn draw_topic_window(&mut self, ctx: &egui::Context, topic: &Topic) {
        let mut open = true;
        let mut picked_value: Option<String> = None;
        let mut picked_product: Option<Product> = None;

        let title = match &topic.icon {
            Some(icon) => format!("{icon} {}", capitalize(&topic.name)),
            None => capitalize(&topic.name),
        };

        egui::Window::new(title)
            .open(&mut open)
            .collapsible(false)
            .default_width(560.0)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                if !topic.values.is_empty() {
                    ui.label("Available values");
                    ui.add_space(4.0);
                    ui.horizontal_wrapped(|ui| {
                        for value in &topic.values {
                            if ui.button(value.replace('_', " ")).clicked() {
                                picked_value = Some(value.clone());
                            }
                        }
                    });
                    ui.add_space(8.0);
                }

                for sub in &topic.subtopics {
                    ui.label(&sub.name);
                    ui.horizontal_wrapped(|ui| {
                        for value in &sub.values {
                            ui.small_button(value.as_str());
                        }
                    });
                    ui.add_space(4.0);
                }

                ui.separator();

                if self.selection.loading() {
                    ui.horizontal(|ui| {
                        ui.add(egui::Spinner::new());
                        ui.label("Loading products…");
                    });
                } else if self.selection.error() {
                    ui.colored_label(
                        Color32::from_rgb(255, 107, 107),
                        "Failed to load products.",
                    );
                } else if self.selection.products().is_empty() {
                    if topic.values.len() > 1 {
                        ui.weak("Select a value above to see related products.");
                    } else {
                        ui.weak("No products found for this filter.");
                    }
                } else {
                    ui.label(format!(
                        "Related products ({})",
                        self.selection.products().len()
                    ));
                    egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                        for product in self.selection.products() {
                            ui.horizontal(|ui| {
                                ui.colored_label(
                                    status_color(product.status),
                                    egui::RichText::new("●").small(),
                                );
                                if ui
                                    .selectable_label(
                                        false,
                                        format!("{} — {}", product.sku, product.title),
                                    )
                                    .clicked()
                                {
                                    picked_product = Some(product.clone());
                                }
                            });
                        }
                    });
                }
            });

        if let Some(value) = picked_value {
            let request = self.selection.select_subvalue(topic, &value);
            self.dispatch_products(ctx, request);
        } else if let Some(product) = picked_product {
            // Product summaries carry the full record; no extra fetch.
            self.selection.select(Entity::Product(product));
        } else if !open {
            self.selection.clear();
        }
    }

    fn draw_product_window(&mut self, ctx: &egui::Context, product: &Product) {
        let mut open = true;
        let mut picked_badge: Option<(String, String)> = None;

        egui::Window::new(format!("📦 {}", product.sku))
            .open(&mut open)
            .collapsible(false)
            .default_width(520.0)
            .anchor(Align2::CENTER_CENTER, vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.heading(&product.title);
                ui.horizontal(|ui| {
                    ui.colored_label(status_color(product.status), product.status.label());
                    for category in &product.categories {
                        ui.small_button(category.as_str());
                    }
                });

                if !product.attributes.is_empty() {
                    ui.separator();
                    ui.label("Attributes");
                    egui::Grid::new(("attributes", &product.sku))
                        .num_columns(2)
                        .striped(true)
                        .show(ui, |ui| {
                            for (key, value) in &product.attributes {
                                ui.weak(format_field_name(key));
                                ui.label(format_value(value));
                                ui.end_row();
                            }
                        });
                }

                if !product.relationships.is_empty() {
                    ui.separator();
                    ui.label("Connections");
                    for (relation, targets) in &product.relationships {
                        ui.weak(format_field_name(relation));
                        ui.horizontal_wrapped(|ui| {
                            for target in targets {
                                if ui.button(target.as_str()).clicked() {
                                    picked_badge = Some((target.clone(), relation.clone()));
                                }
                            }
                        });
                    }
                }

                if let Some(score) = product.completeness_score {
                    ui.separator();
                    ui.label("Data completeness");
                    ui.add(
                        egui::ProgressBar::new(f32::from(score.min(100)) / 100.0)
                            .text(format!("{score}%")),
                    );
                }
            });

        if let Some((target, relation)) = picked_badge {
            // Closes this detail view and opens the synthesized topic view.
            let request = self.selection.select_related_badge(&target, &relation);
            self.dispatch_products(ctx, request);
        } else if !open {
            self.selection.clear();
        }
    }
}
