use eframe::egui;

use techmesh::net::api::ApiClient;

mod app;

use app::EcosystemApp;

fn main() {
    env_logger::init();

    let base_url = std::env::var("TECHMESH_API")
        .unwrap_or_else(|_| "http://localhost:8001/api".to_string());
    log::info!("catalog API base: {base_url}");
    let api = ApiClient::new(&base_url).expect("invalid catalog API base URL");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tech Mesh — Product Ecosystem",
        options,
        Box::new(move |_cc| Ok(Box::new(EcosystemApp::new(api)))),
    )
    .expect("Failed to start Tech Mesh");
}
