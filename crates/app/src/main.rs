//! deskpanel - a Wayland panel with an application menu and a window list.

use gpui::Application;
use services::Services;
use tracing_subscriber::EnvFilter;
use ui::Theme;

mod bar;
mod config;
mod context_menu;
mod panel;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() {
    #[cfg(not(target_os = "linux"))]
    compile_error!("This application requires a Linux system with Wayland.");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let services = Services::new();

    Application::new().run(|cx| {
        Theme::init(cx);
        Config::init(cx);
        AppState::init(services, cx);

        bar::init(cx);
    });
}
