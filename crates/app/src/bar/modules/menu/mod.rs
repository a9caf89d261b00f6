//! Application menu button.
//!
//! Clicking the button builds the category tree from the current package
//! list and shows it as a popup. Choosing an entry launches it.

mod config;
pub use config::MenuConfig;

use gpui::{App, Context, MouseButton, MouseDownEvent, Size, Window, div, prelude::*, px};
use services::build_tree;
use ui::{ActiveTheme, radius};

use super::style;
use crate::config::{ActiveConfig, Config};
use crate::context_menu::{ContextMenu, MENU_HEIGHT, MENU_WIDTH};
use crate::panel::panel_placement_from_event;
use crate::state::AppState;

const MENU_ICON: &str = "󰀻";

pub struct Menu;

impl Menu {
    pub fn new(_cx: &mut Context<Self>) -> Self {
        Menu
    }

    fn show_menu(&mut self, event: &MouseDownEvent, window: &Window, cx: &mut App) {
        let applications = AppState::services(cx).applications.clone();
        let locale = AppState::locale(cx);
        let config = Config::global(cx);

        let packages = applications.applications();
        let tree = build_tree(&packages, &config.applications.categories, locale);
        tracing::debug!(
            "Opening menu with {} applications in {} categories",
            packages.len(),
            tree.len()
        );

        let placement = panel_placement_from_event(
            config.bar.position,
            event,
            window,
            cx,
            Size::new(px(MENU_WIDTH), px(MENU_HEIGHT)),
        );

        ContextMenu::show(
            tree,
            placement,
            move |entry, _cx| applications.launch(&entry.name),
            cx,
        );
    }
}

impl Render for Menu {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let is_vertical = cx.config().bar.is_vertical();
        let config = &cx.config().bar.modules.menu;
        let icon = if config.icon.trim().is_empty() {
            MENU_ICON.to_string()
        } else {
            config.icon.clone()
        };
        let label = (config.show_label && !is_vertical)
            .then(|| AppState::locale(cx).translate("LBL_MENU"));

        let interactive_default = theme.interactive.default;
        let interactive_hover = theme.interactive.hover;
        let interactive_active = theme.interactive.active;
        let text_primary = theme.text.primary;

        div()
            .id("menu-button")
            .flex()
            .items_center()
            .justify_center()
            .gap(px(style::CHIP_GAP))
            .px(px(style::chip_padding_x(is_vertical)))
            .py(px(style::CHIP_PADDING_Y))
            .rounded(px(radius::SM))
            .cursor_pointer()
            .bg(interactive_default)
            .hover(move |s| s.bg(interactive_hover))
            .active(move |s| s.bg(interactive_active))
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, event, window, cx| {
                    this.show_menu(event, window, cx);
                }),
            )
            .child(
                div()
                    .text_size(px(style::icon(is_vertical)))
                    .text_color(text_primary)
                    .child(icon),
            )
            .when_some(label, |this, label| {
                this.child(
                    div()
                        .text_size(px(style::label(is_vertical)))
                        .text_color(text_primary)
                        .child(label),
                )
            })
    }
}
