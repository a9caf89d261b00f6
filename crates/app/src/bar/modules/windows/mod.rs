//! Window list: one row per open window plus one per pending launch.

mod config;
pub use config::WindowsConfig;

use gpui::{ClickEvent, Context, ElementId, SharedString, Window, div, prelude::*, px};
use services::{CompositorSubscriber, Locale, WindowList, WindowSummary, WindowsSubscriber};
use ui::{PanelRow, RowIcon};

use super::style;
use crate::config::ActiveConfig;
use crate::context_menu::row_icon;
use crate::state::{AppState, watch};

const WINDOW_GLYPH: &str = "󰖯";
const LAUNCHING_GLYPH: &str = "󰔟";

pub struct Windows {
    _subscriber: WindowsSubscriber,
    compositor: Option<CompositorSubscriber>,
    list: WindowList,
}

impl Windows {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let services = AppState::services(cx);
        let subscriber = services.window_list();
        let compositor = services.compositor.clone();
        let list = subscriber.get();

        watch(cx, subscriber.subscribe(), |this, list, cx| {
            this.list = list;
            cx.notify();
        });

        Self {
            _subscriber: subscriber,
            compositor,
            list,
        }
    }

    fn raise(&self, window: &WindowSummary) {
        let Some(compositor) = &self.compositor else {
            tracing::debug!("No compositor, cannot raise window {}", window.id);
            return;
        };
        if let Err(e) = compositor.dispatch(window.raise_command()) {
            tracing::error!("Failed to raise window {}: {:#}", window.id, e);
        }
    }
}

/// Title shown for a window row.
fn window_label(window: &WindowSummary, locale: &Locale, max_chars: usize) -> String {
    let title = window.title.trim();
    if title.is_empty() {
        locale.translate("LBL_WINDOW_UNTITLED")
    } else {
        style::truncate(title, max_chars)
    }
}

/// Placeholder shown while an application is starting.
fn launcher_label(name: &str, locale: &Locale) -> String {
    locale.translate_with("LBL_LAUNCHING", &[name])
}

impl Render for Windows {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let is_vertical = cx.config().bar.is_vertical();
        let config = cx.config().bar.modules.windows.clone();
        let locale = AppState::locale(cx).clone();

        let windows = self.list.windows().iter().map(|window| {
            let label = if is_vertical {
                String::new()
            } else {
                window_label(window, &locale, config.max_title_length)
            };
            let target = window.clone();

            div()
                .max_w(px(config.max_item_width))
                .min_w_0()
                .child(
                    PanelRow::new(
                        ElementId::Name(SharedString::from(format!("window-{}", window.id))),
                        label,
                    )
                    .icon(row_icon(&window.icon, WINDOW_GLYPH))
                    .selected(window.focused)
                    .on_click(cx.listener(move |this, _: &ClickEvent, _, _| {
                        this.raise(&target);
                    })),
                )
                .into_any_element()
        });

        let launchers = self.list.launchers().iter().enumerate().map(|(ix, name)| {
            let label = if is_vertical {
                String::new()
            } else {
                launcher_label(name, &locale)
            };

            div()
                .max_w(px(config.max_item_width))
                .min_w_0()
                .child(
                    PanelRow::new(("launcher", ix), label)
                        .icon(RowIcon::Glyph(LAUNCHING_GLYPH.into()))
                        .muted(true),
                )
                .into_any_element()
        });

        div()
            .id("windows")
            .flex()
            .when(is_vertical, |this| this.flex_col())
            .items_center()
            .gap(px(style::CHIP_GAP))
            .min_w_0()
            .overflow_hidden()
            .children(windows.chain(launchers).collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::{IconRef, WindowId, WindowInfo};

    fn summary(title: &str) -> WindowSummary {
        WindowSummary::new(
            &WindowInfo {
                id: WindowId::from("0x1"),
                class: "foot".into(),
                title: title.into(),
                focused: false,
            },
            IconRef::Fallback,
        )
    }

    #[test]
    fn test_empty_title_uses_placeholder() {
        let locale = Locale::new("en_EN");
        assert_eq!(window_label(&summary(""), &locale, 0), "(window)");
        assert_eq!(window_label(&summary("   "), &locale, 0), "(window)");
    }

    #[test]
    fn test_long_titles_are_truncated() {
        let locale = Locale::new("en_EN");
        assert_eq!(window_label(&summary("vim main.rs"), &locale, 3), "vim…");
    }

    #[test]
    fn test_launcher_label_is_localized() {
        assert_eq!(
            launcher_label("firefox", &Locale::new("en_EN")),
            "Launching 'firefox'"
        );
        assert_ne!(
            launcher_label("firefox", &Locale::new("de_DE")),
            "Launching 'firefox'"
        );
    }
}
