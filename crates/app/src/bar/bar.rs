//! Panel bar using layer shell for Wayland.
//!
//! One bar is opened per display, anchored to the configured screen edge.

use gpui::{
    AnyElement, App, Bounds, Context, DisplayId, FontWeight, Size, Window,
    WindowBackgroundAppearance, WindowBounds, WindowKind, WindowOptions, div, layer_shell::*,
    point, prelude::*, px,
};
use ui::{ActiveTheme, font_size, spacing};

use super::modules::Widget;
use crate::config::{ActiveConfig, BarPosition};

/// The main bar view.
struct Bar {
    position: BarPosition,
    start_widgets: Vec<Widget>,
    center_widgets: Vec<Widget>,
    end_widgets: Vec<Widget>,
}

#[derive(Clone, Copy)]
enum SectionAlign {
    Start,
    Center,
    End,
}

impl Bar {
    fn new(cx: &mut Context<Self>) -> Self {
        let config = cx.config().bar.clone();
        Self {
            position: config.position,
            start_widgets: Widget::create_many(&config.start, cx),
            center_widgets: Widget::create_many(&config.center, cx),
            end_widgets: Widget::create_many(&config.end, cx),
        }
    }

    fn render_section(
        is_vertical: bool,
        align: SectionAlign,
        children: Vec<AnyElement>,
    ) -> impl IntoElement {
        let section = div()
            .flex()
            .gap(px(spacing::SM))
            .when(is_vertical, |this| this.w_full().flex_col().items_center())
            .when(!is_vertical, |this| this.h_full().items_center().flex_1());

        match align {
            SectionAlign::Start => section.justify_start(),
            SectionAlign::Center => section.flex_1().justify_center().overflow_hidden(),
            SectionAlign::End => section.justify_end(),
        }
        .children(children)
    }
}

impl Render for Bar {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let is_vertical = self.position.is_vertical();

        let start_elements: Vec<AnyElement> =
            self.start_widgets.iter().map(|w| w.render()).collect();
        let center_elements: Vec<AnyElement> =
            self.center_widgets.iter().map(|w| w.render()).collect();
        let end_elements: Vec<AnyElement> = self.end_widgets.iter().map(|w| w.render()).collect();

        div()
            .size_full()
            .flex()
            .text_size(px(font_size::SM))
            .font_weight(FontWeight::MEDIUM)
            .text_color(theme.text.primary)
            .bg(theme.bg.primary)
            .border_color(theme.border.default)
            .when(is_vertical, |this| {
                this.flex_col()
                    .items_center()
                    .px(px(spacing::XS))
                    .py(px(spacing::SM))
            })
            .when(!is_vertical, |this| this.items_center().px(px(spacing::SM)))
            .map(|this| match self.position {
                BarPosition::Left => this.border_r_1(),
                BarPosition::Right => this.border_l_1(),
                BarPosition::Top => this.border_b_1(),
                BarPosition::Bottom => this.border_t_1(),
            })
            .child(Self::render_section(
                is_vertical,
                SectionAlign::Start,
                start_elements,
            ))
            .child(Self::render_section(
                is_vertical,
                SectionAlign::Center,
                center_elements,
            ))
            .child(Self::render_section(
                is_vertical,
                SectionAlign::End,
                end_elements,
            ))
    }
}

/// Returns window options for the bar.
pub fn window_options(display_id: Option<DisplayId>, cx: &App) -> WindowOptions {
    let display_size = display_id
        .and_then(|id| cx.find_display(id))
        .or_else(|| cx.primary_display())
        .map(|display| display.bounds().size)
        .unwrap_or_else(|| Size::new(px(1920.), px(1080.)));
    let config = &cx.config().bar;
    let (window_size, anchor) = match config.position {
        BarPosition::Left => (
            Size::new(px(config.size), display_size.height),
            Anchor::LEFT | Anchor::TOP | Anchor::BOTTOM,
        ),
        BarPosition::Right => (
            Size::new(px(config.size), display_size.height),
            Anchor::RIGHT | Anchor::TOP | Anchor::BOTTOM,
        ),
        BarPosition::Top => (
            Size::new(display_size.width, px(config.size)),
            Anchor::LEFT | Anchor::RIGHT | Anchor::TOP,
        ),
        BarPosition::Bottom => (
            Size::new(display_size.width, px(config.size)),
            Anchor::LEFT | Anchor::RIGHT | Anchor::BOTTOM,
        ),
    };

    WindowOptions {
        display_id,
        titlebar: None,
        window_bounds: Some(WindowBounds::Windowed(Bounds {
            origin: point(px(0.), px(0.)),
            size: window_size,
        })),
        app_id: Some("deskpanel-bar".to_string()),
        window_background: WindowBackgroundAppearance::Transparent,
        kind: WindowKind::LayerShell(LayerShellOptions {
            namespace: "deskpanel".to_string(),
            layer: Layer::Top,
            anchor,
            exclusive_zone: Some(px(config.size)),
            margin: None,
            keyboard_interactivity: KeyboardInteractivity::None,
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Open a bar on every display using the current global config.
pub fn init(cx: &mut App) {
    cx.spawn(async move |cx| {
        // Wayland needs a moment to enumerate displays
        cx.background_executor()
            .timer(std::time::Duration::from_millis(100))
            .await;

        cx.update(|cx: &mut App| {
            let displays = cx.displays();

            if displays.is_empty() {
                tracing::info!("No displays found, opening bar on default display");
                open(None, cx);
            } else {
                tracing::info!("Opening bar on {} displays", displays.len());
                for d in displays {
                    open(Some(d.id()), cx);
                }
            }
        })
    })
    .detach();
}

fn open(display_id: Option<DisplayId>, cx: &mut App) {
    if let Err(err) = cx.open_window(window_options(display_id, cx), |_, cx| cx.new(Bar::new)) {
        tracing::error!("Failed to open bar on display {:?}: {:#}", display_id, err);
    }
}
