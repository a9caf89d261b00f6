//! Hierarchical popup menu.
//!
//! Categories are listed on the left; hovering or clicking one shows its
//! entries on the right. Clicking an entry hands it to the selection callback
//! and closes the popup.

use std::rc::Rc;

use gpui::{App, ClickEvent, Context, Window, div, layer_shell::Anchor, prelude::*, px};
use services::{Category, IconRef, MenuEntry};
use ui::{ActiveTheme, PanelRow, RowIcon, font_size, h_flex, radius, spacing, v_flex};

use crate::panel::{self, PanelConfig};

pub const MENU_WIDTH: f32 = 480.0;
pub const MENU_HEIGHT: f32 = 420.0;

const CATEGORY_COLUMN_WIDTH: f32 = 190.0;
const CATEGORY_GLYPH: &str = "󰉋";
const ENTRY_GLYPH: &str = "󰣆";
const SUBMENU_GLYPH: &str = "󰅂";

type SelectHandler = Rc<dyn Fn(&MenuEntry, &mut App)>;

/// Map a resolved icon to a row icon, using `glyph` for the fallback.
pub fn row_icon(icon: &IconRef, glyph: &'static str) -> RowIcon {
    match icon.path() {
        Some(path) => RowIcon::Image(path.to_path_buf()),
        None => RowIcon::Glyph(glyph.into()),
    }
}

pub struct ContextMenu {
    categories: Vec<Category>,
    open: usize,
    on_select: SelectHandler,
}

impl ContextMenu {
    /// Show `categories` as a popup at the given layer shell placement.
    ///
    /// Showing the menu again while it is open closes it.
    pub fn show(
        categories: Vec<Category>,
        placement: (Anchor, (f32, f32, f32, f32)),
        on_select: impl Fn(&MenuEntry, &mut App) + 'static,
        cx: &mut App,
    ) {
        let (anchor, margin) = placement;
        let config = PanelConfig {
            width: MENU_WIDTH,
            height: MENU_HEIGHT,
            anchor,
            margin,
            namespace: "deskpanel-menu".to_string(),
        };
        let on_select: SelectHandler = Rc::new(on_select);

        panel::toggle_panel("menu", config, cx, move |_cx| Self {
            categories,
            open: 0,
            on_select,
        });
    }

    fn open_category(&mut self, index: usize, cx: &mut Context<Self>) {
        if self.open != index {
            self.open = index;
            cx.notify();
        }
    }

    fn select(&mut self, entry: &MenuEntry, window: &mut Window, cx: &mut Context<Self>) {
        tracing::debug!("Menu entry selected: {}", entry.name);
        (self.on_select)(entry, cx);
        panel::dismiss(window);
    }

    fn render_categories(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let text_muted = cx.theme().text.muted;

        v_flex()
            .id("menu-categories")
            .w(px(CATEGORY_COLUMN_WIDTH))
            .h_full()
            .flex_shrink_0()
            .gap(px(2.))
            .overflow_y_scroll()
            .children(self.categories.iter().enumerate().map(|(ix, category)| {
                PanelRow::new(("menu-category", ix), category.label.clone())
                    .icon(row_icon(&category.icon, CATEGORY_GLYPH))
                    .selected(ix == self.open)
                    .end_slot(
                        div()
                            .text_size(px(font_size::XS))
                            .text_color(text_muted)
                            .child(SUBMENU_GLYPH),
                    )
                    .on_hover(cx.listener(move |this, hovered: &bool, _, cx| {
                        if *hovered {
                            this.open_category(ix, cx);
                        }
                    }))
                    .on_click(cx.listener(move |this, _: &ClickEvent, _, cx| {
                        this.open_category(ix, cx);
                    }))
            }))
    }

    fn render_entries(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let entries = self
            .categories
            .get(self.open)
            .map(|c| c.items.as_slice())
            .unwrap_or_default();

        v_flex()
            .id(("menu-entries", self.open))
            .flex_1()
            .h_full()
            .min_w_0()
            .gap(px(2.))
            .overflow_y_scroll()
            .children(entries.iter().enumerate().map(|(ix, entry)| {
                let selected = entry.clone();
                PanelRow::new(("menu-entry", ix), entry.label.clone())
                    .icon(row_icon(&entry.icon, ENTRY_GLYPH))
                    .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                        this.select(&selected, window, cx);
                    }))
            }))
    }
}

impl Render for ContextMenu {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let categories = self.render_categories(cx);
        let entries = self.render_entries(cx);
        let theme = cx.theme();

        h_flex()
            .id("context-menu")
            .size_full()
            .items_start()
            .gap(px(spacing::XS))
            .p(px(spacing::XS))
            .bg(theme.bg.elevated)
            .border_1()
            .border_color(theme.border.default)
            .rounded(px(radius::LG))
            .text_size(px(font_size::BASE))
            .text_color(theme.text.primary)
            .child(categories)
            .child(
                div()
                    .w(px(1.))
                    .h_full()
                    .flex_shrink_0()
                    .bg(theme.border.subtle),
            )
            .child(entries)
    }
}
