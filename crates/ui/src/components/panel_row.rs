use std::path::PathBuf;

use gpui::{
    AnyElement, App, ClickEvent, ElementId, IntoElement, RenderOnce, SharedString, Window, img,
    prelude::*, px,
};

use crate::{ActiveTheme, h_flex, icon_size, radius, spacing};

type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;
type HoverHandler = Box<dyn Fn(&bool, &mut Window, &mut App) + 'static>;

/// Leading icon of a row.
#[derive(Debug, Clone)]
pub enum RowIcon {
    /// Image file on disk.
    Image(PathBuf),
    /// Nerd-font glyph used when no image is available.
    Glyph(SharedString),
}

/// A clickable row with an icon and a label, used by popup menus and the
/// window list.
#[derive(IntoElement)]
pub struct PanelRow {
    id: ElementId,
    icon: Option<RowIcon>,
    label: SharedString,
    selected: bool,
    muted: bool,
    end_slot: Option<AnyElement>,
    on_click: Option<ClickHandler>,
    on_hover: Option<HoverHandler>,
}

impl PanelRow {
    pub fn new(id: impl Into<ElementId>, label: impl Into<SharedString>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            label: label.into(),
            selected: false,
            muted: false,
            end_slot: None,
            on_click: None,
            on_hover: None,
        }
    }

    pub fn icon(mut self, icon: RowIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Highlight the row (focused window, open submenu).
    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Dim the label (placeholder rows).
    pub fn muted(mut self, muted: bool) -> Self {
        self.muted = muted;
        self
    }

    pub fn end_slot(mut self, end_slot: impl IntoElement) -> Self {
        self.end_slot = Some(end_slot.into_any_element());
        self
    }

    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn on_hover(mut self, handler: impl Fn(&bool, &mut Window, &mut App) + 'static) -> Self {
        self.on_hover = Some(Box::new(handler));
        self
    }
}

impl RenderOnce for PanelRow {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();

        let selected_bg = theme.accent.selection;
        let hover_bg = theme.interactive.hover;
        let active_bg = theme.interactive.active;
        let text_color = if self.muted {
            theme.text.muted
        } else {
            theme.text.primary
        };
        let glyph_color = theme.text.secondary;

        let icon = self.icon.map(|icon| match icon {
            RowIcon::Image(path) => img(path)
                .size(px(icon_size::XL))
                .flex_shrink_0()
                .into_any_element(),
            RowIcon::Glyph(glyph) => gpui::div()
                .w(px(icon_size::XL))
                .flex_shrink_0()
                .text_size(px(icon_size::LG))
                .text_color(glyph_color)
                .child(glyph)
                .into_any_element(),
        });

        h_flex()
            .id(self.id)
            .w_full()
            .gap(px(spacing::SM))
            .px(px(spacing::SM))
            .py(px(spacing::XS))
            .rounded(px(radius::SM))
            .text_color(text_color)
            .when(self.selected, move |this| this.bg(selected_bg))
            .when(self.on_click.is_some(), move |this| {
                this.cursor_pointer()
                    .hover(move |s| s.bg(hover_bg))
                    .active(move |s| s.bg(active_bg))
            })
            .when_some(self.on_click, |this, on_click| this.on_click(on_click))
            .when_some(self.on_hover, |this, on_hover| this.on_hover(on_hover))
            .children(icon)
            .child(
                gpui::div()
                    .flex_1()
                    .overflow_hidden()
                    .text_ellipsis()
                    .whitespace_nowrap()
                    .child(self.label),
            )
            .children(self.end_slot)
    }
}
