//! Item registry for configuration-driven bar layouts.

use gpui::{AnyElement, Context, Entity, prelude::*};

use super::{Menu, Windows};

/// Wrapper enum for all bar item types.
pub enum Widget {
    Menu(Entity<Menu>),
    Windows(Entity<Windows>),
}

impl Widget {
    pub fn render(&self) -> AnyElement {
        match self {
            Widget::Menu(e) => e.clone().into_any_element(),
            Widget::Windows(e) => e.clone().into_any_element(),
        }
    }

    /// Create an item by name.
    ///
    /// Returns `None` if the name is unknown.
    pub fn create<V: 'static>(name: &str, cx: &mut Context<V>) -> Option<Widget> {
        match name {
            "Menu" | "Launcher" => Some(Widget::Menu(cx.new(Menu::new))),
            "Windows" | "Tasks" => Some(Widget::Windows(cx.new(Windows::new))),
            _ => {
                tracing::warn!("Unknown bar item: {}", name);
                None
            }
        }
    }

    /// Create multiple items from a config list.
    pub fn create_many<V: 'static>(names: &[String], cx: &mut Context<V>) -> Vec<Widget> {
        names
            .iter()
            .filter_map(|name| Widget::create(name, cx))
            .collect()
    }
}
