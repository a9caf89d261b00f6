//! Hyprland compositor backend.
//!
//! Talks to Hyprland over its IPC socket. Window events from the event socket
//! are folded into the shared [`WindowTable`] and republished on the bus.

use anyhow::{Context, Result};
use futures_signals::signal::Mutable;
use hyprland::{
    data::{Client, Clients},
    dispatch::{Dispatch, DispatchType},
    event_listener::EventListener,
    prelude::*,
};
use itertools::Itertools;
use std::thread;
use tracing::{debug, error, info};

use super::types::{CompositorCommand, WindowId, WindowInfo, WindowTable};
use crate::events::{EventBus, ShellEvent};

/// Check if Hyprland is available (running).
pub fn is_available() -> bool {
    std::env::var_os("HYPRLAND_INSTANCE_SIGNATURE").is_some()
}

/// Execute a compositor command synchronously.
pub fn execute_command(cmd: CompositorCommand) -> Result<()> {
    match cmd {
        CompositorCommand::FocusWindow(id) => {
            let target = format!("address:{id}");
            Dispatch::call(DispatchType::Custom("focuswindow", &target))
                .with_context(|| format!("Failed to focus window {id}"))?;
        }
    }
    Ok(())
}

/// Fetch all mapped windows, grouped by workspace.
pub fn fetch_windows() -> Result<Vec<WindowInfo>> {
    let active = Client::get_active()
        .ok()
        .flatten()
        .map(|c| c.address.to_string());

    let windows = Clients::get()
        .context("Failed to query Hyprland clients")?
        .into_iter()
        .filter(|c| c.mapped)
        .sorted_by_key(|c| c.workspace.id)
        .map(|c| {
            let id = c.address.to_string();
            WindowInfo {
                focused: active.as_deref() == Some(id.as_str()),
                id: WindowId::from(id),
                class: c.class,
                title: c.title,
            }
        })
        .collect();

    Ok(windows)
}

/// Start the Hyprland event listener in a dedicated thread.
pub fn start_listener(table: Mutable<WindowTable>, bus: EventBus) {
    thread::spawn(move || {
        if let Err(e) = run_listener(table, bus) {
            error!("Hyprland event listener error: {}", e);
        }
    });
}

fn publish(bus: &EventBus, events: Vec<ShellEvent>) {
    for event in events {
        bus.emit(event);
    }
}

fn run_listener(table: Mutable<WindowTable>, bus: EventBus) -> Result<()> {
    info!("Starting Hyprland window event listener");

    let mut listener = EventListener::new();

    {
        let table = table.clone();
        let bus = bus.clone();
        listener.add_window_opened_handler(move |evt| {
            debug!(
                "Window opened: {} ({})",
                evt.window_class, evt.window_address
            );
            let events = table.lock_mut().opened(WindowInfo {
                id: WindowId::from(evt.window_address.to_string()),
                class: evt.window_class,
                title: evt.window_title,
                focused: false,
            });
            publish(&bus, events);
        });
    }

    {
        let table = table.clone();
        let bus = bus.clone();
        listener.add_window_closed_handler(move |address| {
            debug!("Window closed: {}", address);
            let id = WindowId::from(address.to_string());
            let events = table.lock_mut().closed(&id);
            publish(&bus, events);
        });
    }

    // Hyprland re-sends activewindow when the focused window's title changes.
    {
        let table = table.clone();
        let bus = bus.clone();
        listener.add_active_window_changed_handler(move |evt| {
            debug!("Active window changed: {:?}", evt);
            let active = evt.map(|w| (WindowId::from(w.address.to_string()), w.title));
            let events = table
                .lock_mut()
                .focused(active.as_ref().map(|(id, title)| (id, title.as_str())));
            publish(&bus, events);
        });
    }

    {
        let table = table.clone();
        let bus = bus.clone();
        listener.add_window_title_changed_handler(move |evt| {
            debug!("Window title changed: {}", evt.address);
            let id = WindowId::from(evt.address.to_string());
            let events = table.lock_mut().retitled(&id, &evt.title);
            publish(&bus, events);
        });
    }

    listener.start_listener()?;

    Ok(())
}
