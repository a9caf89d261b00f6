//! Application-wide runtime state stored as a GPUI global.

use futures_signals::signal::{Signal, SignalExt};
use futures_util::StreamExt;
use gpui::{App, Context, Global};
use services::{Locale, Services};

use crate::config::Config;

/// Global runtime state shared across panel items.
#[derive(Clone)]
pub struct AppState {
    services: Services,
    locale: Locale,
}

impl Global for AppState {}

impl AppState {
    /// Initialize the global app state. Requires [`Config`] to be set.
    pub fn init(services: Services, cx: &mut App) {
        let locale = Config::global(cx).locale.resolve();
        cx.set_global(Self { services, locale });
    }

    /// Get the global app state.
    #[inline(always)]
    pub fn global(cx: &App) -> &Self {
        cx.global::<Self>()
    }

    /// Get the shared services container.
    #[inline(always)]
    pub fn services(cx: &App) -> &Services {
        &Self::global(cx).services
    }

    #[inline(always)]
    pub fn locale(cx: &App) -> &Locale {
        &Self::global(cx).locale
    }

    /// Re-resolve the locale after a config change.
    pub fn refresh_locale(cx: &mut App) {
        if !cx.has_global::<Self>() {
            return;
        }
        let locale = Config::global(cx).locale.resolve();
        cx.global_mut::<Self>().locale = locale;
    }
}

/// Drive `f` on the entity every time `signal` yields, until the entity is
/// released.
pub fn watch<V, S, T>(
    cx: &mut Context<V>,
    signal: S,
    mut f: impl FnMut(&mut V, T, &mut Context<V>) + 'static,
) where
    V: 'static,
    S: Signal<Item = T> + Unpin + 'static,
    T: 'static,
{
    cx.spawn(async move |this, cx| {
        let mut stream = signal.to_stream();
        while let Some(value) = stream.next().await {
            if this.update(cx, |this, cx| f(this, value, cx)).is_err() {
                break;
            }
        }
    })
    .detach();
}
