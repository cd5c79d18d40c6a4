use leptos::prelude::*;
use posts_manager::{PostsManager, PostsScreen, RefreshPolicy, ScreenStore};

use crate::api::GlooPostsApi;

const REFRESH_POLICY: Option<&str> = option_env!("WASM_REFRESH_POLICY");

/// Экран в сигнале Leptos: каждое изменение сразу перерисовывает компоненты.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SignalScreen(RwSignal<PostsScreen>);

impl ScreenStore for SignalScreen {
    fn read<R>(&self, f: impl FnOnce(&PostsScreen) -> R) -> R {
        self.0.with_untracked(f)
    }

    fn write<R>(&mut self, f: impl FnOnce(&mut PostsScreen) -> R) -> R {
        f(&mut *self.0.write())
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct AppState {
    pub(crate) screen: RwSignal<PostsScreen>,
    pub(crate) search: RwSignal<String>,
    pub(crate) loading: RwSignal<bool>,
    pub(crate) refresh: RefreshPolicy,
}

impl AppState {
    pub(crate) fn new() -> Self {
        let refresh = REFRESH_POLICY
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default();

        Self {
            screen: RwSignal::new(PostsScreen::new()),
            search: RwSignal::new(String::new()),
            loading: RwSignal::new(false),
            refresh,
        }
    }

    /// Менеджер, который пишет прямо в сигнал экрана.
    pub(crate) fn manager(self) -> PostsManager<GlooPostsApi, SignalScreen> {
        PostsManager::with_store(GlooPostsApi, SignalScreen(self.screen), self.refresh)
    }
}

/// Пишет сообщение в консоль браузера.
pub(crate) fn log_error(message: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
}
