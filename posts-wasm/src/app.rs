use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use posts_manager::Outcome;

use crate::components::dialogs::{AddPostForm, DeleteDialog, ResetDialog, ToggleDialog};
use crate::components::posts_table::PostsTable;
use crate::state::{AppState, log_error};

/// Запускает действие менеджера в фоне и держит `loading`, пока оно идёт.
fn spawn_action<F>(state: AppState, action: &'static str, run: F)
where
    F: Future<Output = Outcome> + 'static,
{
    state.loading.set(true);
    spawn_local(async move {
        if run.await == Outcome::Failed {
            log_error(&format!("{action} failed"));
        }
        state.loading.set(false);
    });
}

pub(crate) fn confirm_toggle(state: AppState) {
    spawn_action(state, "status update", async move {
        let mut manager = state.manager();
        manager.clear_notice();
        manager.confirm_toggle().await
    });
}

pub(crate) fn publish(state: AppState) {
    spawn_action(state, "post creation", async move {
        let mut manager = state.manager();
        manager.clear_notice();
        manager.publish().await
    });
}

pub(crate) fn confirm_delete(state: AppState) {
    spawn_action(state, "post deletion", async move {
        let mut manager = state.manager();
        manager.clear_notice();
        manager.confirm_delete().await
    });
}

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    // первый запуск и каждое изменение поиска, без debounce
    Effect::new(move |mounted: Option<()>| {
        let search = state.search.get();
        spawn_action(state, "posts loading", async move {
            let mut manager = state.manager();
            match mounted {
                None => manager.mount().await,
                Some(()) => manager.search(search).await,
            }
        });
    });

    let notice_text = move || {
        state
            .screen
            .with(|screen| screen.notice().map(str::to_string))
            .unwrap_or_default()
    };

    view! {
        <main class="page">
            <section class="container my-3">
                <div class="d-flex justify-content-between">
                    <input
                        type="text"
                        placeholder="Search by title"
                        prop:value=move || state.search.get()
                        on:input=move |ev| state.search.set(event_target_value(&ev))
                    />
                    <button
                        class="btn btn-primary"
                        on:click=move |_| state.screen.update(|screen| screen.open_add_form())
                    >
                        "Add post"
                    </button>
                </div>

                <Show when=move || !notice_text().is_empty()>
                    <div class="error-banner">
                        <strong>"Error: "</strong>
                        {notice_text}
                    </div>
                </Show>

                <PostsTable state=state />
            </section>

            <ToggleDialog state=state />
            <AddPostForm state=state />
            <ResetDialog state=state />
            <DeleteDialog state=state />
        </main>
    }
}
