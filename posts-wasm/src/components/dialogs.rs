use chrono::NaiveDate;
use leptos::prelude::*;
use posts_manager::{DELETE_PROMPT, Dialog, RESET_PROMPT};

use crate::app;
use crate::state::AppState;

/// Значение `<input type="date">`: пустая строка означает «не выбрано».
fn parse_date_input(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[component]
pub(crate) fn ToggleDialog(state: AppState) -> impl IntoView {
    let is_open = move || {
        state
            .screen
            .with(|screen| matches!(screen.dialog(), Dialog::ConfirmToggle(_)))
    };
    let prompt = move || {
        state
            .screen
            .with(|screen| screen.pending_toggle_prompt().unwrap_or_default())
    };

    view! {
        <Show when=is_open>
            <div class="modal">
                <div class="modal-content">
                    <h2>"Confirm"</h2>
                    <p>{prompt}</p>
                    <button
                        class="btn btn-primary mb-2"
                        on:click=move |_| state.screen.update(|screen| screen.cancel_toggle())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-danger"
                        disabled=move || state.loading.get()
                        on:click=move |_| app::confirm_toggle(state)
                    >
                        "Confirm"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn AddPostForm(state: AppState) -> impl IntoView {
    let is_open = move || {
        state
            .screen
            .with(|screen| matches!(screen.dialog(), Dialog::AddForm))
    };
    let form_error = move || {
        state
            .screen
            .with(|screen| screen.form_error().map(|err| err.to_string()))
            .unwrap_or_default()
    };

    view! {
        <Show when=is_open>
            <div class="modal">
                <div class="modal-content">
                    <button
                        class="close-icon"
                        on:click=move |_| state.screen.update(|screen| screen.close_add_form())
                    >
                        "×"
                    </button>
                    <h2>"Add post"</h2>
                    <label>
                        "Title: "
                        <input
                            type="text"
                            prop:value=move || state.screen.with(|screen| screen.draft().title.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.screen.update(|screen| screen.set_draft_title(value));
                            }
                        />
                    </label>
                    <label>
                        "Image: "
                        <input
                            type="text"
                            prop:value=move || state.screen.with(|screen| screen.draft().image.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.screen.update(|screen| screen.set_draft_image(value));
                            }
                        />
                    </label>
                    <label>
                        "Created: "
                        <input
                            type="date"
                            prop:value=move || {
                                state.screen.with(|screen| {
                                    screen
                                        .draft()
                                        .created_at
                                        .map(|date| date.to_string())
                                        .unwrap_or_default()
                                })
                            }
                            on:input=move |ev| {
                                let value = parse_date_input(&event_target_value(&ev));
                                state.screen.update(|screen| screen.set_draft_created_at(value));
                            }
                        />
                    </label>
                    <Show when=move || !form_error().is_empty()>
                        <p class="error">{form_error}</p>
                    </Show>
                    <button
                        class="btn border mb-2"
                        on:click=move |_| state.screen.update(|screen| screen.request_reset())
                    >
                        "Reset"
                    </button>
                    <button
                        class="btn btn-primary"
                        disabled=move || state.loading.get()
                        on:click=move |_| app::publish(state)
                    >
                        "Publish"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn ResetDialog(state: AppState) -> impl IntoView {
    let is_open = move || {
        state
            .screen
            .with(|screen| matches!(screen.dialog(), Dialog::ConfirmReset))
    };

    view! {
        <Show when=is_open>
            <div class="modal">
                <div class="modal-content">
                    <h2>"Confirm"</h2>
                    <p>{RESET_PROMPT}</p>
                    <button
                        class="btn btn-primary mb-2"
                        on:click=move |_| state.screen.update(|screen| screen.cancel_reset())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-danger"
                        on:click=move |_| state.screen.update(|screen| screen.confirm_reset())
                    >
                        "Confirm"
                    </button>
                </div>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn DeleteDialog(state: AppState) -> impl IntoView {
    let is_open = move || {
        state
            .screen
            .with(|screen| matches!(screen.dialog(), Dialog::ConfirmDelete(_)))
    };

    view! {
        <Show when=is_open>
            <div class="modal">
                <div class="modal-content">
                    <h2>"Confirm"</h2>
                    <p>{DELETE_PROMPT}</p>
                    <button
                        class="btn btn-primary mb-2"
                        on:click=move |_| state.screen.update(|screen| screen.cancel_delete())
                    >
                        "Cancel"
                    </button>
                    <button
                        class="btn btn-danger"
                        disabled=move || state.loading.get()
                        on:click=move |_| app::confirm_delete(state)
                    >
                        "Delete"
                    </button>
                </div>
            </div>
        </Show>
    }
}
