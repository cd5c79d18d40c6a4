//! Экран управления постами: список с поиском, смена статуса, добавление и
//! удаление с подтверждениями.
//!
//! `PostsScreen` хранит состояние экрана и не делает запросов, поэтому его
//! можно вести из любого UI (в том числе из wasm). `PostsManager` связывает
//! экран с `PostsApi` и выполняет запросы по действиям пользователя.

mod manager;
mod screen;

pub use manager::{Outcome, PostsManager};
pub use screen::{
    DELETE_PROMPT, Dialog, Draft, DraftError, PostsScreen, RESET_PROMPT, RefreshPolicy,
    ScreenStore, toggle_prompt,
};
