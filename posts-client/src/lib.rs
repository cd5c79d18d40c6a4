//! Клиентская библиотека для REST-ресурса `Posts`.
//!
//! Содержит публичные модели (`Post`, `PostStatus`, `NewPost`), абстракцию
//! `PostsApi`, через которую экран управления постами ходит на сервер, и её
//! HTTP-реализацию поверх `reqwest` (фича `http`, включена по умолчанию).
#![warn(missing_docs)]

mod api;
mod error;
#[cfg(feature = "http")]
mod http_client;
mod models;

pub use api::PostsApi;
pub use error::{PostsClientError, PostsClientResult};
#[cfg(feature = "http")]
pub use http_client::HttpClient;
pub use models::{NewPost, Post, PostId, PostStatus};
