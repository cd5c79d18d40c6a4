use async_trait::async_trait;

use crate::error::PostsClientResult;
use crate::models::{NewPost, Post, PostId, PostStatus};

/// Операции REST-ресурса `Posts`, которые нужны экрану управления постами.
///
/// В wasm32 futures не обязаны быть `Send`: браузерный транспорт однопоточный.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PostsApi: Send + Sync {
    /// `GET /Posts?title_like=<title_like>`.
    ///
    /// Фильтрация выполняется сервером, пустая строка возвращает все посты.
    async fn list_posts(&self, title_like: &str) -> PostsClientResult<Vec<Post>>;

    /// `PATCH /Posts/{id}` с телом `{status}`.
    async fn update_status(&self, id: &PostId, status: PostStatus) -> PostsClientResult<Post>;

    /// `POST /Posts`, сервер присваивает `id`.
    async fn create_post(&self, post: &NewPost) -> PostsClientResult<Post>;

    /// `DELETE /Posts/{id}`, тело ответа игнорируется.
    async fn delete_post(&self, id: &PostId) -> PostsClientResult<()>;
}
