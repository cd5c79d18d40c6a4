use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use posts_client::{
    NewPost, Post, PostId, PostStatus, PostsApi, PostsClientError, PostsClientResult,
};
use serde::{Serialize, de::DeserializeOwned};

const API_BASE_URL: &str = match option_env!("WASM_API_BASE_URL") {
    Some(value) => value,
    None => "http://localhost:8080",
};

#[derive(Debug, Serialize)]
struct UpdateStatusRequest {
    status: PostStatus,
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn network_error(err: gloo_net::Error) -> PostsClientError {
    PostsClientError::Network(err.to_string())
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> PostsClientResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|err| PostsClientError::Decode(err.to_string()))
}

async fn ensure_ok(response: Response) -> PostsClientResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let text = response.text().await.ok();
    Err(PostsClientError::from_http_status(status, text))
}

/// Транспорт `PostsApi` поверх `fetch` браузера.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct GlooPostsApi;

#[async_trait(?Send)]
impl PostsApi for GlooPostsApi {
    async fn list_posts(&self, title_like: &str) -> PostsClientResult<Vec<Post>> {
        let response = Request::get(&endpoint("/Posts"))
            .query([("title_like", title_like)])
            .send()
            .await
            .map_err(network_error)?;

        parse_json(ensure_ok(response).await?).await
    }

    async fn update_status(&self, id: &PostId, status: PostStatus) -> PostsClientResult<Post> {
        let response = Request::patch(&endpoint(&format!("/Posts/{id}")))
            .json(&UpdateStatusRequest { status })
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        parse_json(ensure_ok(response).await?).await
    }

    async fn create_post(&self, post: &NewPost) -> PostsClientResult<Post> {
        let response = Request::post(&endpoint("/Posts"))
            .json(post)
            .map_err(network_error)?
            .send()
            .await
            .map_err(network_error)?;

        parse_json(ensure_ok(response).await?).await
    }

    async fn delete_post(&self, id: &PostId) -> PostsClientResult<()> {
        let response = Request::delete(&endpoint(&format!("/Posts/{id}")))
            .send()
            .await
            .map_err(network_error)?;

        ensure_ok(response).await?;
        Ok(())
    }
}
