use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::api::PostsApi;
use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{NewPost, Post, PostId, PostStatus};

const POSTS_PATH: &str = "/Posts";

#[derive(Debug, Serialize)]
struct UpdateStatusRequestDto {
    status: PostStatus,
}

#[derive(Debug, Serialize)]
struct TitleLikeQuery<'a> {
    title_like: &'a str,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для ресурса `Posts`.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт HTTP-клиент с базовым URL сервера и таймаутом запроса.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn post_endpoint(&self, id: &PostId) -> String {
        self.endpoint(&format!("{POSTS_PATH}/{id}"))
    }

    async fn decode_error(response: reqwest::Response) -> PostsClientError {
        let status = response.status().as_u16();
        let message = response.text().await.ok();
        PostsClientError::from_http_status(status, message)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> PostsClientResult<reqwest::Response> {
        let response = request
            .send()
            .await
            .map_err(PostsClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    /// универсальный helper для отправки запросов с json-payload
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        url: String,
        body: &TReq,
    ) -> PostsClientResult<TRes>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        debug!(%method, %url, "sending request");
        let response = self
            .send(self.client.request(method, url).json(body))
            .await?;

        response
            .json::<TRes>()
            .await
            .map_err(PostsClientError::from_reqwest)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PostsApi for HttpClient {
    async fn list_posts(&self, title_like: &str) -> PostsClientResult<Vec<Post>> {
        let url = self.endpoint(POSTS_PATH);
        debug!(%url, title_like, "listing posts");

        let request = self
            .client
            .request(Method::GET, url)
            .query(&TitleLikeQuery { title_like });

        let response = self.send(request).await?;
        response
            .json::<Vec<Post>>()
            .await
            .map_err(PostsClientError::from_reqwest)
    }

    async fn update_status(&self, id: &PostId, status: PostStatus) -> PostsClientResult<Post> {
        let payload = UpdateStatusRequestDto { status };
        self.send_json(Method::PATCH, self.post_endpoint(id), &payload)
            .await
    }

    async fn create_post(&self, post: &NewPost) -> PostsClientResult<Post> {
        self.send_json(Method::POST, self.endpoint(POSTS_PATH), post)
            .await
    }

    async fn delete_post(&self, id: &PostId) -> PostsClientResult<()> {
        let url = self.post_endpoint(id);
        debug!(%url, "deleting post");

        self.send(self.client.request(Method::DELETE, url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use httpmock::MockServer;
    use serde_json::json;

    fn client(server: &MockServer) -> HttpClient {
        HttpClient::new(server.base_url(), Duration::from_secs(5)).expect("client")
    }

    #[test]
    fn endpoint_normalizes_slashes() {
        let client =
            HttpClient::new("http://localhost:8080/", Duration::from_secs(1)).expect("client");
        let full = client.endpoint("/Posts");
        assert_eq!(full, "http://localhost:8080/Posts");
    }

    #[test]
    fn post_endpoint_appends_id() {
        let client =
            HttpClient::new("http://localhost:8080", Duration::from_secs(1)).expect("client");
        assert_eq!(
            client.post_endpoint(&PostId::from(12)),
            "http://localhost:8080/Posts/12"
        );
    }

    #[tokio::test]
    async fn list_posts_sends_title_like() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/Posts")
                    .query_param("title_like", "rust");
                then.status(200).json_body(json!([
                    {"id": 1, "title": "rust basics", "image": "a.png", "createdAt": "2024-01-01", "status": "Published"}
                ]));
            })
            .await;

        let posts = client(&server).list_posts("rust").await.expect("list");
        mock.assert_async().await;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "rust basics");
    }

    #[tokio::test]
    async fn list_posts_sends_empty_title_like() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET").path("/Posts").query_param("title_like", "");
                then.status(200).json_body(json!([]));
            })
            .await;

        let posts = client(&server).list_posts("").await.expect("list");
        mock.assert_async().await;
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn update_status_patches_only_status() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PATCH")
                    .path("/Posts/1")
                    .json_body(json!({"status": "Unpublished"}));
                then.status(200).json_body(json!(
                    {"id": 1, "title": "A", "image": "a.png", "createdAt": "2024-01-01", "status": "Unpublished"}
                ));
            })
            .await;

        let post = client(&server)
            .update_status(&PostId::from(1), PostStatus::Unpublished)
            .await
            .expect("patch");
        mock.assert_async().await;
        assert_eq!(post.status, PostStatus::Unpublished);
    }

    #[tokio::test]
    async fn create_post_sends_full_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST").path("/Posts").json_body(json!({
                    "title": "New",
                    "image": "n.png",
                    "createdAt": "2024-03-04",
                    "status": "Published"
                }));
                then.status(201).json_body(json!(
                    {"id": "9f", "title": "New", "image": "n.png", "createdAt": "2024-03-04", "status": "Published"}
                ));
            })
            .await;

        let new_post = NewPost {
            title: "New".to_string(),
            image: "n.png".to_string(),
            created_at: NaiveDate::from_ymd_opt(2024, 3, 4).expect("valid date"),
            status: PostStatus::Published,
        };
        let created = client(&server).create_post(&new_post).await.expect("create");
        mock.assert_async().await;
        assert_eq!(created.id.as_str(), "9f");
    }

    #[tokio::test]
    async fn delete_post_ignores_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/Posts/3");
                then.status(200).body("{}");
            })
            .await;

        client(&server)
            .delete_post(&PostId::from(3))
            .await
            .expect("delete");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_post_maps_to_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("DELETE").path("/Posts/404");
                then.status(404).body("{}");
            })
            .await;

        let err = client(&server)
            .delete_post(&PostId::from(404))
            .await
            .expect_err("must fail");
        assert!(matches!(err, PostsClientError::NotFound));
    }

    #[tokio::test]
    async fn server_error_keeps_body_as_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method("GET").path("/Posts");
                then.status(500).body("boom");
            })
            .await;

        let err = client(&server).list_posts("").await.expect_err("must fail");
        match err {
            PostsClientError::Rejected { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
