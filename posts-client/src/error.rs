use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `posts-client`.
pub enum PostsClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Ошибка сети вне `reqwest` (например, fetch в браузере).
    #[error("network error: {0}")]
    Network(String),

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Сервер отклонил запрос.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP-статус ответа.
        status: u16,
        /// Текст ошибки из тела ответа или описание статуса.
        message: String,
    },

    /// Ответ сервера не удалось разобрать.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Результат операций `posts-client`.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    /// Строит ошибку по HTTP-статусу неуспешного ответа.
    pub fn from_http_status(status: u16, message: Option<String>) -> Self {
        if status == 404 {
            return Self::NotFound;
        }

        let message = message
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| format!("http status {status}"));
        Self::Rejected { status, message }
    }

    #[cfg(feature = "http")]
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status.as_u16(), None);
        }
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Http(err)
    }
}
