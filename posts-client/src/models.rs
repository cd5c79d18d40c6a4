use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Идентификатор поста, выданный сервером.
///
/// Бэкенд может отдавать id как числом, так и строкой; оба варианта
/// приводятся к строке и сравниваются по значению.
pub struct PostId(String);

impl PostId {
    /// Строковое представление идентификатора (для URL).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => Self(value.to_string()),
            RawId::Text(value) => Self(value),
        })
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for PostId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for PostId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for PostId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for PostId {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err("post id must not be empty".to_string());
        }
        Ok(Self(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Статус публикации поста.
///
/// На чтение принимаются также старые локализованные значения.
pub enum PostStatus {
    /// Пост опубликован.
    #[default]
    #[serde(alias = "Đã xuất bản")]
    Published,
    /// Публикация поста остановлена.
    #[serde(alias = "Ngừng xuất bản")]
    Unpublished,
}

impl PostStatus {
    /// Противоположный статус.
    pub fn toggled(self) -> Self {
        match self {
            Self::Published => Self::Unpublished,
            Self::Unpublished => Self::Published,
        }
    }

    /// Подпись статуса для отображения в таблице.
    pub fn label(self) -> &'static str {
        match self {
            Self::Published => "Published",
            Self::Unpublished => "Unpublished",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Публичная модель поста в том виде, в котором её хранит ресурс `Posts`.
pub struct Post {
    /// Идентификатор поста.
    pub id: PostId,
    /// Заголовок поста.
    pub title: String,
    /// Адрес или путь к изображению.
    pub image: String,
    /// Дата создания.
    #[serde(rename = "createdAt", alias = "create_at")]
    pub created_at: NaiveDate,
    /// Статус публикации.
    pub status: PostStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Данные нового поста, прошедшие клиентскую валидацию.
pub struct NewPost {
    /// Заголовок поста.
    pub title: String,
    /// Адрес или путь к изображению.
    pub image: String,
    /// Дата создания.
    #[serde(rename = "createdAt")]
    pub created_at: NaiveDate,
    /// Начальный статус.
    pub status: PostStatus,
}
