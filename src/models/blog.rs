//! Blog post model as served by the blog endpoints.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Raw byte buffer as the backend serializes it (`{ "data": [..] }`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ImageBuffer {
    #[serde(default)]
    pub data: Vec<u8>,
}

/// Embedded image with its MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BlogImage {
    #[serde(default)]
    pub data: ImageBuffer,
    #[serde(default)]
    pub content_type: String,
}

impl BlogImage {
    /// Re-encode the buffer as a `data:` URL.
    pub fn to_data_url(&self) -> Option<String> {
        if self.data.data.is_empty() {
            return None;
        }
        let mime = if self.content_type.is_empty() {
            "application/octet-stream"
        } else {
            self.content_type.as_str()
        };
        Some(format!(
            "data:{};base64,{}",
            mime,
            BASE64_STANDARD.encode(&self.data.data)
        ))
    }
}

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub image: Option<BlogImage>,
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub content: String,
}

impl BlogPost {
    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref().and_then(BlogImage::to_data_url)
    }

    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Which boolean flag an update targets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlogFlag {
    Popular,
    Featured,
}

impl BlogFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogFlag::Popular => "popular",
            BlogFlag::Featured => "featured",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "popular" => Some(BlogFlag::Popular),
            "featured" => Some(BlogFlag::Featured),
            _ => None,
        }
    }
}

/// Request body for creating a blog post. The image travels as a data URL.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CreateBlogRequest {
    /// Attach an image from raw bytes.
    pub fn with_image(mut self, bytes: &[u8], content_type: &str) -> Self {
        self.image = Some(format!(
            "data:{};base64,{}",
            content_type,
            BASE64_STANDARD.encode(bytes)
        ));
        self
    }
}

/// Request body for toggling a blog flag.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBlogRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub flag: BlogFlag,
    pub value: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_image_data_url() {
        let raw = r#"{
            "_id": "b1",
            "title": "Hello",
            "image": {"data": {"type": "Buffer", "data": [104, 105]}, "contentType": "image/png"}
        }"#;
        let post: BlogPost = serde_json::from_str(raw).unwrap();
        assert_eq!(post.image_url().as_deref(), Some("data:image/png;base64,aGk="));
    }

    #[test]
    fn test_blog_without_image() {
        let post: BlogPost = serde_json::from_str(r#"{"_id": "b2", "title": "x"}"#).unwrap();
        assert!(post.image_url().is_none());
        assert!(post.tag_list().is_empty());
    }

    #[test]
    fn test_tag_list_splits_and_trims() {
        let post: BlogPost =
            serde_json::from_str(r#"{"_id": "b3", "title": "x", "tags": "ai, rust ,,web"}"#)
                .unwrap();
        assert_eq!(post.tag_list(), vec!["ai", "rust", "web"]);
    }
}
