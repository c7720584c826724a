//! Course models: the generation draft, the generated tree, and the admin record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Number of main topics requested from the generation service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TopicCount {
    #[default]
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "8")]
    Eight,
}

impl TopicCount {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicCount::Four => "4",
            TopicCount::Eight => "8",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "4" => Some(TopicCount::Four),
            "8" => Some(TopicCount::Eight),
            _ => None,
        }
    }
}

/// Presentation style of the generated course.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CourseType {
    #[default]
    #[serde(rename = "Text & Image Course")]
    TextAndImage,
    #[serde(rename = "Video & Text Course")]
    VideoAndText,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseType::TextAndImage => "Text & Image Course",
            CourseType::VideoAndText => "Video & Text Course",
        }
    }

    /// Accepts the display label as well as the short CLI spellings.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text & image course" | "text-image" | "image" => Some(CourseType::TextAndImage),
            "video & text course" | "video-text" | "video" => Some(CourseType::VideoAndText),
            _ => None,
        }
    }
}

/// Validated form contents, ready to be turned into a prompt.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseDraft {
    #[validate(length(min = 3, message = "Topic must be at least 3 characters"))]
    pub topic: String,
    #[validate(length(max = 5, message = "You can add at most 5 subtopics"))]
    pub subtopics: Vec<String>,
    pub topic_count: TopicCount,
    pub course_type: CourseType,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
}

/// Leaf of the course tree. Content fields start empty and are filled later.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SubtopicNode {
    pub title: String,
    #[serde(default)]
    pub theory: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub done: bool,
}

/// One main topic with its ordered subtopics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TopicNode {
    pub title: String,
    #[serde(default)]
    pub subtopics: Vec<SubtopicNode>,
}

/// Parsed output of the generation service, keyed by the lower-cased main topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct GeneratedCourseTree(pub BTreeMap<String, Vec<TopicNode>>);

impl GeneratedCourseTree {
    /// The main topic key, if the tree has exactly one root as generated.
    pub fn main_topic(&self) -> Option<&str> {
        self.0.keys().next().map(|k| k.as_str())
    }

    pub fn topics(&self, key: &str) -> Option<&[TopicNode]> {
        self.0.get(key).map(|v| v.as_slice())
    }

    pub fn topic_count(&self) -> usize {
        self.0.values().map(|v| v.len()).sum()
    }

    pub fn subtopic_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|topics| topics.iter())
            .map(|t| t.subtopics.len())
            .sum()
    }
}

/// Request body for persisting a confirmed course.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub user: String,
    /// Serialized course tree
    pub content: String,
    #[serde(rename = "type")]
    pub course_type: CourseType,
    pub main_topic: String,
    pub lang: String,
}

/// Response to a course creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseResponse {
    pub success: bool,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A persisted course as listed in the admin back-office.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: String,
    pub main_topic: String,
    #[serde(rename = "type")]
    pub course_type: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub date: String,
}

/// Request body for updating a course.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_topic: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub course_type: Option<String>,
}
