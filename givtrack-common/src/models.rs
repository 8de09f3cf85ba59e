//! Contribution record models and wire types
//!
//! Field names follow the backend's camelCase JSON (Mongo-style `_id` for the
//! record identifier). Records are read-only client-side; they are fetched per
//! session and held in memory, except for `id` which may enter the seen-set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One unit of donation usage story, as returned by the backend
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ContributionRecord {
    /// Opaque unique identifier (backend `_id`)
    #[serde(rename = "_id")]
    pub id: String,
    /// Lookup key printed on the physical item; absent for list-only records
    #[serde(rename = "qrCode", default)]
    pub qr_code: Option<String>,
    #[serde(rename = "charityName")]
    pub charity_name: String,
    #[serde(default)]
    pub description: String,
    /// Donation amount unit; the backend sends this as a number or a string
    #[serde(default, deserialize_with = "string_or_number")]
    pub token: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Display-only timestamp string, passed through as the backend sends it
    #[serde(rename = "fundsReceivingDate", default)]
    pub funds_receiving_date: Option<String>,
    /// Banner image reference relative to the media base
    #[serde(rename = "charityBanner", default)]
    pub charity_banner: Option<String>,
    /// Blockchain transaction reference; absent until the donation is anchored
    #[serde(rename = "tokenTranHash", default)]
    pub token_tran_hash: Option<String>,
    /// Story entries; may be empty, detail views degrade to "No Contribution."
    #[serde(rename = "childStory", default)]
    pub child_story: Vec<StoryEntry>,
}

impl ContributionRecord {
    /// Outbound blockchain reference, handed to the browser collaborator unmodified
    pub fn blockchain_link(&self) -> Option<&str> {
        self.token_tran_hash.as_deref()
    }

    /// True when there is no story to render
    pub fn story_is_empty(&self) -> bool {
        self.child_story.is_empty()
    }
}

/// One story update within a contribution record
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StoryEntry {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imagePath", default)]
    pub image_path: Option<String>,
    /// Optional voice attachment for the embedded player
    #[serde(rename = "voicePath", default)]
    pub voice_path: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// `{ "data": [...] }` envelope returned by the by-code lookup endpoint
#[derive(Debug, Deserialize)]
pub struct RecordEnvelope {
    pub data: Vec<ContributionRecord>,
}

/// `{ "message": "..." }` body returned with non-2xx statuses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Accept either a JSON number or a string for the `token` field
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(raw.map(|v| match v {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    }))
}
