//! Blog post frontmatter.
//!
//! Posts start with a YAML block delimited by `---` lines. The schema is
//! strict: unknown keys are rejected so typos surface at build time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Frontmatter of a blog post.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BlogFrontmatter {
    pub author: String,
    /// Publication time. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` or a bare
    /// date (midnight UTC).
    #[serde(deserialize_with = "deserialize_datetime")]
    pub pub_datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    pub description: String,
    #[serde(
        default,
        rename = "canonicalURL",
        skip_serializing_if = "Option::is_none"
    )]
    pub canonical_url: Option<String>,
    /// Reading time label, filled in when the post is rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes_read: Option<String>,
    /// Reading guide shown before long articles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_read_this_article: Option<String>,
}

impl BlogFrontmatter {
    /// Parse frontmatter from YAML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, a required field is
    /// missing, or an unknown field is present.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Whether the post is a draft.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.draft == Some(true)
    }

    /// Publication time truncated to whole seconds since the epoch.
    #[must_use]
    pub fn pub_timestamp(&self) -> i64 {
        self.pub_datetime.timestamp()
    }
}

fn default_tags() -> Vec<String> {
    vec!["others".to_owned()]
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date `{raw}`")))
}

/// Parse a frontmatter date.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Split a leading `---` YAML block from the markdown body.
///
/// Returns `(None, source)` when the source has no frontmatter block.
#[must_use]
pub fn split_frontmatter(source: &str) -> (Option<&str>, &str) {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(rest) = source
        .strip_prefix("---\n")
        .or_else(|| source.strip_prefix("---\r\n"))
    else {
        return (None, source);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, source)
}
