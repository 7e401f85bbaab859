//! JSON-LD structured data for article pages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// schema.org type of the article.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArticleType {
    #[default]
    TechArticle,
    BlogPosting,
}

impl ArticleType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TechArticle => "TechArticle",
            Self::BlogPosting => "BlogPosting",
        }
    }
}

/// Article author.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleAuthor {
    pub name: Option<String>,
    pub email: Option<String>,
    pub main_url: Option<String>,
    pub job_title: Option<String>,
    pub description: Option<String>,
    /// Profile links, emitted as `sameAs`.
    pub additional_urls: Vec<String>,
}

/// Intended audience of an article.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleAudience {
    pub audience_type: String,
    pub description: String,
}

/// Inputs for [`article_schema`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleSchemaOptions {
    pub article_type: ArticleType,
    pub url: String,
    pub title: String,
    pub description: String,
    pub date_published: String,
    pub date_modified: Option<String>,
    pub author: ArticleAuthor,
    pub audience: ArticleAudience,
}

/// Build the JSON-LD object describing an article.
///
/// Absent optional fields are omitted rather than emitted as `null`.
#[must_use]
pub fn article_schema(options: &ArticleSchemaOptions) -> Value {
    let mut author = Map::new();
    author.insert("@type".to_owned(), json!("Person"));
    insert_opt(&mut author, "name", options.author.name.as_deref());
    insert_opt(&mut author, "email", options.author.email.as_deref());
    insert_opt(&mut author, "url", options.author.main_url.as_deref());
    insert_opt(&mut author, "jobTitle", options.author.job_title.as_deref());
    if !options.author.additional_urls.is_empty() {
        author.insert("sameAs".to_owned(), json!(options.author.additional_urls));
    }
    insert_opt(&mut author, "description", options.author.description.as_deref());

    let mut article = Map::new();
    article.insert("@type".to_owned(), json!(options.article_type.as_str()));
    article.insert("url".to_owned(), json!(options.url));
    article.insert("headline".to_owned(), json!(options.title));
    article.insert("description".to_owned(), json!(options.description));
    article.insert("datePublished".to_owned(), json!(options.date_published));
    insert_opt(&mut article, "dateModified", options.date_modified.as_deref());
    article.insert(
        "audience".to_owned(),
        json!({
            "@type": "Audience",
            "audienceType": options.audience.audience_type,
            "audienceDescription": options.audience.description,
        }),
    );
    article.insert("isAccessibleForFree".to_owned(), json!(true));
    article.insert("author".to_owned(), Value::Object(author));

    Value::Object(article)
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        map.insert(key.to_owned(), json!(value));
    }
}
