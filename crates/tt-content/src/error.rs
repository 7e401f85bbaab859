use std::path::PathBuf;

/// Error type for content loading.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: missing frontmatter block", .0.display())]
    MissingFrontmatter(PathBuf),

    #[error("{}: invalid frontmatter: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
