use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while scanning the source directory.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid match pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading the episodes file.
#[derive(Debug, Error)]
pub enum EpisodeFileError {
    #[error("not a file: {}", .0.display())]
    NotAFile(PathBuf),

    #[error("failed to read episodes file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while building link names.
#[derive(Debug, Error)]
pub enum NamingError {
    /// The pattern captured something that cannot be zero-padded as a number.
    #[error("episode id {episode_id:?} captured from {filename:?} is not numeric")]
    NonNumericEpisode { episode_id: String, filename: String },
}

/// Per-link failures. These never abort a materialization pass.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("failed to remove existing {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create link {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_offender() {
        let err = ScanError::NotADirectory(PathBuf::from("/no/such/dir"));
        assert_eq!(err.to_string(), "not a directory: /no/such/dir");

        let err = NamingError::NonNumericEpisode {
            episode_id: "pilot".into(),
            filename: "show_pilot.mkv".into(),
        };
        assert!(err.to_string().contains("\"pilot\""));
        assert!(err.to_string().contains("show_pilot.mkv"));
    }

    #[test]
    fn errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScanError>();
        assert_send_sync::<EpisodeFileError>();
        assert_send_sync::<NamingError>();
        assert_send_sync::<LinkError>();
    }
}
