//! Load failures: the only fatal error class in a validation run.

use std::io;
use std::path::PathBuf;

/// The feed could not be turned into a document model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read feed file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{origin} is not valid JSON: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("feed document must be a JSON object, found {found}")]
    Shape { found: &'static str },
}
