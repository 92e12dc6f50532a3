use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("request for {name} failed: {source}")]
    Http {
        name: String,
        source: Box<ureq::Error>,
    },

    #[error("request for {name} returned HTTP {status}")]
    Status { name: String, status: u16 },

    #[error("failed to read response body for {name}: {source}")]
    Body {
        name: String,
        source: std::io::Error,
    },

    #[error("invalid recipe metadata for {name}: {source}")]
    Yaml {
        name: String,
        source: serde_yaml::Error,
    },

    #[error("recipe metadata for {name} is not JSON-compatible: {source}")]
    Convert {
        name: String,
        source: serde_json::Error,
    },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Cache(#[from] swcat_core::Error),
}
