use thiserror::Error;

#[derive(Debug, Error)]
pub enum MltError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid property in '{asset}': {message}")]
    InvalidProperty { asset: String, message: String },
    #[error("unknown asset type '{0}'")]
    UnknownAsset(String),
    #[error("missing asset '{0}'")]
    MissingAsset(String),
    #[error("scene error: {0}")]
    Scene(String),
    #[error("{0}")]
    Message(String),
}

impl MltError {
    pub fn error(msg: &str) -> Self {
        MltError::Message(msg.to_string())
    }

    pub fn invalid_property(asset: &str, message: &str) -> Self {
        MltError::InvalidProperty {
            asset: asset.to_string(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MltError>;
