use shiori_api::ApiError;
use shiori_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] CoreError),

    #[error("backend error: {0}")]
    Api(#[from] ApiError),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no stream available for episode {episode} on {server}")]
    StreamUnavailable { episode: String, server: String },
}
