use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Page description error: {0}")]
    Page(String),

    #[error("Unsupported selector: {0}")]
    Selector(String),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Host document error: {0}")]
    Host(String),
}

pub type Result<T> = std::result::Result<T, Error>;
