use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum AutogenError {
    #[error("No API description document given (pass a path or set `source.uri`)")]
    #[diagnostic(code(swagger_autogen::no_source))]
    NoSource,

    #[error("Remote documents are not supported, fetch {uri} first and pass the local file")]
    #[diagnostic(code(swagger_autogen::remote_source))]
    RemoteSource { uri: String },

    #[error("No routes found in {path}")]
    #[diagnostic(code(swagger_autogen::no_routes))]
    NoRoutes { path: PathBuf },

    #[error("Invalid API description in {path}: {message}")]
    #[diagnostic(code(swagger_autogen::document))]
    Document { path: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(swagger_autogen::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(swagger_autogen::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(swagger_autogen::json))]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AutogenError>;
