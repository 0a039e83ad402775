use miette::Diagnostic;
use thiserror::Error;

/// Main error type for swatch operations
#[derive(Error, Diagnostic, Debug)]
pub enum SwatchError {
    #[error("IO error: {0}")]
    #[diagnostic(code(swatch::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(swatch::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(swatch::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Format error: {message}")]
    #[diagnostic(code(swatch::format))]
    Format {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(swatch::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(swatch::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, SwatchError>;
