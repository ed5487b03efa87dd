use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A type handle could not be turned into a `$ref` target.
    #[error("Invalid type reference `{type_name}`: {reason}")]
    InvalidTypeReference { type_name: String, reason: String },

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Toml Error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("SerdeJson Error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_type_reference(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidTypeReference {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_type_reference_names_the_type() {
        let err = Error::invalid_type_reference("models.Book", "naming policy returned nothing");
        assert_eq!(
            err.to_string(),
            "Invalid type reference `models.Book`: naming policy returned nothing"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
