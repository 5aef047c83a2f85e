use thiserror::Error;

/// Errors detected while a filter or sorter schema is being built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Invalid field name: {0:?}")]
    InvalidFieldName(String),
}

/// Errors raised while applying a filter to a statement
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Got \"Unset\" value for field '{field}'")]
    Unset { field: String },

    #[error("Manual filter '{field}' failed: {message}")]
    Manual { field: String, message: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort direction: {0:?}")]
pub struct ParseSortDirectionError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_message() {
        let err = FilterError::Unset {
            field: "ident".to_string(),
        };
        assert_eq!(err.to_string(), "Got \"Unset\" value for field 'ident'");
    }

    #[test]
    fn test_invalid_field_name_message() {
        let err = SchemaError::InvalidFieldName("book id".to_string());
        assert_eq!(err.to_string(), "Invalid field name: \"book id\"");
    }
}
