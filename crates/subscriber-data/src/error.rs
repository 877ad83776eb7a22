//! Error types for the subscriber-data crate.
//!
//! This module defines semantic error enums for identifier arithmetic,
//! template loading, and UE configuration rendering, following the project's
//! error handling conventions with `thiserror`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while parsing IMSIs or deriving identifier ranges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// The identifier does not have the fixed IMSI width.
    #[error("identifier '{value}' must be {expected} digits, found {actual}")]
    InvalidLength {
        /// The rejected identifier.
        value: String,
        /// Required number of digits.
        expected: usize,
        /// Number of characters supplied.
        actual: usize,
    },

    /// The identifier contains characters other than ASCII digits.
    #[error("identifier '{value}' contains non-digit characters")]
    NonNumeric {
        /// The rejected identifier.
        value: String,
    },

    /// The requested range runs past the largest 15-digit identifier.
    #[error("range of {count} identifiers starting at {base} exceeds the 15-digit space")]
    RangeOverflow {
        /// First identifier of the range.
        base: String,
        /// Number of identifiers requested.
        count: u64,
    },
}

/// Errors raised while loading or parsing a subscriber template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template file could not be read.
    #[error("failed to read template file at '{path}': {message}")]
    IoError {
        /// Path to the template file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The template JSON is malformed or missing required fields.
    #[error("invalid template JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The template file version is not supported.
    #[error("unsupported template version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the file.
        actual: u32,
    },

    /// The named core network is not one the seeder knows how to populate.
    #[error("unknown core network '{value}' (expected free5gc or open5gs)")]
    UnknownCore {
        /// The rejected core name.
        value: String,
    },

    /// The profile body does not match the schema of its core.
    #[error("invalid {core} profile: {message}")]
    InvalidProfile {
        /// Core network the profile was parsed for.
        core: String,
        /// Description of the schema mismatch.
        message: String,
    },
}

/// Errors raised while rendering or writing UE configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UeConfigError {
    /// The UE template has no `supi:` line to substitute.
    #[error("UE configuration template has no supi line")]
    MissingSupi,

    /// The file prefix would escape the output directory.
    #[error("invalid file prefix '{prefix}': must be a plain file name stem")]
    InvalidPrefix {
        /// The rejected prefix.
        prefix: String,
    },

    /// The UE template could not be read.
    #[error("failed to read UE template at '{path}': {message}")]
    IoError {
        /// Path to the template file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// A rendered configuration could not be written.
    #[error("failed to write UE configuration at '{path}': {message}")]
    WriteError {
        /// Path that failed to write.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_error_length_formats_correctly() {
        let err = IdentifierError::InvalidLength {
            value: "12345".to_owned(),
            expected: 15,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "identifier '12345' must be 15 digits, found 5"
        );
    }

    #[test]
    fn identifier_error_non_numeric_formats_correctly() {
        let err = IdentifierError::NonNumeric {
            value: "00101000000000x".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "identifier '00101000000000x' contains non-digit characters"
        );
    }

    #[test]
    fn identifier_error_overflow_formats_correctly() {
        let err = IdentifierError::RangeOverflow {
            base: "999999999999999".to_owned(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "range of 2 identifiers starting at 999999999999999 exceeds the 15-digit space"
        );
    }

    #[test]
    fn template_error_version_formats_correctly() {
        let err = TemplateError::UnsupportedVersion {
            expected: 1,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "unsupported template version: expected 1, found 3"
        );
    }

    #[test]
    fn template_error_unknown_core_formats_correctly() {
        let err = TemplateError::UnknownCore {
            value: "oai".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "unknown core network 'oai' (expected free5gc or open5gs)"
        );
    }

    #[test]
    fn ue_config_error_missing_supi_formats_correctly() {
        assert_eq!(
            UeConfigError::MissingSupi.to_string(),
            "UE configuration template has no supi line"
        );
    }

    #[test]
    fn ue_config_error_write_formats_correctly() {
        let err = UeConfigError::WriteError {
            path: Utf8PathBuf::from("ue/free5gc-ue-1.yaml"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to write UE configuration at 'ue/free5gc-ue-1.yaml': permission denied"
        );
    }
}
