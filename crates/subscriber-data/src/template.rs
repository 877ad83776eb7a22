//! Subscriber templates and template file parsing.
//!
//! A template pairs a core network with the profile every generated record
//! shares. Templates default to the built-in lab profiles and can be loaded
//! from a versioned JSON file.

use std::fmt;
use std::str::FromStr;

use camino::Utf8Path;
use cap_std::fs::Dir;
use serde::{Deserialize, Serialize};

use crate::error::TemplateError;
use crate::profile::{Free5gcProfile, Open5gsProfile};

/// Current supported template file version.
const SUPPORTED_VERSION: u32 = 1;

/// Core networks whose subscriber schema the seeder can populate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreNetwork {
    /// free5GC, whose UDR reads `free5gc.subscriber`.
    #[default]
    Free5gc,
    /// Open5GS, whose HSS/UDR reads `open5gs.subscribers`.
    Open5gs,
}

impl CoreNetwork {
    /// Returns the lowercase name of the core.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free5gc => "free5gc",
            Self::Open5gs => "open5gs",
        }
    }

    /// Returns the database the core reads subscribers from.
    #[must_use]
    pub const fn default_database(self) -> &'static str {
        self.as_str()
    }

    /// Returns the collection the core reads subscribers from.
    #[must_use]
    pub const fn default_collection(self) -> &'static str {
        match self {
            Self::Free5gc => "subscriber",
            Self::Open5gs => "subscribers",
        }
    }
}

impl fmt::Display for CoreNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoreNetwork {
    type Err = TemplateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free5gc" => Ok(Self::Free5gc),
            "open5gs" => Ok(Self::Open5gs),
            _ => Err(TemplateError::UnknownCore {
                value: value.to_owned(),
            }),
        }
    }
}

/// The fixed attribute structure shared by every generated record.
///
/// # Example
///
/// ```
/// use subscriber_data::{CoreNetwork, SubscriberTemplate};
///
/// let json = r#"{
///     "version": 1,
///     "core": "free5gc",
///     "profile": {
///         "servingPlmnId": "20893",
///         "authSubscription": {
///             "permanentKey": {"permanentKey": "8baf473f2f8fd09487cccbd7097c6862"},
///             "opc": {"opcValue": "8e27b6af0e692e750f32667a3b14605d"},
///             "authenticationMethod": "5G_AKA",
///             "milenage": {"amf": "8000"}
///         },
///         "amPolicyData": {"subscCats": ["free5gc"]},
///         "smfSelectionData": {"subscribedSnssaiInfos": {}},
///         "sessionManagementSubscriptionData": {
///             "singleNssai": {"sst": 1, "sd": "010203"},
///             "dnnConfigurations": {}
///         }
///     }
/// }"#;
///
/// let template = SubscriberTemplate::from_json(json).expect("valid template");
/// assert_eq!(template.core(), CoreNetwork::Free5gc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberTemplate {
    /// A free5GC subscriber profile.
    Free5gc(Free5gcProfile),
    /// An Open5GS subscriber profile.
    Open5gs(Open5gsProfile),
}

impl SubscriberTemplate {
    /// Returns the built-in template for a core.
    #[must_use]
    pub fn for_core(core: CoreNetwork) -> Self {
        match core {
            CoreNetwork::Free5gc => Self::Free5gc(Free5gcProfile::default()),
            CoreNetwork::Open5gs => Self::Open5gs(Open5gsProfile::default()),
        }
    }

    /// Returns the core this template targets.
    #[must_use]
    pub const fn core(&self) -> CoreNetwork {
        match self {
            Self::Free5gc(_) => CoreNetwork::Free5gc,
            Self::Open5gs(_) => CoreNetwork::Open5gs,
        }
    }

    /// Parses a template from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if:
    /// - The JSON is malformed or missing `version`, `core` or `profile`
    /// - The version is unsupported
    /// - The core is unknown
    /// - The profile does not match the schema of its core
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let raw: RawTemplateFile =
            serde_json::from_str(json).map_err(|e| TemplateError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a template from a JSON file inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the file cannot be read or parsed.
    pub fn from_file(dir: &Dir, path: &Utf8Path) -> Result<Self, TemplateError> {
        let contents = dir
            .read_to_string(path)
            .map_err(|e| TemplateError::IoError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawTemplateFile) -> Result<Self, TemplateError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(TemplateError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let core = CoreNetwork::from_str(&raw.core)?;
        let invalid = |e: serde_json::Error| TemplateError::InvalidProfile {
            core: core.to_string(),
            message: e.to_string(),
        };

        match core {
            CoreNetwork::Free5gc => serde_json::from_value(raw.profile)
                .map(Self::Free5gc)
                .map_err(invalid),
            CoreNetwork::Open5gs => serde_json::from_value(raw.profile)
                .map(Self::Open5gs)
                .map_err(invalid),
        }
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
struct RawTemplateFile {
    version: u32,
    core: String,
    profile: serde_json::Value,
}
