//! Generated subscriber record types.
//!
//! A record is a template profile with the identifier substituted in. Records
//! serialize to exactly the document shape each core reads, so store adapters
//! can persist them without knowing the schema.

use serde::Serialize;

use crate::imsi::Imsi;
use crate::profile::{Free5gcProfile, Open5gsProfile};
use crate::template::{CoreNetwork, SubscriberTemplate};

/// A free5GC subscriber document.
///
/// The IMSI is echoed into `ueId`; both lead the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Free5gcSubscriber {
    /// Zero-padded IMSI.
    pub imsi: String,
    /// Same value as `imsi`.
    pub ue_id: String,
    /// Shared profile attributes.
    #[serde(flatten)]
    pub profile: Free5gcProfile,
}

/// An Open5GS subscriber document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Open5gsSubscriber {
    /// Zero-padded IMSI.
    pub imsi: String,
    /// Shared profile attributes.
    #[serde(flatten)]
    pub profile: Open5gsProfile,
}

/// A generated subscriber document for either core.
///
/// # Example
///
/// ```
/// use subscriber_data::{CoreNetwork, Imsi, SubscriberRecord, SubscriberTemplate};
///
/// let template = SubscriberTemplate::for_core(CoreNetwork::Free5gc);
/// let imsi = Imsi::parse("100100000000001").expect("valid IMSI");
/// let record = SubscriberRecord::from_template(&template, imsi);
///
/// let value = serde_json::to_value(&record).expect("serialize");
/// assert_eq!(value["imsi"], "100100000000001");
/// assert_eq!(value["ueId"], "100100000000001");
/// assert_eq!(value["servingPlmnId"], "00101");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubscriberRecord {
    /// A free5GC document.
    Free5gc(Free5gcSubscriber),
    /// An Open5GS document.
    Open5gs(Open5gsSubscriber),
}

impl SubscriberRecord {
    /// Copies the template and substitutes `imsi` into its identifier fields.
    #[must_use]
    pub fn from_template(template: &SubscriberTemplate, imsi: Imsi) -> Self {
        let identifier = imsi.to_string();
        match template {
            SubscriberTemplate::Free5gc(profile) => Self::Free5gc(Free5gcSubscriber {
                ue_id: identifier.clone(),
                imsi: identifier,
                profile: profile.clone(),
            }),
            SubscriberTemplate::Open5gs(profile) => Self::Open5gs(Open5gsSubscriber {
                imsi: identifier,
                profile: profile.clone(),
            }),
        }
    }

    /// Returns the zero-padded IMSI of the record.
    #[must_use]
    pub fn imsi(&self) -> &str {
        match self {
            Self::Free5gc(subscriber) => &subscriber.imsi,
            Self::Open5gs(subscriber) => &subscriber.imsi,
        }
    }

    /// Returns the core the record is shaped for.
    #[must_use]
    pub const fn core(&self) -> CoreNetwork {
        match self {
            Self::Free5gc(_) => CoreNetwork::Free5gc,
            Self::Open5gs(_) => CoreNetwork::Open5gs,
        }
    }
}
