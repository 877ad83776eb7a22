//! Per-core subscriber profile schemas.
//!
//! A profile is every attribute of a subscriber document except its
//! identifiers. Profiles are shared verbatim by every generated record.

mod free5gc;
mod open5gs;

pub use free5gc::{
    AmPolicyData, Ambr, Arp, AuthSubscription, DnnConfiguration, DnnInfo, Free5gcProfile,
    Milenage, Opc, PduSessionTypes, PermanentKey, QosProfile, SessionManagementSubscriptionData,
    SmfSelectionData, Snssai, SnssaiInfo, SscModes,
};
pub use open5gs::{
    Bitrate, Open5gsAmbr, Open5gsArp, Open5gsProfile, Open5gsQos, Security, Session, Slice,
};
