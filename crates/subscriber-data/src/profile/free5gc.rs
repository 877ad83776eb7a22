//! free5GC subscriber profile schema.
//!
//! Field names serialize to the camelCase keys the free5GC UDR reads from its
//! `subscriber` collection. The [`Default`] profile carries the values used by
//! the lab's UERANSIM test UEs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every attribute of a free5GC subscriber except its identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Free5gcProfile {
    /// PLMN serving the subscriber.
    pub serving_plmn_id: String,
    /// Authentication material.
    pub auth_subscription: AuthSubscription,
    /// Access and mobility policy categories.
    pub am_policy_data: AmPolicyData,
    /// Slice to DNN selection for the SMF.
    pub smf_selection_data: SmfSelectionData,
    /// Per-DNN session management defaults.
    pub session_management_subscription_data: SessionManagementSubscriptionData,
}

/// Authentication subscription data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSubscription {
    /// Subscriber permanent key.
    pub permanent_key: PermanentKey,
    /// Operator variant key.
    pub opc: Opc,
    /// Authentication method tag, e.g. `5G_AKA`.
    pub authentication_method: String,
    /// Milenage parameters.
    pub milenage: Milenage,
}

/// Wrapper for the subscriber's K value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermanentKey {
    /// Hex-encoded key.
    pub permanent_key: String,
}

/// Wrapper for the OPc value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opc {
    /// Hex-encoded OPc.
    pub opc_value: String,
}

/// Milenage algorithm parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milenage {
    /// Hex-encoded authentication management field.
    pub amf: String,
}

/// Access and mobility policy data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmPolicyData {
    /// Subscriber category labels.
    pub subsc_cats: Vec<String>,
}

/// SMF selection data keyed by S-NSSAI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmfSelectionData {
    /// Allowed DNNs per slice identifier (`sst` + `sd` hex).
    pub subscribed_snssai_infos: BTreeMap<String, SnssaiInfo>,
}

/// DNNs reachable on one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnssaiInfo {
    /// Allowed data networks.
    pub dnn_infos: Vec<DnnInfo>,
}

/// A single data network name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnnInfo {
    /// Data network name, e.g. `internet`.
    pub dnn: String,
}

/// Session management subscription data for one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionManagementSubscriptionData {
    /// Slice the configurations apply to.
    pub single_nssai: Snssai,
    /// Session defaults keyed by DNN.
    pub dnn_configurations: BTreeMap<String, DnnConfiguration>,
}

/// Single network slice selection assistance information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snssai {
    /// Slice/service type.
    pub sst: i32,
    /// Slice differentiator, hex-encoded.
    pub sd: String,
}

/// Session defaults for one DNN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnnConfiguration {
    /// PDU session type defaults.
    pub pdu_session_types: PduSessionTypes,
    /// SSC mode defaults.
    pub ssc_modes: SscModes,
    /// Session aggregate maximum bit rate.
    pub ambr: Ambr,
    /// Default QoS profile.
    pub qos_profile: QosProfile,
}

/// PDU session type defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PduSessionTypes {
    /// Type used when the UE does not request one.
    pub default_session_type: String,
    /// Types the UE may request.
    pub allowed_session_types: Vec<String>,
}

/// Session and service continuity modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SscModes {
    /// Mode used when the UE does not request one.
    pub default_ssc_mode: i32,
    /// Modes the UE may request.
    pub allowed_ssc_modes: Vec<i32>,
}

/// Aggregate maximum bit rate, as free5GC bitrate strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ambr {
    /// Uplink cap, e.g. `1 Gbps`.
    pub uplink: String,
    /// Downlink cap, e.g. `1 Gbps`.
    pub downlink: String,
}

/// Default QoS flow parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QosProfile {
    /// 5G QoS identifier.
    #[serde(rename = "5qi")]
    pub five_qi: i32,
    /// Allocation and retention priority.
    pub arp: Arp,
}

/// Allocation and retention priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arp {
    /// Priority level, lower is more important.
    pub priority_level: i32,
    /// Pre-emption capability.
    pub preempt_cap: String,
    /// Pre-emption vulnerability.
    pub preempt_vuln: String,
}

const INTERNET_DNN: &str = "internet";

impl Default for Free5gcProfile {
    fn default() -> Self {
        let internet_only = || SnssaiInfo {
            dnn_infos: vec![DnnInfo {
                dnn: INTERNET_DNN.to_owned(),
            }],
        };

        Self {
            serving_plmn_id: "00101".to_owned(),
            auth_subscription: AuthSubscription {
                permanent_key: PermanentKey {
                    permanent_key: "8baf473f2f8fd09487cccbd7097c6862".to_owned(),
                },
                opc: Opc {
                    opc_value: "8e27b6af0e692e750f32667a3b14605d".to_owned(),
                },
                authentication_method: "5G_AKA".to_owned(),
                milenage: Milenage {
                    amf: "8000".to_owned(),
                },
            },
            am_policy_data: AmPolicyData {
                subsc_cats: vec!["free5gc".to_owned()],
            },
            smf_selection_data: SmfSelectionData {
                subscribed_snssai_infos: BTreeMap::from([
                    ("01010203".to_owned(), internet_only()),
                    ("01112233".to_owned(), internet_only()),
                ]),
            },
            session_management_subscription_data: SessionManagementSubscriptionData {
                single_nssai: Snssai {
                    sst: 1,
                    sd: "010203".to_owned(),
                },
                dnn_configurations: BTreeMap::from([(
                    INTERNET_DNN.to_owned(),
                    DnnConfiguration {
                        pdu_session_types: PduSessionTypes {
                            default_session_type: "IPV4".to_owned(),
                            allowed_session_types: vec!["IPV4".to_owned()],
                        },
                        ssc_modes: SscModes {
                            default_ssc_mode: 1,
                            allowed_ssc_modes: vec![1, 2, 3],
                        },
                        ambr: Ambr {
                            uplink: "1 Gbps".to_owned(),
                            downlink: "1 Gbps".to_owned(),
                        },
                        qos_profile: QosProfile {
                            five_qi: 9,
                            arp: Arp {
                                priority_level: 8,
                                preempt_cap: "SHALL_NOT_TRIGGER_PREEMPTION".to_owned(),
                                preempt_vuln: "NOT_PREEMPTABLE".to_owned(),
                            },
                        },
                    },
                )]),
            },
        }
    }
}
