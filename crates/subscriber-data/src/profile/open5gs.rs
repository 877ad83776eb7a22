//! Open5GS subscriber profile schema.
//!
//! Open5GS stores subscribers in snake_case documents in its `subscribers`
//! collection. Only `imsi` carries the identifier; everything here is shared.

use serde::{Deserialize, Serialize};

/// Every attribute of an Open5GS subscriber except its IMSI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open5gsProfile {
    /// IMEISV recorded for the UE.
    pub imeisv: String,
    /// Authentication material.
    pub security: Security,
    /// Subscribed slices.
    pub slice: Vec<Slice>,
    /// Subscriber-level aggregate maximum bit rate.
    pub ambr: Open5gsAmbr,
    /// Access restriction bitmask.
    pub access_restriction_data: i32,
    /// Subscriber status (0 = service granted).
    pub subscriber_status: i32,
    /// Operator determined barring bitmask.
    pub operator_determined_barring: i32,
    /// Network access mode.
    pub network_access_mode: i32,
    /// Periodic RAU/TAU timer in minutes.
    pub subscribed_rau_tau_timer: i32,
    /// MSISDNs assigned to the subscriber.
    pub msisdn: Vec<String>,
    /// MME hosts the subscriber last attached through.
    pub mme_host: Vec<String>,
    /// MME realms the subscriber last attached through.
    pub mme_realm: Vec<String>,
    /// Purge flags per MME.
    pub purge_flag: Vec<bool>,
    /// Open5GS document schema version.
    pub schema_version: i32,
    /// Mongoose version key.
    #[serde(rename = "__v")]
    pub version_key: i32,
}

/// Authentication material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    /// Hex-encoded subscriber key.
    pub k: String,
    /// Hex-encoded authentication management field.
    pub amf: String,
    /// Hex-encoded OPc.
    pub opc: String,
    /// Initial sequence number.
    pub sqn: i32,
}

/// A subscribed network slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slice {
    /// Slice/service type.
    pub sst: i32,
    /// Whether this is the default slice.
    pub default_indicator: bool,
    /// Sessions available on the slice.
    pub session: Vec<Session>,
}

/// A session (APN/DNN) configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Data network name.
    pub name: String,
    /// PDU session type code (3 = IPv4v6).
    #[serde(rename = "type")]
    pub session_type: i32,
    /// Default QoS.
    pub qos: Open5gsQos,
    /// Session aggregate maximum bit rate.
    pub ambr: Open5gsAmbr,
}

/// QoS index and priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open5gsQos {
    /// 5QI/QCI.
    pub index: i32,
    /// Allocation and retention priority.
    pub arp: Open5gsArp,
}

/// Allocation and retention priority, encoded as Open5GS integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open5gsArp {
    /// Priority level.
    pub priority_level: i32,
    /// Pre-emption capability (1 = disabled).
    pub pre_emption_capability: i32,
    /// Pre-emption vulnerability (1 = disabled).
    pub pre_emption_vulnerability: i32,
}

/// Uplink and downlink bit rate caps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Open5gsAmbr {
    /// Uplink cap.
    pub uplink: Bitrate,
    /// Downlink cap.
    pub downlink: Bitrate,
}

/// A bit rate as value and unit exponent (3 = Gbps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitrate {
    /// Rate magnitude.
    pub value: i32,
    /// Unit code.
    pub unit: i32,
}

const ONE_GBPS: Bitrate = Bitrate { value: 1, unit: 3 };

const fn one_gbps_both_ways() -> Open5gsAmbr {
    Open5gsAmbr {
        uplink: ONE_GBPS,
        downlink: ONE_GBPS,
    }
}

impl Default for Open5gsProfile {
    fn default() -> Self {
        Self {
            imeisv: "4370816125816151".to_owned(),
            security: Security {
                k: "465B5CE8B199B49FAA5F0A2EE238A6BC".to_owned(),
                amf: "8000".to_owned(),
                opc: "E8ED289DEBA952E4283B54E88E6183CA".to_owned(),
                sqn: 0,
            },
            slice: vec![Slice {
                sst: 1,
                default_indicator: true,
                session: vec![Session {
                    name: "internet".to_owned(),
                    session_type: 3,
                    qos: Open5gsQos {
                        index: 9,
                        arp: Open5gsArp {
                            priority_level: 8,
                            pre_emption_capability: 1,
                            pre_emption_vulnerability: 1,
                        },
                    },
                    ambr: one_gbps_both_ways(),
                }],
            }],
            ambr: one_gbps_both_ways(),
            access_restriction_data: 32,
            subscriber_status: 0,
            operator_determined_barring: 0,
            network_access_mode: 0,
            subscribed_rau_tau_timer: 12,
            msisdn: Vec::new(),
            mme_host: Vec::new(),
            mme_realm: Vec::new(),
            purge_flag: Vec::new(),
            schema_version: 1,
            version_key: 0,
        }
    }
}
