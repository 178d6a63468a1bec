//! Structured records returned by queries over the instance graph.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Operational state of an interface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OperStatus {
    Up,
    Down,
}

impl OperStatus {
    pub fn opposite(self) -> Self {
        match self {
            OperStatus::Up => OperStatus::Down,
            OperStatus::Down => OperStatus::Up,
        }
    }
}

/// One row of `interfaces list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSummary {
    pub interface: String,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub oper_status: Option<String>,
}

/// Full detail for a single interface, including optional addressing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceDetails {
    pub interface: String,
    pub name: String,
    pub enabled: Option<bool>,
    pub oper_status: Option<String>,
    pub ipv4: Option<String>,
    pub prefix_length: Option<i64>,
    pub cidr: Option<String>,
    pub ipv6: Option<String>,
}
