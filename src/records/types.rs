//! Record shapes shared by the profile command and the validator.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A registered vehicle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    /// Model year.
    pub year: u16,

    /// Manufacturer name.
    pub make: String,

    /// Model name.
    pub model: String,

    /// Paint colour.
    pub color: String,

    /// Registration plate.
    pub number_plate: String,
}

/// An arrest entry written by the police-record commands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoliceRecord {
    /// Reason for the arrest.
    pub reason: String,

    /// Offenses charged.
    pub offenses: String,

    /// Fine amount.
    pub price: u32,

    /// Officer who executed the arrest.
    pub executed_by: String,

    /// When the arrest was recorded.
    pub date: Timestamp,
}

/// One entry in a user's license history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LicenseEntry {
    /// License status at the time of the entry (e.g. "valid", "revoked").
    pub status: String,

    /// When the entry was issued.
    pub date: Timestamp,
}

impl LicenseEntry {
    /// Returns the entry that determines the current license status.
    ///
    /// Writer commands append entries in issue order, so the last element
    /// by array position is the current one. Dates are not consulted.
    #[must_use]
    pub fn most_recent(entries: &[Self]) -> Option<&Self> {
        entries.last()
    }
}

/// A traffic ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    /// Offense the ticket was issued for.
    pub offense: String,

    /// Fine amount.
    pub price: u32,

    /// How many times the offense was committed.
    pub count: u32,

    /// When the ticket was issued.
    pub date: Timestamp,
}

/// A date value as the writer commands store it.
///
/// Record files carry dates either as epoch milliseconds or as a date
/// string, depending on which command wrote them. Both forms are accepted;
/// display falls back to the raw value when it cannot be interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Millis(i64),

    /// A textual date, ideally RFC 3339.
    Text(String),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Millis(ms) => match Utc.timestamp_millis_opt(*ms).single() {
                Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
                None => write!(f, "{ms}"),
            },
            Self::Text(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => write!(f, "{}", dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S UTC")),
                Err(_) => f.write_str(raw),
            },
        }
    }
}
