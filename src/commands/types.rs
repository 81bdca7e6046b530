//! Button identity types for the profile command.

use serenity::all::UserId;

const VEHICLES_PREFIX: &str = "view_vehicles_";
const POLICE_RECORDS_PREFIX: &str = "view_police_records_";

/// A profile view button, identified by its component custom ID.
///
/// The custom ID encodes both the button kind and the subject user id
/// (`view_vehicles_<id>` / `view_police_records_<id>`), so clicks stay
/// unambiguous even when profiles for different users are open at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileButton {
    /// Shows the subject's registered vehicles.
    Vehicles(UserId),

    /// Shows the subject's police records, tickets and license status.
    PoliceRecords(UserId),
}

impl ProfileButton {
    /// Parses a component custom ID.
    ///
    /// Returns `None` if the ID does not belong to a profile button or does
    /// not carry a plausible user id.
    #[must_use]
    pub fn parse(custom_id: &str) -> Option<Self> {
        if let Some(raw) = custom_id.strip_prefix(VEHICLES_PREFIX) {
            return parse_user_id(raw).map(Self::Vehicles);
        }
        if let Some(raw) = custom_id.strip_prefix(POLICE_RECORDS_PREFIX) {
            return parse_user_id(raw).map(Self::PoliceRecords);
        }
        None
    }

    /// The custom ID to attach to the button component.
    #[must_use]
    pub fn custom_id(&self) -> String {
        match self {
            Self::Vehicles(user_id) => format!("{VEHICLES_PREFIX}{user_id}"),
            Self::PoliceRecords(user_id) => format!("{POLICE_RECORDS_PREFIX}{user_id}"),
        }
    }

    /// The label shown on the button.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Vehicles(_) => "View Vehicles",
            Self::PoliceRecords(_) => "Police Records",
        }
    }

    /// The subject user this button belongs to.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        match self {
            Self::Vehicles(user_id) | Self::PoliceRecords(user_id) => *user_id,
        }
    }
}

fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.parse::<u64>().ok().filter(|&id| id != 0).map(UserId::new)
}
