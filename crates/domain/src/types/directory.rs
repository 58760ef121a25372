//! Directory records and mailbox routing

use serde::{Deserialize, Serialize};

use super::invite::Attendee;

/// A user as resolved from the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    pub id: String,
    pub display_name: String,
    /// Mail address, falling back to the user principal name.
    pub address: String,
    /// Mailbox hosted on the on-premises Exchange organization.
    pub on_premises: bool,
}

impl DirectoryUser {
    pub fn routing(&self) -> MailboxRouting {
        if self.on_premises {
            MailboxRouting::OnPremises
        } else {
            MailboxRouting::Cloud
        }
    }

    pub fn to_attendee(&self) -> Attendee {
        Attendee { display_name: self.display_name.clone(), address: self.address.clone() }
    }
}

/// Which mail backend serves an organizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MailboxRouting {
    Cloud,
    OnPremises,
}

crate::impl_domain_status_conversions!(MailboxRouting {
    Cloud => "cloud",
    OnPremises => "on_premises",
});
