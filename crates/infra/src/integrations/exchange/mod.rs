//! Exchange Web Services adapter for on-premises mailboxes

pub mod session;
pub mod soap;
pub mod time_zones;
pub mod writer;

pub use session::{ExchangeCredentials, ExchangeSession};
pub use time_zones::windows_zone_id;
pub use writer::ExchangeInviteWriter;
