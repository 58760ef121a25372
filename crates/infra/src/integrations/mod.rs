//! External service integrations

pub mod exchange;
pub mod graph;

pub use exchange::ExchangeInviteWriter;
pub use graph::{
    AccessTokenProvider, CachedDirectory, ClientCredentialsTokenProvider, GraphCalendarWriter,
    GraphClient, GraphDirectory, GraphOnlineMeetings, StaticTokenProvider,
};
