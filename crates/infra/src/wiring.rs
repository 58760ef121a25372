//! Assembles the invite workflow from configuration

use std::str::FromStr;
use std::sync::Arc;

use chrono_tz::Tz;
use traincast_core::{DirectoryLookup, InviteService, InviteWriters};
use traincast_domain::{Config, Result, TraincastError};

use crate::http::HttpClient;
use crate::integrations::exchange::{windows_zone_id, ExchangeInviteWriter};
use crate::integrations::graph::{
    AccessTokenProvider, CachedDirectory, ClientCredentialsTokenProvider, GraphCalendarWriter,
    GraphClient, GraphDirectory, GraphOnlineMeetings,
};

/// The assembled service plus handles callers may need afterwards.
pub struct InviteStack {
    pub service: InviteService,
    /// Present when `routing_cache.ttl_seconds > 0`.
    pub routing_cache: Option<Arc<CachedDirectory>>,
}

/// App-only token provider for the configured Graph registration.
pub fn client_credentials(config: &Config) -> Result<Arc<dyn AccessTokenProvider>> {
    let http = HttpClient::from_config(&config.http).build()?;
    Ok(Arc::new(ClientCredentialsTokenProvider::new(http, &config.graph)?))
}

/// Build the invite stack: Graph directory (optionally cached), Graph online
/// meetings, Graph and EWS writers, and the configured time zone.
pub fn build_invite_stack(
    config: &Config,
    tokens: Arc<dyn AccessTokenProvider>,
) -> Result<InviteStack> {
    let time_zone = Tz::from_str(&config.invite.time_zone).map_err(|_| {
        TraincastError::Config(format!("Unknown time zone: {}", config.invite.time_zone))
    })?;
    if windows_zone_id(time_zone).is_none() {
        return Err(TraincastError::Config(format!(
            "time zone {time_zone} has no Exchange equivalent"
        )));
    }
    let meeting_account = config.graph.meeting_account.trim();
    if tokens.is_app_only() && meeting_account.is_empty() {
        return Err(TraincastError::Config(
            "graph.meeting_account is required with app-only Graph tokens".into(),
        ));
    }

    let graph_http = HttpClient::from_config(&config.http).build()?;
    let graph = GraphClient::new(graph_http, config.graph.base_url.clone(), tokens);

    // CreateItem is not idempotent, so EWS uses its own attempt count.
    let ews_http =
        HttpClient::from_config(&config.http).max_attempts(config.exchange.max_attempts).build()?;

    let graph_directory: Arc<dyn DirectoryLookup> = Arc::new(GraphDirectory::new(graph.clone()));
    let routing_cache =
        CachedDirectory::new(Arc::clone(&graph_directory), &config.routing_cache).map(Arc::new);
    let directory: Arc<dyn DirectoryLookup> = match &routing_cache {
        Some(cache) => Arc::clone(cache) as Arc<dyn DirectoryLookup>,
        None => graph_directory,
    };

    let writers = InviteWriters::new(
        Arc::new(GraphCalendarWriter::new(graph.clone())),
        Arc::new(ExchangeInviteWriter::new(ews_http, &config.exchange)?),
    )?;

    let service = InviteService::new(
        directory,
        Arc::new(GraphOnlineMeetings::new(graph).with_meeting_account(meeting_account)),
        writers,
        time_zone,
    )
    .with_cancel_comment(config.invite.cancel_comment.clone());

    tracing::info!(
        time_zone = %time_zone,
        graph = %config.graph.base_url,
        exchange = %config.exchange.endpoint,
        routing_cache = routing_cache.is_some(),
        "invite service assembled"
    );

    Ok(InviteStack { service, routing_cache })
}

/// Build just the invite service.
pub fn build_invite_service(
    config: &Config,
    tokens: Arc<dyn AccessTokenProvider>,
) -> Result<InviteService> {
    Ok(build_invite_stack(config, tokens)?.service)
}

#[cfg(test)]
mod tests {
    use traincast_domain::{
        ExchangeConfig, GraphConfig, HttpConfig, InviteConfig, RoutingCacheConfig,
    };

    use super::*;
    use crate::integrations::graph::StaticTokenProvider;

    fn config() -> Config {
        Config {
            graph: GraphConfig {
                base_url: "https://graph.example/v1.0".into(),
                authority_url: "https://login.example".into(),
                tenant_id: "t".into(),
                client_id: "c".into(),
                client_secret: "s".into(),
                meeting_account: String::new(),
            },
            exchange: ExchangeConfig {
                endpoint: "https://mail.example/EWS/Exchange.asmx".into(),
                username: "svc".into(),
                password: "pw".into(),
                max_attempts: 1,
            },
            invite: InviteConfig::default(),
            http: HttpConfig::default(),
            routing_cache: RoutingCacheConfig::default(),
        }
    }

    fn tokens() -> Arc<dyn AccessTokenProvider> {
        Arc::new(StaticTokenProvider::new("token"))
    }

    #[test]
    fn builds_with_configured_time_zone() {
        let mut cfg = config();
        cfg.invite.time_zone = "Asia/Kolkata".into();

        let stack = build_invite_stack(&cfg, tokens()).unwrap();

        assert_eq!(stack.service.time_zone(), chrono_tz::Asia::Kolkata);
        assert!(stack.routing_cache.is_none());
    }

    #[test]
    fn routing_cache_enabled_by_ttl() {
        let mut cfg = config();
        cfg.routing_cache.ttl_seconds = 120;

        let stack = build_invite_stack(&cfg, tokens()).unwrap();
        assert!(stack.routing_cache.is_some());
    }

    #[test]
    fn invalid_exchange_endpoint_is_config_error() {
        let mut cfg = config();
        cfg.exchange.endpoint = "not a url".into();

        let result = build_invite_service(&cfg, tokens());
        assert!(matches!(result, Err(TraincastError::Config(_))));
    }

    #[test]
    fn unknown_time_zone_is_config_error() {
        let mut cfg = config();
        cfg.invite.time_zone = "Nowhere/Land".into();

        assert!(matches!(build_invite_service(&cfg, tokens()), Err(TraincastError::Config(_))));
    }

    #[test]
    fn time_zone_without_exchange_id_is_config_error() {
        let mut cfg = config();
        cfg.invite.time_zone = "Antarctica/Troll".into();

        let result = build_invite_service(&cfg, tokens());
        assert!(matches!(result, Err(TraincastError::Config(msg)) if msg.contains("Exchange")));
    }

    #[test]
    fn app_only_tokens_require_meeting_account() {
        let cfg = config();
        let app_tokens = client_credentials(&cfg).unwrap();

        let result = build_invite_service(&cfg, Arc::clone(&app_tokens));
        assert!(matches!(result, Err(TraincastError::Config(msg)) if msg.contains("meeting_account")));

        let mut cfg = cfg;
        cfg.graph.meeting_account = "training-host@contoso.com".into();
        assert!(build_invite_service(&cfg, app_tokens).is_ok());
    }

    #[test]
    fn client_credentials_requires_tenant() {
        let mut cfg = config();
        cfg.graph.tenant_id = String::new();
        assert!(matches!(client_credentials(&cfg), Err(TraincastError::Config(_))));
    }
}
