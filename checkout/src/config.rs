use envconfig::Envconfig;
use std::time::Duration;
use url::Url;

use crate::transport::{Transport, TransportError};

#[derive(Envconfig, Debug, Clone)]
pub struct ServiceConfig {
    #[envconfig(from = "CONNECTOR_HOST")]
    pub connector_host: Url,

    #[envconfig(from = "CARDID_HOST")]
    pub cardid_host: Url,

    #[envconfig(from = "FORWARD_PROXY_URL")]
    pub forward_proxy_url: Option<Url>,

    // Unset leaves timeouts to the network stack.
    #[envconfig(from = "SERVICE_TIMEOUT_SECONDS")]
    pub service_timeout_seconds: Option<u64>,
}

impl ServiceConfig {
    /// Builds the transport every outbound call shares.
    pub fn transport(&self) -> Result<Transport, TransportError> {
        let transport = Transport::try_new(self.forward_proxy_url.as_ref())?;
        Ok(match self.service_timeout_seconds {
            Some(seconds) => transport.with_timeout(Duration::from_secs(seconds)),
            None => transport,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reads_required_hosts() {
        let config = ServiceConfig::init_from_hashmap(&vars(&[
            ("CONNECTOR_HOST", "http://connector:9300"),
            ("CARDID_HOST", "http://cardid:9800"),
        ]))
        .unwrap();
        assert_eq!(config.connector_host.as_str(), "http://connector:9300/");
        assert!(config.forward_proxy_url.is_none());
        assert!(config.service_timeout_seconds.is_none());
        assert!(config.transport().is_ok());
    }

    #[test]
    fn test_reads_forward_proxy() {
        let config = ServiceConfig::init_from_hashmap(&vars(&[
            ("CONNECTOR_HOST", "http://connector:9300"),
            ("CARDID_HOST", "http://cardid:9800"),
            ("FORWARD_PROXY_URL", "http://proxy.internal:3128"),
            ("SERVICE_TIMEOUT_SECONDS", "10"),
        ]))
        .unwrap();
        assert_eq!(
            config.forward_proxy_url.as_ref().map(Url::as_str),
            Some("http://proxy.internal:3128/")
        );
        assert_eq!(config.service_timeout_seconds, Some(10));
        assert!(config.transport().is_ok());
    }

    #[test]
    fn test_missing_connector_host_fails() {
        let result = ServiceConfig::init_from_hashmap(&vars(&[("CARDID_HOST", "http://cardid:9800")]));
        assert!(result.is_err());
    }
}
