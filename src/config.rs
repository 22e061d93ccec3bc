/// Network and contract configuration for the Transeos SDK.
use url::Url;

use crate::errors::TranseosError;

/// The transport protocol used to reach a chain node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    fn scheme(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

/// Identifies a remote chain node endpoint. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Network {
    pub host: String,
    pub port: Option<u16>,
    pub protocol: Protocol,
    pub chain_id: String,
}

impl Network {
    pub fn new(
        host: impl Into<String>,
        port: Option<u16>,
        protocol: Protocol,
        chain_id: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            protocol,
            chain_id: chain_id.into(),
        }
    }

    /// Build the full URL for a chain API path such as
    /// `/v1/chain/get_table_rows`.
    pub fn endpoint(&self, path: &str) -> Result<Url, TranseosError> {
        let base = match self.port {
            Some(port) => format!("{}://{}:{}{}", self.protocol.scheme(), self.host, port, path),
            None => format!("{}://{}{}", self.protocol.scheme(), self.host, path),
        };
        Ok(Url::parse(&base)?)
    }
}

/// Configuration owned by the SDK client for its lifetime.
///
/// `contract_address` is the account hosting the basic (token) contract;
/// `exchange_address` hosts the order-book contract and may be absent for
/// token-only deployments, in which case exchange operations fail with a
/// validation error.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub contract_address: String,
    pub exchange_address: Option<String>,
    pub network: Network,
}

impl ClientConfig {
    pub fn new(
        contract_address: impl Into<String>,
        exchange_address: Option<String>,
        network: Network,
    ) -> Self {
        Self {
            contract_address: contract_address.into(),
            exchange_address,
            network,
        }
    }

    /// The exchange contract account, or a validation error when the client
    /// was configured without one.
    pub fn exchange_address(&self) -> Result<&str, TranseosError> {
        self.exchange_address.as_deref().ok_or_else(|| {
            TranseosError::validation(
                "exchange_address",
                "Please configure an exchange contract address for exchange operations.",
            )
        })
    }
}
