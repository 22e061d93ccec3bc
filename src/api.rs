/// Low-level HTTP client for the chain node's read endpoints.
///
/// Typed wrappers over `POST /v1/chain/get_currency_balance` and
/// `POST /v1/chain/get_table_rows`. Bodies are form-encoded, matching what
/// the node accepts from legacy clients. Every transport or endpoint failure
/// surfaces as an upstream error with the original message; nothing is
/// retried.
use std::any::type_name;

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Network;
use crate::errors::TranseosError;

/// Envelope returned by `get_table_rows`.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRowsResponse<T> {
    pub rows: Vec<T>,
    #[serde(default)]
    pub more: bool,
}

/// Low-level chain query client.
#[derive(Debug, Clone)]
pub struct ChainApi {
    client: Client,
    network: Network,
}

impl ChainApi {
    pub fn new(network: Network) -> Self {
        Self {
            client: Client::new(),
            network,
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<T, TranseosError> {
        let url = self.network.endpoint(path)?;
        let response = self.client.post(url).form(form).send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(
            "chain.post_form path={} status={} target_type={} body_len={}",
            path,
            status,
            type_name::<T>(),
            text.len()
        );

        if !status.is_success() {
            return Err(TranseosError::upstream(format!("HTTP {status}: {text}")));
        }
        serde_json::from_str(&text).map_err(|e| {
            TranseosError::upstream(format!(
                "failed to parse response: {e}\nBody: {}",
                &text[..text.len().min(500)]
            ))
        })
    }

    /// `get_currency_balance`: balances of `account` under the token
    /// contract `code`, as asset strings.
    pub async fn get_currency_balance(
        &self,
        code: &str,
        account: &str,
        symbol: Option<&str>,
    ) -> Result<Vec<String>, TranseosError> {
        debug!(
            "chain.get_currency_balance code={} account={} symbol={:?}",
            code, account, symbol
        );
        let mut form = vec![("code", code), ("account", account)];
        if let Some(symbol) = symbol {
            form.push(("symbol", symbol));
        }
        self.post_form("/v1/chain/get_currency_balance", &form)
            .await
    }

    /// `get_table_rows`: rows of `table` in `scope`'s storage under
    /// contract `code`, decoded as JSON.
    pub async fn get_table_rows<T: DeserializeOwned>(
        &self,
        code: &str,
        scope: &str,
        table: &str,
    ) -> Result<Vec<T>, TranseosError> {
        debug!(
            "chain.get_table_rows code={} scope={} table={}",
            code, scope, table
        );
        let form = [
            ("code", code),
            ("scope", scope),
            ("table", table),
            ("json", "true"),
        ];
        let response: TableRowsResponse<T> =
            self.post_form("/v1/chain/get_table_rows", &form).await?;
        Ok(response.rows)
    }
}
