/// High-level client for the Transledger basic and exchange contracts.
///
/// This is the primary entry point for SDK users. Read queries go straight
/// to the chain node; write operations build an [`ActionIntent`] through the
/// shared [`ActionBuilder`] and submit it through the caller's
/// [`WalletClient`]. Callers who only want the prepared payload use the
/// builder on the `actions` field directly.
use log::debug;

use crate::actions::{
    ActionBuilder, ActionIntent, CreateOrderParams, EditOrderParams, SettleOrdersParams,
};
use crate::api::ChainApi;
use crate::config::ClientConfig;
use crate::errors::TranseosError;
use crate::models::{
    filter_allowances, filter_balances, filter_orders, paginate, AllowanceRow, OrderFilters,
    OrderRow, PaginatedResult, TransactReceipt,
};
use crate::wallet::{require_auth, send_actions, WalletClient};

/// The high-level Transeos client.
pub struct TranseosClient {
    pub api: ChainApi,
    pub actions: ActionBuilder,
    pub config: ClientConfig,
}

impl TranseosClient {
    /// Create a new client for the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ChainApi::new(config.network.clone()),
            actions: ActionBuilder::new(config.clone()),
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Read queries
    // -----------------------------------------------------------------------

    /// Balances of `account` under the basic contract, optionally narrowed
    /// to one symbol, as a page of asset strings.
    pub async fn get_balance(
        &self,
        account: &str,
        symbol: Option<&str>,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<PaginatedResult<String>, TranseosError> {
        if account.is_empty() {
            return Err(TranseosError::validation(
                "account",
                "Account name is not provided!",
            ));
        }
        debug!("client.get_balance account={} symbol={:?}", account, symbol);
        let mut balances = self
            .api
            .get_currency_balance(&self.config.contract_address, account, symbol)
            .await?;
        // The node already narrows by symbol; the client-side filter also
        // covers nodes that ignore the parameter.
        filter_balances(&mut balances, symbol);
        Ok(paginate(balances, page, limit))
    }

    /// Rows of `account`'s allowance table, optionally narrowed by spender
    /// and symbol.
    pub async fn get_allowance(
        &self,
        account: &str,
        spender: Option<&str>,
        symbol: Option<&str>,
        page: Option<usize>,
        limit: Option<usize>,
    ) -> Result<PaginatedResult<AllowanceRow>, TranseosError> {
        if account.is_empty() {
            return Err(TranseosError::validation(
                "account",
                "Account name is not provided!",
            ));
        }
        debug!(
            "client.get_allowance account={} spender={:?} symbol={:?}",
            account, spender, symbol
        );
        let mut rows: Vec<AllowanceRow> = self
            .api
            .get_table_rows(&self.config.contract_address, account, "allowed")
            .await?;
        filter_allowances(&mut rows, spender, symbol);
        Ok(paginate(rows, page, limit))
    }

    /// The exchange's order book, filtered client-side.
    pub async fn get_orders(
        &self,
        filters: &OrderFilters,
    ) -> Result<PaginatedResult<OrderRow>, TranseosError> {
        let exchange = self.config.exchange_address()?.to_string();
        debug!("client.get_orders filters={:?}", filters);
        let mut rows: Vec<OrderRow> = self
            .api
            .get_table_rows(&exchange, &exchange, "orders")
            .await?;
        filter_orders(&mut rows, filters);
        Ok(paginate(rows, filters.page, filters.limit))
    }

    // -----------------------------------------------------------------------
    // Basic contract submissions
    // -----------------------------------------------------------------------

    /// Register a new currency. Only the contract account's own wallet can
    /// authorize this.
    pub async fn create<W: WalletClient>(
        &self,
        wallet: &W,
        issuer: &str,
        max_supply: &str,
        decimals: u32,
        symbol: &str,
    ) -> Result<TransactReceipt, TranseosError> {
        require_auth(wallet)?;
        let action = self.actions.create(issuer, max_supply, decimals, symbol)?;
        self.submit(wallet, action).await
    }

    /// Issue tokens to an account, up to the currency's max supply.
    pub async fn issue<W: WalletClient>(
        &self,
        wallet: &W,
        to: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self
            .actions
            .issue(&auth, to, quantity, decimals, symbol, memo)?;
        self.submit(wallet, action).await
    }

    /// Transfer tokens under the authority of the `from` account.
    #[allow(clippy::too_many_arguments)]
    pub async fn transfer<W: WalletClient>(
        &self,
        wallet: &W,
        from: &str,
        to: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self
            .actions
            .transfer(&auth, from, to, quantity, decimals, symbol, memo)?;
        self.submit(wallet, action).await
    }

    /// Transfer tokens under the authority of a pre-approved spender.
    #[allow(clippy::too_many_arguments)]
    pub async fn transferfrom<W: WalletClient>(
        &self,
        wallet: &W,
        from: &str,
        to: &str,
        spender: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action =
            self.actions
                .transferfrom(&auth, from, to, spender, quantity, decimals, symbol, memo)?;
        self.submit(wallet, action).await
    }

    /// Pre-approve `spender` to move up to `quantity` of the owner's tokens.
    #[allow(clippy::too_many_arguments)]
    pub async fn approve<W: WalletClient>(
        &self,
        wallet: &W,
        owner: &str,
        spender: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self
            .actions
            .approve(&auth, owner, spender, quantity, decimals, symbol)?;
        self.submit(wallet, action).await
    }

    // -----------------------------------------------------------------------
    // Exchange contract submissions
    // -----------------------------------------------------------------------

    /// Place a new order on the exchange.
    pub async fn create_order<W: WalletClient>(
        &self,
        wallet: &W,
        params: &CreateOrderParams,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self.actions.create_order(&auth, params)?;
        self.submit(wallet, action).await
    }

    /// Change the amounts or expiry of an existing order.
    pub async fn edit_order<W: WalletClient>(
        &self,
        wallet: &W,
        params: &EditOrderParams,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self.actions.edit_order(&auth, params)?;
        self.submit(wallet, action).await
    }

    /// Cancel an order under its owner's authority.
    pub async fn cancel_order<W: WalletClient>(
        &self,
        wallet: &W,
        user: &str,
        key: u64,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self.actions.cancel_order(&auth, user, key)?;
        self.submit(wallet, action).await
    }

    /// Garbage-collect an expired order.
    pub async fn retire_order<W: WalletClient>(
        &self,
        wallet: &W,
        sender: &str,
        key: u64,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self.actions.retire_order(&auth, sender, key)?;
        self.submit(wallet, action).await
    }

    /// Settle two matching orders.
    pub async fn settle_orders<W: WalletClient>(
        &self,
        wallet: &W,
        params: &SettleOrdersParams,
    ) -> Result<TransactReceipt, TranseosError> {
        let auth = require_auth(wallet)?.clone();
        let action = self.actions.settle_orders(&auth, params)?;
        self.submit(wallet, action).await
    }

    async fn submit<W: WalletClient>(
        &self,
        wallet: &W,
        action: ActionIntent,
    ) -> Result<TransactReceipt, TranseosError> {
        send_actions(wallet, &[action]).await
    }
}
