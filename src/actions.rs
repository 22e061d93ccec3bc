/// Action construction for the basic (token) and exchange (order book)
/// contracts.
///
/// Every contract operation validates its arguments, formats quantities into
/// asset strings, and assembles an [`ActionIntent`] whose field names match
/// the on-chain actions exactly. Nothing here touches the network: the intent
/// is either returned to the caller (preview) or handed to the wallet client
/// for signing and broadcast (submit).
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::amount::{format_amount, AmountFormat};
use crate::config::ClientConfig;
use crate::encoding::order_key;
use crate::errors::TranseosError;

/// Fee amounts are always expressed in the relayer token with 8 decimal
/// places, regardless of the caller-supplied currencies.
/// TODO: confirm the fee symbol and precision against the deployed exchange.
const FEE_SYMBOL: &str = "GIZMO";
const FEE_DECIMALS: u32 = 8;

/// The signing authority for an action. Wire field names `actor` and
/// `permission` are fixed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Authorization {
    pub actor: String,
    pub permission: String,
}

impl Authorization {
    pub fn new(actor: impl Into<String>, permission: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
            permission: permission.into(),
        }
    }

    /// The usual `active` permission level.
    pub fn active(actor: impl Into<String>) -> Self {
        Self::new(actor, "active")
    }
}

/// One not-yet-submitted chain operation.
///
/// Serializes to the exact shape the wallet client's `transact` call expects:
/// `{account, name, authorization, data}`. These are wire names and must not
/// be renamed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionIntent {
    pub account: String,
    pub name: String,
    pub authorization: Vec<Authorization>,
    pub data: serde_json::Value,
}

/// A required argument, checked in declaration order. The first failing
/// requirement aborts the build with a [`TranseosError::Validation`].
enum Requirement<'a> {
    /// An account-like or amount-like field that must be a non-empty string.
    NonEmpty {
        field: &'static str,
        value: &'a str,
        message: &'static str,
    },
    /// A numeric field that must be non-zero (decimals, keys, expiries).
    NonZero {
        field: &'static str,
        value: u64,
        message: &'static str,
    },
}

fn check_required(requirements: &[Requirement<'_>]) -> Result<(), TranseosError> {
    for requirement in requirements {
        match requirement {
            Requirement::NonEmpty {
                field,
                value,
                message,
            } => {
                if value.is_empty() {
                    return Err(TranseosError::validation(field, *message));
                }
            }
            Requirement::NonZero {
                field,
                value,
                message,
            } => {
                if *value == 0 {
                    return Err(TranseosError::validation(field, *message));
                }
            }
        }
    }
    Ok(())
}

/// Arguments for `createorder` on the exchange contract.
#[derive(Debug, Clone)]
pub struct CreateOrderParams {
    /// Account whose tokens back the order.
    pub user: String,
    /// Relayer account collecting the fees.
    pub sender: String,
    pub base_amount: String,
    pub base_decimals: u32,
    pub base_symbol: String,
    pub counter_amount: String,
    pub counter_decimals: u32,
    pub counter_symbol: String,
    /// Fee amount, denominated in the fixed fee currency.
    pub fees_amount: String,
    pub memo: Option<String>,
    /// Expiry in milliseconds since the Unix epoch.
    pub expires: u64,
}

/// Arguments for `editorder` on the exchange contract. Only the amounts and
/// the expiry of an existing order can change.
#[derive(Debug, Clone)]
pub struct EditOrderParams {
    pub user: String,
    pub key: u64,
    pub base_amount: String,
    pub base_decimals: u32,
    pub base_symbol: String,
    pub counter_amount: String,
    pub counter_decimals: u32,
    pub counter_symbol: String,
    pub expires: u64,
}

/// One side of a settlement: the amount paid by that order and the amount to
/// deduct from its counter leg to keep the asked price constant.
#[derive(Debug, Clone)]
pub struct SettlementLeg {
    pub key: u64,
    pub base_amount: String,
    pub base_decimals: u32,
    pub base_symbol: String,
    pub counter_amount: String,
    pub counter_decimals: u32,
    pub counter_symbol: String,
}

/// Arguments for `settleorders` on the exchange contract.
#[derive(Debug, Clone)]
pub struct SettleOrdersParams {
    /// Account issuing the settlement.
    pub sender: String,
    pub maker: SettlementLeg,
    pub taker: SettlementLeg,
    pub memo: Option<String>,
}

/// Builds [`ActionIntent`]s for every supported contract operation.
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    config: ClientConfig,
}

impl ActionBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    fn asset(&self, quantity: &str, decimals: u32, symbol: &str) -> Result<String, TranseosError> {
        format_amount(quantity, AmountFormat::with_decimals(decimals), symbol)
    }

    /// `create`: register a new currency on the basic contract.
    /// Only the contract account itself is authorized to run this.
    pub fn create(
        &self,
        issuer: &str,
        max_supply: &str,
        decimals: u32,
        symbol: &str,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "issuer",
                value: issuer,
                message: "Please provide an issuer for the currency.",
            },
            Requirement::NonEmpty {
                field: "max_supply",
                value: max_supply,
                message: "Please provide a maximum supply for the currency.",
            },
            Requirement::NonZero {
                field: "decimals",
                value: decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "symbol",
                value: symbol,
                message: "Please provide a token symbol.",
            },
        ])?;

        Ok(ActionIntent {
            account: self.config.contract_address.clone(),
            name: "create".into(),
            authorization: vec![Authorization::active(&self.config.contract_address)],
            data: json!({
                "issuer": issuer,
                "max_supply": self.asset(max_supply, decimals, symbol)?,
            }),
        })
    }

    /// `issue`: mint tokens to an account, up to the currency's max supply.
    /// Acts under the issuer's own authority.
    pub fn issue(
        &self,
        auth: &Authorization,
        to: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "to",
                value: to,
                message: "Please provide a destination (to) for the issuance.",
            },
            Requirement::NonEmpty {
                field: "quantity",
                value: quantity,
                message: "Please provide a quantity for the issuance.",
            },
            Requirement::NonZero {
                field: "decimals",
                value: decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "symbol",
                value: symbol,
                message: "Please provide a token symbol.",
            },
        ])?;

        let memo = default_memo(memo, symbol);
        Ok(ActionIntent {
            account: self.config.contract_address.clone(),
            name: "issue".into(),
            authorization: vec![auth.clone()],
            data: json!({
                "to": to,
                "quantity": self.asset(quantity, decimals, symbol)?,
                "memo": memo,
            }),
        })
    }

    /// `transfer`: move tokens under the authority of the `from` account.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        &self,
        auth: &Authorization,
        from: &str,
        to: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "from",
                value: from,
                message: "Please provide a source (from) for the transaction.",
            },
            Requirement::NonEmpty {
                field: "to",
                value: to,
                message: "Please provide a destination (to) for the transaction.",
            },
            Requirement::NonEmpty {
                field: "quantity",
                value: quantity,
                message: "Please provide a quantity for the transaction.",
            },
            Requirement::NonZero {
                field: "decimals",
                value: decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "symbol",
                value: symbol,
                message: "Please provide a token symbol.",
            },
        ])?;

        let memo = default_memo(memo, symbol);
        Ok(ActionIntent {
            account: self.config.contract_address.clone(),
            name: "transfer".into(),
            authorization: vec![Authorization::new(from, &auth.permission)],
            data: json!({
                "from": from,
                "to": to,
                "quantity": self.asset(quantity, decimals, symbol)?,
                "memo": memo,
            }),
        })
    }

    /// `transferfrom`: move tokens under the authority of a pre-approved
    /// `spender` account.
    #[allow(clippy::too_many_arguments)]
    pub fn transferfrom(
        &self,
        auth: &Authorization,
        from: &str,
        to: &str,
        spender: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
        memo: Option<&str>,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "from",
                value: from,
                message: "Please provide a source (from) for the transaction.",
            },
            Requirement::NonEmpty {
                field: "to",
                value: to,
                message: "Please provide a destination (to) for the transaction.",
            },
            Requirement::NonEmpty {
                field: "spender",
                value: spender,
                message: "Please provide a spender for the transaction.",
            },
            Requirement::NonEmpty {
                field: "quantity",
                value: quantity,
                message: "Please provide a quantity for the transaction.",
            },
            Requirement::NonZero {
                field: "decimals",
                value: decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "symbol",
                value: symbol,
                message: "Please provide a token symbol.",
            },
        ])?;

        let memo = default_memo(memo, symbol);
        Ok(ActionIntent {
            account: self.config.contract_address.clone(),
            name: "transferfrom".into(),
            authorization: vec![Authorization::new(spender, &auth.permission)],
            data: json!({
                "from": from,
                "to": to,
                "spender": spender,
                "quantity": self.asset(quantity, decimals, symbol)?,
                "memo": memo,
            }),
        })
    }

    /// `approve`: allow `spender` to move up to `quantity` of the owner's
    /// tokens.
    pub fn approve(
        &self,
        auth: &Authorization,
        owner: &str,
        spender: &str,
        quantity: &str,
        decimals: u32,
        symbol: &str,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "owner",
                value: owner,
                message: "Please provide an owner for the approval.",
            },
            Requirement::NonEmpty {
                field: "spender",
                value: spender,
                message: "Please provide a spender for the approval.",
            },
            Requirement::NonEmpty {
                field: "quantity",
                value: quantity,
                message: "Please provide a quantity for the approval.",
            },
            Requirement::NonZero {
                field: "decimals",
                value: decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "symbol",
                value: symbol,
                message: "Please provide a token symbol.",
            },
        ])?;

        Ok(ActionIntent {
            account: self.config.contract_address.clone(),
            name: "approve".into(),
            authorization: vec![Authorization::new(owner, &auth.permission)],
            data: json!({
                "owner": owner,
                "spender": spender,
                "quantity": self.asset(quantity, decimals, symbol)?,
            }),
        })
    }

    /// `createorder`: place a new order on the exchange. The order key is
    /// derived from the user, the offered symbol, and the current time.
    pub fn create_order(
        &self,
        auth: &Authorization,
        params: &CreateOrderParams,
    ) -> Result<ActionIntent, TranseosError> {
        self.create_order_at(auth, params, now_millis())
    }

    /// `createorder` with an explicit creation timestamp. The timestamp is
    /// part of the derived order key, so reproducible callers (and tests)
    /// supply it directly.
    pub fn create_order_at(
        &self,
        auth: &Authorization,
        params: &CreateOrderParams,
        timestamp_ms: u64,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "user",
                value: &params.user,
                message: "Please provide a user for the order.",
            },
            Requirement::NonEmpty {
                field: "sender",
                value: &params.sender,
                message: "Please provide a sender for the order.",
            },
            Requirement::NonEmpty {
                field: "base_amount",
                value: &params.base_amount,
                message: "Please provide an offer quantity for the order.",
            },
            Requirement::NonZero {
                field: "base_decimals",
                value: params.base_decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "base_symbol",
                value: &params.base_symbol,
                message: "Please provide a token symbol for the offer.",
            },
            Requirement::NonEmpty {
                field: "counter_amount",
                value: &params.counter_amount,
                message: "Please provide a quantity for the order.",
            },
            Requirement::NonZero {
                field: "counter_decimals",
                value: params.counter_decimals as u64,
                message: "Please provide a number of counter decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "counter_symbol",
                value: &params.counter_symbol,
                message: "Please provide a token symbol for the counter.",
            },
            Requirement::NonZero {
                field: "expires",
                value: params.expires,
                message: "Please provide an expire date (in milliseconds since the epoch) for the order.",
            },
        ])?;

        let key = order_key(&params.user, &params.base_symbol, timestamp_ms)?;
        let memo = match params.memo.as_deref() {
            Some(memo) if !memo.is_empty() => memo.to_string(),
            _ => format!("Issue order {key}"),
        };

        Ok(ActionIntent {
            account: self.config.exchange_address()?.to_string(),
            name: "createorder".into(),
            authorization: vec![Authorization::new(&params.user, &auth.permission)],
            // Order keys travel as decimal strings: they exceed 2^53, and
            // f64-based JSON tooling downstream would mangle them as numbers.
            data: json!({
                "user": params.user,
                "sender": params.sender,
                "key": key.to_string(),
                "base": self.asset(&params.base_amount, params.base_decimals, &params.base_symbol)?,
                "counter": self.asset(&params.counter_amount, params.counter_decimals, &params.counter_symbol)?,
                "fees": self.asset(&params.fees_amount, FEE_DECIMALS, FEE_SYMBOL)?,
                "memo": memo,
                "timestamp": timestamp_ms,
                "expires": params.expires,
            }),
        })
    }

    /// `editorder`: change the amounts or expiry of an existing order.
    pub fn edit_order(
        &self,
        auth: &Authorization,
        params: &EditOrderParams,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "user",
                value: &params.user,
                message: "Please provide a user for the order.",
            },
            Requirement::NonZero {
                field: "key",
                value: params.key,
                message: "Please provide a key identifying the order to modify.",
            },
            Requirement::NonEmpty {
                field: "base_amount",
                value: &params.base_amount,
                message: "Please provide an offer quantity for the order.",
            },
            Requirement::NonZero {
                field: "base_decimals",
                value: params.base_decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "base_symbol",
                value: &params.base_symbol,
                message: "Please provide a token symbol for the offer.",
            },
            Requirement::NonEmpty {
                field: "counter_amount",
                value: &params.counter_amount,
                message: "Please provide a quantity for the order.",
            },
            Requirement::NonZero {
                field: "counter_decimals",
                value: params.counter_decimals as u64,
                message: "Please provide a number of counter decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "counter_symbol",
                value: &params.counter_symbol,
                message: "Please provide a token symbol for the counter.",
            },
            Requirement::NonZero {
                field: "expires",
                value: params.expires,
                message: "Please provide an expire date (in milliseconds since the epoch) for the order.",
            },
        ])?;

        Ok(ActionIntent {
            account: self.config.exchange_address()?.to_string(),
            name: "editorder".into(),
            authorization: vec![Authorization::new(&params.user, &auth.permission)],
            data: json!({
                "key": params.key.to_string(),
                "base": self.asset(&params.base_amount, params.base_decimals, &params.base_symbol)?,
                "counter": self.asset(&params.counter_amount, params.counter_decimals, &params.counter_symbol)?,
                "expires": params.expires,
            }),
        })
    }

    /// `cancelorder`: delete an order. Must act under the order owner's
    /// authority.
    pub fn cancel_order(
        &self,
        auth: &Authorization,
        user: &str,
        key: u64,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "user",
                value: user,
                message: "Please provide a user for the order.",
            },
            Requirement::NonZero {
                field: "key",
                value: key,
                message: "Please provide a key identifying the order to delete.",
            },
        ])?;

        Ok(ActionIntent {
            account: self.config.exchange_address()?.to_string(),
            name: "cancelorder".into(),
            authorization: vec![Authorization::new(user, &auth.permission)],
            data: json!({ "key": key.to_string() }),
        })
    }

    /// `retireorder`: garbage-collect an expired order. Anybody may call it.
    pub fn retire_order(
        &self,
        auth: &Authorization,
        sender: &str,
        key: u64,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "sender",
                value: sender,
                message: "Please provide a sender for the order.",
            },
            Requirement::NonZero {
                field: "key",
                value: key,
                message: "Please provide a key identifying the order to retire.",
            },
        ])?;

        Ok(ActionIntent {
            account: self.config.exchange_address()?.to_string(),
            name: "retireorder".into(),
            authorization: vec![Authorization::new(sender, &auth.permission)],
            data: json!({ "key": key.to_string() }),
        })
    }

    /// `settleorders`: settle two matching orders. The contract re-checks
    /// the match, so anybody may submit it.
    pub fn settle_orders(
        &self,
        auth: &Authorization,
        params: &SettleOrdersParams,
    ) -> Result<ActionIntent, TranseosError> {
        check_required(&[
            Requirement::NonEmpty {
                field: "sender",
                value: &params.sender,
                message: "Please provide a sender for the action.",
            },
            Requirement::NonZero {
                field: "maker.key",
                value: params.maker.key,
                message: "Please provide a maker key identifying the order to settle.",
            },
            Requirement::NonZero {
                field: "taker.key",
                value: params.taker.key,
                message: "Please provide a taker key identifying the order to settle.",
            },
            Requirement::NonEmpty {
                field: "maker.base_amount",
                value: &params.maker.base_amount,
                message: "Please provide a maker offer quantity.",
            },
            Requirement::NonZero {
                field: "maker.base_decimals",
                value: params.maker.base_decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "maker.base_symbol",
                value: &params.maker.base_symbol,
                message: "Please provide a token symbol for the maker offer.",
            },
            Requirement::NonEmpty {
                field: "maker.counter_amount",
                value: &params.maker.counter_amount,
                message: "Please provide a maker counter quantity.",
            },
            Requirement::NonZero {
                field: "maker.counter_decimals",
                value: params.maker.counter_decimals as u64,
                message: "Please provide a number of maker counter decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "maker.counter_symbol",
                value: &params.maker.counter_symbol,
                message: "Please provide a token symbol for the maker counter.",
            },
            Requirement::NonEmpty {
                field: "taker.base_amount",
                value: &params.taker.base_amount,
                message: "Please provide a taker offer quantity.",
            },
            Requirement::NonZero {
                field: "taker.base_decimals",
                value: params.taker.base_decimals as u64,
                message: "Please provide a number of decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "taker.base_symbol",
                value: &params.taker.base_symbol,
                message: "Please provide a token symbol for the taker offer.",
            },
            Requirement::NonEmpty {
                field: "taker.counter_amount",
                value: &params.taker.counter_amount,
                message: "Please provide a taker counter quantity.",
            },
            Requirement::NonZero {
                field: "taker.counter_decimals",
                value: params.taker.counter_decimals as u64,
                message: "Please provide a number of taker counter decimal for this currency.",
            },
            Requirement::NonEmpty {
                field: "taker.counter_symbol",
                value: &params.taker.counter_symbol,
                message: "Please provide a token symbol for the taker counter.",
            },
        ])?;

        let maker = &params.maker;
        let taker = &params.taker;
        Ok(ActionIntent {
            account: self.config.exchange_address()?.to_string(),
            name: "settleorders".into(),
            authorization: vec![Authorization::new(&params.sender, &auth.permission)],
            data: json!({
                "maker": maker.key.to_string(),
                "taker": taker.key.to_string(),
                // Quantity paid by each side, and the amount to deduct from
                // its counter leg to keep the asked price constant.
                "quantity_maker": self.asset(&maker.base_amount, maker.base_decimals, &maker.base_symbol)?,
                "deduct_maker": self.asset(&maker.counter_amount, maker.counter_decimals, &maker.counter_symbol)?,
                "quantity_taker": self.asset(&taker.base_amount, taker.base_decimals, &taker.base_symbol)?,
                "deduct_taker": self.asset(&taker.counter_amount, taker.counter_decimals, &taker.counter_symbol)?,
                "memo": params.memo.as_deref().unwrap_or(""),
            }),
        })
    }
}

fn default_memo(memo: Option<&str>, symbol: &str) -> String {
    match memo {
        Some(memo) if !memo.is_empty() => memo.to_string(),
        // Matches the legacy client, which reused the issuance wording for
        // transfers as well.
        _ => format!("Issue {symbol}"),
    }
}

/// Milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
