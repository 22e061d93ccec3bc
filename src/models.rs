/// Data models for chain query results.
///
/// Row shapes mirror the contract tables; numeric columns may arrive from the
/// node as JSON numbers or as strings, so they deserialize through a tolerant
/// visitor. Query results are wrapped in [`PaginatedResult`], recomputed on
/// every call and never cached.
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a value that may be a JSON number or a string containing a number.
fn deserialize_string_or_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de;

    struct StringOrU64;
    impl<'de> de::Visitor<'de> for StringOrU64 {
        type Value = u64;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a u64 or a string containing a u64")
        }
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }
        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            v.parse().map_err(de::Error::custom)
        }
    }
    deserializer.deserialize_any(StringOrU64)
}

/// One row of the basic contract's `allowed` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowanceRow {
    pub spender: String,
    /// Approved amount as an asset string, e.g. `"10.0000 TBTC"`.
    pub quantity: String,
}

/// One row of the exchange contract's `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRow {
    #[serde(deserialize_with = "deserialize_string_or_u64")]
    pub key: u64,
    pub user: String,
    pub sender: String,
    /// Offered amount as an asset string.
    pub base: String,
    /// Wanted amount as an asset string.
    pub counter: String,
    pub fees: String,
    #[serde(default)]
    pub memo: String,
    #[serde(deserialize_with = "deserialize_string_or_u64")]
    pub timestamp: u64,
    #[serde(deserialize_with = "deserialize_string_or_u64")]
    pub expires: u64,
}

/// Optional, ANDed filters for [`crate::client::TranseosClient::get_orders`].
#[derive(Debug, Clone, Default)]
pub struct OrderFilters {
    pub user: Option<String>,
    pub sender: Option<String>,
    pub base_symbol: Option<String>,
    pub counter_symbol: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// A paginated page of query results, recomputed per query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResult<T> {
    pub docs: Vec<T>,
    /// Filtered row count before pagination.
    pub total: usize,
    pub limit: usize,
    /// 1-indexed page number.
    pub page: usize,
    pub pages: usize,
}

/// Slice `rows` into a page. A zero or absent `limit` disables pagination and
/// returns every row as a single page; `page` defaults to 1.
pub fn paginate<T>(rows: Vec<T>, page: Option<usize>, limit: Option<usize>) -> PaginatedResult<T> {
    let total = rows.len();
    match limit {
        None | Some(0) => PaginatedResult {
            docs: rows,
            total,
            limit: total,
            page: page.unwrap_or(1).max(1),
            pages: 1,
        },
        Some(limit) => {
            let page = page.unwrap_or(1).max(1);
            let start = (page - 1).saturating_mul(limit).min(total);
            let end = start.saturating_add(limit).min(total);
            let docs = rows.into_iter().skip(start).take(end - start).collect();
            PaginatedResult {
                docs,
                total,
                limit,
                page,
                pages: total.div_ceil(limit),
            }
        }
    }
}

/// The symbol component of an asset string — the second whitespace-separated
/// token of `"<amount> <SYMBOL>"`.
pub fn asset_symbol(asset: &str) -> Option<&str> {
    asset.split_whitespace().nth(1)
}

/// Narrow a list of balance asset strings to one symbol. A `None` filter
/// keeps everything.
pub fn filter_balances(balances: &mut Vec<String>, symbol: Option<&str>) {
    if let Some(symbol) = symbol {
        balances.retain(|balance| asset_symbol(balance) == Some(symbol));
    }
}

/// Narrow allowance rows by spender and by the symbol of the approved
/// quantity. Filters are ANDed; each is optional.
pub fn filter_allowances(
    rows: &mut Vec<AllowanceRow>,
    spender: Option<&str>,
    symbol: Option<&str>,
) {
    if let Some(spender) = spender {
        rows.retain(|row| row.spender == spender);
    }
    if let Some(symbol) = symbol {
        rows.retain(|row| asset_symbol(&row.quantity) == Some(symbol));
    }
}

/// Narrow order rows by user, sender, and the symbols of the base and
/// counter legs. Filters are ANDed; each is optional.
pub fn filter_orders(rows: &mut Vec<OrderRow>, filters: &OrderFilters) {
    if let Some(user) = filters.user.as_deref() {
        rows.retain(|row| row.user == user);
    }
    if let Some(sender) = filters.sender.as_deref() {
        rows.retain(|row| row.sender == sender);
    }
    if let Some(base_symbol) = filters.base_symbol.as_deref() {
        rows.retain(|row| asset_symbol(&row.base) == Some(base_symbol));
    }
    if let Some(counter_symbol) = filters.counter_symbol.as_deref() {
        rows.retain(|row| asset_symbol(&row.counter) == Some(counter_symbol));
    }
}

/// Receipt returned by the wallet client after a broadcast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactReceipt {
    pub transaction_id: String,
    #[serde(default)]
    pub processed: serde_json::Value,
}
