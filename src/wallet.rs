/// The submission seam between built actions and an external signing wallet.
///
/// The SDK never signs or broadcasts anything itself. A [`WalletClient`]
/// implementation (hardware wallet, key store, test double) carries the
/// signing authorization and performs the actual `transact` call against the
/// chain.
use log::{debug, error};

use crate::actions::{ActionIntent, Authorization};
use crate::errors::TranseosError;
use crate::models::TransactReceipt;

/// Broadcast policy handed to the wallet on every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactOptions {
    pub broadcast: bool,
    /// Tolerated chain-head staleness when picking the reference block.
    pub blocks_behind: u32,
    /// Transaction expiry window in seconds.
    pub expire_seconds: u32,
}

impl Default for TransactOptions {
    fn default() -> Self {
        Self {
            broadcast: true,
            blocks_behind: 3,
            expire_seconds: 60,
        }
    }
}

/// An external wallet capable of signing and broadcasting actions.
pub trait WalletClient {
    /// The signing authorization this wallet holds, if any.
    fn auth(&self) -> Option<&Authorization>;

    /// Sign and broadcast a batch of actions.
    fn transact(
        &self,
        actions: &[ActionIntent],
        options: &TransactOptions,
    ) -> impl std::future::Future<Output = Result<TransactReceipt, TranseosError>> + Send;
}

/// The signing authorization of `wallet`, or the auth error the submit path
/// reports before any intent is built.
pub fn require_auth<W: WalletClient>(wallet: &W) -> Result<&Authorization, TranseosError> {
    wallet.auth().ok_or(TranseosError::MissingAuth)
}

/// Hand a batch of intents to the wallet for signing and broadcast.
///
/// Uses the fixed policy: broadcast immediately, 3 blocks behind, 60-second
/// expiry. Errors from the wallet propagate unchanged after logging.
pub async fn send_actions<W: WalletClient>(
    wallet: &W,
    actions: &[ActionIntent],
) -> Result<TransactReceipt, TranseosError> {
    let options = TransactOptions::default();
    debug!("wallet.send_actions count={}", actions.len());
    match wallet.transact(actions, &options).await {
        Ok(receipt) => {
            debug!(
                "wallet.send_actions success transaction_id={}",
                receipt.transaction_id
            );
            Ok(receipt)
        }
        Err(err) => {
            error!("wallet.send_actions failed: {err}");
            Err(err)
        }
    }
}
