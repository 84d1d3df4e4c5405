use crate::{
    transaction::{GasFee, Transaction},
    ChainParamsProvider, TransactionError,
};
use tracing::{debug, trace};

impl Transaction {
    /// Fills the unset nonce, fee fields and chain id from `provider`.
    ///
    /// The nonce is looked up for `from`, which must be set. A dynamic fee transaction without
    /// `maxFeePerGas` gets twice the base fee plus its priority fee. On error nothing is filled.
    pub fn fill<P: ChainParamsProvider + ?Sized>(
        &mut self,
        provider: &P,
    ) -> Result<(), TransactionError> {
        let mut filled = self.clone();
        let common = &mut filled.common;

        if common.nonce.is_none() {
            let from = common.from.ok_or(TransactionError::missing(self.tx_type, "from"))?;
            let nonce = provider.nonce(from)?;
            trace!(target: "klay::tx::fill", %from, nonce, "Fetched nonce");
            common.nonce = Some(nonce);
        }

        match &mut common.fee {
            GasFee::GasPrice(price @ None) => *price = Some(provider.gas_price()?),
            GasFee::GasPrice(Some(_)) => {}
            GasFee::Dynamic { max_priority_fee_per_gas, max_fee_per_gas } => {
                let priority_fee = match *max_priority_fee_per_gas {
                    Some(fee) => fee,
                    None => provider.max_priority_fee_per_gas()?,
                };
                *max_priority_fee_per_gas = Some(priority_fee);
                if max_fee_per_gas.is_none() {
                    let base_fee = provider.base_fee_per_gas()?;
                    let max_fee = base_fee
                        .checked_mul(2)
                        .and_then(|fee| fee.checked_add(priority_fee))
                        .ok_or_else(|| TransactionError::invalid("maxFeePerGas", base_fee))?;
                    *max_fee_per_gas = Some(max_fee);
                }
            }
        }

        if common.chain_id.is_none() {
            common.chain_id = Some(provider.chain_id()?);
        }

        debug!(
            target: "klay::tx::fill",
            tx_type = %self.tx_type,
            nonce = ?filled.common.nonce,
            chain_id = ?filled.common.chain_id,
            "Filled transaction"
        );
        *self = filled;
        Ok(())
    }
}
