//! Compensation log for multi-step factory operations.

use tracing::warn;

use crate::domain::{AccountId, Amount, AssetId, PoolId};
use crate::pools::Pool;
use crate::registry::PoolRegistry;
use crate::traits::Custody;

#[derive(Debug, Clone, Copy)]
enum Movement {
    Pull {
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    Transfer {
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    Wrap {
        pool_account: AccountId,
        payer: AccountId,
        amount: Amount,
    },
}

/// Everything an in-flight operation has changed so far.
///
/// [`unwind`](Self::unwind) reverts it in reverse order.
#[derive(Debug, Default)]
pub(crate) struct Journal {
    moves: Vec<Movement>,
    registered: Option<PoolId>,
    prior: Option<Pool>,
}

impl Journal {
    /// Records a `transfer_in` that spent `from`'s allowance.
    pub(crate) fn pulled(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) {
        self.moves.push(Movement::Pull {
            asset,
            from,
            to,
            amount,
        });
    }

    pub(crate) fn transferred(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) {
        self.moves.push(Movement::Transfer {
            asset,
            from,
            to,
            amount,
        });
    }

    pub(crate) fn wrapped(&mut self, pool_account: AccountId, payer: AccountId, amount: Amount) {
        self.moves.push(Movement::Wrap {
            pool_account,
            payer,
            amount,
        });
    }

    pub(crate) fn registered(&mut self, id: PoolId) {
        self.registered = Some(id);
    }

    /// Records the pool as it was before the operation touched it.
    pub(crate) fn prior(&mut self, pool: Pool) {
        self.prior = Some(pool);
    }

    pub(crate) fn unwind<C: Custody>(self, custody: &mut C, registry: &mut PoolRegistry) {
        if let Some(id) = self.registered {
            if registry.unregister_last(id).is_none() {
                warn!(pool = %id, "registered pool could not be removed");
            }
        }
        if let Some(pool) = self.prior {
            registry.restore(pool);
        }
        for movement in self.moves.into_iter().rev() {
            let undone = match movement {
                Movement::Pull {
                    asset,
                    from,
                    to,
                    amount,
                } => custody.refund_in(asset, from, to, amount),
                Movement::Transfer {
                    asset,
                    from,
                    to,
                    amount,
                } => custody.transfer_out(asset, to, from, amount),
                Movement::Wrap {
                    pool_account,
                    payer,
                    amount,
                } => custody.unwrap_native(pool_account, payer, amount),
            };
            if let Err(err) = undone {
                warn!(?movement, error = %err, "compensating movement failed");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::custody::InMemoryCustody;

    const TOKEN: AssetId = AssetId::from_u128(7);
    const WRAPPED: AssetId = AssetId::from_u128(0xbb);

    #[test]
    fn unwind_refunds_pulls_and_wraps() {
        let caller = AccountId::from_bytes([0xa1; 32]);
        let vault = PoolId::new(1).account();
        let mut custody = InMemoryCustody::new(WRAPPED);
        let Ok(()) = custody.mint(TOKEN, caller, Amount::new(500)) else {
            panic!("mint");
        };
        custody.approve(TOKEN, caller, Amount::new(500));

        let mut journal = Journal::default();
        let Ok(()) = custody.transfer_in(TOKEN, caller, vault, Amount::new(300)) else {
            panic!("transfer");
        };
        journal.pulled(TOKEN, caller, vault, Amount::new(300));
        let Ok(()) = custody.wrap_native(vault, Amount::new(40)) else {
            panic!("wrap");
        };
        journal.wrapped(vault, caller, Amount::new(40));

        let mut registry = PoolRegistry::new();
        journal.unwind(&mut custody, &mut registry);

        assert_eq!(custody.balance_of(TOKEN, caller), Amount::new(500));
        assert_eq!(custody.allowance(TOKEN, caller), Amount::new(500));
        assert_eq!(custody.balance_of(TOKEN, vault), Amount::ZERO);
        assert_eq!(custody.balance_of(WRAPPED, vault), Amount::ZERO);
        assert_eq!(custody.native_balance_of(caller), Amount::new(40));
    }
}
