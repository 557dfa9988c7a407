//! Protocol constants for the pool factory.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount, AssetId, Liquidity, PoolId};
use crate::error::AmmError;

/// Deposits must strictly exceed this many minimal units per side.
pub const DEFAULT_MIN_DEPOSIT: Amount = Amount::new(100_000);

/// Units permanently locked in the burn sink when a pool is seeded.
pub const DEFAULT_SEED_BURN: Liquidity = Liquidity::new(10_000);

fn default_min_deposit() -> Amount {
    DEFAULT_MIN_DEPOSIT
}

fn default_seed_burn() -> Liquidity {
    DEFAULT_SEED_BURN
}

/// Immutable parameters of a [`PoolFactory`](crate::factory::PoolFactory).
///
/// # Validation
///
/// - `wrapped_native` must not be the zero id (zero means "native").
/// - `burn_sink` must not be the zero account and must not be a pool
///   custody account.
/// - `0 < seed_burn <= min_deposit`. Every accepted bootstrap deposit
///   mints `⌊√(a·b)⌋ ≥ min(a, b) > min_deposit` units, so the burn can
///   always be covered.
///
/// # Examples
///
/// ```
/// use hydra_factory::config::FactoryConfig;
/// use hydra_factory::domain::{AccountId, AssetId};
///
/// let cfg = FactoryConfig::new(
///     AssetId::from_u128(0xbb),
///     AccountId::from_bytes([0xfa; 32]),
/// ).expect("valid config");
/// assert_eq!(cfg.min_deposit().get(), 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
    wrapped_native: AssetId,
    burn_sink: AccountId,
    #[serde(default = "default_min_deposit")]
    min_deposit: Amount,
    #[serde(default = "default_seed_burn")]
    seed_burn: Liquidity,
}

impl FactoryConfig {
    /// Creates a config with the default deposit floor and seed burn.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn new(wrapped_native: AssetId, burn_sink: AccountId) -> Result<Self, AmmError> {
        let config = Self {
            wrapped_native,
            burn_sink,
            min_deposit: DEFAULT_MIN_DEPOSIT,
            seed_burn: DEFAULT_SEED_BURN,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different deposit floor.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn with_min_deposit(self, min_deposit: Amount) -> Result<Self, AmmError> {
        let config = Self {
            min_deposit,
            ..self
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns a copy with a different seed burn.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn with_seed_burn(self, seed_burn: Liquidity) -> Result<Self, AmmError> {
        let config = Self { seed_burn, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// `min_deposit` and `seed_burn` fall back to their defaults when
    /// absent.
    ///
    /// # Errors
    ///
    /// - [`AmmError::Serialization`] if the document is malformed.
    /// - [`AmmError::InvalidConfiguration`] if validation fails.
    pub fn from_json(json: &str) -> Result<Self, AmmError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] naming the first
    /// violated rule.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.wrapped_native.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "wrapped native asset must not be the zero id",
            ));
        }
        if self.burn_sink.is_zero() {
            return Err(AmmError::InvalidConfiguration(
                "burn sink must not be the zero account",
            ));
        }
        if PoolId::from_account(self.burn_sink).is_some() {
            return Err(AmmError::InvalidConfiguration(
                "burn sink must not be a pool custody account",
            ));
        }
        if self.seed_burn.is_zero() {
            return Err(AmmError::InvalidConfiguration("seed burn must be positive"));
        }
        if self.seed_burn.get() > self.min_deposit.get() {
            return Err(AmmError::InvalidConfiguration(
                "seed burn must not exceed the minimum deposit",
            ));
        }
        Ok(())
    }

    /// The id substituted for the native coin.
    #[must_use]
    pub const fn wrapped_native(&self) -> AssetId {
        self.wrapped_native
    }

    /// The account that holds burned seed units.
    #[must_use]
    pub const fn burn_sink(&self) -> AccountId {
        self.burn_sink
    }

    /// Exclusive lower bound for each creation deposit.
    pub const fn min_deposit(&self) -> Amount {
        self.min_deposit
    }

    /// Units locked at pool creation.
    #[must_use]
    pub const fn seed_burn(&self) -> Liquidity {
        self.seed_burn
    }
}
