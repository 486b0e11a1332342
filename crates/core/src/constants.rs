use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Penalty applied to early withdrawals when a wallet is created without one.
pub const DEFAULT_PENALTY_PERCENTAGE: Decimal = dec!(10.0);

/// Upper bound for `penalty_percentage`.
pub const MAX_PENALTY_PERCENTAGE: Decimal = dec!(100);

/// Decimal precision for derived percentages and penalties
pub const DECIMAL_PRECISION: u32 = 6;
