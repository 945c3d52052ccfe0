// Price engine - fixed-point conversion between reserve units and token units
//
// All conversions multiply in u128 before dividing and round down, so the
// counterparty never receives more than it paid for.

use crate::ledger::error::{LedgerError, LedgerResult};

/// Decimal places of one whole token
pub const DECIMALS: u8 = 9;

/// Token units in one whole token
pub const SCALE: u64 = 1_000_000_000;

/// Reserve nano-units in one whole reserve coin
pub const NANO_PER_COIN: u64 = 1_000_000_000;

fn require_price(price_units: u64) -> LedgerResult<()> {
    if price_units == 0 {
        return Err(LedgerError::InvalidPrice);
    }
    Ok(())
}

fn narrow(value: u128) -> LedgerResult<u64> {
    u64::try_from(value).map_err(|_| LedgerError::ArithmeticOverflow)
}

/// Token units bought by `reserve_amount`: floor(reserve * SCALE / price)
pub fn tokens_for(reserve_amount: u64, price_units: u64) -> LedgerResult<u64> {
    require_price(price_units)?;
    narrow(reserve_amount as u128 * SCALE as u128 / price_units as u128)
}

/// Reserve paid out for `token_amount`: floor(tokens * price / SCALE)
pub fn reserve_for(token_amount: u64, price_units: u64) -> LedgerResult<u64> {
    require_price(price_units)?;
    narrow(token_amount as u128 * price_units as u128 / SCALE as u128)
}

/// Reserve consumed when buying `token_amount`: ceil(tokens * price / SCALE)
///
/// Never exceeds the deposit that produced `token_amount` via [`tokens_for`].
pub fn reserve_cost(token_amount: u64, price_units: u64) -> LedgerResult<u64> {
    require_price(price_units)?;
    let product = token_amount as u128 * price_units as u128;
    narrow(product.div_ceil(SCALE as u128))
}

/// Initial price in reserve nano-units from a USD price and a reserve/USD rate
///
/// Both inputs are in cents: $1.50 at $2.00 per coin gives 750_000_000.
pub fn price_from_usd(price_usd_cents: u64, reserve_usd_cents: u64) -> LedgerResult<u64> {
    if reserve_usd_cents == 0 {
        return Err(LedgerError::InvalidPrice);
    }
    let price = narrow(price_usd_cents as u128 * NANO_PER_COIN as u128 / reserve_usd_cents as u128)?;
    require_price(price)?;
    Ok(price)
}
