// Price engine tests

use seq2_ledger::ledger::{
    price_from_usd, reserve_cost, reserve_for, tokens_for, LedgerError, SCALE,
};

const PRICE: u64 = 750_000_000;

// ============================================================================
// CONVERSIONS
// ============================================================================

#[test]
fn test_tokens_for_scenario_price() {
    // 1.5 coins at 0.75 coins per token buys two whole tokens
    assert_eq!(tokens_for(1_500_000_000, PRICE).unwrap(), 2 * SCALE);
}

#[test]
fn test_tokens_for_one_coin() {
    // 1 / 0.75 = 1.333... tokens, truncated at the ninth decimal
    assert_eq!(tokens_for(1_000_000_000, PRICE).unwrap(), 1_333_333_333);
}

#[test]
fn test_reserve_for_whole_tokens() {
    assert_eq!(reserve_for(2 * SCALE, PRICE).unwrap(), 1_500_000_000);
    assert_eq!(reserve_for(1_000_000, PRICE).unwrap(), 750_000);
}

#[test]
fn test_reserve_for_truncates() {
    assert_eq!(reserve_for(1_333_333_333, PRICE).unwrap(), 999_999_999);
}

#[test]
fn test_zero_amounts_convert_to_zero() {
    assert_eq!(tokens_for(0, PRICE).unwrap(), 0);
    assert_eq!(reserve_for(0, PRICE).unwrap(), 0);
}

#[test]
fn test_zero_price_is_invalid() {
    assert_eq!(tokens_for(10, 0), Err(LedgerError::InvalidPrice));
    assert_eq!(reserve_for(10, 0), Err(LedgerError::InvalidPrice));
    assert_eq!(reserve_cost(10, 0), Err(LedgerError::InvalidPrice));
}

// ============================================================================
// WIDENING
// ============================================================================

#[test]
fn test_large_values_do_not_overflow_intermediate() {
    // u64::MAX * SCALE overflows u64 but not u128
    assert_eq!(tokens_for(u64::MAX, SCALE).unwrap(), u64::MAX);
    assert_eq!(reserve_for(u64::MAX, SCALE).unwrap(), u64::MAX);
}

#[test]
fn test_result_too_large_is_overflow() {
    assert_eq!(tokens_for(u64::MAX, 1), Err(LedgerError::ArithmeticOverflow));
    assert_eq!(reserve_for(u64::MAX, u64::MAX), Err(LedgerError::ArithmeticOverflow));
}

// ============================================================================
// ROUNDING
// ============================================================================

#[test]
fn test_round_trip_never_creates_value() {
    let prices = [1, 7, 999, 750_000_000, SCALE, 3 * SCALE + 1, u64::MAX / 2];
    let amounts = [1, 2, 3, 10, 999, 1_000_000_007, 1_500_000_000, u32::MAX as u64];

    for &p in &prices {
        for &x in &amounts {
            let Ok(tokens) = tokens_for(x, p) else { continue };
            let back = reserve_for(tokens, p).unwrap();
            assert!(back <= x, "price {} amount {} returned {}", p, x, back);
        }
    }
}

#[test]
fn test_cost_never_exceeds_deposit() {
    for &x in &[1u64, 5, 1_000, 1_234_567_891, 1_500_000_000] {
        let tokens = tokens_for(x, PRICE).unwrap();
        let cost = reserve_cost(tokens, PRICE).unwrap();
        assert!(cost <= x);
        assert!(cost >= reserve_for(tokens, PRICE).unwrap());
    }
}

// ============================================================================
// INITIAL PRICE
// ============================================================================

#[test]
fn test_price_from_usd_default() {
    assert_eq!(price_from_usd(150, 200).unwrap(), 750_000_000);
}

#[test]
fn test_price_from_usd_rejects_zero() {
    assert_eq!(price_from_usd(150, 0), Err(LedgerError::InvalidPrice));
    assert_eq!(price_from_usd(0, 200), Err(LedgerError::InvalidPrice));
}
