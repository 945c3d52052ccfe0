// Local host tests - deliver messages end to end through the store

use seq2_ledger::config::DeployConfig;
use seq2_ledger::host::{HostError, LocalHost};
use seq2_ledger::identity::{Address, Keypair};
use seq2_ledger::ledger::{DustPolicy, GetMethod, LedgerError, QueryValue, SCALE};
use seq2_ledger::message::{InboundMessage, Operation, OutboundKind};
use tempfile::TempDir;

struct Env {
    _dir: TempDir,
    host: LocalHost,
    owner: Address,
    alice: Address,
}

fn deployed(config: DeployConfig) -> Env {
    let dir = TempDir::new().unwrap();
    let mut host = LocalHost::open(dir.path()).unwrap();
    let owner = Keypair::generate().address();
    host.deploy(&config, owner).unwrap();

    Env {
        _dir: dir,
        host,
        owner,
        alice: Keypair::generate().address(),
    }
}

// ============================================================================
// DEPLOYMENT
// ============================================================================

#[test]
fn test_deploy_initial_queries() {
    let env = deployed(DeployConfig::default());

    assert_eq!(env.host.query(&GetMethod::TotalSupply).unwrap(), QueryValue::Amount(0));
    assert_eq!(env.host.query(&GetMethod::Price).unwrap(), QueryValue::Amount(750_000_000));
    assert_eq!(env.host.query(&GetMethod::Owner).unwrap(), QueryValue::Address(env.owner));
    assert_eq!(env.host.query(&GetMethod::Oracle).unwrap(), QueryValue::Address(env.owner));
    assert_eq!(env.host.query(&GetMethod::Frozen).unwrap(), QueryValue::Flag(false));
    assert_eq!(env.host.reserve().unwrap(), 0);
}

#[test]
fn test_query_before_deploy() {
    let dir = TempDir::new().unwrap();
    let host = LocalHost::open(dir.path()).unwrap();

    assert!(matches!(host.query(&GetMethod::Price), Err(HostError::NotDeployed)));
}

// ============================================================================
// RESERVE ACCOUNTING
// ============================================================================

#[test]
fn test_deposit_then_withdraw_moves_reserve() {
    let mut env = deployed(DeployConfig::default());

    let receipt = env.host.deliver(&InboundMessage::deposit(env.alice, 1_500_000_000)).unwrap();
    assert!(receipt.outbound.is_empty());
    assert_eq!(receipt.reserve_after, 1_500_000_000);
    assert_eq!(
        env.host.query(&GetMethod::BalanceOf(env.alice)).unwrap(),
        QueryValue::Amount(2 * SCALE)
    );

    let receipt = env.host.deliver(&InboundMessage::withdraw(env.alice, 2 * SCALE)).unwrap();
    assert_eq!(receipt.outbound.len(), 1);
    assert_eq!(receipt.outbound[0].value, 1_500_000_000);
    assert_eq!(receipt.outbound[0].kind, OutboundKind::Withdrawal);
    assert_eq!(receipt.reserve_after, 0);
    assert_eq!(env.host.query(&GetMethod::TotalSupply).unwrap(), QueryValue::Amount(0));
}

#[test]
fn test_withdraw_after_price_rise_lacks_reserve() {
    let mut env = deployed(DeployConfig::default());
    env.host.deliver(&InboundMessage::deposit(env.alice, 1_500_000_000)).unwrap();
    env.host.deliver(&InboundMessage::set_price(env.owner, 1_500_000_000)).unwrap();

    let result = env.host.deliver(&InboundMessage::withdraw(env.alice, 2 * SCALE));

    assert!(matches!(
        result,
        Err(HostError::Rejected(LedgerError::InsufficientReserve {
            available: 1_500_000_000,
            required: 3_000_000_000
        }))
    ));
    assert_eq!(env.host.reserve().unwrap(), 1_500_000_000);
}

#[test]
fn test_refund_policy_returns_dust() {
    let config = DeployConfig {
        dust_policy: DustPolicy::Refund,
        ..DeployConfig::default()
    };
    let mut env = deployed(config);
    env.host.deliver(&InboundMessage::set_price(env.owner, 7 * SCALE)).unwrap();

    let receipt = env.host.deliver(&InboundMessage::deposit(env.alice, 10)).unwrap();

    assert_eq!(receipt.outbound.len(), 1);
    assert_eq!(receipt.outbound[0].value, 3);
    assert_eq!(receipt.reserve_after, 7);
}

#[test]
fn test_owner_funded_reserve_via_attached_value() {
    let mut env = deployed(DeployConfig::default());
    let msg = InboundMessage::from_operation(env.owner, 1_000, &Operation::SetFreeze { frozen: false });

    let receipt = env.host.deliver(&msg).unwrap();
    assert_eq!(receipt.reserve_after, 1_000);
}

// ============================================================================
// ATOMICITY
// ============================================================================

#[test]
fn test_rejection_changes_nothing() {
    let mut env = deployed(DeployConfig::default());
    env.host.deliver(&InboundMessage::deposit(env.alice, 1_500_000_000)).unwrap();
    let state_before = env.host.state().unwrap();
    let reserve_before = env.host.reserve().unwrap();

    let stranger = Keypair::generate().address();
    let result = env.host.deliver(&InboundMessage::mint(stranger, stranger, 100));

    assert!(matches!(result, Err(HostError::Rejected(LedgerError::NotOwner))));
    assert_eq!(env.host.state().unwrap(), state_before);
    assert_eq!(env.host.reserve().unwrap(), reserve_before);
}

#[test]
fn test_rejected_deposit_bounces_value() {
    let mut env = deployed(DeployConfig::default());
    env.host.deliver(&InboundMessage::set_freeze(env.owner, true)).unwrap();

    let result = env.host.deliver(&InboundMessage::deposit(env.alice, 5_000));

    assert!(matches!(result, Err(HostError::Rejected(LedgerError::Frozen))));
    assert_eq!(env.host.reserve().unwrap(), 0);
}

#[test]
fn test_state_persists_across_hosts() {
    let dir = TempDir::new().unwrap();
    let owner = Keypair::generate().address();
    let alice = Keypair::generate().address();

    {
        let mut host = LocalHost::open(dir.path()).unwrap();
        host.deploy(&DeployConfig::default(), owner).unwrap();
        host.deliver(&InboundMessage::mint(owner, alice, 100)).unwrap();
        host.store().flush().unwrap();
    }

    {
        let host = LocalHost::open(dir.path()).unwrap();
        assert_eq!(
            host.query(&GetMethod::BalanceOf(alice)).unwrap(),
            QueryValue::Amount(100)
        );
    }
}

#[test]
fn test_delivery_durable_without_caller_flush() {
    let dir = TempDir::new().unwrap();
    let owner = Keypair::generate().address();

    {
        let mut host = LocalHost::open(dir.path()).unwrap();
        host.deploy(&DeployConfig::default(), owner).unwrap();
        host.deliver(&InboundMessage::deposit(owner, 1_500_000_000)).unwrap();
    }

    {
        let host = LocalHost::open(dir.path()).unwrap();
        assert_eq!(host.query(&GetMethod::TotalSupply).unwrap(), QueryValue::Amount(2 * SCALE));
        assert_eq!(host.reserve().unwrap(), 1_500_000_000);
    }
}

#[test]
fn test_rejected_error_reports_exit_code() {
    let mut env = deployed(DeployConfig::default());
    let err = env.host.deliver(&InboundMessage::set_price(env.owner, 0)).unwrap_err();

    assert!(err.to_string().contains("exit code 106"));
}
