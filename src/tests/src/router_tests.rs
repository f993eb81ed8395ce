//! Tests for routing commands to the token.

use crate::mock::{random_address, tokens, RecordingToken, RemoteCall};
use govtoken_chain::ChainError;
use govtoken_cli::{CliError, CommandRouter, Report};
use govtoken_core::{format_address, BlockPointer, CoreError, TokenAmount};
use tokio::runtime::Runtime;

/// Tests that an unknown command fails without touching the chain.
#[test]
fn test_unknown_command_makes_no_remote_call() {
    let rt = Runtime::new().unwrap();
    let token = RecordingToken::new(random_address());
    let account = format!("{:?}", random_address());

    rt.block_on(async {
        let result = CommandRouter::new(&token).route("frobnicate", &[account.as_str()]).await;
        assert!(matches!(result, Err(CliError::UnknownCommand(name)) if name == "frobnicate"));

        // Lookup is exact
        let result = CommandRouter::new(&token).route("BalanceOf", &[account.as_str()]).await;
        assert!(matches!(result, Err(CliError::UnknownCommand(_))));
    });

    assert!(token.calls().is_empty());
}

/// Tests the argument count check of balanceOf.
#[test]
fn test_balance_of_arity() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let token = RecordingToken::new(random_address()).with_balance(account, tokens("7.25"));
    let hex = format!("{:?}", account);

    rt.block_on(async {
        let router = CommandRouter::new(&token);
        let none: [&str; 0] = [];

        let result = router.route("balanceOf", &none).await;
        assert!(matches!(result, Err(CliError::Arity { expected: 1, actual: 0, .. })));

        let result = router.route("balanceOf", &[hex.as_str(), hex.as_str()]).await;
        assert!(matches!(result, Err(CliError::Arity { expected: 1, actual: 2, .. })));
        assert!(token.calls().is_empty());

        let report = router.route("balanceOf", &[hex.as_str()]).await.unwrap();
        assert_eq!(
            report,
            Report::Balance {
                account,
                balance: TokenAmount::parse("7.25").unwrap(),
            }
        );
        assert_eq!(
            report.to_string(),
            format!("Account {} has 7.25 tokens", format_address(&account))
        );
    });

    assert_eq!(token.calls(), vec![RemoteCall::BalanceOf(account)]);
}

/// Tests minting a decimal amount end to end.
#[test]
fn test_mint_reports_resulting_balance() {
    let rt = Runtime::new().unwrap();
    let to = random_address();
    let token = RecordingToken::new(random_address()).with_balance(to, tokens("1"));
    let hex = format!("{:?}", to);

    let report = rt
        .block_on(CommandRouter::new(&token).route("mint", &[hex.as_str(), "10.5"]))
        .unwrap();

    let units = ethers::types::U256::from_dec_str("10500000000000000000").unwrap();
    let calls = token.calls();
    assert_eq!(calls[0], RemoteCall::Mint(to, units));
    assert!(matches!(calls[1], RemoteCall::Confirm(_)));
    assert_eq!(calls[2], RemoteCall::BalanceOf(to));
    assert_eq!(calls.len(), 3);

    match &report {
        Report::Minted { amount, balance, to: minted_to, block, .. } => {
            assert_eq!(amount.units(), units);
            assert_eq!(balance.format(), "11.5");
            assert_eq!(*minted_to, to);
            assert_eq!(*block, Some(101));
        }
        other => panic!("unexpected report: {:?}", other),
    }

    let text = report.to_string();
    assert!(text.contains(&format!("Minted 10.5 tokens to account {}", format_address(&to))));
    assert!(text.contains(&format!("Account {} has 11.5 tokens", format_address(&to))));
    assert!(text.contains("Tx hash: 0x"));
}

/// Tests that current voting power is rendered as a decimal.
#[test]
fn test_get_votes_formats_decimal() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let units = ethers::types::U256::from_dec_str("2500000000000000000").unwrap();
    let token = RecordingToken::new(random_address()).with_votes(account, units);
    let hex = format!("{:?}", account);

    let report = rt
        .block_on(CommandRouter::new(&token).route("getVotes", &[hex.as_str()]))
        .unwrap();

    match &report {
        Report::Votes { votes, .. } => assert_eq!(votes.to_string(), "2.5"),
        other => panic!("unexpected report: {:?}", other),
    }
    assert!(report.to_string().ends_with("has 2.5 units of voting power"));
    assert_eq!(token.calls(), vec![RemoteCall::GetVotes(account)]);
}

/// Tests that a malformed recipient stops a transfer before submission.
#[test]
fn test_transfer_to_invalid_address_is_not_submitted() {
    let rt = Runtime::new().unwrap();
    let token = RecordingToken::new(random_address());

    let result = rt.block_on(CommandRouter::new(&token).route("transfer", &["0x0", "1"]));

    assert!(matches!(
        result,
        Err(CliError::Invalid(CoreError::InvalidAddress { ref input, .. })) if input == "0x0"
    ));
    assert!(token.calls().is_empty());
}

/// Tests that invalid amounts are rejected before submission.
#[test]
fn test_invalid_amounts_are_not_submitted() {
    let rt = Runtime::new().unwrap();
    let token = RecordingToken::new(random_address());
    let hex = format!("{:?}", random_address());

    rt.block_on(async {
        let router = CommandRouter::new(&token);
        for amount in ["1.2345678901234567890", "-5", "abc"] {
            let result = router.route("mint", &[hex.as_str(), amount]).await;
            assert!(
                matches!(result, Err(CliError::Invalid(CoreError::InvalidAmount { .. }))),
                "{}",
                amount
            );
        }
    });

    assert!(token.calls().is_empty());
}

/// Tests transfers move the balance and report the recipient's balance.
#[test]
fn test_transfer_reports_recipient_balance() {
    let rt = Runtime::new().unwrap();
    let signer = random_address();
    let to = random_address();
    let token = RecordingToken::new(signer).with_balance(signer, tokens("5"));
    let hex = format!("{:?}", to);

    let report = rt
        .block_on(CommandRouter::new(&token).route("transfer", &[hex.as_str(), "1.75"]))
        .unwrap();

    assert_eq!(token.balance(signer), tokens("3.25"));
    match report {
        Report::Transferred { from, to: recipient, amount, balance, .. } => {
            assert_eq!(from, signer);
            assert_eq!(recipient, to);
            assert_eq!(amount.to_string(), "1.75");
            assert_eq!(balance.to_string(), "1.75");
        }
        other => panic!("unexpected report: {:?}", other),
    }
}

/// Tests that delegation reports the power read before submission.
#[test]
fn test_delegate_reports_power_read_before_submission() {
    let rt = Runtime::new().unwrap();
    let signer = random_address();
    let delegatee = random_address();
    let token = RecordingToken::new(signer).with_balance(signer, tokens("40"));
    let hex = format!("{:?}", delegatee);

    let report = rt
        .block_on(CommandRouter::new(&token).route("delegate", &[hex.as_str()]))
        .unwrap();

    let calls = token.calls();
    assert_eq!(calls[0], RemoteCall::BalanceOf(signer));
    assert_eq!(calls[1], RemoteCall::Delegate(delegatee));
    assert!(matches!(calls[2], RemoteCall::Confirm(_)));

    assert!(matches!(
        report,
        Report::Delegated { from, to, votes, .. }
            if from == signer && to == delegatee && votes.to_string() == "40"
    ));
}

/// Tests that a reverted call is reported as such and not followed up.
#[test]
fn test_reverted_mint() {
    let rt = Runtime::new().unwrap();
    let to = random_address();
    let token = RecordingToken::new(random_address()).reverting();
    let hex = format!("{:?}", to);

    let result = rt.block_on(CommandRouter::new(&token).route("mint", &[hex.as_str(), "1"]));

    match result {
        Err(CliError::Chain { invocation, source: ChainError::ExecutionReverted { reason, .. } }) => {
            assert_eq!(invocation, format!("mint {} 1", format_address(&to)));
            assert_eq!(reason, "Ownable: caller is not the owner");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    // No balance read after a revert
    assert_eq!(token.calls().len(), 2);
}

/// Tests deployment reports the created contract.
#[test]
fn test_deploy_token() {
    let rt = Runtime::new().unwrap();
    let token = RecordingToken::new(random_address());
    let none: [&str; 0] = [];

    let report = rt.block_on(CommandRouter::new(&token).route("deployToken", &none)).unwrap();

    assert!(matches!(report, Report::Deployed { address, .. } if address == token.deployed_at()));
    assert!(report
        .to_string()
        .starts_with(&format!("Token contract deployed at {}", format_address(&token.deployed_at()))));
    assert_eq!(token.calls()[0], RemoteCall::Deploy);
}

/// Tests the finality bound of historical vote lookups.
#[test]
fn test_get_past_votes_bound() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let token = RecordingToken::new(random_address()).with_height(100);
    let hex = format!("{:?}", account);

    rt.block_on(async {
        let router = CommandRouter::new(&token);
        for block in ["100", "150"] {
            let result = router.route("getPastVotes", &[hex.as_str(), block]).await;
            assert!(
                matches!(
                    result,
                    Err(CliError::Chain { source: ChainError::InvalidBlock { current: 100, .. }, .. })
                ),
                "{}",
                block
            );
        }
    });
}

/// Tests historical and present voting power are both reported.
#[test]
fn test_get_past_votes_reports_present_power() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let token = RecordingToken::new(random_address())
        .with_height(100)
        .with_past_votes(account, 42, tokens("3"))
        .with_past_votes(account, 99, tokens("8.5"));
    let hex = format!("{:?}", account);

    let report = rt
        .block_on(CommandRouter::new(&token).route("getPastVotes", &[hex.as_str(), "42"]))
        .unwrap();

    assert_eq!(
        report,
        Report::PastVotes {
            account,
            at: BlockPointer::Number(42),
            votes: TokenAmount::parse("3").unwrap(),
            latest_block: 100,
            present: TokenAmount::parse("8.5").unwrap(),
        }
    );
    assert_eq!(
        token.calls(),
        vec![
            RemoteCall::CurrentHeight,
            RemoteCall::GetPastVotes(account, 42),
            RemoteCall::GetPastVotes(account, 99),
        ]
    );

    let text = report.to_string();
    assert!(text.contains("had 3 units of voting power at block 42"));
    assert!(text.contains("has 8.5 units of voting power at latest block 100"));
}

/// Tests that `latest` resolves to the newest final block.
#[test]
fn test_get_past_votes_latest() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let token = RecordingToken::new(random_address())
        .with_height(10)
        .with_past_votes(account, 9, tokens("1"));
    let hex = format!("{:?}", account);

    let report = rt
        .block_on(CommandRouter::new(&token).route("getPastVotes", &[hex.as_str(), "latest"]))
        .unwrap();

    assert!(matches!(
        report,
        Report::PastVotes { at: BlockPointer::Latest, votes, present, .. }
            if votes == present && votes.to_string() == "1"
    ));
}

/// Tests that blocks mined during a lookup do not widen the bound.
#[test]
fn test_get_past_votes_uses_one_head() {
    let rt = Runtime::new().unwrap();
    let account = random_address();
    let hex = format!("{:?}", account);

    rt.block_on(async {
        // The head moves to 101 right after it is read as 100
        let token = RecordingToken::new(random_address()).with_height(100).advancing();
        let result = CommandRouter::new(&token).route("getPastVotes", &[hex.as_str(), "100"]).await;
        assert!(matches!(
            result,
            Err(CliError::Chain {
                source: ChainError::InvalidBlock { requested: 100, current: 100 },
                ..
            })
        ));
        assert_eq!(token.calls(), vec![RemoteCall::CurrentHeight]);

        let token = RecordingToken::new(random_address())
            .with_height(100)
            .advancing()
            .with_past_votes(account, 99, tokens("4"));
        let report = CommandRouter::new(&token)
            .route("getPastVotes", &[hex.as_str(), "latest"])
            .await
            .unwrap();
        assert!(matches!(
            report,
            Report::PastVotes { latest_block: 100, votes, present, .. }
                if votes.to_string() == "4" && present == votes
        ));
        assert_eq!(
            token.calls(),
            vec![
                RemoteCall::CurrentHeight,
                RemoteCall::GetPastVotes(account, 99),
                RemoteCall::GetPastVotes(account, 99),
            ]
        );
    });
}
