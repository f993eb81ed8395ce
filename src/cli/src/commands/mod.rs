//! The command table of the CLI.
//!
//! [`CommandKind`] is the closed set of command names with their declared
//! parameters; [`Command`] is a fully validated invocation. A `Command` value
//! only exists once every argument has been parsed, so nothing half-valid
//! reaches the chain.

pub mod balance;
pub mod delegate;
pub mod deploy;
pub mod mint;
pub mod transfer;
pub mod votes;

use crate::errors::CliError;
use govtoken_core::{format_address, parse_address, Address, BlockPointer, TokenAmount};
use std::fmt;

/// The type of a positional parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    /// A 20-byte hex address
    Address,
    /// A decimal token amount
    Amount,
    /// `latest` or a block height
    Block,
}

impl ParamKind {
    pub fn describe(self) -> &'static str {
        match self {
            ParamKind::Address => "0x-prefixed 20-byte hex address",
            ParamKind::Amount => "decimal token amount, up to 18 fractional digits",
            ParamKind::Block => "block number or 'latest'",
        }
    }
}

/// One positional parameter of a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn param(name: &'static str, kind: ParamKind) -> Param {
    Param { name, kind }
}

const NO_PARAMS: &[Param] = &[];
const TO_AMOUNT: &[Param] = &[param("to", ParamKind::Address), param("amount", ParamKind::Amount)];
const TO: &[Param] = &[param("to", ParamKind::Address)];
const ACCOUNT: &[Param] = &[param("account", ParamKind::Address)];
const ACCOUNT_BLOCK: &[Param] = &[
    param("account", ParamKind::Address),
    param("blockNumber", ParamKind::Block),
];

/// Every command the CLI understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    DeployToken,
    Mint,
    Delegate,
    Transfer,
    BalanceOf,
    GetVotes,
    GetPastVotes,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        CommandKind::DeployToken,
        CommandKind::Mint,
        CommandKind::Delegate,
        CommandKind::Transfer,
        CommandKind::BalanceOf,
        CommandKind::GetVotes,
        CommandKind::GetPastVotes,
    ];

    /// The exact, case-sensitive name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::DeployToken => "deployToken",
            CommandKind::Mint => "mint",
            CommandKind::Delegate => "delegate",
            CommandKind::Transfer => "transfer",
            CommandKind::BalanceOf => "balanceOf",
            CommandKind::GetVotes => "getVotes",
            CommandKind::GetPastVotes => "getPastVotes",
        }
    }

    pub fn params(self) -> &'static [Param] {
        match self {
            CommandKind::DeployToken => NO_PARAMS,
            CommandKind::Mint | CommandKind::Transfer => TO_AMOUNT,
            CommandKind::Delegate => TO,
            CommandKind::BalanceOf | CommandKind::GetVotes => ACCOUNT,
            CommandKind::GetPastVotes => ACCOUNT_BLOCK,
        }
    }

    pub fn arity(self) -> usize {
        self.params().len()
    }

    /// One-line description for the help listing.
    pub fn about(self) -> &'static str {
        match self {
            CommandKind::DeployToken => "Deploy a new token contract and print its address",
            CommandKind::Mint => "Mint tokens to an account",
            CommandKind::Delegate => "Delegate the signer's voting power",
            CommandKind::Transfer => "Transfer tokens from the signer",
            CommandKind::BalanceOf => "Print the token balance of an account",
            CommandKind::GetVotes => "Print the current voting power of an account",
            CommandKind::GetPastVotes => {
                "Print the voting power of an account at a past block and at the latest block"
            }
        }
    }

    /// Progress line printed before a state-changing command runs.
    pub fn progress(self) -> Option<&'static str> {
        match self {
            CommandKind::DeployToken => Some("Deploying token contract..."),
            CommandKind::Mint => Some("Minting tokens..."),
            CommandKind::Delegate => Some("Delegating voting power..."),
            CommandKind::Transfer => Some("Transferring tokens..."),
            _ => None,
        }
    }

    pub fn usage(self) -> String {
        std::iter::once(self.name().to_string())
            .chain(self.params().iter().map(|p| format!("<{}>", p.name)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Looks up a command by its exact name. No abbreviations.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated command with typed arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    DeployToken,
    Mint { to: Address, amount: TokenAmount },
    Delegate { to: Address },
    Transfer { to: Address, amount: TokenAmount },
    BalanceOf { account: Address },
    GetVotes { account: Address },
    GetPastVotes { account: Address, block: BlockPointer },
}

impl Command {
    /// Resolves a command name and its raw arguments.
    ///
    /// Fails on the first problem found: unknown name, then argument count,
    /// then each argument in order.
    pub fn parse<S: AsRef<str>>(name: &str, args: &[S]) -> Result<Self, CliError> {
        let kind = CommandKind::lookup(name).ok_or_else(|| CliError::UnknownCommand(name.to_string()))?;

        if args.len() != kind.arity() {
            return Err(CliError::Arity {
                command: kind.name(),
                expected: kind.arity(),
                actual: args.len(),
                usage: kind.usage(),
            });
        }

        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        let command = match kind {
            CommandKind::DeployToken => Command::DeployToken,
            CommandKind::Mint => Command::Mint {
                to: parse_address(args[0])?,
                amount: TokenAmount::parse(args[1])?,
            },
            CommandKind::Delegate => Command::Delegate {
                to: parse_address(args[0])?,
            },
            CommandKind::Transfer => Command::Transfer {
                to: parse_address(args[0])?,
                amount: TokenAmount::parse(args[1])?,
            },
            CommandKind::BalanceOf => Command::BalanceOf {
                account: parse_address(args[0])?,
            },
            CommandKind::GetVotes => Command::GetVotes {
                account: parse_address(args[0])?,
            },
            CommandKind::GetPastVotes => Command::GetPastVotes {
                account: parse_address(args[0])?,
                block: args[1].parse()?,
            },
        };

        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::DeployToken => CommandKind::DeployToken,
            Command::Mint { .. } => CommandKind::Mint,
            Command::Delegate { .. } => CommandKind::Delegate,
            Command::Transfer { .. } => CommandKind::Transfer,
            Command::BalanceOf { .. } => CommandKind::BalanceOf,
            Command::GetVotes { .. } => CommandKind::GetVotes,
            Command::GetPastVotes { .. } => CommandKind::GetPastVotes,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::DeployToken => write!(f, "deployToken"),
            Command::Mint { to, amount } => write!(f, "mint {} {}", format_address(to), amount),
            Command::Delegate { to } => write!(f, "delegate {}", format_address(to)),
            Command::Transfer { to, amount } => {
                write!(f, "transfer {} {}", format_address(to), amount)
            }
            Command::BalanceOf { account } => write!(f, "balanceOf {}", format_address(account)),
            Command::GetVotes { account } => write!(f, "getVotes {}", format_address(account)),
            Command::GetPastVotes { account, block } => {
                write!(f, "getPastVotes {} {}", format_address(account), block)
            }
        }
    }
}
