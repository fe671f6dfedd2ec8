use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kassa_core::{Aggregate, AggregateId, AggregateRoot};
use kassa_events::Event;

use crate::error::AccountError;

/// Account identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub AggregateId);

impl AccountId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Account.
///
/// A single signed balance in the smallest currency unit. The balance only
/// ever changes through applied events; `handle` validates without mutating,
/// so a rejected command leaves the account exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    balance: i64,
    version: u64,
    opened: bool,
}

impl Account {
    /// Create an empty, not-yet-opened aggregate instance.
    pub fn empty(id: AccountId) -> Self {
        Self {
            id,
            balance: 0,
            version: 0,
            opened: false,
        }
    }

    pub fn id_typed(&self) -> AccountId {
        self.id
    }

    /// Current balance in the smallest currency unit. Pure read.
    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn is_open(&self) -> bool {
        self.opened
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: OpenAccount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAccount {
    pub account_id: AccountId,
    /// Opening balance in the smallest currency unit. Recorded as-is; only
    /// the mutators validate amounts.
    pub initial_balance: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DepositFunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositFunds {
    pub account_id: AccountId,
    /// Amount in the smallest currency unit; must be strictly positive.
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: WithdrawFunds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawFunds {
    pub account_id: AccountId,
    /// Amount in the smallest currency unit; must be strictly positive and
    /// must not exceed the current balance.
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountCommand {
    Open(OpenAccount),
    Deposit(DepositFunds),
    Withdraw(WithdrawFunds),
}

impl AccountCommand {
    /// The account this command is addressed to.
    pub fn account_id(&self) -> AccountId {
        match self {
            AccountCommand::Open(cmd) => cmd.account_id,
            AccountCommand::Deposit(cmd) => cmd.account_id,
            AccountCommand::Withdraw(cmd) => cmd.account_id,
        }
    }
}

/// Event: AccountOpened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOpened {
    pub account_id: AccountId,
    pub initial_balance: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsDeposited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsDeposited {
    pub account_id: AccountId,
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: FundsWithdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundsWithdrawn {
    pub account_id: AccountId,
    pub amount: i64,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountEvent {
    AccountOpened(AccountOpened),
    FundsDeposited(FundsDeposited),
    FundsWithdrawn(FundsWithdrawn),
}

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened(_) => "accounts.account.opened",
            AccountEvent::FundsDeposited(_) => "accounts.account.funds_deposited",
            AccountEvent::FundsWithdrawn(_) => "accounts.account.funds_withdrawn",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::AccountOpened(e) => e.occurred_at,
            AccountEvent::FundsDeposited(e) => e.occurred_at,
            AccountEvent::FundsWithdrawn(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Account {
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = AccountError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            AccountEvent::AccountOpened(e) => {
                self.id = e.account_id;
                self.balance = e.initial_balance;
                self.opened = true;
            }
            AccountEvent::FundsDeposited(e) => {
                self.balance += e.amount;
            }
            AccountEvent::FundsWithdrawn(e) => {
                self.balance -= e.amount;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            AccountCommand::Open(cmd) => self.handle_open(cmd),
            AccountCommand::Deposit(cmd) => self.handle_deposit(cmd),
            AccountCommand::Withdraw(cmd) => self.handle_withdraw(cmd),
        }
    }
}

impl Account {
    fn ensure_account_id(&self, account_id: AccountId) -> Result<(), AccountError> {
        if self.id != account_id {
            return Err(AccountError::IdMismatch);
        }
        Ok(())
    }

    fn handle_open(&self, cmd: &OpenAccount) -> Result<Vec<AccountEvent>, AccountError> {
        if self.opened {
            return Err(AccountError::AlreadyOpen);
        }
        self.ensure_account_id(cmd.account_id)?;

        // The opening balance is not validated: zero and negative values are
        // accepted. Only the mutators guard amounts.
        Ok(vec![AccountEvent::AccountOpened(AccountOpened {
            account_id: cmd.account_id,
            initial_balance: cmd.initial_balance,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_deposit(&self, cmd: &DepositFunds) -> Result<Vec<AccountEvent>, AccountError> {
        if !self.opened {
            return Err(AccountError::NotOpen);
        }
        self.ensure_account_id(cmd.account_id)?;

        if cmd.amount <= 0 {
            return Err(AccountError::InvalidAmount);
        }

        Ok(vec![AccountEvent::FundsDeposited(FundsDeposited {
            account_id: cmd.account_id,
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_withdraw(&self, cmd: &WithdrawFunds) -> Result<Vec<AccountEvent>, AccountError> {
        if !self.opened {
            return Err(AccountError::NotOpen);
        }
        self.ensure_account_id(cmd.account_id)?;

        // The amount check runs before the funds check: a non-positive amount
        // always reports InvalidAmount, never InsufficientFunds.
        if cmd.amount <= 0 {
            return Err(AccountError::InvalidAmount);
        }
        if cmd.amount > self.balance {
            return Err(AccountError::InsufficientFunds);
        }

        Ok(vec![AccountEvent::FundsWithdrawn(FundsWithdrawn {
            account_id: cmd.account_id,
            amount: cmd.amount,
            occurred_at: cmd.occurred_at,
        })])
    }
}
