//! Command execution against in-memory account aggregates.
//!
//! The pipeline per command: look up the addressed aggregate, let it decide
//! (`handle`), apply every emitted event, log one record per applied event.
//! There is no store and no bus; the map holds current state only.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;

use kassa_accounts::{
    Account, AccountCommand, AccountError, AccountEvent, AccountId, DepositFunds, OpenAccount,
    WithdrawFunds,
};
use kassa_core::{Aggregate, AggregateId};
use kassa_events::Event;

/// Application-level failure when executing an account command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TellerError {
    /// The command addressed an account this teller has never opened.
    #[error("unknown account")]
    UnknownAccount,

    /// The account rejected the command. Display forwards to the domain
    /// error, so contract messages reach callers verbatim.
    #[error(transparent)]
    Account(#[from] AccountError),
}

/// Routes account commands to live aggregates held in memory.
///
/// Each teller instance assumes a single logical caller; concurrent use
/// requires external synchronization.
#[derive(Debug, Default)]
pub struct Teller {
    accounts: HashMap<AccountId, Account>,
}

impl Teller {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
        }
    }

    /// Open a new account with no funds.
    pub fn open_account(&mut self) -> Result<AccountId, TellerError> {
        self.open_account_with_balance(0)
    }

    /// Open a new account holding `initial_balance`.
    ///
    /// The opening balance is recorded as-is (zero and negative included);
    /// only deposits and withdrawals validate amounts.
    pub fn open_account_with_balance(
        &mut self,
        initial_balance: i64,
    ) -> Result<AccountId, TellerError> {
        let account_id = AccountId::new(AggregateId::new());
        self.execute(AccountCommand::Open(OpenAccount {
            account_id,
            initial_balance,
            occurred_at: Utc::now(),
        }))?;
        Ok(account_id)
    }

    /// Deposit `amount` into the account.
    pub fn deposit(&mut self, account_id: AccountId, amount: i64) -> Result<(), TellerError> {
        self.execute(AccountCommand::Deposit(DepositFunds {
            account_id,
            amount,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Withdraw `amount` from the account.
    pub fn withdraw(&mut self, account_id: AccountId, amount: i64) -> Result<(), TellerError> {
        self.execute(AccountCommand::Withdraw(WithdrawFunds {
            account_id,
            amount,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Current balance of the account. Pure read.
    pub fn balance(&self, account_id: AccountId) -> Result<i64, TellerError> {
        let account = self
            .accounts
            .get(&account_id)
            .ok_or(TellerError::UnknownAccount)?;
        Ok(account.balance())
    }

    /// Execute a command against the addressed aggregate and return the
    /// applied events.
    pub fn execute(&mut self, command: AccountCommand) -> Result<Vec<AccountEvent>, TellerError> {
        let account_id = command.account_id();

        let account = match &command {
            AccountCommand::Open(_) => self
                .accounts
                .entry(account_id)
                .or_insert_with(|| Account::empty(account_id)),
            _ => self
                .accounts
                .get_mut(&account_id)
                .ok_or(TellerError::UnknownAccount)?,
        };

        let events = account.handle(&command)?;
        for event in &events {
            account.apply(event);
            tracing::info!(
                account_id = %account_id,
                event_type = event.event_type(),
                "applied account event"
            );
        }

        Ok(events)
    }
}
