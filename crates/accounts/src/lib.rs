//! Account module (deposits, withdrawals, balance queries).
//!
//! Pure domain logic only: no IO, no logging, no persistence concerns.

pub mod account;
pub mod error;

pub use account::{
    Account, AccountCommand, AccountEvent, AccountId, AccountOpened, DepositFunds, FundsDeposited,
    FundsWithdrawn, OpenAccount, WithdrawFunds,
};
pub use error::{AccountError, AccountResult};
