pub mod aggregate;
pub mod commands;
pub mod contracts;
pub mod error;
pub mod money;
pub mod records;
pub mod session;
pub mod source;
pub mod state;
pub mod view;

pub use aggregate::{AggregateResult, aggregate};
pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{ClientError, ClientResult};
pub use money::{CONVERSION_RATE, Currency, MoneyPair};
pub use records::{Merchant, RawAmount, Transaction, User};
pub use view::{project_transaction_page, project_user_ranking};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
