pub mod account;
pub mod account_mapping;
pub mod cash_location;
pub mod company;
pub mod counterparty;
pub mod currency;
pub mod debt_receivable;
pub mod debt_summary;
pub mod fixed_asset;

pub use account::Account;
pub use account_mapping::AccountMapping;
pub use cash_location::CashLocation;
pub use company::{Company, Store, UserCompanies};
pub use counterparty::Counterparty;
pub use currency::{CompanyCurrency, Denomination};
pub use debt_receivable::DebtReceivable;
pub use debt_summary::DebtSummary;
pub use fixed_asset::{FixedAsset, NewFixedAsset};
