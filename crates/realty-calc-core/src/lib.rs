//! Financial calculators for real-estate agents: installment plans, annuity
//! mortgages with program comparison, and short-term rental yield.
//!
//! Currency amounts are whole units held as [`Money`] (`i64`); every derived
//! amount is an exact decimal value truncated toward zero. Percentages are
//! [`Percent`] (`Decimal`) in percent units, so `30` means 30%.
//!
//! Two conventions are contracts rather than shortcuts:
//!
//! - an unknown mortgage program key is computed under the standard program
//!   (see [`mortgage::ProgramKey::parse_lenient`]), never rejected;
//! - a rental that never recovers its price reports a payback of
//!   [`roi::PAYBACK_NEVER`] (999 years), never an error or infinity.

pub mod deposit;
pub mod error;
pub mod format;
pub mod installment;
pub mod money;
pub mod mortgage;
pub mod parse;
pub mod roi;
pub mod types;

pub use error::CalcError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
