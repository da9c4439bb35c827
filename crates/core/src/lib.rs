//! `bankbranch-core`: domain foundation building blocks.
//!
//! Error taxonomy, identifiers, money and the injected clock. Pure domain
//! primitives only (no IO).

pub mod clock;
pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod value_object;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entity::Entity;
pub use error::{BankError, BankResult};
pub use id::{AccountNumber, BranchCode, EntryId, TaxId};
pub use money::Money;
pub use value_object::ValueObject;
