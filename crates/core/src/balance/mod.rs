//! Account balance computation.
//!
//! - `Balanceable` - what a balance computation needs to know about an account
//! - `safe_balance` - subtree totals that tolerate missing price data

pub mod balanceable;
pub mod safe;


pub use balanceable::Balanceable;
pub use safe::safe_balance;
