//! Share domain entities.

pub mod link;
pub mod mode;
pub mod snapshot;

pub use link::LinkRecord;
pub use mode::ShareMode;
pub use snapshot::{DocumentSnapshot, ExpiryPolicy};
