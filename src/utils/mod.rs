pub mod crypto;
pub mod degrade;
pub mod time;
pub mod validation;
