pub mod health;
pub mod sms;
pub mod simulate;
