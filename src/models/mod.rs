pub mod sms;
pub mod weather;
