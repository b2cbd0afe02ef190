pub mod use_debounce;
pub mod use_otp_timer;

pub use use_debounce::use_debounce;
pub use use_otp_timer::{use_otp_timer, OtpTimer};
