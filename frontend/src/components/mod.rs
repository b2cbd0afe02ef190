pub mod header;
pub mod otp_input;
pub mod otp_verification;
pub mod resend_otp;
pub mod text_input;
