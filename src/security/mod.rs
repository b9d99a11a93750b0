pub mod client;
pub mod recaptcha;
