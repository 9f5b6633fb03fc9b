pub mod unverify;
pub mod verify;
pub mod verifysetup;
