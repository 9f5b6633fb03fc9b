pub mod aimodel;
pub mod aitoggle;
pub mod ask;
pub mod imagine;
