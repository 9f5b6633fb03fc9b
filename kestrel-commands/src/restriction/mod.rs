pub mod appeal;
pub mod checks;
pub mod commandban;
pub mod commandbans;
pub mod commandmute;
pub mod serverban;
pub mod staff;
