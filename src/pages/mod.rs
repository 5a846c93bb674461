pub mod constellation;
pub mod home;
pub mod not_found;
