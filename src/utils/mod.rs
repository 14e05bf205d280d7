pub mod database;
pub mod mail;
pub mod validation;
