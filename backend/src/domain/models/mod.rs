pub mod budget;
pub mod expense;
pub mod goal;
pub mod user;
