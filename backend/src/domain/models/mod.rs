pub mod child;
pub mod reading;
