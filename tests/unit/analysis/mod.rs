pub mod parts;
pub mod purchase;
