pub mod position;
pub mod rental;
pub mod route;
