pub mod admin;
pub mod sellers;
