pub mod admin;
pub mod sellers;
pub mod system;
