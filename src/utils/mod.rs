pub mod codes;
pub mod geo;
