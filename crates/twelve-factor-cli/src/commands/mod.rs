pub mod output;
pub mod validate;
