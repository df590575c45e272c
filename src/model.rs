pub mod host;
pub mod output;
