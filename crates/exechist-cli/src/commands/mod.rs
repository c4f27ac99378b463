pub mod history;
pub mod outputs;
