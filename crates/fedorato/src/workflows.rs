pub mod broker_import;
pub mod underwriting;
