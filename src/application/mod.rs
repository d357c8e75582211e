pub mod app_error;
pub mod csv_export;
pub mod use_cases;
pub mod validators;
