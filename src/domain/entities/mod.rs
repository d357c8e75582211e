pub mod signup;
pub mod store_kind;
