pub mod templates;
pub mod usercases;
