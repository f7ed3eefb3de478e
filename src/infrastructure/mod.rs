pub mod axum_http;
pub mod pdf;
pub mod postgres;
pub mod smtp;
