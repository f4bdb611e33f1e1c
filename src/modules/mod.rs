pub mod auth;
pub mod swap_requests;
pub mod users;
