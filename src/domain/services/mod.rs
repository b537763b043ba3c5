pub mod session_status;
pub mod token_service;
pub mod verification;
