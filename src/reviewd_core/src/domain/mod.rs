pub mod confirmation_code;
pub mod email;
pub mod role;
pub mod user;
pub mod username;
