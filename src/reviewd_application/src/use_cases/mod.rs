pub mod obtain_token;
pub mod signup;
