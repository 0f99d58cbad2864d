mod helpers;
mod signup;
mod token;
