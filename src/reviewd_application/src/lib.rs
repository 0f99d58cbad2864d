pub mod use_cases;

pub use use_cases::{
    obtain_token::{AttemptPolicy, ObtainTokenError, ObtainTokenUseCase},
    signup::{SignupError, SignupUseCase},
};
