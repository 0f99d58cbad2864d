pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "REVIEWD__AUTH__JWT_SECRET";
    pub const REDIS_HOST_NAME_ENV_VAR: &str = "REVIEWD__REDIS__HOST_NAME";
    pub const POSTMARK_AUTH_TOKEN_ENV_VAR: &str = "REVIEWD__EMAIL_CLIENT__AUTH_TOKEN";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";

    pub mod email_client {
        use std::time::Duration;

        pub const BASE_URL: &str = "https://api.postmarkapp.com/";
        pub const SENDER: &str = "no-reply@reviewd.io";
        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";

    pub mod email_client {
        use std::time::Duration;

        pub const SENDER: &str = "test@email.com";
        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
