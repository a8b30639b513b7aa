use rand::distr::Alphanumeric;
use rand::{rng, Rng};
use tap::TapFallible;

use client::client::Client;
use types::domain::AuthRequest;

use crate::domain::TestUser;

pub const PASSWORD: &str = "password";

pub async fn register_user() -> eyre::Result<TestUser> {
    let mut client = Client::new();

    let email = random_email();
    let response = client
        .register(AuthRequest::register(email.clone(), PASSWORD, "Test Merchant"))
        .await
        .tap_err(|e| println!("Error: {:?}", e))?;

    Ok(TestUser {
        user: response.user,
        email,
        password: PASSWORD.to_string(),
        client,
    })
}

pub fn random_email() -> String {
    // generate a random email
    let random_string: String = rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    format!("{}@gmail.com", random_string)
}
