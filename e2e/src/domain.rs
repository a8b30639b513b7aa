use eyre::Result;

use client::client::Client;
use types::domain::UserView;

use crate::util::register_user;

pub struct TestUser {
    pub user: UserView,
    pub email: String,
    pub password: String,
    pub client: Client,
}

impl TestUser {
    pub async fn new() -> Result<Self> {
        register_user().await
    }
}
