use log::debug;
use types::error::Error;

use crate::crypto::password::DUMMY_HASH;
use crate::crypto::{hash_password, verify_password, TokenIssuer};
use crate::domain::auth::{AuthSession, UserRecord};
use crate::repository::users::UserRepository;

#[cfg_attr(test, faux::create)]
#[derive(Clone)]
pub struct AuthService {
    user_repository: UserRepository,
    token_issuer: TokenIssuer,
}

#[cfg_attr(test, faux::methods)]
impl AuthService {
    pub fn new(user_repository: UserRepository, token_issuer: TokenIssuer) -> Self {
        AuthService {
            user_repository,
            token_issuer,
        }
    }

    /// Expects an already normalized email.
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> Result<AuthSession, Error> {
        let password_hash = hash_password(&password);
        let user = self
            .user_repository
            .insert_if_absent(name, email, password_hash)
            .await?
            .ok_or(Error::EmailAlreadyExists)?;
        debug!("Registered user {}", user.id);
        self.open_session(user)
    }

    pub async fn login(&self, email: String, password: String) -> Result<AuthSession, Error> {
        let user = self.user_repository.find_by_email(email).await?;
        // unknown emails still pay for one verification
        let stored_hash = user
            .as_ref()
            .map_or(DUMMY_HASH, |user| user.password_hash.as_str());
        let password_matches = verify_password(&password, stored_hash);
        match user {
            Some(user) if password_matches => {
                debug!("User {} logged in", user.id);
                self.open_session(user)
            }
            _ => Err(Error::InvalidEmailOrPassword),
        }
    }

    fn open_session(&self, user: UserRecord) -> Result<AuthSession, Error> {
        let token = self.token_issuer.issue(&user)?;
        Ok(AuthSession { user, token })
    }
}
