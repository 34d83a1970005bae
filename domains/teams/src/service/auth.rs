//! Account registration and signin

use std::sync::Arc;

use leaderboard_common::{merge, Check, Error, Outcome, RepositoryError, Result};

use super::{provided, TeamsService};
use crate::domain::dto::TokenDto;
use crate::domain::entities::User;
use crate::domain::password::PasswordHasher;
use crate::domain::validation::{is_name_too_short, is_password_too_short, validate_email};

const WRONG_CREDENTIALS: &str = "Wrong combination of email and password, or user does not exist.";

impl TeamsService {
    /// Create an account with a random starting score and return a session token
    pub async fn register(
        &self,
        email: Option<&str>,
        name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Outcome<TokenDto>> {
        const FN: &str = "register";

        let (email, name, password) = (provided(email), provided(name), provided(password));

        let email_exists = match email {
            Some(email) => self.repos.users.find_by_email(email).await?.is_some(),
            None => false,
        };
        let name_exists = match name {
            Some(name) => self.repos.users.find_by_name(name).await?.is_some(),
            None => false,
        };
        let validation = merge([
            self.fail_if::<()>(FN, email_exists, Check::with_code("Email already exists.", 409)),
            self.fail_if(FN, name_exists, Check::with_code("Name already exists.", 409)),
            self.fail_if(
                FN,
                email.is_none() || name.is_none() || password.is_none(),
                Check::new("Email, name and password must be provided."),
            ),
            self.fail_if(
                FN,
                email.is_some_and(|email| !validate_email(email)),
                Check::new("Invalid email format."),
            ),
            self.fail_if(
                FN,
                name.is_some_and(is_name_too_short),
                Check::new("Name must be at least 4 characters long."),
            ),
            self.fail_if(
                FN,
                password.is_some_and(is_password_too_short),
                Check::new("Password must be at least 8 characters long."),
            ),
        ]);
        let (Some(email), Some(name), Some(password), false) =
            (email, name, password, validation.is_error())
        else {
            return Ok(validation.fail());
        };

        let hashed_password = hash_password(self.hasher.clone(), password).await?;
        let user = User::new(email.to_string(), name.to_string(), hashed_password);

        let user = match self.repos.users.create(&user).await {
            Ok(user) => user,
            Err(RepositoryError::AlreadyExists) => {
                let user_created = self.fail_if::<()>(
                    FN,
                    true,
                    Check::with_code("Failed registering user.", 409)
                        .cause("unique constraint on user email or name"),
                );
                return Ok(user_created.fail());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, score = user.score, "User registered");

        Ok(Outcome::ok(self.token_for(&user)?))
    }

    /// Exchange credentials for a session token
    pub async fn signin(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Outcome<TokenDto>> {
        const FN: &str = "signin";

        let (Some(email), Some(password)) = (provided(email), provided(password)) else {
            let params_are_valid =
                self.fail_if::<()>(FN, true, Check::new("Email and password must be provided."));
            return Ok(params_are_valid.fail());
        };

        let Some(user) = self.repos.users.find_by_email(email).await? else {
            let user_exists = self.fail_if::<()>(
                FN,
                true,
                Check::with_code(WRONG_CREDENTIALS, 401).internal("User does not exist.", 404),
            );
            return Ok(user_exists.fail());
        };

        let password_matches =
            verify_password(self.hasher.clone(), password, &user.hashed_password).await?;
        let password_is_valid = self.fail_if::<()>(
            FN,
            !password_matches,
            Check::with_code(WRONG_CREDENTIALS, 401).internal("Bad password.", 401),
        );
        if password_is_valid.is_error() {
            return Ok(password_is_valid.fail());
        }

        Ok(Outcome::ok(self.token_for(&user)?))
    }

    fn token_for(&self, user: &User) -> Result<TokenDto> {
        let token = self
            .auth
            .issue_token(&user.email, &user.name)
            .map_err(|e| Error::Internal(format!("Failed to issue token: {:?}", e)))?;
        Ok(TokenDto { token })
    }
}

/// Argon2 is CPU-bound; keep it off the async workers
async fn hash_password(hasher: Arc<dyn PasswordHasher>, password: &str) -> Result<String> {
    let password = password.to_string();
    let hashed = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))??;
    Ok(hashed)
}

async fn verify_password(
    hasher: Arc<dyn PasswordHasher>,
    password: &str,
    hash: &str,
) -> Result<bool> {
    let (password, hash) = (password.to_string(), hash.to_string());
    tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
        .await
        .map_err(|e| Error::Internal(format!("Password verification task failed: {}", e)))
}
