use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::database::store::{to_fields, Collection, DocumentStore, Query, StoreError};
use crate::error::AuthError;
use crate::models::{account::Account, identity::Identity};
use crate::utils::{crypto, time, validation};

const MIN_PASSWORD_LEN: usize = 6;
const RESET_TOKEN_TTL_MINUTES: i64 = 60;

type AuthResult<T> = std::result::Result<T, AuthError>;

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Provider(err.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
    pub epoch: i64,
}

#[derive(Debug, Clone)]
pub struct SignUp {
    pub identity: Identity,
    /// Raw token for the verification link; only its digest is stored.
    pub verification_token: String,
}

#[derive(Debug, Clone)]
pub struct SignedIn {
    pub identity: Identity,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Email/password auth provider backed by the private `accounts` collection.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn DocumentStore>,
    jwt_secret: Arc<str>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>, jwt_secret: &str, session_ttl_minutes: i64) -> Self {
        Self {
            store,
            jwt_secret: Arc::from(jwt_secret),
            session_ttl: Duration::minutes(session_ttl_minutes.max(1)),
        }
    }

    async fn account(&self, uid: &str) -> AuthResult<Option<Account>> {
        match self.store.get(Collection::Accounts, uid).await? {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    async fn account_by_email(&self, email: &str) -> AuthResult<Option<Account>> {
        let query = Query::new().where_eq("email", normalize_email(email));
        let docs = self.store.query(Collection::Accounts, &query).await?;
        match docs.first() {
            Some(doc) => Ok(Some(doc.decode()?)),
            None => Ok(None),
        }
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<SignUp> {
        let email = normalize_email(email);
        if !validation::is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if self.account_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailInUse);
        }

        let password_hash =
            crypto::hash_password(password).map_err(|e| AuthError::Provider(e.to_string()))?;
        let secret = crypto::generate_one_time_token();
        let account = Account {
            id: String::new(),
            email,
            password_hash,
            display_name: display_name.trim().to_string(),
            email_verified: false,
            verification_token_hash: Some(crypto::digest_token(&secret)),
            reset_token_hash: None,
            reset_expires_at: None,
            session_epoch: 0,
            created_at: time::now(),
        };
        let uid = self
            .store
            .create(Collection::Accounts, to_fields(&account)?)
            .await?;

        info!(
            "Account {} created; email verification pending (delivery handled out of band)",
            uid
        );
        Ok(SignUp {
            verification_token: format!("{}.{}", uid, secret),
            identity: Identity::new(uid),
        })
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignedIn> {
        let account = self
            .account_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;
        let ok = crypto::verify_password(password, &account.password_hash)
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        let expires_at = time::now() + self.session_ttl;
        let claims = SessionClaims {
            sub: account.id.clone(),
            exp: expires_at.timestamp().max(0) as usize,
            epoch: account.session_epoch,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Provider(e.to_string()))?;

        Ok(SignedIn {
            identity: Identity::new(account.id),
            token,
            expires_at,
        })
    }

    /// Revokes every outstanding token of `identity`.
    pub async fn sign_out(&self, identity: &Identity) -> AuthResult<()> {
        let account = self
            .account(identity.uid())
            .await?
            .ok_or(AuthError::InvalidToken)?;
        self.store
            .update(
                Collection::Accounts,
                identity.uid(),
                to_fields(&json!({ "sessionEpoch": account.session_epoch + 1 }))?,
            )
            .await?;
        info!("Identity {} signed out", identity);
        Ok(())
    }

    pub async fn authenticate(&self, token: &str) -> AuthResult<Identity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AuthError::InvalidToken)?;

        let account = self
            .account(&data.claims.sub)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        if account.session_epoch != data.claims.epoch {
            return Err(AuthError::SessionRevoked);
        }
        Ok(Identity::new(account.id))
    }

    pub async fn verify_email(&self, token: &str) -> AuthResult<Identity> {
        let (uid, secret) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let account = self.account(uid).await?.ok_or(AuthError::InvalidToken)?;
        let valid = account
            .verification_token_hash
            .as_deref()
            .map_or(false, |stored| crypto::token_matches(secret, stored));
        if !valid {
            return Err(AuthError::InvalidToken);
        }

        self.store
            .update(
                Collection::Accounts,
                uid,
                to_fields(&json!({ "emailVerified": true, "verificationTokenHash": null }))?,
            )
            .await?;
        Ok(Identity::new(uid))
    }

    /// Records a reset token when the account exists. Callers must respond
    /// identically either way.
    pub async fn request_password_reset(&self, email: &str) -> AuthResult<Option<String>> {
        let Some(account) = self.account_by_email(email).await? else {
            return Ok(None);
        };

        let secret = crypto::generate_one_time_token();
        let expires_at = time::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);
        self.store
            .update(
                Collection::Accounts,
                &account.id,
                to_fields(&json!({
                    "resetTokenHash": crypto::digest_token(&secret),
                    "resetExpiresAt": expires_at,
                }))?,
            )
            .await?;

        info!(
            "Password reset requested for account {}; delivery handled out of band",
            account.id
        );
        Ok(Some(format!("{}.{}", account.id, secret)))
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> AuthResult<()> {
        let (uid, secret) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let account = self.account(uid).await?.ok_or(AuthError::InvalidToken)?;

        let matches = account
            .reset_token_hash
            .as_deref()
            .map_or(false, |stored| crypto::token_matches(secret, stored));
        let fresh = account
            .reset_expires_at
            .map_or(false, |expires| expires > time::now());
        if !matches || !fresh {
            return Err(AuthError::InvalidToken);
        }
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let password_hash =
            crypto::hash_password(new_password).map_err(|e| AuthError::Provider(e.to_string()))?;
        self.store
            .update(
                Collection::Accounts,
                uid,
                to_fields(&json!({
                    "passwordHash": password_hash,
                    "resetTokenHash": null,
                    "resetExpiresAt": null,
                    "sessionEpoch": account.session_epoch + 1,
                }))?,
            )
            .await?;
        info!("Password reset completed for account {}", uid);
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryStore;

    fn service() -> AuthService {
        AuthService::new(Arc::new(MemoryStore::new()), "test_secret_key", 60)
    }

    #[tokio::test]
    async fn sign_up_sign_in_and_authenticate() {
        let auth = service();
        let signup = auth
            .sign_up("Naledi@Example.com", "abc12!", "Naledi Dlamini")
            .await
            .unwrap();

        let session = auth.sign_in("naledi@example.com", "abc12!").await.unwrap();
        assert_eq!(session.identity, signup.identity);
        assert_eq!(auth.authenticate(&session.token).await.unwrap(), signup.identity);
    }

    #[tokio::test]
    async fn provider_errors_map_to_fixed_kinds() {
        let auth = service();
        auth.sign_up("a@b.io", "abc12!", "A B").await.unwrap();

        assert!(matches!(
            auth.sign_up("A@B.io", "abc12!", "A B").await,
            Err(AuthError::EmailInUse)
        ));
        assert!(matches!(
            auth.sign_up("not-an-email", "abc12!", "A B").await,
            Err(AuthError::InvalidEmail)
        ));
        assert!(matches!(
            auth.sign_up("c@d.io", "abc", "C D").await,
            Err(AuthError::WeakPassword)
        ));
        assert!(matches!(
            auth.sign_in("a@b.io", "wrong!1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("nobody@b.io", "abc12!").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn sign_out_revokes_outstanding_tokens() {
        let auth = service();
        auth.sign_up("a@b.io", "abc12!", "A B").await.unwrap();
        let session = auth.sign_in("a@b.io", "abc12!").await.unwrap();

        auth.sign_out(&session.identity).await.unwrap();
        assert!(matches!(
            auth.authenticate(&session.token).await,
            Err(AuthError::SessionRevoked)
        ));

        let fresh = auth.sign_in("a@b.io", "abc12!").await.unwrap();
        assert!(auth.authenticate(&fresh.token).await.is_ok());
    }

    #[tokio::test]
    async fn tokens_signed_with_another_secret_are_rejected() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        let auth = AuthService::new(store.clone(), "secret-one", 60);
        let other = AuthService::new(store, "secret-two", 60);
        auth.sign_up("a@b.io", "abc12!", "A B").await.unwrap();
        let session = auth.sign_in("a@b.io", "abc12!").await.unwrap();

        assert!(matches!(
            other.authenticate(&session.token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn verify_email_accepts_issued_token_once() {
        let auth = service();
        let signup = auth.sign_up("a@b.io", "abc12!", "A B").await.unwrap();

        assert!(auth.verify_email("garbage").await.is_err());
        let identity = auth.verify_email(&signup.verification_token).await.unwrap();
        assert_eq!(identity, signup.identity);
        assert!(auth.verify_email(&signup.verification_token).await.is_err());
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let auth = service();
        auth.sign_up("a@b.io", "abc12!", "A B").await.unwrap();
        let old_session = auth.sign_in("a@b.io", "abc12!").await.unwrap();

        assert!(auth
            .request_password_reset("missing@b.io")
            .await
            .unwrap()
            .is_none());
        let token = auth
            .request_password_reset("a@b.io")
            .await
            .unwrap()
            .expect("reset token");

        assert!(matches!(
            auth.reset_password(&token, "abc").await,
            Err(AuthError::WeakPassword)
        ));
        auth.reset_password(&token, "new12!pw").await.unwrap();

        assert!(auth.authenticate(&old_session.token).await.is_err());
        assert!(auth.sign_in("a@b.io", "abc12!").await.is_err());
        assert!(auth.sign_in("a@b.io", "new12!pw").await.is_ok());
        assert!(auth.reset_password(&token, "other12!").await.is_err());
    }
}
