//! Two-step signup and login.
//!
//! Signup first validates the credentials and asks for an age; only the
//! second request, which carries the age, creates the account. Login first
//! checks the credentials and asks for the auth key; the second request must
//! carry the key issued at signup.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    AccountFlow, LoginOutcome, LoginRequest, RandomSource, SignupOutcome, SignupRequest,
    UserRepository,
};
use crate::domain::user_service::{map_user_repository_error, register_user};
use crate::domain::{AUTH_CODE_LEN, Error, Role, User, UserDraft};

/// Service implementing the [`AccountFlow`] driving port.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
    random: Arc<dyn RandomSource>,
}

impl<R> AccountService<R> {
    pub fn new(users: Arc<R>, random: Arc<dyn RandomSource>) -> Self {
        Self { users, random }
    }
}

impl<R> AccountService<R>
where
    R: UserRepository,
{
    /// First stored account whose username and password both match.
    async fn find_account(&self, username: &str, password: &str) -> Result<User, Error> {
        let candidates = self
            .users
            .find_by_username(username)
            .await
            .map_err(map_user_repository_error)?;
        candidates
            .into_iter()
            .find(|user| user.has_credentials(username, password))
            .ok_or_else(|| Error::unauthorized("invalid username or password"))
    }
}

#[async_trait]
impl<R> AccountFlow for AccountService<R>
where
    R: UserRepository,
{
    async fn signup(&self, request: SignupRequest) -> Result<SignupOutcome, Error> {
        let SignupRequest {
            username,
            password,
            age,
        } = request;
        let draft = UserDraft::try_new(&username, &password, age, Some(Role::User))
            .map_err(Error::from)?;

        if draft.age().is_none() {
            return Ok(SignupOutcome::AgeRequired {
                message: format!(
                    "Welcome, {}! Please enter your age to finish signing up.",
                    draft.username()
                ),
            });
        }

        let user = register_user(self.users.as_ref(), self.random.as_ref(), draft).await?;
        let Some(code) = user.code.clone() else {
            return Err(Error::internal("new account has no auth code"));
        };
        info!(user_id = %user.id, "account created");
        Ok(SignupOutcome::Created {
            message: format!(
                "Account created. Your {AUTH_CODE_LEN}-character auth key is {code}; keep it safe."
            ),
            id: user.id,
            code,
        })
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, Error> {
        let LoginRequest {
            username,
            password,
            auth_key,
        } = request;
        let user = self.find_account(&username, &password).await?;

        let Some(auth_key) = auth_key else {
            return Ok(LoginOutcome::AuthKeyRequired {
                message: format!("Credentials accepted. Enter your {AUTH_CODE_LEN}-character auth key."),
            });
        };

        let key_matches = user
            .code
            .as_ref()
            .is_some_and(|code| code.matches(&auth_key));
        if !key_matches {
            return Err(Error::unauthorized("invalid auth key"));
        }

        info!(user_id = %user.id, "login completed");
        Ok(LoginOutcome::Authenticated {
            message: format!("Congrats, {}! You are logged in.", user.username),
            id: user.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockRandomSource, MockUserRepository};
    use crate::domain::{AuthCode, ErrorCode, UserId};
    use rstest::{fixture, rstest};
    use serde_json::json;

    const CODE: &str = "ZX81AB";

    #[fixture]
    fn stored() -> User {
        let draft = UserDraft::try_new("ada", "lovelace", Some(36), Some(Role::User))
            .expect("draft");
        User::from_draft(UserId::random(), draft, AuthCode::new(CODE).expect("code"))
    }

    fn random() -> Arc<MockRandomSource> {
        let mut random = MockRandomSource::new();
        random
            .expect_auth_code()
            .returning(|| AuthCode::new(CODE).expect("code"));
        Arc::new(random)
    }

    fn repo_with(user: User) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(move |name| Ok(if name == user.username { vec![user.clone()] } else { Vec::new() }));
        repo
    }

    fn login(username: &str, password: &str, auth_key: Option<&str>) -> LoginRequest {
        LoginRequest {
            username: username.to_owned(),
            password: password.to_owned(),
            auth_key: auth_key.map(str::to_owned),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn signup_without_age_stores_nothing() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert().never();
        let service = AccountService::new(Arc::new(repo), random());

        let outcome = service
            .signup(SignupRequest {
                username: "ada".to_owned(),
                password: "pw".to_owned(),
                age: None,
            })
            .await
            .expect("prompt");

        assert!(matches!(outcome, SignupOutcome::AgeRequired { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn signup_with_age_creates_a_user_account() {
        let mut repo = MockUserRepository::new();
        repo.expect_insert()
            .times(1)
            .withf(|user| user.role == Some(Role::User) && user.age == Some(20))
            .return_once(|_| Ok(()));
        let service = AccountService::new(Arc::new(repo), random());

        let outcome = service
            .signup(SignupRequest {
                username: "ada".to_owned(),
                password: "pw".to_owned(),
                age: Some(20),
            })
            .await
            .expect("created");

        let SignupOutcome::Created { code, .. } = outcome else {
            panic!("expected a created account, got {outcome:?}");
        };
        assert_eq!(code.as_ref(), CODE);
    }

    #[rstest]
    #[tokio::test]
    async fn signup_rejects_blank_password() {
        let service = AccountService::new(Arc::new(MockUserRepository::new()), random());
        let err = service
            .signup(SignupRequest {
                username: "ada".to_owned(),
                password: String::new(),
                age: Some(20),
            })
            .await
            .expect_err("invalid");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "password", "code": "invalid_value" }))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn login_without_key_asks_for_it(stored: User) {
        let service = AccountService::new(Arc::new(repo_with(stored)), random());
        let outcome = service.login(login("ada", "lovelace", None)).await.expect("step one");

        assert!(matches!(outcome, LoginOutcome::AuthKeyRequired { .. }));
    }

    #[rstest]
    #[case("ada", "wrong")]
    #[case("grace", "lovelace")]
    #[tokio::test]
    async fn login_rejects_bad_credentials(
        stored: User,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let service = AccountService::new(Arc::new(repo_with(stored)), random());
        let err = service
            .login(login(username, password, None))
            .await
            .expect_err("unauthorized");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn login_with_matching_key_congratulates(stored: User) {
        let expected = stored.id;
        let service = AccountService::new(Arc::new(repo_with(stored)), random());
        let outcome = service
            .login(login("ada", "lovelace", Some(" ZX81AB ")))
            .await
            .expect("authenticated");

        let LoginOutcome::Authenticated { message, id } = outcome else {
            panic!("expected authentication, got {outcome:?}");
        };
        assert!(message.starts_with("Congrats, ada!"));
        assert_eq!(id, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn login_with_wrong_key_is_unauthorized(stored: User) {
        let service = AccountService::new(Arc::new(repo_with(stored)), random());
        let err = service
            .login(login("ada", "lovelace", Some("AAAAAA")))
            .await
            .expect_err("wrong key");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid auth key");
    }
}
