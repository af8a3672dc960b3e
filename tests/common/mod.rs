#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{Value, json};
use shortly::application::services::{CredentialService, LinkService, TokenService};
use shortly::domain::entities::{Account, Link, LinkUpdate, NewAccount, NewLink};
use shortly::domain::repositories::{AccountRepository, LinkRepository, LinkWithOwner};
use shortly::error::AppError;
use shortly::routes::api_router;
use shortly::state::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://short.ly";

/// Fast bcrypt cost for tests.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Account store with the same uniqueness rules as the `users` table.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.username == new_account.username) {
            return Err(AppError::DuplicateUsername {
                username: new_account.username,
            });
        }

        let account = Account::new(
            accounts.len() as i64 + 1,
            new_account.username,
            new_account.password_hash,
            new_account.role,
            Utc::now(),
        );
        accounts.push(account.clone());

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        Ok(self.accounts.lock().unwrap().clone())
    }
}

/// Link store with the same uniqueness rules as the `links` table.
///
/// Needs the account store to resolve owner usernames for listings.
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    next_id: Mutex<i64>,
    accounts: Arc<InMemoryAccountRepository>,
}

impl InMemoryLinkRepository {
    pub fn new(accounts: Arc<InMemoryAccountRepository>) -> Self {
        Self {
            links: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            accounts,
        }
    }

    pub fn codes(&self) -> Vec<String> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .map(|l| l.short_code.clone())
            .collect()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_code == new_link.short_code) {
            return Err(AppError::DuplicateCode {
                code: new_link.short_code,
            });
        }

        let mut next_id = self.next_id.lock().unwrap();
        let link = Link::new(
            *next_id,
            new_link.original_link,
            new_link.short_code,
            new_link.owner_id,
            Utc::now(),
        );
        *next_id += 1;
        links.push(link.clone());

        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.lock().unwrap();
        Ok(links.iter().find(|l| l.short_code == code).cloned())
    }

    async fn list_with_owners(&self) -> Result<Vec<LinkWithOwner>, AppError> {
        let accounts = self.accounts.list().await?;
        let mut links = self.links.lock().unwrap().clone();
        links.sort_by_key(|l| (l.owner_id, l.id));

        Ok(links
            .into_iter()
            .filter_map(|link| {
                let username = accounts
                    .iter()
                    .find(|a| a.id == link.owner_id)?
                    .username
                    .clone();
                Some(LinkWithOwner { link, username })
            })
            .collect())
    }

    async fn update(&self, id: i64, update: LinkUpdate) -> Result<Option<Link>, AppError> {
        let mut links = self.links.lock().unwrap();

        if links
            .iter()
            .any(|l| l.id != id && l.short_code == update.short_code)
        {
            return Err(AppError::DuplicateCode {
                code: update.short_code,
            });
        }

        Ok(links.iter_mut().find(|l| l.id == id).map(|link| {
            link.original_link = update.original_link;
            link.short_code = update.short_code;
            link.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|l| l.id != id);
        Ok(links.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.lock().unwrap().len() as i64)
    }
}

/// Link store whose every call fails as if the database were down.
pub struct UnavailableLinkRepository;

#[async_trait]
impl LinkRepository for UnavailableLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn list_with_owners(&self) -> Result<Vec<LinkWithOwner>, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _update: LinkUpdate) -> Result<Option<Link>, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<bool, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }
}

/// Link store whose every call hangs for `delay` before failing.
pub struct StalledLinkRepository {
    pub delay: Duration,
}

#[async_trait]
impl LinkRepository for StalledLinkRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn list_with_owners(&self) -> Result<Vec<LinkWithOwner>, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _id: i64, _update: LinkUpdate) -> Result<Option<Link>, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _id: i64) -> Result<bool, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }

    async fn count(&self) -> Result<i64, AppError> {
        tokio::time::sleep(self.delay).await;
        Err(AppError::from(sqlx::Error::PoolTimedOut))
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
}

pub fn create_test_state(link_repository: Arc<dyn LinkRepository>) -> AppState {
    create_test_state_with_accounts(Arc::new(InMemoryAccountRepository::default()), link_repository)
}

pub fn create_test_state_with_accounts(
    accounts: Arc<InMemoryAccountRepository>,
    link_repository: Arc<dyn LinkRepository>,
) -> AppState {
    let account_repository: Arc<dyn AccountRepository> = accounts;
    let credential_service = Arc::new(CredentialService::with_cost(
        account_repository,
        TEST_BCRYPT_COST,
    ));

    AppState::from_services(
        credential_service,
        Arc::new(TokenService::new(TEST_SECRET)),
        Arc::new(LinkService::new(link_repository, BASE_URL)),
    )
}

pub fn create_test_app() -> TestApp {
    let accounts = Arc::new(InMemoryAccountRepository::default());
    let links = Arc::new(InMemoryLinkRepository::new(accounts.clone()));
    let state = create_test_state_with_accounts(accounts, links.clone());

    let app = api_router(state.clone(), Duration::from_secs(5));
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        state,
        links,
    }
}

pub fn server_for_state(state: AppState) -> TestServer {
    server_with_timeout(state, Duration::from_secs(5))
}

pub fn server_with_timeout(state: AppState, request_timeout: Duration) -> TestServer {
    TestServer::new(api_router(state, request_timeout)).unwrap()
}

/// Signs up an account over HTTP.
pub async fn signup(server: &TestServer, username: &str, password: &str, role: &str) {
    server
        .post("/signup")
        .json(&json!({ "username": username, "password": password, "role": role }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);
}

/// Logs in over HTTP and returns the session token.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    body["token"].as_str().unwrap().to_string()
}

/// Signs up and logs in, returning the token.
pub async fn token_for(server: &TestServer, username: &str, role: &str) -> String {
    let password = format!("{}-password", username);
    signup(server, username, &password, role).await;
    login(server, username, &password).await
}

/// Converts a link as the token holder and returns `(id, short_code)`.
pub async fn convert(app: &TestApp, token: &str, link: &str) -> (i64, String) {
    let response = app
        .server
        .post("/convert")
        .authorization_bearer(token)
        .json(&json!({ "link": link }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let code = body["short_code"].as_str().unwrap().to_string();
    let id = app
        .state
        .link_service
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .flat_map(|owner| owner.links)
        .find(|l| l.short_code == code)
        .map(|l| l.id)
        .unwrap();

    (id, code)
}
