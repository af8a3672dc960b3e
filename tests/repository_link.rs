//! PostgreSQL link repository tests.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL`.

use sqlx::PgPool;
use std::sync::Arc;

use shortly::domain::entities::{LinkUpdate, NewAccount, NewLink, Role};
use shortly::domain::repositories::{AccountRepository, LinkRepository};
use shortly::error::AppError;
use shortly::infrastructure::persistence::{PgAccountRepository, PgLinkRepository};

async fn create_owner(pool: &Arc<PgPool>, username: &str) -> i64 {
    PgAccountRepository::new(pool.clone())
        .create(NewAccount {
            username: username.to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
        })
        .await
        .unwrap()
        .id
}

fn new_link(original: &str, code: &str, owner_id: i64) -> NewLink {
    NewLink {
        original_link: original.to_string(),
        short_code: code.to_string(),
        owner_id,
    }
}

#[sqlx::test]
async fn test_create_and_find(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(pool);

    let link = repo
        .create(new_link("https://example.com", "abcde", owner))
        .await
        .unwrap();

    assert_eq!(link.owner_id, owner);
    assert_eq!(
        repo.find_by_code("abcde").await.unwrap().unwrap().id,
        link.id
    );
    assert_eq!(
        repo.find_by_id(link.id).await.unwrap().unwrap().short_code,
        "abcde"
    );
    assert!(repo.find_by_code("zzzzz").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_duplicate_code(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(pool);

    repo.create(new_link("https://a.com", "abcde", owner))
        .await
        .unwrap();
    let result = repo.create(new_link("https://b.com", "abcde", owner)).await;

    assert!(matches!(result, Err(AppError::DuplicateCode { .. })));
}

#[sqlx::test]
async fn test_list_with_owners_ordering(pool: PgPool) {
    let pool = Arc::new(pool);
    let alice = create_owner(&pool, "alice").await;
    let bob = create_owner(&pool, "bob").await;
    let repo = PgLinkRepository::new(pool);

    repo.create(new_link("https://b.com", "bbbbb", bob))
        .await
        .unwrap();
    repo.create(new_link("https://a.com", "aaaaa", alice))
        .await
        .unwrap();
    repo.create(new_link("https://a.com", "ccccc", alice))
        .await
        .unwrap();

    let rows = repo.list_with_owners().await.unwrap();
    let codes: Vec<_> = rows.iter().map(|r| r.link.short_code.as_str()).collect();

    assert_eq!(codes, vec!["aaaaa", "ccccc", "bbbbb"]);
    assert_eq!(rows[0].username, "alice");
    assert_eq!(rows[2].username, "bob");
}

#[sqlx::test]
async fn test_update(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(pool);

    let first = repo
        .create(new_link("https://a.com", "aaaaa", owner))
        .await
        .unwrap();
    repo.create(new_link("https://b.com", "bbbbb", owner))
        .await
        .unwrap();

    let updated = repo
        .update(
            first.id,
            LinkUpdate {
                original_link: "https://new.com".to_string(),
                short_code: "fresh".to_string(),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.short_code, "fresh");

    let clash = repo
        .update(
            first.id,
            LinkUpdate {
                original_link: "https://new.com".to_string(),
                short_code: "bbbbb".to_string(),
            },
        )
        .await;
    assert!(matches!(clash, Err(AppError::DuplicateCode { .. })));

    let missing = repo
        .update(
            9999,
            LinkUpdate {
                original_link: "https://x.com".to_string(),
                short_code: "xxxxx".to_string(),
            },
        )
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test]
async fn test_delete_and_count(pool: PgPool) {
    let pool = Arc::new(pool);
    let owner = create_owner(&pool, "alice").await;
    let repo = PgLinkRepository::new(pool);

    let link = repo
        .create(new_link("https://a.com", "aaaaa", owner))
        .await
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    assert!(repo.delete(link.id).await.unwrap());
    assert!(!repo.delete(link.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
}
