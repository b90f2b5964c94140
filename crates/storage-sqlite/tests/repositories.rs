//! Integration tests for the Diesel repositories on a throwaway database.

use std::sync::Arc;

use tempfile::TempDir;
use uuid::Uuid;

use folio_core::auth::{NewUser, UserRepositoryTrait};
use folio_core::errors::{DatabaseError, Error};
use folio_core::portfolio::{
    NewAsset, NewPortfolio, Portfolio, PortfolioRepositoryTrait, PortfolioUpdate,
};
use folio_core::utils::pagination::PaginationRequest;
use folio_storage_sqlite::portfolio::PortfolioRepository;
use folio_storage_sqlite::users::UserRepository;
use folio_storage_sqlite::{create_pool, run_migrations, spawn_writer};

struct TestDb {
    // Held so the database file outlives the repositories.
    _dir: TempDir,
    users: UserRepository,
    portfolios: PortfolioRepository,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("folio-test.db");
    let pool = create_pool(db_path.to_str().unwrap()).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer(pool.clone()).unwrap();

    TestDb {
        _dir: dir,
        users: UserRepository::new(pool.clone(), writer.clone()),
        portfolios: PortfolioRepository::new(pool, writer),
    }
}

async fn create_user(db: &TestDb, email: &str) -> Uuid {
    db.users
        .create_user(NewUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake-hash".to_string(),
        })
        .await
        .unwrap()
        .id
}

async fn create_portfolio(db: &TestDb, owner_id: Uuid, name: &str) -> Portfolio {
    db.portfolios
        .create_portfolio(
            owner_id,
            NewPortfolio {
                name: name.to_string(),
            },
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn duplicate_email_hits_the_unique_constraint() {
    let db = setup();
    create_user(&db, "ada@example.com").await;

    let err = db
        .users
        .create_user(NewUser {
            email: "ada@example.com".to_string(),
            password_hash: "$argon2id$other".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Database(DatabaseError::UniqueViolation(_))
    ));
}

#[tokio::test]
async fn user_lookup_by_email_and_id() {
    let db = setup();
    let user_id = create_user(&db, "ada@example.com").await;

    let by_email = db.users.get_by_email("ada@example.com").unwrap().unwrap();
    assert_eq!(by_email.id, user_id);
    assert_eq!(by_email.password_hash, "$argon2id$fake-hash");

    let by_id = db.users.get_by_id(user_id).unwrap().unwrap();
    assert_eq!(by_id.email, "ada@example.com");

    assert!(db.users.get_by_email("nobody@example.com").unwrap().is_none());
    assert!(db.users.get_by_id(Uuid::new_v4()).unwrap().is_none());
}

#[tokio::test]
async fn pagination_returns_newest_first_with_exact_page_math() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    for i in 1..=10 {
        create_portfolio(&db, owner_id, &format!("portfolio-{i}")).await;
    }

    let (page_one, meta) = db
        .portfolios
        .list_portfolios(owner_id, &PaginationRequest::new(1, 5))
        .unwrap();
    assert_eq!(meta.total_items, 10);
    assert_eq!(meta.total_pages, 2);
    assert_eq!(meta.current_page, 1);
    assert_eq!(
        page_one.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec![
            "portfolio-10",
            "portfolio-9",
            "portfolio-8",
            "portfolio-7",
            "portfolio-6"
        ]
    );

    let (page_two, _) = db
        .portfolios
        .list_portfolios(owner_id, &PaginationRequest::new(2, 5))
        .unwrap();
    assert_eq!(
        page_two.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
        vec![
            "portfolio-5",
            "portfolio-4",
            "portfolio-3",
            "portfolio-2",
            "portfolio-1"
        ]
    );
}

#[tokio::test]
async fn empty_listing_reports_zero_pages() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;

    let (items, meta) = db
        .portfolios
        .list_portfolios(owner_id, &PaginationRequest::new(1, 20))
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(meta.total_items, 0);
    assert_eq!(meta.total_pages, 0);
}

#[tokio::test]
async fn wrong_owner_is_indistinguishable_from_not_found() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    let intruder_id = create_user(&db, "eve@example.com").await;
    let portfolio = create_portfolio(&db, owner_id, "savings").await;
    let missing_id = portfolio.id + 1000;

    // get
    assert_eq!(
        db.portfolios.get_portfolio(intruder_id, portfolio.id).unwrap(),
        db.portfolios.get_portfolio(owner_id, missing_id).unwrap()
    );

    // update
    let update = PortfolioUpdate {
        name: Some("hijacked".to_string()),
    };
    assert!(db
        .portfolios
        .update_portfolio(intruder_id, portfolio.id, update.clone())
        .await
        .unwrap()
        .is_none());
    assert!(db
        .portfolios
        .update_portfolio(owner_id, missing_id, update)
        .await
        .unwrap()
        .is_none());

    // delete
    assert!(!db
        .portfolios
        .delete_portfolio(intruder_id, portfolio.id)
        .await
        .unwrap());
    assert!(!db
        .portfolios
        .delete_portfolio(owner_id, missing_id)
        .await
        .unwrap());

    // The owner still sees an untouched portfolio.
    let unchanged = db
        .portfolios
        .get_portfolio(owner_id, portfolio.id)
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.name, "savings");
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_alone() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    let portfolio = create_portfolio(&db, owner_id, "savings").await;

    let untouched = db
        .portfolios
        .update_portfolio(owner_id, portfolio.id, PortfolioUpdate { name: None })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(untouched.name, "savings");

    let renamed = db
        .portfolios
        .update_portfolio(
            owner_id,
            portfolio.id,
            PortfolioUpdate {
                name: Some("retirement".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "retirement");
    assert_eq!(renamed.id, portfolio.id);
}

#[tokio::test]
async fn deleting_a_portfolio_cascades_to_its_assets() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    let portfolio = create_portfolio(&db, owner_id, "savings").await;
    for symbol in ["BTC", "ETH", "xyz"] {
        db.portfolios
            .create_asset(
                portfolio.id,
                NewAsset {
                    symbol: symbol.to_string(),
                    quantity: 1.5,
                },
            )
            .await
            .unwrap();
    }
    assert_eq!(db.portfolios.list_assets(portfolio.id).unwrap().len(), 3);

    assert!(db
        .portfolios
        .delete_portfolio(owner_id, portfolio.id)
        .await
        .unwrap());

    assert!(db.portfolios.list_assets(portfolio.id).unwrap().is_empty());
    let (items, meta) = db
        .portfolios
        .list_assets_paginated(portfolio.id, &PaginationRequest::new(1, 20))
        .unwrap();
    assert!(items.is_empty());
    assert_eq!(meta.total_items, 0);
}

#[tokio::test]
async fn assets_list_in_insertion_order_for_valuation() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    let portfolio = create_portfolio(&db, owner_id, "savings").await;
    for symbol in ["BTC", "ETH", "AAPL"] {
        db.portfolios
            .create_asset(
                portfolio.id,
                NewAsset {
                    symbol: symbol.to_string(),
                    quantity: 1.0,
                },
            )
            .await
            .unwrap();
    }

    let assets = db.portfolios.list_assets(portfolio.id).unwrap();
    assert_eq!(
        assets.iter().map(|a| a.symbol.as_str()).collect::<Vec<_>>(),
        vec!["BTC", "ETH", "AAPL"]
    );
    // Stored symbols keep their original case.
    db.portfolios
        .create_asset(
            portfolio.id,
            NewAsset {
                symbol: " btc ".to_string(),
                quantity: 1.0,
            },
        )
        .await
        .unwrap();
    let assets = db.portfolios.list_assets(portfolio.id).unwrap();
    assert_eq!(assets.last().unwrap().symbol, " btc ");
}

#[tokio::test]
async fn orphan_asset_creation_is_a_foreign_key_violation() {
    let db = setup();

    let err = db
        .portfolios
        .create_asset(
            424242,
            NewAsset {
                symbol: "BTC".to_string(),
                quantity: 1.0,
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Database(DatabaseError::ForeignKeyViolation(_))
    ));
}

#[tokio::test]
async fn delete_asset_reports_whether_a_row_matched() {
    let db = setup();
    let owner_id = create_user(&db, "ada@example.com").await;
    let portfolio = create_portfolio(&db, owner_id, "savings").await;
    let asset = db
        .portfolios
        .create_asset(
            portfolio.id,
            NewAsset {
                symbol: "BTC".to_string(),
                quantity: 1.0,
            },
        )
        .await
        .unwrap();

    assert!(db.portfolios.delete_asset(asset.id).await.unwrap());
    assert!(!db.portfolios.delete_asset(asset.id).await.unwrap());
}

#[tokio::test]
async fn repositories_share_the_pool_behind_arcs() {
    // Services hold repositories as Arc<dyn Trait>; make sure the concrete
    // types satisfy the object-safe traits.
    let db = setup();
    let users: Arc<dyn UserRepositoryTrait> = Arc::new(db.users);
    let portfolios: Arc<dyn PortfolioRepositoryTrait> = Arc::new(db.portfolios);

    assert!(users.ping().is_ok());
    assert!(portfolios.ping().is_ok());
}
