//! Diesel adapters against a real PostgreSQL database.
//!
//! Set `CAFES_TEST_DATABASE_URL` to a disposable database to run these; the
//! tables are truncated before every test. Without it each test prints a skip
//! marker and passes.

#[path = "support/database.rs"]
mod database;

use std::sync::{Mutex, MutexGuard};

use cafe_directory::domain::ports::{
    CafePersistenceError, CafeRepository, ReviewPersistenceError, ReviewRepository,
    UserPersistenceError, UserRepository,
};
use cafe_directory::domain::{
    Amenity, CafeDraft, CafeId, EmailAddress, NewReview, NewUser, PasswordDigest, ReviewText,
    SeatRange, User,
};
use cafe_directory::outbound::persistence::{
    DbPool, DieselCafeRepository, DieselReviewRepository, DieselUserRepository, PoolConfig,
    run_pending_migrations,
};
use diesel::{Connection, PgConnection, RunQueryDsl};
use rstest::rstest;
use database::database_url_or_skip;

static DATABASE: Mutex<()> = Mutex::new(());

struct Repos {
    users: DieselUserRepository,
    cafes: DieselCafeRepository,
    reviews: DieselReviewRepository,
    _guard: MutexGuard<'static, ()>,
}

/// Migrate, truncate and connect; `None` when no database is configured.
async fn repos(test: &str) -> Option<Repos> {
    let url = database_url_or_skip(test)?;
    let guard = DATABASE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    run_pending_migrations(&url).expect("migrations apply");
    let mut conn = PgConnection::establish(&url).expect("connect");
    diesel::sql_query("TRUNCATE reviews, cafe, users RESTART IDENTITY CASCADE")
        .execute(&mut conn)
        .expect("truncate");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool");
    Some(Repos {
        users: DieselUserRepository::new(pool.clone()),
        cafes: DieselCafeRepository::new(pool.clone()),
        reviews: DieselReviewRepository::new(pool),
        _guard: guard,
    })
}

fn new_user(email: &str, name: &str) -> NewUser {
    NewUser {
        email: EmailAddress::new(email).expect("email"),
        name: name.to_owned(),
        city: "London".to_owned(),
        password: PasswordDigest::from_stored("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
    }
}

fn draft(name: &str) -> CafeDraft {
    CafeDraft {
        name: name.to_owned(),
        map_url: "https://maps.example/blue-cup".to_owned(),
        img_url: "https://img.example/blue-cup.jpg".to_owned(),
        location: "Hackney".to_owned(),
        has_wifi: Amenity::Yes,
        has_toilets: Amenity::No,
        has_sockets: Amenity::Yes,
        can_take_calls: Amenity::No,
        seats: SeatRange::TenToTwenty,
        coffee_price: "£2.80".to_owned(),
    }
}

async fn author(repos: &Repos) -> User {
    repos.users.insert(new_user("a@x.com", "Ada")).await.expect("insert user")
}

#[rstest]
#[tokio::test]
async fn users_are_unique_by_email() {
    let Some(repos) = repos("users_are_unique_by_email").await else {
        return;
    };
    let ada = author(&repos).await;
    assert_eq!(ada.id().get(), 1);
    assert_eq!(ada.city(), "London");

    let err = repos
        .users
        .insert(new_user("a@x.com", "Imposter"))
        .await
        .expect_err("duplicate email");
    assert!(matches!(err, UserPersistenceError::Duplicate { .. }));

    let found = repos
        .users
        .find_by_email(ada.email())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found, ada);
    let names = repos.users.find_names(&[ada.id()]).await.expect("names");
    assert_eq!(names.get(&ada.id()).map(String::as_str), Some("Ada"));
}

#[rstest]
#[tokio::test]
async fn cafe_round_trips_and_names_are_unique() {
    let Some(repos) = repos("cafe_round_trips_and_names_are_unique").await else {
        return;
    };
    let ada = author(&repos).await;

    let cafe = repos.cafes.insert(ada.id(), draft("Blue Cup")).await.expect("insert");
    let loaded = repos
        .cafes
        .find_by_id(cafe.id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(loaded.details, draft("Blue Cup"));
    assert_eq!(loaded.author_id, ada.id());

    let err = repos
        .cafes
        .insert(ada.id(), draft("Blue Cup"))
        .await
        .expect_err("duplicate name");
    assert!(matches!(err, CafePersistenceError::Duplicate { .. }));
    assert_eq!(repos.cafes.list_all().await.expect("list").len(), 1);
}

#[rstest]
#[tokio::test]
async fn update_overwrites_and_detects_collisions() {
    let Some(repos) = repos("update_overwrites_and_detects_collisions").await else {
        return;
    };
    let ada = author(&repos).await;
    let first = repos.cafes.insert(ada.id(), draft("Blue Cup")).await.expect("insert");
    let second = repos.cafes.insert(ada.id(), draft("Corner House")).await.expect("insert");

    let mut changed = draft("Corner House Two");
    changed.seats = SeatRange::FiftyPlus;
    let updated = repos
        .cafes
        .update(second.id, changed.clone())
        .await
        .expect("update")
        .expect("present");
    assert_eq!(updated.details, changed);

    let err = repos
        .cafes
        .update(second.id, draft("Blue Cup"))
        .await
        .expect_err("rename collision");
    assert!(matches!(err, CafePersistenceError::Duplicate { .. }));

    let missing = CafeId::new(999).expect("id");
    assert!(repos.cafes.update(missing, draft("Ghost")).await.expect("update").is_none());
    assert!(repos.cafes.find_by_name("Blue Cup").await.expect("lookup").is_some_and(|c| c.id == first.id));
}

#[rstest]
#[tokio::test]
async fn deleting_a_cafe_cascades_to_reviews() {
    let Some(repos) = repos("deleting_a_cafe_cascades_to_reviews").await else {
        return;
    };
    let ada = author(&repos).await;
    let cafe = repos.cafes.insert(ada.id(), draft("Blue Cup")).await.expect("insert");
    let review = repos
        .reviews
        .insert(NewReview {
            cafe_id: cafe.id,
            author_id: ada.id(),
            text: ReviewText::new("<p>Good beans</p>").expect("text"),
        })
        .await
        .expect("insert review");
    assert_eq!(
        repos.reviews.list_for_cafe(cafe.id).await.expect("list"),
        vec![review]
    );

    assert!(repos.cafes.delete(cafe.id).await.expect("delete"));
    assert!(!repos.cafes.delete(cafe.id).await.expect("second delete"));
    assert!(repos.reviews.list_for_cafe(cafe.id).await.expect("list").is_empty());
}

#[rstest]
#[tokio::test]
async fn review_for_missing_cafe_reports_missing_parent() {
    let Some(repos) = repos("review_for_missing_cafe_reports_missing_parent").await else {
        return;
    };
    let ada = author(&repos).await;
    let err = repos
        .reviews
        .insert(NewReview {
            cafe_id: CafeId::new(77).expect("id"),
            author_id: ada.id(),
            text: ReviewText::new("orphan").expect("text"),
        })
        .await
        .expect_err("no parent");
    assert!(matches!(err, ReviewPersistenceError::MissingParent { .. }));
}
