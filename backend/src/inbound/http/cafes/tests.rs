//! Tests for café handlers over the in-memory store.

use super::*;
use crate::domain::ports::{CafeRepository, ReviewRepository, UserRepository};
use crate::domain::{
    Amenity, CafeDraft, EmailAddress, NewUser, PasswordDigest, SeatRange, UserId,
};
use crate::inbound::http::routes::configure;
use crate::inbound::http::test_utils::{
    CapturedLogs, TestBrowser, location, memory_state, test_session_middleware,
};
use crate::outbound::memory::InMemoryStore;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use actix_web::{App, test as actix_test};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

async fn login_as(session: SessionContext, path: web::Path<i32>) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner())
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    session.persist_user(id)?;
    Ok(HttpResponse::Ok().finish())
}

async fn seed_user(store: &InMemoryStore, name: &str) -> UserId {
    let user = UserRepository::insert(
        store,
        NewUser {
            email: EmailAddress::new(format!("{}@x.com", name.to_lowercase())).expect("email"),
            name: name.to_owned(),
            city: "London".to_owned(),
            password: PasswordDigest::from_stored("$argon2id$stub"),
        },
    )
    .await
    .expect("seed user");
    user.id()
}

fn draft(name: &str) -> CafeDraft {
    CafeDraft {
        name: name.to_owned(),
        map_url: "https://maps.example/cafe".to_owned(),
        img_url: "https://img.example/cafe.jpg".to_owned(),
        location: "Shoreditch".to_owned(),
        has_wifi: Amenity::No,
        has_toilets: Amenity::Yes,
        has_sockets: Amenity::No,
        can_take_calls: Amenity::Yes,
        seats: SeatRange::UpToTen,
        coffee_price: "£3.10".to_owned(),
    }
}

async fn seed_cafe(store: &InMemoryStore, author: UserId, name: &str) -> CafeId {
    CafeRepository::insert(store, author, draft(name))
        .await
        .expect("seed cafe")
        .id
}

fn blue_cup_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Blue Cup"),
        ("map_url", "https://maps.example/blue-cup"),
        ("img_url", "https://img.example/blue-cup.jpg"),
        ("location", "Hackney"),
        ("wifi", "Yes"),
        ("toilet", "No"),
        ("sockets", "Yes"),
        ("seats", "10-20"),
        ("calls", "No"),
        ("price", "£2.80"),
    ]
}

struct Fixture {
    store: Arc<InMemoryStore>,
    admin: UserId,
    member: UserId,
}

async fn fixture() -> (
    TestBrowser<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
    Fixture,
) {
    let (state, store) = memory_state();
    let admin = seed_user(&store, "Ada").await;
    let member = seed_user(&store, "Grace").await;
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .configure(configure)
            .route("/test/login/{id}", web::get().to(login_as)),
    )
    .await;
    (TestBrowser::new(app), Fixture { store, admin, member })
}

macro_rules! log_in {
    ($browser:expr, $id:expr) => {{
        let response = $browser
            .send(TestRequest::get().uri(&format!("/test/login/{}", $id)))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
    }};
}

#[rstest]
#[actix_web::test]
async fn anonymous_visitors_can_list_cafes() {
    let (mut browser, fx) = fixture().await;
    seed_cafe(&fx.store, fx.admin, "Corner House").await;

    let view = browser.view("/").await;
    assert_eq!(view["currentUser"], Value::Null);
    assert_eq!(view["notices"], json!([]));
    assert_eq!(view["cafes"][0]["name"], "Corner House");
    assert_eq!(view["cafes"][0]["seats"], "0-10");
}

#[rstest]
#[actix_web::test]
async fn added_cafe_round_trips_its_amenities() {
    let (mut browser, fx) = fixture().await;
    log_in!(browser, fx.member);

    let response = browser
        .send(TestRequest::post().uri("/add").set_form(blue_cup_form()))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/"));

    let list = browser.view("/").await;
    assert_eq!(list["notices"], json!([CAFE_ADDED_NOTICE]));
    let id = list["cafes"][0]["id"].as_i64().expect("cafe id");

    let detail = browser.view(&format!("/cafe/{id}")).await;
    let cafe = &detail["cafe"];
    assert_eq!(cafe["name"], "Blue Cup");
    assert_eq!(cafe["hasWifi"], "Yes");
    assert_eq!(cafe["hasToilets"], "No");
    assert_eq!(cafe["hasSockets"], "Yes");
    assert_eq!(cafe["canTakeCalls"], "No");
    assert_eq!(cafe["seats"], "10-20");
    assert_eq!(cafe["coffeePrice"], "£2.80");
    assert_eq!(cafe["authorName"], "Grace");
    assert_eq!(detail["canEdit"], true);
    assert_eq!(detail["canDelete"], false);
}

#[rstest]
#[actix_web::test]
async fn duplicate_name_redirects_back_to_add() {
    let (mut browser, fx) = fixture().await;
    seed_cafe(&fx.store, fx.admin, "Blue Cup").await;
    log_in!(browser, fx.member);

    let response = browser
        .send(TestRequest::post().uri("/add").set_form(blue_cup_form()))
        .await;
    assert_eq!(location(&response), Some("/add"));

    let page = browser.view("/add").await;
    assert_eq!(page["notices"], json!([CAFE_EXISTS_NOTICE]));
    assert_eq!(page["form"], Value::Null);
    assert_eq!(page["choices"]["seats"], json!(["0-10", "10-20", "20-30", "30-40", "50+"]));
    assert_eq!(CafeRepository::list_all(fx.store.as_ref()).await.expect("list").len(), 1);
}

#[rstest]
#[case("/add")]
#[case("/edit-cafe/1")]
#[actix_web::test]
async fn anonymous_form_pages_redirect_to_login(#[case] uri: &str) {
    let (mut browser, fx) = fixture().await;
    seed_cafe(&fx.store, fx.admin, "Corner House").await;

    let response = browser.send(TestRequest::get().uri(uri)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/login"));
    let login = browser.view("/login").await;
    assert_eq!(login["notices"], json!([LOGIN_REQUIRED_NOTICE]));
}

#[rstest]
#[actix_web::test]
async fn anonymous_add_writes_nothing() {
    let (mut browser, fx) = fixture().await;
    let response = browser
        .send(TestRequest::post().uri("/add").set_form(blue_cup_form()))
        .await;
    assert_eq!(location(&response), Some("/login"));
    assert!(CafeRepository::list_all(fx.store.as_ref()).await.expect("list").is_empty());
}

#[rstest]
#[actix_web::test]
async fn invalid_cafe_form_is_rejected_with_field_details() {
    let (mut browser, fx) = fixture().await;
    log_in!(browser, fx.member);

    let mut form = blue_cup_form();
    form.retain(|(field, _)| *field != "location");
    form.push(("wifi", "Sometimes"));
    let form: Vec<_> = form.into_iter().filter(|pair| *pair != ("wifi", "Yes")).collect();
    let response = browser.send(TestRequest::post().uri("/add").set_form(form)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(body["details"]["fields"]["location"].is_array());
    assert!(body["details"]["fields"]["wifi"].is_array());
    assert!(CafeRepository::list_all(fx.store.as_ref()).await.expect("list").is_empty());
}

#[rstest]
#[case("/cafe/99")]
#[case("/cafe/0")]
#[case("/cafe/not-a-number")]
#[actix_web::test]
async fn missing_cafe_is_not_found(#[case] uri: &str) {
    let (mut browser, _) = fixture().await;
    let response = browser.send(TestRequest::get().uri(uri)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn anonymous_review_redirects_without_writing() {
    let (mut browser, fx) = fixture().await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;

    let response = browser
        .send(
            TestRequest::post()
                .uri(&format!("/cafe/{id}"))
                .set_form([("review_text", "<p>Lovely</p>")]),
        )
        .await;
    assert_eq!(location(&response), Some("/login"));
    let login = browser.view("/login").await;
    assert_eq!(login["notices"], json!([REVIEW_LOGIN_NOTICE]));
    let reviews = ReviewRepository::list_for_cafe(fx.store.as_ref(), id)
        .await
        .expect("reviews");
    assert!(reviews.is_empty());
}

#[rstest]
#[actix_web::test]
async fn review_is_listed_with_its_author() {
    let (mut browser, fx) = fixture().await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;
    log_in!(browser, fx.member);

    let response = browser
        .send(
            TestRequest::post()
                .uri(&format!("/cafe/{id}"))
                .set_form([("review_text", "<p>Great <b>flat white</b></p>")]),
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some(format!("/cafe/{id}").as_str()));

    let detail = browser.view(&format!("/cafe/{id}")).await;
    assert_eq!(detail["cafe"]["authorName"], "Ada");
    assert_eq!(detail["reviews"][0]["text"], "<p>Great <b>flat white</b></p>");
    assert_eq!(detail["reviews"][0]["authorName"], "Grace");
}

#[rstest]
#[actix_web::test]
async fn review_on_missing_cafe_is_not_found() {
    let (mut browser, fx) = fixture().await;
    log_in!(browser, fx.member);
    let response = browser
        .send(TestRequest::post().uri("/cafe/42").set_form([("review_text", "hi")]))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn any_member_may_edit_any_cafe() {
    let (mut browser, fx) = fixture().await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;
    log_in!(browser, fx.member);

    let page = browser.view(&format!("/edit-cafe/{id}")).await;
    assert_eq!(page["form"]["name"], "Corner House");

    let mut form = blue_cup_form();
    form[0] = ("name", "Corner House Two");
    let response = browser
        .send(TestRequest::post().uri(&format!("/edit-cafe/{id}")).set_form(form))
        .await;
    assert_eq!(location(&response), Some(format!("/cafe/{id}").as_str()));

    let cafe = CafeRepository::find_by_id(fx.store.as_ref(), id)
        .await
        .expect("lookup")
        .expect("still present");
    assert_eq!(cafe.name(), "Corner House Two");
    assert_eq!(cafe.details.seats, SeatRange::TenToTwenty);
    assert_eq!(cafe.author_id, fx.admin);
}

#[rstest]
#[actix_web::test]
async fn renaming_onto_another_cafe_is_a_conflict() {
    let (mut browser, fx) = fixture().await;
    seed_cafe(&fx.store, fx.admin, "Blue Cup").await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;
    log_in!(browser, fx.member);

    let response = browser
        .send(TestRequest::post().uri(&format!("/edit-cafe/{id}")).set_form(blue_cup_form()))
        .await;
    assert_eq!(location(&response), Some(format!("/edit-cafe/{id}").as_str()));
    let page = browser.view(&format!("/edit-cafe/{id}")).await;
    assert_eq!(page["notices"], json!([CAFE_EXISTS_NOTICE]));
    assert_eq!(page["form"]["name"], "Corner House");
}

#[rstest]
#[actix_web::test]
async fn editing_missing_cafe_is_not_found() {
    let (mut browser, fx) = fixture().await;
    log_in!(browser, fx.member);
    let response = browser
        .send(TestRequest::post().uri("/edit-cafe/77").set_form(blue_cup_form()))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(None)]
#[case(Some(2))]
#[actix_web::test]
async fn only_the_admin_may_delete(#[case] login: Option<i32>) {
    let (mut browser, fx) = fixture().await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;
    if let Some(user) = login {
        log_in!(browser, user);
    }

    let response = browser.send(TestRequest::get().uri(&format!("/delete/{id}"))).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let list = browser.view("/").await;
    assert_eq!(list["cafes"][0]["name"], "Corner House");
}

#[rstest]
#[actix_web::test]
async fn admin_delete_removes_cafe_and_reviews() {
    let (mut browser, fx) = fixture().await;
    let id = seed_cafe(&fx.store, fx.admin, "Corner House").await;
    log_in!(browser, fx.member);
    browser
        .send(TestRequest::post().uri(&format!("/cafe/{id}")).set_form([("review_text", "ok")]))
        .await;
    log_in!(browser, fx.admin);

    let detail = browser.view(&format!("/cafe/{id}")).await;
    assert_eq!(detail["canDelete"], true);

    let response = browser.send(TestRequest::get().uri(&format!("/delete/{id}"))).await;
    assert_eq!(location(&response), Some("/"));
    assert!(CafeRepository::find_by_id(fx.store.as_ref(), id).await.expect("lookup").is_none());
    let reviews = ReviewRepository::list_for_cafe(fx.store.as_ref(), id)
        .await
        .expect("reviews");
    assert!(reviews.is_empty());

    let again = browser.send(TestRequest::get().uri(&format!("/delete/{id}"))).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn stale_session_is_treated_as_anonymous() {
    let (mut browser, _) = fixture().await;
    log_in!(browser, 404);

    let view = browser.view("/").await;
    assert_eq!(view["currentUser"], Value::Null);
    let response = browser.send(TestRequest::get().uri("/add")).await;
    assert_eq!(location(&response), Some("/login"));
}

#[rstest]
#[actix_web::test]
async fn each_change_is_logged_once() {
    let (logs, _guard) = CapturedLogs::install();
    let (mut browser, fx) = fixture().await;
    log_in!(browser, fx.member);

    browser
        .send(TestRequest::post().uri("/add").set_form(blue_cup_form()))
        .await;
    let id = fx.store.find_by_name("Blue Cup").await.expect("lookup").expect("added").id;
    browser
        .send(TestRequest::post().uri(&format!("/cafe/{id}")).set_form([("review_text", "Good")]))
        .await;
    browser
        .send(TestRequest::post().uri(&format!("/edit-cafe/{id}")).set_form(blue_cup_form()))
        .await;
    log_in!(browser, fx.admin);
    let response = browser.send(TestRequest::get().uri(&format!("/delete/{id}"))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    for message in ["cafe added", "review added", "cafe edited", "cafe deleted"] {
        assert_eq!(logs.count(message), 1, "{message}");
    }
}
