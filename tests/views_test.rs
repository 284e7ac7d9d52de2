use chrono::NaiveDate;
use field_reservations::app::views::{self, Location};
use field_reservations::domain::model::{Hour, UserId};
use field_reservations::{FixedClock, JsonFileStore, ReservationEngine};
use std::sync::Arc;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 6, 22).unwrap()
}

fn reserve_link(field_id: field_reservations::domain::model::FieldId, hour: i64) -> String {
    Location::Reserve {
        field_id,
        date: Some(today()),
        hour: Hour::new(hour).unwrap(),
    }
    .to_string()
}

#[tokio::test]
async fn test_field_view_hides_link_once_reserved() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("store.json")).await.unwrap();
    let engine = ReservationEngine::new(Arc::new(store), FixedClock::new(today()));

    let venue = engine.add_venue("VenueFieldTest01").await.unwrap();
    let field = engine.add_field(venue.id, "FieldReservationTest01").await.unwrap();

    let page = views::render_field_detail(&engine.field_detail(field.id, None).await.unwrap());
    assert!(page.contains("Reservations"));
    assert!(page.contains(&reserve_link(field.id, 5)));
    assert!(page.contains(&reserve_link(field.id, 6)));

    let outcome = engine.reserve(field.id, None, 5, None).await.unwrap();
    assert_eq!(Location::from(outcome.redirect).to_string(), "/fields/1/");

    let page = views::render_field_detail(&engine.field_detail(field.id, None).await.unwrap());
    assert!(!page.contains(&reserve_link(field.id, 5)));
    assert!(page.contains(&reserve_link(field.id, 6)));
    assert!(page.contains("/fields/1/2016-06-21/"));
    assert!(page.contains("/fields/1/2016-06-23/"));
}

#[tokio::test]
async fn test_venue_pages() {
    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::open(dir.path().join("store.json")).await.unwrap();
    let engine = ReservationEngine::new(Arc::new(store), FixedClock::new(today()));

    let page = views::render_venues(&engine.venues().await.unwrap());
    assert!(page.contains("No venues yet."));

    for name in ["VenueFieldTest01", "VenueFieldTest02", "VenueFieldTest03"] {
        engine.add_venue(name).await.unwrap();
    }
    let page = views::render_venues(&engine.venues().await.unwrap());
    assert!(!page.contains("No venues yet."));
    assert!(page.contains("VenueFieldTest01"));
    assert!(page.contains("VenueFieldTest02"));
    assert!(page.contains("VenueFieldTest03"));

    let first = engine.venues().await.unwrap()[0].id;
    engine.add_field(first, "FieldReservationTest11").await.unwrap();
    let page = views::render_venue_detail(&engine.venue_detail(first).await.unwrap());
    assert!(page.contains("FieldReservationTest11"));
    assert!(page.contains("/fields/1/"));
    assert!(!page.contains("FieldReservationTest21"));
}

#[tokio::test]
async fn test_reservation_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    let store = JsonFileStore::open(&path).await.unwrap();
    let engine = ReservationEngine::new(Arc::new(store), FixedClock::new(today()));

    let venue = engine.add_venue("VenueFieldTest01").await.unwrap();
    let field = engine.add_field(venue.id, "FieldReservationTest01").await.unwrap();
    let outcome = engine
        .reserve(field.id, Some("2016-06-22"), 1, Some(UserId::new("carol")))
        .await
        .unwrap();

    let list = views::render_reservations(&engine.reservations().await.unwrap());
    assert!(list.contains("/reservations/1/"));
    assert!(list.contains("carol"));

    let page = views::render_reservation(
        &engine.reservation_detail(outcome.reservation.id).await.unwrap(),
    );
    assert!(page.contains("2016-06-22"));
    assert!(page.contains("/fields/1/2016-06-22/"));

    // reopening the file sees the reservation, then the delete
    let reopened = JsonFileStore::open(&path).await.unwrap();
    let engine = ReservationEngine::new(Arc::new(reopened), FixedClock::new(today()));
    assert_eq!(engine.reservations().await.unwrap().len(), 1);
    let redirect = engine.delete_reservation(outcome.reservation.id).await.unwrap();
    assert_eq!(Location::from(redirect).to_string(), "/reservations/");

    let list = views::render_reservations(&engine.reservations().await.unwrap());
    assert!(list.contains("No reservations yet."));
}
