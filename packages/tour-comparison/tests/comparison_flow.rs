//! Integration tests for the full comparison workflow:
//! 1. Classify the page URL
//! 2. Extract a draft from site markup
//! 3. Store it through the message layer
//! 4. Project the collection to the matrix and CSV

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use tour_comparison::testing::{sample_draft, GYG_TOUR_PAGE, VIATOR_TOUR_PAGE};
use tour_comparison::{
    csv_filename, fetch_tours, to_csv, AddStatus, LocalChannel, MemoryKeyValueStore,
    MessageHandler, PageSession, Site, TourRequest, TourStore,
};

type Handler = MessageHandler<MemoryKeyValueStore>;

fn handler() -> Arc<Handler> {
    Arc::new(MessageHandler::new(TourStore::new(
        MemoryKeyValueStore::new(),
    )))
}

fn session(handler: &Arc<Handler>) -> PageSession<LocalChannel<MemoryKeyValueStore>> {
    PageSession::new(LocalChannel::new(Arc::clone(handler))).with_debounce(Duration::ZERO)
}

fn gyg_url() -> Url {
    Url::parse("https://www.getyourguide.com/rome-l33/colosseum-t1?ranking_uuid=9f3e").unwrap()
}

fn viator_url() -> Url {
    Url::parse("https://www.viator.com/tours/Rome/Vatican/d511-3731").unwrap()
}

#[tokio::test]
async fn extract_store_project_end_to_end() {
    let handler = handler();
    let mut session = session(&handler);

    let view = session.visit(gyg_url(), GYG_TOUR_PAGE);
    assert!(view.is_tour_page);
    assert!(view.offers_add());

    let draft = view.draft.clone().unwrap();
    assert_eq!(draft.source, Site::GetYourGuide);
    assert_eq!(draft.price, "49.50");
    assert_eq!(draft.rating, "4.7");
    assert_eq!(draft.review_count, "1234");

    assert_eq!(
        session.add_current().await.unwrap(),
        AddStatus::Added { tour_count: 1 }
    );

    let matrix = session.matrix().await.unwrap();
    assert_eq!(matrix.columns.len(), 1);
    assert_eq!(matrix.columns[0].title, "Colosseum Guided Tour");
    assert_eq!(matrix.rows[0].label, "Source");
    assert_eq!(matrix.rows[0].cells, ["GetYourGuide"]);
}

#[tokio::test]
async fn two_surfaces_share_one_collection() {
    let handler = handler();

    // A Viator tab and a GetYourGuide tab, each with its own session.
    let mut viator_tab = session(&handler);
    let mut gyg_tab = session(&handler);

    viator_tab.visit(viator_url(), VIATOR_TOUR_PAGE);
    gyg_tab.visit(gyg_url(), GYG_TOUR_PAGE);

    assert_eq!(
        viator_tab.add_current().await.unwrap(),
        AddStatus::Added { tour_count: 1 }
    );
    assert_eq!(
        gyg_tab.add_current().await.unwrap(),
        AddStatus::Added { tour_count: 2 }
    );

    // Both surfaces observe both records, in insertion order.
    let tours = viator_tab.tours().await.unwrap();
    assert_eq!(tours.len(), 2);
    assert_eq!(tours[0].source, Site::Viator);
    assert_eq!(tours[1].source, Site::GetYourGuide);
}

#[tokio::test]
async fn append_delete_round_trip_restores_prior_collection() {
    let handler = handler();
    let store = handler.store();

    let before = store.list().await.unwrap();
    assert!(before.is_empty());

    let first = store.append(sample_draft(Site::Viator, "One")).await.unwrap();
    assert_eq!(first.count, 1);
    let second = store
        .append(sample_draft(Site::GetYourGuide, "Two"))
        .await
        .unwrap();
    assert_eq!(second.count, 2);

    let count = store.remove(&second.id).await.unwrap();
    assert_eq!(count, 1);

    let after = store.list().await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].title, "One");
    assert_eq!(after[0].id, first.id);
}

#[tokio::test]
async fn delete_via_messages_keeps_the_survivor() {
    let handler = handler();

    handler
        .handle(TourRequest::AddTour {
            tour_data: sample_draft(Site::Viator, "Doomed"),
        })
        .await;
    handler
        .handle(TourRequest::AddTour {
            tour_data: sample_draft(Site::GetYourGuide, "Survivor"),
        })
        .await;

    let tours = fetch_tours(&LocalChannel::new(Arc::clone(&handler)))
        .await
        .unwrap();
    let doomed_id = tours[0].id.clone();

    let response = handler
        .handle(TourRequest::DeleteTour { tour_id: doomed_id })
        .await;
    assert!(response.succeeded());
    assert_eq!(response.tour_count(), Some(1));

    let remaining = handler.store().list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].title, "Survivor");
}

#[tokio::test]
async fn clear_empties_regardless_of_contents() {
    let handler = handler();
    let store = handler.store();

    for i in 0..5 {
        store
            .append(sample_draft(Site::Viator, &format!("Tour {i}")))
            .await
            .unwrap();
    }

    let response = handler.handle(TourRequest::ClearAllTours).await;
    assert!(response.succeeded());
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn csv_export_matches_collection() {
    let handler = handler();
    let store = handler.store();

    let mut tricky = sample_draft(Site::Viator, r#"The "Best of Rome", truly"#);
    tricky.highlights = vec!["Views, views".to_string(), "History".to_string()];
    store.append(tricky).await.unwrap();
    store
        .append(sample_draft(Site::GetYourGuide, "Plain tour"))
        .await
        .unwrap();

    let tours = store.list().await.unwrap();
    let csv = to_csv(&tours).unwrap();

    // Header plus one line per record.
    assert_eq!(csv.lines().count(), 3);

    // Quoted fields re-parse to the original strings.
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<_> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(&rows[0][1], r#"The "Best of Rome", truly"#);
    assert_eq!(&rows[0][6], "Views, views; History");
    assert_eq!(&rows[1][0], "GetYourGuide");

    let date = tours[0].added_at.date_naive();
    assert_eq!(
        csv_filename(date),
        format!("tour-comparison-{}.csv", date.format("%Y-%m-%d"))
    );
}

#[tokio::test]
async fn ids_stay_unique_across_many_appends() {
    let handler = handler();
    let store = handler.store();

    for i in 0..20 {
        store
            .append(sample_draft(Site::GetYourGuide, &format!("Tour {i}")))
            .await
            .unwrap();
    }

    let tours = store.list().await.unwrap();
    let mut ids: Vec<_> = tours.iter().map(|t| t.id.clone()).collect();
    let titles: Vec<_> = tours.iter().map(|t| t.title.clone()).collect();

    // Insertion order preserved.
    assert_eq!(titles[0], "Tour 0");
    assert_eq!(titles[19], "Tour 19");

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}
