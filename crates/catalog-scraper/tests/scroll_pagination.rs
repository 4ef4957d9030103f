//! Scroll+click driver against an in-memory browser.

mod support;

use std::time::Duration;

use catalog_scraper::extract::TraderJoesExtractor;
use catalog_scraper::pagination::{scroll_and_click, scroll_until_stable, ClickControls, MAX_SCROLL_ROUNDS};
use catalog_scraper::{Browser, ControlState, Limits, PageRun, ReadySignal, StopReason};

use support::{titles, trader_joes_page, FakeBrowser, ListingPage};

const START: &str = "https://www.traderjoes.com/home/products/category/food-8";

fn limits() -> Limits {
    Limits {
        settle_interval: Duration::ZERO,
        ..Limits::default()
    }
}

async fn walk(browser: &FakeBrowser, limits: &Limits) -> PageRun {
    let controls = ClickControls::trader_joes();
    let ready = ReadySignal::selector(controls.list_selector.clone(), limits.selector_timeout);
    scroll_and_click(
        browser,
        START,
        &ready,
        &TraderJoesExtractor,
        &controls,
        limits,
    )
    .await
}

// ---------------------------------------------------------------------------
// Scroll stabilisation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scrolls_until_height_stops_changing() {
    let browser = FakeBrowser::new().with_listing(vec![ListingPage::new(
        trader_joes_page(&["x"]),
        ControlState::Missing,
    )
    .with_heights(&[1000, 1800, 2400, 2400])]);
    let tab = browser.open_tab().await.unwrap();

    let height = scroll_until_stable(&tab, Duration::ZERO).await.unwrap();

    assert_eq!(height, 2400);
    assert_eq!(browser.scrolls(), 3);
}

#[tokio::test]
async fn endlessly_growing_page_is_capped() {
    let heights: Vec<u64> = (1..=200).map(|i| i * 100).collect();
    let browser = FakeBrowser::new().with_listing(vec![ListingPage::new(
        trader_joes_page(&["x"]),
        ControlState::Missing,
    )
    .with_heights(&heights)]);
    let tab = browser.open_tab().await.unwrap();

    scroll_until_stable(&tab, Duration::ZERO).await.unwrap();

    assert_eq!(browser.scrolls(), MAX_SCROLL_ROUNDS);
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[tokio::test]
async fn clicks_through_until_next_is_disabled() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1a", "p1b"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2a"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p3a"]), ControlState::Disabled),
    ]);

    let run = walk(&browser, &limits()).await;

    assert_eq!(titles(&run.records), vec!["p1a", "p1b", "p2a", "p3a"]);
    assert_eq!(run.pages, 3);
    assert_eq!(run.stop, StopReason::EndOfCatalog);
    assert_eq!(browser.clicks(), 2);
    assert_eq!(browser.visits(), vec![START]);
}

#[tokio::test]
async fn one_tab_for_the_whole_session() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2"]), ControlState::Missing),
    ]);

    let run = walk(&browser, &limits()).await;

    assert_eq!(run.stop, StopReason::NoNextControl);
    assert_eq!(browser.tabs_opened(), 1);
    assert_eq!(browser.tabs_closed(), 1);
}

#[tokio::test]
async fn click_failure_keeps_records_and_closes_tab() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2"]), ControlState::Enabled).failing_click(),
        ListingPage::new(trader_joes_page(&["p3"]), ControlState::Disabled),
    ]);

    let run = walk(&browser, &limits()).await;

    assert!(matches!(run.stop, StopReason::ControlFailed(_)));
    assert_eq!(titles(&run.records), vec!["p1", "p2"]);
    assert_eq!(browser.tabs_closed(), 1);
}

#[tokio::test]
async fn post_click_wait_failure_keeps_records() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2"]), ControlState::Enabled).failing_wait(),
        ListingPage::new(trader_joes_page(&["p3"]), ControlState::Disabled),
    ]);

    let run = walk(&browser, &limits()).await;

    let StopReason::ControlFailed(reason) = &run.stop else {
        panic!("expected ControlFailed, got {:?}", run.stop);
    };
    assert!(reason.contains("did not appear"), "{reason}");
    assert!(run.stop.is_failure());
    assert_eq!(titles(&run.records), vec!["p1", "p2"]);
    assert_eq!(run.pages, 2);
    assert_eq!(browser.clicks(), 2);
    assert_eq!(browser.tabs_closed(), 1);
}

#[tokio::test]
async fn start_page_selector_timeout_reports_fetch_failed() {
    let browser = FakeBrowser::new()
        .with_listing(vec![ListingPage::new(
            trader_joes_page(&["p1"]),
            ControlState::Enabled,
        )])
        .with_missing_selector(START);

    let run = walk(&browser, &limits()).await;

    assert!(matches!(run.stop, StopReason::FetchFailed(_)));
    assert!(run.records.is_empty());
    assert_eq!(browser.clicks(), 0);
    assert_eq!(browser.tabs_closed(), 1);
}

#[tokio::test]
async fn empty_page_stops_without_clicking() {
    let browser = FakeBrowser::new().with_listing(vec![ListingPage::new(
        trader_joes_page(&[]),
        ControlState::Enabled,
    )]);

    let run = walk(&browser, &limits()).await;

    assert_eq!(run.stop, StopReason::EmptyPage);
    assert!(run.records.is_empty());
    assert_eq!(browser.clicks(), 0);
}

#[tokio::test]
async fn start_page_failure_reports_fetch_failed() {
    let browser = FakeBrowser::new().with_failing(START);

    let run = walk(&browser, &limits()).await;

    assert!(matches!(run.stop, StopReason::FetchFailed(_)));
    assert_eq!(run.pages, 0);
    assert_eq!(browser.tabs_closed(), 1);
}

#[tokio::test]
async fn page_limit_applies() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p3"]), ControlState::Enabled),
    ]);
    let limits = Limits {
        max_pages: 2,
        ..limits()
    };

    let run = walk(&browser, &limits).await;

    assert_eq!(run.stop, StopReason::PageLimit);
    assert_eq!(titles(&run.records), vec!["p1", "p2"]);
    assert_eq!(browser.clicks(), 1);
}

#[tokio::test]
async fn page_limit_stops_before_clicking_again() {
    let browser = FakeBrowser::new().with_listing(vec![
        ListingPage::new(trader_joes_page(&["p1"]), ControlState::Enabled),
        ListingPage::new(trader_joes_page(&["p2"]), ControlState::Enabled).failing_click(),
        ListingPage::new(trader_joes_page(&["p3"]), ControlState::Enabled),
    ]);
    let limits = Limits {
        max_pages: 2,
        ..limits()
    };

    let run = walk(&browser, &limits).await;

    assert_eq!(run.stop, StopReason::PageLimit);
    assert!(!run.stop.is_failure());
    assert_eq!(run.pages, 2);
    assert_eq!(browser.clicks(), 1);
    assert_eq!(titles(&run.records), vec!["p1", "p2"]);
}
