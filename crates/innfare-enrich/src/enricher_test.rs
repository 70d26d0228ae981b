use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use innfare_core::{HotelPrice, RoomOffer};
use innfare_quotes::RawQuotePayload;
use serde_json::{json, Value};

use super::*;

#[derive(Clone)]
enum Script {
    Payload(Value),
    Delayed(u64, Value),
    Status(u16),
    Timeout,
    Panic,
}

/// Quote source answering from a per-token script.
#[derive(Default)]
struct ScriptedSource {
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ScriptedSource {
    fn with(mut self, token: &str, script: Script) -> Self {
        self.scripts.insert(token.to_owned(), script);
        self
    }
}

impl QuoteSource for ScriptedSource {
    fn fetch_quote(
        &self,
        req: &QuoteRequest,
    ) -> impl Future<Output = Result<RawQuotePayload, QuoteError>> + Send {
        let script = self.scripts.get(&req.property_token).cloned();
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            let result = match script {
                Some(Script::Payload(v)) => Ok(RawQuotePayload::from_value(v).unwrap()),
                Some(Script::Delayed(ms, v)) => {
                    tokio::time::sleep(Duration::from_millis(ms)).await;
                    Ok(RawQuotePayload::from_value(v).unwrap())
                }
                Some(Script::Status(status)) => Err(QuoteError::UnexpectedStatus { status }),
                Some(Script::Timeout) => Err(QuoteError::Timeout { timeout_ms: 8_000 }),
                Some(Script::Panic) => panic!("scripted panic"),
                None => Err(QuoteError::Upstream("unknown property".to_owned())),
            };

            self.current.fetch_sub(1, Ordering::SeqCst);
            result
        }
    }

    fn default_currency(&self) -> &str {
        "USD"
    }
}

fn stay() -> StayParams {
    StayParams {
        check_in: NaiveDate::from_ymd_opt(2026, 7, 10),
        check_out: NaiveDate::from_ymd_opt(2026, 7, 12),
        ..StayParams::default()
    }
}

fn hotel(id: &str, token: Option<&str>) -> Hotel {
    let mut h = Hotel::new(id);
    h.name = Some(format!("Hotel {id}"));
    h.property_token = token.map(str::to_owned);
    h
}

fn baseline_hotel(id: &str, token: &str) -> Hotel {
    let mut h = hotel(id, Some(token));
    h.price = Some(HotelPrice {
        amount: 199.0,
        currency: "USD".to_owned(),
        total: None,
    });
    h.rooms = vec![RoomOffer {
        name: "Baseline Double".to_owned(),
        image: None,
        booking_link: "https://baseline/book".to_owned(),
        nightly_price: 199.0,
        currency: "USD".to_owned(),
        refundable: None,
        cancellable: None,
        rate_plan: None,
    }];
    h.official_booking_url = Some("https://baseline/book".to_owned());
    h.extra.insert("stars".to_owned(), json!(4));
    h
}

fn suite_payload(price: u32) -> Value {
    json!({
        "currency": "CAD",
        "featured_prices": [{
            "official": true,
            "rate_per_night": {"extracted_before_taxes_fees": price},
            "link": "https://x/book",
            "rooms": [{
                "name": "Suite A",
                "rate_per_night": {"extracted_before_taxes_fees": price},
                "images": ["https://x/a.jpg"],
                "refundable": true
            }]
        }]
    })
}

// ---------------------------------------------------------------------------
// enrich_one
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enrich_one_adds_price_rooms_and_link() {
    let source = ScriptedSource::default().with("tok-a", Script::Payload(suite_payload(555)));
    let enricher = Enricher::new(source, 4);

    let out = enricher.enrich_one(hotel("a", Some("tok-a")), &stay()).await;

    let price = out.price.expect("price should be set");
    assert_eq!(price.amount, 555.0);
    assert_eq!(price.currency, "CAD");
    assert_eq!(out.rooms.len(), 1);
    assert_eq!(out.rooms[0].name, "Suite A");
    assert_eq!(out.rooms[0].image.as_deref(), Some("https://x/a.jpg"));
    assert_eq!(out.official_booking_url.as_deref(), Some("https://x/book"));
}

#[tokio::test]
async fn enrich_one_without_token_is_untouched_and_never_fetches() {
    let enricher = Enricher::new(ScriptedSource::default(), 4);
    let original = hotel("a", None);

    let out = enricher.enrich_one(original.clone(), &stay()).await;

    assert_eq!(out, original);
    assert_eq!(enricher.source.as_ref().unwrap().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enrich_one_without_dates_is_untouched() {
    let source = ScriptedSource::default().with("tok-a", Script::Payload(suite_payload(100)));
    let enricher = Enricher::new(source, 4);
    let original = hotel("a", Some("tok-a"));

    let no_checkout = StayParams {
        check_out: None,
        ..stay()
    };
    assert_eq!(enricher.enrich_one(original.clone(), &no_checkout).await, original);

    let reversed = StayParams {
        check_in: NaiveDate::from_ymd_opt(2026, 7, 12),
        check_out: NaiveDate::from_ymd_opt(2026, 7, 10),
        ..stay()
    };
    assert_eq!(enricher.enrich_one(original.clone(), &reversed).await, original);
    assert_eq!(enricher.source.as_ref().unwrap().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enrich_one_failure_returns_baseline_exactly() {
    let source = ScriptedSource::default()
        .with("tok-status", Script::Status(500))
        .with("tok-timeout", Script::Timeout);
    let enricher = Enricher::new(source, 4);

    for token in ["tok-status", "tok-timeout", "tok-unknown"] {
        let original = baseline_hotel("a", token);
        assert_eq!(enricher.enrich_one(original.clone(), &stay()).await, original);
    }
}

#[tokio::test]
async fn enrich_one_without_authoritative_rate_keeps_baseline() {
    let payload = json!({
        "featured_prices": [{"official": false, "rate_per_night": {"extracted_lowest": 80}}]
    });
    let source = ScriptedSource::default().with("tok-a", Script::Payload(payload));
    let enricher = Enricher::new(source, 4);
    let original = baseline_hotel("a", "tok-a");

    assert_eq!(enricher.enrich_one(original.clone(), &stay()).await, original);
}

#[tokio::test]
async fn disabled_enricher_returns_everything_untouched() {
    let enricher: Enricher<ScriptedSource> = Enricher::disabled();
    assert!(!enricher.is_enabled());

    let hotels = vec![baseline_hotel("a", "tok-a"), hotel("b", None)];
    assert_eq!(enricher.enrich_many(hotels.clone(), &stay()).await, hotels);
    assert_eq!(enricher.enrich_one(hotels[0].clone(), &stay()).await, hotels[0]);

    let req = stay().quote_request("tok-a", None).unwrap();
    assert!(matches!(
        enricher.quote(&req).await,
        Err(EnrichError::Quote(QuoteError::MissingApiKey))
    ));
}

// ---------------------------------------------------------------------------
// apply_quote
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unpriced_rate_keeps_baseline_price_but_sets_link() {
    let payload = json!({
        "featured_prices": [{"official": true, "link": "https://f/book"}],
        "prices": [{"official": true, "link": "https://g/book"}]
    });
    let source = ScriptedSource::default().with("tok-a", Script::Payload(payload));
    let enricher = Enricher::new(source, 1);
    let original = baseline_hotel("a", "tok-a");

    let out = enricher.enrich_one(original.clone(), &stay()).await;

    assert_eq!(out.price, original.price);
    assert_eq!(out.rooms, original.rooms);
    assert_eq!(out.official_booking_url.as_deref(), Some("https://f/book"));
    assert_eq!(out.extra, original.extra);
}

#[tokio::test]
async fn rate_without_rooms_keeps_baseline_rooms() {
    let payload = json!({
        "featured_prices": [{"official": true, "rate_per_night": {"extracted_lowest": 120}}]
    });
    let source = ScriptedSource::default().with("tok-a", Script::Payload(payload));
    let enricher = Enricher::new(source, 1);
    let original = baseline_hotel("a", "tok-a");

    let out = enricher.enrich_one(original.clone(), &stay()).await;

    assert_eq!(out.price.as_ref().map(|p| p.amount), Some(120.0));
    assert_eq!(out.rooms, original.rooms);
    assert_eq!(out.official_booking_url, original.official_booking_url);
    assert_eq!(out.name, original.name);
    assert_eq!(out.extra, original.extra);
}

// ---------------------------------------------------------------------------
// enrich_many
// ---------------------------------------------------------------------------

#[tokio::test]
async fn enrich_many_preserves_length_and_order() {
    let mut source = ScriptedSource::default();
    let mut hotels = Vec::new();
    for i in 0..10u32 {
        let token = format!("tok-{i}");
        // Earlier hotels answer slower so completion order is reversed.
        source = source.with(
            &token,
            Script::Delayed(u64::from(10 - i) * 5, suite_payload(100 + i)),
        );
        hotels.push(hotel(&format!("h{i}"), Some(&token)));
    }
    hotels.insert(3, hotel("no-token", None));

    let enricher = Enricher::new(source, 4);
    let out = enricher.enrich_many(hotels.clone(), &stay()).await;

    assert_eq!(out.len(), hotels.len());
    let ids: Vec<&str> = out.iter().map(|h| h.id.as_str()).collect();
    let expected: Vec<&str> = hotels.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, expected);

    assert_eq!(out[3], hotels[3], "token-less hotel must be untouched");
    for h in out.iter().filter(|h| h.id != "no-token") {
        let i: f64 = h.id.trim_start_matches('h').parse().unwrap();
        assert_eq!(h.price.as_ref().unwrap().amount, 100.0 + i);
    }

    let source = enricher.source.as_ref().unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 10, "each hotel fetched once");
    assert!(source.peak.load(Ordering::SeqCst) <= 4);
}

#[tokio::test]
async fn enrich_many_isolates_failures() {
    let mut source = ScriptedSource::default();
    let mut hotels = Vec::new();
    for i in 1..=10u32 {
        let token = format!("tok-{i}");
        let script = match i {
            3 => Script::Timeout,
            5 => Script::Panic,
            _ => Script::Payload(suite_payload(100 + i)),
        };
        source = source.with(&token, script);
        hotels.push(baseline_hotel(&format!("h{i}"), &token));
    }

    let enricher = Enricher::new(source, 4);
    let out = enricher.enrich_many(hotels.clone(), &stay()).await;

    assert_eq!(out.len(), 10);
    assert_eq!(out[2], hotels[2], "failed hotel keeps its baseline");
    assert_eq!(out[4], hotels[4], "panicking hotel keeps its baseline");
    for i in [0usize, 1, 3, 5, 6, 7, 8, 9] {
        let expected = 100.0 + f64::from(u32::try_from(i).unwrap() + 1);
        assert_eq!(out[i].price.as_ref().unwrap().amount, expected);
        assert_eq!(out[i].rooms[0].name, "Suite A");
    }
}

#[tokio::test]
async fn enrich_many_with_no_eligible_hotels_is_identity() {
    let enricher = Enricher::new(ScriptedSource::default(), 4);
    let hotels = vec![hotel("a", None), hotel("b", Some("   "))];
    assert_eq!(enricher.enrich_many(hotels.clone(), &stay()).await, hotels);
    assert_eq!(enricher.source.as_ref().unwrap().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn enrich_many_with_repeated_ids_merges_by_position() {
    let source = ScriptedSource::default()
        .with("tok-a", Script::Payload(suite_payload(555)))
        .with("tok-b", Script::Payload(suite_payload(321)));
    let hotels = vec![
        hotel("dup", Some("tok-a")),
        baseline_hotel("dup", "  "),
        hotel("dup", Some("tok-b")),
    ];

    let enricher = Enricher::new(source, 2);
    let out = enricher.enrich_many(hotels.clone(), &stay()).await;

    assert_eq!(out[0].price.as_ref().unwrap().amount, 555.0);
    assert_eq!(out[1], hotels[1], "token-less hotel sharing an id is untouched");
    assert_eq!(out[2].price.as_ref().unwrap().amount, 321.0);
    assert_eq!(enricher.source.as_ref().unwrap().calls.load(Ordering::SeqCst), 2);
}

#[test]
fn zero_concurrency_is_raised_to_one() {
    let enricher = Enricher::new(ScriptedSource::default(), 0);
    assert_eq!(enricher.max_concurrent(), 1);
}
