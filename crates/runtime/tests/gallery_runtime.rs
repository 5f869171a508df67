//! End-to-end tests driving the runtime through its handle.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use gallery_core::{CorpusSources, ItemId, SortOrder, StatKind, TraitValue, ViewConfig};
use gallery_runtime::{
    DataEvent, DataSource, Event, GalleryHandle, RefreshOutcome, Runtime, RuntimeConfig,
    RuntimeError, SourceError, StaticDataSource, Topic, ViewError, ViewEvent, ViewMode,
};

/// Static data behind a gate: every fetch takes one permit.
#[derive(Clone)]
struct GatedSource {
    data: StaticDataSource,
    gate: Arc<Semaphore>,
    fetches: Arc<AtomicUsize>,
}

impl GatedSource {
    fn new(sources: CorpusSources) -> Self {
        Self {
            data: StaticDataSource::new(sources),
            gate: Arc::new(Semaphore::new(0)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn open(sources: CorpusSources) -> Self {
        let source = Self::new(sources);
        source.gate.add_permits(1_000);
        source
    }

    fn release(&self) {
        self.gate.add_permits(1);
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for GatedSource {
    async fn fetch(&self) -> Result<CorpusSources, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| SourceError::Load("gate closed".into()))?;
        permit.forget();
        self.data.fetch().await
    }

    fn describe(&self) -> String {
        "gated test source".to_owned()
    }
}

fn sources(items: &[(&str, &[(&str, &str)])]) -> CorpusSources {
    let mut sources = CorpusSources::default();
    for (id, traits) in items {
        sources
            .images
            .insert(id.to_string(), format!("https://img/{id}.png"));
        let traits: BTreeMap<String, TraitValue> = traits
            .iter()
            .map(|(category, value)| (category.to_string(), TraitValue::from(*value)))
            .collect();
        sources.traits.insert(id.to_string(), traits);
    }
    sources
}

fn collection() -> CorpusSources {
    sources(&[
        ("1", &[("body", "red"), ("hand", "claw")]),
        ("2", &[("body", "red"), ("hand", "paw")]),
        ("3", &[("body", "gold"), ("hand", "claw")]),
        ("4", &[("body", "blue"), ("hand", "paw")]),
        ("5", &[("body", "red"), ("hand", "paw")]),
    ])
}

async fn start(source: GatedSource, config: RuntimeConfig) -> (Runtime, GalleryHandle) {
    let runtime = Runtime::builder()
        .config(config)
        .source(source)
        .build()
        .await
        .expect("runtime should build");
    let handle = runtime.handle();
    (runtime, handle)
}

fn paged(page_size: usize) -> RuntimeConfig {
    RuntimeConfig {
        view: ViewConfig::with_page_size(page_size),
        ..RuntimeConfig::default()
    }
}

fn ids(raw: &[ItemId]) -> Vec<&str> {
    raw.iter().map(ItemId::as_str).collect()
}

#[tokio::test]
async fn build_requires_a_source() {
    let result = Runtime::builder().build().await;
    assert!(matches!(result, Err(RuntimeError::MissingSource)));
}

#[tokio::test]
async fn initial_load_installs_the_catalog() {
    let mut data = collection();
    data.traits.insert("9".into(), BTreeMap::new());

    let (_runtime, handle) = start(GatedSource::open(data), RuntimeConfig::default()).await;
    let report = handle.wait_until_loaded().await.unwrap();
    assert_eq!(report.items, 5);
    assert_eq!(report.skipped, 1);
    assert!(!report.has_stats);

    let snapshot = handle.snapshot().await.unwrap();
    assert!(snapshot.ready);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.mode, ViewMode::Unfiltered);
    assert_eq!(snapshot.sort, SortOrder::Latest);
    assert_eq!(snapshot.total, 5);
    assert_eq!(snapshot.location, "/");
    assert!(snapshot.load_error.is_none());
}

#[tokio::test]
async fn actions_before_load_are_rejected() {
    let source = GatedSource::new(collection());
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;

    let result = handle.toggle_filter("body", "red").await;
    assert!(matches!(result, Err(RuntimeError::View(ViewError::NotReady))));
    assert!(handle.snapshot().await.unwrap().loading);

    source.release();
    handle.wait_until_loaded().await.unwrap();
    handle.toggle_filter("body", "red").await.unwrap();
}

#[tokio::test]
async fn initial_location_is_validated_after_load() {
    let config = RuntimeConfig {
        path: "/gallery".into(),
        initial_location: Some("/gallery?body=red|gold|silver&sort=rarity&select=2,99".into()),
        ..RuntimeConfig::default()
    };
    let (_runtime, handle) = start(GatedSource::open(collection()), config).await;

    let report = handle.wait_until_loaded().await.unwrap();
    assert_eq!(
        report.revalidation.dropped_filters,
        vec![("body".to_string(), "silver".to_string())]
    );
    assert_eq!(ids(&report.revalidation.dropped_selection), ["99"]);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.sort, SortOrder::Rarity);
    assert_eq!(snapshot.mode, ViewMode::Filtered);
    assert_eq!(snapshot.total, 4);
    assert_eq!(ids(&snapshot.comparison), ["2"]);
    assert_eq!(
        snapshot.location,
        "/gallery?body=gold%7Cred&sort=rarity&select=2"
    );
    assert!(!snapshot.can_go_back);
}

#[tokio::test]
async fn pagination_is_single_flight() {
    let (_runtime, handle) = start(GatedSource::open(collection()), paged(2)).await;
    handle.wait_until_loaded().await.unwrap();

    let first = handle.request_page().await.unwrap().unwrap();
    assert_eq!(first.start, 0);
    assert_eq!(ids(&first.ids), ["5", "4"]);
    assert!(handle.request_page().await.unwrap().is_none());

    assert!(handle.finish_page(first.generation).await.unwrap());
    let second = handle.request_page().await.unwrap().unwrap();
    assert_eq!(ids(&second.ids), ["3", "2"]);
    assert!(handle.finish_page(second.generation).await.unwrap());

    let last = handle.request_page().await.unwrap().unwrap();
    assert_eq!(ids(&last.ids), ["1"]);
    assert!(last.is_last());
    assert!(handle.finish_page(last.generation).await.unwrap());
    assert!(handle.request_page().await.unwrap().is_none());

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.visible.len(), 5);
    assert_eq!(snapshot.remaining(), 0);
}

#[tokio::test]
async fn sort_change_discards_stale_pages() {
    let (_runtime, handle) = start(GatedSource::open(collection()), paged(2)).await;
    handle.wait_until_loaded().await.unwrap();

    let stale = handle.request_page().await.unwrap().unwrap();
    handle.set_sort(SortOrder::Oldest).await.unwrap();
    assert!(!handle.finish_page(stale.generation).await.unwrap());

    let fresh = handle.request_page().await.unwrap().unwrap();
    assert_eq!(fresh.start, 0);
    assert_eq!(ids(&fresh.ids), ["1", "2"]);
    assert_ne!(fresh.generation, stale.generation);
}

#[tokio::test]
async fn filters_combine_and_report_no_matches() {
    let (_runtime, handle) = start(GatedSource::open(collection()), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    let mut events = handle.subscribe(Topic::View);

    handle.toggle_filter("body", "red").await.unwrap();
    handle.toggle_filter("hand", "claw").await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.mode, ViewMode::Filtered);
    assert_eq!(snapshot.total, 1);

    handle.toggle_filter("body", "red").await.unwrap();
    handle.toggle_filter("body", "blue").await.unwrap();
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.mode, ViewMode::NoMatches);
    assert_eq!(snapshot.total, 0);
    assert!(handle.request_page().await.unwrap().is_none());

    let mut modes = Vec::new();
    while let Ok(Event::View(ViewEvent::Changed { mode, .. })) = events.try_recv() {
        modes.push(mode);
    }
    assert_eq!(modes.last(), Some(&ViewMode::NoMatches));

    handle.clear_filters().await.unwrap();
    assert_eq!(handle.snapshot().await.unwrap().mode, ViewMode::Unfiltered);
}

#[tokio::test]
async fn rejected_actions_publish_their_code() {
    let (_runtime, handle) = start(GatedSource::open(collection()), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    let mut events = handle.subscribe(Topic::View);

    let result = handle.set_sort(SortOrder::Stat(StatKind::Health)).await;
    assert!(matches!(
        result,
        Err(RuntimeError::View(ViewError::SortUnavailable(_)))
    ));
    match events.recv().await.unwrap() {
        Event::View(ViewEvent::Rejected { code, .. }) => assert_eq!(code, "view.sort_unavailable"),
        other => panic!("unexpected event: {other:?}"),
    }

    let result = handle.toggle_filter("body", "silver").await;
    assert!(matches!(
        result,
        Err(RuntimeError::View(ViewError::UnknownTrait { .. }))
    ));
    assert_eq!(handle.snapshot().await.unwrap().sort, SortOrder::Latest);
}

#[tokio::test]
async fn comparison_set_tracks_lookups() {
    let (_runtime, handle) = start(GatedSource::open(collection()), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();

    let item = handle.lookup(" 3 ").await.unwrap();
    assert_eq!(item.trait_name("body"), Some("gold"));
    assert!(handle.lookup("42").await.is_err());

    handle.add_to_comparison("4").await.unwrap();
    handle.add_to_comparison("1").await.unwrap();
    assert!(handle.add_to_comparison("4").await.is_err());

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(ids(&snapshot.comparison), ["1", "4"]);
    assert_eq!(snapshot.location, "/?select=1%2C4");

    assert!(handle.remove_from_comparison(ItemId::from("1")).await.unwrap());
    assert!(handle.clear_comparison().await.unwrap());
    assert!(!handle.clear_comparison().await.unwrap());
}

#[tokio::test]
async fn refresh_is_not_reentrant() {
    let source = GatedSource::new(collection());
    source.release();
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();

    assert_eq!(handle.refresh().await.unwrap(), RefreshOutcome::Started);
    assert_eq!(handle.refresh().await.unwrap(), RefreshOutcome::AlreadyRunning);
    assert!(handle.snapshot().await.unwrap().loading);

    source.release();
    handle.wait_until_loaded().await.unwrap();
    assert_eq!(source.fetches(), 2);
    assert!(!handle.snapshot().await.unwrap().loading);
}

#[tokio::test]
async fn failed_refresh_keeps_previous_data() {
    let source = GatedSource::open(collection());
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    handle.toggle_filter("body", "red").await.unwrap();
    let mut data_events = handle.subscribe(Topic::Data);

    source.data.set_failure(Some("network unreachable".into()));
    let result = handle.refresh_and_wait().await;
    assert!(matches!(result, Err(RuntimeError::Source(SourceError::Load(_)))));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.mode, ViewMode::Filtered);
    assert!(snapshot.load_error.unwrap().contains("network unreachable"));

    assert!(matches!(
        data_events.recv().await.unwrap(),
        Event::Data(DataEvent::LoadStarted { refresh: true })
    ));
    assert!(matches!(
        data_events.recv().await.unwrap(),
        Event::Data(DataEvent::LoadFailed { .. })
    ));
}

#[tokio::test]
async fn refresh_revalidates_retained_state() {
    let source = GatedSource::open(collection());
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    handle.toggle_filter("body", "gold").await.unwrap();
    handle.toggle_filter("hand", "claw").await.unwrap();
    handle.add_to_comparison("3").await.unwrap();

    source.data.replace(sources(&[
        ("1", &[("body", "red"), ("hand", "claw")]),
        ("2", &[("body", "red"), ("hand", "paw")]),
    ]));
    let report = handle.refresh_and_wait().await.unwrap().expect("refresh should start");
    assert_eq!(report.items, 2);
    assert_eq!(
        report.revalidation.dropped_filters,
        vec![("body".to_string(), "gold".to_string())]
    );
    assert_eq!(ids(&report.revalidation.dropped_selection), ["3"]);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.mode, ViewMode::Filtered);
    assert_eq!(ids(&snapshot.visible), Vec::<&str>::new());
    assert_eq!(snapshot.total, 1);
    assert!(snapshot.comparison.is_empty());
    assert_eq!(snapshot.location, "/?hand=claw");
}

#[tokio::test]
async fn refresh_rescores_before_the_next_page() {
    let source = GatedSource::open(sources(&[
        ("1", &[("body", "red")]),
        ("2", &[("body", "red")]),
        ("3", &[("body", "blue")]),
    ]));
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    handle.set_sort(SortOrder::Rarity).await.unwrap();

    let page = handle.request_page().await.unwrap().expect("first page");
    assert_eq!(ids(&page.ids), ["3", "1", "2"]);
    handle.finish_page(page.generation).await.unwrap();

    source.data.replace(sources(&[
        ("1", &[("body", "blue")]),
        ("2", &[("body", "red")]),
        ("3", &[("body", "red")]),
    ]));
    handle.refresh_and_wait().await.unwrap().expect("refresh should start");

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.sort, SortOrder::Rarity);
    assert!(snapshot.visible.is_empty());
    let rank = |id: &str| snapshot.catalog.record(&ItemId::from(id)).map(|r| r.rank);
    assert_eq!(rank("1"), Some(1));
    assert_eq!(rank("3"), Some(3));

    let page = handle.request_page().await.unwrap().expect("page after refresh");
    assert_eq!(ids(&page.ids), ["1", "2", "3"]);
}

#[tokio::test]
async fn items_without_images_count_towards_rarity() {
    let mut data = sources(&[
        ("1", &[("body", "red")]),
        ("2", &[("body", "red")]),
        ("3", &[("body", "blue")]),
        ("4", &[("body", "blue")]),
    ]);
    data.images.remove("4");
    let (_runtime, handle) = start(GatedSource::open(data), RuntimeConfig::default()).await;

    let report = handle.wait_until_loaded().await.unwrap();
    assert_eq!(report.items, 3);
    assert_eq!(report.skipped, 1);

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.catalog.occurrences().total_items(), 4);
    assert_eq!(snapshot.catalog.occurrences().count("body", "blue"), 2);
    let score = snapshot.catalog.record(&ItemId::from("1")).unwrap().score;
    assert!((score - 1.0).abs() < 1e-12);

    let err = handle.add_to_comparison("4").await.unwrap_err();
    assert!(matches!(err, RuntimeError::View(ViewError::Selection(_))));
}

#[tokio::test]
async fn history_restores_without_refetching() {
    let source = GatedSource::open(collection());
    let (_runtime, handle) = start(source.clone(), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();

    handle.toggle_filter("body", "red").await.unwrap();
    handle.set_sort(SortOrder::Rarity).await.unwrap();
    assert!(handle.snapshot().await.unwrap().can_go_back);

    let location = handle.back().await.unwrap();
    assert_eq!(location.as_deref(), Some("/?body=red"));
    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.sort, SortOrder::Latest);
    assert!(snapshot.filter.contains("body", "red"));
    assert!(snapshot.can_go_forward);

    assert_eq!(handle.back().await.unwrap().as_deref(), Some("/"));
    assert_eq!(handle.back().await.unwrap(), None);
    assert_eq!(handle.snapshot().await.unwrap().mode, ViewMode::Unfiltered);

    handle.forward().await.unwrap();
    let location = handle.forward().await.unwrap();
    assert_eq!(location.as_deref(), Some("/?body=red&sort=rarity"));
    assert_eq!(handle.snapshot().await.unwrap().sort, SortOrder::Rarity);

    assert_eq!(source.fetches(), 1);
}

#[tokio::test]
async fn navigate_pushes_and_revalidates() {
    let (_runtime, handle) = start(GatedSource::open(collection()), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();

    let revalidation = handle
        .navigate("/?hand=paw&hand=fin&sort=power")
        .await
        .unwrap();
    assert_eq!(
        revalidation.dropped_filters,
        vec![("hand".to_string(), "fin".to_string())]
    );
    assert_eq!(revalidation.sort_reset, Some(SortOrder::Stat(StatKind::Power)));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.sort, SortOrder::Latest);
    assert_eq!(snapshot.total, 3);
    assert_eq!(snapshot.location, "/?hand=paw");
    assert!(snapshot.can_go_back);
}

#[tokio::test]
async fn shutdown_joins_the_worker() {
    let (runtime, handle) = start(GatedSource::open(collection()), RuntimeConfig::default()).await;
    handle.wait_until_loaded().await.unwrap();
    drop(handle);
    runtime.shutdown().await.unwrap();
}
