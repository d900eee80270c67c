use devhub_core::service::LOCAL_AUTHOR;
use devhub_core::{
    AppContext, ArticlesPage, Catalog, CommunityPage, FailureNotice, KvStore, ManualClock,
    MemoryBackend, Namespace, PageError, PathPage, RenderOutcome, SortKey, SqliteBackend,
    StorageKey, Theme, ToolsPage,
};
use std::collections::BTreeMap;
use std::rc::Rc;

const START_MS: i64 = 1_700_000_000_000;

fn context_with<B: devhub_core::StorageBackend>(backend: B) -> (AppContext<B>, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(START_MS));
    let ctx = AppContext::new(backend, Catalog::builtin(START_MS), clock.clone());
    (ctx, clock)
}

#[test]
fn search_applies_once_after_quiet_interval() {
    let (ctx, clock) = context_with(MemoryBackend::new());
    let mut page = ToolsPage::mount(&ctx);

    page.type_search("s");
    clock.advance(50);
    page.type_search("se");
    clock.advance(50);
    page.type_search("Sem");

    let mut updates = 0;
    for _ in 0..400 {
        clock.advance(1);
        if page.tick() {
            updates += 1;
        }
    }

    assert_eq!(updates, 1);
    assert_eq!(page.query().raw_input, "Sem");
    assert_eq!(page.query().debounced_query, "Sem");
    let visible: Vec<&str> = page.visible().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(visible, vec!["t2"]);
    page.unmount();
}

#[test]
fn typing_does_not_change_view_before_interval() {
    let (ctx, clock) = context_with(MemoryBackend::new());
    let mut page = ArticlesPage::mount(&ctx);

    page.type_search("ebpf");
    clock.advance(199);

    assert!(!page.tick());
    assert_eq!(page.visible().len(), ctx.catalog().articles().len());

    clock.advance(1);
    assert!(page.tick());
    let visible: Vec<&str> = page.visible().iter().map(|c| c.article.id.as_str()).collect();
    assert_eq!(visible, vec!["b5"]);
}

#[test]
fn configured_debounce_interval_is_used() {
    let clock = Rc::new(ManualClock::new(START_MS));
    let ctx = AppContext::new(MemoryBackend::new(), Catalog::builtin(START_MS), clock.clone())
        .with_search_debounce_ms(20);
    let mut page = ToolsPage::mount(&ctx);

    page.type_search("falco");
    clock.advance(20);

    assert!(page.tick());
    assert_eq!(page.visible().len(), 1);
}

#[test]
fn tools_page_filter_and_sort_apply_immediately() {
    let (ctx, _clock) = context_with(MemoryBackend::new());
    let mut page = ToolsPage::mount(&ctx);

    assert_eq!(
        page.categories(),
        vec!["Scanning", "SAST", "Supply Chain", "Policy", "Runtime"]
    );
    page.select_category("Supply Chain");
    let names: Vec<&str> = page.visible().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["in-toto", "Sigstore Cosign"]);

    page.select_category("all");
    page.select_sort(SortKey::Category);
    assert_eq!(page.visible().first().map(|t| t.id.as_str()), Some("t4"));
}

#[test]
fn articles_bookmarks_persist_and_survive_remount() {
    let backend = MemoryBackend::new();
    let (ctx, _clock) = context_with(&backend);

    let mut page = ArticlesPage::mount(&ctx);
    assert_eq!(page.toggle_bookmark("b3"), Ok(true));
    assert_eq!(page.toggle_bookmark("b1"), Ok(true));
    assert_eq!(
        page.toggle_bookmark("b404"),
        Err(PageError::UnknownItem("b404".to_string()))
    );
    page.unmount();

    let page = ArticlesPage::mount(&ctx);
    let saved: Vec<&str> = page.saved_articles().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(saved, vec!["b1", "b3"]);
    assert!(page
        .visible()
        .iter()
        .any(|card| card.article.id == "b3" && card.bookmarked));
}

#[test]
fn unmount_cancels_pending_search() {
    let (ctx, clock) = context_with(MemoryBackend::new());
    let mut page = ArticlesPage::mount(&ctx);
    page.type_search("sbom");
    page.unmount();

    clock.advance(1_000);
    let page = ArticlesPage::mount(&ctx);
    assert_eq!(page.query().debounced_query, "");
    assert_eq!(page.query().raw_input, "");
}

#[test]
fn completing_a_step_updates_progress() {
    let (ctx, _clock) = context_with(MemoryBackend::new());
    let mut page = PathPage::mount(&ctx);

    let before = page.progress();
    assert_eq!((before.completed, before.total, before.percent), (0, 7, 0));

    assert_eq!(page.toggle_step("p3"), Ok(true));
    let after = page.progress();
    assert_eq!((after.completed, after.total, after.percent), (1, 7, 14));
    assert!(page.rows().iter().any(|row| row.step.id == "p3" && row.done));

    page.set_step_done("p3", true).unwrap();
    assert_eq!(page.progress().completed, 1);
    page.set_step_done("p3", false).unwrap();
    assert_eq!(page.progress().completed, 0);
}

#[test]
fn dangling_stored_step_is_ignored() {
    let backend = MemoryBackend::new();
    let mut stored = BTreeMap::new();
    stored.insert("p99", true);
    stored.insert("p1", true);
    KvStore::new(&backend).set(&StorageKey::annotations(&Namespace::path_progress()), &stored);

    let (ctx, _clock) = context_with(&backend);
    let mut page = PathPage::mount(&ctx);

    assert!(!page.is_done("p2"));
    assert!(page.rows().iter().all(|row| row.step.id != "p99"));
    assert_eq!(page.progress().completed, 1);
    assert_eq!(page.progress().percent, 14);
    assert_eq!(
        page.toggle_step("p99"),
        Err(PageError::UnknownItem("p99".to_string()))
    );
}

#[test]
fn path_rows_report_approximate_hours() {
    let (ctx, _clock) = context_with(MemoryBackend::new());
    let page = PathPage::mount(&ctx);

    let hours: Vec<u32> = page.rows().iter().map(|row| row.approx_hours).collect();
    assert_eq!(hours, vec![4, 3, 5, 4, 4, 3, 3]);
}

#[test]
fn theme_toggle_persists_across_contexts() {
    let backend = MemoryBackend::new();
    {
        let (ctx, _clock) = context_with(&backend);
        assert_eq!(ctx.theme(), Theme::Dark);
        assert_eq!(ctx.toggle_theme(), Theme::Light);
    }

    let (ctx, _clock) = context_with(&backend);
    assert_eq!(ctx.theme(), Theme::Light);
}

#[test]
fn render_failure_shows_notice_and_stays_failed() {
    let (ctx, _clock) = context_with(MemoryBackend::new());

    assert_eq!(ctx.render("tools", || 7).rendered(), Some(7));

    let failed: RenderOutcome<()> = ctx.render("articles", || panic!("broken card"));
    assert_eq!(failed, RenderOutcome::Failed(FailureNotice::GENERIC));
    assert!(ctx.is_session_failed());

    let later = ctx.render("tools", || 7);
    assert!(later.is_failed());
    assert_eq!(FailureNotice::GENERIC.title, "Something went wrong");
}

#[test]
fn community_send_and_channel_switch() {
    let (ctx, clock) = context_with(MemoryBackend::new());
    let mut page = CommunityPage::mount(&ctx);

    assert_eq!(page.active_channel().map(|c| c.as_str()), Some("#general"));
    assert_eq!(page.messages().len(), 1);

    assert_eq!(page.send("   "), Err(PageError::EmptyMessage));
    assert_eq!(page.messages().len(), 1);

    clock.advance(10);
    let sent = page.send("  hello team  ").unwrap();
    assert_eq!(sent.author, LOCAL_AUTHOR);
    assert_eq!(sent.text, "hello team");
    assert_eq!(page.messages().last(), Some(&sent));

    assert_eq!(
        page.select_channel("#random"),
        Err(PageError::UnknownChannel("#random".to_string()))
    );
    assert_eq!(page.active_channel().map(|c| c.as_str()), Some("#general"));

    page.select_channel("#help").unwrap();
    assert_eq!(page.messages().len(), 1);
    assert_eq!(page.messages()[0].id, "m3");

    page.select_channel("#general").unwrap();
    assert_eq!(page.messages().len(), 2);
    assert_eq!(page.messages()[1].text, "hello team");
    page.unmount();
}

#[test]
fn state_survives_reload_from_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devhub_local_storage.sqlite3");

    {
        let (ctx, _clock) = context_with(SqliteBackend::open(&path).unwrap());
        ctx.toggle_theme();
        let mut articles = ArticlesPage::mount(&ctx);
        articles.toggle_bookmark("b2").unwrap();
        let mut path_page = PathPage::mount(&ctx);
        path_page.toggle_step("p1").unwrap();
        let mut community = CommunityPage::mount(&ctx);
        community.send("persisted").unwrap();
    }

    let (ctx, _clock) = context_with(SqliteBackend::open(&path).unwrap());
    assert_eq!(ctx.theme(), Theme::Light);
    assert!(ArticlesPage::mount(&ctx).is_bookmarked("b2"));
    assert!(PathPage::mount(&ctx).is_done("p1"));
    let community = CommunityPage::mount(&ctx);
    assert_eq!(
        community.messages().last().map(|m| m.text.as_str()),
        Some("persisted")
    );
}

#[test]
fn disabled_storage_keeps_session_usable() {
    let (ctx, _clock) = context_with(MemoryBackend::disabled());

    assert_eq!(ctx.theme(), Theme::Dark);
    assert_eq!(ctx.toggle_theme(), Theme::Light);
    assert_eq!(ctx.theme(), Theme::Light);

    let mut community = CommunityPage::mount(&ctx);
    assert!(community.send("offline").is_ok());
    assert_eq!(community.messages().len(), 2);
}

#[test]
fn bookmark_toggles_alternate_when_storage_is_disabled() {
    let (ctx, _clock) = context_with(MemoryBackend::disabled());
    let mut page = ArticlesPage::mount(&ctx);

    assert_eq!(page.toggle_bookmark("b1"), Ok(true));
    assert!(page.is_bookmarked("b1"));
    assert_eq!(page.toggle_bookmark("b1"), Ok(false));
    assert!(!page.is_bookmarked("b1"));
    assert!(page.saved_articles().is_empty());
}

#[test]
fn step_toggles_alternate_when_quota_is_full() {
    let backend = MemoryBackend::with_quota(8);
    let (ctx, _clock) = context_with(&backend);
    let mut page = PathPage::mount(&ctx);

    assert_eq!(page.toggle_step("p4"), Ok(true));
    assert_eq!(page.progress().completed, 1);
    assert_eq!(page.toggle_step("p4"), Ok(false));
    assert!(!page.is_done("p4"));
    assert_eq!(page.progress().completed, 0);

    page.set_step_done("p2", true).unwrap();
    assert!(page.is_done("p2"));
    assert!(backend.is_empty());
}

#[test]
fn state_written_by_the_site_is_restored() {
    let backend = MemoryBackend::new();
    backend.insert_raw(&StorageKey::Theme, "light");
    backend.insert_raw(
        &StorageKey::annotations(&Namespace::saved_articles()),
        r#"{"b2":true,"b5":false}"#,
    );
    backend.insert_raw(
        &StorageKey::annotations(&Namespace::path_progress()),
        r#"["p1","p2"]"#,
    );

    let (ctx, _clock) = context_with(&backend);
    assert_eq!(ctx.theme(), Theme::Light);

    let articles = ArticlesPage::mount(&ctx);
    let saved: Vec<&str> = articles.saved_articles().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(saved, vec!["b2"]);

    let path = PathPage::mount(&ctx);
    assert_eq!(path.progress().completed, 2);
    assert_eq!(path.progress().percent, 29);
}

#[test]
fn theme_is_written_as_bare_text() {
    let backend = MemoryBackend::new();
    let (ctx, _clock) = context_with(&backend);

    ctx.toggle_theme();

    let raw = devhub_core::StorageBackend::read_raw(&backend, &StorageKey::Theme).unwrap();
    assert_eq!(raw.as_deref(), Some("light"));
}
