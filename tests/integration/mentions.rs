//! Integration tests for mention lookup over synced projects

use std::sync::Arc;

use super::common::fetchers::{ScriptedFetcher, StaticFetcher};
use super::common::fixtures::{flat_tree, project_dir, sample_tree};
use super::common::readers::GatedReader;
use workspace::{Config, MentionListState, Project, Workspace};

fn static_workspace() -> (Arc<StaticFetcher>, Workspace) {
    let fetcher = Arc::new(StaticFetcher::new(sample_tree()));
    let ws = Workspace::new(
        Config::default(),
        fetcher.clone(),
        Arc::new(GatedReader::new()),
    );
    (fetcher, ws)
}

#[tokio::test]
async fn test_mention_filter_finds_nested_file() {
    let (_, ws) = static_workspace();
    let errors = ws.sync_projects(vec![Project::new("p1", "/work/p1")]).await;
    assert!(errors.is_empty());

    let index = ws.mentions();
    let hits = index.filter("b");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "b.ts");
    assert_eq!(hits[0].path, "/work/p1/sub/b.ts");

    // Case-insensitive on name and path
    assert_eq!(index.filter("SUB").len(), 1);
    assert_eq!(index.filter("").len(), 2);
    assert!(index.filter("zzz").is_empty());
}

#[tokio::test]
async fn test_mention_ids_unique_across_projects() {
    let (_, ws) = static_workspace();
    ws.sync_projects(vec![
        Project::new("p1", "/work/p1"),
        Project::new("p2", "/work/p2"),
    ])
    .await;

    let index = ws.mentions();
    let ids: Vec<&str> = index.files().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["p1:/a.ts", "p1:/sub/b.ts", "p2:/a.ts", "p2:/sub/b.ts"]);
    assert_eq!(
        index.find_by_path("/work/p2/a.ts").map(|f| f.id.as_str()),
        Some("p2:/a.ts")
    );
}

#[tokio::test]
async fn test_sync_projects_skips_cached_and_evicts_removed() {
    let (fetcher, ws) = static_workspace();
    let p1 = Project::new("p1", "/work/p1");
    let p2 = Project::new("p2", "/work/p2");

    ws.sync_projects(vec![p1.clone()]).await;
    ws.sync_projects(vec![p1.clone(), p2.clone()]).await;
    assert_eq!(fetcher.calls(), 2);

    ws.sync_projects(vec![p2]).await;
    assert!(!ws.cache().contains("p1"));
    assert!(ws.mentions().files().iter().all(|f| f.id.starts_with("p2:")));
}

#[tokio::test]
async fn test_project_without_tree_contributes_nothing() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.script().send(Ok(flat_tree(&["ok.ts"]))).unwrap();
    fetcher.script().send(Err("boom".into())).unwrap();
    let ws = Workspace::new(
        Config::default(),
        fetcher.clone(),
        Arc::new(GatedReader::new()),
    );

    let errors = ws
        .sync_projects(vec![
            Project::new("good", "/work/good"),
            Project::new("bad", "/work/bad"),
        ])
        .await;
    assert_eq!(errors.len(), 1);
    assert_eq!(ws.projects().len(), 2);

    let index = ws.mentions();
    assert_eq!(index.len(), 1);
    assert_eq!(index.files()[0].path, "/work/good/ok.ts");
}

#[tokio::test]
async fn test_refresh_project_updates_mentions() {
    let fetcher = Arc::new(ScriptedFetcher::new());
    fetcher.script().send(Ok(flat_tree(&["before.ts"]))).unwrap();
    fetcher.script().send(Ok(flat_tree(&["after.ts"]))).unwrap();
    let ws = Workspace::new(Config::default(), fetcher, Arc::new(GatedReader::new()));

    ws.sync_projects(vec![Project::new("p1", "/work/p1")]).await;
    assert_eq!(ws.mentions().filter("before").len(), 1);

    ws.refresh_project("p1").await.unwrap();
    let index = ws.mentions();
    assert!(index.filter("before").is_empty());
    assert_eq!(index.filter("after").len(), 1);
}

#[tokio::test]
async fn test_mention_list_navigation() {
    let (_, ws) = static_workspace();
    ws.sync_projects(vec![Project::new("p1", "/work/p1")]).await;
    let index = ws.mentions();

    let mut list = MentionListState::new(ws.config().mentions.max_visible);
    list.refilter(&index);
    assert_eq!(list.visible_len(), 2);
    list.select_next();
    assert_eq!(list.selected_file(&index).unwrap().name, "b.ts");

    list.set_query("a.t", &index);
    assert_eq!(list.visible_len(), 1);
    assert_eq!(list.selected_file(&index).unwrap().name, "a.ts");
}

#[tokio::test]
async fn test_local_workspace_lists_real_files() {
    let dir = project_dir();
    let root = dir.path().display().to_string();
    let ws = Workspace::local(Config::default());

    let errors = ws.sync_projects(vec![Project::new("local", root.clone())]).await;
    assert!(errors.is_empty());

    let index = ws.mentions();
    let mut paths: Vec<&str> = index.files().iter().map(|f| f.path.as_str()).collect();
    paths.sort();
    assert_eq!(
        paths,
        vec![
            format!("{}/README.md", root),
            format!("{}/src/lib.rs", root),
            format!("{}/src/nested/deep.rs", root),
        ]
    );
}
