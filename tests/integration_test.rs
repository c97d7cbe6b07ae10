use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio_test::{assert_err, assert_ok};
use work_presenters::models::MemberKind;
use work_presenters::presenters::{FileSetKind, PresenterSettings};
use work_presenters::services::{Ability, InMemoryFeaturedWorks, InMemoryUsers, PermissionSet};
use work_presenters::{
    build_presenters, AppError, AppResult, MemberPresenter, MemoryIndex, PresenterContext, SearchIndex,
    SolrQuery, WorkShowPresenter,
};

// ========== 夹具 ==========

fn work(id: &str, title: &str, representative: Option<&str>) -> Value {
    json!({
        "id": id,
        "title_tesim": [title],
        "has_model_ssim": ["GenericWork"],
        "hasRelatedMediaFragment_ssim": representative.map(|r| vec![r]).unwrap_or_default(),
    })
}

fn file_set(id: &str) -> Value {
    json!({"id": id, "title_tesim": [format!("file {}", id)], "has_model_ssim": ["FileSet"]})
}

fn list_source(parent: &str, targets: &[&str]) -> Value {
    json!({"id": format!("{}/list_source", parent), "ordered_targets_ssim": targets})
}

/// 为每个成员生成一条代理记录
fn proxies(parent: &str, targets: &[&str]) -> Vec<Value> {
    targets
        .iter()
        .enumerate()
        .map(|(i, target)| {
            json!({
                "id": format!("{}-proxy-{}", parent, i),
                "proxy_in_ssi": parent,
                "ordered_targets_ssim": [target],
            })
        })
        .collect()
}

fn fixture_rows() -> Vec<Value> {
    let mut rows = vec![
        json!({
            "id": "w1",
            "title_tesim": ["Parent Work"],
            "has_model_ssim": ["GenericWork"],
            "hasRelatedMediaFragment_ssim": ["w2"],
            "member_of_collection_ids_ssim": ["col1", "col2", "col-missing"],
            "depositor_tesim": ["user@example.com"],
            "visibility_ssi": "open",
        }),
        list_source("w1", &["w2", "fs1", "ghost", "fs2", "w3"]),
        work("w2", "Child Work", Some("fs3")),
        list_source("w2", &["fs3"]),
        work("w3", "Leafless Work", None),
        work("w4", "Points At Work", Some("w3")),
        work("wa", "Cycle A", Some("wb")),
        work("wb", "Cycle B", Some("wa")),
        work("w-missing-rep", "Missing Rep", Some("nowhere")),
        work("w-odd", "Odd Member Ids", Some("fs,1")),
        list_source("w-odd", &["fs,1", "", "fs2"]),
        file_set("fs1"),
        file_set("fs2"),
        file_set("fs3"),
        file_set("fs9"),
        file_set("fs,1"),
        json!({"id": "col1", "title_tesim": ["First Collection"], "has_model_ssim": ["Collection"]}),
        json!({"id": "col2", "title_tesim": ["An Admin Set"], "has_model_ssim": ["AdminSet"]}),
    ];
    rows.extend(proxies("w1", &["w2", "fs1", "ghost", "fs2", "w3"]));
    rows.extend(proxies("w2", &["fs3"]));
    rows.extend(proxies("w-odd", &["fs,1", "", "fs2"]));
    rows
}

fn index() -> Arc<MemoryIndex> {
    Arc::new(MemoryIndex::from_json(fixture_rows()))
}

fn context(index: Arc<MemoryIndex>, ability: impl Ability + 'static) -> PresenterContext {
    PresenterContext::from_backend(index, Arc::new(ability))
}

async fn load(ctx: &PresenterContext, id: &str) -> WorkShowPresenter {
    WorkShowPresenter::load(id, ctx.clone())
        .await
        .unwrap()
        .expect("夹具中应存在该作品")
}

fn ids<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items.into_iter().map(String::from).collect()
}

/// 永远不可用的索引
struct UnavailableIndex;

#[async_trait]
impl SearchIndex for UnavailableIndex {
    async fn query(&self, _query: &SolrQuery) -> AppResult<Vec<work_presenters::models::IndexRow>> {
        Err(AppError::unavailable("connection refused"))
    }
}

// ========== 有序成员与分类 ==========

#[tokio::test]
async fn test_ordered_ids_follow_proxy_order() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let ordered = work.ordered_ids().await.unwrap();
    assert_eq!(ordered, ids(["w2", "fs1", "ghost", "fs2", "w3"]).as_slice());
}

#[tokio::test]
async fn test_file_set_ids_are_subset_of_ordered_ids() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let file_sets = work.file_set_ids().await.unwrap().clone();
    let ordered: HashSet<String> = work.ordered_ids().await.unwrap().iter().cloned().collect();

    assert_eq!(file_sets, ids(["fs1", "fs2"]).into_iter().collect::<HashSet<_>>());
    assert!(file_sets.is_subset(&ordered));
}

#[tokio::test]
async fn test_member_lookups_are_memoized() {
    let index = index();
    let ctx = context(index.clone(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    work.ordered_ids().await.unwrap();
    work.file_set_ids().await.unwrap();
    let after_first = index.query_count();

    work.ordered_ids().await.unwrap();
    work.file_set_ids().await.unwrap();
    work.clone().ordered_ids().await.unwrap();
    assert_eq!(index.query_count(), after_first);
}

// ========== 成员展示器 ==========

#[tokio::test]
async fn test_file_set_and_work_presenters_preserve_order() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let file_sets: Vec<&str> = work.file_set_presenters().await.unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(file_sets, vec!["fs1", "fs2"]);

    // ghost 没有后备文档，被过滤
    let works: Vec<&str> = work.work_presenters().await.unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(works, vec!["w2", "w3"]);
}

#[tokio::test]
async fn test_ordered_member_presenters_select_kind_per_id() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let members = work.ordered_member_presenters().await.unwrap();
    let kinds: Vec<(&str, MemberKind)> = members.iter().map(|m| (m.id(), m.kind())).collect();
    assert_eq!(
        kinds,
        vec![
            ("w2", MemberKind::Composite),
            ("fs1", MemberKind::Leaf),
            ("fs2", MemberKind::Leaf),
            ("w3", MemberKind::Composite),
        ]
    );
}

#[tokio::test]
async fn test_nested_work_resolves_its_own_members() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let child = work.work_presenters().await.unwrap()[0].clone();
    assert_eq!(child.id(), "w2");
    let nested: Vec<&str> = child.file_set_presenters().await.unwrap().iter().map(|p| p.id()).collect();
    assert_eq!(nested, vec!["fs3"]);
}

#[tokio::test]
async fn test_build_presenters_drops_missing_documents() {
    let ctx = context(index(), PermissionSet::anonymous());

    let presenters = build_presenters(&ids(["fs1", "missing"]), &FileSetKind, &ctx).await.unwrap();
    assert_eq!(presenters.len(), 1);
    assert_eq!(presenters[0].id(), "fs1");

    let empty = build_presenters(&[], &FileSetKind, &ctx).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_build_presenters_tolerates_comma_and_empty_ids() {
    let ctx = context(index(), PermissionSet::anonymous());

    let presenters = assert_ok!(build_presenters(&ids(["fs,1", "", "fs2"]), &FileSetKind, &ctx).await);
    let found: Vec<&str> = presenters.iter().map(|p| p.id()).collect();
    assert_eq!(found, vec!["fs,1", "fs2"]);

    let presenters = assert_ok!(build_presenters(&ids(["", "fs2"]), &FileSetKind, &ctx).await);
    assert_eq!(presenters.len(), 1);
    assert_eq!(presenters[0].id(), "fs2");
}

#[tokio::test]
async fn test_work_with_comma_and_empty_member_ids() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w-odd").await;

    let file_sets: Vec<&str> = assert_ok!(work.file_set_presenters().await).iter().map(|p| p.id()).collect();
    assert_eq!(file_sets, vec!["fs,1", "fs2"]);
    assert!(assert_ok!(work.work_presenters().await).is_empty());

    let representative = assert_ok!(work.representative_presenter().await).expect("代表成员应存在");
    assert_eq!(representative.id(), "fs,1");
    assert_eq!(representative.kind(), MemberKind::Leaf);
}

#[tokio::test]
async fn test_build_presenters_is_idempotent() {
    let ctx = context(index(), PermissionSet::anonymous());
    let request = ids(["fs2", "fs1"]);

    let first = build_presenters(&request, &FileSetKind, &ctx).await.unwrap();
    let second = build_presenters(&request, &FileSetKind, &ctx).await.unwrap();

    assert_eq!(first.len(), 2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.document(), b.document());
    }
    assert_eq!(first[0].id(), "fs2");
}

// ========== 代表成员 ==========

#[tokio::test]
async fn test_representative_delegates_through_child_work() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let representative = work.representative_presenter().await.unwrap().unwrap();
    assert_eq!(representative.id(), "fs3");
    assert!(matches!(representative, MemberPresenter::FileSet(_)));
}

#[tokio::test]
async fn test_representative_without_deeper_representative_is_returned() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w4").await;

    let representative = work.representative_presenter().await.unwrap().unwrap();
    assert_eq!(representative.id(), "w3");
    assert_eq!(representative.kind(), MemberKind::Composite);
}

#[tokio::test]
async fn test_absent_or_missing_representative() {
    let ctx = context(index(), PermissionSet::anonymous());

    let work = load(&ctx, "w3").await;
    assert!(work.representative_presenter().await.unwrap().is_none());

    let work = load(&ctx, "w-missing-rep").await;
    assert!(work.representative_presenter().await.unwrap().is_none());
}

#[tokio::test]
async fn test_representative_cycle_terminates() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "wa").await;

    let representative = work.representative_presenter().await.unwrap().unwrap();
    assert_eq!(representative.id(), "wb");
}

#[tokio::test]
async fn test_representative_depth_limit() {
    let settings = PresenterSettings {
        max_representative_depth: 0,
        ..PresenterSettings::default()
    };
    let ctx = context(index(), PermissionSet::anonymous()).with_settings(settings);
    let work = load(&ctx, "w1").await;

    let representative = work.representative_presenter().await.unwrap().unwrap();
    assert_eq!(representative.id(), "w2");
}

// ========== 集合 ==========

#[tokio::test]
async fn test_grouped_presenters() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;

    let collections = work.member_of_collection_presenters().await.unwrap();
    assert_eq!(collections.len(), 2);

    let grouped = work.grouped_presenters(None, &[]).await.unwrap();
    let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["admin_set", "collection"]);
    assert_eq!(grouped["collection"][0].id(), "col1");

    let filtered = work.grouped_presenters(Some("collection"), &[]).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert!(filtered.contains_key("collection"));

    let without = work.grouped_presenters(None, &["collection"]).await.unwrap();
    assert_eq!(without.keys().collect::<Vec<_>>(), vec!["admin_set"]);
}

// ========== 权限与推荐 ==========

#[tokio::test]
async fn test_link_name_and_editor() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;
    assert_eq!(work.link_name(), "File");
    assert!(!work.is_editor());

    let ctx = context(index(), PermissionSet::default().with_edit("w1"));
    let work = load(&ctx, "w1").await;
    assert_eq!(work.link_name(), "Parent Work");
    assert!(work.is_editor());
}

#[tokio::test]
async fn test_tweeter() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;
    assert_eq!(assert_ok!(work.tweeter().await), "@HydraSphere");

    let users = InMemoryUsers::default().with_user("user@example.com", "repoadmin");
    let ctx = context(index(), PermissionSet::anonymous()).with_users(Arc::new(users));
    let work = load(&ctx, "w1").await;
    assert_eq!(assert_ok!(work.tweeter().await), "@repoadmin");
}

#[tokio::test]
async fn test_presenter_types() {
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;
    assert_eq!(work.presenter_types(), vec!["generic_work", "collection"]);
}

#[tokio::test]
async fn test_feature_links() {
    // 没有推荐权限
    let ctx = context(index(), PermissionSet::anonymous());
    let work = load(&ctx, "w1").await;
    assert!(!work.work_featurable());
    assert!(!work.display_feature_link().await.unwrap());

    // 可推荐，尚未推荐
    let ctx = context(index(), PermissionSet::default().with_featuring());
    let work = load(&ctx, "w1").await;
    assert!(work.work_featurable());
    assert!(work.display_feature_link().await.unwrap());
    assert!(!work.display_unfeature_link().await.unwrap());

    // 已推荐
    let featured = InMemoryFeaturedWorks::new(5).with_featured("w1");
    let ctx = context(index(), PermissionSet::default().with_featuring()).with_featured_works(Arc::new(featured));
    let work = load(&ctx, "w1").await;
    assert!(!work.display_feature_link().await.unwrap());
    assert!(work.display_unfeature_link().await.unwrap());

    // 推荐数量已满
    let full = InMemoryFeaturedWorks::new(1).with_featured("other");
    let ctx = context(index(), PermissionSet::default().with_featuring()).with_featured_works(Arc::new(full));
    let work = load(&ctx, "w1").await;
    assert!(!work.display_feature_link().await.unwrap());

    // 非公开作品不可推荐
    let ctx = context(index(), PermissionSet::default().with_featuring());
    let work = load(&ctx, "w2").await;
    assert!(!work.work_featurable());
}

// ========== 依赖不可用 ==========

#[tokio::test]
async fn test_index_failure_propagates() {
    let store = index();
    let ctx = PresenterContext::new(Arc::new(UnavailableIndex), store, Arc::new(PermissionSet::anonymous()));
    let work = load(&ctx, "w1").await;

    let err = assert_err!(work.ordered_ids().await);
    assert!(err.is_dependency_unavailable());
    assert!(work.file_set_presenters().await.is_err());
    assert!(work.representative_presenter().await.is_err());
}
