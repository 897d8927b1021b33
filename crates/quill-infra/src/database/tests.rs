use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::{BlogPost, BlogQuery, BlogState, ListBlogsParams, Scope};
use quill_core::ports::{BaseRepository, BlogRepository};

use crate::database::entity::blog;
use crate::database::postgres_repo::PostgresBlogRepository;

fn model(title: &str, state: blog::State, read_count: i64) -> blog::Model {
    let now = Utc::now();
    blog::Model {
        id: Uuid::now_v7(),
        title: title.to_owned(),
        description: "A description".to_owned(),
        body: "Some body text".to_owned(),
        tags: vec!["rust".to_owned()],
        author: "Grace Hopper".to_owned(),
        owner_id: Uuid::now_v7(),
        state,
        read_count,
        read_time: 1.5,
        created_at: now.into(),
        last_updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_blog_by_id() {
    let row = model("Test Post", blog::State::Draft, 0);
    let id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let repo = PostgresBlogRepository::new(db);

    let result: Option<BlogPost> = repo.find_by_id(id).await.unwrap();

    let blog = result.unwrap();
    assert_eq!(blog.title, "Test Post");
    assert_eq!(blog.id, id);
    assert_eq!(blog.state, BlogState::Draft);
}

#[tokio::test]
async fn test_find_page_maps_rows_in_order() {
    let first = model("First", blog::State::Published, 9);
    let second = model("Second", blog::State::Published, 3);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![first, second]])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let query = BlogQuery::resolve(
        Scope::Public,
        ListBlogsParams {
            sort: Some("read_count".into()),
            tags: Some("Rust".into()),
            ..Default::default()
        },
    )
    .unwrap();
    let page = repo.find_page(&query).await.unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page[0].title, "First");
    assert_eq!(page[1].read_count, 3);
}

#[tokio::test]
async fn test_find_page_empty_result() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<blog::Model>::new()])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let query = BlogQuery::resolve(Scope::Public, ListBlogsParams::default()).unwrap();
    let page = repo.find_page(&query).await.unwrap();
    assert!(page.is_empty());

    // one SELECT, no follow-up queries
    assert_eq!(repo.db.into_transaction_log().len(), 1);
}

#[tokio::test]
async fn test_increment_read_count_returns_updated_row() {
    let row = model("Popular", blog::State::Published, 42);
    let id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let blog = repo.increment_read_count(id).await.unwrap().unwrap();
    assert_eq!(blog.read_count, 42);
    assert_eq!(blog.id, id);
}

#[tokio::test]
async fn test_increment_read_count_misses_unpublished() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<blog::Model>::new()])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    assert!(repo.increment_read_count(Uuid::now_v7()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_returns_removed_row() {
    let row = model("Doomed", blog::State::Draft, 0);
    let id = row.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let deleted: Option<BlogPost> = repo.delete(id).await.unwrap();
    let deleted = deleted.unwrap();
    assert_eq!(deleted.title, "Doomed");

    assert_eq!(repo.db.into_transaction_log().len(), 2);
}

#[tokio::test]
async fn test_update_leaves_read_count_to_the_database() {
    let stale = model("Edited", blog::State::Published, 0);
    let mut live = stale.clone();
    live.body = "Edited body".to_owned();
    live.read_count = 7;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![live]])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let mut edit = BlogPost::from(stale);
    edit.body = "Edited body".to_owned();
    let saved: BlogPost = repo.update(edit).await.unwrap();
    assert_eq!(saved.read_count, 7);

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(sql.starts_with("UPDATE"));
    assert!(!sql.contains(r#""read_count" ="#));
}

#[tokio::test]
async fn test_insert_writes_read_count() {
    let row = model("Fresh", blog::State::Draft, 0);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row.clone()]])
        .into_connection();
    let repo = PostgresBlogRepository::new(db);

    let _: BlogPost = repo.insert(BlogPost::from(row)).await.unwrap();

    let log = repo.db.into_transaction_log();
    let sql = &log[0].statements()[0].sql;
    assert!(sql.starts_with("INSERT"));
    assert!(sql.contains(r#""read_count""#));
}
