use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use library_catalog::db;
use library_catalog::domain::{BookDataProvider, DomainError, ExternalBookData};
use library_catalog::models::book::Availability;
use library_catalog::repositories::BookFilter;
use library_catalog::services::author_service::AuthorService;
use library_catalog::services::book_service::{BookCreate, BookService, BookUpdate};

// Deterministic provider double: always returns the configured result
struct StubProvider {
    data: Option<ExternalBookData>,
}

#[async_trait]
impl BookDataProvider for StubProvider {
    async fn fetch_book_data(&self, _title: &str) -> Option<ExternalBookData> {
        self.data.clone()
    }
}

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

fn service(db: &DatabaseConnection, data: Option<ExternalBookData>) -> BookService {
    BookService::new(db.clone(), Arc::new(StubProvider { data }))
}

// Helper to create a test author
async fn create_test_author(db: &DatabaseConnection, first_name: &str, last_name: &str) -> i32 {
    let now = chrono::Utc::now().to_rfc3339();
    let author = library_catalog::models::author::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        created_at: Set(now.clone()),
        updated_at: Set(now),
        ..Default::default()
    };
    let res = author.insert(db).await.expect("Failed to create author");
    res.id
}

fn book_create(title: &str, genre: &str, year: i32, authors: Vec<i32>) -> BookCreate {
    BookCreate {
        title: title.to_string(),
        year_published: year,
        genre: genre.to_string(),
        num_pages: 320,
        availability: Availability::Available,
        authors,
    }
}

#[tokio::test]
async fn test_add_book_fails_when_author_missing() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(&db, None);

    let err = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id, 999]))
        .await
        .expect_err("add_book should fail on unresolved author ids");

    match err {
        DomainError::AuthorsNotFound(missing) => assert_eq!(missing, vec![999]),
        other => panic!("Expected AuthorsNotFound, got {:?}", other),
    }

    // No partial write
    let books = svc
        .list_books(&BookFilter::default())
        .await
        .expect("list_books failed");
    assert!(books.is_empty());
}

#[tokio::test]
async fn test_add_book_attaches_resolved_authors() {
    let db = setup_test_db().await;
    let pratchett = create_test_author(&db, "Terry", "Pratchett").await;
    let gaiman = create_test_author(&db, "Neil", "Gaiman").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create(
            "Good Omens",
            "Fantasy",
            1990,
            vec![gaiman, pratchett],
        ))
        .await
        .expect("add_book failed");

    assert!(book.id > 0);
    assert!(!book.created_at.is_empty());

    let mut ids: Vec<i32> = book.authors.iter().map(|a| a.id).collect();
    ids.sort();
    let mut expected = vec![pratchett, gaiman];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_add_book_applies_enrichment() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(
        &db,
        Some(ExternalBookData {
            description: Some("Epic of Arrakis".to_string()),
            cover_url: Some("https://covers.example.org/b/id/1-L.jpg".to_string()),
        }),
    );

    let book = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    assert_eq!(book.description.as_deref(), Some("Epic of Arrakis"));
    assert_eq!(
        book.cover_url.as_deref(),
        Some("https://covers.example.org/b/id/1-L.jpg")
    );

    // Enrichment must be persisted, not just present on the returned value
    let fetched = svc
        .get_book_by_id(book.id)
        .await
        .expect("get_book_by_id failed")
        .expect("book should exist");
    assert_eq!(fetched.description.as_deref(), Some("Epic of Arrakis"));
}

#[tokio::test]
async fn test_add_book_without_provider_match_leaves_fields_absent() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    assert!(book.description.is_none());
    assert!(book.cover_url.is_none());
}

#[tokio::test]
async fn test_get_book_by_id_is_idempotent() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    let first = svc
        .get_book_by_id(book.id)
        .await
        .expect("get failed")
        .expect("book should exist");
    let second = svc
        .get_book_by_id(book.id)
        .await
        .expect("get failed")
        .expect("book should exist");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_books_filters_combine_with_and() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Some", "Author").await;
    let svc = service(&db, None);

    svc.add_book(book_create("A", "Sci-Fi", 2000, vec![author_id]))
        .await
        .expect("add_book failed");
    svc.add_book(book_create("B", "Sci-Fi", 2010, vec![author_id]))
        .await
        .expect("add_book failed");
    svc.add_book(book_create("C", "Fantasy", 2000, vec![author_id]))
        .await
        .expect("add_book failed");

    let filter = BookFilter {
        genre: Some("Sci-Fi".to_string()),
        year_published: Some(2000),
        ..Default::default()
    };
    let books = svc.list_books(&filter).await.expect("list_books failed");
    let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["A"]);

    // Genre match is case-insensitive
    let filter = BookFilter {
        genre: Some("sci-fi".to_string()),
        ..Default::default()
    };
    let books = svc.list_books(&filter).await.expect("list_books failed");
    assert_eq!(books.len(), 2);
}

#[tokio::test]
async fn test_list_books_title_substring_match() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "J.R.R.", "Tolkien").await;
    let svc = service(&db, None);

    svc.add_book(book_create("The Hobbit", "Fantasy", 1937, vec![author_id]))
        .await
        .expect("add_book failed");
    svc.add_book(book_create(
        "The Fellowship of the Ring",
        "Fantasy",
        1954,
        vec![author_id],
    ))
    .await
    .expect("add_book failed");

    let filter = BookFilter {
        title: Some("hobbit".to_string()),
        ..Default::default()
    };
    let books = svc.list_books(&filter).await.expect("list_books failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Hobbit");
}

#[tokio::test]
async fn test_list_books_filters_by_availability() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Some", "Author").await;
    let svc = service(&db, None);

    svc.add_book(book_create("On the shelf", "Fiction", 2001, vec![author_id]))
        .await
        .expect("add_book failed");

    let mut checked_out = book_create("Out the door", "Fiction", 2002, vec![author_id]);
    checked_out.availability = Availability::CheckedOut;
    svc.add_book(checked_out).await.expect("add_book failed");

    let filter = BookFilter {
        availability: Some(Availability::CheckedOut),
        ..Default::default()
    };
    let books = svc.list_books(&filter).await.expect("list_books failed");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Out the door");
}

#[tokio::test]
async fn test_delete_book() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(&db, None);

    // Deleting a non-existent id is "not found", not a delete failure
    let err = svc
        .delete_book(999)
        .await
        .expect_err("delete of missing book should fail");
    assert!(matches!(err, DomainError::BookNotFound(999)));

    let book = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    svc.delete_book(book.id).await.expect("delete_book failed");

    let fetched = svc
        .get_book_by_id(book.id)
        .await
        .expect("get_book_by_id failed");
    assert!(fetched.is_none());

    // No cascading delete of the author
    let authors = AuthorService::new(db.clone())
        .list_authors()
        .await
        .expect("list_authors failed");
    assert_eq!(authors.len(), 1);
    assert!(authors[0].books.is_empty());
}

#[tokio::test]
async fn test_update_book_replaces_author_set() {
    let db = setup_test_db().await;
    let first = create_test_author(&db, "First", "Author").await;
    let second = create_test_author(&db, "Second", "Author").await;
    let third = create_test_author(&db, "Third", "Author").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create("Shared Work", "Essays", 2015, vec![first]))
        .await
        .expect("add_book failed");

    let updated = svc
        .update_book(
            book.id,
            BookUpdate {
                authors: Some(vec![second, third]),
                ..Default::default()
            },
        )
        .await
        .expect("update_book failed");

    // Full replacement, not a union
    let mut ids: Vec<i32> = updated.authors.iter().map(|a| a.id).collect();
    ids.sort();
    assert_eq!(ids, vec![second, third]);
}

#[tokio::test]
async fn test_update_book_missing_author_leaves_book_untouched() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    let err = svc
        .update_book(
            book.id,
            BookUpdate {
                title: Some("Dune Messiah".to_string()),
                authors: Some(vec![999]),
                ..Default::default()
            },
        )
        .await
        .expect_err("update with unresolved author ids should fail");
    assert!(matches!(err, DomainError::AuthorsNotFound(_)));

    let fetched = svc
        .get_book_by_id(book.id)
        .await
        .expect("get_book_by_id failed")
        .expect("book should exist");
    assert_eq!(fetched.title, "Dune");
    let ids: Vec<i32> = fetched.authors.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![author_id]);
}

#[tokio::test]
async fn test_update_book_applies_partial_fields() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Brandon", "Sanderson").await;
    let svc = service(&db, None);

    let book = svc
        .add_book(book_create("Elantris", "Fantasy", 2005, vec![author_id]))
        .await
        .expect("add_book failed");

    let updated = svc
        .update_book(
            book.id,
            BookUpdate {
                title: Some("Mistborn".to_string()),
                availability: Some(Availability::CheckedOut),
                ..Default::default()
            },
        )
        .await
        .expect("update_book failed");

    assert_eq!(updated.title, "Mistborn");
    assert_eq!(updated.availability, "checked_out");
    // Untouched fields keep their values
    assert_eq!(updated.genre, "Fantasy");
    assert_eq!(updated.year_published, 2005);
    assert_eq!(updated.num_pages, 320);
    assert_eq!(updated.created_at, book.created_at);
}

#[tokio::test]
async fn test_update_enrichment_absence_preserves_fields() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;

    let enriched = service(
        &db,
        Some(ExternalBookData {
            description: Some("Epic of Arrakis".to_string()),
            cover_url: Some("https://covers.example.org/b/id/1-L.jpg".to_string()),
        }),
    );
    let book = enriched
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    // Provider finds nothing this time; stored enrichment survives
    let unenriched = service(&db, None);
    let updated = unenriched
        .update_book(
            book.id,
            BookUpdate {
                num_pages: Some(412),
                ..Default::default()
            },
        )
        .await
        .expect("update_book failed");

    assert_eq!(updated.description.as_deref(), Some("Epic of Arrakis"));
    assert_eq!(
        updated.cover_url.as_deref(),
        Some("https://covers.example.org/b/id/1-L.jpg")
    );
}

#[tokio::test]
async fn test_update_enrichment_result_overwrites_field_by_field() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Frank", "Herbert").await;

    let enriched = service(
        &db,
        Some(ExternalBookData {
            description: Some("Epic of Arrakis".to_string()),
            cover_url: Some("https://covers.example.org/b/id/1-L.jpg".to_string()),
        }),
    );
    let book = enriched
        .add_book(book_create("Dune", "Sci-Fi", 1965, vec![author_id]))
        .await
        .expect("add_book failed");

    // A successful lookup with a sparser result still replaces both fields
    let sparse = service(
        &db,
        Some(ExternalBookData {
            description: None,
            cover_url: Some("https://covers.example.org/b/id/2-L.jpg".to_string()),
        }),
    );
    let updated = sparse
        .update_book(book.id, BookUpdate::default())
        .await
        .expect("update_book failed");

    assert!(updated.description.is_none());
    assert_eq!(
        updated.cover_url.as_deref(),
        Some("https://covers.example.org/b/id/2-L.jpg")
    );
}

#[tokio::test]
async fn test_author_listing_includes_books() {
    let db = setup_test_db().await;
    let author_id = create_test_author(&db, "Ursula", "Le Guin").await;
    let svc = service(&db, None);

    svc.add_book(book_create(
        "A Wizard of Earthsea",
        "Fantasy",
        1968,
        vec![author_id],
    ))
    .await
    .expect("add_book failed");

    let authors = AuthorService::new(db.clone())
        .list_authors()
        .await
        .expect("list_authors failed");

    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].first_name, "Ursula");
    assert_eq!(authors[0].books.len(), 1);
    assert_eq!(authors[0].books[0].title, "A Wizard of Earthsea");
}
