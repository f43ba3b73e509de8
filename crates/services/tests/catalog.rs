mod common;

use fixtures::TestStore;
use services::ServiceError;
use storage::{MovieFilter, NewGenre, Pagination};

#[tokio::test]
async fn test_genres_pass_through() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let genre_1 = fixtures::genre_1(&store.session).await;
    let genre_2 = fixtures::genre_2(&store.session).await;

    assert_eq!(services.genres.get_one(genre_1.id).await.unwrap(), genre_1);
    assert_eq!(
        services.genres.get_all(&Pagination::default()).await.unwrap(),
        vec![genre_1, genre_2]
    );
    assert!(matches!(
        services.genres.get_one(999).await,
        Err(ServiceError::NotFound { entity: "genre", id: 999 })
    ));
}

#[tokio::test]
async fn test_create_and_delete_commit() {
    let store = TestStore::new().await;
    let services = common::services(&store);

    let genre = services
        .genres
        .create(NewGenre {
            name: "western".to_string(),
        })
        .await
        .unwrap();
    store.session.rollback().await.unwrap();
    assert_eq!(services.genres.get_one(genre.id).await.unwrap(), genre);

    assert!(services.genres.delete(genre.id).await.unwrap());
    store.session.rollback().await.unwrap();
    assert!(!services.genres.delete(genre.id).await.unwrap());
}

#[tokio::test]
async fn test_directors() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let director = fixtures::director_1(&store.session).await;
    fixtures::director_2(&store.session).await;

    assert_eq!(services.directors.get_one(director.id).await.unwrap().name, "director_1");
    assert_eq!(
        services.directors.get_all(&Pagination::page(1, 1)).await.unwrap(),
        vec![director]
    );
}

#[tokio::test]
async fn test_movies_newest_first() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let movie_1 = fixtures::movie_1(&store.session).await;
    let movie_2 = fixtures::movie_2(&store.session).await;
    let movie_3 = fixtures::movie_3(&store.session).await;

    let newest = services
        .movies
        .get_all(&MovieFilter {
            newest_first: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(newest, vec![movie_3, movie_2.clone(), movie_1]);

    let second_page = services
        .movies
        .get_all(&MovieFilter {
            pagination: Pagination::page(2, 1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(second_page, vec![movie_2]);
}
