mod common;

use fixtures::TestStore;
use services::ServiceError;

#[tokio::test]
async fn test_add_then_list() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;
    let movie = fixtures::movie_1(&store.session).await;
    assert_eq!((movie.genre_id, movie.director_id), (1, 1));

    let favorite = services.favorites.add_favorite(user.id, movie.id).await.unwrap();

    assert_eq!(favorite.user_id, user.id);
    assert_eq!(favorite.movie_id, movie.id);
    assert_eq!(services.favorites.list_favorites(user.id).await.unwrap(), vec![movie]);
}

#[tokio::test]
async fn test_duplicate_favorite() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let (user, movie, _) = fixtures::favorite_1(&store.session).await;

    let err = services
        .favorites
        .add_favorite(user.id, movie.id)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ServiceError::DuplicateFavorite { user_id, movie_id } if user_id == user.id && movie_id == movie.id
    ));
    assert_eq!(services.favorites.list_favorites(user.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_user_or_movie() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let user = fixtures::user_1(&store.session).await;
    let movie = fixtures::movie_1(&store.session).await;

    assert!(matches!(
        services.favorites.add_favorite(user.id + 1, movie.id).await,
        Err(ServiceError::NotFound { entity: "user", .. })
    ));
    assert!(matches!(
        services.favorites.add_favorite(user.id, movie.id + 1).await,
        Err(ServiceError::NotFound { entity: "movie", .. })
    ));
    assert!(services.favorites.list_favorites(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_favorite() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let (user, movie, _) = fixtures::favorite_1(&store.session).await;

    assert!(services.favorites.remove_favorite(user.id, movie.id).await.unwrap());
    assert!(!services.favorites.remove_favorite(user.id, movie.id).await.unwrap());
    assert!(services.favorites.list_favorites(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorites_are_per_user() {
    let store = TestStore::new().await;
    let services = common::services(&store);
    let (user_1, movie_1, _) = fixtures::favorite_1(&store.session).await;
    let (user_2, movie_2, _) = fixtures::favorite_2(&store.session).await;

    assert_eq!(services.favorites.list_favorites(user_1.id).await.unwrap(), vec![movie_1.clone()]);
    assert_eq!(services.favorites.list_favorites(user_2.id).await.unwrap(), vec![movie_2]);

    services.favorites.add_favorite(user_2.id, movie_1.id).await.unwrap();
    assert_eq!(services.favorites.list_favorites(user_2.id).await.unwrap().len(), 2);
}
