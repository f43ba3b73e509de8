#![allow(dead_code)]

use auth::TokenService;
use cinema_core::Session;
use fixtures::{Daos, TestStore, USER_1_EMAIL, USER_1_PASSWORD};
use services::{AuthService, DirectorsService, FavoritesService, GenresService, MoviesService, UsersService};

/// Every service wired to one session
pub struct Services {
    pub users: UsersService,
    pub auth: AuthService,
    pub genres: GenresService,
    pub directors: DirectorsService,
    pub movies: MoviesService,
    pub favorites: FavoritesService,
}

/// Services on the store's shared session
pub fn services(store: &TestStore) -> Services {
    services_on(store, &store.session)
}

/// Services on a session of their own, as a separate request would have
pub fn services_on(store: &TestStore, session: &Session) -> Services {
    let daos = Daos::new(session);

    let users = UsersService::new(daos.users);
    let movies = MoviesService::new(daos.movies);
    let auth = AuthService::new(users.clone(), TokenService::from_config(&store.config.auth));

    Services {
        auth,
        genres: GenresService::new(daos.genres),
        directors: DirectorsService::new(daos.directors),
        favorites: FavoritesService::new(daos.favorites, users.clone(), movies.clone()),
        movies,
        users,
    }
}

/// `Authorization` header value for `user_1`, who must already exist
pub async fn headers(auth: &AuthService) -> String {
    let tokens = auth
        .generate_token(USER_1_EMAIL, USER_1_PASSWORD)
        .await
        .expect("user_1 should log in");
    fixtures::bearer(&tokens.access_token)
}
