//! Deterministic sample data for tests.
//!
//! Every test gets its own migrated in-memory store. Each seeding helper
//! commits, so the rows are visible to whatever runs next on the session.

use auth::hash_password;
use cinema_core::{telemetry, AppConfig, Database, Session};
use storage::{
    Dao, Director, DirectorsDao, Favorite, FavoritesDao, Genre, GenresDao, Movie, MoviesDao,
    NewDirector, NewFavorite, NewGenre, NewMovie, NewUser, User, UsersDao,
};

pub const USER_1_EMAIL: &str = "email_1";
pub const USER_1_PASSWORD: &str = "1111";
pub const USER_2_EMAIL: &str = "email_2";
pub const USER_2_PASSWORD: &str = "2222";

/// An ephemeral store plus the session tests share with their services.
/// Further sessions come from `db.session()`.
pub struct TestStore {
    pub config: AppConfig,
    pub db: Database,
    pub session: Session,
}

impl TestStore {
    pub async fn new() -> Self {
        Self::with_config(AppConfig::testing()).await
    }

    /// A migrated store for an arbitrary configuration, e.g. a file on disk
    pub async fn with_config(config: AppConfig) -> Self {
        telemetry::init_for_tests();

        let db = Database::connect(&config.database)
            .await
            .expect("test store should open");
        db.migrate().await.expect("schema should apply");
        let session = db.session();

        Self {
            config,
            db,
            session,
        }
    }

    pub fn daos(&self) -> Daos {
        Daos::new(&self.session)
    }
}

/// One DAO per entity, all bound to the same session
#[derive(Debug, Clone)]
pub struct Daos {
    pub users: UsersDao,
    pub movies: MoviesDao,
    pub genres: GenresDao,
    pub directors: DirectorsDao,
    pub favorites: FavoritesDao,
}

impl Daos {
    pub fn new(session: &Session) -> Self {
        Self {
            users: UsersDao::new(session.clone()),
            movies: MoviesDao::new(session.clone()),
            genres: GenresDao::new(session.clone()),
            directors: DirectorsDao::new(session.clone()),
            favorites: FavoritesDao::new(session.clone()),
        }
    }
}

async fn commit(session: &Session) {
    session.commit().await.expect("fixture commit");
}

async fn user(session: &Session, email: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("hashing a fixture password");
    let user = UsersDao::new(session.clone())
        .create(NewUser {
            email: email.to_string(),
            password_hash,
        })
        .await
        .expect("fixture user");
    commit(session).await;
    user
}

pub async fn user_1(session: &Session) -> User {
    user(session, USER_1_EMAIL, USER_1_PASSWORD).await
}

pub async fn user_2(session: &Session) -> User {
    user(session, USER_2_EMAIL, USER_2_PASSWORD).await
}

fn sample_movie(n: i32, rating: f64) -> NewMovie {
    NewMovie {
        title: format!("title_{n}"),
        description: format!("description_{n}"),
        trailer: format!("trailer_{n}"),
        year: n,
        rating,
        genre_id: i64::from(n),
        director_id: i64::from(n),
    }
}

async fn movie(session: &Session, attrs: NewMovie) -> Movie {
    let movie = MoviesDao::new(session.clone())
        .create(attrs)
        .await
        .expect("fixture movie");
    commit(session).await;
    movie
}

/// Year 1, rating 5.5, genre 1, director 1
pub async fn movie_1(session: &Session) -> Movie {
    movie(session, sample_movie(1, 5.5)).await
}

/// Year 2, rating 2.5, genre 2, director 2
pub async fn movie_2(session: &Session) -> Movie {
    movie(session, sample_movie(2, 2.5)).await
}

/// Year 3, rating 3.3, genre 3, director 3
pub async fn movie_3(session: &Session) -> Movie {
    movie(session, sample_movie(3, 3.3)).await
}

async fn director(session: &Session, name: &str) -> Director {
    let director = DirectorsDao::new(session.clone())
        .create(NewDirector {
            name: name.to_string(),
        })
        .await
        .expect("fixture director");
    commit(session).await;
    director
}

pub async fn director_1(session: &Session) -> Director {
    director(session, "director_1").await
}

pub async fn director_2(session: &Session) -> Director {
    director(session, "director_2").await
}

async fn genre(session: &Session, name: &str) -> Genre {
    let genre = GenresDao::new(session.clone())
        .create(NewGenre {
            name: name.to_string(),
        })
        .await
        .expect("fixture genre");
    commit(session).await;
    genre
}

pub async fn genre_1(session: &Session) -> Genre {
    genre(session, "genre_1").await
}

pub async fn genre_2(session: &Session) -> Genre {
    genre(session, "genre_2").await
}

pub async fn favorite(session: &Session, user: &User, movie: &Movie) -> Favorite {
    let favorite = FavoritesDao::new(session.clone())
        .create(NewFavorite {
            user_id: user.id,
            movie_id: movie.id,
        })
        .await
        .expect("fixture favorite");
    commit(session).await;
    favorite
}

/// `user_1` with `movie_1` marked
pub async fn favorite_1(session: &Session) -> (User, Movie, Favorite) {
    let user = user_1(session).await;
    let movie = movie_1(session).await;
    let favorite = favorite(session, &user, &movie).await;
    (user, movie, favorite)
}

/// `user_2` with `movie_2` marked
pub async fn favorite_2(session: &Session) -> (User, Movie, Favorite) {
    let user = user_2(session).await;
    let movie = movie_2(session).await;
    let favorite = favorite(session, &user, &movie).await;
    (user, movie, favorite)
}

/// `Authorization` header value for a bearer token
pub fn bearer(access_token: &str) -> String {
    format!("Bearer {access_token}")
}
