use migration::Migrator;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::{error::AppResult, models::NewMovie, store::MovieStore};

const SQLITE_PRAGMAS: [&str; 3] =
    ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL", "PRAGMA cache_size=-64000"];

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let db = Database::connect(database_url).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string()))
                .await?;
        }
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Inserts the sample catalog when the store holds no movies yet.
pub async fn seed_sample_movies(store: &dyn MovieStore) -> AppResult<()> {
    if store.count().await? > 0 {
        return Ok(());
    }

    let samples = sample_movies();
    let total = samples.len();
    for movie in samples {
        store.insert(movie).await?;
    }

    info!(count = total, "seeded sample movies");
    Ok(())
}

fn sample_movies() -> Vec<NewMovie> {
    vec![
        NewMovie {
            title: "Inception".to_string(),
            director: Some("Christopher Nolan".to_string()),
            year: 2010,
            genre: Some("Sci-Fi".to_string()),
            runtime_mins: 148,
            rating: 9,
            description: Some(
                "A thief who steals corporate secrets through dream-sharing technology is \
                 given the inverse task of planting an idea."
                    .to_string(),
            ),
            poster_url: None,
            is_top_pick: true,
        },
        NewMovie {
            title: "Spirited Away".to_string(),
            director: Some("Hayao Miyazaki".to_string()),
            year: 2001,
            genre: Some("Animation".to_string()),
            runtime_mins: 125,
            rating: 10,
            description: Some(
                "A young girl wanders into a world ruled by gods, witches and spirits."
                    .to_string(),
            ),
            poster_url: None,
            is_top_pick: true,
        },
        NewMovie {
            title: "The Dark Knight".to_string(),
            director: Some("Christopher Nolan".to_string()),
            year: 2008,
            genre: Some("Action".to_string()),
            runtime_mins: 152,
            rating: 9,
            description: Some(
                "Batman faces the Joker, a criminal mastermind who plunges Gotham into anarchy."
                    .to_string(),
            ),
            poster_url: None,
            is_top_pick: true,
        },
    ]
}
