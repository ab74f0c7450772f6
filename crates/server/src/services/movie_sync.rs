use kmdb::{MovieRecord, SearchResponse};
use sqlx::SqlitePool;

use crate::models::CreateMovie;
use crate::repositories::MovieRepository;

/// Actors kept per movie; KMDb lists the whole cast.
const MAX_ACTORS: usize = 10;

/// Writes provider search results into the movie table.
#[derive(Clone)]
pub struct MovieSyncService {
    db: SqlitePool,
}

impl MovieSyncService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Upsert every usable record keyed by docid, in one transaction.
    ///
    /// Returns the number of records written.
    pub async fn sync(&self, response: &SearchResponse) -> Result<usize, sqlx::Error> {
        let movies: Vec<CreateMovie> = response.records().filter_map(record_to_movie).collect();
        if movies.is_empty() {
            return Ok(0);
        }

        let mut tx = self.db.begin().await?;
        for movie in &movies {
            MovieRepository::upsert_by_docid_with_executor(&mut *tx, movie).await?;
        }
        tx.commit().await?;

        tracing::debug!("Synced {} movies from provider", movies.len());
        Ok(movies.len())
    }
}

/// Map a provider record to the movie write set.
///
/// Records without a docid or a title are skipped.
pub fn record_to_movie(record: &MovieRecord) -> Option<CreateMovie> {
    let docid = record.doc_id.trim();
    let title = record.clean_title();
    if docid.is_empty() || title.is_empty() {
        return None;
    }

    Some(CreateMovie {
        docid: Some(docid.to_string()),
        title,
        title_eng: record.clean_title_eng(),
        prod_year: record.prod_year(),
        nation: non_blank(&record.nation),
        genre: non_blank(&record.genre),
        directors: join_names(record.director_names()),
        actors: join_names(record.actor_names(MAX_ACTORS)),
        runtime: record.runtime_minutes(),
        grade: non_blank(&record.rating),
        plot: record.plot(),
        poster_url: record.poster_url(),
        release_date: non_blank(&record.rep_rls_date),
    })
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn join_names(names: Vec<String>) -> Option<String> {
    (!names.is_empty()).then(|| names.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use kmdb::{Actor, Collection};

    fn record(docid: &str, title: &str) -> MovieRecord {
        MovieRecord {
            doc_id: docid.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn response(records: Vec<MovieRecord>) -> SearchResponse {
        SearchResponse {
            total_count: records.len() as i64,
            data: vec![Collection {
                coll_name: "kmdb_new2".to_string(),
                total_count: records.len() as i64,
                count: records.len() as i64,
                result: records,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_record_to_movie_maps_fields() {
        let mut rec = record("F24630", " !HS 인셉션 !HE ");
        rec.nation = "미국".to_string();
        rec.rating = "12세관람가".to_string();
        rec.runtime = "147".to_string();
        rec.rep_rls_date = "20100721".to_string();
        rec.actors.actor = (0..12)
            .map(|i| Actor {
                actor_nm: format!("배우{}", i),
                ..Default::default()
            })
            .collect();

        let movie = record_to_movie(&rec).unwrap();
        assert_eq!(movie.docid.as_deref(), Some("F24630"));
        assert_eq!(movie.title, "인셉션");
        assert_eq!(movie.search_title(), "인셉션");
        assert_eq!(movie.nation.as_deref(), Some("미국"));
        assert_eq!(movie.grade.as_deref(), Some("12세관람가"));
        assert_eq!(movie.runtime, Some(147));
        assert_eq!(movie.genre, None);
        assert_eq!(movie.actors.unwrap().split(", ").count(), MAX_ACTORS);
    }

    #[test]
    fn test_record_without_docid_or_title_is_skipped() {
        assert!(record_to_movie(&record("", "인셉션")).is_none());
        assert!(record_to_movie(&record("F1", " !HS  !HE ")).is_none());
    }

    #[tokio::test]
    async fn test_sync_is_idempotent() {
        let pool = test_pool().await;
        let service = MovieSyncService::new(pool.clone());
        let payload = response(vec![record("F24630", "인셉션"), record("F1", "메멘토")]);

        assert_eq!(service.sync(&payload).await.unwrap(), 2);
        assert_eq!(service.sync(&payload).await.unwrap(), 2);
        assert_eq!(MovieRepository::count(&pool).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sync_makes_movies_searchable() {
        let pool = test_pool().await;
        let service = MovieSyncService::new(pool.clone());
        service
            .sync(&response(vec![record("F24630", "인셉션")]))
            .await
            .unwrap();

        let found = MovieRepository::search_by_title(&pool, "인셉").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].docid.as_deref(), Some("F24630"));
    }

    #[tokio::test]
    async fn test_sync_empty_response_writes_nothing() {
        let pool = test_pool().await;
        let service = MovieSyncService::new(pool.clone());
        assert_eq!(service.sync(&SearchResponse::default()).await.unwrap(), 0);
        assert_eq!(MovieRepository::count(&pool).await.unwrap(), 0);
    }
}
