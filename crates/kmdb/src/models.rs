use serde::{Deserialize, Serialize};

/// Markers the search engine wraps around the matched part of a title.
const HIGHLIGHT_MARKERS: [&str; 2] = ["!HS", "!HE"];

/// Top-level response of the search API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub data: Vec<Collection>,
}

impl SearchResponse {
    /// Number of records in the first collection.
    ///
    /// A response without any collection counts as empty.
    pub fn result_count(&self) -> i64 {
        self.data.first().map(|c| c.count).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.result_count() == 0
    }

    /// All movie records across collections.
    pub fn records(&self) -> impl Iterator<Item = &MovieRecord> {
        self.data.iter().flat_map(|c| c.result.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Collection {
    #[serde(default)]
    pub coll_name: String,
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub result: Vec<MovieRecord>,
}

/// A single movie from the `kmdb_new2` collection.
///
/// The API sends every scalar as a string and uses empty strings for
/// missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovieRecord {
    #[serde(rename = "DOCID")]
    pub doc_id: String,
    pub movie_id: String,
    pub movie_seq: String,
    pub title: String,
    pub title_eng: String,
    pub title_org: String,
    pub prod_year: String,
    pub directors: Directors,
    pub actors: Actors,
    pub nation: String,
    pub company: String,
    pub plots: Plots,
    pub runtime: String,
    pub rating: String,
    pub genre: String,
    pub rep_rls_date: String,
    pub keywords: String,
    pub posters: String,
    pub kmdb_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Directors {
    pub director: Vec<Director>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Director {
    pub director_nm: String,
    pub director_en_nm: String,
    pub director_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Actors {
    pub actor: Vec<Actor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Actor {
    pub actor_nm: String,
    pub actor_en_nm: String,
    pub actor_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Plots {
    pub plot: Vec<Plot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plot {
    pub plot_lang: String,
    pub plot_text: String,
}

impl MovieRecord {
    /// Title with highlight markers removed and whitespace collapsed.
    pub fn clean_title(&self) -> String {
        clean_text(&self.title)
    }

    pub fn clean_title_eng(&self) -> Option<String> {
        non_empty(clean_text(&self.title_eng))
    }

    pub fn director_names(&self) -> Vec<String> {
        self.directors
            .director
            .iter()
            .filter_map(|d| non_empty(clean_text(&d.director_nm)))
            .collect()
    }

    pub fn actor_names(&self, limit: usize) -> Vec<String> {
        self.actors
            .actor
            .iter()
            .filter_map(|a| non_empty(clean_text(&a.actor_nm)))
            .take(limit)
            .collect()
    }

    /// Korean plot if present, otherwise the first one.
    pub fn plot(&self) -> Option<String> {
        let plots = &self.plots.plot;
        plots
            .iter()
            .find(|p| p.plot_lang == "한국어")
            .or_else(|| plots.first())
            .and_then(|p| non_empty(p.plot_text.trim().to_string()))
    }

    /// First URL of the `|`-separated poster list.
    pub fn poster_url(&self) -> Option<String> {
        self.posters
            .split('|')
            .map(str::trim)
            .find(|s| !s.is_empty())
            .map(String::from)
    }

    pub fn prod_year(&self) -> Option<i32> {
        self.prod_year.trim().parse().ok()
    }

    /// Running time in minutes.
    pub fn runtime_minutes(&self) -> Option<i32> {
        self.runtime.trim().parse().ok()
    }
}

fn clean_text(raw: &str) -> String {
    let mut text = raw.to_string();
    for marker in HIGHLIGHT_MARKERS {
        text = text.replace(marker, " ");
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Query": "인셉션",
        "KMAQuery": "인셉션",
        "TotalCount": 1,
        "Data": [{
            "CollName": "kmdb_new2",
            "TotalCount": 1,
            "Count": 1,
            "Result": [{
                "DOCID": "F24630",
                "movieId": "F",
                "movieSeq": "24630",
                "title": " !HS 인셉션 !HE ",
                "titleEng": "Inception",
                "titleOrg": "",
                "prodYear": "2010",
                "directors": {"director": [{"directorNm": "크리스토퍼 놀란", "directorEnNm": "Christopher Nolan", "directorId": "00002020"}]},
                "actors": {"actor": [
                    {"actorNm": "레오나르도 디카프리오", "actorEnNm": "Leonardo DiCaprio", "actorId": "00001230"},
                    {"actorNm": "와타나베 켄", "actorEnNm": "Ken Watanabe", "actorId": "00001231"}
                ]},
                "nation": "미국",
                "company": "워너브러더스 코리아(주)",
                "plots": {"plot": [
                    {"plotLang": "English", "plotText": "Dom Cobb is a thief."},
                    {"plotLang": "한국어", "plotText": "타인의 꿈에 들어가 생각을 훔치는 특수 보안요원 코브."}
                ]},
                "runtime": "147",
                "rating": "12세관람가",
                "genre": "SF,액션,미스터리",
                "repRlsDate": "20100721",
                "keywords": "꿈",
                "posters": "http://file.koreafilm.or.kr/thm/02/00/01/46/tn_DPF001234.jpg|http://file.koreafilm.or.kr/thm/02/00/01/46/tn_DPF001235.jpg"
            }]
        }]
    }"#;

    fn sample() -> SearchResponse {
        serde_json::from_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_decode_search_response() {
        let response = sample();
        assert_eq!(response.result_count(), 1);
        assert!(!response.is_empty());

        let record = response.records().next().unwrap();
        assert_eq!(record.doc_id, "F24630");
        assert_eq!(record.clean_title(), "인셉션");
        assert_eq!(record.clean_title_eng().as_deref(), Some("Inception"));
        assert_eq!(record.prod_year(), Some(2010));
        assert_eq!(record.runtime_minutes(), Some(147));
    }

    #[test]
    fn test_record_helpers() {
        let response = sample();
        let record = response.records().next().unwrap();

        assert_eq!(record.director_names(), vec!["크리스토퍼 놀란"]);
        assert_eq!(record.actor_names(1), vec!["레오나르도 디카프리오"]);
        assert_eq!(
            record.plot().as_deref(),
            Some("타인의 꿈에 들어가 생각을 훔치는 특수 보안요원 코브.")
        );
        assert_eq!(
            record.poster_url().as_deref(),
            Some("http://file.koreafilm.or.kr/thm/02/00/01/46/tn_DPF001234.jpg")
        );
    }

    #[test]
    fn test_zero_count_response() {
        let response: SearchResponse = serde_json::from_str(
            r#"{"TotalCount": 0, "Data": [{"CollName": "kmdb_new2", "TotalCount": 0, "Count": 0}]}"#,
        )
        .unwrap();
        assert!(response.is_empty());
        assert_eq!(response.records().count(), 0);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.is_empty());
    }

    #[test]
    fn test_blank_fields() {
        let record = MovieRecord {
            title: "!HS 아바타 !HE:  물의   길".to_string(),
            posters: "".to_string(),
            runtime: "".to_string(),
            ..Default::default()
        };
        assert_eq!(record.clean_title(), "아바타 : 물의 길");
        assert_eq!(record.poster_url(), None);
        assert_eq!(record.runtime_minutes(), None);
        assert_eq!(record.plot(), None);
        assert_eq!(record.clean_title_eng(), None);
    }
}
