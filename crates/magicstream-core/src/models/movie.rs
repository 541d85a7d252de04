use serde::{Deserialize, Serialize};

/// A movie genre as stored server-side (TMDB genre ids)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Genre {
    pub genre_id: i32,
    pub genre_name: String,
}

/// Sentiment ranking derived from the admin review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Ranking {
    pub ranking_value: i32,
    pub ranking_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Movie {
    /// Database id; not all endpoints include it
    #[serde(default)]
    pub id: Option<String>,
    pub imdb_id: String,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub genre: Option<Vec<Genre>>,
    #[serde(default)]
    pub admin_review: Option<String>,
    #[serde(default)]
    pub ranking: Option<Ranking>,
}

impl Movie {
    /// YouTube watch URL for the stream screen, if the movie has one
    pub fn watch_url(&self) -> Option<String> {
        match self.youtube_id.as_deref() {
            Some(id) if !id.is_empty() => {
                Some(format!("https://www.youtube.com/watch?v={}", id))
            }
            _ => None,
        }
    }

    /// Genre names joined for list display
    pub fn genre_names(&self) -> String {
        match &self.genre {
            Some(genres) if !genres.is_empty() => genres
                .iter()
                .map(|g| g.genre_name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }

    /// Ranking name for display, "Unrated" when the server has not ranked it
    pub fn ranking_label(&self) -> &str {
        match &self.ranking {
            Some(r) if !r.ranking_name.is_empty() => &r.ranking_name,
            _ => "Unrated",
        }
    }

    /// Sort key for recommendation-style ordering (lower value ranks first)
    pub fn ranking_value(&self) -> i32 {
        self.ranking.as_ref().map(|r| r.ranking_value).unwrap_or(i32::MAX)
    }
}
