use crate::movie::Catalog;

/// Rating statistics over a non-empty catalog
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    /// Number of movies
    pub count: usize,

    /// Mean rating
    pub average: f64,

    /// Median rating; the mean of the two middle ratings for an even count
    pub median: f64,

    /// Highest rating and every title that has it
    pub best: (f64, Vec<String>),

    /// Lowest rating and every title that has it
    pub worst: (f64, Vec<String>),
}

impl RatingStats {
    /// Compute statistics, or `None` for an empty catalog
    pub fn from_catalog(catalog: &Catalog) -> Option<Self> {
        if catalog.is_empty() {
            return None;
        }

        let mut ratings: Vec<f64> = catalog.iter().map(|(_, r)| r.rating).collect();
        ratings.sort_by(f64::total_cmp);

        let count = ratings.len();
        let average = ratings.iter().sum::<f64>() / count as f64;
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (ratings[mid - 1] + ratings[mid]) / 2.0
        } else {
            ratings[mid]
        };

        let max = ratings[count - 1];
        let min = ratings[0];

        Some(Self {
            count,
            average,
            median,
            best: (max, titles_rated(catalog, max)),
            worst: (min, titles_rated(catalog, min)),
        })
    }
}

fn titles_rated(catalog: &Catalog, rating: f64) -> Vec<String> {
    catalog
        .iter()
        .filter(|(_, r)| r.rating == rating)
        .map(|(title, _)| title.to_string())
        .collect()
}
