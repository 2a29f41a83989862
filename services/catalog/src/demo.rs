//! Movies shown when the catalog cannot be reached

use crate::models::Movie;

/// Fixed list substituted for the first page after a transport failure
pub fn demo_movies() -> Vec<Movie> {
    [
        (
            278,
            "The Shawshank Redemption",
            8.7,
            "1994-09-23",
            "Imprisoned in the 1940s for the double murder of his wife and her lover, upstanding banker Andy Dufresne begins a new life at the Shawshank prison.",
        ),
        (
            238,
            "The Godfather",
            8.7,
            "1972-03-14",
            "Spanning the years 1945 to 1955, a chronicle of the fictional Italian-American Corleone crime family.",
        ),
        (
            155,
            "The Dark Knight",
            8.5,
            "2008-07-16",
            "Batman raises the stakes in his war on crime with the help of Lt. Jim Gordon and District Attorney Harvey Dent.",
        ),
        (
            680,
            "Pulp Fiction",
            8.5,
            "1994-09-10",
            "A burger-loving hit man, his philosophical partner and a washed-up boxer converge in this sprawling crime caper.",
        ),
    ]
    .into_iter()
    .map(|(id, title, vote_average, release_date, overview)| Movie {
        id,
        title: title.to_string(),
        poster_path: None,
        vote_average,
        overview: Some(overview.to_string()),
        release_date: Some(release_date.to_string()),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_demo_movies_have_unique_ids() {
        let movies = demo_movies();
        let ids: HashSet<u64> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), movies.len());
        assert!(!movies.is_empty());
    }
}
