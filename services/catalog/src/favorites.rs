//! Favorites persisted in local storage

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};

use common::LocalStorage;
use tracing::info;

use crate::models::Movie;

/// Storage key of the favorites list
pub const FAVORITES_KEY: &str = "favorite_movies";

/// Ordered set of favorite movies, most recently added first
///
/// Membership is by movie id. Every mutation is written through to storage
/// before it returns.
#[derive(Debug)]
pub struct FavoritesStore {
    storage: LocalStorage,
    movies: RwLock<Vec<Movie>>,
}

impl FavoritesStore {
    /// Load favorites from storage
    pub fn new(storage: LocalStorage) -> Self {
        let movies: Vec<Movie> = storage.read(FAVORITES_KEY, Vec::new());
        info!("Loaded {} favorite movies", movies.len());
        Self {
            storage,
            movies: RwLock::new(movies),
        }
    }

    /// Add a movie at the front. Returns false if it was already present;
    /// the stored copy is left as it was.
    pub fn add(&self, movie: Movie) -> bool {
        let mut movies = self.write();
        if movies.iter().any(|m| m.id == movie.id) {
            return false;
        }
        info!("Adding favorite: {} ({})", movie.title, movie.id);
        movies.insert(0, movie);
        self.persist(&movies);
        true
    }

    /// Remove a movie by id. Returns false if it was absent.
    pub fn remove(&self, id: u64) -> bool {
        let mut movies = self.write();
        let before = movies.len();
        movies.retain(|m| m.id != id);
        if movies.len() == before {
            return false;
        }
        info!("Removing favorite: {}", id);
        self.persist(&movies);
        true
    }

    /// Remove the movie if present, add it otherwise.
    /// Returns whether it is a favorite afterwards.
    pub fn toggle(&self, movie: Movie) -> bool {
        let mut movies = self.write();
        let is_favorite = match movies.iter().position(|m| m.id == movie.id) {
            Some(index) => {
                info!("Removing favorite: {}", movie.id);
                movies.remove(index);
                false
            }
            None => {
                info!("Adding favorite: {} ({})", movie.title, movie.id);
                movies.insert(0, movie);
                true
            }
        };
        self.persist(&movies);
        is_favorite
    }

    pub fn has(&self, id: u64) -> bool {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|m| m.id == id)
    }

    pub fn list(&self) -> Vec<Movie> {
        self.movies
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Movie>> {
        self.movies.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, movies: &[Movie]) {
        self.storage.write(FAVORITES_KEY, movies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn movie(id: u64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: None,
            vote_average: 7.0,
            overview: None,
            release_date: None,
        }
    }

    fn ids(store: &FavoritesStore) -> Vec<u64> {
        store.list().iter().map(|m| m.id).collect()
    }

    #[test]
    fn test_add_puts_newest_first() {
        let store = FavoritesStore::new(LocalStorage::in_memory());
        assert!(store.add(movie(1, "One")));
        assert!(store.add(movie(2, "Two")));
        assert_eq!(ids(&store), vec![2, 1]);
    }

    #[test]
    fn test_add_existing_is_noop() {
        let store = FavoritesStore::new(LocalStorage::in_memory());
        store.add(movie(1, "One"));
        store.add(movie(2, "Two"));

        assert!(!store.add(movie(1, "Renamed")));
        assert_eq!(ids(&store), vec![2, 1]);
        assert_eq!(store.list()[1].title, "One");
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let store = FavoritesStore::new(LocalStorage::in_memory());
        store.add(movie(1, "One"));
        assert!(!store.remove(99));
        assert!(store.remove(1));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_absence() {
        let store = FavoritesStore::new(LocalStorage::in_memory());
        assert!(!store.has(7));

        assert!(store.toggle(movie(7, "Seven")));
        assert!(store.has(7));

        assert!(!store.toggle(movie(7, "Seven")));
        assert!(!store.has(7));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_concurrent_toggles_all_apply() {
        let store = Arc::new(FavoritesStore::new(LocalStorage::in_memory()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        store.toggle(movie(7, "Seven"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 200 toggles in total: back to absent
        assert!(!store.has(7));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_has_tracks_last_mutation() {
        let store = FavoritesStore::new(LocalStorage::in_memory());
        store.add(movie(3, "Three"));
        store.remove(3);
        assert!(!store.has(3));
        store.add(movie(3, "Three"));
        assert!(store.has(3));
    }

    #[test]
    fn test_mutations_are_persisted_immediately() {
        let storage = LocalStorage::in_memory();
        let store = FavoritesStore::new(storage.clone());
        store.add(movie(1, "One"));
        store.add(movie(2, "Two"));
        store.remove(1);

        let reloaded = FavoritesStore::new(storage);
        assert_eq!(ids(&reloaded), vec![2]);
    }
}
