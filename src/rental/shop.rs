use super::record::{Client, Movie, Rental};
use super::store::{self, RentalStore};
use super::{RecordKind, ShopError, StoreError};
use crate::history::ActionHistory;
use crate::interface::Undoable;
use crate::operation::{Compound, Reversible};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// A builder to create a [Shop].
///
/// Seeded records form the initial state of the shop; they are not recorded in the
/// history and can not be undone.
#[derive(Debug, Default)]
pub struct ShopBuilder {
    store: RentalStore,
}

impl ShopBuilder {
    /// Create a new builder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing store instead of an empty one.
    pub fn store(mut self, store: RentalStore) -> Self {
        self.store = store;
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.store.clients.add(client);
        self
    }

    pub fn movie(mut self, movie: Movie) -> Self {
        self.store.movies.add(movie);
        self
    }

    pub fn rental(mut self, rental: Rental) -> Self {
        self.store.rentals.add(rental);
        self
    }

    /// Create a new [Shop] with an empty history.
    pub fn build(self) -> Shop {
        Shop {
            store: self.store,
            history: ActionHistory::new(),
        }
    }
}

/// Business operations over a [RentalStore].
///
/// Each mutating operation validates its input first, then builds a unit of change,
/// applies it by its redo side, and records it.
/// A rejected operation leaves both the store and the history untouched.
#[derive(Debug)]
pub struct Shop {
    store: RentalStore,
    history: ActionHistory<'static, RentalStore, StoreError>,
}

fn rejected(err: ShopError) -> ShopError {
    warn!(error = %err, "operation rejected");
    err
}

impl Shop {
    pub fn store(&self) -> &RentalStore {
        &self.store
    }

    pub fn history(&self) -> &ActionHistory<'static, RentalStore, StoreError> {
        &self.history
    }

    fn commit<U>(&mut self, unit: U) -> Result<(), ShopError>
    where
        U: Undoable<RentalStore, StoreError> + 'static,
    {
        unit.redo(&mut self.store)?;
        self.history.record(unit);
        Ok(())
    }

    fn client(&self, id: &str) -> Result<&Client, ShopError> {
        self.store
            .clients
            .find(&id.to_string())
            .ok_or_else(|| rejected(ShopError::not_found(RecordKind::Client, id)))
    }

    fn movie(&self, id: &str) -> Result<&Movie, ShopError> {
        self.store
            .movies
            .find(&id.to_string())
            .ok_or_else(|| rejected(ShopError::not_found(RecordKind::Movie, id)))
    }

    fn rental(&self, id: &str) -> Result<&Rental, ShopError> {
        self.store
            .rentals
            .find(&id.to_string())
            .ok_or_else(|| rejected(ShopError::not_found(RecordKind::Rental, id)))
    }

    /// Reverts the latest recorded operation.
    pub fn undo(&mut self) -> Result<(), ShopError> {
        self.history.undo(&mut self.store).map_err(|e| {
            warn!(error = %e, "undo failed");
            e.into()
        })
    }

    /// Re-applies the latest undone operation.
    pub fn redo(&mut self) -> Result<(), ShopError> {
        self.history.redo(&mut self.store).map_err(|e| {
            warn!(error = %e, "redo failed");
            e.into()
        })
    }

    /// Reverts the latest `count` operations.
    ///
    /// Nothing is reverted if fewer than `count` operations are recorded before the cursor.
    pub fn undo_multi(&mut self, count: usize) -> Result<(), ShopError> {
        self.history.undo_multi(count, &mut self.store).map_err(|e| {
            warn!(count, error = %e, "undo failed");
            e.into()
        })
    }

    /// Re-applies the latest `count` undone operations.
    ///
    /// Nothing is re-applied if fewer than `count` operations are undone.
    pub fn redo_multi(&mut self, count: usize) -> Result<(), ShopError> {
        self.history.redo_multi(count, &mut self.store).map_err(|e| {
            warn!(count, error = %e, "redo failed");
            e.into()
        })
    }

    // ---- clients ----

    pub fn add_client(&mut self, client: Client) -> Result<(), ShopError> {
        if self.store.clients.contains(&client.id) {
            return Err(rejected(ShopError::DuplicateId {
                kind: RecordKind::Client,
                id: client.id,
            }));
        }
        debug!(id = %client.id, "add client");
        let id = client.id.clone();
        self.commit(Reversible::bind(
            store::remove_client,
            id,
            store::add_client,
            client,
        ))
    }

    /// Removes a client together with all of its rentals.
    ///
    /// The client can not be removed while one of its rentals is still open.
    pub fn remove_client(&mut self, id: &str) -> Result<(), ShopError> {
        let client = self.client(id)?.clone();
        let rentals: Vec<Rental> = self
            .store
            .rentals
            .filter(|r| r.client_id() == id)
            .into_iter()
            .cloned()
            .collect();
        if rentals.iter().any(Rental::is_open) {
            return Err(rejected(ShopError::ActiveRental {
                kind: RecordKind::Client,
                id: id.to_string(),
            }));
        }

        debug!(id, rentals = rentals.len(), "remove client");
        let mut ops = Compound::new();
        for rental in rentals {
            let rental_id = rental.id().to_string();
            ops.add(Reversible::bind(
                store::add_rental,
                rental,
                store::remove_rental,
                rental_id,
            ));
        }
        ops.add(Reversible::bind(
            store::add_client,
            client,
            store::remove_client,
            id.to_string(),
        ));
        self.commit(ops)
    }

    pub fn update_client_name(&mut self, id: &str, name: &str) -> Result<(), ShopError> {
        let old = self.client(id)?.name.clone();
        debug!(id, name, "update client name");
        self.commit(Reversible::bind(
            store::set_client_name,
            (id.to_string(), old),
            store::set_client_name,
            (id.to_string(), name.to_string()),
        ))
    }

    pub fn update_client_worthy(&mut self, id: &str, worthy: bool) -> Result<(), ShopError> {
        let old = self.client(id)?.worthy;
        debug!(id, worthy, "update client worthy");
        self.commit(Reversible::bind(
            store::set_client_worthy,
            (id.to_string(), old),
            store::set_client_worthy,
            (id.to_string(), worthy),
        ))
    }

    /// Replaces the whole client record with the same id.
    pub fn update_client(&mut self, client: Client) -> Result<(), ShopError> {
        let old = self.client(&client.id)?.clone();
        debug!(id = %client.id, "update client");
        self.commit(Reversible::bind(
            store::replace_client,
            old,
            store::replace_client,
            client,
        ))
    }

    pub fn is_client_worthy(&self, id: &str) -> Result<bool, ShopError> {
        Ok(self.client(id)?.worthy)
    }

    // ---- movies ----

    pub fn add_movie(&mut self, movie: Movie) -> Result<(), ShopError> {
        if self.store.movies.contains(&movie.id) {
            return Err(rejected(ShopError::DuplicateId {
                kind: RecordKind::Movie,
                id: movie.id,
            }));
        }
        debug!(id = %movie.id, "add movie");
        let id = movie.id.clone();
        self.commit(Reversible::bind(
            store::remove_movie,
            id,
            store::add_movie,
            movie,
        ))
    }

    /// Removes a movie together with all of its rentals.
    ///
    /// The movie can not be removed while one of its rentals is still open.
    pub fn remove_movie(&mut self, id: &str) -> Result<(), ShopError> {
        let movie = self.movie(id)?.clone();
        let rentals: Vec<Rental> = self
            .store
            .rentals
            .filter(|r| r.movie_id() == id)
            .into_iter()
            .cloned()
            .collect();
        if rentals.iter().any(Rental::is_open) {
            return Err(rejected(ShopError::ActiveRental {
                kind: RecordKind::Movie,
                id: id.to_string(),
            }));
        }

        debug!(id, rentals = rentals.len(), "remove movie");
        let mut ops = Compound::new();
        for rental in rentals {
            let rental_id = rental.id().to_string();
            ops.add(Reversible::bind(
                store::add_rental,
                rental,
                store::remove_rental,
                rental_id,
            ));
        }
        ops.add(Reversible::bind(
            store::add_movie,
            movie,
            store::remove_movie,
            id.to_string(),
        ));
        self.commit(ops)
    }

    pub fn update_movie_title(&mut self, id: &str, title: &str) -> Result<(), ShopError> {
        let old = self.movie(id)?.title.clone();
        debug!(id, title, "update movie title");
        self.commit(Reversible::bind(
            store::set_movie_title,
            (id.to_string(), old),
            store::set_movie_title,
            (id.to_string(), title.to_string()),
        ))
    }

    pub fn update_movie_description(
        &mut self,
        id: &str,
        description: &str,
    ) -> Result<(), ShopError> {
        let old = self.movie(id)?.description.clone();
        debug!(id, "update movie description");
        self.commit(Reversible::bind(
            store::set_movie_description,
            (id.to_string(), old),
            store::set_movie_description,
            (id.to_string(), description.to_string()),
        ))
    }

    pub fn update_movie_genre(&mut self, id: &str, genre: &str) -> Result<(), ShopError> {
        let old = self.movie(id)?.genre.clone();
        debug!(id, genre, "update movie genre");
        self.commit(Reversible::bind(
            store::set_movie_genre,
            (id.to_string(), old),
            store::set_movie_genre,
            (id.to_string(), genre.to_string()),
        ))
    }

    /// Replaces the whole movie record with the same id.
    pub fn update_movie(&mut self, movie: Movie) -> Result<(), ShopError> {
        let old = self.movie(&movie.id)?.clone();
        debug!(id = %movie.id, "update movie");
        self.commit(Reversible::bind(
            store::replace_movie,
            old,
            store::replace_movie,
            movie,
        ))
    }

    // ---- rentals ----

    /// Returns true if no rental of the movie is open and every past rental
    /// was returned before `on`.
    pub fn is_movie_available(&self, movie_id: &str, on: NaiveDate) -> bool {
        let rentals = self.store.rentals.filter(|r| r.movie_id() == movie_id);
        if rentals.iter().any(|r| r.is_open()) {
            return false;
        }
        rentals
            .iter()
            .filter_map(|r| r.returned())
            .all(|returned| returned < on)
    }

    /// Lends a movie to a client.
    ///
    /// # Return
    /// The id of the new rental.
    pub fn rent_movie(
        &mut self,
        movie_id: &str,
        client_id: &str,
        rented: NaiveDate,
        due: NaiveDate,
    ) -> Result<String, ShopError> {
        if !self.client(client_id)?.worthy {
            return Err(rejected(ShopError::ClientNotWorthy(client_id.to_string())));
        }
        self.movie(movie_id)?;
        if !self.is_movie_available(movie_id, rented) {
            return Err(rejected(ShopError::MovieUnavailable(movie_id.to_string())));
        }
        let rental = Rental::new(movie_id, client_id, rented, due).map_err(|e| rejected(e.into()))?;
        let id = rental.id().to_string();
        if self.store.rentals.contains(&id) {
            return Err(rejected(ShopError::DuplicateId {
                kind: RecordKind::Rental,
                id,
            }));
        }

        debug!(%id, movie_id, client_id, "rent movie");
        self.commit(Reversible::bind(
            store::remove_rental,
            id.clone(),
            store::add_rental,
            rental,
        ))?;
        Ok(id)
    }

    /// Closes a rental.
    ///
    /// A return after the due date also marks the client as unworthy.
    /// Both changes are undone together.
    pub fn return_movie(&mut self, rental_id: &str, returned: NaiveDate) -> Result<(), ShopError> {
        let rental = self.rental(rental_id)?;
        if !rental.is_open() {
            return Err(rejected(ShopError::AlreadyReturned(rental_id.to_string())));
        }
        rental
            .check_returned(returned)
            .map_err(|e| rejected(e.into()))?;
        let late = rental.is_late_on(returned);
        let client_id = rental.client_id().to_string();
        let was_worthy = self.client(&client_id)?.worthy;

        debug!(rental_id, %returned, late, "return movie");
        let mut ops = Compound::new();
        ops.add(Reversible::bind(
            store::set_rental_returned,
            (rental_id.to_string(), None),
            store::set_rental_returned,
            (rental_id.to_string(), Some(returned)),
        ));
        if late && was_worthy {
            ops.add(Reversible::bind(
                store::set_client_worthy,
                (client_id.clone(), true),
                store::set_client_worthy,
                (client_id, false),
            ));
        }
        self.commit(ops)
    }

    // ---- queries ----

    /// Clients whose id or name contains `term`, ignoring case.
    pub fn search_clients(&self, term: &str) -> Vec<&Client> {
        let term = term.to_lowercase();
        self.store.clients.filter(|c| {
            c.id.to_lowercase().contains(&term) || c.name.to_lowercase().contains(&term)
        })
    }

    /// Movies whose id, title, description, or genre contains `term`, ignoring case.
    pub fn search_movies(&self, term: &str) -> Vec<&Movie> {
        let term = term.to_lowercase();
        self.store.movies.filter(|m| {
            [&m.id, &m.title, &m.description, &m.genre]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        })
    }

    pub fn rentals_of_client(&self, client_id: &str) -> Vec<&Rental> {
        self.store
            .rentals
            .filter(|r| r.client_id() == client_id)
    }

    pub fn clients_sorted_by_name(&self) -> Vec<Client> {
        let mut clients = self.store.clients.clone();
        clients.sort_by(|a, b| a.name <= b.name);
        clients.into_inner()
    }

    pub fn movies_sorted_by_title(&self) -> Vec<Movie> {
        let mut movies = self.store.movies.clone();
        movies.sort_by(|a, b| a.title <= b.title);
        movies.into_inner()
    }
}
