//! Record storage and its primitive mutators.
//!
//! Every mutator has the shape `fn(&mut RentalStore, A) -> Result<(), StoreError>`,
//! so it can be bound to its arguments by [Bound](crate::action::Bound) and recorded
//! as one side of a [Reversible](crate::operation::Reversible).
//! The mutators only check existence; business rules belong to the [Shop](super::shop::Shop).
use super::record::{Client, Movie, Rental};
use super::{RecordKind, StoreError};
use crate::collection::Collection;
use chrono::NaiveDate;

/// One collection per record type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RentalStore {
    pub(crate) clients: Collection<Client>,
    pub(crate) movies: Collection<Movie>,
    pub(crate) rentals: Collection<Rental>,
}

impl RentalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clients(&self) -> &Collection<Client> {
        &self.clients
    }
    pub fn movies(&self) -> &Collection<Movie> {
        &self.movies
    }
    pub fn rentals(&self) -> &Collection<Rental> {
        &self.rentals
    }

    /// Replaces all clients.
    pub fn set_clients<I: IntoIterator<Item = Client>>(&mut self, clients: I) {
        self.clients.set_items(clients);
    }
    /// Replaces all movies.
    pub fn set_movies<I: IntoIterator<Item = Movie>>(&mut self, movies: I) {
        self.movies.set_items(movies);
    }
    /// Replaces all rentals.
    pub fn set_rentals<I: IntoIterator<Item = Rental>>(&mut self, rentals: I) {
        self.rentals.set_items(rentals);
    }
}

pub fn add_client(store: &mut RentalStore, client: Client) -> Result<(), StoreError> {
    store.clients.add(client);
    Ok(())
}

pub fn remove_client(store: &mut RentalStore, id: String) -> Result<(), StoreError> {
    store
        .clients
        .remove(&id)
        .map(drop)
        .ok_or_else(|| StoreError::not_found(RecordKind::Client, id))
}

/// Puts `client` in place of the client with the same id.
pub fn replace_client(store: &mut RentalStore, client: Client) -> Result<(), StoreError> {
    let id = client.id.clone();
    store.clients.replace(&id, client)?;
    Ok(())
}

pub fn set_client_name(
    store: &mut RentalStore,
    (id, name): (String, String),
) -> Result<(), StoreError> {
    client_mut(store, &id)?.name = name;
    Ok(())
}

pub fn set_client_worthy(
    store: &mut RentalStore,
    (id, worthy): (String, bool),
) -> Result<(), StoreError> {
    client_mut(store, &id)?.worthy = worthy;
    Ok(())
}

fn client_mut<'s>(store: &'s mut RentalStore, id: &String) -> Result<&'s mut Client, StoreError> {
    store
        .clients
        .find_mut(id)
        .ok_or_else(|| StoreError::not_found(RecordKind::Client, id.as_str()))
}

pub fn add_movie(store: &mut RentalStore, movie: Movie) -> Result<(), StoreError> {
    store.movies.add(movie);
    Ok(())
}

pub fn remove_movie(store: &mut RentalStore, id: String) -> Result<(), StoreError> {
    store
        .movies
        .remove(&id)
        .map(drop)
        .ok_or_else(|| StoreError::not_found(RecordKind::Movie, id))
}

/// Puts `movie` in place of the movie with the same id.
pub fn replace_movie(store: &mut RentalStore, movie: Movie) -> Result<(), StoreError> {
    let id = movie.id.clone();
    store.movies.replace(&id, movie)?;
    Ok(())
}

pub fn set_movie_title(
    store: &mut RentalStore,
    (id, title): (String, String),
) -> Result<(), StoreError> {
    movie_mut(store, &id)?.title = title;
    Ok(())
}

pub fn set_movie_description(
    store: &mut RentalStore,
    (id, description): (String, String),
) -> Result<(), StoreError> {
    movie_mut(store, &id)?.description = description;
    Ok(())
}

pub fn set_movie_genre(
    store: &mut RentalStore,
    (id, genre): (String, String),
) -> Result<(), StoreError> {
    movie_mut(store, &id)?.genre = genre;
    Ok(())
}

fn movie_mut<'s>(store: &'s mut RentalStore, id: &String) -> Result<&'s mut Movie, StoreError> {
    store
        .movies
        .find_mut(id)
        .ok_or_else(|| StoreError::not_found(RecordKind::Movie, id.as_str()))
}

pub fn add_rental(store: &mut RentalStore, rental: Rental) -> Result<(), StoreError> {
    store.rentals.add(rental);
    Ok(())
}

pub fn remove_rental(store: &mut RentalStore, id: String) -> Result<(), StoreError> {
    store
        .rentals
        .remove(&id)
        .map(drop)
        .ok_or_else(|| StoreError::not_found(RecordKind::Rental, id))
}

pub fn set_rental_returned(
    store: &mut RentalStore,
    (id, returned): (String, Option<NaiveDate>),
) -> Result<(), StoreError> {
    store
        .rentals
        .find_mut(&id)
        .ok_or_else(|| StoreError::not_found(RecordKind::Rental, id.as_str()))?
        .set_returned(returned);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::CollectionError;

    fn store() -> RentalStore {
        let mut s = RentalStore::new();
        s.set_clients([Client::new("1", "a"), Client::new("2", "b")]);
        s.set_movies([Movie::new("10", "Cars", "life", "animation")]);
        s
    }

    #[test]
    fn add_remove_client() {
        let mut s = store();

        add_client(&mut s, Client::new("3", "c")).unwrap();
        assert_eq!(3, s.clients().len());

        remove_client(&mut s, "1".to_string()).unwrap();
        assert!(s.clients().find(&"1".to_string()).is_none());
        assert_eq!(
            Err(StoreError::not_found(RecordKind::Client, "1")),
            remove_client(&mut s, "1".to_string())
        );
    }

    #[test]
    fn set_client_fields() {
        let mut s = store();

        set_client_name(&mut s, ("2".to_string(), "x".to_string())).unwrap();
        set_client_worthy(&mut s, ("2".to_string(), false)).unwrap();

        let c = s.clients().find(&"2".to_string()).unwrap();
        assert_eq!("x", c.name);
        assert!(!c.worthy);
        assert!(set_client_name(&mut s, ("9".to_string(), "x".to_string())).is_err());
    }

    #[test]
    fn replace_missing_movie() {
        let mut s = store();

        let r = replace_movie(&mut s, Movie::new("99", "x", "y", "z"));

        assert_eq!(
            Err(StoreError::Collection(CollectionError::KeyNotFound(
                "99".to_string()
            ))),
            r
        );
    }

    #[test]
    fn set_movie_fields() {
        let mut s = store();
        let id = "10".to_string();

        set_movie_title(&mut s, (id.clone(), "Cars 2".to_string())).unwrap();
        set_movie_description(&mut s, (id.clone(), "spies".to_string())).unwrap();
        set_movie_genre(&mut s, (id.clone(), "action".to_string())).unwrap();

        assert_eq!(
            &Movie::new("10", "Cars 2", "spies", "action"),
            s.movies().find(&id).unwrap()
        );
    }

    #[test]
    fn rental_returned_roundtrip() {
        let mut s = store();
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let rental = Rental::new("10", "1", day(1), day(5)).unwrap();
        let id = rental.id().to_string();

        add_rental(&mut s, rental).unwrap();
        set_rental_returned(&mut s, (id.clone(), Some(day(4)))).unwrap();
        assert_eq!(Some(day(4)), s.rentals().find(&id).unwrap().returned());

        set_rental_returned(&mut s, (id.clone(), None)).unwrap();
        assert!(s.rentals().find(&id).unwrap().is_open());

        remove_rental(&mut s, id.clone()).unwrap();
        assert!(s.rentals().is_empty());
    }
}
