use crate::interface::Keyed;
use chrono::NaiveDate;
use thiserror::Error;

/// Date ordering violations of a [Rental].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Due date {due} is not after rented date {rented}")]
    DueNotAfterRented { rented: NaiveDate, due: NaiveDate },

    #[error("Returned date {returned} is not after rented date {rented}")]
    ReturnedNotAfterRented {
        rented: NaiveDate,
        returned: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
    /// Whether the client may rent more movies. Cleared by a late return.
    pub worthy: bool,
}

impl Client {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            worthy: true,
        }
    }

    pub fn unworthy(mut self) -> Self {
        self.worthy = false;
        self
    }
}

impl Keyed for Client {
    type Key = String;
    fn key(&self) -> &String {
        &self.id
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub genre: String,
}

impl Movie {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            genre: genre.into(),
        }
    }
}

impl Keyed for Movie {
    type Key = String;
    fn key(&self) -> &String {
        &self.id
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.id, self.title, self.description, self.genre
        )
    }
}

/// A movie lent to a client.
///
/// The id is derived from the movie, the client, and both dates,
/// so the same client can rent the same movie again later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    id: String,
    movie_id: String,
    client_id: String,
    rented: NaiveDate,
    due: NaiveDate,
    returned: Option<NaiveDate>,
}

impl Rental {
    /// Creates an open rental.
    ///
    /// # Errors
    /// [DueNotAfterRented](DateError::DueNotAfterRented) unless `rented < due`.
    pub fn new(
        movie_id: impl Into<String>,
        client_id: impl Into<String>,
        rented: NaiveDate,
        due: NaiveDate,
    ) -> Result<Self, DateError> {
        if due <= rented {
            return Err(DateError::DueNotAfterRented { rented, due });
        }
        let movie_id = movie_id.into();
        let client_id = client_id.into();
        Ok(Self {
            id: Self::make_id(&movie_id, &client_id, rented, due),
            movie_id,
            client_id,
            rented,
            due,
            returned: None,
        })
    }

    /// Creates a rental which is already returned.
    pub fn returned_on(mut self, returned: NaiveDate) -> Result<Self, DateError> {
        self.check_returned(returned)?;
        self.returned = Some(returned);
        Ok(self)
    }

    /// Joins the parts with `|`.
    ///
    /// `|` and `\` inside the ids are escaped with `\`,
    /// so distinct parts never produce the same id.
    pub fn make_id(movie_id: &str, client_id: &str, rented: NaiveDate, due: NaiveDate) -> String {
        format!(
            "{}|{}|{}|{}",
            escape_id(movie_id),
            escape_id(client_id),
            rented,
            due
        )
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
    pub fn rented(&self) -> NaiveDate {
        self.rented
    }
    pub fn due(&self) -> NaiveDate {
        self.due
    }
    pub fn returned(&self) -> Option<NaiveDate> {
        self.returned
    }

    pub fn is_open(&self) -> bool {
        self.returned.is_none()
    }

    /// Returns true if a return on `returned` is past the due date.
    pub fn is_late_on(&self, returned: NaiveDate) -> bool {
        self.due < returned
    }

    pub fn check_returned(&self, returned: NaiveDate) -> Result<(), DateError> {
        if returned <= self.rented {
            return Err(DateError::ReturnedNotAfterRented {
                rented: self.rented,
                returned,
            });
        }
        Ok(())
    }

    // The store validates before calling this.
    pub(crate) fn set_returned(&mut self, returned: Option<NaiveDate>) {
        self.returned = returned;
    }
}

impl Keyed for Rental {
    type Key = String;
    fn key(&self) -> &String {
        &self.id
    }
}

impl std::fmt::Display for Rental {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "id:{} movie id:{} client id:{} {} {}",
            self.id, self.movie_id, self.client_id, self.rented, self.due
        )?;
        match self.returned {
            Some(r) => write!(f, " {}", r),
            None => write!(f, " -"),
        }
    }
}

fn escape_id(id: &str) -> String {
    let mut escaped = String::with_capacity(id.len());
    for c in id.chars() {
        if c == '|' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
