pub mod error;
pub mod film;
pub mod time;

pub use error::{CoreError, Result};
pub use film::{ExternalFilm, Film, FilmDraft, FilmId};
pub use crate::time::{format_timestamp, now_utc, parse_timestamp};
