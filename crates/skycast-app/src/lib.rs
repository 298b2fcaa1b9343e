//! Application services for Skycast: the persisted favorites list and the
//! dashboard state machine that sits between the weather core and the UI.

pub mod dashboard;
pub mod favorites;
pub mod share;

pub use dashboard::{Dashboard, FetchTicket};
pub use favorites::{FavoriteCity, Favorites, FavoritesStore, JsonFavoritesStore};
pub use share::share_text;
