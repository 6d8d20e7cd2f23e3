//! Nearby food search, list rendering and the selector wheel.

pub mod config;
pub mod error;
pub mod geo;
pub mod geolocation;
pub mod overpass;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod status;
pub mod wheel;

pub use config::{load_settings, Settings};
pub use error::{GeolocationError, SearchError, WheelError};
pub use geolocation::{locate, FixedPosition, GeolocationProvider, IpGeolocation};
pub use overpass::{MapDataService, OverpassClient};
pub use pipeline::search_nearby;
pub use render::{render_list, VenueCard, WinnerAnnouncement};
pub use session::{FinderSession, SearchForm, SearchStatus};
pub use status::StatusMessage;
pub use wheel::{Clock, SelectorWheel, SpinOutcome, SpinResult, SystemClock, ThreadRandom};
