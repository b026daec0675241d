pub mod activity;
pub mod chart;
pub mod connection;
pub mod describe;
pub mod event;
pub mod links;

pub use activity::{tally_key, ProjectActivity, Tally};
pub use chart::{chart_data, shape, ChartData, ChartSlice};
pub use connection::SavedConnection;
pub use describe::{describe, EventKind};
pub use event::{Event, EventTarget, Note, PushData};
pub use links::event_url;
