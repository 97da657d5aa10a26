//! Core types: events, calendar math, recurrence expansion, view selection, formatting

pub mod event;
pub mod expand;
pub mod format;
pub mod time;
pub mod tracing;
pub mod view;

pub use event::{CalendarEvent, EventType, Occurrence, RecurrenceType};
pub use expand::{MAX_INSTANCES_PER_EVENT, expand_event, expand_events};
pub use format::{FormatOptions, OccurrenceFormatter, TimeFormat, ellipsis};
pub use time::{
    DEFAULT_HORIZON_MONTHS, VisibleRange, add_months, end_of_month, end_of_week, local_day,
    same_utc_day, start_of_month, start_of_week,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
pub use view::{ViewMode, bucket_by_day, preview, select_for_view, upcoming};
