pub mod classify;
pub mod correlate;
pub mod diagram;
pub mod diff;
pub mod timeline;

pub use classify::{classify_event, Classification, StatusColor};
pub use correlate::{
    correlation_key, group_events_by_payload_id, group_title, relevant_groups,
    sort_chronologically,
};
pub use diagram::sequence_diagram;
pub use diff::{collect_json_paths, diff_paths, DiffReport};
pub use timeline::group_events_by_type;
