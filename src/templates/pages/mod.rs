pub mod detail;
pub mod home;
pub mod search;
pub mod section;

pub use detail::detail_panel;
pub use home::home_page;
pub use search::search_page;
pub use section::{section_block, section_page};

/// Percent-encode a query-string value.
fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
