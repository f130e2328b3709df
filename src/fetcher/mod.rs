mod fetch_error;
mod fetcher;
mod tasks;
mod transport;

pub use fetch_error::FetchError;
pub use fetcher::{Endpoint, FetchOutcome, Fetcher};
pub use tasks::{spawn_fetch, CancelToken, FetchGroup};
pub use transport::{HttpTransport, Transport};
