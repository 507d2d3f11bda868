//! Panel content: what gets loaded into the dashboard panel and how its
//! bundled assets are served.

mod probe;
mod provider;
mod resolver;
mod rewrite;

pub use probe::probe_dev_server;
pub use provider::{ContentProvider, INDEX_PATH};
pub use resolver::{ContentResolver, Document};
pub use rewrite::{asset_base, host_origin, HOST_SCHEME};
