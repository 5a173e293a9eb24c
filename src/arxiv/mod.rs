// arXiv access: HTTP fetching, listing page parsing, and URL layout.

pub mod client;
pub mod listing;
pub mod rate_limit;
pub mod urls;
