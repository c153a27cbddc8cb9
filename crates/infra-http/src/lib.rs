// HTTPS Transport adapter (reqwest)

mod transport;

pub use transport::{HttpTransport, DEFAULT_API_URL};
