mod route;
mod scan;

pub use route::Route;
pub use scan::Scan;
