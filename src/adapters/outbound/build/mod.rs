/// Build tool adapters
mod maven_invoker;

pub use maven_invoker::{MavenInvoker, DEFAULT_MAVEN_EXECUTABLE};
