pub mod category;
pub mod date;
pub mod dstu2;
pub mod error;
mod macros;
pub mod r4;
pub mod resource;
pub mod time;

pub use category::ResourceCategory;
pub use error::{CoreError, Result};
pub use resource::{FhirResource, FhirVersion, VersionedResource};
pub use time::{FhirDateTime, Period};
