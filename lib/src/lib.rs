mod batch;
mod report;
pub mod session;
mod space;
mod sweep;
mod trash;

pub use batch::*;
pub use report::*;
pub use session::{
    ApiError,
    ClientOptions,
    NotionClient,
    Session,
};
pub use space::*;
pub use sweep::*;
pub use trash::*;
