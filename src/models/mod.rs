mod category;
pub mod feedback;
mod lenient;
pub mod session;
mod status;
pub mod user;

pub use category::*;
pub use feedback::*;
pub use lenient::*;
pub use session::*;
pub use status::*;
pub use user::*;
