mod cookie;
pub mod session;
pub mod signin;
pub mod signout;
pub mod signup;

pub use session::*;
pub use signin::*;
pub use signout::*;
pub use signup::*;
