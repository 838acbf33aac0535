pub mod app;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod session;
pub mod signup;
pub mod submit;
