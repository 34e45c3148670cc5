pub mod environment;
pub mod login;
pub mod logout;

pub use environment::environment;
pub use login::login;
pub use logout::logout;
