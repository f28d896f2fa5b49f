mod shell;
pub use shell::Shell;

mod home;
pub use home::Home;

mod about;
pub use about::About;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod dashboard;
pub use dashboard::Dashboard;

mod account;
pub use account::Account;

mod not_found;
pub use not_found::NotFound;
