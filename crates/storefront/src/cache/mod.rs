mod session;

pub use self::session::SessionStore;
