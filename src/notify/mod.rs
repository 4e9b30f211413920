pub mod browser;
pub mod message;
pub mod traits;

pub use browser::BrowserNotifier;
pub use traits::Notifier;
