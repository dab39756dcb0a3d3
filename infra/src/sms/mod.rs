//! SMS dispatch.
//!
//! Production would slot a real provider behind the same trait; for
//! development the console notifier prints codes locally.

mod console;

pub use console::ConsoleSmsNotifier;
