//! User-visible notification contracts and lightweight test adapters.

mod service;

pub use service::{
    MemoryNotificationService, NoopNotificationService, NotificationFuture, NotificationLevel,
    NotificationService,
};
