//! Event buses connecting the widget to its surroundings.
//!
//! The same `EventBus` type carries `WidgetEvent`s out to the presentation
//! layer and `SessionSignal`s in from the host application.

pub mod bus;

pub use bus::EventBus;
