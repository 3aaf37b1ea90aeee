pub mod dispatcher;
pub mod message;
pub mod sink;

pub use dispatcher::{AlertDispatcher, Delay, RetryPolicy, TokioDelay};
pub use message::AlertMessage;
pub use sink::{AlertSink, WebhookSink};
