use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;

/// A probe body panicked; carries the panic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyPanic(pub String);

impl fmt::Display for BodyPanic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "probe body panicked: {}", self.0)
    }
}

impl std::error::Error for BodyPanic {}

/// Run `body` to completion, turning a panic into [`BodyPanic`].
pub async fn run_guarded<F, T>(body: F) -> Result<T, BodyPanic>
where
    F: Future<Output = T>,
{
    AssertUnwindSafe(body)
        .catch_unwind()
        .await
        .map_err(|payload| BodyPanic(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
