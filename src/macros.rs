/// Builds a closure that logs the error it receives, along with the given
/// message, and converts it into the target error type.
///
/// `on_error!(Error, "msg")` relies on `From` to convert into `Error`, while
/// `on_error!(Source as Error, "msg")` pins the source type when inference
/// cannot.
#[macro_export]
macro_rules! on_error {
    ($from:ty as $to:ty, $msg:tt) => {
        |error: $from| -> $to {
            error!(error = error.to_string(), $msg);
            error.into()
        }
    };
    ($to:ty, $msg:tt) => {
        |error| -> $to {
            error!(error = error.to_string(), $msg);
            <$to>::from(error)
        }
    };
}
