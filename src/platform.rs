//! Small platform shims for the async parts that differ between native and WASM.

use std::{future::Future, pin::pin};

use futures::future::{Either, select};
use instant::Duration;

use crate::error::{LoadError, Result};

/// Resolve after `duration` has passed.
///
/// Natively this is a tokio timer and panics outside a tokio runtime with the
/// time driver enabled. In the browser there is no tokio reactor,
/// so a `setTimeout` callback completes a oneshot channel instead.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await
}

#[cfg(target_arch = "wasm32")]
pub(crate) async fn sleep(duration: Duration) {
    use wasm_bindgen::{JsCast, closure::Closure};

    let Some(window) = web_sys::window() else {
        log::warn!("No window available, timeouts are disabled");
        return futures::future::pending().await;
    };
    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel::<()>();
    let callback: Closure<dyn FnMut()> = Closure::once(move || {
        let _ = tx.send(());
    });
    let millis = duration.as_millis().min(i32::MAX as u128) as i32;
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        millis,
    ) {
        log::warn!("Could not schedule timeout: {:?}", e);
        return futures::future::pending().await;
    }
    rx.receive().await;
    // the callback must outlive the timer
    drop(callback);
}

/// Run `fut`, failing with [`LoadError::Timeout`] if it takes longer than `timeout`.
pub(crate) async fn with_timeout<T>(
    target: &str,
    timeout: Option<Duration>,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    let Some(after) = timeout else {
        return fut.await;
    };
    match select(pin!(fut), pin!(sleep(after))).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::warn!("Loading {} timed out after {:?}", target, after);
            Err(LoadError::Timeout {
                target: target.to_string(),
                after,
            })
        }
    }
}
