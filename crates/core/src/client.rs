use std::pin::Pin;
use std::sync::Arc;

use oratio_transport::{
    Transport, TransportError, TransportRequest, TransportResponse,
};
use tracing::Instrument;

type CallResult = Result<TransportResponse, Box<dyn TransportError>>;
type BoxedCallFuture = Pin<Box<dyn Future<Output = CallResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(TransportRequest) -> BoxedCallFuture + Send + Sync>;

/// A wrapper around a transport that provides a type-erased interface
/// for the other modules.
#[derive(Clone)]
pub(crate) struct TransportClient {
    handler_fn: HandlerFn,
}

impl TransportClient {
    #[inline]
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        // We have to erase the type `T`, since `User` doesn't have a
        // generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req: TransportRequest| {
            let fut = transport.call(&req);
            let boxed: BoxedCallFuture = Box::pin(
                async move {
                    debug!("sending request: {} {}", req.method, req.url);
                    trace!("request: {req:?}");
                    match fut.await {
                        Ok(resp) => {
                            trace!("got response: {resp:?}");
                            Ok(resp)
                        }
                        Err(err) => {
                            error!("transport failed: {err:?}");
                            Err(Box::new(err) as Box<dyn TransportError>)
                        }
                    }
                }
                .instrument(trace_span!("transport call")),
            );
            boxed
        });
        Self { handler_fn }
    }

    /// Performs the call and returns the response.
    #[inline]
    pub async fn call(&self, req: TransportRequest) -> CallResult {
        (self.handler_fn)(req).await
    }
}
