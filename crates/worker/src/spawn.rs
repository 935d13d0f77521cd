use std::future::Future;
use std::sync::OnceLock;

use tokio::task::JoinHandle;

use crate::TaskClass;

/// Returns the current runtime handle, or a lazily built shared runtime when
/// the caller is not inside one (synchronous frontends and plain unit tests).
fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}

	static SHARED_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	let runtime = SHARED_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(1)
			.thread_name("lookahead-worker")
			.build()
			.expect("failed to build lookahead-worker shared tokio runtime")
	});
	runtime.handle().clone()
}

/// Spawns an async task tagged with `class`.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	runtime_handle().spawn(fut)
}
