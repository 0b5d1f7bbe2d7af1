use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Clone, Debug)]
pub struct Context<A = ()> {
	pub args_top: A,
	pub shutdown: CancellationToken,
}

impl Context {
	pub fn new() -> Self {
		Self {
			args_top: (),
			shutdown: CancellationToken::new(),
		}
	}
}

impl<A> Context<A> {
	pub fn with_top<C>(self, args_top: C) -> Context<C> {
		Context::<C> {
			args_top,
			shutdown: self.shutdown,
		}
	}

	pub fn take_top(self) -> (A, Context<()>) {
		(
			self.args_top,
			Context::<()> {
				args_top: (),
				shutdown: self.shutdown,
			},
		)
	}

	/// Cancel the shutdown token on SIGINT, or SIGTERM on unix.
	pub fn listen_for_shutdown(&self) {
		let token = self.shutdown.clone();
		tokio::spawn(async move {
			match tokio::signal::ctrl_c().await {
				Ok(()) => {
					info!("received SIGINT, shutting down");
					token.cancel();
				}
				Err(err) => {
					error!("unable to listen for shutdown signal: {err}");
				}
			}
		});

		#[cfg(unix)]
		{
			use tokio::signal::unix::{signal, SignalKind};

			let token = self.shutdown.clone();
			tokio::spawn(async move {
				match signal(SignalKind::terminate()) {
					Ok(mut sigterm) => {
						sigterm.recv().await;
						info!("received SIGTERM, shutting down");
						token.cancel();
					}
					Err(err) => {
						error!("unable to listen for SIGTERM: {err}");
					}
				}
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn args_move_between_contexts() {
		let ctx = Context::new().with_top(42_u8);
		assert_eq!(ctx.args_top, 42);

		let (top, rest) = ctx.take_top();
		assert_eq!(top, 42);
		let () = rest.args_top;
	}

	#[test]
	fn contexts_share_shutdown() {
		let ctx = Context::new();
		let (_, other) = ctx.clone().with_top("demo").take_top();

		other.shutdown.cancel();
		assert!(ctx.shutdown.is_cancelled());
	}
}
