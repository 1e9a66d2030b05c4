//! Remote command channel port (interface).

use std::future::Future;
use std::sync::Arc;

use crate::domain::RemotePlatform;
use crate::error::ChannelError;

/// Port for running commands on the remote host.
///
/// The channel owns connection lifecycle, authentication, transport and
/// cancellation. The core only hands it complete shell command strings and
/// reads back captured standard output.
pub trait RemoteChannel: Send + Sync {
    /// Report the remote operating system.
    fn remote_platform(&self) -> impl Future<Output = Result<RemotePlatform, ChannelError>> + Send;

    /// Run a shell command remotely and return its captured stdout.
    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ChannelError>> + Send;
}

impl<T: RemoteChannel> RemoteChannel for &T {
    fn remote_platform(&self) -> impl Future<Output = Result<RemotePlatform, ChannelError>> + Send {
        (**self).remote_platform()
    }

    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ChannelError>> + Send {
        (**self).execute(command)
    }
}

impl<T: RemoteChannel> RemoteChannel for Arc<T> {
    fn remote_platform(&self) -> impl Future<Output = Result<RemotePlatform, ChannelError>> + Send {
        (**self).remote_platform()
    }

    fn execute(&self, command: &str) -> impl Future<Output = Result<String, ChannelError>> + Send {
        (**self).execute(command)
    }
}
