//! Enum wrapper for transport dispatch.
//!
//! Native `async fn` in traits (RPITIT) are not object-safe, so backend
//! selection at runtime cannot use `Box<dyn TagTransport>`. The enum
//! wrapper keeps concrete-type dispatch (monomorphized, zero-cost) while
//! letting a binary pick the backend from configuration.

use crate::command::CommandTransport;
use crate::mock::MockTransport;
#[cfg(feature = "pcsc")]
use crate::pcsc::PcscTransport;
use crate::traits::{PollEvent, TagTransport, TransportInfo};
use crate::Result;
use std::time::Duration;

/// Enum wrapper over the supported reader transports.
///
/// # Examples
///
/// ```
/// use taptype_reader::{AnyTransport, MockTransport, TagTransport};
///
/// # async fn example() -> taptype_reader::Result<()> {
/// let (transport, _handle) = MockTransport::new();
/// let transport = AnyTransport::Mock(transport);
///
/// let info = transport.describe().await?;
/// assert_eq!(info.backend, "mock");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyTransport {
    /// Command-backed transport (reader-control tool subprocess).
    Command(CommandTransport),

    /// PC/SC event-backed transport.
    #[cfg(feature = "pcsc")]
    Pcsc(PcscTransport),

    /// Mock transport for development and testing.
    Mock(MockTransport),
}

impl TagTransport for AnyTransport {
    async fn poll(&mut self, timeout: Duration) -> Result<PollEvent> {
        match self {
            Self::Command(transport) => transport.poll(timeout).await,
            #[cfg(feature = "pcsc")]
            Self::Pcsc(transport) => transport.poll(timeout).await,
            Self::Mock(transport) => transport.poll(timeout).await,
        }
    }

    async fn describe(&self) -> Result<TransportInfo> {
        match self {
            Self::Command(transport) => transport.describe().await,
            #[cfg(feature = "pcsc")]
            Self::Pcsc(transport) => transport.describe().await,
            Self::Mock(transport) => transport.describe().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_any_transport_mock_dispatch() {
        let (transport, handle) = MockTransport::new();
        let mut transport = AnyTransport::Mock(transport);

        handle.present_text("[+]  UID: 04 A3 FF 21").await.unwrap();

        let info = transport.describe().await.unwrap();
        assert_eq!(info.backend, "mock");

        let event = transport.poll(Duration::from_secs(1)).await.unwrap();
        assert!(matches!(event, PollEvent::Capture(_)));
    }
}
