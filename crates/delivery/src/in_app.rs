//! In-app channel transport.

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::message::OutboundMessage;
use crate::transport::ChannelTransport;

/// In-app delivery has no external call today: the delivery row itself is
/// what the bell UI reads. This transport only logs; replacing it with a
/// real push/queue integration must not change the ledger contract.
pub struct InAppTransport;

#[async_trait]
impl ChannelTransport for InAppTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        tracing::debug!(username = %message.username, title = %message.title, "In-app notification queued");
        Ok(())
    }
}
