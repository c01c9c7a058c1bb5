//! SMS channel transport (simulated).

use async_trait::async_trait;

use crate::error::DispatchError;
use crate::message::OutboundMessage;
use crate::transport::ChannelTransport;

/// Simulated SMS sender.
///
/// Addresses the user's phone number, falling back to the username when no
/// phone is on file. A real provider integration replaces the log line
/// below.
pub struct SmsTransport;

#[async_trait]
impl ChannelTransport for SmsTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        tracing::debug!(
            to = %message.sms_recipient(),
            content = %message.content,
            "Simulated SMS send"
        );
        Ok(())
    }
}
