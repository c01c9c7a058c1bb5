//! The transport trait and the channel-keyed dispatcher.

use async_trait::async_trait;

use notifyhub_core::channel::Channel;

use crate::email::{EmailConfig, EmailTransport};
use crate::error::DispatchError;
use crate::in_app::InAppTransport;
use crate::message::OutboundMessage;
use crate::sms::SmsTransport;

/// One send operation per delivery medium.
///
/// Implementations must be infallible to *call* -- any failure is returned
/// as a [`DispatchError`] so the fan-out engine can record it on the
/// delivery row and keep going.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DispatchError>;
}

/// Routes messages to the transport registered for each channel.
///
/// Channels are a closed enum, so the dispatcher holds exactly one
/// transport per variant; there is no runtime registration or string
/// matching.
pub struct Dispatcher {
    in_app: Box<dyn ChannelTransport>,
    email: Box<dyn ChannelTransport>,
    sms: Box<dyn ChannelTransport>,
}

impl Dispatcher {
    /// Build a dispatcher from explicit transports. Tests use this to
    /// substitute failing or recording transports.
    pub fn new(
        in_app: Box<dyn ChannelTransport>,
        email: Box<dyn ChannelTransport>,
        sms: Box<dyn ChannelTransport>,
    ) -> Self {
        Self { in_app, email, sms }
    }

    /// Build the default dispatcher: in-app logging, email from `SMTP_*`
    /// environment (simulated when unset), simulated SMS.
    pub fn from_env() -> Self {
        Self::new(
            Box::new(InAppTransport),
            Box::new(EmailTransport::new(EmailConfig::from_env())),
            Box::new(SmsTransport),
        )
    }

    /// Send a message over one channel.
    pub async fn dispatch(
        &self,
        channel: Channel,
        message: &OutboundMessage,
    ) -> Result<(), DispatchError> {
        let transport = match channel {
            Channel::InApp => &self.in_app,
            Channel::Email => &self.email,
            Channel::Sms => &self.sms,
        };
        transport.send(message).await
    }
}
