use futures::FutureExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info, instrument, warn};

use super::conversation::{Conversation, ConversationSnapshot, PendingReply};
use super::message::ChatMessage;
use super::responder::ResponseSelector;
use crate::content::ContentProvider;
use crate::error::AppError;
use crate::locale::Locale;
use crate::scheduler::TaskScheduler;

/// Upper bound on how long a caller waits beyond the typing delay.
const REPLY_GRACE: Duration = Duration::from_secs(30);

/// Mailbox of a conversation actor.
pub enum ConversationMessage {
    SendUserMessage {
        text: String,
        responder: oneshot::Sender<Result<ChatMessage, AppError>>,
    },
    /// A scheduled reply coming back after the typing delay.
    DeliverReply {
        pending: PendingReply,
        responder: oneshot::Sender<Result<ChatMessage, AppError>>,
    },
    SetLocale {
        locale: Locale,
    },
    DismissCrisisAlert,
    Snapshot {
        responder: oneshot::Sender<ConversationSnapshot>,
    },
    Shutdown,
}

/// A handle to a conversation actor.
///
/// The actor owns the message log; every mutation goes through its mailbox,
/// including bot replies that come back after the typing delay. The actor
/// stops once every handle is dropped.
#[derive(Clone)]
pub struct ConversationHandle {
    sender: mpsc::Sender<ConversationMessage>,
    typing_delay: Duration,
}

impl ConversationHandle {
    pub fn new(
        content: Arc<dyn ContentProvider>,
        scheduler: Arc<dyn TaskScheduler>,
        typing_delay: Duration,
        locale: Locale,
    ) -> Self {
        Self::with_selector(ResponseSelector::new(content), scheduler, typing_delay, locale)
    }

    /// Spawns the actor around an existing selector (e.g. one with a seeded rng).
    pub fn with_selector(
        selector: ResponseSelector,
        scheduler: Arc<dyn TaskScheduler>,
        typing_delay: Duration,
        locale: Locale,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let runner = ConversationRunner {
            receiver,
            mailbox: sender.downgrade(),
            conversation: Conversation::new(selector, locale),
            scheduler,
            typing_delay,
        };
        tokio::spawn(async move { runner.run().await });
        Self {
            sender,
            typing_delay,
        }
    }

    /// Sends a user message and waits for the bot's reply to be posted.
    #[instrument(skip(self, text))]
    pub async fn send_message(&self, text: impl Into<String> + Send) -> Result<ChatMessage, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ConversationMessage::SendUserMessage {
                text: text.into(),
                responder: send,
            })
            .await?;
        timeout(self.typing_delay + REPLY_GRACE, recv).await??
    }

    pub async fn snapshot(&self) -> Result<ConversationSnapshot, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(ConversationMessage::Snapshot { responder: send })
            .await?;
        Ok(recv.await?)
    }

    pub async fn set_locale(&self, locale: Locale) -> Result<(), AppError> {
        self.sender
            .send(ConversationMessage::SetLocale { locale })
            .await?;
        Ok(())
    }

    pub async fn dismiss_crisis_alert(&self) -> Result<(), AppError> {
        self.sender
            .send(ConversationMessage::DismissCrisisAlert)
            .await?;
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.sender.send(ConversationMessage::Shutdown).await?;
        Ok(())
    }
}

// --- Actor Runner ---
struct ConversationRunner {
    receiver: mpsc::Receiver<ConversationMessage>,
    /// Weak so that dropping every handle still ends the actor.
    mailbox: mpsc::WeakSender<ConversationMessage>,
    conversation: Conversation,
    scheduler: Arc<dyn TaskScheduler>,
    typing_delay: Duration,
}

impl ConversationRunner {
    async fn run(mut self) {
        info!("Conversation started");
        while let Some(msg) = self.receiver.recv().await {
            if matches!(msg, ConversationMessage::Shutdown) {
                info!("Conversation shutting down...");
                break;
            }
            self.handle_message(msg);
        }
        info!("Conversation stopped");
    }

    fn handle_message(&mut self, msg: ConversationMessage) {
        match msg {
            ConversationMessage::SendUserMessage { text, responder } => {
                match self.conversation.accept_user_message(&text) {
                    Ok(pending) => self.schedule_reply(pending, responder),
                    Err(e) => {
                        debug!("Rejected user message: {}", e);
                        let _ = responder.send(Err(e));
                    }
                }
            }
            ConversationMessage::DeliverReply { pending, responder } => {
                let message = self.conversation.deliver(pending);
                let _ = responder.send(Ok(message));
            }
            ConversationMessage::SetLocale { locale } => {
                self.conversation.set_locale(locale);
            }
            ConversationMessage::DismissCrisisAlert => {
                self.conversation.dismiss_crisis_alert();
            }
            ConversationMessage::Snapshot { responder } => {
                let _ = responder.send(self.conversation.snapshot());
            }
            ConversationMessage::Shutdown => {}
        }
    }

    /// Posts the reply back into this actor's mailbox after the typing delay.
    fn schedule_reply(
        &self,
        pending: PendingReply,
        responder: oneshot::Sender<Result<ChatMessage, AppError>>,
    ) {
        let mailbox = self.mailbox.clone();
        self.scheduler.schedule(
            self.typing_delay,
            async move {
                let Some(sender) = mailbox.upgrade() else {
                    warn!("Conversation closed before the reply was delivered");
                    return;
                };
                if let Err(e) = sender
                    .send(ConversationMessage::DeliverReply { pending, responder })
                    .await
                {
                    error!("Failed to deliver scheduled reply: {}", e);
                }
            }
            .boxed(),
        );
    }
}
