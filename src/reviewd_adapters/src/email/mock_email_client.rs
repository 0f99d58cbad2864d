use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

use reviewd_core::{Email, EmailClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that records every message instead of delivering it.
///
/// Tests read issued confirmation codes back out of `sent()`, or flip
/// `fail_sends` to simulate an outage.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    fail_sends: Arc<AtomicBool>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }

    /// When set, every send fails without recording the message.
    pub fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err("mail delivery is down".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_str().to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}
